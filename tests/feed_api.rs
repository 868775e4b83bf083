mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use collab_api::db::mock::fixtures::ids;
use common::{app_with, mock_app, send, tenant_request, Fixed};
use serde_json::json;

fn post_ids(body: &serde_json::Value) -> Vec<String> {
    body["posts"]
        .as_array()
        .expect("posts")
        .iter()
        .map(|p| p["id"].as_str().expect("id").to_string())
        .collect()
}

#[tokio::test]
async fn tag_filter_matches_exactly_the_tagged_posts() {
    let app = mock_app();
    let (status, body) = send(&app, tenant_request("GET", "/api/feed?tag=design", Some("t1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        post_ids(&body),
        vec![ids::POST_DESIGN_SYSTEM.to_string(), ids::POST_KUDOS.to_string()]
    );
    assert_eq!(body["total"], 2);
    assert_eq!(body["has_more"], false);
}

#[tokio::test]
async fn type_filter_uses_the_post_type() {
    let app = mock_app();
    let (status, body) = send(&app, tenant_request("GET", "/api/feed?type=kudos", Some("t1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(post_ids(&body), vec![ids::POST_KUDOS.to_string()]);
    assert_eq!(body["posts"][0]["post_type"], "kudos");
}

#[tokio::test]
async fn limit_and_cursor_page_through_the_feed() {
    let app = mock_app();
    let (status, first) = send(&app, tenant_request("GET", "/api/feed?limit=2", Some("t1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        post_ids(&first),
        vec![ids::POST_KICKOFF.to_string(), ids::POST_DESIGN_SYSTEM.to_string()]
    );
    assert_eq!(first["total"], 3);
    assert_eq!(first["has_more"], true);

    let cursor = first["posts"][1]["created_at"].as_str().expect("cursor");
    let uri = format!("/api/feed?limit=2&before={cursor}");
    let (status, second) = send(&app, tenant_request("GET", &uri, Some("t1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(post_ids(&second), vec![ids::POST_KUDOS.to_string()]);
    assert_eq!(second["has_more"], false);
}

#[tokio::test]
async fn created_post_gets_normalized_ai_tags() {
    let app = app_with(
        Arc::new(Fixed("```json\n[\"Launch\", \"#Marketing\"]\n```")),
        None,
    );
    let (status, post) = send(
        &app,
        tenant_request(
            "POST",
            "/api/feed",
            Some("t1"),
            Some(json!({ "content": "We launch the new site on Friday!", "type": "announcement" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(post["ai_tags"], json!(["launch", "marketing"]));
    assert_eq!(post["post_type"], "announcement");
    assert_eq!(post["author"]["id"], ids::SARAH.to_string());
    assert_eq!(post["reactions"], json!([]));

    let (_, feed) = send(&app, tenant_request("GET", "/api/feed", Some("t1"), None)).await;
    assert_eq!(feed["total"], 4);
    assert_eq!(feed["posts"][0]["id"], post["id"]);
}

#[tokio::test]
async fn post_is_created_even_when_ai_fails() {
    let app = mock_app();
    let (status, post) = send(
        &app,
        tenant_request(
            "POST",
            "/api/feed",
            Some("t1"),
            Some(json!({ "content": "Coffee machine on 3 is fixed." })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(post["ai_tags"], json!([]));
    assert_eq!(post["post_type"], "update");
}

#[tokio::test]
async fn empty_content_is_a_validation_error() {
    let app = mock_app();
    let (status, body) = send(
        &app,
        tenant_request("POST", "/api/feed", Some("t1"), Some(json!({ "content": "" }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"]["content"].is_array());
}

#[tokio::test]
async fn writes_stay_inside_their_tenant() {
    let app = mock_app();
    let (status, _) = send(
        &app,
        tenant_request("POST", "/api/feed", Some("t1"), Some(json!({ "content": "Only for t1" }))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, t1) = send(&app, tenant_request("GET", "/api/feed", Some("t1"), None)).await;
    let (_, t2) = send(&app, tenant_request("GET", "/api/feed", Some("t2"), None)).await;
    assert_eq!(t1["total"], 4);
    assert_eq!(t2["total"], 3);
}

#[tokio::test]
async fn reaction_toggles_on_and_off() {
    let app = mock_app();
    let uri = format!("/api/feed/{}/reactions", ids::POST_KUDOS);

    let (status, post) = send(&app, tenant_request("POST", &uri, Some("t1"), Some(json!({ "emoji": "🎉" })))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        post["reactions"],
        json!([{ "emoji": "🎉", "count": 1, "user_ids": [ids::SARAH] }])
    );

    let (_, post) = send(&app, tenant_request("POST", &uri, Some("t1"), Some(json!({ "emoji": "🎉" })))).await;
    assert_eq!(post["reactions"], json!([]));
}

#[tokio::test]
async fn reaction_on_unknown_post_is_not_found() {
    let app = mock_app();
    let uri = format!("/api/feed/{}/reactions", uuid::Uuid::new_v4());
    let (status, body) = send(&app, tenant_request("POST", &uri, Some("t1"), Some(json!({ "emoji": "👍" })))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
