mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use collab_api::{db::mock::fixtures::ids, services::ai_service::DisabledGenerator};
use common::{app_with, mock_app, send, session_token, tenant_request, with_bearer, Fixed, TEST_SECRET};
use serde_json::json;

fn names(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .expect("channels")
        .iter()
        .map(|c| c["name"].as_str().expect("name").to_string())
        .collect()
}

#[tokio::test]
async fn channels_are_sorted_and_carry_unread_counts() {
    let app = mock_app();
    let (status, body) = send(&app, tenant_request("GET", "/api/chat/channels", Some("t1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["design", "general", "leadership"]);

    let general = &body[1];
    assert_eq!(general["id"], ids::CHANNEL_GENERAL.to_string());
    assert_eq!(general["member_count"], 4);
    assert_eq!(general["unread_count"], 2);
    assert!(general["last_message_at"].is_string());
}

#[tokio::test]
async fn private_channels_are_hidden_from_non_members() {
    let app = app_with(Arc::new(DisabledGenerator), Some(TEST_SECRET));
    let token = session_token(&app, "t1", ids::EMILY).await;

    let request = with_bearer(tenant_request("GET", "/api/chat/channels", Some("t1"), None), &token);
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["design", "general"]);

    let uri = format!("/api/chat/channels/{}/messages", ids::CHANNEL_LEADERSHIP);
    let request = with_bearer(tenant_request("GET", &uri, Some("t1"), None), &token);
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn message_pages_are_chronological() {
    let app = mock_app();
    let uri = format!("/api/chat/channels/{}/messages?limit=2", ids::CHANNEL_GENERAL);
    let (status, body) = send(&app, tenant_request("GET", &uri, Some("t1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["has_more"], true);

    let contents: Vec<&str> = body["messages"]
        .as_array()
        .expect("messages")
        .iter()
        .map(|m| m["content"].as_str().expect("content"))
        .collect();
    assert_eq!(
        contents,
        vec![
            "Deploy to staging is done, please smoke test.",
            "Smoke tests pass on my side."
        ]
    );
}

#[tokio::test]
async fn sent_message_shows_up_last_and_marks_channel_read() {
    let app = mock_app();
    let uri = format!("/api/chat/channels/{}/messages", ids::CHANNEL_GENERAL);
    let (status, message) = send(
        &app,
        tenant_request("POST", &uri, Some("t1"), Some(json!({ "content": "On it." }))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(message["sender"]["id"], ids::SARAH.to_string());
    assert_eq!(message["channel_id"], ids::CHANNEL_GENERAL.to_string());

    let (_, page) = send(&app, tenant_request("GET", &uri, Some("t1"), None)).await;
    assert_eq!(page["total"], 4);
    assert_eq!(page["messages"][3]["id"], message["id"]);

    let (_, channels) = send(&app, tenant_request("GET", "/api/chat/channels", Some("t1"), None)).await;
    assert_eq!(channels[1]["unread_count"], 0);
}

#[tokio::test]
async fn created_channel_includes_creator_once() {
    let app = mock_app();
    let (status, channel) = send(
        &app,
        tenant_request(
            "POST",
            "/api/chat/channels",
            Some("t1"),
            Some(json!({
                "name": "launch",
                "is_private": true,
                "member_ids": [ids::SARAH, ids::DAVID, ids::DAVID]
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(channel["name"], "launch");
    assert_eq!(channel["member_count"], 2);
    assert_eq!(channel["unread_count"], 0);
}

#[tokio::test]
async fn channel_with_unknown_member_is_rejected() {
    let app = mock_app();
    let (status, body) = send(
        &app,
        tenant_request(
            "POST",
            "/api/chat/channels",
            Some("t1"),
            Some(json!({ "name": "ghosts", "member_ids": [uuid::Uuid::new_v4()] })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn smart_replies_fall_back_when_ai_is_unavailable() {
    let app = mock_app();
    let (status, body) = send(
        &app,
        tenant_request(
            "POST",
            "/api/chat/smart-replies",
            Some("t1"),
            Some(json!({ "message": "Can you review my PR?" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "replies": ["Thanks!", "Got it.", "Will do."] }));
}

#[tokio::test]
async fn smart_replies_are_capped_at_three() {
    let app = app_with(
        Arc::new(Fixed(r#"{"replies": ["Sure", "On it", "Later", "No"]}"#)),
        None,
    );
    let (status, body) = send(
        &app,
        tenant_request(
            "POST",
            "/api/chat/smart-replies",
            Some("t1"),
            Some(json!({ "message": "Lunch?" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["replies"], json!(["Sure", "On it", "Later"]));
}
