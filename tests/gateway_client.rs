mod common;

use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use collab_api::{
    client::{ApiClient, ClientContext, RequestOptions},
    db::mock::fixtures::ids,
    models::{
        feed::{CreatePostPayload, FeedQuery, PostType},
        tenancy::Tenant,
    },
    services::ai_service::DisabledGenerator,
};
use common::{app_with, spawn_server, TEST_SECRET};
use reqwest::Method;
use serde_json::{json, Value};

// Devolve os cabeçalhos que interessam, para inspecionar o que o cliente enviou
async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let get = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(json!({
        "tenant_id": get("x-tenant-id"),
        "tenant_schema": get("x-tenant-schema"),
        "authorization": get("authorization"),
        "content_type": get("content-type"),
    }))
}

async fn echo_server() -> String {
    let app = Router::new()
        .route("/echo", get(echo_headers))
        .route("/missing", get(|| async { (StatusCode::NOT_FOUND, Json(json!({}))) }))
        .route("/broken", get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }));
    let addr = spawn_server(app).await;
    format!("http://{addr}")
}

#[tokio::test]
async fn tenant_and_bearer_headers_follow_the_context() {
    let base = echo_server().await;
    let tenant = Tenant::parse("t1", Some("s1")).expect("tenant");
    let client = ApiClient::new(&base, ClientContext::default().with_tenant(tenant).with_token("abc"))
        .expect("client");

    let seen: Value = client
        .request(Method::GET, "/echo", RequestOptions::default())
        .await
        .expect("echo");
    assert_eq!(seen["tenant_id"], "t1");
    assert_eq!(seen["tenant_schema"], "s1");
    assert_eq!(seen["authorization"], "Bearer abc");
    assert_eq!(seen["content_type"], "application/json");
}

#[tokio::test]
async fn no_tenant_means_no_tenant_headers() {
    let base = echo_server().await;
    let client = ApiClient::new(&base, ClientContext::default()).expect("client");

    let seen: Value = client
        .request(Method::GET, "/echo", RequestOptions::default())
        .await
        .expect("echo");
    assert_eq!(seen["tenant_id"], Value::Null);
    assert_eq!(seen["tenant_schema"], Value::Null);
    assert_eq!(seen["authorization"], Value::Null);
}

#[tokio::test]
async fn caller_headers_are_sent_along() {
    let base = echo_server().await;
    let client = ApiClient::new(&base, ClientContext::default()).expect("client");

    let options = RequestOptions::default().header("x-tenant-id", "from-caller");
    let seen: Value = client.request(Method::GET, "/echo", options).await.expect("echo");
    assert_eq!(seen["tenant_id"], "from-caller");
}

#[tokio::test]
async fn empty_error_body_is_normalized_from_the_status() {
    let base = echo_server().await;
    let client = ApiClient::new(&base, ClientContext::default()).expect("client");

    let err = client
        .request::<Value>(Method::GET, "/missing", RequestOptions::default())
        .await
        .expect_err("404");
    assert_eq!(err.code, "HTTP_404");
    assert_eq!(err.message, "API Error: Not Found");
    assert_eq!(err.details, None);

    let err = client
        .request::<Value>(Method::GET, "/broken", RequestOptions::default())
        .await
        .expect_err("502");
    assert_eq!(err.code, "HTTP_502");
    assert_eq!(err.message, "API Error: Bad Gateway");
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Porta 9 (discard) normalmente fechada em máquinas de teste
    let client = ApiClient::new("http://127.0.0.1:9", ClientContext::default()).expect("client");
    let err = client
        .request::<Value>(Method::GET, "/health", RequestOptions::default())
        .await
        .expect_err("offline");
    assert_eq!(err.code, "NETWORK_ERROR");
}

#[tokio::test]
async fn client_talks_to_the_mock_api_end_to_end() {
    let addr = spawn_server(app_with(Arc::new(DisabledGenerator), Some(TEST_SECRET))).await;
    let base = format!("http://{addr}/api");
    let tenant = Tenant::parse("t1", None).expect("tenant");
    let client = ApiClient::new(&base, ClientContext::default().with_tenant(tenant)).expect("client");

    let page = client
        .feed()
        .list(&FeedQuery {
            tag: Some("design".into()),
            ..FeedQuery::default()
        })
        .await
        .expect("feed");
    let post_ids: Vec<_> = page.posts.iter().map(|p| p.id).collect();
    assert_eq!(post_ids, vec![ids::POST_DESIGN_SYSTEM, ids::POST_KUDOS]);

    // Sessão emitida no tenant; depois o token sozinho basta
    let session = client.auth().create_session(ids::DAVID).await.expect("session");
    let signed_in = client.with_context(ClientContext::default().with_token(session.token));
    let me = signed_in.users().me().await.expect("me");
    assert_eq!(me.user.id, ids::DAVID);
    assert_eq!(me.tenant.id, "t1");
    assert_eq!(me.tenant.schema, "public");

    let post = signed_in
        .feed()
        .create(&CreatePostPayload {
            content: "Shipping the release notes today.".into(),
            post_type: PostType::Announcement,
            attachments: vec![],
        })
        .await
        .expect("post");
    assert_eq!(post.author.id, ids::DAVID);
    assert!(post.ai_tags.is_empty());
}

#[tokio::test]
async fn server_errors_keep_their_code_and_details() {
    let addr = spawn_server(app_with(Arc::new(DisabledGenerator), None)).await;
    let base = format!("http://{addr}/api");

    let anonymous = ApiClient::new(&base, ClientContext::default()).expect("client");
    let err = anonymous.users().list().await.expect_err("no tenant");
    assert_eq!(err.code, "TENANT_REQUIRED");
    assert_eq!(err.message, "Tenant não informado");

    let tenant = Tenant::parse("t1", None).expect("tenant");
    let client = anonymous.with_context(ClientContext::default().with_tenant(tenant));
    let err = client
        .feed()
        .create(&CreatePostPayload {
            content: String::new(),
            post_type: PostType::Update,
            attachments: vec![],
        })
        .await
        .expect_err("empty post");
    assert_eq!(err.code, "VALIDATION_ERROR");
    assert!(err.details.as_ref().is_some_and(|d| d["content"].is_array()));
}
