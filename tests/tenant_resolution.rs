mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use collab_api::{db::mock::fixtures::ids, services::ai_service::DisabledGenerator};
use common::{app_with, mock_app, send, session_token, tenant_request, with_bearer, TEST_SECRET};

#[tokio::test]
async fn health_needs_no_tenant_and_reports_mock_mode() {
    let app = mock_app();
    let (status, body) = send(&app, tenant_request("GET", "/api/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["data_mode"], "mock");
}

#[tokio::test]
async fn missing_tenant_is_rejected_with_401() {
    let app = mock_app();
    let (status, body) = send(&app, tenant_request("GET", "/api/feed", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "TENANT_REQUIRED");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn malformed_tenant_is_rejected_with_400() {
    let app = mock_app();
    let (status, body) = send(
        &app,
        tenant_request("GET", "/api/tasks", Some("acme corp!"), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_TENANT");
}

#[tokio::test]
async fn schema_defaults_to_public() {
    let app = mock_app();
    let (status, body) = send(&app, tenant_request("GET", "/api/users/me", Some("t1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tenant"]["id"], "t1");
    assert_eq!(body["tenant"]["schema"], "public");
    // Sem token: usuário de demonstração
    assert_eq!(body["user"]["id"], ids::SARAH.to_string());
}

#[tokio::test]
async fn explicit_schema_header_is_kept() {
    let app = mock_app();
    let mut request = tenant_request("GET", "/api/users/me", Some("t1"), None);
    request
        .headers_mut()
        .insert("x-tenant-schema", "s1".parse().expect("header"));
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tenant"]["schema"], "s1");
}

#[tokio::test]
async fn token_tenant_is_used_when_header_is_absent() {
    let app = app_with(Arc::new(DisabledGenerator), Some(TEST_SECRET));
    let token = session_token(&app, "t1", ids::EMILY).await;

    let request = with_bearer(tenant_request("GET", "/api/users/me", None, None), &token);
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tenant"]["id"], "t1");
    assert_eq!(body["user"]["id"], ids::EMILY.to_string());
    assert_eq!(body["user"]["name"], "Emily Rodriguez");
}

#[tokio::test]
async fn header_tenant_must_match_token_tenant() {
    let app = app_with(Arc::new(DisabledGenerator), Some(TEST_SECRET));
    let token = session_token(&app, "t1", ids::MARCUS).await;

    let request = with_bearer(tenant_request("GET", "/api/feed", Some("t2"), None), &token);
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "TENANT_FORBIDDEN");

    let request = with_bearer(tenant_request("GET", "/api/feed", Some("t1"), None), &token);
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn invalid_token_is_rejected_when_auth_is_enabled() {
    let app = app_with(Arc::new(DisabledGenerator), Some(TEST_SECRET));
    let request = with_bearer(tenant_request("GET", "/api/feed", Some("t1"), None), "not-a-jwt");
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn tokens_are_ignored_when_auth_is_disabled() {
    let app = mock_app();
    let request = with_bearer(tenant_request("GET", "/api/users/me", Some("t1"), None), "not-a-jwt");
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], ids::SARAH.to_string());
}

#[tokio::test]
async fn session_for_unknown_user_is_a_bad_request() {
    let app = app_with(Arc::new(DisabledGenerator), Some(TEST_SECRET));
    let (status, body) = send(
        &app,
        tenant_request(
            "POST",
            "/api/auth/session",
            Some("t1"),
            Some(serde_json::json!({ "user_id": uuid::Uuid::new_v4() })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}
