#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use collab_api::{
    config::AppState,
    db::MockRepository,
    routes::build_router,
    services::ai_service::{AiError, DisabledGenerator, GenerationOptions, TextGenerator},
};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-secret";

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

/// Gerador que sempre devolve o mesmo texto.
pub struct Fixed(pub &'static str);

#[async_trait]
impl TextGenerator for Fixed {
    async fn generate(&self, _prompt: &str, _options: GenerationOptions) -> Result<String, AiError> {
        Ok(self.0.to_string())
    }
}

/// App em modo mock, sem IA e sem JWT.
pub fn mock_app() -> Router {
    app_with(Arc::new(DisabledGenerator), None)
}

pub fn app_with(generator: Arc<dyn TextGenerator>, jwt_secret: Option<&str>) -> Router {
    let state = AppState::from_parts(
        Arc::new(MockRepository::new()),
        generator,
        jwt_secret.map(str::to_string),
    );
    build_router(state)
}

pub fn tenant_request(
    method: &str,
    uri: &str,
    tenant: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(tenant) = tenant {
        builder = builder.header("x-tenant-id", tenant);
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

/// Envia a requisição e devolve status + corpo JSON.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    (status, read_json(response).await)
}

/// Emite um token de sessão para `user_id` no tenant dado.
pub async fn session_token(app: &Router, tenant: &str, user_id: uuid::Uuid) -> String {
    let (status, body) = send(
        app,
        tenant_request(
            "POST",
            "/api/auth/session",
            Some(tenant),
            Some(serde_json::json!({ "user_id": user_id })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "session: {body}");
    body["token"].as_str().expect("token").to_string()
}

/// Sobe o router num listener local e devolve o endereço.
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

pub fn with_bearer(mut request: Request<Body>, token: &str) -> Request<Body> {
    let value = axum::http::HeaderValue::from_str(&format!("Bearer {token}")).expect("header");
    request
        .headers_mut()
        .insert(axum::http::header::AUTHORIZATION, value);
    request
}
