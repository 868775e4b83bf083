#![cfg(feature = "pg-tests")]

mod common;

use std::{collections::BTreeSet, sync::Arc};

use axum::{http::StatusCode, Router};
use collab_api::{
    config::AppState,
    db::{MockRepository, Repository, SqlRepository},
    routes::build_router,
    services::ai_service::DisabledGenerator,
};
use common::{send, tenant_request};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

async fn pg_repo() -> Option<SqlRepository> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("skipping pg-tests: set DATABASE_URL");
            return None;
        }
    };
    let pool = match PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect(&url)
        .await
    {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("skipping pg-tests: cannot connect to postgres: {err}");
            return None;
        }
    };
    sqlx::migrate!().run(&pool).await.expect("migrations");
    Some(SqlRepository::new(pool))
}

fn app(repo: Arc<dyn Repository>) -> Router {
    build_router(AppState::from_parts(repo, Arc::new(DisabledGenerator), None))
}

// Conjunto de caminhos de chaves de objeto (arrays olham só o primeiro item)
fn key_paths(value: &Value, prefix: &str, out: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = format!("{prefix}.{key}");
                out.insert(path.clone());
                key_paths(child, &path, out);
            }
        }
        Value::Array(items) => {
            if let Some(first) = items.first() {
                key_paths(first, &format!("{prefix}[]"), out);
            }
        }
        _ => {}
    }
}

fn shape(value: &Value) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    key_paths(value, "$", &mut out);
    out
}

#[tokio::test]
async fn sql_and_mock_responses_have_the_same_shape() {
    let Some(repo) = pg_repo().await else {
        return;
    };
    let tenant = format!("parity-{}", Uuid::new_v4().simple());

    let sql = app(Arc::new(repo));
    let mock = app(Arc::new(MockRepository::new()));

    let post = json!({
        "content": "Parity check",
        "type": "question",
        "attachments": [{ "name": "a.txt", "url": "https://files.example.test/a.txt" }]
    });
    let channel = json!({ "name": "parity", "description": "Shape check" });
    let task = json!({ "title": "Parity task", "priority": "high" });

    for (method, uri, body) in [
        ("POST", "/api/feed", Some(post)),
        ("GET", "/api/feed", None),
        ("POST", "/api/chat/channels", Some(channel)),
        ("POST", "/api/tasks", Some(task)),
        ("GET", "/api/analytics/overview", None),
    ] {
        let (sql_status, sql_body) =
            send(&sql, tenant_request(method, uri, Some(tenant.as_str()), body.clone())).await;
        let (mock_status, mock_body) =
            send(&mock, tenant_request(method, uri, Some(tenant.as_str()), body)).await;

        assert!(sql_status.is_success(), "{method} {uri}: {sql_body}");
        assert_eq!(sql_status, mock_status, "{method} {uri}");
        assert_eq!(shape(&sql_body), shape(&mock_body), "{method} {uri}");
    }

    // Reação no post SQL recém-criado
    let (_, feed) = send(&sql, tenant_request("GET", "/api/feed", Some(tenant.as_str()), None)).await;
    let post_id = feed["posts"][0]["id"].as_str().expect("post id");
    let uri = format!("/api/feed/{post_id}/reactions");
    let (status, reacted) =
        send(&sql, tenant_request("POST", &uri, Some(tenant.as_str()), Some(json!({ "emoji": "👍" })))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reacted["reactions"][0]["count"], 1);
}
