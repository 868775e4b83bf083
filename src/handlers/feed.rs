// src/handlers/feed.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::SessionUser, tenancy::TenantContext},
    models::{
        content::ReactionPayload,
        feed::{CreatePostPayload, FeedPage, FeedQuery, Post},
    },
};

// GET /api/feed
#[utoipa::path(
    get,
    path = "/api/feed",
    tag = "Feed",
    params(
        FeedQuery,
        ("x-tenant-id" = String, Header, description = "ID do tenant")
    ),
    responses(
        (status = 200, description = "Página do feed, do mais novo para o mais antigo", body = FeedPage),
        (status = 401, description = "Tenant ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_posts(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Query(query): Query<FeedQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state.feed_service.list_posts(&tenant, &query).await?;
    Ok((StatusCode::OK, Json(page)))
}

// POST /api/feed
#[utoipa::path(
    post,
    path = "/api/feed",
    tag = "Feed",
    request_body = CreatePostPayload,
    params(("x-tenant-id" = String, Header, description = "ID do tenant")),
    responses(
        (status = 201, description = "Post criado (tags sugeridas pela IA)", body = Post),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_post(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    SessionUser(user): SessionUser,
    Json(payload): Json<CreatePostPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let post = app_state
        .feed_service
        .create_post(&tenant, &user, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

// POST /api/feed/{id}/reactions
#[utoipa::path(
    post,
    path = "/api/feed/{id}/reactions",
    tag = "Feed",
    request_body = ReactionPayload,
    params(
        ("id" = Uuid, Path, description = "ID do post"),
        ("x-tenant-id" = String, Header, description = "ID do tenant")
    ),
    responses(
        (status = 200, description = "Reação ligada/desligada", body = Post),
        (status = 404, description = "Post não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_reaction(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    SessionUser(user): SessionUser,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<ReactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let post = app_state
        .feed_service
        .toggle_reaction(&tenant, &user, post_id, &payload.emoji)
        .await?;
    Ok((StatusCode::OK, Json(post)))
}
