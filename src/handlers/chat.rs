// src/handlers/chat.rs

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
    models::chat::{
        Channel, CreateChannelPayload, Message, MessagePage, MessageQuery, SendMessagePayload,
        SmartReplies, SmartReplyPayload,
    },
};

// =============================================================================
//  CANAIS
// =============================================================================

// GET /api/chat/channels
#[utoipa::path(
    get,
    path = "/api/chat/channels",
    tag = "Chat",
    params(("x-tenant-id" = String, Header, description = "ID do tenant")),
    responses(
        (status = 200, description = "Canais visíveis para o usuário", body = Vec<Channel>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_channels(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    SessionUser(user): SessionUser,
) -> Result<impl IntoResponse, AppError> {
    let channels = app_state.chat_service.list_channels(&tenant, &user).await?;
    Ok((StatusCode::OK, Json(channels)))
}

// POST /api/chat/channels
#[utoipa::path(
    post,
    path = "/api/chat/channels",
    tag = "Chat",
    request_body = CreateChannelPayload,
    params(("x-tenant-id" = String, Header, description = "ID do tenant")),
    responses(
        (status = 201, description = "Canal criado", body = Channel),
        (status = 400, description = "Dados inválidos ou membro desconhecido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_channel(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    SessionUser(user): SessionUser,
    Json(payload): Json<CreateChannelPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let channel = app_state
        .chat_service
        .create_channel(&tenant, &user, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(channel)))
}

// =============================================================================
//  MENSAGENS
// =============================================================================

// GET /api/chat/channels/{id}/messages
#[utoipa::path(
    get,
    path = "/api/chat/channels/{id}/messages",
    tag = "Chat",
    params(
        ("id" = Uuid, Path, description = "ID do canal"),
        MessageQuery,
        ("x-tenant-id" = String, Header, description = "ID do tenant")
    ),
    responses(
        (status = 200, description = "Página de mensagens em ordem cronológica", body = MessagePage),
        (status = 404, description = "Canal não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_messages(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    SessionUser(user): SessionUser,
    Path(channel_id): Path<Uuid>,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state
        .chat_service
        .list_messages(&tenant, &user, channel_id, &query)
        .await?;
    Ok((StatusCode::OK, Json(page)))
}

// POST /api/chat/channels/{id}/messages
#[utoipa::path(
    post,
    path = "/api/chat/channels/{id}/messages",
    tag = "Chat",
    request_body = SendMessagePayload,
    params(
        ("id" = Uuid, Path, description = "ID do canal"),
        ("x-tenant-id" = String, Header, description = "ID do tenant")
    ),
    responses(
        (status = 201, description = "Mensagem enviada", body = Message),
        (status = 404, description = "Canal não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn send_message(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    SessionUser(user): SessionUser,
    Path(channel_id): Path<Uuid>,
    Json(payload): Json<SendMessagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let message = app_state
        .chat_service
        .send_message(&tenant, &user, channel_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

// POST /api/chat/smart-replies
#[utoipa::path(
    post,
    path = "/api/chat/smart-replies",
    tag = "Chat",
    request_body = SmartReplyPayload,
    params(("x-tenant-id" = String, Header, description = "ID do tenant")),
    responses(
        (status = 200, description = "Sugestões de resposta (com fallback fixo)", body = SmartReplies)
    ),
    security(("api_jwt" = []))
)]
pub async fn smart_replies(
    State(app_state): State<AppState>,
    TenantContext(_tenant): TenantContext,
    Json(payload): Json<SmartReplyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let replies = app_state.chat_service.smart_replies(&payload.message).await;
    Ok((StatusCode::OK, Json(replies)))
}
