// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    db::UserRepository,
    middleware::tenancy::TenantContext,
    models::auth::{SessionRequest, SessionResponse},
};

// POST /api/auth/session
//
// Login de demonstração: emite um token para um usuário do diretório do
// tenant. O token carrega o tenant, então chamadas seguintes podem omitir
// X-Tenant-ID.
#[utoipa::path(
    post,
    path = "/api/auth/session",
    tag = "Auth",
    request_body = SessionRequest,
    responses(
        (status = 201, description = "Sessão criada", body = SessionResponse),
        (status = 400, description = "Usuário desconhecido ou autenticação desligada"),
        (status = 401, description = "Tenant ausente")
    ),
    params(
        ("x-tenant-id" = String, Header, description = "ID do tenant"),
        ("x-tenant-schema" = Option<String>, Header, description = "Schema do tenant (padrão: public)")
    )
)]
pub async fn create_session(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Json(payload): Json<SessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .repo
        .find_user(&tenant, payload.user_id)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("usuário desconhecido {}", payload.user_id)))?
        .as_user();

    let (token, expires_at) = app_state.auth_service.create_token(&user, Some(&tenant))?;
    tracing::info!("🔑 Sessão emitida para {} no tenant {}", user.id, tenant.id);

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token,
            user,
            expires_at,
        }),
    ))
}
