// src/handlers/users.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    db::UserRepository,
    middleware::{auth::SessionUser, tenancy::TenantContext},
    models::users::{DirectoryUser, Me},
};

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    params(("x-tenant-id" = String, Header, description = "ID do tenant")),
    responses((status = 200, description = "Diretório de pessoas", body = Vec<DirectoryUser>)),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.repo.list_users(&tenant).await?;
    Ok((StatusCode::OK, Json(users)))
}

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    params(("x-tenant-id" = String, Header, description = "ID do tenant")),
    responses(
        (status = 200, description = "Usuário da sessão e tenant resolvido", body = Me),
        (status = 401, description = "Tenant ausente ou token inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    TenantContext(tenant): TenantContext,
    SessionUser(user): SessionUser,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(Me { user, tenant })))
}
