// src/handlers/docs.rs

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
    db::DocsRepository,
    middleware::{auth::SessionUser, tenancy::TenantContext},
    models::docs::{CreateDocumentPayload, DocsQuery, Document},
};

// GET /api/docs
#[utoipa::path(
    get,
    path = "/api/docs",
    tag = "Docs",
    params(
        DocsQuery,
        ("x-tenant-id" = String, Header, description = "ID do tenant")
    ),
    responses((status = 200, description = "Documentos do tenant", body = Vec<Document>)),
    security(("api_jwt" = []))
)]
pub async fn list_documents(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Query(query): Query<DocsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let documents = app_state.repo.list_documents(&tenant, &query).await?;
    Ok((StatusCode::OK, Json(documents)))
}

// POST /api/docs
#[utoipa::path(
    post,
    path = "/api/docs",
    tag = "Docs",
    request_body = CreateDocumentPayload,
    params(("x-tenant-id" = String, Header, description = "ID do tenant")),
    responses(
        (status = 201, description = "Documento criado", body = Document),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_document(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    SessionUser(user): SessionUser,
    Json(payload): Json<CreateDocumentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let document = app_state
        .docs_service
        .create_document(&tenant, &user, payload)
        .await?;
    tracing::info!("📄 Documento '{}' criado no tenant {}", document.title, tenant.id);
    Ok((StatusCode::CREATED, Json(document)))
}

// GET /api/docs/{id}
#[utoipa::path(
    get,
    path = "/api/docs/{id}",
    tag = "Docs",
    params(
        ("id" = Uuid, Path, description = "ID do documento"),
        ("x-tenant-id" = String, Header, description = "ID do tenant")
    ),
    responses(
        (status = 200, description = "Documento", body = Document),
        (status = 404, description = "Documento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_document(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Path(document_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let document = app_state.repo.get_document(&tenant, document_id).await?;
    Ok((StatusCode::OK, Json(document)))
}

// POST /api/docs/{id}/summary
#[utoipa::path(
    post,
    path = "/api/docs/{id}/summary",
    tag = "Docs",
    params(
        ("id" = Uuid, Path, description = "ID do documento"),
        ("x-tenant-id" = String, Header, description = "ID do tenant")
    ),
    responses(
        (status = 200, description = "Documento com o resumo gravado", body = Document),
        (status = 404, description = "Documento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn summarize_document(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Path(document_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let document = app_state.docs_service.summarize(&tenant, document_id).await?;
    Ok((StatusCode::OK, Json(document)))
}
