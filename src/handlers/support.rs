// src/handlers/support.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    db::SupportRepository,
    middleware::{auth::SessionUser, tenancy::TenantContext},
    models::{
        content::Author,
        support::{CreateTicketPayload, NewTicket, SupportTicket, TicketQuery},
    },
};

// GET /api/support/tickets
#[utoipa::path(
    get,
    path = "/api/support/tickets",
    tag = "Support",
    params(
        TicketQuery,
        ("x-tenant-id" = String, Header, description = "ID do tenant")
    ),
    responses((status = 200, description = "Chamados do tenant", body = Vec<SupportTicket>)),
    security(("api_jwt" = []))
)]
pub async fn list_tickets(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Query(query): Query<TicketQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tickets = app_state.repo.list_tickets(&tenant, &query).await?;
    Ok((StatusCode::OK, Json(tickets)))
}

// POST /api/support/tickets
#[utoipa::path(
    post,
    path = "/api/support/tickets",
    tag = "Support",
    request_body = CreateTicketPayload,
    params(("x-tenant-id" = String, Header, description = "ID do tenant")),
    responses(
        (status = 201, description = "Chamado aberto", body = SupportTicket),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_ticket(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    SessionUser(user): SessionUser,
    Json(payload): Json<CreateTicketPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let ticket = NewTicket {
        requester: Author::from(&user),
        subject: payload.subject,
        description: payload.description,
        priority: payload.priority,
    };

    let created = app_state.repo.create_ticket(&tenant, ticket).await?;
    tracing::info!("🎫 Chamado {} aberto no tenant {}", created.id, tenant.id);
    Ok((StatusCode::CREATED, Json(created)))
}
