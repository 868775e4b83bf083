// src/handlers/meetings.rs

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
    db::MeetingRepository,
    middleware::{auth::SessionUser, tenancy::TenantContext},
    models::{
        content::Author,
        meetings::{CreateMeetingPayload, Meeting, MeetingQuery, NewMeeting},
    },
};

// GET /api/meetings
#[utoipa::path(
    get,
    path = "/api/meetings",
    tag = "Meetings",
    params(
        MeetingQuery,
        ("x-tenant-id" = String, Header, description = "ID do tenant")
    ),
    responses((status = 200, description = "Reuniões na janela, por horário de início", body = Vec<Meeting>)),
    security(("api_jwt" = []))
)]
pub async fn list_meetings(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Query(query): Query<MeetingQuery>,
) -> Result<impl IntoResponse, AppError> {
    let meetings = app_state.repo.list_meetings(&tenant, &query).await?;
    Ok((StatusCode::OK, Json(meetings)))
}

// POST /api/meetings
#[utoipa::path(
    post,
    path = "/api/meetings",
    tag = "Meetings",
    request_body = CreateMeetingPayload,
    params(("x-tenant-id" = String, Header, description = "ID do tenant")),
    responses(
        (status = 201, description = "Reunião agendada", body = Meeting),
        (status = 400, description = "Horário inválido ou participante desconhecido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_meeting(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    SessionUser(user): SessionUser,
    Json(payload): Json<CreateMeetingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    if payload.end_time <= payload.start_time {
        return Err(AppError::BadRequest("end_time deve ser posterior a start_time".into()));
    }

    // Cada participante entra uma vez, na ordem da primeira menção
    let mut attendee_ids = Vec::with_capacity(payload.attendee_ids.len());
    for id in payload.attendee_ids {
        if !attendee_ids.contains(&id) {
            attendee_ids.push(id);
        }
    }

    let meeting = NewMeeting {
        organizer: Author::from(&user),
        title: payload.title,
        description: payload.description,
        start_time: payload.start_time,
        end_time: payload.end_time,
        location: payload.location,
        meeting_url: payload.meeting_url,
        attendee_ids,
    };

    let created = app_state.repo.create_meeting(&tenant, meeting).await?;
    tracing::info!("📅 Reunião '{}' agendada no tenant {}", created.title, tenant.id);
    Ok((StatusCode::CREATED, Json(created)))
}
