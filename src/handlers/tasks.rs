// src/handlers/tasks.rs

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
    db::TaskRepository,
    middleware::{auth::SessionUser, tenancy::TenantContext},
    models::{
        content::Author,
        tasks::{CreateTaskPayload, NewTask, Task, TaskPatch, TaskQuery},
    },
};

// GET /api/tasks
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "Tasks",
    params(
        TaskQuery,
        ("x-tenant-id" = String, Header, description = "ID do tenant")
    ),
    responses((status = 200, description = "Tarefas filtradas", body = Vec<Task>)),
    security(("api_jwt" = []))
)]
pub async fn list_tasks(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Query(query): Query<TaskQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tasks = app_state.repo.list_tasks(&tenant, &query).await?;
    Ok((StatusCode::OK, Json(tasks)))
}

// POST /api/tasks
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "Tasks",
    request_body = CreateTaskPayload,
    params(("x-tenant-id" = String, Header, description = "ID do tenant")),
    responses(
        (status = 201, description = "Tarefa criada", body = Task),
        (status = 400, description = "Dados inválidos ou responsável desconhecido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_task(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    SessionUser(user): SessionUser,
    Json(payload): Json<CreateTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let task = NewTask {
        created_by: Author::from(&user),
        project_id: payload.project_id,
        title: payload.title,
        description: payload.description,
        status: payload.status,
        priority: payload.priority,
        assignee_id: payload.assignee_id,
        due_date: payload.due_date,
        tags: payload.tags,
    };

    let created = app_state.repo.create_task(&tenant, task).await?;
    tracing::info!("✅ Tarefa {} criada no tenant {}", created.id, tenant.id);
    Ok((StatusCode::CREATED, Json(created)))
}

// PATCH /api/tasks/{id}
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    request_body = TaskPatch,
    params(
        ("id" = Uuid, Path, description = "ID da tarefa"),
        ("x-tenant-id" = String, Header, description = "ID do tenant")
    ),
    responses(
        (status = 200, description = "Tarefa atualizada", body = Task),
        (status = 404, description = "Tarefa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_task(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Path(task_id): Path<Uuid>,
    Json(patch): Json<TaskPatch>,
) -> Result<impl IntoResponse, AppError> {
    patch.validate()?;

    let task = app_state.repo.update_task(&tenant, task_id, patch).await?;
    Ok((StatusCode::OK, Json(task)))
}
