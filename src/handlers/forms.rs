// src/handlers/forms.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    db::FormsRepository,
    middleware::{auth::SessionUser, tenancy::TenantContext},
    models::{
        content::Author,
        forms::{
            CreateFormPayload, Form, FormField, FormResponse, NewForm, NewFormResponse,
            SubmitResponsePayload,
        },
    },
};

// GET /api/forms
#[utoipa::path(
    get,
    path = "/api/forms",
    tag = "Forms",
    params(("x-tenant-id" = String, Header, description = "ID do tenant")),
    responses((status = 200, description = "Formulários do tenant", body = Vec<Form>)),
    security(("api_jwt" = []))
)]
pub async fn list_forms(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let forms = app_state.repo.list_forms(&tenant).await?;
    Ok((StatusCode::OK, Json(forms)))
}

// POST /api/forms
#[utoipa::path(
    post,
    path = "/api/forms",
    tag = "Forms",
    request_body = CreateFormPayload,
    params(("x-tenant-id" = String, Header, description = "ID do tenant")),
    responses(
        (status = 201, description = "Formulário criado", body = Form),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_form(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    SessionUser(user): SessionUser,
    Json(payload): Json<CreateFormPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // Campos de escolha precisam de opções; os demais não guardam nenhuma
    let mut fields = Vec::with_capacity(payload.fields.len());
    for field in payload.fields {
        let options: Vec<String> = field
            .options
            .into_iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        if field.field_type.has_options() && options.is_empty() {
            return Err(AppError::BadRequest(format!(
                "campo '{}' precisa de pelo menos uma opção",
                field.label
            )));
        }
        fields.push(FormField {
            id: Uuid::new_v4(),
            label: field.label,
            field_type: field.field_type,
            required: field.required,
            options: if field.field_type.has_options() { options } else { vec![] },
        });
    }

    let form = NewForm {
        created_by: Author::from(&user),
        title: payload.title,
        description: payload.description,
        fields,
        is_published: payload.is_published,
    };

    let created = app_state.repo.create_form(&tenant, form).await?;
    tracing::info!("📋 Formulário '{}' criado no tenant {}", created.title, tenant.id);
    Ok((StatusCode::CREATED, Json(created)))
}

// GET /api/forms/{id}
#[utoipa::path(
    get,
    path = "/api/forms/{id}",
    tag = "Forms",
    params(
        ("id" = Uuid, Path, description = "ID do formulário"),
        ("x-tenant-id" = String, Header, description = "ID do tenant")
    ),
    responses(
        (status = 200, description = "Formulário", body = Form),
        (status = 404, description = "Formulário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_form(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Path(form_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let form = app_state.repo.get_form(&tenant, form_id).await?;
    Ok((StatusCode::OK, Json(form)))
}

// GET /api/forms/{id}/responses
#[utoipa::path(
    get,
    path = "/api/forms/{id}/responses",
    tag = "Forms",
    params(
        ("id" = Uuid, Path, description = "ID do formulário"),
        ("x-tenant-id" = String, Header, description = "ID do tenant")
    ),
    responses(
        (status = 200, description = "Respostas, da mais recente para a mais antiga", body = Vec<FormResponse>),
        (status = 404, description = "Formulário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_responses(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Path(form_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let responses = app_state.repo.list_form_responses(&tenant, form_id).await?;
    Ok((StatusCode::OK, Json(responses)))
}

// POST /api/forms/{id}/responses
#[utoipa::path(
    post,
    path = "/api/forms/{id}/responses",
    tag = "Forms",
    request_body = SubmitResponsePayload,
    params(
        ("id" = Uuid, Path, description = "ID do formulário"),
        ("x-tenant-id" = String, Header, description = "ID do tenant")
    ),
    responses(
        (status = 201, description = "Resposta registrada", body = FormResponse),
        (status = 400, description = "Campos obrigatórios sem resposta, opção inexistente ou formulário fechado"),
        (status = 404, description = "Formulário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn submit_response(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
    SessionUser(user): SessionUser,
    Path(form_id): Path<Uuid>,
    Json(payload): Json<SubmitResponsePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let form = app_state.repo.get_form(&tenant, form_id).await?;
    if !form.is_published {
        return Err(AppError::BadRequest(format!("formulário {form_id} não está publicado")));
    }

    let missing = form.missing_required(&payload.answers);
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "respostas obrigatórias ausentes: {}",
            joined(&missing)
        )));
    }

    let invalid = form.invalid_choices(&payload.answers);
    if !invalid.is_empty() {
        return Err(AppError::BadRequest(format!(
            "resposta fora das opções do campo: {}",
            joined(&invalid)
        )));
    }

    let response = NewFormResponse {
        respondent: Author::from(&user),
        answers: Value::Object(payload.answers),
    };
    let created = app_state
        .repo
        .submit_form_response(&tenant, form_id, response)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

fn joined(ids: &[Uuid]) -> String {
    ids.iter().map(Uuid::to_string).collect::<Vec<_>>().join(", ")
}
