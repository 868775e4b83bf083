// src/db/postgres/forms.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{types::Json, Postgres, Transaction};
use uuid::Uuid;

use super::{author, SqlRepository};
use crate::{
    common::error::AppError,
    db::{FormsRepository, RepoResult},
    models::{
        forms::{Form, FormField, FormResponse, NewForm, NewFormResponse},
        tenancy::Tenant,
    },
};

const FORM_COLUMNS: &str = r#"
    f.id, f.title, f.description, f.is_published, f.created_at,
    f.created_by_id, f.created_by_name, f.created_by_avatar_url,
    (SELECT COUNT(*) FROM form_responses r WHERE r.form_id = f.id) AS response_count,
    COALESCE((
        SELECT jsonb_agg(jsonb_build_object(
            'id', ff.id, 'label', ff.label, 'field_type', ff.field_type,
            'required', ff.required, 'options', ff.options
        ) ORDER BY ff.position)
        FROM form_fields ff
        WHERE ff.form_id = f.id
    ), '[]'::jsonb) AS fields
"#;

#[derive(Debug, sqlx::FromRow)]
struct FormRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    is_published: bool,
    created_at: DateTime<Utc>,
    created_by_id: Uuid,
    created_by_name: String,
    created_by_avatar_url: Option<String>,
    response_count: i64,
    fields: Json<Vec<FormField>>,
}

impl From<FormRow> for Form {
    fn from(row: FormRow) -> Self {
        Form {
            id: row.id,
            title: row.title,
            description: row.description,
            fields: row.fields.0,
            response_count: row.response_count,
            is_published: row.is_published,
            created_by: author(row.created_by_id, row.created_by_name, row.created_by_avatar_url),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ResponseRow {
    id: Uuid,
    form_id: Uuid,
    respondent_id: Uuid,
    respondent_name: String,
    respondent_avatar_url: Option<String>,
    answers: Value,
    submitted_at: DateTime<Utc>,
}

impl From<ResponseRow> for FormResponse {
    fn from(row: ResponseRow) -> Self {
        FormResponse {
            id: row.id,
            form_id: row.form_id,
            respondent: author(row.respondent_id, row.respondent_name, row.respondent_avatar_url),
            answers: row.answers,
            submitted_at: row.submitted_at,
        }
    }
}

async fn fetch_form(
    tx: &mut Transaction<'static, Postgres>,
    tenant: &Tenant,
    form_id: Uuid,
) -> Result<Form, AppError> {
    let sql = format!("SELECT {FORM_COLUMNS} FROM forms f WHERE f.tenant_id = $1 AND f.id = $2");
    let row: Option<FormRow> = sqlx::query_as(&sql)
        .bind(&tenant.id)
        .bind(form_id)
        .fetch_optional(&mut **tx)
        .await?;

    row.map(Form::from)
        .ok_or_else(|| AppError::NotFound(format!("form {form_id}")))
}

#[async_trait]
impl FormsRepository for SqlRepository {
    async fn list_forms(&self, tenant: &Tenant) -> RepoResult<Vec<Form>> {
        let mut tx = self.begin_scoped(tenant).await?;
        let sql = format!(
            "SELECT {FORM_COLUMNS} FROM forms f WHERE f.tenant_id = $1 ORDER BY f.created_at DESC"
        );
        let rows: Vec<FormRow> = sqlx::query_as(&sql)
            .bind(&tenant.id)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(rows.into_iter().map(Form::from).collect())
    }

    async fn get_form(&self, tenant: &Tenant, form_id: Uuid) -> RepoResult<Form> {
        let mut tx = self.begin_scoped(tenant).await?;
        let form = fetch_form(&mut tx, tenant, form_id).await?;
        tx.commit().await?;
        Ok(form)
    }

    async fn create_form(&self, tenant: &Tenant, form: NewForm) -> RepoResult<Form> {
        let mut tx = self.begin_scoped(tenant).await?;
        let form_id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO forms (
                id, tenant_id, title, description, is_published,
                created_by_id, created_by_name, created_by_avatar_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(form_id)
        .bind(&tenant.id)
        .bind(&form.title)
        .bind(form.description.as_deref())
        .bind(form.is_published)
        .bind(form.created_by.id)
        .bind(&form.created_by.name)
        .bind(form.created_by.avatar_url.as_deref())
        .execute(&mut *tx)
        .await?;

        for (position, field) in form.fields.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO form_fields (
                    id, tenant_id, form_id, position, label, field_type, required, options
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(field.id)
            .bind(&tenant.id)
            .bind(form_id)
            .bind(position as i32)
            .bind(&field.label)
            .bind(field.field_type)
            .bind(field.required)
            .bind(&field.options)
            .execute(&mut *tx)
            .await?;
        }

        let created = fetch_form(&mut tx, tenant, form_id).await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn list_form_responses(&self, tenant: &Tenant, form_id: Uuid) -> RepoResult<Vec<FormResponse>> {
        let mut tx = self.begin_scoped(tenant).await?;
        fetch_form(&mut tx, tenant, form_id).await?;

        let rows: Vec<ResponseRow> = sqlx::query_as(
            r#"
            SELECT id, form_id, respondent_id, respondent_name, respondent_avatar_url,
                   answers, submitted_at
            FROM form_responses
            WHERE tenant_id = $1 AND form_id = $2
            ORDER BY submitted_at DESC
            "#,
        )
        .bind(&tenant.id)
        .bind(form_id)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(rows.into_iter().map(FormResponse::from).collect())
    }

    async fn submit_form_response(
        &self,
        tenant: &Tenant,
        form_id: Uuid,
        response: NewFormResponse,
    ) -> RepoResult<FormResponse> {
        let mut tx = self.begin_scoped(tenant).await?;
        fetch_form(&mut tx, tenant, form_id).await?;

        let row: ResponseRow = sqlx::query_as(
            r#"
            INSERT INTO form_responses (
                id, tenant_id, form_id, respondent_id, respondent_name, respondent_avatar_url, answers
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, form_id, respondent_id, respondent_name, respondent_avatar_url,
                      answers, submitted_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&tenant.id)
        .bind(form_id)
        .bind(response.respondent.id)
        .bind(&response.respondent.name)
        .bind(response.respondent.avatar_url.as_deref())
        .bind(&response.answers)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(row.into())
    }
}
