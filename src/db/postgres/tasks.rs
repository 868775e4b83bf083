// src/db/postgres/tasks.rs

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::{author, resolve_authors, SqlRepository};
use crate::{
    common::error::AppError,
    db::{RepoResult, TaskRepository},
    models::{
        tasks::{NewTask, Task, TaskPatch, TaskPriority, TaskQuery, TaskStatus},
        tenancy::Tenant,
    },
};

const TASK_COLUMNS: &str = r#"
    id, project_id, title, description, status, priority,
    assignee_id, assignee_name, assignee_avatar_url, due_date, tags,
    created_by_id, created_by_name, created_by_avatar_url,
    created_at, updated_at
"#;

#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: Uuid,
    project_id: Option<Uuid>,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    assignee_id: Option<Uuid>,
    assignee_name: Option<String>,
    assignee_avatar_url: Option<String>,
    due_date: Option<NaiveDate>,
    tags: Vec<String>,
    created_by_id: Uuid,
    created_by_name: String,
    created_by_avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        let assignee = match (row.assignee_id, row.assignee_name) {
            (Some(id), Some(name)) => Some(author(id, name, row.assignee_avatar_url)),
            _ => None,
        };
        Task {
            id: row.id,
            project_id: row.project_id,
            title: row.title,
            description: row.description,
            status: row.status,
            priority: row.priority,
            assignee,
            due_date: row.due_date,
            tags: row.tags,
            created_by: author(row.created_by_id, row.created_by_name, row.created_by_avatar_url),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl TaskRepository for SqlRepository {
    async fn list_tasks(&self, tenant: &Tenant, query: &TaskQuery) -> RepoResult<Vec<Task>> {
        let mut tx = self.begin_scoped(tenant).await?;
        let sql = format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE tenant_id = $1
              AND ($2::uuid IS NULL OR project_id = $2)
              AND ($3::task_status IS NULL OR status = $3)
              AND ($4::uuid IS NULL OR assignee_id = $4)
              AND ($5::task_priority IS NULL OR priority = $5)
            ORDER BY created_at DESC
            "#
        );
        let rows: Vec<TaskRow> = sqlx::query_as(&sql)
            .bind(&tenant.id)
            .bind(query.project_id)
            .bind(query.status)
            .bind(query.assignee)
            .bind(query.priority)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn create_task(&self, tenant: &Tenant, task: NewTask) -> RepoResult<Task> {
        let mut tx = self.begin_scoped(tenant).await?;
        let assignee = match task.assignee_id {
            Some(id) => resolve_authors(&mut tx, tenant, &[id]).await?.pop(),
            None => None,
        };

        let sql = format!(
            r#"
            INSERT INTO tasks (
                id, tenant_id, project_id, title, description, status, priority,
                assignee_id, assignee_name, assignee_avatar_url, due_date, tags,
                created_by_id, created_by_name, created_by_avatar_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {TASK_COLUMNS}
            "#
        );
        let row: TaskRow = sqlx::query_as(&sql)
            .bind(Uuid::new_v4())
            .bind(&tenant.id)
            .bind(task.project_id)
            .bind(&task.title)
            .bind(task.description.as_deref())
            .bind(task.status)
            .bind(task.priority)
            .bind(assignee.as_ref().map(|a| a.id))
            .bind(assignee.as_ref().map(|a| a.name.as_str()))
            .bind(assignee.as_ref().and_then(|a| a.avatar_url.as_deref()))
            .bind(task.due_date)
            .bind(&task.tags)
            .bind(task.created_by.id)
            .bind(&task.created_by.name)
            .bind(task.created_by.avatar_url.as_deref())
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(row.into())
    }

    async fn update_task(&self, tenant: &Tenant, task_id: Uuid, patch: TaskPatch) -> RepoResult<Task> {
        let mut tx = self.begin_scoped(tenant).await?;
        let assignee = match patch.assignee_id {
            Some(id) => resolve_authors(&mut tx, tenant, &[id]).await?.pop(),
            None => None,
        };

        // COALESCE: campo ausente no PATCH mantém o valor atual
        let sql = format!(
            r#"
            UPDATE tasks SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                priority = COALESCE($6, priority),
                assignee_id = COALESCE($7, assignee_id),
                assignee_name = CASE WHEN $7 IS NULL THEN assignee_name ELSE $8 END,
                assignee_avatar_url = CASE WHEN $7 IS NULL THEN assignee_avatar_url ELSE $9 END,
                due_date = COALESCE($10, due_date),
                tags = COALESCE($11, tags),
                updated_at = now()
            WHERE tenant_id = $1 AND id = $2
            RETURNING {TASK_COLUMNS}
            "#
        );
        let row: Option<TaskRow> = sqlx::query_as(&sql)
            .bind(&tenant.id)
            .bind(task_id)
            .bind(patch.title.as_deref())
            .bind(patch.description.as_deref())
            .bind(patch.status)
            .bind(patch.priority)
            .bind(assignee.as_ref().map(|a| a.id))
            .bind(assignee.as_ref().map(|a| a.name.as_str()))
            .bind(assignee.as_ref().and_then(|a| a.avatar_url.as_deref()))
            .bind(patch.due_date)
            .bind(patch.tags.as_deref())
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;

        row.map(Task::from)
            .ok_or_else(|| AppError::NotFound(format!("task {task_id}")))
    }
}
