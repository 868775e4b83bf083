// src/db/postgres/directory.rs
//
// Diretório de pessoas, painel de analytics e chamados de suporte.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{author, SqlRepository};
use crate::{
    db::{AnalyticsRepository, RepoResult, SupportRepository, UserRepository},
    models::{
        analytics::AnalyticsOverview,
        support::{NewTicket, SupportTicket, TicketPriority, TicketQuery, TicketStatus},
        tenancy::Tenant,
        users::DirectoryUser,
    },
};

const USER_COLUMNS: &str = "id, name, email, avatar_url, title, department, status";

#[async_trait]
impl UserRepository for SqlRepository {
    async fn list_users(&self, tenant: &Tenant) -> RepoResult<Vec<DirectoryUser>> {
        let mut tx = self.begin_scoped(tenant).await?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE tenant_id = $1 ORDER BY name ASC");
        let users: Vec<DirectoryUser> = sqlx::query_as(&sql)
            .bind(&tenant.id)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(users)
    }

    async fn find_user(&self, tenant: &Tenant, user_id: Uuid) -> RepoResult<Option<DirectoryUser>> {
        let mut tx = self.begin_scoped(tenant).await?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE tenant_id = $1 AND id = $2");
        let user: Option<DirectoryUser> = sqlx::query_as(&sql)
            .bind(&tenant.id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(user)
    }
}

#[async_trait]
impl AnalyticsRepository for SqlRepository {
    async fn overview(&self, tenant: &Tenant) -> RepoResult<AnalyticsOverview> {
        let mut tx = self.begin_scoped(tenant).await?;
        let overview: AnalyticsOverview = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users
                    WHERE tenant_id = $1 AND status <> 'offline') AS active_users,
                (SELECT COUNT(*) FROM posts
                    WHERE tenant_id = $1 AND created_at >= now() - interval '7 days') AS posts_this_week,
                (SELECT COUNT(*) FROM messages
                    WHERE tenant_id = $1 AND created_at >= now() - interval '7 days') AS messages_this_week,
                (SELECT COUNT(*) FROM tasks
                    WHERE tenant_id = $1 AND status <> 'done') AS open_tasks,
                (SELECT COUNT(*) FROM tasks
                    WHERE tenant_id = $1 AND status = 'done') AS completed_tasks,
                (SELECT COUNT(*) FROM meetings
                    WHERE tenant_id = $1 AND start_time >= now()) AS upcoming_meetings,
                (SELECT COUNT(*) FROM support_tickets
                    WHERE tenant_id = $1 AND status IN ('open', 'in_progress')) AS open_tickets
            "#,
        )
        .bind(&tenant.id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(overview)
    }
}

const TICKET_COLUMNS: &str = r#"
    id, subject, description, status, priority,
    requester_id, requester_name, requester_avatar_url,
    created_at, updated_at
"#;

#[derive(Debug, sqlx::FromRow)]
struct TicketRow {
    id: Uuid,
    subject: String,
    description: String,
    status: TicketStatus,
    priority: TicketPriority,
    requester_id: Uuid,
    requester_name: String,
    requester_avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TicketRow> for SupportTicket {
    fn from(row: TicketRow) -> Self {
        SupportTicket {
            id: row.id,
            subject: row.subject,
            description: row.description,
            status: row.status,
            priority: row.priority,
            requester: author(row.requester_id, row.requester_name, row.requester_avatar_url),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SupportRepository for SqlRepository {
    async fn list_tickets(&self, tenant: &Tenant, query: &TicketQuery) -> RepoResult<Vec<SupportTicket>> {
        let mut tx = self.begin_scoped(tenant).await?;
        let sql = format!(
            r#"
            SELECT {TICKET_COLUMNS}
            FROM support_tickets
            WHERE tenant_id = $1 AND ($2::ticket_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#
        );
        let rows: Vec<TicketRow> = sqlx::query_as(&sql)
            .bind(&tenant.id)
            .bind(query.status)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(rows.into_iter().map(SupportTicket::from).collect())
    }

    async fn create_ticket(&self, tenant: &Tenant, ticket: NewTicket) -> RepoResult<SupportTicket> {
        let mut tx = self.begin_scoped(tenant).await?;
        let sql = format!(
            r#"
            INSERT INTO support_tickets (
                id, tenant_id, subject, description, priority,
                requester_id, requester_name, requester_avatar_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {TICKET_COLUMNS}
            "#
        );
        let row: TicketRow = sqlx::query_as(&sql)
            .bind(Uuid::new_v4())
            .bind(&tenant.id)
            .bind(&ticket.subject)
            .bind(&ticket.description)
            .bind(ticket.priority)
            .bind(ticket.requester.id)
            .bind(&ticket.requester.name)
            .bind(ticket.requester.avatar_url.as_deref())
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(row.into())
    }
}
