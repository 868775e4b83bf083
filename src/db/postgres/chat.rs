// src/db/postgres/chat.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, Postgres, Transaction};
use uuid::Uuid;

use super::{author, resolve_authors, SqlRepository};
use crate::{
    common::{error::AppError, pagination::clamp_limit},
    db::{ChatRepository, RepoResult},
    models::{
        chat::{Channel, Message, MessagePage, MessageQuery, NewChannel, NewMessage},
        content::{Attachment, Reaction},
        tenancy::Tenant,
    },
};

// $1 = tenant, $2 = quem está vendo
const CHANNEL_COLUMNS: &str = r#"
    c.id, c.name, c.description, c.is_private, c.created_at,
    (SELECT COUNT(*) FROM channel_members cm WHERE cm.channel_id = c.id) AS member_count,
    (SELECT MAX(m.created_at) FROM messages m WHERE m.channel_id = c.id) AS last_message_at,
    (
        SELECT COUNT(*)
        FROM messages m
        JOIN channel_members me ON me.channel_id = m.channel_id AND me.user_id = $2
        WHERE m.channel_id = c.id
          AND m.sender_id <> $2
          AND (me.last_read_at IS NULL OR m.created_at > me.last_read_at)
    ) AS unread_count
"#;

const CHANNEL_VISIBLE: &str = r#"
    c.tenant_id = $1
    AND (
        NOT c.is_private
        OR EXISTS (
            SELECT 1 FROM channel_members cm
            WHERE cm.channel_id = c.id AND cm.user_id = $2
        )
    )
"#;

const MESSAGE_COLUMNS: &str = r#"
    m.id, m.channel_id, m.sender_id, m.sender_name, m.sender_avatar_url,
    m.content, m.created_at, m.edited_at,
    COALESCE((
        SELECT jsonb_agg(jsonb_build_object(
            'id', a.id, 'name', a.name, 'url', a.url,
            'mime_type', a.mime_type, 'size_bytes', a.size_bytes
        ) ORDER BY a.created_at)
        FROM message_attachments a
        WHERE a.message_id = m.id
    ), '[]'::jsonb) AS attachments,
    COALESCE((
        SELECT jsonb_agg(jsonb_build_object(
            'emoji', r.emoji, 'count', r.count, 'user_ids', r.user_ids
        ) ORDER BY r.first_at)
        FROM (
            SELECT emoji, COUNT(*) AS count,
                   array_agg(user_id ORDER BY created_at) AS user_ids,
                   MIN(created_at) AS first_at
            FROM message_reactions
            WHERE message_id = m.id
            GROUP BY emoji
        ) r
    ), '[]'::jsonb) AS reactions
"#;

#[derive(Debug, sqlx::FromRow)]
struct ChannelRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    is_private: bool,
    created_at: DateTime<Utc>,
    member_count: i64,
    last_message_at: Option<DateTime<Utc>>,
    unread_count: i64,
}

impl From<ChannelRow> for Channel {
    fn from(row: ChannelRow) -> Self {
        Channel {
            id: row.id,
            name: row.name,
            description: row.description,
            is_private: row.is_private,
            member_count: row.member_count,
            unread_count: row.unread_count,
            last_message_at: row.last_message_at,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    channel_id: Uuid,
    sender_id: Uuid,
    sender_name: String,
    sender_avatar_url: Option<String>,
    content: String,
    created_at: DateTime<Utc>,
    edited_at: Option<DateTime<Utc>>,
    attachments: Json<Vec<Attachment>>,
    reactions: Json<Vec<Reaction>>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Message {
            id: row.id,
            channel_id: row.channel_id,
            sender: author(row.sender_id, row.sender_name, row.sender_avatar_url),
            content: row.content,
            attachments: row.attachments.0,
            reactions: row.reactions.0,
            created_at: row.created_at,
            edited_at: row.edited_at,
        }
    }
}

/// Canal como `viewer` o enxerga. Privado sem acesso responde como inexistente.
async fn fetch_channel(
    tx: &mut Transaction<'static, Postgres>,
    tenant: &Tenant,
    channel_id: Uuid,
    viewer: Uuid,
) -> Result<Channel, AppError> {
    let sql = format!(
        "SELECT {CHANNEL_COLUMNS} FROM channels c WHERE {CHANNEL_VISIBLE} AND c.id = $3"
    );
    let row: Option<ChannelRow> = sqlx::query_as(&sql)
        .bind(&tenant.id)
        .bind(viewer)
        .bind(channel_id)
        .fetch_optional(&mut **tx)
        .await?;

    row.map(Channel::from)
        .ok_or_else(|| AppError::NotFound(format!("channel {channel_id}")))
}

#[async_trait]
impl ChatRepository for SqlRepository {
    async fn list_channels(&self, tenant: &Tenant, viewer: Uuid) -> RepoResult<Vec<Channel>> {
        let mut tx = self.begin_scoped(tenant).await?;
        let sql = format!(
            "SELECT {CHANNEL_COLUMNS} FROM channels c WHERE {CHANNEL_VISIBLE} ORDER BY c.name ASC"
        );
        let rows: Vec<ChannelRow> = sqlx::query_as(&sql)
            .bind(&tenant.id)
            .bind(viewer)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(rows.into_iter().map(Channel::from).collect())
    }

    async fn create_channel(&self, tenant: &Tenant, channel: NewChannel) -> RepoResult<Channel> {
        let creator = channel.created_by.id;
        let mut tx = self.begin_scoped(tenant).await?;

        // O criador pode ser o usuário de sessão, fora do diretório
        let others: Vec<Uuid> = channel
            .member_ids
            .iter()
            .copied()
            .filter(|id| *id != creator)
            .collect();
        resolve_authors(&mut tx, tenant, &others).await?;

        let channel_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO channels (id, tenant_id, name, description, is_private, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(channel_id)
        .bind(&tenant.id)
        .bind(&channel.name)
        .bind(channel.description.as_deref())
        .bind(channel.is_private)
        .bind(creator)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO channel_members (channel_id, tenant_id, user_id, last_read_at)
            SELECT $1, $2, member_id, CASE WHEN member_id = $4 THEN now() END
            FROM UNNEST($3::uuid[]) AS member_id
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(channel_id)
        .bind(&tenant.id)
        .bind(&channel.member_ids)
        .bind(creator)
        .execute(&mut *tx)
        .await?;

        let created = fetch_channel(&mut tx, tenant, channel_id, creator).await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn list_messages(
        &self,
        tenant: &Tenant,
        channel_id: Uuid,
        viewer: Uuid,
        query: &MessageQuery,
    ) -> RepoResult<MessagePage> {
        let limit = clamp_limit(query.limit) as i64;
        let mut tx = self.begin_scoped(tenant).await?;
        fetch_channel(&mut tx, tenant, channel_id, viewer).await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages WHERE tenant_id = $1 AND channel_id = $2",
        )
        .bind(&tenant.id)
        .bind(channel_id)
        .fetch_one(&mut *tx)
        .await?;

        let sql = format!(
            r#"
            SELECT {MESSAGE_COLUMNS}
            FROM messages m
            WHERE m.tenant_id = $1
              AND m.channel_id = $2
              AND ($3::timestamptz IS NULL OR m.created_at < $3)
            ORDER BY m.created_at DESC, m.id DESC
            LIMIT $4
            "#
        );
        let mut rows: Vec<MessageRow> = sqlx::query_as(&sql)
            .bind(&tenant.id)
            .bind(channel_id)
            .bind(query.before)
            .bind(limit + 1)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        let has_more = rows.len() as i64 > limit;
        rows.truncate(limit as usize);
        // A página vai para a tela em ordem cronológica
        rows.reverse();

        Ok(MessagePage {
            messages: rows.into_iter().map(Message::from).collect(),
            total: total as u64,
            has_more,
        })
    }

    async fn send_message(
        &self,
        tenant: &Tenant,
        channel_id: Uuid,
        message: NewMessage,
    ) -> RepoResult<Message> {
        let sender = message.sender.id;
        let mut tx = self.begin_scoped(tenant).await?;
        fetch_channel(&mut tx, tenant, channel_id, sender).await?;

        let message_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO messages (
                id, tenant_id, channel_id, sender_id, sender_name, sender_avatar_url, content
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(message_id)
        .bind(&tenant.id)
        .bind(channel_id)
        .bind(sender)
        .bind(&message.sender.name)
        .bind(message.sender.avatar_url.as_deref())
        .bind(&message.content)
        .execute(&mut *tx)
        .await?;

        for attachment in &message.attachments {
            sqlx::query(
                r#"
                INSERT INTO message_attachments (id, tenant_id, message_id, name, url, mime_type, size_bytes)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(attachment.id)
            .bind(&tenant.id)
            .bind(message_id)
            .bind(&attachment.name)
            .bind(&attachment.url)
            .bind(attachment.mime_type.as_deref())
            .bind(attachment.size_bytes)
            .execute(&mut *tx)
            .await?;
        }

        // Quem escreve já leu o canal até aqui
        sqlx::query(
            r#"
            UPDATE channel_members SET last_read_at = now()
            WHERE tenant_id = $1 AND channel_id = $2 AND user_id = $3
            "#,
        )
        .bind(&tenant.id)
        .bind(channel_id)
        .bind(sender)
        .execute(&mut *tx)
        .await?;

        let sql = format!("SELECT {MESSAGE_COLUMNS} FROM messages m WHERE m.id = $1");
        let row: MessageRow = sqlx::query_as(&sql)
            .bind(message_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(row.into())
    }
}
