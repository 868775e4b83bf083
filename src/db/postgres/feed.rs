// src/db/postgres/feed.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, Postgres, Transaction};
use uuid::Uuid;

use super::{author, SqlRepository};
use crate::{
    common::{error::AppError, pagination::clamp_limit},
    db::{FeedRepository, RepoResult},
    models::{
        content::{Attachment, Reaction},
        feed::{FeedPage, FeedQuery, NewPost, Post, PostType},
        tenancy::Tenant,
    },
};

// Anexos e reações vêm agregados em JSON para sair numa única consulta
const POST_COLUMNS: &str = r#"
    p.id, p.author_id, p.author_name, p.author_avatar_url,
    p.content, p.post_type, p.ai_tags, p.comment_count,
    p.created_at, p.updated_at,
    COALESCE((
        SELECT jsonb_agg(jsonb_build_object(
            'id', a.id, 'name', a.name, 'url', a.url,
            'mime_type', a.mime_type, 'size_bytes', a.size_bytes
        ) ORDER BY a.created_at)
        FROM post_attachments a
        WHERE a.post_id = p.id
    ), '[]'::jsonb) AS attachments,
    COALESCE((
        SELECT jsonb_agg(jsonb_build_object(
            'emoji', r.emoji, 'count', r.count, 'user_ids', r.user_ids
        ) ORDER BY r.first_at)
        FROM (
            SELECT emoji, COUNT(*) AS count,
                   array_agg(user_id ORDER BY created_at) AS user_ids,
                   MIN(created_at) AS first_at
            FROM post_reactions
            WHERE post_id = p.id
            GROUP BY emoji
        ) r
    ), '[]'::jsonb) AS reactions
"#;

const POST_FILTERS: &str = r#"
    p.tenant_id = $1
    AND ($2::post_type IS NULL OR p.post_type = $2)
    AND ($3::text IS NULL OR $3 = ANY(p.ai_tags))
"#;

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    author_id: Uuid,
    author_name: String,
    author_avatar_url: Option<String>,
    content: String,
    post_type: PostType,
    ai_tags: Vec<String>,
    comment_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    attachments: Json<Vec<Attachment>>,
    reactions: Json<Vec<Reaction>>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            author: author(row.author_id, row.author_name, row.author_avatar_url),
            content: row.content,
            post_type: row.post_type,
            ai_tags: row.ai_tags,
            attachments: row.attachments.0,
            reactions: row.reactions.0,
            comment_count: row.comment_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

async fn fetch_post(
    tx: &mut Transaction<'static, Postgres>,
    tenant: &Tenant,
    post_id: Uuid,
) -> Result<Post, AppError> {
    let sql = format!("SELECT {POST_COLUMNS} FROM posts p WHERE p.tenant_id = $1 AND p.id = $2");
    let row: Option<PostRow> = sqlx::query_as(&sql)
        .bind(&tenant.id)
        .bind(post_id)
        .fetch_optional(&mut **tx)
        .await?;

    row.map(Post::from)
        .ok_or_else(|| AppError::NotFound(format!("post {post_id}")))
}

#[async_trait]
impl FeedRepository for SqlRepository {
    async fn list_posts(&self, tenant: &Tenant, query: &FeedQuery) -> RepoResult<FeedPage> {
        let limit = clamp_limit(query.limit) as i64;
        let mut tx = self.begin_scoped(tenant).await?;

        let count_sql = format!("SELECT COUNT(*) FROM posts p WHERE {POST_FILTERS}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(&tenant.id)
            .bind(query.post_type)
            .bind(query.tag.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        // limit + 1 para saber se há mais uma página
        let page_sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            WHERE {POST_FILTERS}
              AND ($4::timestamptz IS NULL OR p.created_at < $4)
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $5
            "#
        );
        let mut rows: Vec<PostRow> = sqlx::query_as(&page_sql)
            .bind(&tenant.id)
            .bind(query.post_type)
            .bind(query.tag.as_deref())
            .bind(query.before)
            .bind(limit + 1)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        let has_more = rows.len() as i64 > limit;
        rows.truncate(limit as usize);

        Ok(FeedPage {
            posts: rows.into_iter().map(Post::from).collect(),
            total: total as u64,
            has_more,
        })
    }

    async fn get_post(&self, tenant: &Tenant, post_id: Uuid) -> RepoResult<Post> {
        let mut tx = self.begin_scoped(tenant).await?;
        let post = fetch_post(&mut tx, tenant, post_id).await?;
        tx.commit().await?;
        Ok(post)
    }

    async fn create_post(&self, tenant: &Tenant, post: NewPost) -> RepoResult<Post> {
        let mut tx = self.begin_scoped(tenant).await?;
        let post_id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO posts (
                id, tenant_id, author_id, author_name, author_avatar_url,
                content, post_type, ai_tags
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(post_id)
        .bind(&tenant.id)
        .bind(post.author.id)
        .bind(&post.author.name)
        .bind(post.author.avatar_url.as_deref())
        .bind(&post.content)
        .bind(post.post_type)
        .bind(&post.ai_tags)
        .execute(&mut *tx)
        .await?;

        for attachment in &post.attachments {
            sqlx::query(
                r#"
                INSERT INTO post_attachments (id, tenant_id, post_id, name, url, mime_type, size_bytes)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(attachment.id)
            .bind(&tenant.id)
            .bind(post_id)
            .bind(&attachment.name)
            .bind(&attachment.url)
            .bind(attachment.mime_type.as_deref())
            .bind(attachment.size_bytes)
            .execute(&mut *tx)
            .await?;
        }

        let created = fetch_post(&mut tx, tenant, post_id).await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn toggle_post_reaction(
        &self,
        tenant: &Tenant,
        post_id: Uuid,
        user_id: Uuid,
        emoji: &str,
    ) -> RepoResult<Post> {
        let mut tx = self.begin_scoped(tenant).await?;

        // 404 antes de mexer nas reações
        fetch_post(&mut tx, tenant, post_id).await?;

        let removed = sqlx::query(
            r#"
            DELETE FROM post_reactions
            WHERE tenant_id = $1 AND post_id = $2 AND user_id = $3 AND emoji = $4
            "#,
        )
        .bind(&tenant.id)
        .bind(post_id)
        .bind(user_id)
        .bind(emoji)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if removed == 0 {
            sqlx::query(
                r#"
                INSERT INTO post_reactions (tenant_id, post_id, user_id, emoji)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(&tenant.id)
            .bind(post_id)
            .bind(user_id)
            .bind(emoji)
            .execute(&mut *tx)
            .await?;
        }

        let post = fetch_post(&mut tx, tenant, post_id).await?;
        tx.commit().await?;
        Ok(post)
    }
}
