// src/db/postgres/docs.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{author, SqlRepository};
use crate::{
    common::error::AppError,
    db::{DocsRepository, RepoResult},
    models::{
        docs::{Document, DocsQuery, NewDocument},
        tenancy::Tenant,
    },
};

const DOCUMENT_COLUMNS: &str = r#"
    id, title, content, folder, author_id, author_name, author_avatar_url,
    ai_summary, tags, created_at, updated_at
"#;

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    title: String,
    content: String,
    folder: Option<String>,
    author_id: Uuid,
    author_name: String,
    author_avatar_url: Option<String>,
    ai_summary: Option<String>,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            title: row.title,
            content: row.content,
            folder: row.folder,
            author: author(row.author_id, row.author_name, row.author_avatar_url),
            ai_summary: row.ai_summary,
            tags: row.tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn document_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("document {id}"))
}

#[async_trait]
impl DocsRepository for SqlRepository {
    async fn list_documents(&self, tenant: &Tenant, query: &DocsQuery) -> RepoResult<Vec<Document>> {
        let mut tx = self.begin_scoped(tenant).await?;
        let sql = format!(
            r#"
            SELECT {DOCUMENT_COLUMNS}
            FROM documents
            WHERE tenant_id = $1 AND ($2::text IS NULL OR folder = $2)
            ORDER BY updated_at DESC
            "#
        );
        let rows: Vec<DocumentRow> = sqlx::query_as(&sql)
            .bind(&tenant.id)
            .bind(query.folder.as_deref())
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn get_document(&self, tenant: &Tenant, document_id: Uuid) -> RepoResult<Document> {
        let mut tx = self.begin_scoped(tenant).await?;
        let sql = format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE tenant_id = $1 AND id = $2");
        let row: Option<DocumentRow> = sqlx::query_as(&sql)
            .bind(&tenant.id)
            .bind(document_id)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;

        row.map(Document::from)
            .ok_or_else(|| document_not_found(document_id))
    }

    async fn create_document(&self, tenant: &Tenant, document: NewDocument) -> RepoResult<Document> {
        let mut tx = self.begin_scoped(tenant).await?;
        let sql = format!(
            r#"
            INSERT INTO documents (
                id, tenant_id, title, content, folder,
                author_id, author_name, author_avatar_url, tags
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {DOCUMENT_COLUMNS}
            "#
        );
        let row: DocumentRow = sqlx::query_as(&sql)
            .bind(Uuid::new_v4())
            .bind(&tenant.id)
            .bind(&document.title)
            .bind(&document.content)
            .bind(document.folder.as_deref())
            .bind(document.author.id)
            .bind(&document.author.name)
            .bind(document.author.avatar_url.as_deref())
            .bind(&document.tags)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(row.into())
    }

    async fn set_document_summary(
        &self,
        tenant: &Tenant,
        document_id: Uuid,
        summary: &str,
    ) -> RepoResult<Document> {
        let mut tx = self.begin_scoped(tenant).await?;
        let sql = format!(
            r#"
            UPDATE documents
            SET ai_summary = $3, updated_at = now()
            WHERE tenant_id = $1 AND id = $2
            RETURNING {DOCUMENT_COLUMNS}
            "#
        );
        let row: Option<DocumentRow> = sqlx::query_as(&sql)
            .bind(&tenant.id)
            .bind(document_id)
            .bind(summary)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;

        row.map(Document::from)
            .ok_or_else(|| document_not_found(document_id))
    }
}
