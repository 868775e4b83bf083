// src/services/docs_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DocsRepository, Repository},
    models::{
        content::Author,
        docs::{CreateDocumentPayload, Document, NewDocument},
        tenancy::Tenant,
        users::User,
    },
    services::ai_service::AiService,
};

#[derive(Clone)]
pub struct DocsService {
    repo: Arc<dyn Repository>,
    ai: AiService,
}

impl DocsService {
    pub fn new(repo: Arc<dyn Repository>, ai: AiService) -> Self {
        Self { repo, ai }
    }

    pub async fn create_document(
        &self,
        tenant: &Tenant,
        user: &User,
        payload: CreateDocumentPayload,
    ) -> Result<Document, AppError> {
        let document = NewDocument {
            author: Author::from(user),
            title: payload.title,
            content: payload.content,
            folder: payload.folder.filter(|f| !f.trim().is_empty()),
            tags: payload.tags,
        };
        self.repo.create_document(tenant, document).await
    }

    /// Gera (ou regenera) o resumo e grava no documento. Sem IA o texto
    /// de fallback é gravado.
    pub async fn summarize(&self, tenant: &Tenant, document_id: Uuid) -> Result<Document, AppError> {
        let document = self.repo.get_document(tenant, document_id).await?;
        let source = format!("{}\n\n{}", document.title, document.content);
        let summary = self.ai.summarize(&source).await;

        let updated = self
            .repo
            .set_document_summary(tenant, document_id, &summary)
            .await?;
        tracing::info!("📄 Resumo gerado para o documento {}", document_id);
        Ok(updated)
    }
}
