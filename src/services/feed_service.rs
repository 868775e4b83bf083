// src/services/feed_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{FeedRepository, Repository},
    models::{
        content::Author,
        feed::{CreatePostPayload, FeedPage, FeedQuery, NewPost, Post},
        tenancy::Tenant,
        users::User,
    },
    services::ai_service::AiService,
};

#[derive(Clone)]
pub struct FeedService {
    repo: Arc<dyn Repository>,
    ai: AiService,
}

impl FeedService {
    pub fn new(repo: Arc<dyn Repository>, ai: AiService) -> Self {
        Self { repo, ai }
    }

    pub async fn list_posts(&self, tenant: &Tenant, query: &FeedQuery) -> Result<FeedPage, AppError> {
        self.repo.list_posts(tenant, query).await
    }

    /// Cria o post já com as tags sugeridas pela IA. Se a IA falhar o post
    /// é criado sem tags.
    pub async fn create_post(
        &self,
        tenant: &Tenant,
        user: &User,
        payload: CreatePostPayload,
    ) -> Result<Post, AppError> {
        let ai_tags = self.ai.suggest_tags(&payload.content).await;

        let post = NewPost {
            author: Author::from(user),
            content: payload.content,
            post_type: payload.post_type,
            ai_tags,
            attachments: payload
                .attachments
                .into_iter()
                .map(|a| a.into_attachment())
                .collect(),
        };

        let created = self.repo.create_post(tenant, post).await?;
        tracing::info!(
            "📝 Post {} criado no tenant {} ({} tags)",
            created.id,
            tenant.id,
            created.ai_tags.len()
        );
        Ok(created)
    }

    pub async fn toggle_reaction(
        &self,
        tenant: &Tenant,
        user: &User,
        post_id: Uuid,
        emoji: &str,
    ) -> Result<Post, AppError> {
        self.repo
            .toggle_post_reaction(tenant, post_id, user.id, emoji)
            .await
    }
}
