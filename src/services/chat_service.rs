// src/services/chat_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ChatRepository, Repository},
    models::{
        chat::{
            Channel, CreateChannelPayload, Message, MessagePage, MessageQuery, NewChannel,
            NewMessage, SendMessagePayload, SmartReplies,
        },
        content::Author,
        tenancy::Tenant,
        users::User,
    },
    services::ai_service::AiService,
};

#[derive(Clone)]
pub struct ChatService {
    repo: Arc<dyn Repository>,
    ai: AiService,
}

impl ChatService {
    pub fn new(repo: Arc<dyn Repository>, ai: AiService) -> Self {
        Self { repo, ai }
    }

    pub async fn list_channels(&self, tenant: &Tenant, user: &User) -> Result<Vec<Channel>, AppError> {
        self.repo.list_channels(tenant, user.id).await
    }

    pub async fn create_channel(
        &self,
        tenant: &Tenant,
        user: &User,
        payload: CreateChannelPayload,
    ) -> Result<Channel, AppError> {
        // Quem cria sempre entra no canal, sem duplicar ids
        let mut member_ids = vec![user.id];
        for id in payload.member_ids {
            if !member_ids.contains(&id) {
                member_ids.push(id);
            }
        }

        let channel = NewChannel {
            created_by: Author::from(user),
            name: payload.name.trim().to_string(),
            description: payload.description,
            is_private: payload.is_private,
            member_ids,
        };

        let created = self.repo.create_channel(tenant, channel).await?;
        tracing::info!("💬 Canal '{}' criado no tenant {}", created.name, tenant.id);
        Ok(created)
    }

    pub async fn list_messages(
        &self,
        tenant: &Tenant,
        user: &User,
        channel_id: Uuid,
        query: &MessageQuery,
    ) -> Result<MessagePage, AppError> {
        self.repo
            .list_messages(tenant, channel_id, user.id, query)
            .await
    }

    pub async fn send_message(
        &self,
        tenant: &Tenant,
        user: &User,
        channel_id: Uuid,
        payload: SendMessagePayload,
    ) -> Result<Message, AppError> {
        let message = NewMessage {
            sender: Author::from(user),
            content: payload.content,
            attachments: payload
                .attachments
                .into_iter()
                .map(|a| a.into_attachment())
                .collect(),
        };
        self.repo.send_message(tenant, channel_id, message).await
    }

    /// Nunca falha: sem IA devolve as respostas padrão.
    pub async fn smart_replies(&self, message: &str) -> SmartReplies {
        SmartReplies {
            replies: self.ai.smart_replies(message).await,
        }
    }
}
