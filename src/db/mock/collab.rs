// src/db/mock/collab.rs
//
// Feed, chat e documentos sobre as fixtures em memória.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{not_found, MockChannel, MockMember, MockRepository};
use crate::{
    common::pagination::paginate,
    db::{ChatRepository, DocsRepository, FeedRepository, RepoResult},
    models::{
        chat::{Channel, Message, MessagePage, MessageQuery, NewChannel, NewMessage},
        content::toggle_reaction,
        docs::{Document, DocsQuery, NewDocument},
        feed::{FeedPage, FeedQuery, NewPost, Post},
        tenancy::Tenant,
    },
};

// =============================================================================
//  FEED
// =============================================================================

#[async_trait]
impl FeedRepository for MockRepository {
    async fn list_posts(&self, tenant: &Tenant, query: &FeedQuery) -> RepoResult<FeedPage> {
        let filtered: Vec<Post> = self
            .read(tenant, |data| {
                data.posts
                    .iter()
                    .filter(|p| query.post_type.is_none_or(|t| p.post_type == t))
                    .filter(|p| {
                        query
                            .tag
                            .as_deref()
                            .is_none_or(|tag| p.ai_tags.iter().any(|t| t == tag))
                    })
                    .cloned()
                    .collect()
            })
            .await;

        let page = paginate(filtered, query.before, query.limit, |p| p.created_at);
        Ok(FeedPage {
            posts: page.items,
            total: page.total as u64,
            has_more: page.has_more,
        })
    }

    async fn get_post(&self, tenant: &Tenant, post_id: Uuid) -> RepoResult<Post> {
        self.read(tenant, |data| data.posts.iter().find(|p| p.id == post_id).cloned())
            .await
            .ok_or_else(|| not_found("post", post_id))
    }

    async fn create_post(&self, tenant: &Tenant, post: NewPost) -> RepoResult<Post> {
        let now = Utc::now();
        let created = Post {
            id: Uuid::new_v4(),
            author: post.author,
            content: post.content,
            post_type: post.post_type,
            ai_tags: post.ai_tags,
            attachments: post.attachments,
            reactions: vec![],
            comment_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.write(tenant, |data| data.posts.insert(0, created.clone()))
            .await;
        Ok(created)
    }

    async fn toggle_post_reaction(
        &self,
        tenant: &Tenant,
        post_id: Uuid,
        user_id: Uuid,
        emoji: &str,
    ) -> RepoResult<Post> {
        self.write(tenant, |data| -> RepoResult<Post> {
            let post = data
                .posts
                .iter_mut()
                .find(|p| p.id == post_id)
                .ok_or_else(|| not_found("post", post_id))?;
            toggle_reaction(&mut post.reactions, user_id, emoji);
            Ok(post.clone())
        })
        .await
    }
}

// =============================================================================
//  CHAT
// =============================================================================

#[async_trait]
impl ChatRepository for MockRepository {
    async fn list_channels(&self, tenant: &Tenant, viewer: Uuid) -> RepoResult<Vec<Channel>> {
        let channels = self
            .read(tenant, |data| {
                data.channels
                    .iter()
                    .filter(|c| c.visible_to(viewer))
                    .map(|c| data.channel_view(c, viewer))
                    .collect::<Vec<_>>()
            })
            .await;
        Ok(sorted_by_name(channels))
    }

    async fn create_channel(&self, tenant: &Tenant, channel: NewChannel) -> RepoResult<Channel> {
        let creator = channel.created_by.id;
        self.write(tenant, |data| -> RepoResult<Channel> {
            // Membros precisam existir no diretório do tenant (o criador pode
            // ser o usuário de sessão, que nem sempre está lá).
            let others: Vec<Uuid> = channel
                .member_ids
                .iter()
                .copied()
                .filter(|id| *id != creator)
                .collect();
            data.authors(&others)?;

            let now = Utc::now();
            let record = MockChannel {
                id: Uuid::new_v4(),
                name: channel.name,
                description: channel.description,
                is_private: channel.is_private,
                created_at: now,
                members: channel
                    .member_ids
                    .iter()
                    .map(|user_id| MockMember {
                        user_id: *user_id,
                        last_read_at: (*user_id == creator).then_some(now),
                    })
                    .collect(),
            };
            let view = data.channel_view(&record, creator);
            data.channels.push(record);
            Ok(view)
        })
        .await
    }

    async fn list_messages(
        &self,
        tenant: &Tenant,
        channel_id: Uuid,
        viewer: Uuid,
        query: &MessageQuery,
    ) -> RepoResult<MessagePage> {
        let newest_first = self
            .read(tenant, |data| -> RepoResult<Vec<Message>> {
                let channel = data
                    .channels
                    .iter()
                    .find(|c| c.id == channel_id && c.visible_to(viewer))
                    .ok_or_else(|| not_found("channel", channel_id))?;
                let mut messages: Vec<Message> =
                    data.channel_messages(channel.id).cloned().collect();
                messages.reverse();
                Ok(messages)
            })
            .await?;

        let page = paginate(newest_first, query.before, query.limit, |m| m.created_at);
        let mut messages = page.items;
        messages.reverse();
        Ok(MessagePage {
            messages,
            total: page.total as u64,
            has_more: page.has_more,
        })
    }

    async fn send_message(
        &self,
        tenant: &Tenant,
        channel_id: Uuid,
        message: NewMessage,
    ) -> RepoResult<Message> {
        self.write(tenant, |data| -> RepoResult<Message> {
            let sender = message.sender.id;
            let channel = data
                .channels
                .iter_mut()
                .find(|c| c.id == channel_id && c.visible_to(sender))
                .ok_or_else(|| not_found("channel", channel_id))?;

            let now = Utc::now();
            // Quem escreve já leu o canal até aqui
            if let Some(member) = channel.members.iter_mut().find(|m| m.user_id == sender) {
                member.last_read_at = Some(now);
            }

            let created = Message {
                id: Uuid::new_v4(),
                channel_id,
                sender: message.sender,
                content: message.content,
                attachments: message.attachments,
                reactions: vec![],
                created_at: now,
                edited_at: None,
            };
            data.messages.push(created.clone());
            Ok(created)
        })
        .await
    }
}

fn sorted_by_name(mut channels: Vec<Channel>) -> Vec<Channel> {
    channels.sort_by(|a, b| a.name.cmp(&b.name));
    channels
}

// =============================================================================
//  DOCUMENTOS
// =============================================================================

#[async_trait]
impl DocsRepository for MockRepository {
    async fn list_documents(&self, tenant: &Tenant, query: &DocsQuery) -> RepoResult<Vec<Document>> {
        let mut documents: Vec<Document> = self
            .read(tenant, |data| {
                data.documents
                    .iter()
                    .filter(|d| {
                        query
                            .folder
                            .as_deref()
                            .is_none_or(|folder| d.folder.as_deref() == Some(folder))
                    })
                    .cloned()
                    .collect()
            })
            .await;
        documents.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(documents)
    }

    async fn get_document(&self, tenant: &Tenant, document_id: Uuid) -> RepoResult<Document> {
        self.read(tenant, |data| {
            data.documents.iter().find(|d| d.id == document_id).cloned()
        })
        .await
        .ok_or_else(|| not_found("document", document_id))
    }

    async fn create_document(&self, tenant: &Tenant, document: NewDocument) -> RepoResult<Document> {
        let now = Utc::now();
        let created = Document {
            id: Uuid::new_v4(),
            title: document.title,
            content: document.content,
            folder: document.folder,
            author: document.author,
            ai_summary: None,
            tags: document.tags,
            created_at: now,
            updated_at: now,
        };
        self.write(tenant, |data| data.documents.push(created.clone()))
            .await;
        Ok(created)
    }

    async fn set_document_summary(
        &self,
        tenant: &Tenant,
        document_id: Uuid,
        summary: &str,
    ) -> RepoResult<Document> {
        self.write(tenant, |data| -> RepoResult<Document> {
            let document = data
                .documents
                .iter_mut()
                .find(|d| d.id == document_id)
                .ok_or_else(|| not_found("document", document_id))?;
            document.ai_summary = Some(summary.to_string());
            document.updated_at = Utc::now();
            Ok(document.clone())
        })
        .await
    }
}
