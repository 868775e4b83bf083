//! Implementação em memória da camada de dados (modo demonstração).
//!
//! Cada tenant recebe sua própria cópia das fixtures na primeira vez que é
//! acessado. Leituras filtram e paginam essas listas; escritas acrescentam
//! registros, então o que é criado aparece nas leituras seguintes do mesmo
//! processo. Nada é durável: reiniciar o processo volta às fixtures.
//!
//! As listas são guardadas na ordem em que o front-end as consome: posts do
//! mais novo para o mais antigo, mensagens em ordem cronológica.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DataMode, Repository},
    models::{
        chat::{Channel, Message},
        content::Author,
        docs::Document,
        feed::Post,
        forms::{Form, FormResponse},
        meetings::Meeting,
        support::SupportTicket,
        tasks::Task,
        tenancy::Tenant,
        users::DirectoryUser,
    },
};

mod collab;
pub mod fixtures;
mod workspace;

#[derive(Debug, Clone)]
pub(crate) struct MockMember {
    pub user_id: Uuid,
    pub last_read_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub(crate) struct MockChannel {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub members: Vec<MockMember>,
}

impl MockChannel {
    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.members.iter().any(|m| m.user_id == user_id)
    }

    pub fn visible_to(&self, user_id: Uuid) -> bool {
        !self.is_private || self.is_member(user_id)
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct TenantData {
    pub users: Vec<DirectoryUser>,
    pub posts: Vec<Post>,
    pub channels: Vec<MockChannel>,
    pub messages: Vec<Message>,
    pub documents: Vec<Document>,
    pub forms: Vec<Form>,
    pub responses: Vec<FormResponse>,
    pub tasks: Vec<Task>,
    pub meetings: Vec<Meeting>,
    pub tickets: Vec<SupportTicket>,
}

impl TenantData {
    pub fn author(&self, user_id: Uuid) -> Option<Author> {
        self.users.iter().find(|u| u.id == user_id).map(|u| Author {
            id: u.id,
            name: u.name.clone(),
            avatar_url: u.avatar_url.clone(),
        })
    }

    /// Resolve ids do diretório; qualquer id desconhecido invalida a requisição.
    pub fn authors(&self, user_ids: &[Uuid]) -> Result<Vec<Author>, AppError> {
        user_ids
            .iter()
            .map(|id| {
                self.author(*id)
                    .ok_or_else(|| AppError::BadRequest(format!("usuário desconhecido {id}")))
            })
            .collect()
    }

    pub fn channel_messages(&self, channel_id: Uuid) -> impl Iterator<Item = &Message> + '_ {
        self.messages.iter().filter(move |m| m.channel_id == channel_id)
    }

    pub fn channel_view(&self, channel: &MockChannel, viewer: Uuid) -> Channel {
        let last_read = channel
            .members
            .iter()
            .find(|m| m.user_id == viewer)
            .map(|m| m.last_read_at);
        let unread_count = match last_read {
            // Não-membros não têm contador de não lidas
            None => 0,
            Some(read_at) => self
                .channel_messages(channel.id)
                .filter(|m| m.sender.id != viewer)
                .filter(|m| read_at.is_none_or(|read| m.created_at > read))
                .count() as i64,
        };

        Channel {
            id: channel.id,
            name: channel.name.clone(),
            description: channel.description.clone(),
            is_private: channel.is_private,
            member_count: channel.members.len() as i64,
            unread_count,
            last_message_at: self.channel_messages(channel.id).map(|m| m.created_at).max(),
            created_at: channel.created_at,
        }
    }
}

pub struct MockRepository {
    tenants: RwLock<HashMap<String, TenantData>>,
}

impl MockRepository {
    pub fn new() -> Self {
        Self {
            tenants: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) async fn read<T>(&self, tenant: &Tenant, f: impl FnOnce(&TenantData) -> T) -> T {
        {
            let guard = self.tenants.read().await;
            if let Some(data) = guard.get(&tenant.id) {
                return f(data);
            }
        }
        let mut guard = self.tenants.write().await;
        let data = guard
            .entry(tenant.id.clone())
            .or_insert_with(|| seed_for(tenant));
        f(data)
    }

    pub(crate) async fn write<T>(&self, tenant: &Tenant, f: impl FnOnce(&mut TenantData) -> T) -> T {
        let mut guard = self.tenants.write().await;
        let data = guard
            .entry(tenant.id.clone())
            .or_insert_with(|| seed_for(tenant));
        f(data)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_for(tenant: &Tenant) -> TenantData {
    tracing::debug!(tenant = %tenant.id, "semeando fixtures do tenant");
    fixtures::seed(Utc::now())
}

impl Repository for MockRepository {
    fn mode(&self) -> DataMode {
        DataMode::Mock
    }
}

pub(crate) fn not_found(what: &str, id: Uuid) -> AppError {
    AppError::NotFound(format!("{what} {id}"))
}
