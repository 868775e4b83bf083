// src/db.rs
//
// A camada de dados: um conjunto de traits por domínio, com duas
// implementações escolhidas uma única vez na inicialização:
// `MockRepository` (fixtures em memória) e `SqlRepository` (Postgres).
// As duas devolvem os mesmos tipos de `models`, então o formato JSON é o
// mesmo nos dois caminhos.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        analytics::AnalyticsOverview,
        chat::{Channel, Message, MessagePage, MessageQuery, NewChannel, NewMessage},
        docs::{Document, DocsQuery, NewDocument},
        feed::{FeedPage, FeedQuery, NewPost, Post},
        forms::{Form, FormResponse, NewForm, NewFormResponse},
        meetings::{Meeting, MeetingQuery, NewMeeting},
        support::{NewTicket, SupportTicket, TicketQuery},
        tasks::{NewTask, Task, TaskPatch, TaskQuery},
        tenancy::Tenant,
        users::DirectoryUser,
    },
};

pub mod mock;
pub mod postgres;

pub use mock::MockRepository;
pub use postgres::SqlRepository;

pub type RepoResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    Mock,
    Sql,
}

#[async_trait]
pub trait FeedRepository: Send + Sync {
    async fn list_posts(&self, tenant: &Tenant, query: &FeedQuery) -> RepoResult<FeedPage>;
    async fn get_post(&self, tenant: &Tenant, post_id: Uuid) -> RepoResult<Post>;
    async fn create_post(&self, tenant: &Tenant, post: NewPost) -> RepoResult<Post>;
    async fn toggle_post_reaction(
        &self,
        tenant: &Tenant,
        post_id: Uuid,
        user_id: Uuid,
        emoji: &str,
    ) -> RepoResult<Post>;
}

#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Canais públicos mais os privados dos quais `viewer` é membro.
    async fn list_channels(&self, tenant: &Tenant, viewer: Uuid) -> RepoResult<Vec<Channel>>;
    async fn create_channel(&self, tenant: &Tenant, channel: NewChannel) -> RepoResult<Channel>;
    /// Canal privado sem `viewer` como membro responde como inexistente.
    async fn list_messages(
        &self,
        tenant: &Tenant,
        channel_id: Uuid,
        viewer: Uuid,
        query: &MessageQuery,
    ) -> RepoResult<MessagePage>;
    async fn send_message(
        &self,
        tenant: &Tenant,
        channel_id: Uuid,
        message: NewMessage,
    ) -> RepoResult<Message>;
}

#[async_trait]
pub trait DocsRepository: Send + Sync {
    async fn list_documents(&self, tenant: &Tenant, query: &DocsQuery) -> RepoResult<Vec<Document>>;
    async fn get_document(&self, tenant: &Tenant, document_id: Uuid) -> RepoResult<Document>;
    async fn create_document(&self, tenant: &Tenant, document: NewDocument) -> RepoResult<Document>;
    async fn set_document_summary(
        &self,
        tenant: &Tenant,
        document_id: Uuid,
        summary: &str,
    ) -> RepoResult<Document>;
}

#[async_trait]
pub trait FormsRepository: Send + Sync {
    async fn list_forms(&self, tenant: &Tenant) -> RepoResult<Vec<Form>>;
    async fn get_form(&self, tenant: &Tenant, form_id: Uuid) -> RepoResult<Form>;
    async fn create_form(&self, tenant: &Tenant, form: NewForm) -> RepoResult<Form>;
    async fn list_form_responses(&self, tenant: &Tenant, form_id: Uuid) -> RepoResult<Vec<FormResponse>>;
    async fn submit_form_response(
        &self,
        tenant: &Tenant,
        form_id: Uuid,
        response: NewFormResponse,
    ) -> RepoResult<FormResponse>;
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn list_tasks(&self, tenant: &Tenant, query: &TaskQuery) -> RepoResult<Vec<Task>>;
    async fn create_task(&self, tenant: &Tenant, task: NewTask) -> RepoResult<Task>;
    async fn update_task(&self, tenant: &Tenant, task_id: Uuid, patch: TaskPatch) -> RepoResult<Task>;
}

#[async_trait]
pub trait MeetingRepository: Send + Sync {
    async fn list_meetings(&self, tenant: &Tenant, query: &MeetingQuery) -> RepoResult<Vec<Meeting>>;
    async fn create_meeting(&self, tenant: &Tenant, meeting: NewMeeting) -> RepoResult<Meeting>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self, tenant: &Tenant) -> RepoResult<Vec<DirectoryUser>>;
    async fn find_user(&self, tenant: &Tenant, user_id: Uuid) -> RepoResult<Option<DirectoryUser>>;
}

#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    async fn overview(&self, tenant: &Tenant) -> RepoResult<AnalyticsOverview>;
}

#[async_trait]
pub trait SupportRepository: Send + Sync {
    async fn list_tickets(&self, tenant: &Tenant, query: &TicketQuery) -> RepoResult<Vec<SupportTicket>>;
    async fn create_ticket(&self, tenant: &Tenant, ticket: NewTicket) -> RepoResult<SupportTicket>;
}

/// Tudo o que os handlers precisam da camada de dados.
pub trait Repository:
    FeedRepository
    + ChatRepository
    + DocsRepository
    + FormsRepository
    + TaskRepository
    + MeetingRepository
    + UserRepository
    + AnalyticsRepository
    + SupportRepository
{
    fn mode(&self) -> DataMode;
}
