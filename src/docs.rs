// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Health / Auth ---
        handlers::health::health,
        handlers::auth::create_session,

        // --- Feed ---
        handlers::feed::list_posts,
        handlers::feed::create_post,
        handlers::feed::toggle_reaction,

        // --- Chat ---
        handlers::chat::list_channels,
        handlers::chat::create_channel,
        handlers::chat::list_messages,
        handlers::chat::send_message,
        handlers::chat::smart_replies,

        // --- Docs ---
        handlers::docs::list_documents,
        handlers::docs::create_document,
        handlers::docs::get_document,
        handlers::docs::summarize_document,

        // --- Forms ---
        handlers::forms::list_forms,
        handlers::forms::create_form,
        handlers::forms::get_form,
        handlers::forms::list_responses,
        handlers::forms::submit_response,

        // --- Tasks ---
        handlers::tasks::list_tasks,
        handlers::tasks::create_task,
        handlers::tasks::update_task,

        // --- Meetings ---
        handlers::meetings::list_meetings,
        handlers::meetings::create_meeting,

        // --- Users / Analytics / Support ---
        handlers::users::list_users,
        handlers::users::get_me,
        handlers::analytics::overview,
        handlers::support::list_tickets,
        handlers::support::create_ticket,
    ),
    components(
        schemas(
            // --- Compartilhados ---
            models::tenancy::Tenant,
            models::users::User,
            models::content::Author,
            models::content::Attachment,
            models::content::Reaction,
            models::content::NewAttachment,
            models::content::ReactionPayload,

            // --- Auth ---
            models::auth::SessionRequest,
            models::auth::SessionResponse,

            // --- Feed ---
            models::feed::PostType,
            models::feed::Post,
            models::feed::FeedPage,
            models::feed::CreatePostPayload,

            // --- Chat ---
            models::chat::Channel,
            models::chat::Message,
            models::chat::MessagePage,
            models::chat::CreateChannelPayload,
            models::chat::SendMessagePayload,
            models::chat::SmartReplyPayload,
            models::chat::SmartReplies,

            // --- Docs ---
            models::docs::Document,
            models::docs::CreateDocumentPayload,

            // --- Forms ---
            models::forms::FieldType,
            models::forms::FormField,
            models::forms::Form,
            models::forms::FormResponse,
            models::forms::NewFormField,
            models::forms::CreateFormPayload,
            models::forms::SubmitResponsePayload,

            // --- Tasks ---
            models::tasks::TaskStatus,
            models::tasks::TaskPriority,
            models::tasks::Task,
            models::tasks::CreateTaskPayload,
            models::tasks::TaskPatch,

            // --- Meetings ---
            models::meetings::Meeting,
            models::meetings::CreateMeetingPayload,

            // --- Users / Analytics / Support ---
            models::users::PresenceStatus,
            models::users::DirectoryUser,
            models::users::Me,
            models::analytics::AnalyticsOverview,
            models::support::TicketStatus,
            models::support::TicketPriority,
            models::support::SupportTicket,
            models::support::CreateTicketPayload,
            handlers::health::HealthStatus,
        )
    ),
    tags(
        (name = "Health", description = "Estado do serviço"),
        (name = "Auth", description = "Sessão de demonstração"),
        (name = "Feed", description = "Posts, tags e reações"),
        (name = "Chat", description = "Canais, mensagens e respostas sugeridas"),
        (name = "Docs", description = "Documentos e resumos"),
        (name = "Forms", description = "Formulários e respostas"),
        (name = "Tasks", description = "Quadro de tarefas"),
        (name = "Meetings", description = "Agenda de reuniões"),
        (name = "Users", description = "Diretório e usuário da sessão"),
        (name = "Analytics", description = "Indicadores do tenant"),
        (name = "Support", description = "Chamados de suporte")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/health",
            "/api/feed",
            "/api/feed/{id}/reactions",
            "/api/chat/channels/{id}/messages",
            "/api/docs/{id}/summary",
            "/api/forms/{id}/responses",
            "/api/tasks/{id}",
            "/api/support/tickets",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
