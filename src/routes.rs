// src/routes.rs

use axum::{
    routing::{get, patch, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

/// Monta o router completo. Tenant e sessão são resolvidos pelos extratores
/// de cada handler, então não há camadas de middleware por grupo.
pub fn build_router(app_state: AppState) -> Router {
    let feed_routes = Router::new()
        .route(
            "/",
            get(handlers::feed::list_posts).post(handlers::feed::create_post),
        )
        .route("/{id}/reactions", post(handlers::feed::toggle_reaction));

    let chat_routes = Router::new()
        .route(
            "/channels",
            get(handlers::chat::list_channels).post(handlers::chat::create_channel),
        )
        .route(
            "/channels/{id}/messages",
            get(handlers::chat::list_messages).post(handlers::chat::send_message),
        )
        .route("/smart-replies", post(handlers::chat::smart_replies));

    let docs_routes = Router::new()
        .route(
            "/",
            get(handlers::docs::list_documents).post(handlers::docs::create_document),
        )
        .route("/{id}", get(handlers::docs::get_document))
        .route("/{id}/summary", post(handlers::docs::summarize_document));

    let forms_routes = Router::new()
        .route(
            "/",
            get(handlers::forms::list_forms).post(handlers::forms::create_form),
        )
        .route("/{id}", get(handlers::forms::get_form))
        .route(
            "/{id}/responses",
            get(handlers::forms::list_responses).post(handlers::forms::submit_response),
        );

    let tasks_routes = Router::new()
        .route(
            "/",
            get(handlers::tasks::list_tasks).post(handlers::tasks::create_task),
        )
        .route("/{id}", patch(handlers::tasks::update_task));

    let meetings_routes = Router::new().route(
        "/",
        get(handlers::meetings::list_meetings).post(handlers::meetings::create_meeting),
    );

    let users_routes = Router::new()
        .route("/", get(handlers::users::list_users))
        .route("/me", get(handlers::users::get_me));

    let support_routes = Router::new().route(
        "/tickets",
        get(handlers::support::list_tickets).post(handlers::support::create_ticket),
    );

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(handlers::health::health))
        .route("/api/auth/session", post(handlers::auth::create_session))
        .route("/api/analytics/overview", get(handlers::analytics::overview))
        .nest("/api/feed", feed_routes)
        .nest("/api/chat", chat_routes)
        .nest("/api/docs", docs_routes)
        .nest("/api/forms", forms_routes)
        .nest("/api/tasks", tasks_routes)
        .nest("/api/meetings", meetings_routes)
        .nest("/api/users", users_routes)
        .nest("/api/support", support_routes)
        .with_state(app_state)
}
