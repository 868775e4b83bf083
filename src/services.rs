pub mod ai_service;
pub mod auth;
pub mod chat_service;
pub mod docs_service;
pub mod feed_service;
