pub mod analytics;
pub mod auth;
pub mod chat;
pub mod content;
pub mod docs;
pub mod feed;
pub mod forms;
pub mod meetings;
pub mod support;
pub mod tasks;
pub mod tenancy;
pub mod users;
