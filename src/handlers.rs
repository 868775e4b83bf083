pub mod analytics;
pub mod auth;
pub mod chat;
pub mod docs;
pub mod feed;
pub mod forms;
pub mod health;
pub mod meetings;
pub mod support;
pub mod tasks;
pub mod users;
