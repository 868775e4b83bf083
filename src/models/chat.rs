// src/models/chat.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::content::{Attachment, Author, NewAttachment, Reaction};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Channel {
    pub id: Uuid,
    #[schema(example = "general")]
    pub name: String,
    pub description: Option<String>,
    pub is_private: bool,
    pub member_count: i64,
    pub unread_count: i64,
    pub last_message_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Message {
    pub id: Uuid,
    pub channel_id: Uuid,
    pub sender: Author,
    pub content: String,
    pub attachments: Vec<Attachment>,
    pub reactions: Vec<Reaction>,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MessageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<DateTime<Utc>>,
}

// Mensagens vêm em ordem cronológica (a mais antiga primeiro) dentro da página.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessagePage {
    pub messages: Vec<Message>,
    pub total: u64,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateChannelPayload {
    #[validate(length(min = 1, max = 80, message = "O nome do canal é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub member_ids: Vec<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewChannel {
    pub created_by: Author,
    pub name: String,
    pub description: Option<String>,
    pub is_private: bool,
    /// Sempre inclui quem criou o canal.
    pub member_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SendMessagePayload {
    #[validate(length(min = 1, max = 4000, message = "A mensagem não pode ser vazia."))]
    pub content: String,
    #[serde(default)]
    #[validate(nested)]
    pub attachments: Vec<NewAttachment>,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub sender: Author,
    pub content: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SmartReplyPayload {
    #[validate(length(min = 1, max = 4000, message = "A mensagem não pode ser vazia."))]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SmartReplies {
    #[schema(example = json!(["Thanks!", "Got it.", "Will do."]))]
    pub replies: Vec<String>,
}
