// src/models/feed.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::content::{Attachment, Author, NewAttachment, Reaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "post_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    #[default]
    Update,
    Announcement,
    Question,
    Kudos,
}

// ---
// Post do feed (exatamente o que o front-end desestrutura)
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Post {
    pub id: Uuid,
    pub author: Author,
    pub content: String,
    pub post_type: PostType,
    #[schema(example = json!(["design", "ui"]))]
    pub ai_tags: Vec<String>,
    pub attachments: Vec<Attachment>,
    pub reactions: Vec<Reaction>,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedQuery {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub post_type: Option<PostType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[param(example = "design")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    pub total: u64,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePostPayload {
    #[validate(length(min = 1, max = 5000, message = "O conteúdo do post é obrigatório."))]
    pub content: String,
    #[serde(rename = "type", default)]
    pub post_type: PostType,
    #[serde(default)]
    #[validate(nested)]
    pub attachments: Vec<NewAttachment>,
}

// O que o repositório recebe para gravar
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author: Author,
    pub content: String,
    pub post_type: PostType,
    pub ai_tags: Vec<String>,
    pub attachments: Vec<Attachment>,
}
