// src/client/feed.rs

use reqwest::Method;
use uuid::Uuid;

use super::{ApiClient, ApiError, RequestOptions};
use crate::models::{
    content::ReactionPayload,
    feed::{CreatePostPayload, FeedPage, FeedQuery, Post},
};

pub struct FeedApi<'a> {
    client: &'a ApiClient,
}

impl<'a> FeedApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &FeedQuery) -> Result<FeedPage, ApiError> {
        self.client
            .request(Method::GET, "/feed", RequestOptions::query(query)?)
            .await
    }

    pub async fn create(&self, payload: &CreatePostPayload) -> Result<Post, ApiError> {
        self.client
            .request(Method::POST, "/feed", RequestOptions::json(payload)?)
            .await
    }

    /// Liga ou desliga a reação do usuário da sessão.
    pub async fn toggle_reaction(&self, post_id: Uuid, emoji: &str) -> Result<Post, ApiError> {
        let payload = ReactionPayload {
            emoji: emoji.to_string(),
        };
        self.client
            .request(
                Method::POST,
                &format!("/feed/{post_id}/reactions"),
                RequestOptions::json(&payload)?,
            )
            .await
    }
}
