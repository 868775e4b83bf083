// src/client/chat.rs

use reqwest::Method;
use uuid::Uuid;

use super::{ApiClient, ApiError, RequestOptions};
use crate::models::chat::{
    Channel, CreateChannelPayload, Message, MessagePage, MessageQuery, SendMessagePayload,
    SmartReplies, SmartReplyPayload,
};

pub struct ChatApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ChatApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn channels(&self) -> Result<Vec<Channel>, ApiError> {
        self.client
            .request(Method::GET, "/chat/channels", RequestOptions::default())
            .await
    }

    pub async fn create_channel(&self, payload: &CreateChannelPayload) -> Result<Channel, ApiError> {
        self.client
            .request(Method::POST, "/chat/channels", RequestOptions::json(payload)?)
            .await
    }

    pub async fn messages(&self, channel_id: Uuid, query: &MessageQuery) -> Result<MessagePage, ApiError> {
        self.client
            .request(
                Method::GET,
                &format!("/chat/channels/{channel_id}/messages"),
                RequestOptions::query(query)?,
            )
            .await
    }

    pub async fn send_message(
        &self,
        channel_id: Uuid,
        payload: &SendMessagePayload,
    ) -> Result<Message, ApiError> {
        self.client
            .request(
                Method::POST,
                &format!("/chat/channels/{channel_id}/messages"),
                RequestOptions::json(payload)?,
            )
            .await
    }

    pub async fn smart_replies(&self, message: &str) -> Result<SmartReplies, ApiError> {
        let payload = SmartReplyPayload {
            message: message.to_string(),
        };
        self.client
            .request(Method::POST, "/chat/smart-replies", RequestOptions::json(&payload)?)
            .await
    }
}
