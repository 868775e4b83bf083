// src/client/auth.rs

use reqwest::Method;
use uuid::Uuid;

use super::{ApiClient, ApiError, RequestOptions};
use crate::models::auth::{SessionRequest, SessionResponse};

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Emite um token de demonstração para `user_id` no tenant do contexto.
    pub async fn create_session(&self, user_id: Uuid) -> Result<SessionResponse, ApiError> {
        self.client
            .request(
                Method::POST,
                "/auth/session",
                RequestOptions::json(&SessionRequest { user_id })?,
            )
            .await
    }
}
