// src/client/users.rs

use reqwest::Method;

use super::{ApiClient, ApiError, RequestOptions};
use crate::models::users::{DirectoryUser, Me};

pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<DirectoryUser>, ApiError> {
        self.client
            .request(Method::GET, "/users", RequestOptions::default())
            .await
    }

    pub async fn me(&self) -> Result<Me, ApiError> {
        self.client
            .request(Method::GET, "/users/me", RequestOptions::default())
            .await
    }
}
