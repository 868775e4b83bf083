// src/client/support.rs

use reqwest::Method;

use super::{ApiClient, ApiError, RequestOptions};
use crate::models::support::{CreateTicketPayload, SupportTicket, TicketQuery};

pub struct SupportApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SupportApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &TicketQuery) -> Result<Vec<SupportTicket>, ApiError> {
        self.client
            .request(Method::GET, "/support/tickets", RequestOptions::query(query)?)
            .await
    }

    pub async fn create(&self, payload: &CreateTicketPayload) -> Result<SupportTicket, ApiError> {
        self.client
            .request(Method::POST, "/support/tickets", RequestOptions::json(payload)?)
            .await
    }
}
