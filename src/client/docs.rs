// src/client/docs.rs

use reqwest::Method;
use uuid::Uuid;

use super::{ApiClient, ApiError, RequestOptions};
use crate::models::docs::{CreateDocumentPayload, DocsQuery, Document};

pub struct DocsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DocsApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &DocsQuery) -> Result<Vec<Document>, ApiError> {
        self.client
            .request(Method::GET, "/docs", RequestOptions::query(query)?)
            .await
    }

    pub async fn get(&self, document_id: Uuid) -> Result<Document, ApiError> {
        self.client
            .request(Method::GET, &format!("/docs/{document_id}"), RequestOptions::default())
            .await
    }

    pub async fn create(&self, payload: &CreateDocumentPayload) -> Result<Document, ApiError> {
        self.client
            .request(Method::POST, "/docs", RequestOptions::json(payload)?)
            .await
    }

    pub async fn summarize(&self, document_id: Uuid) -> Result<Document, ApiError> {
        self.client
            .request(
                Method::POST,
                &format!("/docs/{document_id}/summary"),
                RequestOptions::default(),
            )
            .await
    }
}
