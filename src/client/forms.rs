// src/client/forms.rs

use reqwest::Method;
use uuid::Uuid;

use super::{ApiClient, ApiError, RequestOptions};
use crate::models::forms::{CreateFormPayload, Form, FormResponse, SubmitResponsePayload};

pub struct FormsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> FormsApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Form>, ApiError> {
        self.client
            .request(Method::GET, "/forms", RequestOptions::default())
            .await
    }

    pub async fn get(&self, form_id: Uuid) -> Result<Form, ApiError> {
        self.client
            .request(Method::GET, &format!("/forms/{form_id}"), RequestOptions::default())
            .await
    }

    pub async fn create(&self, payload: &CreateFormPayload) -> Result<Form, ApiError> {
        self.client
            .request(Method::POST, "/forms", RequestOptions::json(payload)?)
            .await
    }

    pub async fn responses(&self, form_id: Uuid) -> Result<Vec<FormResponse>, ApiError> {
        self.client
            .request(
                Method::GET,
                &format!("/forms/{form_id}/responses"),
                RequestOptions::default(),
            )
            .await
    }

    pub async fn submit(
        &self,
        form_id: Uuid,
        payload: &SubmitResponsePayload,
    ) -> Result<FormResponse, ApiError> {
        self.client
            .request(
                Method::POST,
                &format!("/forms/{form_id}/responses"),
                RequestOptions::json(payload)?,
            )
            .await
    }
}
