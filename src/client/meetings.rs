// src/client/meetings.rs

use reqwest::Method;

use super::{ApiClient, ApiError, RequestOptions};
use crate::models::meetings::{CreateMeetingPayload, Meeting, MeetingQuery};

pub struct MeetingsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> MeetingsApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &MeetingQuery) -> Result<Vec<Meeting>, ApiError> {
        self.client
            .request(Method::GET, "/meetings", RequestOptions::query(query)?)
            .await
    }

    pub async fn create(&self, payload: &CreateMeetingPayload) -> Result<Meeting, ApiError> {
        self.client
            .request(Method::POST, "/meetings", RequestOptions::json(payload)?)
            .await
    }
}
