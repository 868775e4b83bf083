// src/client/analytics.rs

use reqwest::Method;

use super::{ApiClient, ApiError, RequestOptions};
use crate::models::analytics::AnalyticsOverview;

pub struct AnalyticsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AnalyticsApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn overview(&self) -> Result<AnalyticsOverview, ApiError> {
        self.client
            .request(Method::GET, "/analytics/overview", RequestOptions::default())
            .await
    }
}
