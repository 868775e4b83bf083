// src/client/tasks.rs

use reqwest::Method;
use uuid::Uuid;

use super::{ApiClient, ApiError, RequestOptions};
use crate::models::tasks::{CreateTaskPayload, Task, TaskPatch, TaskQuery};

pub struct TasksApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TasksApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &TaskQuery) -> Result<Vec<Task>, ApiError> {
        self.client
            .request(Method::GET, "/tasks", RequestOptions::query(query)?)
            .await
    }

    pub async fn create(&self, payload: &CreateTaskPayload) -> Result<Task, ApiError> {
        self.client
            .request(Method::POST, "/tasks", RequestOptions::json(payload)?)
            .await
    }

    /// Só os campos presentes em `patch` são alterados.
    pub async fn update(&self, task_id: Uuid, patch: &TaskPatch) -> Result<Task, ApiError> {
        self.client
            .request(Method::PATCH, &format!("/tasks/{task_id}"), RequestOptions::json(patch)?)
            .await
    }
}
