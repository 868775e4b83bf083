// src/handlers/health.rs

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    config::AppState,
    db::{DataMode, Repository},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "ok")]
    pub status: &'static str,
    #[schema(value_type = String, example = "mock")]
    pub data_mode: DataMode,
}

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, description = "Serviço no ar", body = HealthStatus))
)]
pub async fn health(State(app_state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        data_mode: app_state.repo.mode(),
    })
}
