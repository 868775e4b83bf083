// src/handlers/analytics.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    db::AnalyticsRepository,
    middleware::tenancy::TenantContext,
    models::analytics::AnalyticsOverview,
};

// GET /api/analytics/overview
#[utoipa::path(
    get,
    path = "/api/analytics/overview",
    tag = "Analytics",
    params(("x-tenant-id" = String, Header, description = "ID do tenant")),
    responses((status = 200, description = "Indicadores do tenant", body = AnalyticsOverview)),
    security(("api_jwt" = []))
)]
pub async fn overview(
    State(app_state): State<AppState>,
    TenantContext(tenant): TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let overview = app_state.repo.overview(&tenant).await?;
    Ok((StatusCode::OK, Json(overview)))
}
