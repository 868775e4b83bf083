// src/models/analytics.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Cards do topo do painel de analytics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AnalyticsOverview {
    pub active_users: i64,
    pub posts_this_week: i64,
    pub messages_this_week: i64,
    pub open_tasks: i64,
    pub completed_tasks: i64,
    pub upcoming_meetings: i64,
    pub open_tickets: i64,
}
