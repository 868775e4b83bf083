// src/models/meetings.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::content::Author;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Meeting {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub meeting_url: Option<String>,
    pub organizer: Author,
    pub attendees: Vec<Author>,
    pub created_at: DateTime<Utc>,
}

// Janela do calendário: reuniões que se sobrepõem a [start, end)
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MeetingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

impl MeetingQuery {
    pub fn overlaps(&self, meeting: &Meeting) -> bool {
        self.start.is_none_or(|start| meeting.end_time > start)
            && self.end.is_none_or(|end| meeting.start_time < end)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMeetingPayload {
    #[validate(length(min = 1, max = 200, message = "O título da reunião é obrigatório."))]
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    #[validate(url(message = "O link da reunião é inválido."))]
    pub meeting_url: Option<String>,
    #[serde(default)]
    pub attendee_ids: Vec<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewMeeting {
    pub organizer: Author,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub meeting_url: Option<String>,
    /// Resolvidos pelo repositório a partir do diretório do tenant.
    pub attendee_ids: Vec<Uuid>,
}
