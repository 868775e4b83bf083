// src/db/postgres/meetings.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use super::{author, resolve_authors, SqlRepository};
use crate::{
    db::{MeetingRepository, RepoResult},
    models::{
        content::Author,
        meetings::{Meeting, MeetingQuery, NewMeeting},
        tenancy::Tenant,
    },
};

const MEETING_COLUMNS: &str = r#"
    m.id, m.title, m.description, m.start_time, m.end_time, m.location, m.meeting_url,
    m.organizer_id, m.organizer_name, m.organizer_avatar_url, m.created_at,
    COALESCE((
        SELECT jsonb_agg(jsonb_build_object(
            'id', ma.user_id, 'name', ma.name, 'avatar_url', ma.avatar_url
        ) ORDER BY ma.position)
        FROM meeting_attendees ma
        WHERE ma.meeting_id = m.id
    ), '[]'::jsonb) AS attendees
"#;

#[derive(Debug, sqlx::FromRow)]
struct MeetingRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    location: Option<String>,
    meeting_url: Option<String>,
    organizer_id: Uuid,
    organizer_name: String,
    organizer_avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    attendees: Json<Vec<Author>>,
}

impl From<MeetingRow> for Meeting {
    fn from(row: MeetingRow) -> Self {
        Meeting {
            id: row.id,
            title: row.title,
            description: row.description,
            start_time: row.start_time,
            end_time: row.end_time,
            location: row.location,
            meeting_url: row.meeting_url,
            organizer: author(row.organizer_id, row.organizer_name, row.organizer_avatar_url),
            attendees: row.attendees.0,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl MeetingRepository for SqlRepository {
    async fn list_meetings(&self, tenant: &Tenant, query: &MeetingQuery) -> RepoResult<Vec<Meeting>> {
        let mut tx = self.begin_scoped(tenant).await?;
        let sql = format!(
            r#"
            SELECT {MEETING_COLUMNS}
            FROM meetings m
            WHERE m.tenant_id = $1
              AND ($2::timestamptz IS NULL OR m.end_time > $2)
              AND ($3::timestamptz IS NULL OR m.start_time < $3)
            ORDER BY m.start_time ASC
            "#
        );
        let rows: Vec<MeetingRow> = sqlx::query_as(&sql)
            .bind(&tenant.id)
            .bind(query.start)
            .bind(query.end)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(rows.into_iter().map(Meeting::from).collect())
    }

    async fn create_meeting(&self, tenant: &Tenant, meeting: NewMeeting) -> RepoResult<Meeting> {
        let mut tx = self.begin_scoped(tenant).await?;
        let attendees = resolve_authors(&mut tx, tenant, &meeting.attendee_ids).await?;
        let meeting_id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO meetings (
                id, tenant_id, title, description, start_time, end_time, location, meeting_url,
                organizer_id, organizer_name, organizer_avatar_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(meeting_id)
        .bind(&tenant.id)
        .bind(&meeting.title)
        .bind(meeting.description.as_deref())
        .bind(meeting.start_time)
        .bind(meeting.end_time)
        .bind(meeting.location.as_deref())
        .bind(meeting.meeting_url.as_deref())
        .bind(meeting.organizer.id)
        .bind(&meeting.organizer.name)
        .bind(meeting.organizer.avatar_url.as_deref())
        .execute(&mut *tx)
        .await?;

        for (position, attendee) in attendees.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO meeting_attendees (meeting_id, tenant_id, user_id, name, avatar_url, position)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(meeting_id)
            .bind(&tenant.id)
            .bind(attendee.id)
            .bind(&attendee.name)
            .bind(attendee.avatar_url.as_deref())
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        let sql = format!("SELECT {MEETING_COLUMNS} FROM meetings m WHERE m.id = $1");
        let row: MeetingRow = sqlx::query_as(&sql)
            .bind(meeting_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(row.into())
    }
}
