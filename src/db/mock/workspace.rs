// src/db/mock/workspace.rs
//
// Formulários, tarefas, reuniões, diretório, analytics e suporte.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use super::{not_found, MockRepository};
use crate::{
    db::{
        AnalyticsRepository, FormsRepository, MeetingRepository, RepoResult, SupportRepository,
        TaskRepository, UserRepository,
    },
    models::{
        analytics::AnalyticsOverview,
        forms::{Form, FormResponse, NewForm, NewFormResponse},
        meetings::{Meeting, MeetingQuery, NewMeeting},
        support::{NewTicket, SupportTicket, TicketQuery, TicketStatus},
        tasks::{NewTask, Task, TaskPatch, TaskQuery, TaskStatus},
        tenancy::Tenant,
        users::{DirectoryUser, PresenceStatus},
    },
};

// =============================================================================
//  FORMULÁRIOS
// =============================================================================

#[async_trait]
impl FormsRepository for MockRepository {
    async fn list_forms(&self, tenant: &Tenant) -> RepoResult<Vec<Form>> {
        let mut forms = self.read(tenant, |data| data.forms.clone()).await;
        forms.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(forms)
    }

    async fn get_form(&self, tenant: &Tenant, form_id: Uuid) -> RepoResult<Form> {
        self.read(tenant, |data| data.forms.iter().find(|f| f.id == form_id).cloned())
            .await
            .ok_or_else(|| not_found("form", form_id))
    }

    async fn create_form(&self, tenant: &Tenant, form: NewForm) -> RepoResult<Form> {
        let created = Form {
            id: Uuid::new_v4(),
            title: form.title,
            description: form.description,
            fields: form.fields,
            response_count: 0,
            is_published: form.is_published,
            created_by: form.created_by,
            created_at: Utc::now(),
        };
        self.write(tenant, |data| data.forms.push(created.clone()))
            .await;
        Ok(created)
    }

    async fn list_form_responses(&self, tenant: &Tenant, form_id: Uuid) -> RepoResult<Vec<FormResponse>> {
        self.read(tenant, |data| -> RepoResult<Vec<FormResponse>> {
            if !data.forms.iter().any(|f| f.id == form_id) {
                return Err(not_found("form", form_id));
            }
            let mut responses: Vec<FormResponse> = data
                .responses
                .iter()
                .filter(|r| r.form_id == form_id)
                .cloned()
                .collect();
            responses.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
            Ok(responses)
        })
        .await
    }

    async fn submit_form_response(
        &self,
        tenant: &Tenant,
        form_id: Uuid,
        response: NewFormResponse,
    ) -> RepoResult<FormResponse> {
        self.write(tenant, |data| -> RepoResult<FormResponse> {
            let form = data
                .forms
                .iter_mut()
                .find(|f| f.id == form_id)
                .ok_or_else(|| not_found("form", form_id))?;
            form.response_count += 1;

            let created = FormResponse {
                id: Uuid::new_v4(),
                form_id,
                respondent: response.respondent,
                answers: response.answers,
                submitted_at: Utc::now(),
            };
            data.responses.push(created.clone());
            Ok(created)
        })
        .await
    }
}

// =============================================================================
//  TAREFAS
// =============================================================================

#[async_trait]
impl TaskRepository for MockRepository {
    async fn list_tasks(&self, tenant: &Tenant, query: &TaskQuery) -> RepoResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .read(tenant, |data| {
                data.tasks.iter().filter(|t| query.matches(t)).cloned().collect()
            })
            .await;
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn create_task(&self, tenant: &Tenant, task: NewTask) -> RepoResult<Task> {
        self.write(tenant, |data| -> RepoResult<Task> {
            let assignee = match task.assignee_id {
                Some(id) => Some(data.authors(&[id])?.remove(0)),
                None => None,
            };
            let now = Utc::now();
            let created = Task {
                id: Uuid::new_v4(),
                project_id: task.project_id,
                title: task.title,
                description: task.description,
                status: task.status,
                priority: task.priority,
                assignee,
                due_date: task.due_date,
                tags: task.tags,
                created_by: task.created_by,
                created_at: now,
                updated_at: now,
            };
            data.tasks.push(created.clone());
            Ok(created)
        })
        .await
    }

    async fn update_task(&self, tenant: &Tenant, task_id: Uuid, patch: TaskPatch) -> RepoResult<Task> {
        self.write(tenant, |data| -> RepoResult<Task> {
            let assignee = match patch.assignee_id {
                Some(id) => Some(data.authors(&[id])?.remove(0)),
                None => None,
            };
            let task = data
                .tasks
                .iter_mut()
                .find(|t| t.id == task_id)
                .ok_or_else(|| not_found("task", task_id))?;

            if let Some(title) = patch.title {
                task.title = title;
            }
            if let Some(description) = patch.description {
                task.description = Some(description);
            }
            if let Some(status) = patch.status {
                task.status = status;
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if assignee.is_some() {
                task.assignee = assignee;
            }
            if let Some(due_date) = patch.due_date {
                task.due_date = Some(due_date);
            }
            if let Some(tags) = patch.tags {
                task.tags = tags;
            }
            task.updated_at = Utc::now();
            Ok(task.clone())
        })
        .await
    }
}

// =============================================================================
//  REUNIÕES
// =============================================================================

#[async_trait]
impl MeetingRepository for MockRepository {
    async fn list_meetings(&self, tenant: &Tenant, query: &MeetingQuery) -> RepoResult<Vec<Meeting>> {
        let mut meetings: Vec<Meeting> = self
            .read(tenant, |data| {
                data.meetings
                    .iter()
                    .filter(|m| query.overlaps(m))
                    .cloned()
                    .collect()
            })
            .await;
        meetings.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        Ok(meetings)
    }

    async fn create_meeting(&self, tenant: &Tenant, meeting: NewMeeting) -> RepoResult<Meeting> {
        self.write(tenant, |data| -> RepoResult<Meeting> {
            let attendees = data.authors(&meeting.attendee_ids)?;
            let created = Meeting {
                id: Uuid::new_v4(),
                title: meeting.title,
                description: meeting.description,
                start_time: meeting.start_time,
                end_time: meeting.end_time,
                location: meeting.location,
                meeting_url: meeting.meeting_url,
                organizer: meeting.organizer,
                attendees,
                created_at: Utc::now(),
            };
            data.meetings.push(created.clone());
            Ok(created)
        })
        .await
    }
}

// =============================================================================
//  DIRETÓRIO
// =============================================================================

#[async_trait]
impl UserRepository for MockRepository {
    async fn list_users(&self, tenant: &Tenant) -> RepoResult<Vec<DirectoryUser>> {
        let mut users = self.read(tenant, |data| data.users.clone()).await;
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn find_user(&self, tenant: &Tenant, user_id: Uuid) -> RepoResult<Option<DirectoryUser>> {
        Ok(self
            .read(tenant, |data| data.users.iter().find(|u| u.id == user_id).cloned())
            .await)
    }
}

// =============================================================================
//  ANALYTICS
// =============================================================================

#[async_trait]
impl AnalyticsRepository for MockRepository {
    async fn overview(&self, tenant: &Tenant) -> RepoResult<AnalyticsOverview> {
        let now = Utc::now();
        let week_ago = now - Duration::days(7);
        let overview = self
            .read(tenant, |data| {
                let count = |n: usize| n as i64;
                AnalyticsOverview {
                    active_users: count(
                        data.users
                            .iter()
                            .filter(|u| u.status != PresenceStatus::Offline)
                            .count(),
                    ),
                    posts_this_week: count(
                        data.posts.iter().filter(|p| p.created_at >= week_ago).count(),
                    ),
                    messages_this_week: count(
                        data.messages.iter().filter(|m| m.created_at >= week_ago).count(),
                    ),
                    open_tasks: count(
                        data.tasks.iter().filter(|t| t.status != TaskStatus::Done).count(),
                    ),
                    completed_tasks: count(
                        data.tasks.iter().filter(|t| t.status == TaskStatus::Done).count(),
                    ),
                    upcoming_meetings: count(
                        data.meetings.iter().filter(|m| m.start_time >= now).count(),
                    ),
                    open_tickets: count(
                        data.tickets
                            .iter()
                            .filter(|t| matches!(t.status, TicketStatus::Open | TicketStatus::InProgress))
                            .count(),
                    ),
                }
            })
            .await;
        Ok(overview)
    }
}

// =============================================================================
//  SUPORTE
// =============================================================================

#[async_trait]
impl SupportRepository for MockRepository {
    async fn list_tickets(&self, tenant: &Tenant, query: &TicketQuery) -> RepoResult<Vec<SupportTicket>> {
        let mut tickets: Vec<SupportTicket> = self
            .read(tenant, |data| {
                data.tickets
                    .iter()
                    .filter(|t| query.status.is_none_or(|s| t.status == s))
                    .cloned()
                    .collect()
            })
            .await;
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tickets)
    }

    async fn create_ticket(&self, tenant: &Tenant, ticket: NewTicket) -> RepoResult<SupportTicket> {
        let now = Utc::now();
        let created = SupportTicket {
            id: Uuid::new_v4(),
            subject: ticket.subject,
            description: ticket.description,
            status: TicketStatus::Open,
            priority: ticket.priority,
            requester: ticket.requester,
            created_at: now,
            updated_at: now,
        };
        self.write(tenant, |data| data.tickets.push(created.clone()))
            .await;
        Ok(created)
    }
}
