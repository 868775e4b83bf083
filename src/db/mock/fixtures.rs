// src/db/mock/fixtures.rs
//
// Dados de demonstração. Os ids são fixos para que testes e o front-end
// possam referenciá-los; os horários são relativos ao momento da semeadura.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::json;
use uuid::Uuid;

use super::{MockChannel, MockMember, TenantData};
use crate::models::{
    chat::Message,
    content::{Attachment, Author, Reaction},
    docs::Document,
    feed::{Post, PostType},
    forms::{FieldType, Form, FormField, FormResponse},
    meetings::Meeting,
    support::{SupportTicket, TicketPriority, TicketStatus},
    tasks::{Task, TaskPriority, TaskStatus},
    users::{DirectoryUser, PresenceStatus, User},
};

const fn fixture_id(kind: u128, n: u128) -> Uuid {
    Uuid::from_u128((kind << 16) | n)
}

pub mod ids {
    use super::fixture_id;
    use uuid::Uuid;

    pub const SARAH: Uuid = fixture_id(0x01, 1);
    pub const MARCUS: Uuid = fixture_id(0x01, 2);
    pub const EMILY: Uuid = fixture_id(0x01, 3);
    pub const DAVID: Uuid = fixture_id(0x01, 4);

    pub const POST_KICKOFF: Uuid = fixture_id(0x02, 1);
    pub const POST_DESIGN_SYSTEM: Uuid = fixture_id(0x02, 2);
    pub const POST_KUDOS: Uuid = fixture_id(0x02, 3);

    pub const CHANNEL_GENERAL: Uuid = fixture_id(0x03, 1);
    pub const CHANNEL_DESIGN: Uuid = fixture_id(0x03, 2);
    pub const CHANNEL_LEADERSHIP: Uuid = fixture_id(0x03, 3);

    pub const DOC_HANDBOOK: Uuid = fixture_id(0x04, 1);
    pub const DOC_ROADMAP: Uuid = fixture_id(0x04, 2);
    pub const DOC_API_GUIDE: Uuid = fixture_id(0x04, 3);

    pub const FORM_PULSE: Uuid = fixture_id(0x05, 1);
    pub const FIELD_MOOD: Uuid = fixture_id(0x05, 0x101);
    pub const FIELD_BLOCKERS: Uuid = fixture_id(0x05, 0x102);
    pub const FIELD_TEAM: Uuid = fixture_id(0x05, 0x103);

    pub const PROJECT_WEBSITE: Uuid = fixture_id(0x06, 0x100);
    pub const PROJECT_MOBILE: Uuid = fixture_id(0x06, 0x200);
    pub const TASK_HERO: Uuid = fixture_id(0x06, 1);
    pub const TASK_PRICING: Uuid = fixture_id(0x06, 2);
    pub const TASK_PUSH: Uuid = fixture_id(0x06, 3);
    pub const TASK_RELEASE: Uuid = fixture_id(0x06, 4);

    pub const MEETING_STANDUP: Uuid = fixture_id(0x07, 1);
    pub const MEETING_REVIEW: Uuid = fixture_id(0x07, 2);
    pub const MEETING_RETRO: Uuid = fixture_id(0x07, 3);

    pub const TICKET_SSO: Uuid = fixture_id(0x08, 1);
    pub const TICKET_EXPORT: Uuid = fixture_id(0x08, 2);
}

/// Usuário da sessão quando a requisição não traz token.
pub fn demo_user() -> User {
    User {
        id: ids::SARAH,
        name: "Sarah Chen".to_string(),
        avatar_url: Some(avatar("sarah")),
    }
}

fn avatar(handle: &str) -> String {
    format!("https://i.pravatar.cc/150?u={handle}")
}

fn directory() -> Vec<DirectoryUser> {
    let person = |id, name: &str, handle: &str, title: &str, department: &str, status| DirectoryUser {
        id,
        name: name.to_string(),
        email: format!("{handle}@acme.io"),
        avatar_url: Some(avatar(handle)),
        title: Some(title.to_string()),
        department: Some(department.to_string()),
        status,
    };
    vec![
        person(ids::SARAH, "Sarah Chen", "sarah", "Head of Product", "Product", PresenceStatus::Online),
        person(ids::MARCUS, "Marcus Johnson", "marcus", "Engineering Manager", "Engineering", PresenceStatus::Away),
        person(ids::EMILY, "Emily Rodriguez", "emily", "Product Designer", "Design", PresenceStatus::Online),
        person(ids::DAVID, "David Kim", "david", "Frontend Engineer", "Engineering", PresenceStatus::Offline),
    ]
}

fn author_of(users: &[DirectoryUser], id: Uuid) -> Author {
    users
        .iter()
        .find(|u| u.id == id)
        .map(|u| Author {
            id: u.id,
            name: u.name.clone(),
            avatar_url: u.avatar_url.clone(),
        })
        .unwrap_or(Author {
            id,
            name: "Unknown".to_string(),
            avatar_url: None,
        })
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub(crate) fn seed(now: DateTime<Utc>) -> TenantData {
    let users = directory();
    let who = |id| author_of(&users, id);

    // --- Feed (mais novo primeiro) ---
    let posts = vec![
        Post {
            id: ids::POST_KICKOFF,
            author: who(ids::SARAH),
            content: "Q3 planning kicks off Monday. Please add your team's top three bets to the roadmap doc before then.".into(),
            post_type: PostType::Announcement,
            ai_tags: tags(&["planning", "announcement", "roadmap"]),
            attachments: vec![],
            reactions: vec![Reaction {
                emoji: "👍".into(),
                count: 2,
                user_ids: vec![ids::MARCUS, ids::DAVID],
            }],
            comment_count: 4,
            created_at: now - Duration::hours(2),
            updated_at: now - Duration::hours(2),
        },
        Post {
            id: ids::POST_DESIGN_SYSTEM,
            author: who(ids::EMILY),
            content: "The new design system components are live in Figma: buttons, inputs and the updated color tokens.".into(),
            post_type: PostType::Update,
            ai_tags: tags(&["design", "ui", "frontend"]),
            attachments: vec![Attachment {
                id: fixture_id(0x09, 1),
                name: "design-system-v2.fig".into(),
                url: "https://files.acme.io/design-system-v2.fig".into(),
                mime_type: Some("application/octet-stream".into()),
                size_bytes: Some(4_812_311),
            }],
            reactions: vec![Reaction {
                emoji: "🎉".into(),
                count: 3,
                user_ids: vec![ids::SARAH, ids::MARCUS, ids::DAVID],
            }],
            comment_count: 2,
            created_at: now - Duration::hours(5),
            updated_at: now - Duration::hours(5),
        },
        Post {
            id: ids::POST_KUDOS,
            author: who(ids::MARCUS),
            content: "Huge shoutout to David for shipping the onboarding flow redesign two days early!".into(),
            post_type: PostType::Kudos,
            ai_tags: tags(&["kudos", "design", "onboarding"]),
            attachments: vec![],
            reactions: vec![],
            comment_count: 0,
            created_at: now - Duration::days(1),
            updated_at: now - Duration::days(1),
        },
    ];

    // --- Chat ---
    let member = |user_id, last_read_at| MockMember { user_id, last_read_at };
    let channels = vec![
        MockChannel {
            id: ids::CHANNEL_GENERAL,
            name: "general".into(),
            description: Some("Company-wide announcements and chatter".into()),
            is_private: false,
            created_at: now - Duration::days(90),
            members: vec![
                member(ids::SARAH, Some(now - Duration::minutes(40))),
                member(ids::MARCUS, Some(now - Duration::minutes(5))),
                member(ids::EMILY, None),
                member(ids::DAVID, Some(now - Duration::minutes(5))),
            ],
        },
        MockChannel {
            id: ids::CHANNEL_DESIGN,
            name: "design".into(),
            description: Some("Design reviews and critiques".into()),
            is_private: false,
            created_at: now - Duration::days(60),
            members: vec![
                member(ids::SARAH, Some(now - Duration::hours(3))),
                member(ids::EMILY, Some(now - Duration::hours(1))),
                member(ids::DAVID, None),
            ],
        },
        MockChannel {
            id: ids::CHANNEL_LEADERSHIP,
            name: "leadership".into(),
            description: Some("Private planning for leads".into()),
            is_private: true,
            created_at: now - Duration::days(30),
            members: vec![
                member(ids::SARAH, Some(now - Duration::days(1))),
                member(ids::MARCUS, Some(now - Duration::days(1))),
            ],
        },
    ];

    let message = |n, channel_id, sender, content: &str, ago: Duration| Message {
        id: fixture_id(0x0a, n),
        channel_id,
        sender: who(sender),
        content: content.to_string(),
        attachments: vec![],
        reactions: vec![],
        created_at: now - ago,
        edited_at: None,
    };
    let messages = vec![
        message(5, ids::CHANNEL_LEADERSHIP, ids::MARCUS, "Can we move the hiring sync to Thursday?", Duration::hours(20)),
        message(3, ids::CHANNEL_DESIGN, ids::EMILY, "Uploaded the new onboarding mocks, feedback welcome.", Duration::hours(2)),
        message(1, ids::CHANNEL_GENERAL, ids::SARAH, "Morning all! Reminder that the all-hands is at 3pm.", Duration::hours(1)),
        message(4, ids::CHANNEL_DESIGN, ids::DAVID, "Looks great. I'll start on the empty states.", Duration::minutes(50)),
        message(2, ids::CHANNEL_GENERAL, ids::MARCUS, "Deploy to staging is done, please smoke test.", Duration::minutes(30)),
        message(6, ids::CHANNEL_GENERAL, ids::DAVID, "Smoke tests pass on my side.", Duration::minutes(10)),
    ];

    // --- Documentos ---
    let documents = vec![
        Document {
            id: ids::DOC_ROADMAP,
            title: "Q3 Roadmap".into(),
            content: "Themes: self-serve onboarding, mobile parity, enterprise SSO. Each theme lists owners, milestones and risks.".into(),
            folder: Some("Product".into()),
            author: who(ids::SARAH),
            ai_summary: None,
            tags: tags(&["roadmap", "planning"]),
            created_at: now - Duration::days(3),
            updated_at: now - Duration::hours(6),
        },
        Document {
            id: ids::DOC_API_GUIDE,
            title: "API Style Guide".into(),
            content: "Use plural nouns for collections, JSON bodies everywhere, and return {code, message, details} on errors.".into(),
            folder: Some("Engineering".into()),
            author: who(ids::MARCUS),
            ai_summary: Some("Conventions for REST endpoints and error bodies.".into()),
            tags: tags(&["api", "guidelines"]),
            created_at: now - Duration::days(20),
            updated_at: now - Duration::days(2),
        },
        Document {
            id: ids::DOC_HANDBOOK,
            title: "Employee Handbook".into(),
            content: "Welcome to Acme! This handbook covers time off, benefits, remote work and our values.".into(),
            folder: Some("People".into()),
            author: who(ids::SARAH),
            ai_summary: None,
            tags: tags(&["handbook", "onboarding"]),
            created_at: now - Duration::days(120),
            updated_at: now - Duration::days(15),
        },
    ];

    // --- Formulários ---
    let forms = vec![Form {
        id: ids::FORM_PULSE,
        title: "Weekly Pulse".into(),
        description: Some("Two minutes to tell us how the week went.".into()),
        fields: vec![
            FormField {
                id: ids::FIELD_MOOD,
                label: "How was your week?".into(),
                field_type: FieldType::Rating,
                required: true,
                options: vec![],
            },
            FormField {
                id: ids::FIELD_TEAM,
                label: "Which team are you on?".into(),
                field_type: FieldType::SingleChoice,
                required: true,
                options: tags(&["Product", "Design", "Engineering", "People"]),
            },
            FormField {
                id: ids::FIELD_BLOCKERS,
                label: "Anything blocking you?".into(),
                field_type: FieldType::LongText,
                required: false,
                options: vec![],
            },
        ],
        response_count: 1,
        is_published: true,
        created_by: who(ids::SARAH),
        created_at: now - Duration::days(14),
    }];

    let (mood, team, blockers) = (
        ids::FIELD_MOOD.to_string(),
        ids::FIELD_TEAM.to_string(),
        ids::FIELD_BLOCKERS.to_string(),
    );
    let responses = vec![FormResponse {
        id: fixture_id(0x05, 0x201),
        form_id: ids::FORM_PULSE,
        respondent: who(ids::DAVID),
        answers: json!({
            mood: 4,
            team: "Engineering",
            blockers: "Waiting on API keys for staging."
        }),
        submitted_at: now - Duration::days(2),
    }];

    // --- Tarefas ---
    let today = now.date_naive();
    let due = |days: i64| today.checked_add_signed(Duration::days(days));
    let task = |id, project_id, title: &str, status, priority, assignee: Option<Uuid>, due_date: Option<NaiveDate>, labels: &[&str], ago: Duration| Task {
        id,
        project_id: Some(project_id),
        title: title.to_string(),
        description: None,
        status,
        priority,
        assignee: assignee.map(who),
        due_date,
        tags: tags(labels),
        created_by: who(ids::SARAH),
        created_at: now - ago,
        updated_at: now - ago,
    };
    let tasks = vec![
        task(ids::TASK_HERO, ids::PROJECT_WEBSITE, "Redesign landing page hero", TaskStatus::InProgress, TaskPriority::High, Some(ids::EMILY), due(3), &["design", "website"], Duration::days(4)),
        task(ids::TASK_PRICING, ids::PROJECT_WEBSITE, "Update pricing table copy", TaskStatus::Todo, TaskPriority::Medium, Some(ids::SARAH), due(7), &["copy"], Duration::days(2)),
        task(ids::TASK_PUSH, ids::PROJECT_MOBILE, "Push notification opt-in flow", TaskStatus::Review, TaskPriority::Urgent, Some(ids::DAVID), due(1), &["mobile"], Duration::days(6)),
        task(ids::TASK_RELEASE, ids::PROJECT_MOBILE, "Publish 2.4 release notes", TaskStatus::Done, TaskPriority::Low, None, None, &["release"], Duration::days(9)),
    ];

    // --- Reuniões ---
    let meeting = |id, title: &str, start: Duration, minutes: i64, organizer, attendees: &[Uuid], url: Option<&str>| Meeting {
        id,
        title: title.to_string(),
        description: None,
        start_time: now + start,
        end_time: now + start + Duration::minutes(minutes),
        location: None,
        meeting_url: url.map(str::to_string),
        organizer: who(organizer),
        attendees: attendees.iter().copied().map(who).collect(),
        created_at: now - Duration::days(7),
    };
    let meetings = vec![
        meeting(ids::MEETING_RETRO, "Sprint retro", Duration::days(-2), 60, ids::MARCUS, &[ids::SARAH, ids::DAVID, ids::EMILY], None),
        meeting(ids::MEETING_STANDUP, "Daily standup", Duration::hours(18), 15, ids::MARCUS, &[ids::DAVID, ids::EMILY], Some("https://meet.acme.io/standup")),
        meeting(ids::MEETING_REVIEW, "Design review: onboarding", Duration::days(2), 45, ids::EMILY, &[ids::SARAH, ids::DAVID], Some("https://meet.acme.io/design-review")),
    ];

    // --- Suporte ---
    let tickets = vec![
        SupportTicket {
            id: ids::TICKET_EXPORT,
            subject: "CSV export times out".into(),
            description: "Exporting more than 10k rows from analytics never finishes.".into(),
            status: TicketStatus::InProgress,
            priority: TicketPriority::High,
            requester: who(ids::DAVID),
            created_at: now - Duration::days(1),
            updated_at: now - Duration::hours(3),
        },
        SupportTicket {
            id: ids::TICKET_SSO,
            subject: "Enable SSO for contractors".into(),
            description: "Contractors need Okta access with a restricted role.".into(),
            status: TicketStatus::Open,
            priority: TicketPriority::Normal,
            requester: who(ids::MARCUS),
            created_at: now - Duration::days(5),
            updated_at: now - Duration::days(5),
        },
    ];

    TenantData {
        users,
        posts,
        channels,
        messages,
        documents,
        forms,
        responses,
        tasks,
        meetings,
        tickets,
    }
}
