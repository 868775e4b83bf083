mod common;

use axum::http::StatusCode;
use chrono::{Duration, SecondsFormat, Utc};
use collab_api::db::mock::fixtures::ids;
use common::{mock_app, send, tenant_request};
use serde_json::json;

fn ids_of(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .expect("array")
        .iter()
        .map(|item| item["id"].as_str().expect("id").to_string())
        .collect()
}

// --- Docs ---

#[tokio::test]
async fn documents_are_listed_by_last_update_and_filtered_by_folder() {
    let app = mock_app();
    let (status, body) = send(&app, tenant_request("GET", "/api/docs", Some("t1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids_of(&body),
        vec![
            ids::DOC_ROADMAP.to_string(),
            ids::DOC_API_GUIDE.to_string(),
            ids::DOC_HANDBOOK.to_string()
        ]
    );

    let (_, body) = send(&app, tenant_request("GET", "/api/docs?folder=Engineering", Some("t1"), None)).await;
    assert_eq!(ids_of(&body), vec![ids::DOC_API_GUIDE.to_string()]);
}

#[tokio::test]
async fn summary_falls_back_and_is_stored() {
    let app = mock_app();
    let uri = format!("/api/docs/{}/summary", ids::DOC_HANDBOOK);
    let (status, doc) = send(&app, tenant_request("POST", &uri, Some("t1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["ai_summary"], "Summary unavailable.");

    let uri = format!("/api/docs/{}", ids::DOC_HANDBOOK);
    let (_, doc) = send(&app, tenant_request("GET", &uri, Some("t1"), None)).await;
    assert_eq!(doc["ai_summary"], "Summary unavailable.");
}

#[tokio::test]
async fn unknown_document_is_not_found() {
    let app = mock_app();
    let uri = format!("/api/docs/{}", uuid::Uuid::new_v4());
    let (status, body) = send(&app, tenant_request("GET", &uri, Some("t1"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

// --- Forms ---

#[tokio::test]
async fn response_missing_a_required_field_is_rejected() {
    let app = mock_app();
    let uri = format!("/api/forms/{}/responses", ids::FORM_PULSE);
    let mood = ids::FIELD_MOOD.to_string();
    let answers = json!({ "answers": { mood: 5 } });
    let (status, body) = send(&app, tenant_request("POST", &uri, Some("t1"), Some(answers))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .contains(&ids::FIELD_TEAM.to_string())
    );
}

#[tokio::test]
async fn choice_answer_outside_the_options_is_rejected() {
    let app = mock_app();
    let uri = format!("/api/forms/{}/responses", ids::FORM_PULSE);
    let (mood, team) = (ids::FIELD_MOOD.to_string(), ids::FIELD_TEAM.to_string());
    let answers = json!({ "answers": { mood: 5, team.clone(): "Marketing" } });
    let (status, body) = send(&app, tenant_request("POST", &uri, Some("t1"), Some(answers))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["message"].as_str().expect("message").contains(&team));

    let (_, responses) = send(&app, tenant_request("GET", &uri, Some("t1"), None)).await;
    assert_eq!(responses.as_array().expect("responses").len(), 1);
}

#[tokio::test]
async fn answers_not_keyed_by_field_id_fail_validation() {
    let app = mock_app();
    let uri = format!("/api/forms/{}/responses", ids::FORM_PULSE);
    let answers = json!({ "answers": { "mood": 5 } });
    let (status, body) = send(&app, tenant_request("POST", &uri, Some("t1"), Some(answers))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn complete_response_is_recorded() {
    let app = mock_app();
    let uri = format!("/api/forms/{}/responses", ids::FORM_PULSE);
    let (mood, team) = (ids::FIELD_MOOD.to_string(), ids::FIELD_TEAM.to_string());
    let answers = json!({ "answers": { mood: 5, team: "Design" } });
    let (status, response) = send(&app, tenant_request("POST", &uri, Some("t1"), Some(answers))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["respondent"]["id"], ids::SARAH.to_string());

    let (_, responses) = send(&app, tenant_request("GET", &uri, Some("t1"), None)).await;
    assert_eq!(responses.as_array().expect("responses").len(), 2);
    assert_eq!(responses[0]["id"], response["id"]);

    let form_uri = format!("/api/forms/{}", ids::FORM_PULSE);
    let (_, form) = send(&app, tenant_request("GET", &form_uri, Some("t1"), None)).await;
    assert_eq!(form["response_count"], 2);
}

#[tokio::test]
async fn choice_field_without_options_is_rejected() {
    let app = mock_app();
    let payload = json!({
        "title": "Lunch poll",
        "fields": [{ "label": "Where?", "field_type": "single_choice", "options": ["  "] }]
    });
    let (status, body) = send(&app, tenant_request("POST", "/api/forms", Some("t1"), Some(payload))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unpublished_form_does_not_accept_responses() {
    let app = mock_app();
    let payload = json!({
        "title": "Draft survey",
        "is_published": false,
        "fields": [{ "label": "Thoughts?", "field_type": "long_text" }]
    });
    let (status, form) = send(&app, tenant_request("POST", "/api/forms", Some("t1"), Some(payload))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(form["response_count"], 0);

    let uri = format!("/api/forms/{}/responses", form["id"].as_str().expect("id"));
    let (status, _) = send(&app, tenant_request("POST", &uri, Some("t1"), Some(json!({ "answers": {} })))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// --- Tasks ---

#[tokio::test]
async fn tasks_filter_by_project_and_status() {
    let app = mock_app();
    let uri = format!("/api/tasks?project_id={}", ids::PROJECT_WEBSITE);
    let (status, body) = send(&app, tenant_request("GET", &uri, Some("t1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids_of(&body),
        vec![ids::TASK_PRICING.to_string(), ids::TASK_HERO.to_string()]
    );

    let (_, body) = send(&app, tenant_request("GET", "/api/tasks?status=done", Some("t1"), None)).await;
    assert_eq!(ids_of(&body), vec![ids::TASK_RELEASE.to_string()]);
}

#[tokio::test]
async fn task_patch_only_touches_given_fields() {
    let app = mock_app();
    let uri = format!("/api/tasks/{}", ids::TASK_PRICING);
    let patch = json!({ "status": "in_progress", "assignee_id": ids::DAVID });
    let (status, task) = send(&app, tenant_request("PATCH", &uri, Some("t1"), Some(patch))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["status"], "in_progress");
    assert_eq!(task["assignee"]["id"], ids::DAVID.to_string());
    assert_eq!(task["title"], "Update pricing table copy");
    assert_eq!(task["priority"], "medium");
}

#[tokio::test]
async fn created_task_resolves_its_assignee() {
    let app = mock_app();
    let payload = json!({
        "title": "Write launch email",
        "priority": "high",
        "assignee_id": ids::EMILY,
        "tags": ["launch"]
    });
    let (status, task) = send(&app, tenant_request("POST", "/api/tasks", Some("t1"), Some(payload))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["status"], "todo");
    assert_eq!(task["assignee"]["name"], "Emily Rodriguez");
    assert_eq!(task["created_by"]["id"], ids::SARAH.to_string());
}

// --- Meetings ---

#[tokio::test]
async fn meetings_are_ordered_and_windowed() {
    let app = mock_app();
    let (status, body) = send(&app, tenant_request("GET", "/api/meetings", Some("t1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids_of(&body),
        vec![
            ids::MEETING_RETRO.to_string(),
            ids::MEETING_STANDUP.to_string(),
            ids::MEETING_REVIEW.to_string()
        ]
    );

    let start = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let uri = format!("/api/meetings?start={start}");
    let (_, body) = send(&app, tenant_request("GET", &uri, Some("t1"), None)).await;
    assert_eq!(
        ids_of(&body),
        vec![ids::MEETING_STANDUP.to_string(), ids::MEETING_REVIEW.to_string()]
    );
}

#[tokio::test]
async fn meeting_must_end_after_it_starts() {
    let app = mock_app();
    let start = Utc::now() + Duration::days(1);
    let payload = json!({
        "title": "Backwards",
        "start_time": start,
        "end_time": start - Duration::minutes(30),
    });
    let (status, body) = send(&app, tenant_request("POST", "/api/meetings", Some("t1"), Some(payload))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn created_meeting_lists_attendees_in_order() {
    let app = mock_app();
    let start = Utc::now() + Duration::days(3);
    let payload = json!({
        "title": "Launch sync",
        "start_time": start,
        "end_time": start + Duration::minutes(30),
        "attendee_ids": [ids::DAVID, ids::EMILY]
    });
    let (status, meeting) = send(&app, tenant_request("POST", "/api/meetings", Some("t1"), Some(payload))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(meeting["organizer"]["id"], ids::SARAH.to_string());
    assert_eq!(ids_of(&meeting["attendees"]), vec![ids::DAVID.to_string(), ids::EMILY.to_string()]);
}

#[tokio::test]
async fn repeated_attendees_are_stored_once() {
    let app = mock_app();
    let start = Utc::now() + Duration::days(4);
    let payload = json!({
        "title": "Roadmap review",
        "start_time": start,
        "end_time": start + Duration::hours(1),
        "attendee_ids": [ids::MARCUS, ids::MARCUS, ids::DAVID, ids::MARCUS]
    });
    let (status, meeting) = send(&app, tenant_request("POST", "/api/meetings", Some("t1"), Some(payload))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ids_of(&meeting["attendees"]), vec![ids::MARCUS.to_string(), ids::DAVID.to_string()]);
}

// --- Users / Analytics / Support ---

#[tokio::test]
async fn directory_is_sorted_by_name() {
    let app = mock_app();
    let (status, body) = send(&app, tenant_request("GET", "/api/users", Some("t1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .expect("users")
        .iter()
        .map(|u| u["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["David Kim", "Emily Rodriguez", "Marcus Johnson", "Sarah Chen"]);
}

#[tokio::test]
async fn analytics_overview_counts_the_fixtures() {
    let app = mock_app();
    let (status, body) = send(&app, tenant_request("GET", "/api/analytics/overview", Some("t1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "active_users": 3,
            "posts_this_week": 3,
            "messages_this_week": 6,
            "open_tasks": 3,
            "completed_tasks": 1,
            "upcoming_meetings": 2,
            "open_tickets": 2
        })
    );
}

#[tokio::test]
async fn new_ticket_is_open_and_listed_first() {
    let app = mock_app();
    let payload = json!({
        "subject": "Calendar sync broken",
        "description": "Meetings created today are missing from Google Calendar.",
        "priority": "urgent"
    });
    let (status, ticket) = send(&app, tenant_request("POST", "/api/support/tickets", Some("t1"), Some(payload))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ticket["status"], "open");
    assert_eq!(ticket["requester"]["id"], ids::SARAH.to_string());

    let (_, open) = send(&app, tenant_request("GET", "/api/support/tickets?status=open", Some("t1"), None)).await;
    assert_eq!(ids_of(&open), vec![ticket["id"].as_str().expect("id").to_string(), ids::TICKET_SSO.to_string()]);
}
