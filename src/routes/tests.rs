//! 라우터 전체를 `oneshot`으로 호출하는 HTTP 수준 테스트

use super::*;
use crate::ledger::{transitions::SKIPPED_NOTE, Ledger};
use crate::models::{SessionKind, StartSessionRequest};
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    app_with(SessionStore::new())
}

fn app_with(store: SessionStore) -> Router {
    let cors = cors_layer("http://localhost:4200").unwrap();
    build_router(AppState { store }, cors)
}

async fn send_raw(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(CONTENT_TYPE, "application/json");
    }
    let request = builder
        .body(Body::from(body.unwrap_or_default().to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = body.map(|b| b.to_string());
    let (status, text) = send_raw(app, method, uri, body.as_deref()).await;
    let value = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap()
    };
    (status, value)
}

/// 1분짜리 Work 세션을 5분 전에 시작해 둔 원장
fn overdue_store(kind: SessionKind) -> SessionStore {
    let mut ledger = Ledger::new();
    let req = StartSessionRequest {
        kind,
        duration_minutes: Some(1),
        notes: None,
    };
    ledger.start(req, Utc::now() - Duration::minutes(5)).unwrap();
    SessionStore::from_ledger(ledger)
}

#[tokio::test]
async fn full_lifecycle_scenario() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sessions/start",
        Some(json!({ "type": 0, "durationMinutes": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["status"], "Active");
    assert_eq!(body["type"], 0);
    assert_eq!(body["remainingSeconds"], 60);
    assert!(body["startTime"].as_str().unwrap().ends_with('Z'));

    let (status, body) = send(&app, Method::POST, "/api/sessions/pause/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Paused");
    assert!(body["elapsedSeconds"].as_u64().unwrap() <= 1);
    assert_eq!(body["lastUpdated"], Value::Null);

    let (status, body) = send(&app, Method::POST, "/api/sessions/resume/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Active");
    assert!(body["lastUpdated"].is_string());

    let (status, body) = send(&app, Method::POST, "/api/sessions/complete/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Session completed successfully" }));

    let (status, body) = send(&app, Method::GET, "/api/sessions/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Completed");
    assert_eq!(body["isCompleted"], true);
    assert_eq!(body["duration"], 1);
    assert_eq!(body["remainingSeconds"], 0);
    assert!(body["progressPercentage"].is_number());

    let (_, body) = send(&app, Method::GET, "/api/statistics", None).await;
    assert_eq!(
        body,
        json!({ "totalSessions": 1, "completedToday": 1, "currentStreak": 0, "bestStreak": 0 })
    );
}

#[tokio::test]
async fn second_start_is_rejected() {
    let app = app();
    let (status, _) = send(&app, Method::POST, "/api/sessions/start", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, "/api/sessions/start", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "There is already an active session");
    assert_eq!(body["code"], "invalid_state");
}

#[tokio::test]
async fn start_without_body_uses_defaults() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/sessions/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], 0);
    assert_eq!(body["durationMinutes"], 25);
    assert_eq!(body["notes"], "");
    assert_eq!(body["remainingSeconds"], 1500);
}

#[tokio::test]
async fn start_rejects_bad_input() {
    let app = app();
    for bad in [
        json!({ "type": 7 }),
        json!({ "durationMinutes": 0 }),
        json!({ "durationMinutes": "ten" }),
    ] {
        let (status, body) = send(&app, Method::POST, "/api/sessions/start", Some(bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "bad_request");
    }

    let (status, _) = send_raw(&app, Method::POST, "/api/sessions/start", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/api/sessions/active", None).await;
    assert_eq!(body["hasActiveSession"], false);
}

#[tokio::test]
async fn unknown_session_is_404() {
    let app = app();
    for (method, uri) in [
        (Method::POST, "/api/sessions/pause/99"),
        (Method::POST, "/api/sessions/resume/99"),
        (Method::POST, "/api/sessions/complete/99"),
        (Method::POST, "/api/sessions/skip/99"),
        (Method::DELETE, "/api/sessions/cancel/99"),
        (Method::DELETE, "/api/sessions/99"),
        (Method::GET, "/api/sessions/99"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"], "Session with ID 99 not found");
    }
}

#[tokio::test]
async fn wrong_state_messages_name_current_status() {
    let app = app();
    send(&app, Method::POST, "/api/sessions/start", None).await;

    let (status, body) = send(&app, Method::POST, "/api/sessions/resume/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Session is not currently paused. Current status: Active"
    );

    send(&app, Method::POST, "/api/sessions/complete/1", None).await;
    let (status, body) = send(&app, Method::POST, "/api/sessions/complete/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Session is already completed");

    let (_, body) = send(&app, Method::DELETE, "/api/sessions/cancel/1", None).await;
    assert_eq!(body["error"], "Cannot cancel a completed session");
}

#[tokio::test]
async fn complete_accepts_notes_and_completed_at() {
    let app = app();
    send(&app, Method::POST, "/api/sessions/start", None).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/sessions/complete/1",
        Some(json!({ "notes": "chapter two", "completedAt": "2026-10-18T09:20:00+00:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/sessions/1", None).await;
    assert_eq!(body["notes"], "chapter two");
    assert_eq!(body["completedAt"], "2026-10-18T09:20:00.000000Z");
}

#[tokio::test]
async fn skip_marks_notes_and_counts() {
    let app = app();
    send(&app, Method::POST, "/api/sessions/start", Some(json!({ "notes": "focus" }))).await;

    let (_, body) = send(&app, Method::POST, "/api/sessions/skip/1", None).await;
    assert_eq!(body["message"], "Session skipped successfully");

    let (_, body) = send(&app, Method::GET, "/api/sessions/1", None).await;
    assert_eq!(body["notes"], SKIPPED_NOTE);

    let (_, body) = send(&app, Method::GET, "/api/statistics", None).await;
    assert_eq!(body["totalSessions"], 1);
}

#[tokio::test]
async fn break_sessions_leave_statistics_unchanged() {
    let app = app();
    send(&app, Method::POST, "/api/sessions/start", Some(json!({ "type": 1, "durationMinutes": 5 }))).await;
    send(&app, Method::POST, "/api/sessions/complete/1", None).await;
    send(&app, Method::POST, "/api/sessions/start", Some(json!({ "type": 2, "durationMinutes": 15 }))).await;
    send(&app, Method::POST, "/api/sessions/skip/2", None).await;

    let (_, body) = send(&app, Method::GET, "/api/statistics", None).await;
    assert_eq!(body["totalSessions"], 0);
    assert_eq!(body["completedToday"], 0);
}

#[tokio::test]
async fn cancel_and_delete_keep_history() {
    let app = app();
    send(&app, Method::POST, "/api/sessions/start", None).await;
    let (status, body) = send(&app, Method::DELETE, "/api/sessions/cancel/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Session cancelled successfully");

    send(&app, Method::POST, "/api/sessions/start", None).await;
    let (status, body) = send(&app, Method::DELETE, "/api/sessions/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Session deleted successfully");

    let (status, body) = send(&app, Method::GET, "/api/sessions/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Cancelled");
    assert_eq!(body["isCompleted"], false);

    let (_, body) = send(&app, Method::DELETE, "/api/sessions/2", None).await;
    assert_eq!(body["error"], "Session is already cancelled");

    let (_, body) = send(&app, Method::GET, "/debug/sessions", None).await;
    assert_eq!(body["total_sessions"], 2);
}

#[tokio::test]
async fn active_reports_running_session() {
    let app = app();
    let (_, body) = send(&app, Method::GET, "/api/sessions/active", None).await;
    assert_eq!(body, json!({ "hasActiveSession": false, "message": "No active session" }));

    send(&app, Method::POST, "/api/sessions/start", Some(json!({ "durationMinutes": 10 }))).await;
    let (status, body) = send(&app, Method::GET, "/api/sessions/active", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasActiveSession"], true);
    assert_eq!(body["activeSession"]["id"], 1);
    assert!(body["activeSession"]["estimatedEndTime"].is_string());
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn paused_session_still_reports_estimated_end() {
    let app = app();
    send(&app, Method::POST, "/api/sessions/start", Some(json!({ "durationMinutes": 25 }))).await;

    let (_, paused) = send(&app, Method::POST, "/api/sessions/pause/1", None).await;
    assert_eq!(paused["status"], "Paused");
    assert!(paused["estimatedEndTime"].is_null());

    let (_, body) = send(&app, Method::GET, "/api/sessions/active", None).await;
    let active = &body["activeSession"];
    assert_eq!(active["status"], "Paused");
    assert!(active["remainingSeconds"].as_u64().unwrap() > 0);
    assert!(active["estimatedEndTime"].is_string());

    let (_, by_id) = send(&app, Method::GET, "/api/sessions/1", None).await;
    assert!(by_id["remainingSeconds"].as_u64().unwrap() > 0);
    assert!(by_id["estimatedEndTime"].is_string());
}

#[tokio::test]
async fn active_auto_completes_overdue_session() {
    let app = app_with(overdue_store(SessionKind::Work));

    let (status, body) = send(&app, Method::GET, "/api/sessions/active", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "hasActiveSession": false, "message": "Session automatically completed" })
    );

    let (_, body) = send(&app, Method::GET, "/api/statistics", None).await;
    assert_eq!(body["totalSessions"], 1);
    assert_eq!(body["completedToday"], 1);

    // 이미 끝난 세션은 pause할 수 없음
    let (status, body) = send(&app, Method::POST, "/api/sessions/pause/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Session is not currently active. Current status: Completed"
    );
}

#[tokio::test]
async fn auto_completed_break_is_not_counted() {
    let app = app_with(overdue_store(SessionKind::LongBreak));
    let (_, body) = send(&app, Method::GET, "/api/sessions/active", None).await;
    assert_eq!(body["hasActiveSession"], false);

    let (_, body) = send(&app, Method::GET, "/api/statistics", None).await;
    assert_eq!(body["totalSessions"], 0);
}

#[tokio::test]
async fn recent_and_today_list_completed_sessions() {
    let app = app();
    for _ in 0..3 {
        send(&app, Method::POST, "/api/sessions/start", None).await;
        let (_, active) = send(&app, Method::GET, "/api/sessions/active", None).await;
        let id = active["activeSession"]["id"].as_u64().unwrap();
        send(&app, Method::POST, &format!("/api/sessions/complete/{id}"), None).await;
    }
    send(&app, Method::POST, "/api/sessions/start", None).await;

    let (status, body) = send(&app, Method::GET, "/api/sessions/recent?count=2", None).await;
    assert_eq!(status, StatusCode::OK);
    let recent = body.as_array().unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0]["id"], 3);
    assert_eq!(recent[1]["id"], 2);
    assert!(recent.iter().all(|s| s["isCompleted"] == true));
    assert!(recent.iter().all(|s| s["progressPercentage"] == 100.0));
    assert!(recent.iter().all(|s| s["estimatedEndTime"].is_null()));

    let (_, body) = send(&app, Method::GET, "/api/sessions/recent", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = send(&app, Method::GET, "/api/sessions/today", None).await;
    let today: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_u64().unwrap())
        .collect();
    assert_eq!(today, vec![1, 2, 3]);
}

#[tokio::test]
async fn recent_falls_back_to_ten_on_unparsable_count() {
    let app = app();
    for id in 1..=12 {
        send(&app, Method::POST, "/api/sessions/start", None).await;
        send(&app, Method::POST, &format!("/api/sessions/skip/{id}"), None).await;
    }

    for uri in ["/api/sessions/recent?count=abc", "/api/sessions/recent?count=-3"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body.as_array().unwrap().len(), 10, "{uri}");
    }
}

#[tokio::test]
async fn non_numeric_id_gets_json_error() {
    let app = app();
    for (method, uri) in [
        (Method::GET, "/api/sessions/abc"),
        (Method::POST, "/api/sessions/pause/abc"),
        (Method::DELETE, "/api/sessions/cancel/x1"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "bad_request", "{uri}");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn complete_unknown_id_is_404_before_body_checks() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sessions/complete/7",
        Some(json!({ "completedAt": "not a time" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Session with ID 7 not found");
}

#[tokio::test]
async fn settings_default_and_replace() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["workDurationMinutes"], 25);
    assert_eq!(body["shortBreakDurationMinutes"], 5);
    assert_eq!(body["longBreakDurationMinutes"], 15);
    assert_eq!(body["sessionsUntilLongBreak"], 4);
    assert_eq!(body["playNotificationSounds"], true);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/settings",
        Some(json!({ "workDurationMinutes": 50, "dailyGoalSessions": 6 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["workDurationMinutes"], 50);
    assert_eq!(body["dailyGoalSessions"], 6);
    assert_eq!(body["shortBreakDurationMinutes"], 5);

    let (_, body) = send(&app, Method::POST, "/api/sessions/start", None).await;
    assert_eq!(body["durationMinutes"], 50);
    assert_eq!(body["remainingSeconds"], 3000);
}

#[tokio::test]
async fn settings_out_of_range_are_rejected() {
    let app = app();
    for bad in [
        json!({ "workDurationMinutes": 0 }),
        json!({ "workDurationMinutes": 61 }),
        json!({ "shortBreakDurationMinutes": 31 }),
        json!({ "longBreakDurationMinutes": 61 }),
        json!({ "sessionsUntilLongBreak": 1 }),
        json!({ "weeklyGoalSessions": 101 }),
        json!({ "workDurationMinutes": -5 }),
    ] {
        let (status, body) = send(&app, Method::POST, "/api/settings", Some(bad.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{bad}");
        assert_eq!(body["code"], "bad_request", "{bad}");
    }

    let (_, body) = send(&app, Method::POST, "/api/settings", Some(json!({ "shortBreakDurationMinutes": 31 }))).await;
    assert_eq!(
        body["error"],
        "Short break duration must be between 1 and 30 minutes"
    );

    let (_, body) = send(&app, Method::GET, "/api/settings", None).await;
    assert_eq!(body["workDurationMinutes"], 25);
    assert_eq!(body["shortBreakDurationMinutes"], 5);
}

#[tokio::test]
async fn timer_config_partial_update_and_reset() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/settings/timer-config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "workDuration": 25,
            "shortBreakDuration": 5,
            "longBreakDuration": 15,
            "sessionsUntilLongBreak": 4,
            "autoStartBreaks": false,
            "autoStartWork": false,
            "playNotificationSounds": true,
            "showDesktopNotifications": true
        })
    );

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/settings/timer-config",
        Some(json!({ "shortBreakDuration": 8, "autoStartBreaks": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["shortBreakDuration"], 8);
    assert_eq!(body["autoStartBreaks"], true);
    assert_eq!(body["workDuration"], 25);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/settings/timer-config",
        Some(json!({ "longBreakDuration": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::POST, "/api/sessions/start", Some(json!({ "type": 1 }))).await;
    assert_eq!(body["durationMinutes"], 8);

    let (status, body) = send(&app, Method::POST, "/api/settings/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["shortBreakDurationMinutes"], 5);
    assert_eq!(body["autoStartBreaks"], false);
}

#[tokio::test]
async fn health_is_plain_text() {
    let (status, text) = send_raw(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "Tomatick API is running!");
}

#[tokio::test]
async fn debug_dump_shape() {
    let app = app();
    send(&app, Method::POST, "/api/sessions/start", Some(json!({ "type": 1, "durationMinutes": 5 }))).await;

    let (status, body) = send(&app, Method::GET, "/debug/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_sessions"], 1);
    let entry = &body["sessions"][0];
    assert_eq!(entry["id"], 1);
    assert_eq!(entry["type"], 1);
    assert_eq!(entry["status"], "Active");
    assert_eq!(entry["isCompleted"], false);
    assert!(entry["remainingSeconds"].as_u64().unwrap() <= 300);
}

#[test]
fn cors_layer_accepts_wildcard_and_exact_origins() {
    assert!(cors_layer("*").is_ok());
    assert!(cors_layer("http://localhost:4200").is_ok());
    assert!(cors_layer("bad\norigin").is_err());
}
