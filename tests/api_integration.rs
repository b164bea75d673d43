//! Integration tests for the HTTP API
//!
//! Each test opens its own store in a temp directory.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::collections::HashSet;
use tempfile::TempDir;
use tower::ServiceExt;

use worldtree::core::{create_router, JsonStore};

fn create_test_router() -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open(dir.path()).unwrap();
    (create_router(store), dir)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _dir) = create_test_router();

    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], worldtree::VERSION);
    assert_eq!(json["entries"], 0);
    assert_eq!(json["analyses"], 0);
}

#[tokio::test]
async fn test_analyze_does_not_save() {
    let (app, _dir) = create_test_router();

    let (status, json) = send(
        &app,
        "POST",
        "/analyze",
        Some(json!({ "text": "I am so grateful for my family" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["word_count"], 7);
    let themes: Vec<&str> = json["themes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["theme"].as_str().unwrap())
        .collect();
    assert!(themes.contains(&"gratitude"));
    assert!(themes.contains(&"relationships"));
    assert!(json["questions"].as_array().unwrap().len() <= 5);

    let (_, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(health["entries"], 0);
}

#[tokio::test]
async fn test_entries_saved_and_trended() {
    let (app, dir) = create_test_router();

    let texts = [
        "I hope tomorrow is a calmer day",
        "Planning my future and the next few weeks",
        "I will finally start the project soon",
    ];
    for (i, text) in texts.iter().enumerate() {
        let (status, json) = send(
            &app,
            "POST",
            "/entries",
            Some(json!({ "content": text, "date": format!("2024-04-0{}T20:00:00", i + 1) })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["entry_id"].as_str().unwrap().starts_with("entry_"));
        assert!(json["analysis"]["themes"].is_array());
    }

    let (_, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(health["entries"], 3);
    assert_eq!(health["analyses"], 3);

    let (status, report) = send(&app, "GET", "/trends", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["analyses_count"], 3);
    assert_eq!(report["trends"][0]["theme"], "future");

    // persisted for the next process
    let reopened = JsonStore::open(dir.path()).unwrap();
    assert_eq!(reopened.entries().len(), 3);
}

#[tokio::test]
async fn test_repeated_entry_keeps_every_analysis() {
    let (app, _dir) = create_test_router();

    let body = json!({ "content": "same words", "date": "2024-04-02T08:00:00" });
    let mut ids = HashSet::new();
    for _ in 0..3 {
        let (status, json) = send(&app, "POST", "/entries", Some(body.clone())).await;
        assert_eq!(status, StatusCode::OK);
        ids.insert(json["entry_id"].as_str().unwrap().to_string());
    }
    assert_eq!(ids.len(), 3);

    let (_, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(health["entries"], 3);
    assert_eq!(health["analyses"], 3);
}

#[tokio::test]
async fn test_failed_write_stores_no_entry() {
    let (app, dir) = create_test_router();
    std::fs::create_dir(dir.path().join("analyses.json")).unwrap();

    let (status, _) = send(&app, "POST", "/entries", Some(json!({ "content": "will not stick" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(health["entries"], 0);
    assert_eq!(health["analyses"], 0);
    assert!(!dir.path().join("entries.json").exists());
}

#[tokio::test]
async fn test_empty_entry_rejected() {
    let (app, _dir) = create_test_router();

    let (status, _) = send(&app, "POST", "/entries", Some(json!({ "content": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_suggestions_for_new_journal() {
    let (app, _dir) = create_test_router();

    let (status, json) = send(&app, "GET", "/suggestions", None).await;
    assert_eq!(status, StatusCode::OK);

    let suggestions = json.as_array().unwrap();
    assert!(!suggestions.is_empty() && suggestions.len() <= 8);
    assert!(suggestions.iter().any(|s| s["type"] == "onboarding"));

    let priorities: Vec<u64> = suggestions.iter().map(|s| s["priority"].as_u64().unwrap()).collect();
    assert!(priorities.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_suggestion_usage_counted() {
    let (app, _dir) = create_test_router();

    let (status, json) = send(&app, "POST", "/suggestions/used", Some(json!({ "type": "weather" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);

    let (_, json) = send(&app, "POST", "/suggestions/used", Some(json!({ "type": "weather" }))).await;
    assert_eq!(json["type"], "weather");
    assert_eq!(json["count"], 2);
}

#[tokio::test]
async fn test_unknown_suggestion_type_rejected() {
    let (app, _dir) = create_test_router();

    let (status, _) = send(&app, "POST", "/suggestions/used", Some(json!({ "type": "astrology" }))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_behavior_logging_drives_prompts() {
    let (app, _dir) = create_test_router();

    let (_, json) = send(&app, "GET", "/prompts", None).await;
    assert_eq!(json, json!([]));

    for day in 1..=2 {
        let (status, json) = send(
            &app,
            "POST",
            "/behavior/workout",
            Some(json!({
                "workout_type": "run",
                "duration_minutes": 30,
                "timestamp": format!("2020-01-0{}T07:00:00", day),
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["records"], day);
    }

    // both workouts are years old
    let (_, json) = send(&app, "GET", "/prompts", None).await;
    let prompts = json.as_array().unwrap();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0]["type"], "workout");
    assert_eq!(prompts[0]["priority"], 8);

    let (status, json) = send(&app, "DELETE", "/behavior", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["records"], 0);

    let (_, json) = send(&app, "GET", "/prompts", None).await;
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn test_log_each_signal() {
    let (app, _dir) = create_test_router();

    let cases = [
        ("/behavior/sleep", json!({ "hours": 7.5, "quality": 4 })),
        ("/behavior/music", json!({ "track": "Holocene", "genre": "indie", "mood": "calm" })),
        ("/behavior/location", json!({ "name": "Park", "coordinates": { "latitude": 52.1, "longitude": 4.3 } })),
        ("/behavior/screen", json!({ "hours": 3.0, "app_categories": ["social"] })),
    ];
    for (uri, body) in cases {
        let (status, json) = send(&app, "POST", uri, Some(body)).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(json["records"], 1, "{}", uri);
    }
}
