//! Integration tests for the HTTP API

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use luna_meter::core::{create_router, EmotionalMeter};
use serde_json::Value;
use tower::ServiceExt;

fn create_test_router() -> Router {
    create_router(EmotionalMeter::new(), None)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();
    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["level"], 0.5);
}

#[tokio::test]
async fn test_message_updates_shared_meter() {
    let app = create_test_router();

    let (status, json) = send(&app, "POST", "/meter/message", Some(r#"{"message": "You're so beautiful and sexy"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["old_level"], 0.5);
    assert!((json["new_level"].as_f64().unwrap() - 0.42).abs() < 1e-9);
    assert_eq!(json["state"], "balanced");
    assert_eq!(json["reason"], "M001_LUST_PULL");
    assert_eq!(json["breakdown"]["lust_hits"].as_array().unwrap().len(), 2);

    // Same meter behind the router
    let (_, status_json) = send(&app, "GET", "/meter", None).await;
    assert!((status_json["level"].as_f64().unwrap() - 0.42).abs() < 1e-9);
    assert_eq!(status_json["update_count"], 1);
}

#[tokio::test]
async fn test_release_through_api() {
    let app = create_test_router();

    let (status, _) = send(&app, "POST", "/meter/reset", Some(r#"{"target": 0.15}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = send(&app, "POST", "/meter/message", Some(r#"{"message": "so sexy"}"#)).await;
    assert_eq!(json["new_level"], 0.5);
    assert_eq!(json["release_event"]["release_type"], "sexual");
    assert_eq!(json["release_event"]["trigger"], "pure_lust_release");

    let (_, history) = send(&app, "GET", "/meter/history?limit=5", None).await;
    assert_eq!(history.as_array().unwrap().len(), 1);

    let (_, stats) = send(&app, "GET", "/meter/stats", None).await;
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["sexual"], 1);
}

#[tokio::test]
async fn test_interaction_endpoint() {
    let app = create_test_router();

    let (status, json) = send(&app, "POST", "/meter/interaction", Some(r#"{"kind": "focus", "intensity": 0.2}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert!((json["new_level"].as_f64().unwrap() - 0.7).abs() < 1e-9);
    assert_eq!(json["reason"], "M002_INTERACTION_WORK");

    let (_, json) = send(&app, "POST", "/meter/interaction", Some(r#"{"kind": "chat"}"#)).await;
    assert!((json["new_level"].as_f64().unwrap() - 0.65).abs() < 1e-9);
    assert_eq!(json["reason"], "M002_NATURAL_DECAY");
}

#[tokio::test]
async fn test_reset_targets() {
    let app = create_test_router();

    let (_, json) = send(&app, "POST", "/meter/reset", Some(r#"{"target": "lust"}"#)).await;
    assert_eq!(json["level"], 0.0);
    assert_eq!(json["state"], "pure_lust");

    let (_, json) = send(&app, "POST", "/meter/reset", Some(r#"{"target": "work"}"#)).await;
    assert_eq!(json["level"], 1.0);

    let (_, json) = send(&app, "POST", "/meter/reset", Some(r#"{"target": "balanced"}"#)).await;
    assert_eq!(json["level"], 0.5);
    assert_eq!(json["release_count"], 0);

    let (status, _) = send(&app, "POST", "/meter/reset", Some(r#"{"target": "sideways"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_lexicon_replacement() {
    let app = create_test_router();

    let (status, _) = send(&app, "PUT", "/meter/lexicons", Some(r#"{"work_words": {"chapter": 0.5}}"#)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, json) = send(&app, "POST", "/meter/message", Some(r#"{"message": "one more chapter"}"#)).await;
    assert!((json["new_level"].as_f64().unwrap() - 0.6).abs() < 1e-9);

    let (status, _) = send(&app, "PUT", "/meter/lexicons", Some(r#"{"lust_words": {"kiss": -2.0}}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_huge_lexicon_weights_keep_meter_bounded() {
    let app = create_test_router();
    let (status, _) = send(
        &app,
        "PUT",
        "/meter/lexicons",
        Some(r#"{"lust_words": {"aa": 1e308, "bb": 1e308}, "work_words": {"cc": 1e308, "dd": 1e308}}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = send(&app, "POST", "/meter/message", Some(r#"{"message": "aa bb cc dd"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let level = json["new_level"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&level));
}

#[tokio::test]
async fn test_lust_only_lexicon_update_keeps_work_table() {
    let app = create_test_router();
    let (status, _) = send(&app, "PUT", "/meter/lexicons", Some(r#"{"lust_words": {"moonlight": 0.5}}"#)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, json) = send(&app, "POST", "/meter/message", Some(r#"{"message": "so sexy"}"#)).await;
    assert_eq!(json["reason"], "M001_NO_SIGNAL");

    let (_, json) = send(&app, "POST", "/meter/message", Some(r#"{"message": "focus"}"#)).await;
    assert!((json["new_level"].as_f64().unwrap() - 0.58).abs() < 1e-9);
}

#[tokio::test]
async fn test_save_without_state_file_conflicts() {
    let app = create_test_router();
    let (status, _) = send(&app, "POST", "/meter/save", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_save_with_state_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meter.json");
    let app = create_router(EmotionalMeter::new(), Some(path.clone()));

    send(&app, "POST", "/meter/message", Some(r#"{"message": "focus"}"#)).await;
    let (status, json) = send(&app, "POST", "/meter/save", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["path"], path.display().to_string());

    let mut restored = EmotionalMeter::new();
    assert!(restored.load_state(&path).unwrap());
    assert!((restored.level() - 0.58).abs() < 1e-9);
}
