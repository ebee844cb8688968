//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use reverie_api::state::AppState;
use reverie_content::{Script, build_catalog};
use reverie_stage::StageConfig;
use reverie_stage::application::stage::DEFAULT_VIEWPORT;
use tower::ServiceExt;

/// Script with one scene of each kind, small enough to walk end to end.
pub const SHORT_SCRIPT: &str = r"
scenes:
  - { id: intro, kind: title_card, title: Hello, subtitle: Press A, scored: true }
  - id: quiz
    kind: choice
    title: Quiz
    prompt: Pick the cake
    options: [Email, Cake]
    correct: 1
    scored: true
  - { id: outro, kind: finale, title: Bye }
";

/// Launches a reduced-motion stage over `yaml` and waits until the first
/// scene is mounted.
pub async fn launch(yaml: &str) -> AppState {
    let catalog = build_catalog(&Script::from_yaml(yaml).unwrap()).unwrap();
    let config = StageConfig {
        reduced_motion: true,
        ..StageConfig::default()
    };
    let mut state = AppState::launch(catalog, config, DEFAULT_VIEWPORT);
    state
        .snapshot
        .wait_for(|s| s.current_scene.is_some())
        .await
        .unwrap();
    state
}

/// Build the full app router over a running stage. Uses the same route
/// structure as `main.rs`.
pub fn build_test_app(state: AppState) -> Router {
    reverie_api::app(state)
}

/// Waits until the stage publishes a snapshot on `scene`.
pub async fn wait_for_scene(state: &AppState, scene: &str) {
    let mut snapshot = state.snapshot.clone();
    snapshot
        .wait_for(|s| s.current_scene.as_ref().is_some_and(|id| id.as_str() == scene))
        .await
        .unwrap();
}

/// Send a POST request with an optional JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let body = body.map_or_else(Body::empty, |b| Body::from(serde_json::to_vec(b).unwrap()));
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
