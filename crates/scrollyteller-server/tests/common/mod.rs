//! Shared test helpers for server integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use scrollyteller_server::build_app;
use scrollyteller_server::manifest::StoryManifest;
use scrollyteller_server::state::AppState;
use scrollyteller_server::story::build_story;

/// Directory holding the fixture story.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Loads a fixture manifest and renders it against the fixtures directory.
pub async fn rendered_state(manifest: &str) -> AppState {
    let root = fixtures_dir();
    let manifest = StoryManifest::load(&root.join(manifest)).await.unwrap();
    let story = build_story(&manifest, &root).unwrap();
    let mut orchestrator = story.orchestrator;
    orchestrator.render().await.unwrap();
    AppState::new(orchestrator, story.graphs, story.detector)
}

/// Build the full app router over the rendered fixture story. Uses the same
/// route structure as `main.rs`.
pub async fn build_test_app() -> Router {
    build_app(rendered_state("story.yaml").await)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
