//! Scrollyteller preview server.
//!
//! Loads a story manifest, renders it headlessly against the filesystem, and
//! exposes the rendered story over HTTP so step and resize notifications can
//! be replayed from any client.

pub mod config;
pub mod error;
pub mod graph;
pub mod manifest;
pub mod routes;
pub mod scaffold;
pub mod state;
pub mod story;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router over `state`.
pub fn build_app(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with the preview client's origin once it has a fixed host.
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/story", routes::story::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
