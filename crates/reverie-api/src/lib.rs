//! Reverie — HTTP surface.
//!
//! Runs a [`reverie_stage::Stage`] on its own task and exposes its snapshot
//! and input commands over axum.

pub mod config;
pub mod error;
pub mod occlusion;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the full router, matching what the binary serves.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/stage", routes::stage::router())
        .with_state(state)
}
