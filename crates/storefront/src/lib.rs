//! Solstice Storefront library.
//!
//! This crate provides the demo storefront as a library, allowing it to be
//! tested end-to-end and reused by the binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod carts;
pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod filters;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::{Router, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// Build the complete application router with middleware attached.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running; the demo has no dependencies to
/// probe beyond that.
async fn health() -> &'static str {
    "ok"
}
