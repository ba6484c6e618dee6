//! Axum router wiring.
//!
//! The ingestion route accepts every method so that non-POST requests get
//! the collector's own 405 body instead of the framework default.

use axum::{
    routing::{any, get},
    Router,
};

use crate::{app_state::AppState, handlers, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/update/*metric", any(handlers::update))
        .route("/list", get(handlers::list))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
