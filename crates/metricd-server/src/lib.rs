//! metricd server library entry.
//!
//! Wires the core repository into an axum HTTP stack: config, shared state,
//! ingestion/listing handlers, ops endpoints and lifecycle. Consumed by the
//! binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod handlers;
pub mod obs;
pub mod ops;
pub mod router;
pub mod server;
