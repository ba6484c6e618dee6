//! Collector self-observability.
//!
//! Counters and a latency histogram about the collector itself, stored as
//! atomics and rendered by the `/metrics` handler. This is unrelated to the
//! metrics agents push into the repository.

pub mod metrics;

pub use metrics::CollectorMetrics;
