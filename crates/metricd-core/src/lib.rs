//! metricd core: metric model, identifier parsing, repository contract and
//! the in-memory storage engine.
//!
//! This crate carries no transport or runtime dependencies. Servers program
//! against [`Repository`] and map [`CollectorError`] onto their own status
//! codes via [`ClientCode`].
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `CollectorError`/`Result`. The single deliberate abort is
//! [`Repository::list_export_format`], which has no defined output yet.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metric;
pub mod repository;
pub mod storage;

/// Shared result type.
pub use error::{ClientCode, CollectorError, Result};
pub use metric::{MetricId, MetricType, StoredValue};
pub use repository::{Listing, Repository};
pub use storage::Storage;
