//! Repository contract consumed by transport layers.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::error::Result;

/// Per-source listing: `source -> ["<type> - <name> - <value>", ...]`.
pub type Listing = BTreeMap<String, Vec<String>>;

/// Metric repository. Handlers hold this as `Arc<dyn Repository>`.
///
/// Implementations must keep the error taxonomy of `CollectorError` and make
/// every `update` atomic with respect to `list`.
pub trait Repository: Send + Sync {
    /// Apply one report from `source`. `metric` is the raw identifier,
    /// e.g. `/update/counter/PollCount/2`.
    fn update(&self, source: &str, metric: &str) -> Result<()>;

    /// Human-readable dump grouped by source. `sources` is accepted for
    /// forward compatibility and does not filter.
    fn list(&self, sources: &[&str]) -> Listing;

    /// Export exposition of stored metrics. No format is defined yet, so
    /// implementations abort instead of returning partial output.
    fn list_export_format(&self, sources: &[&str]) -> Bytes;

    /// Number of distinct sources with at least one stored cell.
    ///
    /// The default renders a full listing; implementations should count
    /// without formatting values.
    fn source_count(&self) -> usize {
        self.list(&[]).len()
    }
}
