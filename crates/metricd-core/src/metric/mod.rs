//! Metric model: types, identifiers and stored values.
//!
//! - `id`: panic-free parser for `.../<type>/<name>/<value>` identifiers.
//! - `value`: the per-(type, name, source) cell stored by the repository.
//!
//! Parsing only checks lexical shape. Whether a value actually fits its
//! type is decided by the storage when the update is applied.

pub mod id;
pub mod value;

use std::fmt;
use std::str::FromStr;

use crate::error::CollectorError;

pub use id::MetricId;
pub use value::StoredValue;

/// Supported metric types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricType {
    /// Append-only history of integer reports.
    Counter,
    /// Last reported float wins.
    Gauge,
}

impl MetricType {
    /// Every supported type, in listing order.
    pub const ALL: [MetricType; 2] = [MetricType::Counter, MetricType::Gauge];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Counter => "counter",
            MetricType::Gauge => "gauge",
        }
    }
}

impl FromStr for MetricType {
    type Err = CollectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "counter" => Ok(MetricType::Counter),
            "gauge" => Ok(MetricType::Gauge),
            _ => Err(CollectorError::WrongMetricType),
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
