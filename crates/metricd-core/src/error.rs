//! Shared error type across metricd crates.

use thiserror::Error;

/// Client-facing error classes (stable API).
///
/// Transport layers map these onto their own status codes; the core never
/// depends on a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Malformed input (config, request shape).
    BadRequest,
    /// The metric identifier did not match the expected shape.
    NotFound,
    /// The metric type or value is not supported.
    NotImplemented,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::NotImplemented => "NOT_IMPLEMENTED",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Unified error type used by core and server.
///
/// The display text of the first three variants is sent back to agents
/// verbatim and must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectorError {
    /// Empty source identifier.
    #[error("wrong target")]
    WrongTarget,
    /// Identifier does not look like `.../<type>/<name>/<value>`.
    #[error("wrong metric format")]
    BadMetric,
    /// Unknown type, a value that does not fit its type, or a stored cell
    /// whose shape disagrees with its type.
    #[error("wrong metric type")]
    WrongMetricType,
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl CollectorError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            CollectorError::BadMetric => ClientCode::NotFound,
            CollectorError::WrongMetricType => ClientCode::NotImplemented,
            CollectorError::BadConfig(_) | CollectorError::UnsupportedVersion => {
                ClientCode::BadRequest
            }
            CollectorError::WrongTarget | CollectorError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Short snake_case label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            CollectorError::WrongTarget => "wrong_target",
            CollectorError::BadMetric => "bad_metric",
            CollectorError::WrongMetricType => "wrong_metric_type",
            CollectorError::BadConfig(_) => "bad_config",
            CollectorError::UnsupportedVersion => "unsupported_version",
            CollectorError::Internal(_) => "internal",
        }
    }
}
