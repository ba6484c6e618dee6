//! Metric identifier parsing (panic-free).
//!
//! Grammar, anchored at the end of the input:
//!
//! ```text
//! <any prefix> "/" <type> "/" <name> "/" <value>
//! type, name := [A-Za-z0-9_]+
//! value      := "-"? [0-9.]+   (at least one digit, at most one '.')
//! ```
//!
//! Rules:
//! - Never index into the input; work on split tokens and byte iterators.
//! - Any failure is `CollectorError::BadMetric`.

use crate::error::{CollectorError, Result};

/// Borrowed view of a parsed identifier.
///
/// `kind` is kept as the raw token: resolving it to a `MetricType` is the
/// storage's job so that an unknown type surfaces as `WrongMetricType`
/// rather than `BadMetric`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricId<'a> {
    pub kind: &'a str,
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> MetricId<'a> {
    /// Parse `raw` into (type, name, value).
    pub fn parse(raw: &'a str) -> Result<Self> {
        // value, name, type, prefix
        let mut parts = raw.rsplitn(4, '/');
        let value = parts.next().ok_or(CollectorError::BadMetric)?;
        let name = parts.next().ok_or(CollectorError::BadMetric)?;
        let kind = parts.next().ok_or(CollectorError::BadMetric)?;
        // The type token must itself be preceded by a '/'.
        if parts.next().is_none() {
            return Err(CollectorError::BadMetric);
        }

        if !is_word(kind) || !is_word(name) || !is_number_literal(value) {
            return Err(CollectorError::BadMetric);
        }

        Ok(Self { kind, name, value })
    }
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn is_number_literal(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    let mut digits = 0usize;
    let mut dots = 0usize;
    for b in body.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}
