//! Stored metric cell.

use std::fmt;

/// Value held for one (type, name, source) triple.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    /// Every accepted counter report, in arrival order.
    CounterHistory(Vec<i64>),
    /// Latest gauge report.
    GaugeValue(f64),
}

impl fmt::Display for StoredValue {
    /// Counters render as `[2 3]`, gauges as a plain decimal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredValue::CounterHistory(history) => {
                f.write_str("[")?;
                for (i, v) in history.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            StoredValue::GaugeValue(v) => write!(f, "{v}"),
        }
    }
}
