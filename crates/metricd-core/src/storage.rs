//! In-memory metric storage.
//!
//! Layout: `type -> name -> source -> StoredValue`, behind a single `RwLock`.
//! - `update` takes the write lock, `list` the read lock.
//! - Nothing in here awaits or calls back into the storage while locked.
//! - Cells are created on the first accepted report and never removed.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bytes::Bytes;

use crate::error::{CollectorError, Result};
use crate::metric::{MetricId, MetricType, StoredValue};
use crate::repository::{Listing, Repository};

type BySource = BTreeMap<String, StoredValue>;
type ByName = BTreeMap<String, BySource>;
type Cells = BTreeMap<MetricType, ByName>;

/// Process-wide metric store.
///
/// Construct once at startup, then share via `Arc`.
#[derive(Debug)]
pub struct Storage {
    cells: RwLock<Cells>,
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage {
    /// Storage seeded with every supported type.
    pub fn new() -> Self {
        Self::with_types(MetricType::ALL)
    }

    /// Storage seeded with `types` only. Reports for any other type are
    /// rejected with `WrongMetricType`.
    pub fn with_types(types: impl IntoIterator<Item = MetricType>) -> Self {
        let cells = types.into_iter().map(|t| (t, ByName::new())).collect();
        Self {
            cells: RwLock::new(cells),
        }
    }

    /// Copy of one cell, if present.
    pub fn get(&self, kind: MetricType, name: &str, source: &str) -> Option<StoredValue> {
        self.read()
            .get(&kind)
            .and_then(|by_name| by_name.get(name))
            .and_then(|by_source| by_source.get(source))
            .cloned()
    }

    // Every write is a single push/assign, so a poisoned guard still holds
    // consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Cells> {
        self.cells.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Cells> {
        self.cells.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Repository for Storage {
    fn update(&self, source: &str, metric: &str) -> Result<()> {
        if source.is_empty() {
            return Err(CollectorError::WrongTarget);
        }
        let id = MetricId::parse(metric)?;
        let kind: MetricType = id.kind.parse()?;

        // Values are checked before any cell is created.
        let value = match kind {
            MetricType::Counter => id
                .value
                .parse::<i64>()
                .map(|v| StoredValue::CounterHistory(vec![v]))
                .map_err(|_| CollectorError::WrongMetricType),
            // Out-of-range literals parse to infinity; reject them.
            MetricType::Gauge => match id.value.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(StoredValue::GaugeValue(v)),
                _ => Err(CollectorError::WrongMetricType),
            },
        }?;

        let mut cells = self.write();
        let by_name = cells
            .get_mut(&kind)
            .ok_or(CollectorError::WrongMetricType)?;
        let by_source = by_name.entry(id.name.to_string()).or_default();

        let mut cell = match by_source.entry(source.to_string()) {
            Entry::Vacant(e) => {
                e.insert(value);
                return Ok(());
            }
            Entry::Occupied(e) => e,
        };
        match (cell.get_mut(), value) {
            (StoredValue::CounterHistory(history), StoredValue::CounterHistory(new)) => {
                history.extend(new);
            }
            (slot, value @ StoredValue::GaugeValue(_)) => {
                *slot = value;
            }
            (_, StoredValue::CounterHistory(_)) => {
                return Err(CollectorError::WrongMetricType);
            }
        }
        Ok(())
    }

    fn list(&self, _sources: &[&str]) -> Listing {
        let cells = self.read();
        let mut out = Listing::new();
        for (kind, by_name) in cells.iter() {
            for (name, by_source) in by_name {
                for (source, value) in by_source {
                    out.entry(source.clone())
                        .or_default()
                        .push(format!("{kind} - {name} - {value}"));
                }
            }
        }
        out
    }

    fn source_count(&self) -> usize {
        let cells = self.read();
        cells
            .values()
            .flat_map(|by_name| by_name.values())
            .flat_map(|by_source| by_source.keys())
            .collect::<BTreeSet<_>>()
            .len()
    }

    fn list_export_format(&self, _sources: &[&str]) -> Bytes {
        unimplemented!("export format for stored metrics is not defined")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn storage_with(kind: MetricType, name: &str, source: &str, value: StoredValue) -> Storage {
        let storage = Storage::new();
        storage
            .write()
            .entry(kind)
            .or_default()
            .entry(name.to_string())
            .or_default()
            .insert(source.to_string(), value);
        storage
    }

    #[test]
    fn counter_cell_with_wrong_shape_is_left_untouched() {
        let storage = storage_with(
            MetricType::Counter,
            "BlaBla",
            "1.1.1.1",
            StoredValue::GaugeValue(1.0),
        );

        let err = storage.update("1.1.1.1", "/counter/BlaBla/123").unwrap_err();
        assert_eq!(err, CollectorError::WrongMetricType);
        assert_eq!(
            storage.get(MetricType::Counter, "BlaBla", "1.1.1.1"),
            Some(StoredValue::GaugeValue(1.0))
        );
    }

    #[test]
    fn gauge_overwrites_any_existing_shape() {
        let storage = storage_with(
            MetricType::Gauge,
            "BlaBla",
            "1.1.1.1",
            StoredValue::CounterHistory(vec![1]),
        );

        storage.update("1.1.1.1", "/gauge/BlaBla/123").unwrap();
        assert_eq!(
            storage.get(MetricType::Gauge, "BlaBla", "1.1.1.1"),
            Some(StoredValue::GaugeValue(123.0))
        );
    }

    #[test]
    fn rejected_value_creates_no_cell() {
        let storage = Storage::new();
        storage.update("1.1.1.1", "/counter/BlaBla/1.5").unwrap_err();

        assert!(storage.read()[&MetricType::Counter].is_empty());
        assert!(storage.list(&[]).is_empty());
    }
}
