//! Collector config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use metricd_core::error::{CollectorError, Result};

pub use schema::{CollectorConfig, ServerSection};

/// Config file used when neither an argument nor `METRICD_CONFIG` is given.
pub const DEFAULT_PATH: &str = "metricd.yaml";

pub fn load_from_file(path: &str) -> Result<CollectorConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| CollectorError::Internal(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<CollectorConfig> {
    let cfg: CollectorConfig = serde_yaml::from_str(s)
        .map_err(|e| CollectorError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load an explicitly requested file, or fall back to [`DEFAULT_PATH`] and
/// then to built-in defaults when that file does not exist.
pub fn load(explicit: Option<&str>) -> Result<CollectorConfig> {
    match explicit {
        Some(path) => load_from_file(path),
        None if Path::new(DEFAULT_PATH).exists() => load_from_file(DEFAULT_PATH),
        None => {
            tracing::info!(path = DEFAULT_PATH, "config file not found, using defaults");
            Ok(CollectorConfig::default())
        }
    }
}
