//! Shared application state for the collector server.

use std::sync::Arc;

use metricd_core::Repository;

use crate::config::CollectorConfig;
use crate::obs::CollectorMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: CollectorConfig,
    repository: Arc<dyn Repository>,
    metrics: CollectorMetrics,
}

impl AppState {
    /// `repository` is the process-wide store; every handler shares it.
    pub fn new(cfg: CollectorConfig, repository: Arc<dyn Repository>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                repository,
                metrics: CollectorMetrics::default(),
            }),
        }
    }

    pub fn cfg(&self) -> &CollectorConfig {
        &self.inner.cfg
    }

    pub fn repository(&self) -> &dyn Repository {
        self.inner.repository.as_ref()
    }

    pub fn metrics(&self) -> &CollectorMetrics {
        &self.inner.metrics
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    /// Gauges computed on scrape.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        let sources = self.repository().source_count();
        vec![("metricd_sources", sources as u64)]
    }
}
