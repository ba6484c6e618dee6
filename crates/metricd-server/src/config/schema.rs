use std::net::SocketAddr;

use serde::Deserialize;
use metricd_core::error::{CollectorError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
        }
    }
}

impl CollectorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(CollectorError::UnsupportedVersion);
        }

        self.server.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Upper bound for draining in-flight requests on shutdown.
    #[serde(default = "default_shutdown_timeout_ms")]
    pub shutdown_timeout_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            shutdown_timeout_ms: default_shutdown_timeout_ms(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(100..=60000).contains(&self.shutdown_timeout_ms) {
            return Err(CollectorError::BadConfig(
                "server.shutdown_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            CollectorError::BadConfig(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_shutdown_timeout_ms() -> u64 {
    1000
}
