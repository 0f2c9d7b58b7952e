//! Service configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! { "default_page_size": 10, "simulated_latency_ms": 300 }
//! ```

use anyhow::{ensure, Context, Result};
use pipeline::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Number of records per home-screen shelf
const DEFAULT_HOME_FEED_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Page size for searches that do not name one
    pub default_page_size: usize,

    /// Delay applied before every query, to mimic a remote backend
    #[serde(rename = "simulated_latency_ms", with = "millis")]
    pub simulated_latency: Duration,

    /// Records per shelf on the home feed
    pub home_feed_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            simulated_latency: Duration::ZERO,
            home_feed_limit: DEFAULT_HOME_FEED_LIMIT,
        }
    }
}

impl ServiceConfig {
    /// Read a JSON config file; missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.default_page_size > 0, "default_page_size must be at least 1");
        Ok(())
    }

    /// Configure the default page size (default: 20)
    pub fn with_default_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = page_size;
        self
    }

    /// Configure the simulated latency (default: none)
    pub fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }

    /// Configure the home feed shelf size (default: 5)
    pub fn with_home_feed_limit(mut self, limit: usize) -> Self {
        self.home_feed_limit = limit;
        self
    }
}

/// A `Duration` stored as whole milliseconds
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
