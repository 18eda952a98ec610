//! Application configuration root

use serde::{Deserialize, Serialize};

use super::{LoggingConfig, ProvidersConfig};
use crate::constants::DEFAULT_HEALTH_TIMEOUT_MS;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Provider selection
    pub providers: ProvidersConfig,

    /// Per-entity repositories built on the database provider
    pub repositories: RepositoriesConfig,

    /// Health sweep settings
    pub health: HealthConfig,
}

/// Per-entity repository configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoriesConfig {
    /// Entities to build repositories for (e.g. `["client", "staff"]`)
    pub entities: Vec<String>,

    /// Prefix prepended to every table name
    pub table_prefix: String,
}

/// Health sweep configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Deadline for one sweep, in milliseconds
    pub timeout_ms: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_HEALTH_TIMEOUT_MS,
        }
    }
}

impl HealthConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}
