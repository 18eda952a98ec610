//! Database Provider Registry
//!
//! Façade over the database [`FactoryRegistry`](super::FactoryRegistry).
//! Adds nothing but category-specific names and the typed config.

use std::collections::HashMap;

use bms_domain::ports::DatabaseProvider;
use serde::{Deserialize, Serialize};

/// Configuration for database provider creation
///
/// Contains all configuration options that a database provider might need.
/// Providers should use what they need and ignore the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseProviderConfig {
    /// Provider name (e.g., "postgres", "firestore", "mock_db")
    pub provider: String,
    /// Connection URI or DSN
    pub uri: Option<String>,
    /// Database / project name
    pub database: Option<String>,
    /// Upper bound on pooled connections
    pub max_connections: Option<u32>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl DatabaseProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the connection URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the database name
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Set the pool size
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = Some(max_connections);
        self
    }

    /// Add extra configuration
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

provider_facade! {
    label: "database",
    port: DatabaseProvider,
    config: DatabaseProviderConfig,
    registry: DatabaseProviderRegistry,
    accessor: database,
    register_factory: register_database_provider_factory,
    get_factory: get_database_provider_factory,
    list_factories: list_available_database_provider_factories,
    register_transformer: register_database_config_transformer,
    get_transformer: get_database_config_transformer,
    transform: transform_database_config,
    register_builder: register_database_build_from_env,
    get_builder: get_database_build_from_env,
    build: build_database_provider_from_env,
    list_builders: list_available_database_build_from_env,
}
