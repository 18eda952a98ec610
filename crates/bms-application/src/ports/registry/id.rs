//! Id Provider Registry

use std::collections::HashMap;

use bms_domain::ports::IdProvider;
use serde::{Deserialize, Serialize};

/// Configuration for identifier generation provider creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdProviderConfig {
    /// Provider name (e.g., "uuid", "sequential")
    pub provider: String,
    /// Prefix prepended to generated ids
    pub prefix: Option<String>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl IdProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the id prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

provider_facade! {
    label: "id",
    port: IdProvider,
    config: IdProviderConfig,
    registry: IdProviderRegistry,
    accessor: id,
    register_factory: register_id_provider_factory,
    get_factory: get_id_provider_factory,
    list_factories: list_available_id_provider_factories,
    register_transformer: register_id_config_transformer,
    get_transformer: get_id_config_transformer,
    transform: transform_id_config,
    register_builder: register_id_build_from_env,
    get_builder: get_id_build_from_env,
    build: build_id_provider_from_env,
    list_builders: list_available_id_build_from_env,
}
