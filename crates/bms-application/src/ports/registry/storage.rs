//! Storage Provider Registry

use std::collections::HashMap;

use bms_domain::ports::StorageProvider;
use serde::{Deserialize, Serialize};

/// Configuration for object storage provider creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageProviderConfig {
    /// Provider name (e.g., "gcs", "s3", "mock_storage")
    pub provider: String,
    /// Bucket or container
    pub bucket: Option<String>,
    /// Region
    pub region: Option<String>,
    /// Custom endpoint (S3-compatible stores, emulators)
    pub endpoint: Option<String>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl StorageProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the bucket
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }
}

provider_facade! {
    label: "storage",
    port: StorageProvider,
    config: StorageProviderConfig,
    registry: StorageProviderRegistry,
    accessor: storage,
    register_factory: register_storage_provider_factory,
    get_factory: get_storage_provider_factory,
    list_factories: list_available_storage_provider_factories,
    register_transformer: register_storage_config_transformer,
    get_transformer: get_storage_config_transformer,
    transform: transform_storage_config,
    register_builder: register_storage_build_from_env,
    get_builder: get_storage_build_from_env,
    build: build_storage_provider_from_env,
    list_builders: list_available_storage_build_from_env,
}
