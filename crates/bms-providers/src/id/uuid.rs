//! Random UUID identifiers

use std::sync::Arc;

use bms_application::ports::registry::id::{
    IdProviderConfig, register_id_build_from_env, register_id_config_transformer,
    register_id_provider_factory,
};
use bms_application::ports::registry::{ProviderFactories, serde_transformer};
use bms_domain::error::Result;
use bms_domain::ports::{IdProvider, ProviderLifecycle};

use super::IdConfig;
use crate::constants::{ID_ENV_PREFIX, UUID_ID_PROVIDER};
use crate::env::from_env;

/// Generates `prefix` + random v4 UUID
#[derive(Debug, Default)]
pub struct UuidIdProvider {
    config: IdConfig,
}

impl UuidIdProvider {
    pub fn new(config: IdConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Result<Self> {
        from_env::<IdConfig>(ID_ENV_PREFIX).map(Self::new)
    }
}

#[async_trait::async_trait]
impl ProviderLifecycle for UuidIdProvider {
    fn provider_name(&self) -> &str {
        UUID_ID_PROVIDER
    }
}

impl IdProvider for UuidIdProvider {
    fn generate_id(&self) -> String {
        format!("{}{}", self.config.prefix, ::uuid::Uuid::new_v4())
    }
}

/// Register `uuid`
pub fn register(factories: &ProviderFactories) {
    register_id_provider_factory(factories, UUID_ID_PROVIDER, || {
        Arc::new(UuidIdProvider::default())
    });
    register_id_config_transformer(
        factories,
        UUID_ID_PROVIDER,
        serde_transformer::<IdProviderConfig>(),
    );
    register_id_build_from_env(factories, UUID_ID_PROVIDER, || {
        Ok(Arc::new(UuidIdProvider::from_env()?))
    });
}
