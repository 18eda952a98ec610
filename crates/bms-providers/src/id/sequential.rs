//! Counter-based identifiers

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bms_application::ports::registry::id::{
    IdProviderConfig, register_id_build_from_env, register_id_config_transformer,
    register_id_provider_factory,
};
use bms_application::ports::registry::{ProviderFactories, serde_transformer};
use bms_domain::error::Result;
use bms_domain::ports::{IdProvider, ProviderLifecycle};

use super::IdConfig;
use crate::constants::{ID_ENV_PREFIX, SEQUENTIAL_ID_PROVIDER};
use crate::env::from_env;

/// Generates `prefix1`, `prefix2`, ... per instance
#[derive(Debug, Default)]
pub struct SequentialIdProvider {
    config: IdConfig,
    next: AtomicU64,
}

impl SequentialIdProvider {
    pub fn new(config: IdConfig) -> Self {
        Self {
            config,
            next: AtomicU64::new(0),
        }
    }

    pub fn from_env() -> Result<Self> {
        from_env::<IdConfig>(ID_ENV_PREFIX).map(Self::new)
    }
}

#[async_trait::async_trait]
impl ProviderLifecycle for SequentialIdProvider {
    fn provider_name(&self) -> &str {
        SEQUENTIAL_ID_PROVIDER
    }
}

impl IdProvider for SequentialIdProvider {
    fn generate_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}{n}", self.config.prefix)
    }
}

/// Register `sequential`
pub fn register(factories: &ProviderFactories) {
    register_id_provider_factory(factories, SEQUENTIAL_ID_PROVIDER, || {
        Arc::new(SequentialIdProvider::default())
    });
    register_id_config_transformer(
        factories,
        SEQUENTIAL_ID_PROVIDER,
        serde_transformer::<IdProviderConfig>(),
    );
    register_id_build_from_env(factories, SEQUENTIAL_ID_PROVIDER, || {
        Ok(Arc::new(SequentialIdProvider::from_env()?))
    });
}
