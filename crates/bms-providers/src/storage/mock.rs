//! In-memory object storage

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use bms_application::ports::registry::storage::{
    StorageProviderConfig, register_storage_build_from_env, register_storage_config_transformer,
    register_storage_provider_factory,
};
use bms_application::ports::registry::{ProviderFactories, serde_transformer};
use bms_domain::error::{Error, Result};
use bms_domain::ports::{ProviderLifecycle, StorageProvider, StoredObject};
use serde::{Deserialize, Serialize};

use crate::constants::{MOCK_STORAGE_DEFAULT_BUCKET, MOCK_STORAGE_ENV_PREFIX, MOCK_STORAGE_PROVIDER};
use crate::env::from_env;

/// Mock storage settings, read from `BMS_MOCK_STORAGE_*`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockStorageConfig {
    pub bucket: String,
}

impl Default for MockStorageConfig {
    fn default() -> Self {
        Self {
            bucket: MOCK_STORAGE_DEFAULT_BUCKET.to_string(),
        }
    }
}

struct StoredBlob {
    data: Vec<u8>,
    content_type: String,
}

/// Object storage kept in process memory
#[derive(Default)]
pub struct MockStorageProvider {
    config: MockStorageConfig,
    objects: RwLock<HashMap<String, StoredBlob>>,
}

impl MockStorageProvider {
    pub fn new(config: MockStorageConfig) -> Self {
        Self {
            config,
            objects: RwLock::default(),
        }
    }

    pub fn from_env() -> Result<Self> {
        from_env::<MockStorageConfig>(MOCK_STORAGE_ENV_PREFIX).map(Self::new)
    }

    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }
}

#[async_trait]
impl ProviderLifecycle for MockStorageProvider {
    fn provider_name(&self) -> &str {
        MOCK_STORAGE_PROVIDER
    }

    async fn close(&self) -> Result<()> {
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }
}

#[async_trait]
impl StorageProvider for MockStorageProvider {
    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject> {
        if key.is_empty() {
            return Err(Error::storage("Object key cannot be empty"));
        }
        let size = data.len() as u64;
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                key.to_string(),
                StoredBlob {
                    data,
                    content_type: content_type.to_string(),
                },
            );

        Ok(StoredObject {
            key: key.to_string(),
            bucket: self.config.bucket.clone(),
            size,
            content_type: content_type.to_string(),
        })
    }

    async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .map(|blob| blob.data.clone())
            .ok_or_else(|| Error::not_found(format!("{}/{key}", self.config.bucket)))
    }

    async fn delete_object(&self, key: &str) -> Result<bool> {
        Ok(self
            .objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some())
    }
}

impl std::fmt::Debug for MockStorageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);
        let content_types: HashMap<&str, &str> = objects
            .iter()
            .map(|(key, blob)| (key.as_str(), blob.content_type.as_str()))
            .collect();
        f.debug_struct("MockStorageProvider")
            .field("bucket", &self.config.bucket)
            .field("objects", &content_types)
            .finish()
    }
}

/// Register `mock_storage`
pub fn register(factories: &ProviderFactories) {
    register_storage_provider_factory(factories, MOCK_STORAGE_PROVIDER, || {
        Arc::new(MockStorageProvider::default())
    });
    register_storage_config_transformer(
        factories,
        MOCK_STORAGE_PROVIDER,
        serde_transformer::<StorageProviderConfig>(),
    );
    register_storage_build_from_env(factories, MOCK_STORAGE_PROVIDER, || {
        Ok(Arc::new(MockStorageProvider::from_env()?))
    });
}
