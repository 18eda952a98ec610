//! Object Storage Provider Port

use crate::error::Result;
use crate::ports::lifecycle::ProviderLifecycle;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Metadata of a stored object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    /// Object key inside the bucket
    pub key: String,
    /// Bucket or container name
    pub bucket: String,
    /// Size in bytes
    pub size: u64,
    /// MIME type
    pub content_type: String,
}

/// Blob storage backend
#[async_trait]
pub trait StorageProvider: ProviderLifecycle {
    /// Store an object, replacing any previous content under `key`
    async fn put_object(&self, key: &str, data: Vec<u8>, content_type: &str)
    -> Result<StoredObject>;

    /// Fetch an object's bytes
    async fn get_object(&self, key: &str) -> Result<Vec<u8>>;

    /// Delete an object, returning whether it existed
    async fn delete_object(&self, key: &str) -> Result<bool>;
}
