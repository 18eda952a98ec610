//! Authentication Provider Port

use crate::error::Result;
use crate::ports::lifecycle::ProviderLifecycle;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Identity resolved from a bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    /// Stable subject identifier
    pub subject: String,
    /// Tenant (workspace) the subject belongs to
    pub tenant_id: Option<String>,
    /// Granted roles
    pub roles: Vec<String>,
}

/// Verifies credentials issued by an identity backend
#[async_trait]
pub trait AuthProvider: ProviderLifecycle {
    /// Resolve a bearer token into an identity
    async fn authenticate(&self, token: &str) -> Result<AuthIdentity>;
}
