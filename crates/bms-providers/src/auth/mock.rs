//! Static token table authentication
//!
//! Accepts exactly the tokens it was configured with. Intended for local
//! runs and tests where no identity backend is reachable.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bms_application::ports::registry::auth::{
    AuthProviderConfig, register_auth_build_from_env, register_auth_config_transformer,
    register_auth_provider_factory,
};
use bms_application::ports::registry::{ProviderFactories, serde_transformer};
use bms_domain::error::{Error, Result};
use bms_domain::ports::{AuthIdentity, AuthProvider, ProviderLifecycle};
use serde::{Deserialize, Serialize};

use crate::constants::{MOCK_AUTH_ENV_PREFIX, MOCK_AUTH_PROVIDER};
use crate::env::from_env;

/// Mock auth settings, read from `BMS_MOCK_AUTH_*`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockAuthConfig {
    /// Accepted bearer tokens mapped to their subject
    pub tokens: HashMap<String, String>,
    /// Tenant stamped on every identity
    pub tenant_id: Option<String>,
    /// Roles granted to every identity
    pub roles: Vec<String>,
}

#[derive(Debug, Default)]
pub struct MockAuthProvider {
    config: MockAuthConfig,
}

impl MockAuthProvider {
    pub fn new(config: MockAuthConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Result<Self> {
        from_env::<MockAuthConfig>(MOCK_AUTH_ENV_PREFIX).map(Self::new)
    }

    /// Accept `token` as `subject`
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, subject: impl Into<String>) -> Self {
        self.config.tokens.insert(token.into(), subject.into());
        self
    }
}

#[async_trait]
impl ProviderLifecycle for MockAuthProvider {
    fn provider_name(&self) -> &str {
        MOCK_AUTH_PROVIDER
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn authenticate(&self, token: &str) -> Result<AuthIdentity> {
        let subject = self
            .config
            .tokens
            .get(token)
            .ok_or_else(|| Error::authentication("Unknown bearer token"))?;

        Ok(AuthIdentity {
            subject: subject.clone(),
            tenant_id: self.config.tenant_id.clone(),
            roles: self.config.roles.clone(),
        })
    }
}

/// Register `mock_auth`
pub fn register(factories: &ProviderFactories) {
    register_auth_provider_factory(factories, MOCK_AUTH_PROVIDER, || {
        Arc::new(MockAuthProvider::default())
    });
    register_auth_config_transformer(
        factories,
        MOCK_AUTH_PROVIDER,
        serde_transformer::<AuthProviderConfig>(),
    );
    register_auth_build_from_env(factories, MOCK_AUTH_PROVIDER, || {
        Ok(Arc::new(MockAuthProvider::from_env()?))
    });
}
