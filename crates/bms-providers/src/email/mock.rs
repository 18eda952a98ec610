//! Outbox email provider
//!
//! Records every message instead of delivering it.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use bms_application::ports::registry::email::{
    EmailProviderConfig, register_email_build_from_env, register_email_config_transformer,
    register_email_provider_factory,
};
use bms_application::ports::registry::{ProviderFactories, serde_transformer};
use bms_domain::error::{Error, Result};
use bms_domain::ports::{EmailMessage, EmailProvider, ProviderLifecycle};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{MOCK_EMAIL_DEFAULT_SENDER, MOCK_EMAIL_ENV_PREFIX, MOCK_EMAIL_PROVIDER};
use crate::env::from_env;

/// Mock email settings, read from `BMS_MOCK_EMAIL_*`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockEmailConfig {
    pub sender: String,
}

impl Default for MockEmailConfig {
    fn default() -> Self {
        Self {
            sender: MOCK_EMAIL_DEFAULT_SENDER.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MockEmailProvider {
    config: MockEmailConfig,
    outbox: RwLock<Vec<EmailMessage>>,
}

impl MockEmailProvider {
    pub fn new(config: MockEmailConfig) -> Self {
        Self {
            config,
            outbox: RwLock::default(),
        }
    }

    pub fn from_env() -> Result<Self> {
        from_env::<MockEmailConfig>(MOCK_EMAIL_ENV_PREFIX).map(Self::new)
    }

    pub fn sender(&self) -> &str {
        &self.config.sender
    }

    /// Messages accepted so far, oldest first
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.outbox
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ProviderLifecycle for MockEmailProvider {
    fn provider_name(&self) -> &str {
        MOCK_EMAIL_PROVIDER
    }
}

#[async_trait]
impl EmailProvider for MockEmailProvider {
    async fn send_email(&self, message: &EmailMessage) -> Result<String> {
        if message.to.is_empty() {
            return Err(Error::invalid_argument("Email needs at least one recipient"));
        }

        let mut outbox = self.outbox.write().unwrap_or_else(PoisonError::into_inner);
        outbox.push(message.clone());
        let id = format!("mock-email-{}", outbox.len());
        debug!(
            id = %id,
            from = %self.config.sender,
            recipients = message.to.len(),
            "Email recorded"
        );
        Ok(id)
    }
}

/// Register `mock_email`
pub fn register(factories: &ProviderFactories) {
    register_email_provider_factory(factories, MOCK_EMAIL_PROVIDER, || {
        Arc::new(MockEmailProvider::default())
    });
    register_email_config_transformer(
        factories,
        MOCK_EMAIL_PROVIDER,
        serde_transformer::<EmailProviderConfig>(),
    );
    register_email_build_from_env(factories, MOCK_EMAIL_PROVIDER, || {
        Ok(Arc::new(MockEmailProvider::from_env()?))
    });
}
