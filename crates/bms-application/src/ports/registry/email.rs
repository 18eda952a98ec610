//! Email Provider Registry

use std::collections::HashMap;

use bms_domain::ports::EmailProvider;
use serde::{Deserialize, Serialize};

/// Configuration for email delivery provider creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailProviderConfig {
    /// Provider name (e.g., "gmail", "sendgrid", "mock_email")
    pub provider: String,
    /// Default sender address
    pub sender: Option<String>,
    /// API key
    pub api_key: Option<String>,
    /// API endpoint override
    pub endpoint: Option<String>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl EmailProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the sender address
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

provider_facade! {
    label: "email",
    port: EmailProvider,
    config: EmailProviderConfig,
    registry: EmailProviderRegistry,
    accessor: email,
    register_factory: register_email_provider_factory,
    get_factory: get_email_provider_factory,
    list_factories: list_available_email_provider_factories,
    register_transformer: register_email_config_transformer,
    get_transformer: get_email_config_transformer,
    transform: transform_email_config,
    register_builder: register_email_build_from_env,
    get_builder: get_email_build_from_env,
    build: build_email_provider_from_env,
    list_builders: list_available_email_build_from_env,
}
