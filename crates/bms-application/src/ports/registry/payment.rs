//! Payment Provider Registry

use std::collections::HashMap;

use bms_domain::ports::PaymentProvider;
use serde::{Deserialize, Serialize};

/// Configuration for payment provider creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentProviderConfig {
    /// Provider name (e.g., "stripe", "asiapay", "mock_payment")
    pub provider: String,
    /// Secret API key
    pub api_key: Option<String>,
    /// Default ISO 4217 currency
    pub currency: Option<String>,
    /// Webhook signing secret
    pub webhook_secret: Option<String>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl PaymentProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the default currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

provider_facade! {
    label: "payment",
    port: PaymentProvider,
    config: PaymentProviderConfig,
    registry: PaymentProviderRegistry,
    accessor: payment,
    register_factory: register_payment_provider_factory,
    get_factory: get_payment_provider_factory,
    list_factories: list_available_payment_provider_factories,
    register_transformer: register_payment_config_transformer,
    get_transformer: get_payment_config_transformer,
    transform: transform_payment_config,
    register_builder: register_payment_build_from_env,
    get_builder: get_payment_build_from_env,
    build: build_payment_provider_from_env,
    list_builders: list_available_payment_build_from_env,
}
