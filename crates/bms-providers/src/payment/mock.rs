//! Always-approving payment provider

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bms_application::ports::registry::payment::{
    PaymentProviderConfig, register_payment_build_from_env, register_payment_config_transformer,
    register_payment_provider_factory,
};
use bms_application::ports::registry::{ProviderFactories, serde_transformer};
use bms_domain::error::{Error, Result};
use bms_domain::ports::{ChargeReceipt, ChargeRequest, PaymentProvider, ProviderLifecycle};
use serde::{Deserialize, Serialize};

use crate::constants::{
    MOCK_PAYMENT_DEFAULT_CURRENCY, MOCK_PAYMENT_ENV_PREFIX, MOCK_PAYMENT_PROVIDER,
};
use crate::env::from_env;

/// Mock payment settings, read from `BMS_MOCK_PAYMENT_*`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockPaymentConfig {
    /// Currency used when a charge does not name one
    pub currency: String,
}

impl Default for MockPaymentConfig {
    fn default() -> Self {
        Self {
            currency: MOCK_PAYMENT_DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Approves every positive charge
#[derive(Debug, Default)]
pub struct MockPaymentProvider {
    config: MockPaymentConfig,
    charges: AtomicU64,
}

impl MockPaymentProvider {
    pub fn new(config: MockPaymentConfig) -> Self {
        Self {
            config,
            charges: AtomicU64::new(0),
        }
    }

    pub fn from_env() -> Result<Self> {
        from_env::<MockPaymentConfig>(MOCK_PAYMENT_ENV_PREFIX).map(Self::new)
    }
}

#[async_trait]
impl ProviderLifecycle for MockPaymentProvider {
    fn provider_name(&self) -> &str {
        MOCK_PAYMENT_PROVIDER
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn charge(&self, request: &ChargeRequest) -> Result<ChargeReceipt> {
        if request.amount_minor == 0 {
            return Err(Error::payment("Charge amount must be positive"));
        }

        let sequence = self.charges.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ChargeReceipt {
            transaction_id: format!("mock_txn_{sequence}"),
            amount_minor: request.amount_minor,
            currency: request
                .currency
                .clone()
                .unwrap_or_else(|| self.config.currency.clone()),
        })
    }
}

/// Register `mock_payment`
pub fn register(factories: &ProviderFactories) {
    register_payment_provider_factory(factories, MOCK_PAYMENT_PROVIDER, || {
        Arc::new(MockPaymentProvider::default())
    });
    register_payment_config_transformer(
        factories,
        MOCK_PAYMENT_PROVIDER,
        serde_transformer::<PaymentProviderConfig>(),
    );
    register_payment_build_from_env(factories, MOCK_PAYMENT_PROVIDER, || {
        Ok(Arc::new(MockPaymentProvider::from_env()?))
    });
}
