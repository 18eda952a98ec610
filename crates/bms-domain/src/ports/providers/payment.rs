//! Payment Provider Port

use crate::error::Result;
use crate::ports::lifecycle::ProviderLifecycle;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request to charge a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeRequest {
    /// Amount in the currency's minor unit (cents)
    pub amount_minor: u64,
    /// ISO 4217 currency code; the provider default applies when `None`
    pub currency: Option<String>,
    /// Customer reference
    pub customer_id: String,
    /// Free-form description shown on the statement
    pub description: Option<String>,
}

/// Result of a successful charge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeReceipt {
    /// Provider-side transaction id
    pub transaction_id: String,
    /// Charged amount in minor units
    pub amount_minor: u64,
    /// Currency actually charged
    pub currency: String,
}

/// Payment gateway
#[async_trait]
pub trait PaymentProvider: ProviderLifecycle {
    /// Charge a customer
    async fn charge(&self, request: &ChargeRequest) -> Result<ChargeReceipt>;
}
