//! Email Delivery Provider Port

use crate::error::Result;
use crate::ports::lifecycle::ProviderLifecycle;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outgoing email
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Recipient addresses
    pub to: Vec<String>,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
    /// Optional HTML body
    pub html_body: Option<String>,
}

/// Transactional email backend
#[async_trait]
pub trait EmailProvider: ProviderLifecycle {
    /// Send a message, returning the backend's message id
    async fn send_email(&self, message: &EmailMessage) -> Result<String>;
}
