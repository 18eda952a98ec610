//! Domain Port Interfaces
//!
//! Boundary contracts that infrastructure adapters implement.
//!
//! ## Organization
//!
//! - **lifecycle** - Health/close capabilities shared by every live provider
//! - **providers/** - One port per infrastructure capability category

/// Lifecycle capabilities of live provider instances
pub mod lifecycle;
/// Infrastructure capability ports
pub mod providers;

pub use lifecycle::ProviderLifecycle;
pub use providers::{
    AuthIdentity, AuthProvider, ChargeReceipt, ChargeRequest, DatabaseProvider, EmailMessage,
    EmailProvider, IdProvider, PaymentProvider, StorageProvider, StoredObject,
    TranslationProvider,
};
