//! Identifier Generation Provider Port

use crate::ports::lifecycle::ProviderLifecycle;

/// Generates entity identifiers
pub trait IdProvider: ProviderLifecycle {
    /// Produce a new unique identifier
    fn generate_id(&self) -> String;
}
