//! Provider Lifecycle Port
//!
//! Every provider port extends [`ProviderLifecycle`]. Both capabilities are
//! optional: the default `health_check` reports healthy and the default
//! `close` has nothing to release, so an adapter only overrides what it
//! actually owns.

use crate::error::Result;
use async_trait::async_trait;

/// Health and shutdown capabilities of a live provider instance
///
/// # Example
///
/// ```no_run
/// use bms_domain::ports::ProviderLifecycle;
/// use bms_domain::Result;
///
/// struct Pool;
///
/// #[async_trait::async_trait]
/// impl ProviderLifecycle for Pool {
///     fn provider_name(&self) -> &str {
///         "pool"
///     }
///
///     async fn close(&self) -> Result<()> {
///         // drain connections
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait ProviderLifecycle: Send + Sync {
    /// Registered provider name (e.g. "postgres", "mock_db")
    fn provider_name(&self) -> &str;

    /// Probe whether the instance is currently serving correctly
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    /// Release every resource held by the instance
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
