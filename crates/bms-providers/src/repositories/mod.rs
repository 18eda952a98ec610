//! Per-entity Repositories
//!
//! Repository factories keyed by `provider:entity`. Only the mock database
//! ships repositories here.

pub mod mock;

pub use mock::MockEntityRepository;

use bms_application::ports::registry::ProviderFactories;

/// Register every repository factory
pub fn register(factories: &ProviderFactories) {
    mock::register(factories);
}
