//! Object Storage Provider Implementations

pub mod mock;

pub use mock::{MockStorageConfig, MockStorageProvider};

use bms_application::ports::registry::ProviderFactories;

/// Register every storage adapter
pub fn register(factories: &ProviderFactories) {
    mock::register(factories);
}
