//! Authentication Provider Implementations

pub mod mock;

pub use mock::{MockAuthConfig, MockAuthProvider};

use bms_application::ports::registry::ProviderFactories;

/// Register every auth adapter
pub fn register(factories: &ProviderFactories) {
    mock::register(factories);
}
