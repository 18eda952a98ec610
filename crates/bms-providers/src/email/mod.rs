//! Email Delivery Provider Implementations

pub mod mock;

pub use mock::{MockEmailConfig, MockEmailProvider};

use bms_application::ports::registry::ProviderFactories;

/// Register every email adapter
pub fn register(factories: &ProviderFactories) {
    mock::register(factories);
}
