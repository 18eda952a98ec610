//! Payment Provider Implementations

pub mod mock;

pub use mock::{MockPaymentConfig, MockPaymentProvider};

use bms_application::ports::registry::ProviderFactories;

/// Register every payment adapter
pub fn register(factories: &ProviderFactories) {
    mock::register(factories);
}
