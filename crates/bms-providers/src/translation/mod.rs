//! Translation Provider Implementations

pub mod mock;

pub use mock::{MockTranslationConfig, MockTranslationProvider};

use bms_application::ports::registry::ProviderFactories;

/// Register every translation adapter
pub fn register(factories: &ProviderFactories) {
    mock::register(factories);
}
