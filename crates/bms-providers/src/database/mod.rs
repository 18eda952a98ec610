//! Database Provider Implementations
//!
//! | Provider | Type | Status |
//! |----------|------|--------|
//! | MockDatabaseProvider | In-memory | Complete |

pub mod mock;

pub use mock::{MockConnection, MockDatabaseConfig, MockDatabaseProvider};

use bms_application::ports::registry::ProviderFactories;

/// Register every database adapter
pub fn register(factories: &ProviderFactories) {
    mock::register(factories);
}
