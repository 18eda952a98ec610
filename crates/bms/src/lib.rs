//! # Business Management Backend
//!
//! Facade over the provider registry crates plus the operator CLI.
//!
//! ## Architecture
//!
//! - `domain` - Provider ports, error taxonomy, opaque handles (bms-domain)
//! - `application` - Name-keyed factory registries (bms-application)
//! - `infrastructure` - Live instances, config, logging, bootstrap (bms-infrastructure)
//! - `providers` - In-memory reference adapters (bms-providers)
//!
//! ## Example
//!
//! ```
//! let factories = bms::default_factories();
//! let listing = bms::cli::provider_listing(&factories);
//! assert!(listing["repositories"].as_array().is_some_and(|keys| !keys.is_empty()));
//! ```

/// Domain layer - ports and types
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use bms_domain::*;
}

/// Application layer - factory registries and façades
pub mod application {
    pub use bms_application::*;
}

/// Infrastructure layer - live registry, config, logging and bootstrap
pub mod infrastructure {
    pub use bms_infrastructure::*;
}

/// Reference adapters
pub mod providers {
    pub use bms_providers::*;
}

pub mod cli;

use bms_application::ports::registry::ProviderFactories;

// Re-export commonly used domain types at the crate root
pub use domain::{Connection, Error, ProviderLifecycle, Repository, Result};

/// Factory tables with every adapter of `bms-providers` registered
pub fn default_factories() -> ProviderFactories {
    let factories = ProviderFactories::new();
    bms_providers::register_all(&factories);
    factories
}
