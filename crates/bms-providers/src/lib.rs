//! # Business Management Backend - Provider Implementations
//!
//! In-memory reference adapters for every provider category. Each adapter
//! implements a port from `bms-domain` and exposes a `register` function
//! that adds its constructor, config transformer and env builder to a
//! [`ProviderFactories`].
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Database | `DatabaseProvider` | `mock_db` |
//! | Auth | `AuthProvider` | `mock_auth` |
//! | Storage | `StorageProvider` | `mock_storage` |
//! | Email | `EmailProvider` | `mock_email` |
//! | Payment | `PaymentProvider` | `mock_payment` |
//! | Id | `IdProvider` | `uuid`, `sequential` |
//! | Translation | `TranslationProvider` | `mock_translation` |
//!
//! Per-entity repositories over `mock_db` live in [`repositories`].
//!
//! ## Usage
//!
//! ```
//! use bms_application::ports::registry::ProviderFactories;
//! use bms_application::ports::registry::database::list_available_database_provider_factories;
//!
//! let factories = ProviderFactories::new();
//! bms_providers::register_all(&factories);
//!
//! assert_eq!(list_available_database_provider_factories(&factories), vec!["mock_db"]);
//! ```

pub use bms_domain::error::{Error, Result};

use bms_application::ports::registry::ProviderFactories;

/// Provider names and environment prefixes
pub mod constants;

/// Environment-driven adapter configuration
pub mod env;

pub mod auth;
pub mod database;
pub mod email;
pub mod id;
pub mod payment;
pub mod repositories;
pub mod storage;
pub mod translation;

/// Register every adapter of this crate, in a fixed order
pub fn register_all(factories: &ProviderFactories) {
    database::register(factories);
    repositories::register(factories);
    auth::register(factories);
    storage::register(factories);
    email::register(factories);
    payment::register(factories);
    id::register(factories);
    translation::register(factories);
}
