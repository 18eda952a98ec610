//! Database Provider Port
//!
//! A database provider owns the live connection to one backend (document
//! store, relational store, in-memory mock). Repositories are built from
//! the connection it hands out, see `RepositoryFactories` in
//! `bms-application`.

use crate::ports::lifecycle::ProviderLifecycle;
use crate::value_objects::Connection;

/// Live database backend
pub trait DatabaseProvider: ProviderLifecycle {
    /// Provider-native connection handle used by repository factories
    fn connection(&self) -> Connection;
}
