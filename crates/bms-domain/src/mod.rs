//! # Domain Layer
//!
//! Core contracts shared by every layer of the business management backend.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy and `Result` alias |
//! | [`constants`] | Provider category labels and key separators |
//! | [`ports`] | Provider port traits (database, auth, storage, email, payment, id, translation) |
//! | [`value_objects`] | Type-erased `Connection` and `Repository` handles |
//!
//! This crate has no knowledge of how providers are registered or composed;
//! that lives in `bms-application` (factories) and `bms-infrastructure`
//! (live instances, configuration, bootstrap).

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::ProviderLifecycle;
pub use value_objects::{Connection, Repository};
