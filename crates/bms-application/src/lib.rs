//! Application Layer - Provider Registry
//!
//! This crate holds the name-keyed factory tables that let infrastructure
//! adapters become selectable by name without any central switch statement.
//!
//! ## Architecture
//!
//! The application layer:
//! - Defines the generic [`FactoryRegistry`](ports::registry::FactoryRegistry) engine
//! - Binds it once per provider category behind statically typed façades
//! - Keeps the composite-key repository factory table
//! - Has no dependencies on infrastructure or concrete adapters
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `bms-domain`: ports, errors and connection handles
//! - Pure Rust libraries for serialization and logging

pub mod ports;

pub use ports::registry::{ProviderFactories, RawConfig};
