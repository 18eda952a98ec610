// Clippy allows for complex patterns in infrastructure code
#![allow(clippy::collapsible_if)]

//! # Infrastructure Layer
//!
//! Live provider instances and the cross-cutting concerns around them.
//!
//! ### Provider Lifecycle
//! | Module | Description |
//! |--------|-------------|
//! | [`instances`] | Per-category store of live instances (enable/disable, health, close) |
//! | [`probe`] | Cancellation token and deadline carried by a health sweep |
//! | [`registry`] | Process-wide aggregate of every category's live instances |
//! | [`bootstrap`] | Composition root: config → providers → repositories |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-based layered configuration |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`health`] | Serializable readiness report |
//! | [`logging`] | Structured logging with tracing |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod health;
pub mod instances;
pub mod logging;
pub mod probe;
pub mod registry;

// Re-export commonly used types
pub use bootstrap::{Bootstrap, Infrastructure, RepositorySet};
pub use error_ext::ErrorContext;
pub use health::HealthReport;
pub use instances::InstanceRegistry;
pub use probe::ProbeContext;
pub use registry::Registry;
