//! Configuration
//!
//! Layered application configuration: compiled defaults, then a TOML file,
//! then `BMS_` environment variables. See [`loader::ConfigLoader`].

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, HealthConfig, LoggingConfig, ProvidersConfig, RepositoriesConfig};
