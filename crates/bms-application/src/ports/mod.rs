//! Application Ports
//!
//! ## Organization
//!
//! - **registry/** - Provider factory registries and the repository factory table

/// Provider registry for name-based provider construction
pub mod registry;

pub use registry::{
    FactoryRegistry, ProviderFactories, RawConfig, RepositoryFactories, repository_key,
};
