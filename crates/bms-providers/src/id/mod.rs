//! Identifier Generation Provider Implementations
//!
//! | Provider | Output | Use |
//! |----------|--------|-----|
//! | `uuid` | random v4 UUID | default |
//! | `sequential` | `1`, `2`, ... | deterministic tests |
//!
//! Both read an optional prefix from `BMS_ID_PREFIX`.

pub mod sequential;
pub mod uuid;

pub use sequential::SequentialIdProvider;
pub use uuid::UuidIdProvider;

use bms_application::ports::registry::ProviderFactories;
use serde::{Deserialize, Serialize};

/// Id provider settings, read from `BMS_ID_*`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdConfig {
    /// Prepended to every generated id
    pub prefix: String,
}

/// Register every id adapter
pub fn register(factories: &ProviderFactories) {
    uuid::register(factories);
    sequential::register(factories);
}
