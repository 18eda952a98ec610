//! Value Objects
//!
//! Type-erased handles that cross provider boundaries. Different providers
//! need different native connection types while entities are shared, so the
//! registry passes these handles through untouched and the concrete factory
//! performs a checked downcast.

pub mod handle;

pub use handle::{Connection, Repository};
