//! Connection and repository handles
//!
//! Both handles remember the concrete type they were built from so a failed
//! downcast can report the expected and the actual type instead of a bare
//! `None`.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

#[derive(Clone)]
struct Erased {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Erased {
    fn new<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            value,
            type_name: type_name::<T>(),
        }
    }

    fn is<T: Any>(&self) -> bool {
        (*self.value).is::<T>()
    }

    fn downcast<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        Arc::clone(&self.value)
            .downcast::<T>()
            .map_err(|_| Error::type_mismatch(type_name::<T>(), self.type_name))
    }
}

/// Provider-native connection handle
///
/// Wraps whatever a database provider connects with (a pool, a client, an
/// in-memory store). Repository factories recover the native value with
/// [`Connection::downcast`].
///
/// # Example
///
/// ```
/// use bms_domain::Connection;
///
/// struct Pool;
///
/// let conn = Connection::new(Pool);
/// assert!(conn.downcast::<Pool>().is_ok());
/// assert!(conn.downcast::<String>().unwrap_err().is_type_mismatch());
/// ```
#[derive(Clone)]
pub struct Connection {
    inner: Erased,
}

impl Connection {
    /// Wrap a native connection value
    pub fn new<N: Any + Send + Sync>(native: N) -> Self {
        Self::from_arc(Arc::new(native))
    }

    /// Wrap an already shared native connection value
    pub fn from_arc<N: Any + Send + Sync>(native: Arc<N>) -> Self {
        Self {
            inner: Erased::new(native),
        }
    }

    /// Concrete type name of the wrapped value
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name
    }

    /// Whether the wrapped value is an `N`
    pub fn is<N: Any>(&self) -> bool {
        self.inner.is::<N>()
    }

    /// Recover the native value, failing with `TypeMismatch` on the wrong type
    pub fn downcast<N: Any + Send + Sync>(&self) -> Result<Arc<N>> {
        self.inner.downcast::<N>()
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("type", &self.inner.type_name)
            .finish()
    }
}

/// Per-entity repository produced by a repository factory
///
/// Repositories for a trait-object port are usually stored as
/// `Arc<dyn Port>` and recovered with `downcast::<Arc<dyn Port>>()`.
#[derive(Clone)]
pub struct Repository {
    entity: String,
    table: String,
    inner: Erased,
}

impl Repository {
    /// Wrap a constructed repository
    pub fn new<R: Any + Send + Sync>(
        entity: impl Into<String>,
        table: impl Into<String>,
        repository: R,
    ) -> Self {
        Self::from_arc(entity, table, Arc::new(repository))
    }

    /// Wrap an already shared repository
    pub fn from_arc<R: Any + Send + Sync>(
        entity: impl Into<String>,
        table: impl Into<String>,
        repository: Arc<R>,
    ) -> Self {
        Self {
            entity: entity.into(),
            table: table.into(),
            inner: Erased::new(repository),
        }
    }

    /// Entity this repository serves
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Table or collection backing the repository
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Concrete type name of the wrapped repository
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name
    }

    /// Whether the wrapped repository is an `R`
    pub fn is<R: Any>(&self) -> bool {
        self.inner.is::<R>()
    }

    /// Recover the concrete repository, failing with `TypeMismatch` on the wrong type
    pub fn downcast<R: Any + Send + Sync>(&self) -> Result<Arc<R>> {
        self.inner.downcast::<R>()
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("entity", &self.entity)
            .field("table", &self.table)
            .field("type", &self.inner.type_name)
            .finish()
    }
}
