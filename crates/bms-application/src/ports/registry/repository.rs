//! Repository Factory Registry
//!
//! Per-entity repositories are keyed by the composite `provider:entity` key.
//! A factory receives the provider's live [`Connection`] (or `None`) and the
//! backing table name, and returns a type-erased [`Repository`].
//!
//! The connection crosses an open boundary: each factory recovers its native
//! connection type with [`Connection::downcast`] and reports `TypeMismatch`
//! when handed something else.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use bms_domain::constants::{KEY_SEPARATOR, REPOSITORY_CATEGORY};
use bms_domain::error::{Error, Result};
use bms_domain::value_objects::{Connection, Repository};
use tracing::{debug, error, warn};

use super::ProviderFactories;

/// Per-entity repository constructor
pub type RepositoryFactory =
    Arc<dyn Fn(Option<&Connection>, &str) -> Result<Repository> + Send + Sync>;

/// Composite key of a repository factory
///
/// Neither part may contain [`KEY_SEPARATOR`]; the table refuses such names
/// so that `("a:b", "c")` and `("a", "b:c")` never share a key.
///
/// ```
/// use bms_application::ports::registry::repository_key;
///
/// assert_eq!(repository_key("mock_db", "client"), "mock_db:client");
/// ```
pub fn repository_key(provider: &str, entity: &str) -> String {
    format!("{provider}{KEY_SEPARATOR}{entity}")
}

fn check_key_parts(provider: &str, entity: &str) -> Result<()> {
    if provider.contains(KEY_SEPARATOR) || entity.contains(KEY_SEPARATOR) {
        return Err(Error::invalid_argument(format!(
            "Provider '{provider}' and entity '{entity}' cannot contain '{KEY_SEPARATOR}'"
        )));
    }
    Ok(())
}

/// Composite-key table of repository factories
#[derive(Default)]
pub struct RepositoryFactories {
    factories: RwLock<HashMap<String, RepositoryFactory>>,
}

impl RepositoryFactories {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the factory for `(provider, entity)`, replacing any previous one
    ///
    /// A pair containing the key separator is logged and ignored.
    pub fn register<F>(&self, provider: &str, entity: &str, factory: F)
    where
        F: Fn(Option<&Connection>, &str) -> Result<Repository> + Send + Sync + 'static,
    {
        if let Err(err) = check_key_parts(provider, entity) {
            error!(provider, entity, error = %err, "Repository factory rejected");
            return;
        }
        let key = repository_key(provider, entity);
        let replaced = self
            .factories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone(), Arc::new(factory))
            .is_some();

        if replaced {
            warn!(key = %key, "Repository factory replaced (last registration wins)");
        } else {
            debug!(key = %key, "Repository factory registered");
        }
    }

    /// Look up the factory for `(provider, entity)`
    pub fn get(&self, provider: &str, entity: &str) -> Option<RepositoryFactory> {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&repository_key(provider, entity))
            .cloned()
    }

    /// Build the repository for `(provider, entity)` over `table`
    ///
    /// Only the exact pair matches: `postgres:client` is not satisfied by a
    /// registered `firestore:client`. Names containing the key separator
    /// fail with `InvalidArgument`. The factory's own result, success or
    /// failure, is returned as is.
    pub fn create(
        &self,
        provider: &str,
        entity: &str,
        conn: Option<&Connection>,
        table: &str,
    ) -> Result<Repository> {
        check_key_parts(provider, entity)?;
        let factory = self.get(provider, entity).ok_or_else(|| {
            Error::not_registered(REPOSITORY_CATEGORY, repository_key(provider, entity))
        })?;
        factory(conn, table)
    }

    /// Whether a factory exists for exactly `(provider, entity)`
    pub fn contains(&self, provider: &str, entity: &str) -> bool {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&repository_key(provider, entity))
    }

    /// Every composite key, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    /// Entities with a factory for `provider`, sorted
    pub fn entities_for(&self, provider: &str) -> Vec<String> {
        let prefix = format!("{provider}{KEY_SEPARATOR}");
        let mut entities: Vec<String> = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
            .collect();
        entities.sort();
        entities
    }

    /// Drop every factory
    pub fn clear(&self) {
        self.factories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl fmt::Debug for RepositoryFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepositoryFactories")
            .field("keys", &self.keys())
            .finish()
    }
}

// ============================================================================
// Façade functions
// ============================================================================

/// Register the repository factory for `(provider, entity)`
pub fn register_repository_factory<F>(
    factories: &ProviderFactories,
    provider: &str,
    entity: &str,
    factory: F,
) where
    F: Fn(Option<&Connection>, &str) -> Result<Repository> + Send + Sync + 'static,
{
    factories.repositories().register(provider, entity, factory);
}

/// Build the repository for `(provider, entity)`, `NotRegistered` if absent
pub fn create_repository(
    factories: &ProviderFactories,
    provider: &str,
    entity: &str,
    conn: Option<&Connection>,
    table: &str,
) -> Result<Repository> {
    factories.repositories().create(provider, entity, conn, table)
}

/// Whether a repository factory exists for `(provider, entity)`
pub fn has_repository_factory(factories: &ProviderFactories, provider: &str, entity: &str) -> bool {
    factories.repositories().contains(provider, entity)
}

/// Every registered composite key, sorted
pub fn list_repository_factories(factories: &ProviderFactories) -> Vec<String> {
    factories.repositories().keys()
}

/// Entities with a repository factory for `provider`, sorted
pub fn list_entities_for_provider(factories: &ProviderFactories, provider: &str) -> Vec<String> {
    factories.repositories().entities_for(provider)
}
