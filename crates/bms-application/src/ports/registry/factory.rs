//! Generic Provider Factory Registry
//!
//! One [`FactoryRegistry`] exists per provider category. It keeps three
//! independent name-keyed tables:
//!
//! | Table | Signature | Used for |
//! |-------|-----------|----------|
//! | factories | `Fn() -> Arc<T>` | Plain constructors |
//! | config transformers | `Fn(&RawConfig) -> Result<C>` | Raw key/value map to typed config |
//! | env builders | `Fn() -> Result<Arc<T>>` | Construction from process configuration |
//!
//! A name may be present in one table and absent from the others.
//!
//! ## Locking
//!
//! A single reader/writer lock guards all three tables. It is held only for
//! the map access itself: lookups clone the stored `Arc` and release the
//! guard before the constructor, transformer or builder runs, since those may
//! dial a database or read credential files.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bms_domain::error::{Error, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

/// Untyped key/value provider configuration
pub type RawConfig = serde_json::Map<String, serde_json::Value>;

/// Zero-argument provider constructor
pub type ProviderFactory<T> = Arc<dyn Fn() -> Arc<T> + Send + Sync>;

/// Raw config → typed config conversion
pub type ConfigTransformer<C> = Arc<dyn Fn(&RawConfig) -> Result<C> + Send + Sync>;

/// Self-contained builder reading process configuration
pub type EnvBuilder<T> = Arc<dyn Fn() -> Result<Arc<T>> + Send + Sync>;

struct Tables<T: ?Sized, C> {
    factories: HashMap<String, ProviderFactory<T>>,
    transformers: HashMap<String, ConfigTransformer<C>>,
    builders: HashMap<String, EnvBuilder<T>>,
}

impl<T: ?Sized, C> Default for Tables<T, C> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
            transformers: HashMap::new(),
            builders: HashMap::new(),
        }
    }
}

/// Name-keyed function store for one provider category
///
/// `T` is the category's port trait object (e.g. `dyn DatabaseProvider`),
/// `C` its typed configuration.
///
/// # Example
///
/// ```
/// use bms_application::ports::registry::FactoryRegistry;
/// use std::sync::Arc;
///
/// let registry: FactoryRegistry<str, ()> = FactoryRegistry::new("greeting");
/// registry.register_factory("english", || Arc::from("hello"));
///
/// let factory = registry.get_factory("english").expect("registered");
/// assert_eq!(&*factory(), "hello");
/// assert!(registry.get_factory("klingon").is_none());
/// ```
pub struct FactoryRegistry<T: ?Sized, C> {
    category: &'static str,
    tables: RwLock<Tables<T, C>>,
}

impl<T, C> FactoryRegistry<T, C>
where
    T: ?Sized + Send + Sync + 'static,
    C: 'static,
{
    /// Create an empty registry for `category` (used in errors and log fields)
    pub fn new(category: &'static str) -> Self {
        Self {
            category,
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Category label of this registry
    pub fn category(&self) -> &'static str {
        self.category
    }

    // Maps are never left half-written, so a poisoned guard is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, Tables<T, C>> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables<T, C>> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn log_registration(&self, table: &'static str, name: &str, replaced: bool) {
        if replaced {
            warn!(
                category = self.category,
                table,
                provider = name,
                "Registration replaced an existing entry (last registration wins)"
            );
        } else {
            debug!(category = self.category, table, provider = name, "Registered");
        }
    }

    // ------------------------------------------------------------------
    // Constructors
    // ------------------------------------------------------------------

    /// Store a constructor under `name`, replacing any previous one
    pub fn register_factory<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        let name = name.into();
        let replaced = self
            .write()
            .factories
            .insert(name.clone(), Arc::new(factory))
            .is_some();
        self.log_registration("factory", &name, replaced);
    }

    /// Look up the constructor registered under `name`
    pub fn get_factory(&self, name: &str) -> Option<ProviderFactory<T>> {
        self.read().factories.get(name).cloned()
    }

    /// Names with a registered constructor, sorted
    pub fn list_factories(&self) -> Vec<String> {
        sorted_keys(&self.read().factories)
    }

    // ------------------------------------------------------------------
    // Config transformers
    // ------------------------------------------------------------------

    /// Store a config transformer under `name`, replacing any previous one
    pub fn register_config_transformer<F>(&self, name: impl Into<String>, transformer: F)
    where
        F: Fn(&RawConfig) -> Result<C> + Send + Sync + 'static,
    {
        let name = name.into();
        let replaced = self
            .write()
            .transformers
            .insert(name.clone(), Arc::new(transformer))
            .is_some();
        self.log_registration("config_transformer", &name, replaced);
    }

    /// Look up the config transformer registered under `name`
    pub fn get_config_transformer(&self, name: &str) -> Option<ConfigTransformer<C>> {
        self.read().transformers.get(name).cloned()
    }

    /// Names with a registered config transformer, sorted
    pub fn list_config_transformers(&self) -> Vec<String> {
        sorted_keys(&self.read().transformers)
    }

    /// Convert raw configuration for provider `name` into its typed config
    ///
    /// Fails with `NotRegistered` when no transformer exists for `name`;
    /// transformer failures are wrapped with the provider name.
    pub fn transform_config(&self, name: &str, raw: &RawConfig) -> Result<C> {
        let transformer = self
            .get_config_transformer(name)
            .ok_or_else(|| Error::not_registered(self.category, name))?;

        transformer(raw).map_err(|err| {
            warn!(
                category = self.category,
                provider = name,
                error = %err,
                "Config transform failed"
            );
            Error::transform(self.category, name, err)
        })
    }

    // ------------------------------------------------------------------
    // Env builders
    // ------------------------------------------------------------------

    /// Store an env builder under `name`, replacing any previous one
    pub fn register_build_from_env<F>(&self, name: impl Into<String>, builder: F)
    where
        F: Fn() -> Result<Arc<T>> + Send + Sync + 'static,
    {
        let name = name.into();
        let replaced = self
            .write()
            .builders
            .insert(name.clone(), Arc::new(builder))
            .is_some();
        self.log_registration("build_from_env", &name, replaced);
    }

    /// Look up the env builder registered under `name`
    pub fn get_build_from_env(&self, name: &str) -> Option<EnvBuilder<T>> {
        self.read().builders.get(name).cloned()
    }

    /// Names with a registered env builder, sorted
    pub fn list_build_from_env(&self) -> Vec<String> {
        sorted_keys(&self.read().builders)
    }

    /// Build a ready instance of provider `name` from process configuration
    ///
    /// Unknown names fail with `NotRegistered` without invoking anything.
    /// A builder failure is returned as `Build`, carrying the builder's own
    /// error untouched. Nothing is retried.
    pub fn build_from_env(&self, name: &str) -> Result<Arc<T>> {
        let Some(builder) = self.get_build_from_env(name) else {
            warn!(
                category = self.category,
                provider = name,
                available = ?self.list_build_from_env(),
                "Unknown provider requested"
            );
            return Err(Error::not_registered(self.category, name));
        };

        match builder() {
            Ok(instance) => {
                info!(category = self.category, provider = name, "Provider built from environment");
                Ok(instance)
            }
            Err(err) => {
                error!(
                    category = self.category,
                    provider = name,
                    error = %err,
                    "Provider build failed"
                );
                Err(Error::build(self.category, name, err))
            }
        }
    }

    /// Drop every entry from all three tables
    pub fn clear(&self) {
        let mut tables = self.write();
        tables.factories.clear();
        tables.transformers.clear();
        tables.builders.clear();
    }
}

impl<T: ?Sized, C> fmt::Debug for FactoryRegistry<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("FactoryRegistry")
            .field("category", &self.category)
            .field("factories", &sorted_keys(&tables.factories))
            .field("config_transformers", &sorted_keys(&tables.transformers))
            .field("build_from_env", &sorted_keys(&tables.builders))
            .finish()
    }
}

fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<String> {
    let mut names: Vec<String> = map.keys().cloned().collect();
    names.sort();
    names
}

/// Config transformer that deserializes the raw map with serde
///
/// Suitable for any config struct whose field names match the raw keys.
pub fn serde_transformer<C>() -> impl Fn(&RawConfig) -> Result<C> + Send + Sync + 'static
where
    C: DeserializeOwned + 'static,
{
    |raw: &RawConfig| Ok(serde_json::from_value(serde_json::Value::Object(raw.clone()))?)
}
