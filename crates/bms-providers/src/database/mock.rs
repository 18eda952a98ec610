//! In-memory database provider
//!
//! Keeps JSON documents in named tables behind a [`MockConnection`]. The
//! connection is what repository factories downcast to.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use bms_application::ports::registry::database::{
    DatabaseProviderConfig, register_database_build_from_env, register_database_config_transformer,
    register_database_provider_factory,
};
use bms_application::ports::registry::{ProviderFactories, serde_transformer};
use bms_domain::error::{Error, Result};
use bms_domain::ports::{DatabaseProvider, ProviderLifecycle};
use bms_domain::value_objects::Connection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::constants::{
    MOCK_DATABASE_DEFAULT_NAME, MOCK_DATABASE_ENV_PREFIX, MOCK_DATABASE_PROVIDER,
};
use crate::env::from_env;

/// Mock database settings, read from `BMS_MOCK_DB_*`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockDatabaseConfig {
    /// Logical database name
    pub name: String,
    /// Make every health check fail
    pub fail_health: bool,
}

impl Default for MockDatabaseConfig {
    fn default() -> Self {
        Self {
            name: MOCK_DATABASE_DEFAULT_NAME.to_string(),
            fail_health: false,
        }
    }
}

type Table = BTreeMap<String, Value>;

/// In-memory table store shared by the provider and its repositories
#[derive(Debug, Default)]
pub struct MockConnection {
    tables: RwLock<HashMap<String, Table>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new document; fails if `id` already exists in `table`
    pub fn insert(&self, table: &str, id: &str, document: Value) -> Result<()> {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let rows = tables.entry(table.to_string()).or_default();
        if rows.contains_key(id) {
            return Err(Error::invalid_argument(format!(
                "Document '{id}' already exists in '{table}'"
            )));
        }
        rows.insert(id.to_string(), document);
        Ok(())
    }

    pub fn get(&self, table: &str, id: &str) -> Option<Value> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(table)
            .and_then(|rows| rows.get(id))
            .cloned()
    }

    /// Replace an existing document; `NotFound` if absent
    pub fn update(&self, table: &str, id: &str, document: Value) -> Result<()> {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let slot = tables
            .get_mut(table)
            .and_then(|rows| rows.get_mut(id))
            .ok_or_else(|| Error::not_found(format!("{table}/{id}")))?;
        *slot = document;
        Ok(())
    }

    /// Remove a document, reporting whether it existed
    pub fn delete(&self, table: &str, id: &str) -> bool {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(table)
            .is_some_and(|rows| rows.remove(id).is_some())
    }

    /// Every document of `table`, ordered by id
    pub fn list(&self, table: &str) -> Vec<Value> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(table)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn count(&self, table: &str) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(table)
            .map_or(0, BTreeMap::len)
    }

    /// Drop every table
    pub fn clear(&self) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// In-memory database provider
///
/// # Example
///
/// ```
/// use bms_domain::ports::DatabaseProvider;
/// use bms_providers::database::{MockConnection, MockDatabaseProvider};
///
/// let provider = MockDatabaseProvider::default();
/// let conn = provider.connection().downcast::<MockConnection>().unwrap();
/// conn.insert("clients", "c1", serde_json::json!({"name": "Acme"})).unwrap();
/// assert_eq!(conn.count("clients"), 1);
/// ```
#[derive(Debug)]
pub struct MockDatabaseProvider {
    config: MockDatabaseConfig,
    connection: Arc<MockConnection>,
    closed: AtomicBool,
}

impl MockDatabaseProvider {
    pub fn new(config: MockDatabaseConfig) -> Self {
        Self {
            config,
            connection: Arc::new(MockConnection::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Build from `BMS_MOCK_DB_*`
    pub fn from_env() -> Result<Self> {
        from_env::<MockDatabaseConfig>(MOCK_DATABASE_ENV_PREFIX).map(Self::new)
    }

    pub fn config(&self) -> &MockDatabaseConfig {
        &self.config
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Default for MockDatabaseProvider {
    fn default() -> Self {
        Self::new(MockDatabaseConfig::default())
    }
}

#[async_trait]
impl ProviderLifecycle for MockDatabaseProvider {
    fn provider_name(&self) -> &str {
        MOCK_DATABASE_PROVIDER
    }

    async fn health_check(&self) -> Result<()> {
        if self.is_closed() {
            return Err(Error::database("mock database is closed"));
        }
        if self.config.fail_health {
            return Err(Error::database(format!(
                "mock database '{}' configured to fail health checks",
                self.config.name
            )));
        }
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.connection.clear();
            debug!(database = %self.config.name, "Mock database closed");
        }
        Ok(())
    }
}

impl DatabaseProvider for MockDatabaseProvider {
    fn connection(&self) -> Connection {
        Connection::from_arc(Arc::clone(&self.connection))
    }
}

/// Register `mock_db`
pub fn register(factories: &ProviderFactories) {
    register_database_provider_factory(factories, MOCK_DATABASE_PROVIDER, || {
        Arc::new(MockDatabaseProvider::default())
    });
    register_database_config_transformer(
        factories,
        MOCK_DATABASE_PROVIDER,
        serde_transformer::<DatabaseProviderConfig>(),
    );
    register_database_build_from_env(factories, MOCK_DATABASE_PROVIDER, || {
        Ok(Arc::new(MockDatabaseProvider::from_env()?))
    });
}
