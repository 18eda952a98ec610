//! JSON document repositories over [`MockConnection`]

use std::sync::Arc;

use bms_application::ports::registry::{ProviderFactories, register_repository_factory};
use bms_domain::error::{Error, Result};
use bms_domain::value_objects::{Connection, Repository};
use serde_json::Value;
use uuid::Uuid;

use crate::constants::{MOCK_DATABASE_PROVIDER, MOCK_ENTITIES};
use crate::database::MockConnection;

/// CRUD over one table of the mock database
///
/// Documents are JSON objects; the `id` field is the primary key and is
/// generated on create when missing.
#[derive(Debug, Clone)]
pub struct MockEntityRepository {
    entity: String,
    table: String,
    conn: Arc<MockConnection>,
}

impl MockEntityRepository {
    pub fn new(
        entity: impl Into<String>,
        table: impl Into<String>,
        conn: Arc<MockConnection>,
    ) -> Self {
        Self {
            entity: entity.into(),
            table: table.into(),
            conn,
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Store a new document, returning its id
    pub fn create(&self, mut document: Value) -> Result<String> {
        let object = document.as_object_mut().ok_or_else(|| {
            Error::invalid_argument(format!("{} document must be a JSON object", self.entity))
        })?;
        let id = match object.get("id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                let id = Uuid::new_v4().to_string();
                object.insert("id".to_string(), Value::String(id.clone()));
                id
            }
        };
        self.conn.insert(&self.table, &id, document)?;
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Result<Value> {
        self.conn
            .get(&self.table, id)
            .ok_or_else(|| Error::not_found(format!("{} '{id}'", self.entity)))
    }

    pub fn update(&self, id: &str, document: Value) -> Result<()> {
        self.conn.update(&self.table, id, document)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.conn.delete(&self.table, id))
    }

    pub fn list(&self) -> Result<Vec<Value>> {
        Ok(self.conn.list(&self.table))
    }
}

/// Factory shared by every mock entity
///
/// Requires a connection that downcasts to [`MockConnection`].
fn mock_repository_factory(
    entity: &'static str,
) -> impl Fn(Option<&Connection>, &str) -> Result<Repository> + Send + Sync + 'static {
    move |conn, table| {
        let conn = conn.ok_or_else(|| {
            Error::database(format!("{entity} repository requires a mock_db connection"))
        })?;
        let native = conn.downcast::<MockConnection>()?;
        Ok(Repository::new(
            entity,
            table,
            MockEntityRepository::new(entity, table, native),
        ))
    }
}

/// Register `mock_db:<entity>` for every mock entity
pub fn register(factories: &ProviderFactories) {
    for &entity in MOCK_ENTITIES {
        register_repository_factory(
            factories,
            MOCK_DATABASE_PROVIDER,
            entity,
            mock_repository_factory(entity),
        );
    }
}
