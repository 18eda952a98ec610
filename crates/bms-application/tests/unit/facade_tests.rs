//! Tests for the category façades and the `ProviderFactories` aggregate

use std::sync::Arc;

use async_trait::async_trait;
use bms_application::ports::registry::ProviderFactories;
use bms_application::ports::registry::database::*;
use bms_application::ports::registry::id::*;
use bms_application::ports::registry::{RawConfig, serde_transformer};
use bms_domain::ports::{DatabaseProvider, IdProvider, ProviderLifecycle};
use bms_domain::value_objects::Connection;

struct StubDatabase(&'static str);

#[async_trait]
impl ProviderLifecycle for StubDatabase {
    fn provider_name(&self) -> &str {
        self.0
    }
}

impl DatabaseProvider for StubDatabase {
    fn connection(&self) -> Connection {
        Connection::new(self.0.to_string())
    }
}

struct StubIds;

#[async_trait]
impl ProviderLifecycle for StubIds {
    fn provider_name(&self) -> &str {
        "stub"
    }
}

impl IdProvider for StubIds {
    fn generate_id(&self) -> String {
        "id-1".to_string()
    }
}

#[test]
fn test_database_factories_listed_exactly() {
    let factories = ProviderFactories::new();
    register_database_provider_factory(&factories, "mock_db", || Arc::new(StubDatabase("mock_db")));
    register_database_provider_factory(&factories, "postgres", || {
        Arc::new(StubDatabase("postgres"))
    });

    assert_eq!(
        list_available_database_provider_factories(&factories),
        vec!["mock_db", "postgres"]
    );
}

#[test]
fn test_build_unknown_database_names_category_and_provider() {
    let factories = ProviderFactories::new();
    register_database_build_from_env(&factories, "mock_db", || {
        Ok(Arc::new(StubDatabase("mock_db")))
    });

    let err = build_database_provider_from_env(&factories, "nonexistent")
        .err()
        .expect("unknown provider");
    let message = err.to_string();
    assert!(err.is_not_registered());
    assert!(message.contains("nonexistent"), "{message}");
    assert!(message.contains("database"), "{message}");
}

#[test]
fn test_built_provider_exposes_connection() {
    let factories = ProviderFactories::new();
    register_database_build_from_env(&factories, "mock_db", || {
        Ok(Arc::new(StubDatabase("mock_db")))
    });

    let provider = build_database_provider_from_env(&factories, "mock_db").expect("built");
    let conn = provider.connection();
    assert_eq!(*conn.downcast::<String>().expect("string handle"), "mock_db");
}

#[test]
fn test_transform_database_config() {
    let factories = ProviderFactories::new();
    register_database_config_transformer(
        &factories,
        "postgres",
        serde_transformer::<DatabaseProviderConfig>(),
    );

    let raw: RawConfig = serde_json::from_str(
        r#"{"provider":"postgres","uri":"postgres://localhost/bms","max_connections":8}"#,
    )
    .expect("valid json");
    let config = transform_database_config(&factories, "postgres", &raw).expect("transformed");

    assert_eq!(config.provider, "postgres");
    assert_eq!(config.max_connections, Some(8));
    assert!(get_database_config_transformer(&factories, "postgres").is_some());
    assert!(get_database_config_transformer(&factories, "firestore").is_none());
}

#[test]
fn test_categories_do_not_share_names() {
    let factories = ProviderFactories::new();
    register_id_provider_factory(&factories, "mock_db", || Arc::new(StubIds));

    assert!(get_id_provider_factory(&factories, "mock_db").is_some());
    assert!(get_database_provider_factory(&factories, "mock_db").is_none());
}

#[test]
fn test_list_all_and_clear() {
    let factories = ProviderFactories::new();
    register_database_provider_factory(&factories, "mock_db", || Arc::new(StubDatabase("mock_db")));
    register_id_build_from_env(&factories, "stub", || Ok(Arc::new(StubIds)));

    let all = factories.list_all_available_factories();
    assert_eq!(all.len(), 7);
    assert_eq!(all["database"], vec!["mock_db"]);
    assert!(all["payment"].is_empty());
    assert_eq!(
        factories.list_all_available_build_from_env()["id"],
        vec!["stub"]
    );
    assert_eq!(list_available_id_build_from_env(&factories), vec!["stub"]);

    factories.clear();
    assert!(list_available_database_provider_factories(&factories).is_empty());
    assert!(get_id_build_from_env(&factories, "stub").is_none());
}
