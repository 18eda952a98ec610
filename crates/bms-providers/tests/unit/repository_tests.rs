//! Tests for the mock_db repository factories

use bms_application::ports::registry::{ProviderFactories, create_repository};
use bms_domain::ports::DatabaseProvider;
use bms_domain::value_objects::Connection;
use bms_providers::database::MockDatabaseProvider;
use bms_providers::repositories::MockEntityRepository;

fn factories() -> ProviderFactories {
    let factories = ProviderFactories::new();
    bms_providers::register_all(&factories);
    factories
}

#[test]
fn test_repositories_share_the_provider_connection() {
    let factories = factories();
    let db = MockDatabaseProvider::default();
    let conn = db.connection();

    let repo = create_repository(&factories, "mock_db", "client", Some(&conn), "clients")
        .expect("client repository");
    assert_eq!(repo.entity(), "client");
    assert_eq!(repo.table(), "clients");

    let clients = repo
        .downcast::<MockEntityRepository>()
        .expect("mock repository");
    let id = clients
        .create(serde_json::json!({"name": "Acme"}))
        .expect("created");

    let again = create_repository(&factories, "mock_db", "client", Some(&conn), "clients")
        .expect("client repository")
        .downcast::<MockEntityRepository>()
        .expect("mock repository");
    assert_eq!(again.get(&id).expect("visible")["name"], "Acme");
}

#[test]
fn test_foreign_connection_is_type_mismatch() {
    let factories = factories();
    let foreign = Connection::new(String::from("postgres://localhost"));

    let err = create_repository(&factories, "mock_db", "staff", Some(&foreign), "staffs")
        .err()
        .expect("wrong connection type");
    assert!(err.is_type_mismatch());
    assert!(err.to_string().contains("MockConnection"), "{err}");
}

#[test]
fn test_missing_connection_is_rejected() {
    let factories = factories();

    let err = create_repository(&factories, "mock_db", "role", None, "roles")
        .err()
        .expect("connection required");
    assert!(err.to_string().contains("role"));
}

#[test]
fn test_unknown_entity_is_not_registered() {
    let factories = factories();
    let conn = MockDatabaseProvider::default().connection();

    let err = create_repository(&factories, "mock_db", "invoice", Some(&conn), "invoices")
        .err()
        .expect("no invoice repository");
    assert!(err.is_not_registered());
    assert!(err.to_string().contains("mock_db:invoice"));
}
