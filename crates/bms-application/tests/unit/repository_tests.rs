//! Tests for the composite-key repository factory table

use std::sync::Arc;

use bms_application::ports::registry::{
    ProviderFactories, create_repository, has_repository_factory, list_entities_for_provider,
    list_repository_factories, register_repository_factory,
};
use bms_domain::error::Error;
use bms_domain::value_objects::{Connection, Repository};

struct ClientRepo {
    table: String,
}

struct DocStore;

#[test]
fn test_exact_pair_creates_repository() {
    let factories = ProviderFactories::new();
    register_repository_factory(&factories, "mock", "client", |_, table| {
        Ok(Repository::new(
            "client",
            table,
            ClientRepo {
                table: table.to_string(),
            },
        ))
    });

    let repo = create_repository(&factories, "mock", "client", None, "clients").expect("created");
    assert_eq!(repo.entity(), "client");
    assert_eq!(repo.downcast::<ClientRepo>().expect("client repo").table, "clients");

    let err = create_repository(&factories, "mock", "staff", None, "staffs")
        .err()
        .expect("staff not registered");
    assert!(matches!(
        err,
        Error::NotRegistered { ref category, ref name }
            if category == "repository" && name == "mock:staff"
    ));
}

#[test]
fn test_half_matches_are_not_registered() {
    let factories = ProviderFactories::new();
    register_repository_factory(&factories, "firestore", "client", |_, table| {
        Ok(Repository::new("client", table, ()))
    });

    for (provider, entity) in [("postgres", "client"), ("firestore", "role")] {
        let err = create_repository(&factories, provider, entity, None, "t")
            .err()
            .expect("pair not registered");
        assert!(err.is_not_registered(), "{provider}:{entity}");
    }
    assert!(has_repository_factory(&factories, "firestore", "client"));
    assert!(!has_repository_factory(&factories, "firestore", "role"));
}

#[test]
fn test_factory_rejects_foreign_connection() {
    let factories = ProviderFactories::new();
    register_repository_factory(&factories, "firestore", "client", |conn, table| {
        let conn = conn.ok_or_else(|| Error::database("firestore repositories need a connection"))?;
        let store: Arc<DocStore> = conn.downcast()?;
        Ok(Repository::from_arc("client", table, store))
    });

    let foreign = Connection::new(42_u32);
    let err = create_repository(&factories, "firestore", "client", Some(&foreign), "clients")
        .err()
        .expect("wrong connection type");
    assert!(err.is_type_mismatch());

    let native = Connection::new(DocStore);
    let repo = create_repository(&factories, "firestore", "client", Some(&native), "clients")
        .expect("native connection accepted");
    assert!(repo.is::<DocStore>());

    let err = create_repository(&factories, "firestore", "client", None, "clients")
        .err()
        .expect("missing connection");
    assert!(matches!(err, Error::Database { .. }));
}

#[test]
fn test_listing_is_sorted() {
    let factories = ProviderFactories::new();
    for (provider, entity) in [("mock", "staff"), ("mock", "client"), ("firestore", "role")] {
        register_repository_factory(&factories, provider, entity, |_, table| {
            Ok(Repository::new("any", table, ()))
        });
    }

    assert_eq!(
        list_repository_factories(&factories),
        vec!["firestore:role", "mock:client", "mock:staff"]
    );
    assert_eq!(list_entities_for_provider(&factories, "mock"), vec!["client", "staff"]);
    assert!(list_entities_for_provider(&factories, "postgres").is_empty());
}
