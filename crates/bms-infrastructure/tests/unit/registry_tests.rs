//! Tests for the process-wide registry aggregate

use std::sync::Arc;
use std::time::Duration;

use bms_domain::error::Error;
use bms_domain::ports::{DatabaseProvider, IdProvider};
use bms_infrastructure::{ProbeContext, Registry};

use crate::fakes::{FakeProvider, Health};

fn database(provider: &Arc<FakeProvider>) -> Arc<dyn DatabaseProvider> {
    Arc::clone(provider) as Arc<dyn DatabaseProvider>
}

fn ids(provider: &Arc<FakeProvider>) -> Arc<dyn IdProvider> {
    Arc::clone(provider) as Arc<dyn IdProvider>
}

#[tokio::test]
async fn test_health_keys_are_qualified() {
    let registry = Registry::new();
    let db = Arc::new(FakeProvider::new("mock_db"));
    registry.database().register_instance("mock_db", database(&db), true).unwrap();
    registry
        .set_id_provider(Arc::new(FakeProvider::new("uuid").with_health(Health::Failing)))
        .unwrap();

    let results = registry.health_check(&ProbeContext::new()).await;

    assert_eq!(
        results.keys().collect::<Vec<_>>(),
        vec!["database:mock_db", "id:uuid"]
    );
    assert!(results["database:mock_db"].is_ok());
    assert!(results["id:uuid"].is_err());
}

#[tokio::test]
async fn test_close_attempts_everything_and_names_failures() {
    let registry = Registry::new();
    let a = Arc::new(FakeProvider::new("a").failing_close());
    let b = Arc::new(FakeProvider::new("b"));
    let c = Arc::new(FakeProvider::new("c").failing_close());
    registry.database().register_instance("a", database(&a), true).unwrap();
    registry.database().register_instance("b", database(&b), true).unwrap();
    registry.set_id_provider(ids(&c)).unwrap();

    let err = registry.close().await.unwrap_err();

    assert_eq!(err.failed_instances(), vec!["id:c", "database:a"]);
    assert_eq!((a.closes(), b.closes(), c.closes()), (1, 1, 1));

    registry.close().await.unwrap();
    assert_eq!((a.closes(), b.closes(), c.closes()), (1, 1, 1));
    assert!(registry.is_closed());
    assert!(registry.health_check(&ProbeContext::new()).await.is_empty());
}

#[test]
fn test_singleton_replace_and_lookup() {
    let registry = Registry::new();
    assert!(registry.id_provider().is_none());

    registry.set_id_provider(Arc::new(FakeProvider::new("first"))).unwrap();
    registry.set_id_provider(Arc::new(FakeProvider::new("second"))).unwrap();

    let ids = registry.id_provider().expect("installed");
    assert_eq!(ids.generate_id(), "second-id");
    assert!(registry.translation_provider().is_none());
}

#[tokio::test]
async fn test_replaced_singleton_is_closed_at_shutdown() {
    let registry = Registry::new();
    let first = Arc::new(FakeProvider::new("first"));
    let second = Arc::new(FakeProvider::new("second"));
    registry.set_id_provider(ids(&first)).unwrap();
    registry.set_id_provider(ids(&second)).unwrap();
    registry.set_id_provider(ids(&second)).unwrap();

    registry.close().await.unwrap();

    assert_eq!((first.closes(), second.closes()), (1, 1));
}

#[tokio::test]
async fn test_installs_after_close_are_rejected() {
    let registry = Registry::new();
    registry.close().await.unwrap();

    let late = Arc::new(FakeProvider::new("late"));
    let err = registry.set_id_provider(ids(&late)).unwrap_err();
    assert!(matches!(
        err,
        Error::RegistryClosed { ref category, ref name } if category == "id" && name == "late"
    ));
    assert!(registry.id_provider().is_none());

    let err = registry
        .database()
        .register_instance("late", database(&late), true)
        .unwrap_err();
    assert!(matches!(err, Error::RegistryClosed { .. }));

    registry.close().await.unwrap();
    assert_eq!(late.closes(), 0);
}

#[tokio::test]
async fn test_hanging_singleton_close_still_reaches_database() {
    let registry = Registry::new();
    let stuck = Arc::new(FakeProvider::new("stuck").hanging_close());
    let db = Arc::new(FakeProvider::new("db"));
    registry.set_id_provider(ids(&stuck)).unwrap();
    registry.database().register_instance("db", database(&db), true).unwrap();

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        registry.close_within(Duration::from_millis(50)),
    )
    .await
    .expect("close finished within the outer timeout");

    let err = outcome.unwrap_err();
    assert_eq!(err.failed_instances(), vec!["id:stuck"]);
    assert_eq!((stuck.closes(), db.closes()), (1, 1));
}
