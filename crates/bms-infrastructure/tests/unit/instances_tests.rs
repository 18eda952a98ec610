//! Tests for the per-category live instance registry

use std::sync::Arc;
use std::time::{Duration, Instant};

use bms_domain::error::Error;
use bms_infrastructure::{InstanceRegistry, ProbeContext};

use crate::fakes::{FakeProvider, Health};

fn registry() -> InstanceRegistry<FakeProvider> {
    InstanceRegistry::new("database")
}

#[test]
fn test_register_and_toggle() {
    let registry = registry();
    registry.register_instance("b", Arc::new(FakeProvider::new("b")), true).unwrap();
    registry.register_instance("a", Arc::new(FakeProvider::new("a")), false).unwrap();

    assert_eq!(registry.names(), vec!["a", "b"]);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.is_enabled("a"), Some(false));

    registry.set_enabled("a", true).unwrap();
    assert_eq!(registry.is_enabled("a"), Some(true));
    assert_eq!(registry.is_enabled("zzz"), None);

    let err = registry.set_enabled("zzz", true).unwrap_err();
    assert!(matches!(
        err,
        Error::NotRegistered { ref category, ref name }
            if category == "database" && name == "zzz"
    ));
}

#[test]
fn test_replace_keeps_single_record() {
    let registry = registry();
    let first = Arc::new(FakeProvider::new("first"));
    let second = Arc::new(FakeProvider::new("second"));
    registry.register_instance("a", Arc::clone(&first), true).unwrap();
    registry.register_instance("a", Arc::clone(&second), true).unwrap();

    assert_eq!(registry.len(), 1);
    let current = registry.get_instance("a").unwrap();
    assert!(Arc::ptr_eq(&current, &second));
}

#[tokio::test]
async fn test_replaced_instance_is_closed_once() {
    let registry = registry();
    let first = Arc::new(FakeProvider::new("first"));
    let second = Arc::new(FakeProvider::new("second"));
    registry.register_instance("a", Arc::clone(&first), true).unwrap();
    registry.register_instance("a", Arc::clone(&second), true).unwrap();

    registry.close().await.unwrap();
    registry.close().await.unwrap();

    assert_eq!((first.closes(), second.closes()), (1, 1));
}

#[tokio::test]
async fn test_reregistering_same_instance_closes_it_once() {
    let registry = registry();
    let a = Arc::new(FakeProvider::new("a"));
    registry.register_instance("a", Arc::clone(&a), true).unwrap();
    registry.register_instance("a", Arc::clone(&a), false).unwrap();

    assert_eq!(registry.is_enabled("a"), Some(false));
    registry.close().await.unwrap();
    assert_eq!(a.closes(), 1);
}

#[tokio::test]
async fn test_register_after_close_is_rejected() {
    let registry = registry();
    registry.close().await.unwrap();

    let late = Arc::new(FakeProvider::new("late"));
    let err = registry
        .register_instance("late", Arc::clone(&late), true)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::RegistryClosed { ref category, ref name }
            if category == "database" && name == "late"
    ));
    assert!(registry.get_instance("late").is_none());
    assert!(registry.is_empty());

    registry.close().await.unwrap();
    assert_eq!(late.closes(), 0);
}

#[tokio::test]
async fn test_health_skips_disabled_instances() {
    let registry = registry();
    let disabled = Arc::new(FakeProvider::new("off"));
    registry.register_instance("on", Arc::new(FakeProvider::new("on")), true).unwrap();
    registry.register_instance("off", Arc::clone(&disabled), false).unwrap();
    registry
        .register_instance(
            "bad",
            Arc::new(FakeProvider::new("bad").with_health(Health::Failing)),
            true,
        )
        .unwrap();

    let results = registry.health_check(&ProbeContext::new()).await;

    assert_eq!(results.keys().collect::<Vec<_>>(), vec!["bad", "on"]);
    assert!(results["on"].is_ok());
    assert!(matches!(results["bad"], Err(Error::HealthCheck { ref name, .. }) if name == "bad"));
    assert_eq!(disabled.probes(), 0);
}

#[tokio::test]
async fn test_cancelled_context_probes_nothing() {
    let registry = registry();
    let a = Arc::new(FakeProvider::new("a"));
    let b = Arc::new(FakeProvider::new("b").with_health(Health::Hanging));
    registry.register_instance("a", Arc::clone(&a), true).unwrap();
    registry.register_instance("b", Arc::clone(&b), true).unwrap();

    let ctx = ProbeContext::new();
    ctx.cancel();

    let started = Instant::now();
    let results = registry.health_check(&ctx).await;

    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(results.len(), 2);
    assert!(results.values().all(|r| matches!(r, Err(Error::Cancelled { .. }))));
    assert_eq!(a.probes() + b.probes(), 0);
}

#[tokio::test]
async fn test_hanging_instance_hits_deadline_alone() {
    let registry = registry();
    registry.register_instance("fast", Arc::new(FakeProvider::new("fast")), true).unwrap();
    registry
        .register_instance(
            "stuck",
            Arc::new(FakeProvider::new("stuck").with_health(Health::Hanging)),
            true,
        )
        .unwrap();

    let ctx = ProbeContext::new().with_timeout(Duration::from_millis(100));
    let started = Instant::now();
    let results = registry.health_check(&ctx).await;

    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(results["fast"].is_ok());
    assert!(matches!(
        results["stuck"],
        Err(Error::DeadlineExceeded { ref name }) if name == "stuck"
    ));
}

#[tokio::test]
async fn test_cancel_during_sweep() {
    let registry = registry();
    registry
        .register_instance(
            "stuck",
            Arc::new(FakeProvider::new("stuck").with_health(Health::Hanging)),
            true,
        )
        .unwrap();

    let ctx = ProbeContext::new();
    let canceller = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let results = registry.health_check(&ctx).await;
    assert!(matches!(results["stuck"], Err(Error::Cancelled { .. })));
}

#[tokio::test]
async fn test_close_is_ordered_fail_soft_and_idempotent() {
    let registry = registry();
    let a = Arc::new(FakeProvider::new("a").failing_close());
    let b = Arc::new(FakeProvider::new("b"));
    let c = Arc::new(FakeProvider::new("c").failing_close());
    registry.register_instance("c", Arc::clone(&c), true).unwrap();
    registry.register_instance("a", Arc::clone(&a), true).unwrap();
    registry.register_instance("b", Arc::clone(&b), false).unwrap();

    let err = registry.close().await.unwrap_err();
    assert_eq!(err.failed_instances(), vec!["a", "c"]);
    assert!(err.to_string().contains("a (") && err.to_string().contains("c ("));
    assert!(registry.is_closed());

    registry.close().await.unwrap();
    assert_eq!((a.closes(), b.closes(), c.closes()), (1, 1, 1));
}

#[tokio::test]
async fn test_closed_registry_sweeps_nothing_but_keeps_instances() {
    let registry = registry();
    let a = Arc::new(FakeProvider::new("a"));
    registry.register_instance("a", Arc::clone(&a), true).unwrap();

    registry.close().await.unwrap();

    assert!(registry.health_check(&ProbeContext::new()).await.is_empty());
    assert_eq!(a.probes(), 0);
    assert!(registry.get_instance("a").is_some());
}

#[tokio::test]
async fn test_hanging_close_does_not_block_peers() {
    let registry = registry();
    let a = Arc::new(FakeProvider::new("a").hanging_close());
    let b = Arc::new(FakeProvider::new("b"));
    let c = Arc::new(FakeProvider::new("c"));
    registry.register_instance("a", Arc::clone(&a), true).unwrap();
    registry.register_instance("b", Arc::clone(&b), true).unwrap();
    registry.register_instance("c", Arc::clone(&c), false).unwrap();

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        registry.close_within(Duration::from_millis(50)),
    )
    .await
    .expect("close finished within the outer timeout");

    let err = outcome.unwrap_err();
    assert_eq!(err.failed_instances(), vec!["a"]);
    let Error::Close { failures } = err else {
        panic!("expected an aggregated close error");
    };
    assert!(matches!(failures[0].1, Error::DeadlineExceeded { ref name } if name == "a"));
    assert_eq!((a.closes(), b.closes(), c.closes()), (1, 1, 1));
    assert!(registry.is_closed());
}
