//! Tests for the generic factory registry
//!
//! Exercises the three function tables through a registry bound to a small
//! test port, including concurrent registration and lookup.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use async_trait::async_trait;
use bms_application::ports::registry::FactoryRegistry;
use bms_domain::error::Error;
use bms_domain::ports::ProviderLifecycle;

trait Greeter: ProviderLifecycle {
    fn greet(&self) -> String;
}

struct Fixed(&'static str);

#[async_trait]
impl ProviderLifecycle for Fixed {
    fn provider_name(&self) -> &str {
        self.0
    }
}

impl Greeter for Fixed {
    fn greet(&self) -> String {
        format!("hello from {}", self.0)
    }
}

fn registry() -> FactoryRegistry<dyn Greeter, ()> {
    FactoryRegistry::new("greeter")
}

#[test]
fn test_registered_factory_is_returned() {
    let registry = registry();
    registry.register_factory("en", || Arc::new(Fixed("en")));

    let factory = registry.get_factory("en").expect("factory registered");
    assert_eq!(factory().greet(), "hello from en");
    assert!(registry.get_factory("fr").is_none());
}

#[test]
fn test_last_registration_wins() {
    let registry = registry();
    registry.register_factory("en", || Arc::new(Fixed("first")));
    registry.register_factory("en", || Arc::new(Fixed("second")));

    let factory = registry.get_factory("en").expect("factory registered");
    assert_eq!(factory().provider_name(), "second");
    assert_eq!(registry.list_factories(), vec!["en"]);
}

#[test]
fn test_list_is_sorted() {
    let registry = registry();
    for name in ["zulu", "alpha", "mike"] {
        registry.register_factory(name, || Arc::new(Fixed("x")));
    }

    assert_eq!(registry.list_factories(), vec!["alpha", "mike", "zulu"]);
}

#[test]
fn test_build_unknown_invokes_nothing() {
    let registry = registry();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    registry.register_build_from_env("en", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(Fixed("en")))
    });

    let err = registry.build_from_env("klingon").err().expect("unknown name");
    assert!(err.is_not_registered());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    registry.build_from_env("en").expect("builder succeeds");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_builder_failure_is_wrapped_untouched() {
    let registry = registry();
    registry.register_build_from_env("broken", || Err(Error::configuration("missing GREETER_KEY")));

    let err = registry.build_from_env("broken").err().expect("builder fails");
    match err {
        Error::Build {
            category,
            provider,
            source,
        } => {
            assert_eq!(category, "greeter");
            assert_eq!(provider, "broken");
            assert!(source.to_string().contains("missing GREETER_KEY"));
        }
        other => panic!("expected Build error, got {other:?}"),
    }
}

#[test]
fn test_builder_runs_outside_the_lock() {
    // A builder that registers into its own registry would deadlock if the
    // guard were still held.
    let registry = Arc::new(registry());
    let inner = Arc::clone(&registry);
    registry.register_build_from_env("reentrant", move || {
        inner.register_factory("late", || Arc::new(Fixed("late")));
        Ok(Arc::new(Fixed("reentrant")))
    });

    registry.build_from_env("reentrant").expect("builder succeeds");
    assert!(registry.get_factory("late").is_some());
}

#[test]
fn test_concurrent_register_and_lookup() {
    let registry = Arc::new(registry());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..100 {
                    let name = format!("p{}", (worker * 100 + i) % 50);
                    registry.register_factory(name.clone(), || Arc::new(Fixed("x")));
                    let _ = registry.get_factory(&name);
                    let _ = registry.list_factories();
                    let _ = registry.build_from_env(&name);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    assert_eq!(registry.list_factories().len(), 50);
}
