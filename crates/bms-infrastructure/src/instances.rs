//! Live Instance Registry
//!
//! Holds the live instances of one provider category by name, each with an
//! enabled flag. Enabled instances take part in health sweeps; every
//! instance, enabled or not, is released by [`InstanceRegistry::close`].
//!
//! ## State machine
//!
//! ```text
//! Registered(enabled) ⇄ Registered(disabled)      (set_enabled)
//!          │                    │
//!          └──────── close ─────┘
//!                     ▼
//!                  Closed                          (terminal, idempotent)
//! ```
//!
//! A replaced instance is retired, not dropped: `close` releases it along
//! with the live ones. Registrations after close are rejected.
//!
//! Neither the health sweep nor close holds the lock across an instance call:
//! both take a snapshot under the lock, release it, then call out. Each
//! instance gets its own close deadline, so one that hangs cannot keep its
//! peers open.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use bms_domain::error::{Error, Result};
use bms_domain::ports::ProviderLifecycle;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::constants::DEFAULT_CLOSE_TIMEOUT_MS;
use crate::probe::ProbeContext;

struct Record<T: ?Sized> {
    instance: Arc<T>,
    enabled: bool,
}

struct State<T: ?Sized> {
    records: BTreeMap<String, Record<T>>,
    /// Replaced instances still owed a close, in replacement order
    retired: Vec<(String, Arc<T>)>,
    closed: bool,
}

/// Live instances of one provider category
pub struct InstanceRegistry<T: ?Sized> {
    category: &'static str,
    state: RwLock<State<T>>,
}

impl<T> InstanceRegistry<T>
where
    T: ?Sized + ProviderLifecycle,
{
    /// Create an empty registry labelled with `category`
    pub fn new(category: &'static str) -> Self {
        Self {
            category,
            state: RwLock::new(State {
                records: BTreeMap::new(),
                retired: Vec::new(),
                closed: false,
            }),
        }
    }

    pub fn category(&self) -> &'static str {
        self.category
    }

    fn read(&self) -> RwLockReadGuard<'_, State<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `instance` under `name`, replacing any previous record
    ///
    /// A replaced instance is kept aside and released by [`Self::close`].
    /// Fails with `RegistryClosed` once the registry has been closed.
    pub fn register_instance(
        &self,
        name: impl Into<String>,
        instance: Arc<T>,
        enabled: bool,
    ) -> Result<()> {
        let name = name.into();
        let mut state = self.write();
        if state.closed {
            warn!(
                category = self.category,
                instance = %name,
                "Registration after close rejected"
            );
            return Err(Error::registry_closed(self.category, name));
        }

        let previous = state.records.insert(
            name.clone(),
            Record {
                instance: Arc::clone(&instance),
                enabled,
            },
        );
        match previous {
            Some(previous) => {
                if !Arc::ptr_eq(&previous.instance, &instance) {
                    state.retired.push((name.clone(), previous.instance));
                }
                warn!(category = self.category, instance = %name, "Live instance replaced");
            }
            None => {
                info!(
                    category = self.category,
                    instance = %name,
                    enabled,
                    "Live instance registered"
                );
            }
        }
        Ok(())
    }

    /// Instance registered under `name`, also after close
    pub fn get_instance(&self, name: &str) -> Option<Arc<T>> {
        self.read()
            .records
            .get(name)
            .map(|record| Arc::clone(&record.instance))
    }

    /// Enable or disable the instance registered under `name`
    pub fn set_enabled(&self, name: &str, enabled: bool) -> Result<()> {
        let mut state = self.write();
        let record = state
            .records
            .get_mut(name)
            .ok_or_else(|| Error::not_registered(self.category, name))?;
        record.enabled = enabled;
        debug!(category = self.category, instance = name, enabled, "Instance toggled");
        Ok(())
    }

    /// Enabled flag of `name`, `None` when unknown
    pub fn is_enabled(&self, name: &str) -> Option<bool> {
        self.read().records.get(name).map(|record| record.enabled)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        self.read().records.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().records.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.read().closed
    }

    /// Probe every enabled instance concurrently
    ///
    /// Returns one entry per enabled instance, keyed by name. Empty after
    /// close.
    pub async fn health_check(&self, ctx: &ProbeContext) -> BTreeMap<String, Result<()>> {
        let targets: Vec<(String, Arc<T>)> = {
            let state = self.read();
            if state.closed {
                return BTreeMap::new();
            }
            state
                .records
                .iter()
                .filter(|(_, record)| record.enabled)
                .map(|(name, record)| (name.clone(), Arc::clone(&record.instance)))
                .collect()
        };

        let probes = targets.into_iter().map(|(name, instance)| async move {
            let outcome = ctx.probe(&name, instance.health_check()).await;
            (name, outcome)
        });

        join_all(probes).await.into_iter().collect()
    }

    /// Close every instance once, each within the default close timeout
    ///
    /// See [`Self::close_within`].
    pub async fn close(&self) -> Result<()> {
        self.close_within(Duration::from_millis(DEFAULT_CLOSE_TIMEOUT_MS)).await
    }

    /// Close every instance once, each within `timeout`
    ///
    /// Retired instances go first, then live ones in ascending name order.
    /// All instances are attempted even after a failure or a timeout; an
    /// instance that does not finish in time is reported as
    /// `DeadlineExceeded`. Failures are aggregated into one `Close` error.
    /// Later calls do nothing.
    pub async fn close_within(&self, timeout: Duration) -> Result<()> {
        Error::close(self.close_collect(timeout).await).map_or(Ok(()), Err)
    }

    pub(crate) async fn close_collect(&self, timeout: Duration) -> Vec<(String, Error)> {
        let targets: Vec<(String, Arc<T>)> = {
            let mut state = self.write();
            if state.closed {
                debug!(category = self.category, "Already closed");
                return Vec::new();
            }
            state.closed = true;
            let mut targets = std::mem::take(&mut state.retired);
            targets.extend(
                state
                    .records
                    .iter()
                    .map(|(name, record)| (name.clone(), Arc::clone(&record.instance))),
            );
            targets
        };

        let mut failures = Vec::new();
        for (name, instance) in targets {
            let outcome = close_instance(self.category, &name, instance.as_ref(), timeout).await;
            if let Err(err) = outcome {
                failures.push((name, err));
            }
        }
        failures
    }
}

/// Close one instance, giving up after `timeout`
pub(crate) async fn close_instance<T>(
    category: &str,
    name: &str,
    instance: &T,
    timeout: Duration,
) -> Result<()>
where
    T: ?Sized + ProviderLifecycle,
{
    let ctx = ProbeContext::new().with_timeout(timeout);
    match ctx.guard(name, instance.close()).await {
        Ok(()) => {
            debug!(category, instance = name, "Instance closed");
            Ok(())
        }
        Err(err) => {
            warn!(category, instance = name, error = %err, "Instance close failed");
            Err(err)
        }
    }
}

impl<T: ?Sized> fmt::Debug for InstanceRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let records: BTreeMap<&str, bool> = state
            .records
            .iter()
            .map(|(name, record)| (name.as_str(), record.enabled))
            .collect();
        f.debug_struct("InstanceRegistry")
            .field("category", &self.category)
            .field("instances", &records)
            .field("retired", &state.retired.len())
            .field("closed", &state.closed)
            .finish()
    }
}
