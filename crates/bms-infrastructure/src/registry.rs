//! Process-wide Provider Registry
//!
//! One [`InstanceRegistry`] per multi-provider category, plus single slots
//! for the id and translation providers. Operational code talks to this
//! aggregate only: one health sweep and one close for the whole process.
//!
//! Health keys and close failures are qualified as `"<category>:<name>"`
//! (e.g. `"database:mock_db"`); singletons use their `provider_name()`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use bms_domain::constants::{
    AUTH_CATEGORY, DATABASE_CATEGORY, EMAIL_CATEGORY, ID_CATEGORY, KEY_SEPARATOR,
    PAYMENT_CATEGORY, STORAGE_CATEGORY, TRANSLATION_CATEGORY,
};
use bms_domain::error::{Error, Result};
use bms_domain::ports::{
    AuthProvider, DatabaseProvider, EmailProvider, IdProvider, PaymentProvider, ProviderLifecycle,
    StorageProvider, TranslationProvider,
};
use tracing::{debug, info, warn};

use crate::constants::DEFAULT_CLOSE_TIMEOUT_MS;
use crate::instances::{InstanceRegistry, close_instance};
use crate::probe::ProbeContext;

type HealthMap = BTreeMap<String, Result<()>>;

/// Single-instance slot; replaced providers wait here for close
struct Slot<T: ?Sized> {
    current: Option<Arc<T>>,
    retired: Vec<Arc<T>>,
}

impl<T: ?Sized> Default for Slot<T> {
    fn default() -> Self {
        Self {
            current: None,
            retired: Vec::new(),
        }
    }
}

/// Live infrastructure of the process
pub struct Registry {
    database: InstanceRegistry<dyn DatabaseProvider>,
    auth: InstanceRegistry<dyn AuthProvider>,
    storage: InstanceRegistry<dyn StorageProvider>,
    email: InstanceRegistry<dyn EmailProvider>,
    payment: InstanceRegistry<dyn PaymentProvider>,
    id: RwLock<Slot<dyn IdProvider>>,
    translation: RwLock<Slot<dyn TranslationProvider>>,
    closed: AtomicBool,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            database: InstanceRegistry::new(DATABASE_CATEGORY),
            auth: InstanceRegistry::new(AUTH_CATEGORY),
            storage: InstanceRegistry::new(STORAGE_CATEGORY),
            email: InstanceRegistry::new(EMAIL_CATEGORY),
            payment: InstanceRegistry::new(PAYMENT_CATEGORY),
            id: RwLock::new(Slot::default()),
            translation: RwLock::new(Slot::default()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn database(&self) -> &InstanceRegistry<dyn DatabaseProvider> {
        &self.database
    }

    pub fn auth(&self) -> &InstanceRegistry<dyn AuthProvider> {
        &self.auth
    }

    pub fn storage(&self) -> &InstanceRegistry<dyn StorageProvider> {
        &self.storage
    }

    pub fn email(&self) -> &InstanceRegistry<dyn EmailProvider> {
        &self.email
    }

    pub fn payment(&self) -> &InstanceRegistry<dyn PaymentProvider> {
        &self.payment
    }

    /// Install the id provider, replacing any previous one
    ///
    /// Fails with `RegistryClosed` after close.
    pub fn set_id_provider(&self, provider: Arc<dyn IdProvider>) -> Result<()> {
        install(&self.id, &self.closed, ID_CATEGORY, provider)
    }

    pub fn id_provider(&self) -> Option<Arc<dyn IdProvider>> {
        self.id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }

    /// Install the translation provider, replacing any previous one
    ///
    /// Fails with `RegistryClosed` after close.
    pub fn set_translation_provider(&self, provider: Arc<dyn TranslationProvider>) -> Result<()> {
        install(&self.translation, &self.closed, TRANSLATION_CATEGORY, provider)
    }

    pub fn translation_provider(&self) -> Option<Arc<dyn TranslationProvider>> {
        self.translation
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Probe every enabled instance of every category concurrently
    ///
    /// Keys are qualified with the category. Empty after close.
    pub async fn health_check(&self, ctx: &ProbeContext) -> HealthMap {
        if self.is_closed() {
            return HealthMap::new();
        }

        let id = self.id_provider();
        let translation = self.translation_provider();

        let (database, auth, storage, email, payment, id, translation) = tokio::join!(
            self.database.health_check(ctx),
            self.auth.health_check(ctx),
            self.storage.health_check(ctx),
            self.email.health_check(ctx),
            self.payment.health_check(ctx),
            probe_singleton(id, ctx),
            probe_singleton(translation, ctx),
        );

        let mut results = HealthMap::new();
        for (category, entries) in [
            (DATABASE_CATEGORY, database),
            (AUTH_CATEGORY, auth),
            (STORAGE_CATEGORY, storage),
            (EMAIL_CATEGORY, email),
            (PAYMENT_CATEGORY, payment),
            (ID_CATEGORY, id),
            (TRANSLATION_CATEGORY, translation),
        ] {
            results.extend(
                entries
                    .into_iter()
                    .map(|(name, outcome)| (qualify(category, &name), outcome)),
            );
        }
        results
    }

    /// Close everything once, each instance within the default close timeout
    ///
    /// See [`Self::close_within`].
    pub async fn close(&self) -> Result<()> {
        self.close_within(Duration::from_millis(DEFAULT_CLOSE_TIMEOUT_MS)).await
    }

    /// Close everything once, each instance within `timeout`
    ///
    /// Categories close in a fixed order with the database last, since
    /// repositories built on its connection may still be in use by the
    /// others. Every instance is attempted; an instance that overruns
    /// `timeout` counts as failed and its peers still close. Failures are
    /// merged under qualified names. Later calls return `Ok(())` and release
    /// nothing.
    pub async fn close_within(&self, timeout: Duration) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            debug!("Registry already closed");
            return Ok(());
        }
        info!("Closing provider registry");

        let mut failures = Vec::new();
        let mut collect = |category: &str, entries: Vec<(String, Error)>| {
            failures.extend(
                entries
                    .into_iter()
                    .map(|(name, err)| (qualify(category, &name), err)),
            );
        };

        collect(AUTH_CATEGORY, self.auth.close_collect(timeout).await);
        collect(STORAGE_CATEGORY, self.storage.close_collect(timeout).await);
        collect(EMAIL_CATEGORY, self.email.close_collect(timeout).await);
        collect(PAYMENT_CATEGORY, self.payment.close_collect(timeout).await);
        collect(ID_CATEGORY, close_slot(ID_CATEGORY, drain(&self.id), timeout).await);
        collect(
            TRANSLATION_CATEGORY,
            close_slot(TRANSLATION_CATEGORY, drain(&self.translation), timeout).await,
        );
        collect(DATABASE_CATEGORY, self.database.close_collect(timeout).await);

        match Error::close(failures) {
            Some(err) => {
                warn!(failed = ?err.failed_instances(), "Registry closed with failures");
                Err(err)
            }
            None => {
                info!("Provider registry closed");
                Ok(())
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("database", &self.database)
            .field("auth", &self.auth)
            .field("storage", &self.storage)
            .field("email", &self.email)
            .field("payment", &self.payment)
            .field(
                "id",
                &self.id_provider().map(|p| p.provider_name().to_string()),
            )
            .field(
                "translation",
                &self
                    .translation_provider()
                    .map(|p| p.provider_name().to_string()),
            )
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// `"<category>:<name>"`
pub fn qualify(category: &str, name: &str) -> String {
    format!("{category}{KEY_SEPARATOR}{name}")
}

fn install<T>(
    slot: &RwLock<Slot<T>>,
    closed: &AtomicBool,
    category: &'static str,
    provider: Arc<T>,
) -> Result<()>
where
    T: ?Sized + ProviderLifecycle,
{
    let name = provider.provider_name().to_string();
    let mut slot = slot.write().unwrap_or_else(PoisonError::into_inner);
    // Checked under the slot lock so close either sees this provider or rejects it.
    if closed.load(Ordering::SeqCst) {
        warn!(category, instance = %name, "Registration after close rejected");
        return Err(Error::registry_closed(category, name));
    }

    match slot.current.replace(Arc::clone(&provider)) {
        Some(previous) => {
            if !Arc::ptr_eq(&previous, &provider) {
                slot.retired.push(previous);
            }
            warn!(category, instance = %name, "Singleton provider replaced");
        }
        None => info!(category, instance = %name, "Singleton provider installed"),
    }
    Ok(())
}

/// Retired providers first, then the current one
fn drain<T: ?Sized>(slot: &RwLock<Slot<T>>) -> Vec<Arc<T>> {
    let mut slot = slot.write().unwrap_or_else(PoisonError::into_inner);
    let mut providers = std::mem::take(&mut slot.retired);
    providers.extend(slot.current.clone());
    providers
}

async fn probe_singleton<T>(provider: Option<Arc<T>>, ctx: &ProbeContext) -> HealthMap
where
    T: ?Sized + ProviderLifecycle,
{
    let mut results = HealthMap::new();
    if let Some(provider) = provider {
        let name = provider.provider_name().to_string();
        let outcome = ctx.probe(&name, provider.health_check()).await;
        results.insert(name, outcome);
    }
    results
}

async fn close_slot<T>(
    category: &str,
    providers: Vec<Arc<T>>,
    timeout: Duration,
) -> Vec<(String, Error)>
where
    T: ?Sized + ProviderLifecycle,
{
    let mut failures = Vec::new();
    for provider in providers {
        let name = provider.provider_name().to_string();
        if let Err(err) = close_instance(category, &name, provider.as_ref(), timeout).await {
            failures.push((name, err));
        }
    }
    failures
}
