//! Provider Registry System
//!
//! Name-based selection and construction of infrastructure providers.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Provider Registration Flow                    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Adapter exposes:   pub fn register(&ProviderFactories)      │
//! │                              ↓                                  │
//! │  2. Composition root:  mock_db::register(&factories); ...       │
//! │                              ↓                                  │
//! │  3. Config selects:    database.provider = "mock_db"            │
//! │                              ↓                                  │
//! │  4. Façade builds:     build_database_provider_from_env(..)     │
//! │                              ↓                                  │
//! │  5. Repositories:      create_repository("mock_db", "client")   │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no process-wide singleton: a [`ProviderFactories`] value is built
//! by the composition root (or by each test) and every adapter registers into
//! it explicitly, so registration order is known and tests start clean.
//!
//! ## Usage
//!
//! ### Registering a Provider (in an adapter crate)
//!
//! ```ignore
//! use bms_application::ports::registry::database::*;
//!
//! pub fn register(factories: &ProviderFactories) {
//!     register_database_provider_factory(factories, "postgres", || {
//!         Arc::new(Postgres::default())
//!     });
//!     register_database_build_from_env(factories, "postgres", || {
//!         Ok(Arc::new(Postgres::from_env()?))
//!     });
//! }
//! ```
//!
//! ### Resolving a Provider (in the composition root)
//!
//! ```ignore
//! let database = build_database_provider_from_env(&factories, &config.providers.database)?;
//! ```

use std::collections::BTreeMap;

/// Generates the category-named pass-through functions of one façade.
///
/// Façades only delegate and narrow types; anything cross-cutting belongs in
/// [`FactoryRegistry`].
macro_rules! provider_facade {
    (
        label: $label:literal,
        port: $port:ident,
        config: $config:ty,
        registry: $registry:ident,
        accessor: $accessor:ident,
        register_factory: $register_factory:ident,
        get_factory: $get_factory:ident,
        list_factories: $list_factories:ident,
        register_transformer: $register_transformer:ident,
        get_transformer: $get_transformer:ident,
        transform: $transform:ident,
        register_builder: $register_builder:ident,
        get_builder: $get_builder:ident,
        build: $build:ident,
        list_builders: $list_builders:ident $(,)?
    ) => {
        #[doc = concat!("Factory registry bound to the ", $label, " category")]
        pub type $registry = $crate::ports::registry::FactoryRegistry<dyn $port, $config>;

        #[doc = concat!("Register a ", $label, " provider constructor (last registration wins)")]
        pub fn $register_factory<F>(
            factories: &$crate::ports::registry::ProviderFactories,
            name: impl Into<String>,
            factory: F,
        ) where
            F: Fn() -> std::sync::Arc<dyn $port> + Send + Sync + 'static,
        {
            factories.$accessor().register_factory(name, factory);
        }

        #[doc = concat!("Look up a ", $label, " provider constructor")]
        pub fn $get_factory(
            factories: &$crate::ports::registry::ProviderFactories,
            name: &str,
        ) -> Option<$crate::ports::registry::factory::ProviderFactory<dyn $port>> {
            factories.$accessor().get_factory(name)
        }

        #[doc = concat!("Sorted names of registered ", $label, " provider constructors")]
        pub fn $list_factories(
            factories: &$crate::ports::registry::ProviderFactories,
        ) -> Vec<String> {
            factories.$accessor().list_factories()
        }

        #[doc = concat!("Register a ", $label, " config transformer")]
        pub fn $register_transformer<F>(
            factories: &$crate::ports::registry::ProviderFactories,
            name: impl Into<String>,
            transformer: F,
        ) where
            F: Fn(&$crate::ports::registry::RawConfig) -> bms_domain::error::Result<$config>
                + Send
                + Sync
                + 'static,
        {
            factories.$accessor().register_config_transformer(name, transformer);
        }

        #[doc = concat!("Look up a ", $label, " config transformer")]
        pub fn $get_transformer(
            factories: &$crate::ports::registry::ProviderFactories,
            name: &str,
        ) -> Option<$crate::ports::registry::factory::ConfigTransformer<$config>> {
            factories.$accessor().get_config_transformer(name)
        }

        #[doc = concat!("Convert raw configuration into a typed ", $label, " config")]
        pub fn $transform(
            factories: &$crate::ports::registry::ProviderFactories,
            name: &str,
            raw: &$crate::ports::registry::RawConfig,
        ) -> bms_domain::error::Result<$config> {
            factories.$accessor().transform_config(name, raw)
        }

        #[doc = concat!("Register a ", $label, " env builder")]
        pub fn $register_builder<F>(
            factories: &$crate::ports::registry::ProviderFactories,
            name: impl Into<String>,
            builder: F,
        ) where
            F: Fn() -> bms_domain::error::Result<std::sync::Arc<dyn $port>> + Send + Sync + 'static,
        {
            factories.$accessor().register_build_from_env(name, builder);
        }

        #[doc = concat!("Look up a ", $label, " env builder")]
        pub fn $get_builder(
            factories: &$crate::ports::registry::ProviderFactories,
            name: &str,
        ) -> Option<$crate::ports::registry::factory::EnvBuilder<dyn $port>> {
            factories.$accessor().get_build_from_env(name)
        }

        #[doc = concat!("Build a ready ", $label, " provider from process configuration")]
        pub fn $build(
            factories: &$crate::ports::registry::ProviderFactories,
            name: &str,
        ) -> bms_domain::error::Result<std::sync::Arc<dyn $port>> {
            factories.$accessor().build_from_env(name)
        }

        #[doc = concat!("Sorted names of registered ", $label, " env builders")]
        pub fn $list_builders(
            factories: &$crate::ports::registry::ProviderFactories,
        ) -> Vec<String> {
            factories.$accessor().list_build_from_env()
        }
    };
}

pub mod auth;
pub mod database;
pub mod email;
pub mod factory;
pub mod id;
pub mod payment;
pub mod repository;
pub mod storage;
pub mod translation;

pub use auth::{AuthProviderConfig, AuthProviderRegistry};
pub use database::{DatabaseProviderConfig, DatabaseProviderRegistry};
pub use email::{EmailProviderConfig, EmailProviderRegistry};
pub use factory::{
    ConfigTransformer, EnvBuilder, FactoryRegistry, ProviderFactory, RawConfig, serde_transformer,
};
pub use id::{IdProviderConfig, IdProviderRegistry};
pub use payment::{PaymentProviderConfig, PaymentProviderRegistry};
pub use repository::{
    RepositoryFactories, RepositoryFactory, create_repository, has_repository_factory,
    list_entities_for_provider, list_repository_factories, register_repository_factory,
    repository_key,
};
pub use storage::{StorageProviderConfig, StorageProviderRegistry};
pub use translation::{TranslationProviderConfig, TranslationProviderRegistry};

use bms_domain::constants::{
    AUTH_CATEGORY, DATABASE_CATEGORY, EMAIL_CATEGORY, ID_CATEGORY, PAYMENT_CATEGORY,
    STORAGE_CATEGORY, TRANSLATION_CATEGORY,
};

/// Every provider factory table of the process
///
/// Owns one [`FactoryRegistry`] per category plus the repository factory
/// table. Build one in the composition root, hand `&ProviderFactories` to
/// each adapter's `register` function, then share it (usually in an `Arc`).
pub struct ProviderFactories {
    database: DatabaseProviderRegistry,
    auth: AuthProviderRegistry,
    storage: StorageProviderRegistry,
    email: EmailProviderRegistry,
    payment: PaymentProviderRegistry,
    id: IdProviderRegistry,
    translation: TranslationProviderRegistry,
    repositories: RepositoryFactories,
}

impl ProviderFactories {
    /// Create empty tables for every category
    pub fn new() -> Self {
        Self {
            database: FactoryRegistry::new(DATABASE_CATEGORY),
            auth: FactoryRegistry::new(AUTH_CATEGORY),
            storage: FactoryRegistry::new(STORAGE_CATEGORY),
            email: FactoryRegistry::new(EMAIL_CATEGORY),
            payment: FactoryRegistry::new(PAYMENT_CATEGORY),
            id: FactoryRegistry::new(ID_CATEGORY),
            translation: FactoryRegistry::new(TRANSLATION_CATEGORY),
            repositories: RepositoryFactories::new(),
        }
    }

    pub fn database(&self) -> &DatabaseProviderRegistry {
        &self.database
    }

    pub fn auth(&self) -> &AuthProviderRegistry {
        &self.auth
    }

    pub fn storage(&self) -> &StorageProviderRegistry {
        &self.storage
    }

    pub fn email(&self) -> &EmailProviderRegistry {
        &self.email
    }

    pub fn payment(&self) -> &PaymentProviderRegistry {
        &self.payment
    }

    pub fn id(&self) -> &IdProviderRegistry {
        &self.id
    }

    pub fn translation(&self) -> &TranslationProviderRegistry {
        &self.translation
    }

    pub fn repositories(&self) -> &RepositoryFactories {
        &self.repositories
    }

    /// Constructor names of every category, keyed by category
    ///
    /// Observability aid for CLIs and admin pages.
    pub fn list_all_available_factories(&self) -> BTreeMap<&'static str, Vec<String>> {
        BTreeMap::from([
            (self.database.category(), self.database.list_factories()),
            (self.auth.category(), self.auth.list_factories()),
            (self.storage.category(), self.storage.list_factories()),
            (self.email.category(), self.email.list_factories()),
            (self.payment.category(), self.payment.list_factories()),
            (self.id.category(), self.id.list_factories()),
            (self.translation.category(), self.translation.list_factories()),
        ])
    }

    /// Env builder names of every category, keyed by category
    pub fn list_all_available_build_from_env(&self) -> BTreeMap<&'static str, Vec<String>> {
        BTreeMap::from([
            (self.database.category(), self.database.list_build_from_env()),
            (self.auth.category(), self.auth.list_build_from_env()),
            (self.storage.category(), self.storage.list_build_from_env()),
            (self.email.category(), self.email.list_build_from_env()),
            (self.payment.category(), self.payment.list_build_from_env()),
            (self.id.category(), self.id.list_build_from_env()),
            (
                self.translation.category(),
                self.translation.list_build_from_env(),
            ),
        ])
    }

    /// Drop every registration of every table
    pub fn clear(&self) {
        self.database.clear();
        self.auth.clear();
        self.storage.clear();
        self.email.clear();
        self.payment.clear();
        self.id.clear();
        self.translation.clear();
        self.repositories.clear();
    }
}

impl Default for ProviderFactories {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProviderFactories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderFactories")
            .field("database", &self.database)
            .field("auth", &self.auth)
            .field("storage", &self.storage)
            .field("email", &self.email)
            .field("payment", &self.payment)
            .field("id", &self.id)
            .field("translation", &self.translation)
            .field("repositories", &self.repositories)
            .finish()
    }
}
