//! Composition Root
//!
//! Turns an [`AppConfig`] and a populated [`ProviderFactories`] into live
//! infrastructure:
//!
//! 1. each configured category's provider is built from the environment and
//!    registered into a fresh [`Registry`],
//! 2. the id and translation singletons are installed,
//! 3. when a database provider is configured, one repository per configured
//!    entity is created from its connection.
//!
//! Bootstrap fails fast: the first unknown provider name or failing builder
//! aborts it, and the instances already built are closed before the error is
//! returned.

use std::collections::BTreeMap;
use std::sync::Arc;

use bms_application::ports::registry::ProviderFactories;
use bms_application::ports::registry::auth::build_auth_provider_from_env;
use bms_application::ports::registry::database::build_database_provider_from_env;
use bms_application::ports::registry::email::build_email_provider_from_env;
use bms_application::ports::registry::id::build_id_provider_from_env;
use bms_application::ports::registry::payment::build_payment_provider_from_env;
use bms_application::ports::registry::storage::build_storage_provider_from_env;
use bms_application::ports::registry::translation::build_translation_provider_from_env;
use bms_application::ports::registry::{create_repository, has_repository_factory};
use bms_domain::error::Result;
use bms_domain::value_objects::{Connection, Repository};
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::constants::TABLE_NAME_SUFFIX;
use crate::registry::Registry;

/// Table backing `entity`: prefix, entity, plural suffix
///
/// ```
/// use bms_infrastructure::bootstrap::table_name;
///
/// assert_eq!(table_name("", "client"), "clients");
/// assert_eq!(table_name("tenant_", "role"), "tenant_roles");
/// ```
pub fn table_name(prefix: &str, entity: &str) -> String {
    format!("{prefix}{entity}{TABLE_NAME_SUFFIX}")
}

/// Repositories built during bootstrap, keyed by entity
#[derive(Debug, Clone, Default)]
pub struct RepositorySet {
    repositories: BTreeMap<String, Repository>,
}

impl RepositorySet {
    pub fn get(&self, entity: &str) -> Option<&Repository> {
        self.repositories.get(entity)
    }

    /// Entities with a repository, sorted
    pub fn entities(&self) -> Vec<&str> {
        self.repositories.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    fn insert(&mut self, entity: &str, repository: Repository) {
        self.repositories.insert(entity.to_string(), repository);
    }
}

/// Live infrastructure produced by [`Bootstrap::build`]
#[derive(Debug, Clone)]
pub struct Infrastructure {
    pub registry: Arc<Registry>,
    pub repositories: RepositorySet,
}

/// Composition root
#[derive(Debug)]
pub struct Bootstrap {
    config: AppConfig,
    factories: Arc<ProviderFactories>,
}

impl Bootstrap {
    pub fn new(config: AppConfig, factories: Arc<ProviderFactories>) -> Self {
        Self { config, factories }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Build every configured provider and repository
    pub async fn build(&self) -> Result<Infrastructure> {
        let registry = Arc::new(Registry::new());

        match self.populate(&registry) {
            Ok(repositories) => {
                info!(
                    providers = self.config.providers.selected().len(),
                    repositories = repositories.len(),
                    "Infrastructure bootstrapped"
                );
                Ok(Infrastructure {
                    registry,
                    repositories,
                })
            }
            Err(err) => {
                error!(error = %err, "Bootstrap failed, releasing built providers");
                if let Err(close_err) = registry.close().await {
                    warn!(error = %close_err, "Cleanup after failed bootstrap was incomplete");
                }
                Err(err)
            }
        }
    }

    fn populate(&self, registry: &Registry) -> Result<RepositorySet> {
        let providers = &self.config.providers;
        let factories = self.factories.as_ref();

        if let Some(name) = &providers.database {
            let instance = build_database_provider_from_env(factories, name)?;
            registry
                .database()
                .register_instance(name, instance, providers.is_enabled(name))?;
        }
        if let Some(name) = &providers.auth {
            let instance = build_auth_provider_from_env(factories, name)?;
            registry
                .auth()
                .register_instance(name, instance, providers.is_enabled(name))?;
        }
        if let Some(name) = &providers.storage {
            let instance = build_storage_provider_from_env(factories, name)?;
            registry
                .storage()
                .register_instance(name, instance, providers.is_enabled(name))?;
        }
        if let Some(name) = &providers.email {
            let instance = build_email_provider_from_env(factories, name)?;
            registry
                .email()
                .register_instance(name, instance, providers.is_enabled(name))?;
        }
        if let Some(name) = &providers.payment {
            let instance = build_payment_provider_from_env(factories, name)?;
            registry
                .payment()
                .register_instance(name, instance, providers.is_enabled(name))?;
        }

        if let Some(name) = &providers.id {
            registry.set_id_provider(build_id_provider_from_env(factories, name)?)?;
        }
        if let Some(name) = &providers.translation {
            let instance = build_translation_provider_from_env(factories, name)?;
            registry.set_translation_provider(instance)?;
        }

        let database = providers
            .database
            .as_deref()
            .and_then(|name| Some((name, registry.database().get_instance(name)?)));
        match database {
            Some((name, instance)) => self.build_repositories(name, &instance.connection()),
            None => {
                if !self.config.repositories.entities.is_empty() {
                    warn!("Repository entities configured without a database provider");
                }
                Ok(RepositorySet::default())
            }
        }
    }

    fn build_repositories(&self, provider: &str, conn: &Connection) -> Result<RepositorySet> {
        let config = &self.config.repositories;
        let mut set = RepositorySet::default();

        for entity in &config.entities {
            if !has_repository_factory(&self.factories, provider, entity) {
                debug!(provider, entity = %entity, "No repository factory, skipping");
                continue;
            }
            let table = table_name(&config.table_prefix, entity);
            let repository =
                create_repository(&self.factories, provider, entity, Some(conn), &table)?;
            debug!(provider, entity = %entity, table = %table, "Repository created");
            set.insert(entity, repository);
        }
        Ok(set)
    }
}
