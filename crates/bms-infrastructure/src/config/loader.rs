//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables,
//! and default values, merged with Figment.

use std::env;
use std::path::{Path, PathBuf};

use bms_domain::constants::KEY_SEPARATOR;
use bms_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};

use crate::config::{AppConfig, LoggingConfig, ProvidersConfig, RepositoriesConfig};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default location found)
    /// 3. Environment variables with prefix, `__` between nested keys
    ///    (e.g. `BMS_PROVIDERS__DATABASE=mock_db`)
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if !config_path.exists() {
                log_config_loaded(config_path, false);
                return Err(Error::configuration(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
            figment = figment.merge(Toml::file(config_path));
            log_config_loaded(config_path, true);
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configured file path, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_logging_config(&config.logging)?;
    validate_providers_config(&config.providers)?;
    validate_repositories_config(&config.repositories)?;
    if config.health.timeout_ms == 0 {
        return Err(Error::configuration("Health timeout cannot be 0"));
    }
    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    parse_log_level(&config.level).map(|_| ())
}

fn validate_providers_config(config: &ProvidersConfig) -> Result<()> {
    for (category, name) in config.selected() {
        if name.trim().is_empty() {
            return Err(Error::configuration(format!(
                "Provider name for category '{category}' cannot be empty"
            )));
        }
    }
    Ok(())
}

fn validate_repositories_config(config: &RepositoriesConfig) -> Result<()> {
    for entity in &config.entities {
        if entity.trim().is_empty() {
            return Err(Error::configuration("Repository entity name cannot be empty"));
        }
        if entity.contains(KEY_SEPARATOR) {
            return Err(Error::configuration(format!(
                "Repository entity name '{entity}' cannot contain '{KEY_SEPARATOR}'"
            )));
        }
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set provider selection
    pub fn with_providers(mut self, providers: ProvidersConfig) -> Self {
        self.config.providers = providers;
        self
    }

    /// Set the entities to build repositories for
    pub fn with_entities<I, S>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.repositories.entities = entities.into_iter().map(Into::into).collect();
        self
    }

    /// Set the table prefix
    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.repositories.table_prefix = prefix.into();
        self
    }

    /// Set the health sweep deadline
    pub fn with_health_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.health.timeout_ms = timeout_ms;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}
