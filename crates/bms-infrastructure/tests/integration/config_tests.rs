//! Configuration loading tests
//!
//! Every test runs inside `figment::Jail`: a scratch working directory and
//! an environment restored on exit.

use bms_infrastructure::config::{AppConfig, ConfigBuilder, ConfigLoader, ProvidersConfig};
use figment::Jail;

#[test]
fn test_defaults_without_file_or_env() {
    Jail::expect_with(|_jail| {
        let config = ConfigLoader::new().load().expect("defaults are valid");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.health.timeout_ms, 5000);
        assert!(config.providers.selected().is_empty());
        Ok(())
    });
}

#[test]
fn test_toml_file_in_working_directory_is_found() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "bms.toml",
            r#"
                [providers]
                database = "mock_db"
                id = "sequential"
                disabled = ["mock_auth"]

                [repositories]
                entities = ["client", "staff"]
                table_prefix = "acme_"
            "#,
        )?;

        let config = ConfigLoader::new().load().expect("valid file");
        assert_eq!(config.providers.database.as_deref(), Some("mock_db"));
        assert_eq!(config.providers.id.as_deref(), Some("sequential"));
        assert!(!config.providers.is_enabled("mock_auth"));
        assert_eq!(config.repositories.entities, vec!["client", "staff"]);
        assert_eq!(config.repositories.table_prefix, "acme_");
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
                [providers]
                database = "postgres"

                [health]
                timeout_ms = 1000
            "#,
        )?;
        jail.set_env("BMS_PROVIDERS__DATABASE", "mock_db");
        jail.set_env("BMS_HEALTH__TIMEOUT_MS", "250");
        jail.set_env("BMS_LOGGING__LEVEL", "debug");

        let config = ConfigLoader::new()
            .with_config_path("custom.toml")
            .load()
            .expect("valid layered config");
        assert_eq!(config.providers.database.as_deref(), Some("mock_db"));
        assert_eq!(config.health.timeout_ms, 250);
        assert_eq!(config.logging.level, "debug");
        Ok(())
    });
}

#[test]
fn test_adapter_env_vars_do_not_leak_into_app_config() {
    Jail::expect_with(|jail| {
        jail.set_env("BMS_MOCK_DB_NAME", "tenant_a");
        jail.set_env("BMS_LOG", "trace");

        let config = ConfigLoader::new().load().expect("unknown keys are ignored");
        assert_eq!(config, AppConfig::default());
        Ok(())
    });
}

#[test]
fn test_custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("ACME_PROVIDERS__EMAIL", "mock_email");
        jail.set_env("BMS_PROVIDERS__EMAIL", "ignored");

        let config = ConfigLoader::new()
            .with_env_prefix("ACME")
            .load()
            .expect("valid env");
        assert_eq!(config.providers.email.as_deref(), Some("mock_email"));
        Ok(())
    });
}

#[test]
fn test_missing_explicit_path_is_an_error() {
    Jail::expect_with(|_jail| {
        let err = ConfigLoader::new()
            .with_config_path("nope.toml")
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
        Ok(())
    });
}

#[test]
fn test_validation_rejects_bad_values() {
    Jail::expect_with(|jail| {
        jail.set_env("BMS_LOGGING__LEVEL", "loud");
        assert!(ConfigLoader::new().load().is_err());

        jail.set_env("BMS_LOGGING__LEVEL", "info");
        jail.set_env("BMS_HEALTH__TIMEOUT_MS", "0");
        assert!(ConfigLoader::new().load().is_err());

        jail.set_env("BMS_HEALTH__TIMEOUT_MS", "100");
        jail.set_env("BMS_PROVIDERS__STORAGE", " ");
        let err = ConfigLoader::new().load().unwrap_err();
        assert!(err.to_string().contains("storage"));
        Ok(())
    });
}

#[test]
fn test_entity_names_cannot_contain_separator() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "bms.toml",
            r#"
                [repositories]
                entities = ["client", "mock_db:staff"]
            "#,
        )?;
        let err = ConfigLoader::new().load().unwrap_err();
        assert!(err.to_string().contains("mock_db:staff"));
        Ok(())
    });
}

#[test]
fn test_save_then_load() {
    Jail::expect_with(|_jail| {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("saved.toml");

        let config = ConfigBuilder::new()
            .with_providers(ProvidersConfig {
                database: Some("mock_db".to_string()),
                translation: Some("mock_translation".to_string()),
                ..ProvidersConfig::default()
            })
            .with_entities(["client", "role"])
            .with_table_prefix("t_")
            .with_health_timeout_ms(750)
            .build();

        let loader = ConfigLoader::new().with_config_path(&path);
        loader.save_to_file(&config, &path).expect("saved");
        assert_eq!(loader.config_path(), Some(path.as_path()));
        assert_eq!(loader.load().expect("reloaded"), config);
        Ok(())
    });
}
