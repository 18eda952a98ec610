//! Tests for the env-driven builders
//!
//! Environment changes go through `figment::Jail`, which serializes tests
//! and restores the environment afterwards.

use bms_application::ports::registry::ProviderFactories;
use bms_application::ports::registry::database::build_database_provider_from_env;
use bms_application::ports::registry::id::build_id_provider_from_env;
use bms_domain::error::Error;
use bms_domain::ports::{
    AuthProvider, ChargeRequest, IdProvider, PaymentProvider, TranslationProvider,
};
use bms_providers::auth::MockAuthProvider;
use bms_providers::database::MockDatabaseProvider;
use bms_providers::payment::MockPaymentProvider;
use bms_providers::storage::MockStorageProvider;
use bms_providers::translation::MockTranslationProvider;
use figment::Jail;

#[test]
fn test_mock_db_reads_prefixed_env() {
    Jail::expect_with(|jail| {
        jail.set_env("BMS_MOCK_DB_NAME", "tenant_a");
        jail.set_env("BMS_MOCK_DB_FAIL_HEALTH", "true");

        let provider = MockDatabaseProvider::from_env().expect("valid env");
        assert_eq!(provider.config().name, "tenant_a");
        assert!(provider.config().fail_health);
        Ok(())
    });
}

#[test]
fn test_defaults_without_env() {
    Jail::expect_with(|_jail| {
        let provider = MockDatabaseProvider::from_env().expect("defaults");
        assert_eq!(provider.config().name, "bms");
        assert!(!provider.config().fail_health);

        let storage = MockStorageProvider::from_env().expect("defaults");
        assert_eq!(storage.bucket(), "bms-mock");
        Ok(())
    });
}

#[test]
fn test_invalid_env_fails_build() {
    Jail::expect_with(|jail| {
        jail.set_env("BMS_MOCK_DB_FAIL_HEALTH", "[1, 2]");

        let factories = ProviderFactories::new();
        bms_providers::register_all(&factories);

        let err = build_database_provider_from_env(&factories, "mock_db")
            .err()
            .expect("malformed env");
        match err {
            Error::Build { provider, source, .. } => {
                assert_eq!(provider, "mock_db");
                assert!(matches!(*source, Error::Configuration { .. }));
            }
            other => panic!("expected Build error, got {other:?}"),
        }
        Ok(())
    });
}

#[test]
fn test_id_prefix_from_env() {
    Jail::expect_with(|jail| {
        jail.set_env("BMS_ID_PREFIX", "ord_");

        let factories = ProviderFactories::new();
        bms_providers::register_all(&factories);

        let ids = build_id_provider_from_env(&factories, "sequential").expect("built");
        assert_eq!(ids.generate_id(), "ord_1");
        Ok(())
    });
}

#[test]
fn test_translation_locale_from_env() {
    Jail::expect_with(|jail| {
        jail.set_env("BMS_MOCK_TRANSLATION_DEFAULT_LOCALE", "pt");

        let provider = MockTranslationProvider::from_env().expect("valid env");
        assert_eq!(provider.default_locale(), "pt");
        Ok(())
    });
}

#[tokio::test]
async fn test_auth_tokens_and_payment_currency_from_env() {
    let mut auth = None;
    let mut payment = None;
    Jail::expect_with(|jail| {
        jail.set_env("BMS_MOCK_AUTH_TOKENS", "{tok123=\"user-1\"}");
        jail.set_env("BMS_MOCK_AUTH_TENANT_ID", "tenant-a");
        jail.set_env("BMS_MOCK_PAYMENT_CURRENCY", "EUR");

        auth = Some(MockAuthProvider::from_env().expect("valid auth env"));
        payment = Some(MockPaymentProvider::from_env().expect("valid payment env"));
        Ok(())
    });
    let auth = auth.expect("auth built");
    let payment = payment.expect("payment built");

    let identity = auth.authenticate("tok123").await.expect("known token");
    assert_eq!(identity.subject, "user-1");
    assert_eq!(identity.tenant_id.as_deref(), Some("tenant-a"));

    let receipt = payment
        .charge(&ChargeRequest {
            amount_minor: 1_500,
            currency: None,
            customer_id: "c1".to_string(),
            description: None,
        })
        .await
        .expect("charge approved");
    assert_eq!(receipt.currency, "EUR");
}
