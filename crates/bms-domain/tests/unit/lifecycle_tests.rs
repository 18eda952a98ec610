//! Default lifecycle capability tests

use bms_domain::ports::{IdProvider, ProviderLifecycle};

struct CounterIds;

impl ProviderLifecycle for CounterIds {
    fn provider_name(&self) -> &str {
        "counter"
    }
}

impl IdProvider for CounterIds {
    fn generate_id(&self) -> String {
        "1".to_string()
    }
}

#[tokio::test]
async fn test_default_capabilities_are_healthy_and_closeable() {
    let provider = CounterIds;
    assert!(provider.health_check().await.is_ok());
    assert!(provider.close().await.is_ok());
    assert_eq!(provider.generate_id(), "1");
}
