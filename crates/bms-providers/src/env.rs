//! Environment-driven adapter configuration
//!
//! Env builders start from the adapter config's `Default` and overlay the
//! variables under the adapter's own prefix, so `BMS_MOCK_DB_FAIL_HEALTH=true`
//! sets `fail_health` on the mock database config.

use bms_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read `C` from the variables starting with `prefix`, over `C::default()`
pub fn from_env<C>(prefix: &str) -> Result<C>
where
    C: Default + Serialize + DeserializeOwned,
{
    Figment::new()
        .merge(Serialized::defaults(C::default()))
        .merge(Env::prefixed(prefix))
        .extract()
        .map_err(|err| {
            Error::configuration_with_source(format!("Invalid {prefix}* environment"), err)
        })
}
