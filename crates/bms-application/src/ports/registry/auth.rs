//! Auth Provider Registry

use std::collections::HashMap;
use std::path::PathBuf;

use bms_domain::ports::AuthProvider;
use serde::{Deserialize, Serialize};

/// Configuration for authentication provider creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthProviderConfig {
    /// Provider name (e.g., "firebase", "jwt", "mock_auth")
    pub provider: String,
    /// Identity project / tenant pool
    pub project_id: Option<String>,
    /// Expected token issuer
    pub issuer: Option<String>,
    /// Expected token audience
    pub audience: Option<String>,
    /// Service account or key file
    pub credentials_path: Option<PathBuf>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl AuthProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the identity project
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set the expected issuer
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }
}

provider_facade! {
    label: "auth",
    port: AuthProvider,
    config: AuthProviderConfig,
    registry: AuthProviderRegistry,
    accessor: auth,
    register_factory: register_auth_provider_factory,
    get_factory: get_auth_provider_factory,
    list_factories: list_available_auth_provider_factories,
    register_transformer: register_auth_config_transformer,
    get_transformer: get_auth_config_transformer,
    transform: transform_auth_config,
    register_builder: register_auth_build_from_env,
    get_builder: get_auth_build_from_env,
    build: build_auth_provider_from_env,
    list_builders: list_available_auth_build_from_env,
}
