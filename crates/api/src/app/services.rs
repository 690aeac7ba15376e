use std::sync::Arc;

use duenos_auth::{CredentialStore, Hs256JwtIssuer};
use duenos_infra::OwnerStore;

use crate::config::ApiConfig;

/// Shared handles every handler may reach through the `Extension` layer.
pub struct AppServices {
    pub owners: Arc<dyn OwnerStore>,
    pub credentials: Arc<dyn CredentialStore>,
    pub tokens: Hs256JwtIssuer,
}

impl core::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppServices")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

/// Wire the services for one process from configuration and an injected store.
pub fn build_services(config: &ApiConfig, owners: Arc<dyn OwnerStore>) -> AppServices {
    AppServices {
        owners,
        credentials: Arc::new(config.credential_store()),
        tokens: Hs256JwtIssuer::new(config.jwt_secret.clone().into_bytes(), config.token_ttl),
    }
}
