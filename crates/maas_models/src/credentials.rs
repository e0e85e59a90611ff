//! Access token discovery.
//!
//! Credential lookup is delegated to the ambient environment: an explicit
//! token in `MAAS_ACCESS_TOKEN`, or Application Default Credentials
//! (service-account key file, gcloud user login, or the metadata server).

use async_trait::async_trait;
use maas_error::AuthError;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// OAuth scope required by Vertex AI.
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Environment variable holding a pre-minted access token.
pub const ACCESS_TOKEN_ENV: &str = "MAAS_ACCESS_TOKEN";

/// Supplies bearer tokens for the inference endpoint.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Returns a currently valid access token.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when no token can be obtained or refreshed.
    async fn access_token(&self) -> Result<String, AuthError>;

    /// Short label for logs.
    fn describe(&self) -> &'static str;
}

/// A fixed, externally minted token.
#[derive(Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    /// Wraps `token`.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the token is blank.
    pub fn new(token: impl Into<String>) -> Result<Self, AuthError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(AuthError::new("Access token is empty"));
        }
        Ok(Self { token })
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticToken")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self) -> Result<String, AuthError> {
        Ok(self.token.clone())
    }

    fn describe(&self) -> &'static str {
        "static token"
    }
}

/// Google Application Default Credentials.
///
/// Tokens are cached and refreshed by the underlying provider.
pub struct ApplicationDefaultCredentials {
    provider: Arc<dyn gcp_auth::TokenProvider>,
}

impl ApplicationDefaultCredentials {
    /// Locates ambient credentials.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when no credential source is available.
    #[instrument]
    pub async fn discover() -> Result<Self, AuthError> {
        let provider = gcp_auth::provider().await.map_err(|e| {
            AuthError::new(format!("No application default credentials found: {e}"))
        })?;
        debug!("Application default credentials located");
        Ok(Self { provider })
    }
}

impl std::fmt::Debug for ApplicationDefaultCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationDefaultCredentials")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenSource for ApplicationDefaultCredentials {
    async fn access_token(&self) -> Result<String, AuthError> {
        let token = self
            .provider
            .token(&[CLOUD_PLATFORM_SCOPE])
            .await
            .map_err(|e| AuthError::new(format!("Failed to refresh access token: {e}")))?;
        Ok(token.as_str().to_string())
    }

    fn describe(&self) -> &'static str {
        "application default credentials"
    }
}

/// Picks the credential source from the environment.
///
/// `MAAS_ACCESS_TOKEN` wins when set; otherwise Application Default
/// Credentials are discovered.
pub async fn discover_credentials() -> Result<Arc<dyn TokenSource>, AuthError> {
    let source: Arc<dyn TokenSource> = match std::env::var(ACCESS_TOKEN_ENV) {
        Ok(token) if !token.trim().is_empty() => Arc::new(StaticToken::new(token)?),
        _ => Arc::new(ApplicationDefaultCredentials::discover().await?),
    };
    info!(source = source.describe(), "Using credentials");
    Ok(source)
}
