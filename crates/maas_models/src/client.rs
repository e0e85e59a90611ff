//! Vertex AI Model-as-a-Service chat completions client.

use crate::{CompletionClient, TokenSource, discover_credentials};
use async_trait::async_trait;
use maas_core::{ChatCompletion, ChatRequest, MaasConfig};
use maas_error::{AuthError, HttpError, HttpErrorKind, MaasResult};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

/// Client for a model served through the OpenAI-compatible Vertex AI endpoint.
///
/// Cheap to clone; clones share the HTTP connection pool and token source.
#[derive(Clone)]
pub struct MaasClient {
    client: Client,
    config: Arc<MaasConfig>,
    tokens: Arc<dyn TokenSource>,
    url: String,
}

impl std::fmt::Debug for MaasClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaasClient")
            .field("model", self.config.model_id())
            .field("url", &self.url)
            .field("credentials", &self.tokens.describe())
            .finish()
    }
}

impl MaasClient {
    /// Creates a client using ambient credentials.
    ///
    /// A token is fetched immediately so missing or expired credentials are
    /// reported here rather than on the first query.
    ///
    /// # Errors
    ///
    /// Returns an authentication error when no usable credentials exist.
    #[instrument(skip_all, fields(model = %config.model_id(), location = %config.location()))]
    pub async fn connect(config: MaasConfig) -> MaasResult<Self> {
        if config.has_placeholder_project() && config.endpoint().is_none() {
            warn!(
                project_id = %config.project_id(),
                "Project id is still the placeholder; set MAAS_PROJECT_ID or --project-id"
            );
        }
        let tokens = discover_credentials().await?;
        Self::connect_with(config, tokens).await
    }

    /// Creates a client with an explicit token source, checking it first.
    ///
    /// # Errors
    ///
    /// Returns an authentication error when `tokens` cannot produce a token.
    pub async fn connect_with(
        config: MaasConfig,
        tokens: Arc<dyn TokenSource>,
    ) -> MaasResult<Self> {
        tokens.access_token().await.inspect_err(|e| {
            error!(credentials = tokens.describe(), error = %e, "No usable credentials");
        })?;
        Ok(Self::with_token_source(config, tokens))
    }

    /// Creates a client with an explicit token source.
    pub fn with_token_source(config: MaasConfig, tokens: Arc<dyn TokenSource>) -> Self {
        let url = config.chat_completions_url();

        debug!(
            model = %config.model_id(),
            url = %url,
            credentials = tokens.describe(),
            "Created MaaS client"
        );

        Self {
            client: Client::new(),
            config: Arc::new(config),
            tokens,
            url,
        }
    }

    /// Sends `prompt` as a single user message and returns the completion.
    ///
    /// # Errors
    ///
    /// - authentication error if no token can be obtained, or the endpoint
    ///   answers 401/403
    /// - HTTP error on transport failure or any other non-success status
    /// - parse error if the body is not a chat completion
    #[instrument(skip(self, prompt), fields(model = %self.config.model_id(), prompt_len = prompt.len()))]
    pub async fn query(&self, prompt: &str) -> MaasResult<ChatCompletion> {
        let token = self.tokens.access_token().await?;
        let request = ChatRequest::from_prompt(&self.config, prompt);

        debug!(url = %self.url, "Sending request");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                HttpError::transport(format!("Request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = %status, error = %error_text, "API error");

            if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
                return Err(AuthError::new(format!(
                    "Endpoint rejected credentials (status {}): {}",
                    status.as_u16(),
                    error_text
                ))
                .into());
            }
            return Err(HttpError::new(HttpErrorKind::Api {
                status: status.as_u16(),
                message: error_text,
            })
            .into());
        }

        let body = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read response body");
            HttpError::transport(format!("Failed to read response body: {e}"))
        })?;

        let completion = ChatCompletion::from_json(&body).inspect_err(|e| {
            error!(error = %e.message, "Failed to parse response");
        })?;

        debug!(
            choices = completion.choices.len(),
            total_tokens = ?completion.usage.as_ref().and_then(|u| u.total_tokens),
            "Received response"
        );

        Ok(completion)
    }

    /// Sends `prompt` and returns only the first choice's text.
    ///
    /// Returns an empty string when the response has no choice or the
    /// choice carries no content.
    pub async fn get_text(&self, prompt: &str) -> MaasResult<String> {
        let completion = self.query(prompt).await?;
        Ok(completion.text().unwrap_or_default().to_string())
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &MaasConfig {
        &self.config
    }

    /// Returns the model name.
    pub fn model_name(&self) -> &str {
        self.config.model_id()
    }
}

#[async_trait]
impl CompletionClient for MaasClient {
    async fn query(&self, prompt: &str) -> MaasResult<ChatCompletion> {
        MaasClient::query(self, prompt).await
    }

    fn model_name(&self) -> &str {
        MaasClient::model_name(self)
    }
}
