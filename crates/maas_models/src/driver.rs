//! Trait seam between callers and the remote endpoint.

use async_trait::async_trait;
use maas_core::ChatCompletion;
use maas_error::MaasResult;

/// Anything that can answer a single prompt with a chat completion.
///
/// The batch driver only depends on this trait, so it can be exercised
/// against an in-memory implementation.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends `prompt` and returns the parsed completion.
    async fn query(&self, prompt: &str) -> MaasResult<ChatCompletion>;

    /// Sends `prompt` and returns the first choice's text, or an empty string.
    async fn get_text(&self, prompt: &str) -> MaasResult<String> {
        let completion = self.query(prompt).await?;
        Ok(completion.text().unwrap_or_default().to_string())
    }

    /// Model identifier used for requests.
    fn model_name(&self) -> &str;
}
