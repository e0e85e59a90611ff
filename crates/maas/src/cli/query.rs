//! Single query command handler.

use super::QueryArgs;
use maas_core::{ChatCompletion, MaasConfig};
use maas_error::MaasResult;
use maas_models::{CompletionClient, MaasClient};

/// Handles the `query` command: connects, sends the prompt, prints the reply.
#[tracing::instrument(skip_all, fields(all = args.all))]
pub async fn handle_query(args: &QueryArgs, config: MaasConfig) -> MaasResult<()> {
    let prompt = args.prompt().await?;
    let client = MaasClient::connect(config).await?;
    let output = query_with(&client, &prompt, args.all).await?;
    println!("{output}");
    Ok(())
}

/// Sends `prompt` through `client` and renders the reply for printing.
pub(crate) async fn query_with(
    client: &dyn CompletionClient,
    prompt: &str,
    all: bool,
) -> MaasResult<String> {
    let completion = client.query(prompt).await?;
    Ok(render_completion(&completion, all))
}

/// Formats a completion: the full JSON document when `all` is set,
/// otherwise the generated text.
pub fn render_completion(completion: &ChatCompletion, all: bool) -> String {
    if all {
        completion.to_pretty_json()
    } else {
        completion.text().unwrap_or_default().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    const BODY: &str = r#"{"id":"c1","model":"m","choices":[{"index":0,"message":{"role":"assistant","content":"Hello"}}]}"#;

    struct Fixed;

    #[async_trait]
    impl CompletionClient for Fixed {
        async fn query(&self, _prompt: &str) -> MaasResult<ChatCompletion> {
            Ok(ChatCompletion::from_json(BODY)?)
        }

        fn model_name(&self) -> &str {
            "m"
        }
    }

    #[tokio::test]
    async fn test_query_prints_text_by_default() {
        let output = query_with(&Fixed, "hi", false).await.expect("Query");
        assert_eq!(output, "Hello");
    }

    #[tokio::test]
    async fn test_all_prints_full_response() {
        let output = query_with(&Fixed, "hi", true).await.expect("Query");
        assert!(output.contains("\"choices\""));
        assert!(output.contains("\"id\": \"c1\""));
    }
}
