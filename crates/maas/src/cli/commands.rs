//! Argument definitions.

use clap::{ArgGroup, Args, Parser, Subcommand};
use maas_batch::{BatchOptions, DEFAULT_PATTERN, DEFAULT_WORKERS};
use maas_core::{ConfigOverrides, LogFormat, MaasConfig};
use maas_error::{IoError, MaasResult};
use std::path::PathBuf;

/// Command-line arguments for the maas binary.
#[derive(Parser, Debug)]
#[command(name = "maas")]
#[command(about = "Query models hosted on Vertex AI Model-as-a-Service")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub settings: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by every subcommand.
///
/// Each setting falls back to its `MAAS_*` environment variable; both take
/// precedence over the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "MAAS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Google Cloud project hosting the endpoint
    #[arg(long, global = true, env = "MAAS_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Vertex AI region
    #[arg(long, global = true, env = "MAAS_LOCATION")]
    pub location: Option<String>,

    /// Model identifier
    #[arg(long, global = true, env = "MAAS_MODEL_ID")]
    pub model_id: Option<String>,

    /// Maximum tokens to generate
    #[arg(long, global = true, env = "MAAS_MAX_TOKENS")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[arg(long, global = true, env = "MAAS_TEMPERATURE")]
    pub temperature: Option<f32>,

    /// Nucleus-sampling threshold
    #[arg(long, global = true, env = "MAAS_TOP_P")]
    pub top_p: Option<f32>,

    /// Base URL replacing the derived Vertex AI endpoint
    #[arg(long, global = true, env = "MAAS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Log output format (text or json)
    #[arg(long, global = true, env = "MAAS_LOG_FORMAT", default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl GlobalArgs {
    /// Settings given on the command line or through the environment.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            project_id: self.project_id.clone(),
            location: self.location.clone(),
            model_id: self.model_id.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            endpoint: self.endpoint.clone(),
        }
    }

    /// Builds the client configuration: defaults, then the file, then flags.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be loaded or the
    /// merged values are invalid.
    pub fn resolve_config(&self) -> MaasResult<MaasConfig> {
        let file = match &self.config {
            Some(path) => ConfigOverrides::from_file(path)?,
            None => ConfigOverrides::default(),
        };
        let config = MaasConfig::default().apply(&file.merge(self.overrides()))?;
        tracing::debug!(?config, "Resolved configuration");
        Ok(config)
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a single prompt and print the reply
    Query(QueryArgs),

    /// Send every matching file under a directory and store the replies
    Batch(BatchArgs),
}

/// Arguments of `maas query`.
#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("prompt").required(true).args(["text", "file"])))]
pub struct QueryArgs {
    /// Prompt text
    #[arg(short, long)]
    pub text: Option<String>,

    /// File whose contents are the prompt
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print the full response instead of the generated text
    #[arg(long)]
    pub all: bool,
}

impl QueryArgs {
    /// Returns the prompt, reading it from disk for `--file`.
    pub async fn prompt(&self) -> MaasResult<String> {
        match (&self.text, &self.file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => Ok(tokio::fs::read_to_string(path)
                .await
                .map_err(|e| IoError::new(path, &e))?),
            (None, None) => Ok(String::new()),
        }
    }
}

/// Arguments of `maas batch`.
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Directory scanned for input files
    pub input_dir: PathBuf,

    /// Directory receiving the manifest, logs and outputs
    pub output_dir: PathBuf,

    /// Glob pattern relative to the input directory
    #[arg(default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Number of concurrent workers
    #[arg(default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,
}

impl BatchArgs {
    /// Converts the arguments into batch options.
    pub fn options(&self) -> BatchOptions {
        BatchOptions::new(&self.input_dir, &self.output_dir)
            .with_pattern(self.pattern.clone())
            .with_workers(self.workers)
    }
}
