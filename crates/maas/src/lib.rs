//! Client and batch processor for models served through Vertex AI
//! Model-as-a-Service.
//!
//! This crate re-exports the workspace crates and hosts the `maas` binary.
//!
//! ```no_run
//! use maas::{MaasClient, MaasConfig};
//!
//! # async fn demo() -> maas::MaasResult<()> {
//! let config = MaasConfig::builder()
//!     .project_id("my-project")
//!     .build()
//!     .expect("valid config");
//! let client = MaasClient::connect(config).await?;
//! println!("{}", client.get_text("Say hello in one word").await?);
//! # Ok(())
//! # }
//! ```

pub mod cli;

pub use maas_batch::{
    BatchItem, BatchLayout, BatchOptions, BatchOptionsBuilder, BatchPlan, BatchReport,
    BatchRunner, DEFAULT_PATTERN, DEFAULT_WORKERS, ItemRecord, Outcome, run_batch,
};
pub use maas_core::{
    ChatCompletion, ChatMessage, ChatRequest, ConfigOverrides, LogFormat, MaasConfig,
    MaasConfigBuilder, init_tracing,
};
pub use maas_error::{MaasError, MaasErrorKind, MaasResult};
pub use maas_models::{CompletionClient, MaasClient, TokenSource};
