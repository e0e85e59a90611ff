//! maas - query models hosted on Vertex AI Model-as-a-Service.
//!
//! `maas query` sends a single prompt; `maas batch` sends every matching file
//! under a directory and stores the replies next to per-worker logs.

use anyhow::Context;
use clap::Parser;
use maas::cli::{Cli, Commands, handle_batch, handle_query};
use maas::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before clap reads MAAS_* variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.settings.log_format);

    let config = cli
        .settings
        .resolve_config()
        .context("Failed to load configuration")?;
    info!(
        model = %config.model_id(),
        location = %config.location(),
        "Configuration loaded"
    );

    match &cli.command {
        Commands::Query(args) => handle_query(args, config)
            .await
            .context("Query failed")?,
        Commands::Batch(args) => {
            handle_batch(args, config)
                .await
                .context("Batch run failed")?;
        }
    }

    Ok(())
}
