//! Batch command handler.

use super::BatchArgs;
use maas_batch::{BatchReport, BatchRunner};
use maas_core::MaasConfig;
use maas_error::MaasResult;
use maas_models::{CompletionClient, MaasClient};
use std::sync::Arc;

/// Handles the `batch` command.
///
/// Credentials are checked before any file is touched. Per-file failures
/// only show up in the report and the worker logs.
#[tracing::instrument(skip_all, fields(input = %args.input_dir.display(), workers = args.workers))]
pub async fn handle_batch(args: &BatchArgs, config: MaasConfig) -> MaasResult<BatchReport> {
    let client = Arc::new(MaasClient::connect(config).await?);
    run_batch_command(client, args).await
}

/// Runs the batch with an existing client, printing progress to stdout.
pub async fn run_batch_command(
    client: Arc<dyn CompletionClient>,
    args: &BatchArgs,
) -> MaasResult<BatchReport> {
    let runner = BatchRunner::new(client, args.options());
    let plan = runner.prepare().await?;
    println!(
        "Found {} files matching '{}'",
        plan.items().len(),
        args.pattern
    );

    let report = runner.execute(plan).await?;
    println!("{report}");
    if report.has_errors() {
        println!(
            "See {} for per-file errors",
            args.output_dir.join("processing_log.*.txt").display()
        );
    }
    Ok(report)
}
