//! Batch run orchestration.

use crate::{
    BatchItem, BatchLayout, BatchOptions, BatchReport, WorkerPool, discover, partition,
    write_manifest,
};
use derive_getters::Getters;
use maas_error::{BatchError, BatchErrorKind, MaasResult};
use maas_models::CompletionClient;
use std::sync::Arc;
use tracing::{info, instrument};

/// Files found for a run, with the output layout already in place.
#[derive(Debug, Clone, Getters)]
pub struct BatchPlan {
    layout: BatchLayout,
    items: Vec<BatchItem>,
}

/// Drives a batch run against any [`CompletionClient`].
pub struct BatchRunner {
    client: Arc<dyn CompletionClient>,
    options: BatchOptions,
}

impl BatchRunner {
    /// Creates a runner.
    pub fn new(client: Arc<dyn CompletionClient>, options: BatchOptions) -> Self {
        Self { client, options }
    }

    /// Returns the options for this run.
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Validates options, creates the output layout, discovers inputs and
    /// writes the manifest.
    ///
    /// # Errors
    ///
    /// Fails on a zero worker count, a missing input directory, an invalid
    /// pattern, or when the layout or manifest cannot be written.
    #[instrument(skip(self), fields(input = %self.options.input_dir().display(), pattern = %self.options.pattern()))]
    pub async fn prepare(&self) -> MaasResult<BatchPlan> {
        let workers = *self.options.workers();
        if workers == 0 {
            return Err(BatchError::new(BatchErrorKind::InvalidWorkerCount(workers)).into());
        }

        // Directory walking and glob matching are blocking.
        let options = self.options.clone();
        let plan = tokio::task::spawn_blocking(move || plan_blocking(&options))
            .await
            .map_err(|e| BatchError::new(BatchErrorKind::PrepareFailed(e.to_string())))??;

        info!(
            count = plan.items.len(),
            manifest = %plan.layout.manifest_path().display(),
            "Found files"
        );
        Ok(plan)
    }

    /// Partitions the plan and runs the workers to completion.
    ///
    /// Item-level failures are recorded in the report, never returned.
    #[instrument(skip_all, fields(items = plan.items.len(), workers = *self.options.workers()))]
    pub async fn execute(&self, plan: BatchPlan) -> MaasResult<BatchReport> {
        let BatchPlan { layout, items } = plan;
        let discovered = items.len();
        let assignments = partition(items, *self.options.workers());
        let workers_spawned = assignments.len();

        let pool = WorkerPool::new(self.client.clone(), Arc::new(layout));
        let records = pool.run(assignments).await?;

        let report = BatchReport::new(discovered, workers_spawned, records);
        report.log_summary();
        Ok(report)
    }

    /// [`prepare`](Self::prepare) followed by [`execute`](Self::execute).
    pub async fn run(&self) -> MaasResult<BatchReport> {
        let plan = self.prepare().await?;
        self.execute(plan).await
    }
}

fn plan_blocking(options: &BatchOptions) -> MaasResult<BatchPlan> {
    let layout = BatchLayout::prepare(options.input_dir(), options.output_dir())?;
    let items = discover(layout.input_dir(), options.pattern())?;
    write_manifest(&layout.manifest_path(), &items)?;
    Ok(BatchPlan { layout, items })
}

/// Runs a whole batch with `client`.
pub async fn run_batch(
    client: Arc<dyn CompletionClient>,
    options: BatchOptions,
) -> MaasResult<BatchReport> {
    BatchRunner::new(client, options).run().await
}
