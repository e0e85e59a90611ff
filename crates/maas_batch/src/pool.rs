//! Static partitioning and the worker pool.

use crate::worker::Worker;
use crate::{BatchItem, BatchLayout, ItemRecord};
use maas_error::{BatchError, BatchErrorKind, MaasError, MaasResult};
use maas_models::CompletionClient;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info};

/// Splits `items` round-robin into at most `workers` task lists.
///
/// No list is empty, so the number of lists is `min(workers, items.len())`;
/// a worker count of zero is treated as one. The split is decided once and
/// never rebalanced.
///
/// # Examples
///
/// ```
/// use maas_batch::{BatchItem, partition};
/// use std::path::{Path, PathBuf};
///
/// let root = Path::new("/in");
/// let items: Vec<_> = ["a.rs", "b.rs", "c.rs"]
///     .iter()
///     .filter_map(|name| BatchItem::new(root, root.join(name)))
///     .collect();
///
/// let plan = partition(items, 2);
/// assert_eq!(plan.len(), 2);
/// assert_eq!(plan[0].len(), 2);
/// assert_eq!(plan[1].len(), 1);
/// ```
pub fn partition(items: Vec<BatchItem>, workers: usize) -> Vec<Vec<BatchItem>> {
    let count = workers.max(1).min(items.len());
    let mut plan: Vec<Vec<BatchItem>> = (0..count).map(|_| Vec::new()).collect();
    for (index, item) in items.into_iter().enumerate() {
        plan[index % count].push(item);
    }
    plan
}

/// Runs one task per non-empty task list.
pub struct WorkerPool {
    client: Arc<dyn CompletionClient>,
    layout: Arc<BatchLayout>,
}

impl WorkerPool {
    /// Creates a pool sharing `client` and `layout` across workers.
    pub fn new(client: Arc<dyn CompletionClient>, layout: Arc<BatchLayout>) -> Self {
        Self { client, layout }
    }

    /// Executes `plan`, one worker per entry, ids starting at 1.
    ///
    /// Waits for every worker even if one fails, then reports the first
    /// failure.
    pub async fn run(&self, plan: Vec<Vec<BatchItem>>) -> MaasResult<Vec<ItemRecord>> {
        let total: usize = plan.iter().map(Vec::len).sum();
        info!(workers = plan.len(), items = total, "Starting workers");

        let mut set = JoinSet::new();
        for (index, items) in plan.into_iter().enumerate() {
            let worker = Worker::new(index + 1, items, self.client.clone(), self.layout.clone());
            set.spawn(worker.run());
        }

        let mut records = Vec::with_capacity(total);
        let mut first_error: Option<MaasError> = None;
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(Ok(mut finished)) => records.append(&mut finished),
                Ok(Err(e)) => {
                    error!(error = %e, "Worker stopped");
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    error!(error = %e, "Worker task aborted");
                    first_error.get_or_insert(
                        BatchError::new(BatchErrorKind::WorkerFailed(e.to_string())).into(),
                    );
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::{Path, PathBuf};

    fn items(n: usize) -> Vec<BatchItem> {
        let root = Path::new("/input");
        (0..n)
            .filter_map(|i| BatchItem::new(root, root.join(format!("f{i}.rs"))))
            .collect()
    }

    #[test]
    fn test_every_item_assigned_exactly_once() {
        for workers in 1..=6 {
            for n in 0..=10 {
                let plan = partition(items(n), workers);
                assert!(plan.len() <= workers);
                assert!(plan.iter().all(|list| !list.is_empty()));

                let assigned: Vec<PathBuf> = plan
                    .iter()
                    .flatten()
                    .map(|item| item.relative().clone())
                    .collect();
                let unique: HashSet<_> = assigned.iter().collect();
                assert_eq!(assigned.len(), n);
                assert_eq!(unique.len(), n);
            }
        }
    }

    #[test]
    fn test_no_items_means_no_workers() {
        assert!(partition(Vec::new(), 4).is_empty());
    }

    #[test]
    fn test_round_robin_balances() {
        let plan = partition(items(7), 3);
        let sizes: Vec<_> = plan.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 2, 2]);
    }
}
