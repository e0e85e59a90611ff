//! A single batch worker.
//!
//! A worker owns its task list and its log file; it shares nothing mutable
//! with other workers.

use crate::{BatchItem, BatchLayout, ItemRecord, Outcome};
use maas_error::{IoError, MaasErrorKind, MaasResult};
use maas_models::CompletionClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

/// Append-only log of one worker's outcomes.
struct WorkerLog {
    path: PathBuf,
    file: fs::File,
}

impl WorkerLog {
    async fn open(path: PathBuf) -> MaasResult<Self> {
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| IoError::new(&path, &e))?;
        Ok(Self { path, file })
    }

    async fn append(&mut self, record: &ItemRecord) -> MaasResult<()> {
        let line = format!("{}\n", record.log_line());
        self.file
            .write_all(line.as_bytes())
            .await
            .map_err(|e| IoError::new(&self.path, &e))?;
        self.file
            .flush()
            .await
            .map_err(|e| IoError::new(&self.path, &e))?;
        Ok(())
    }
}

/// Processes a fixed list of items sequentially.
pub(crate) struct Worker {
    id: usize,
    items: Vec<BatchItem>,
    client: Arc<dyn CompletionClient>,
    layout: Arc<BatchLayout>,
}

impl Worker {
    pub(crate) fn new(
        id: usize,
        items: Vec<BatchItem>,
        client: Arc<dyn CompletionClient>,
        layout: Arc<BatchLayout>,
    ) -> Self {
        Self {
            id,
            items,
            client,
            layout,
        }
    }

    /// Runs every assigned item and returns their records.
    ///
    /// Item failures become `ERROR` records; only a failure to write the
    /// worker's own log ends the run early.
    #[instrument(skip_all, fields(worker = self.id, assigned = self.items.len()))]
    pub(crate) async fn run(self) -> MaasResult<Vec<ItemRecord>> {
        let mut log = WorkerLog::open(self.layout.log_path(self.id)).await?;
        let total = self.items.len();
        let mut records = Vec::with_capacity(total);

        for (done, item) in self.items.iter().enumerate() {
            let (outcome, detail) = process_item(self.client.as_ref(), &self.layout, item).await;
            if outcome == Outcome::Error {
                warn!(
                    file = %item.relative().display(),
                    error = detail.as_deref().unwrap_or_default(),
                    "Item failed"
                );
            }

            let record = ItemRecord::new(item.relative().clone(), self.id, outcome, detail);
            log.append(&record).await?;
            info!(
                progress = %format!("{}/{}", done + 1, total),
                outcome = %outcome,
                file = %item.relative().display(),
                "Processed file"
            );
            records.push(record);
        }

        debug!("Worker finished");
        Ok(records)
    }
}

/// Classifies one item, turning every failure into an outcome.
async fn process_item(
    client: &dyn CompletionClient,
    layout: &BatchLayout,
    item: &BatchItem,
) -> (Outcome, Option<String>) {
    match try_process_item(client, layout, item).await {
        Ok(result) => result,
        Err(e) => (Outcome::Error, Some(e.to_string())),
    }
}

async fn try_process_item(
    client: &dyn CompletionClient,
    layout: &BatchLayout,
    item: &BatchItem,
) -> MaasResult<(Outcome, Option<String>)> {
    let bytes = fs::read(item.path())
        .await
        .map_err(|e| IoError::new(item.path(), &e))?;
    let content = String::from_utf8_lossy(&bytes);

    let raw_path = layout.raw_path(item.relative());
    let gen_path = layout.generated_path(item.relative());
    create_parent(&raw_path).await?;

    if content.trim().is_empty() {
        write(&raw_path, "").await?;
        return Ok((Outcome::Empty, None));
    }
    create_parent(&gen_path).await?;

    let completion = match client.query(&content).await {
        Ok(completion) => completion,
        Err(e) => {
            if let MaasErrorKind::Parse(parse) = e.kind() {
                write(&raw_path, &parse.body).await?;
                return Ok((Outcome::GenNone, Some(parse.message.clone())));
            }
            return Err(e);
        }
    };

    write(&raw_path, &completion.to_pretty_json()).await?;

    match completion.text().filter(|text| !text.is_empty()) {
        Some(text) => {
            write(&gen_path, text).await?;
            Ok((Outcome::Processed, None))
        }
        None => Ok((Outcome::GenNone, None)),
    }
}

async fn create_parent(path: &Path) -> MaasResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| IoError::new(parent, &e))?;
    }
    Ok(())
}

async fn write(path: &Path, contents: &str) -> MaasResult<()> {
    fs::write(path, contents)
        .await
        .map_err(|e| IoError::new(path, &e))?;
    Ok(())
}
