//! Summary of a finished run.

use crate::{ItemRecord, Outcome};
use derive_getters::Getters;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::info;

/// What a batch run did.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct BatchReport {
    /// Number of files in the manifest
    discovered: usize,
    /// Number of workers that were started
    workers_spawned: usize,
    /// Per-outcome totals; every tag is present, possibly with zero
    counts: BTreeMap<Outcome, usize>,
    /// One record per processed file, sorted by relative path
    records: Vec<ItemRecord>,
}

impl BatchReport {
    /// Builds the report from worker records.
    pub fn new(discovered: usize, workers_spawned: usize, mut records: Vec<ItemRecord>) -> Self {
        records.sort_by(|a, b| a.relative().cmp(b.relative()));
        let mut counts: BTreeMap<Outcome, usize> = Outcome::iter().map(|o| (o, 0)).collect();
        for record in &records {
            *counts.entry(*record.outcome()).or_default() += 1;
        }
        Self {
            discovered,
            workers_spawned,
            counts,
            records,
        }
    }

    /// Number of items tagged `outcome`.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.counts.get(&outcome).copied().unwrap_or_default()
    }

    /// True if any item was tagged `ERROR`.
    pub fn has_errors(&self) -> bool {
        self.count(Outcome::Error) > 0
    }

    /// Emits the summary as a structured log event.
    pub fn log_summary(&self) {
        info!(
            discovered = self.discovered,
            workers = self.workers_spawned,
            processed = self.count(Outcome::Processed),
            empty = self.count(Outcome::Empty),
            errors = self.count(Outcome::Error),
            gen_none = self.count(Outcome::GenNone),
            "Batch complete"
        );
    }
}

impl std::fmt::Display for BatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} files, {} workers: {} processed, {} empty, {} errors, {} without generated text",
            self.discovered,
            self.workers_spawned,
            self.count(Outcome::Processed),
            self.count(Outcome::Empty),
            self.count(Outcome::Error),
            self.count(Outcome::GenNone),
        )
    }
}
