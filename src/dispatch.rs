//! Concurrent file dispatcher
//!
//! Runs one task per file on a bounded `rayon` pool whose size is the
//! configured thread count. Every task receives its own copy of the
//! changesets, so matched flags never cross file boundaries. Results come
//! back as one [`ProcessingOutcome`] per file and are aggregated only after
//! every task has finished.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::ReplacrError;
use crate::changeset::Changeset;
use crate::engine::FileError;
use crate::files::FileItem;
use crate::output::Reporter;

/// Result of processing one file
#[derive(Debug)]
pub struct ProcessingOutcome {
    pub item: FileItem,
    /// Report text on success (status line, or content in dry-run)
    pub result: Result<String, FileError>,
}

impl ProcessingOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregate counts for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub failed: usize,
}

impl RunSummary {
    #[must_use]
    pub const fn succeeded(&self) -> usize {
        self.total - self.failed
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Bounded worker pool for per-file tasks
pub struct Dispatcher {
    pool: ThreadPool,
    threads: usize,
}

impl Dispatcher {
    /// Create a dispatcher running at most `threads` files at once.
    ///
    /// # Errors
    /// Returns `ReplacrError::Config` for a zero thread count and
    /// `ReplacrError::ThreadPool` if the pool cannot be started.
    pub fn new(threads: usize) -> Result<Self, ReplacrError> {
        if threads == 0 {
            return Err(ReplacrError::Config("Thread count must be at least 1".into()));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("replacr-worker-{i}"))
            .build()
            .map_err(|e| ReplacrError::ThreadPool(e.to_string()))?;

        tracing::debug!(threads, "worker pool ready");
        Ok(Self { pool, threads })
    }

    /// Configured pool size
    #[must_use]
    pub const fn threads(&self) -> usize {
        self.threads
    }

    /// Run `task` for every item and collect one outcome per item.
    ///
    /// Blocks until all tasks have completed. The order of the returned
    /// outcomes carries no meaning.
    pub fn dispatch<F>(
        &self,
        items: Vec<FileItem>,
        changesets: &[Changeset],
        task: F,
    ) -> Vec<ProcessingOutcome>
    where
        F: Fn(&FileItem, Vec<Changeset>) -> Result<String, FileError> + Sync,
    {
        self.pool.install(|| {
            items
                .into_par_iter()
                .map(|item| {
                    let result = task(&item, changesets.to_vec());
                    ProcessingOutcome { item, result }
                })
                .collect()
        })
    }
}

/// Report failures (and, when verbose, each file's output) and count them.
///
/// Every report is a single reporter call, so blocks from different files
/// never interleave.
pub fn summarize(
    outcomes: &[ProcessingOutcome],
    reporter: &dyn Reporter,
    verbose: bool,
) -> RunSummary {
    let mut failed = 0;

    for outcome in outcomes {
        match &outcome.result {
            Err(e) => {
                reporter.error(&e.to_string());
                failed += 1;
            }
            Ok(report) if verbose => reporter.file_report(&outcome.item.path, report),
            Ok(_) => {}
        }
    }

    RunSummary {
        total: outcomes.len(),
        failed,
    }
}
