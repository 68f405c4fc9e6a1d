//! Run command - process every selected file on the worker pool

use std::io;

use crate::ReplacrError;
use crate::changeset::{Changeset, compile_changesets};
use crate::commands::{InputSource, RunConfig, WalkSpec, process_stdin};
use crate::dispatch::{Dispatcher, RunSummary, summarize};
use crate::engine::apply_changesets_to_file;
use crate::files::walk::{PathFilter, search_files_in_path};
use crate::files::{FileItem, OutputTarget, build_file_items, walked_file_item};
use crate::options::{Mode, ProcessOptions};
use crate::output::Reporter;
use crate::template::apply_template_to_file;

type Result<T> = std::result::Result<T, ReplacrError>;

/// Execute a run
///
/// Configuration and compile errors abort before any file is touched.
/// Per-file failures are reported through `reporter` and counted; if any
/// occurred the run returns `ReplacrError::FilesFailed`.
///
/// # Errors
/// Returns `Config`, `Compile`, `Traversal` or `ThreadPool` errors before
/// processing starts, and `FilesFailed` after processing if any file failed.
pub fn execute(config: &RunConfig, reporter: &dyn Reporter) -> Result<RunSummary> {
    config.validate()?;

    let changesets = compile_changesets(&config.search, &config.replace, &config.match_options)?;
    let options = config.process_options()?;

    match &config.input {
        InputSource::Stdin => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            process_stdin(config, &changesets, stdin.lock(), &mut stdout.lock())?;
            Ok(RunSummary {
                total: 1,
                failed: 0,
            })
        }
        InputSource::Files { args, walk } => {
            let items = collect_file_items(args, walk.as_ref(), &config.target)?;
            run_files(config, &changesets, &options, items, reporter)
        }
    }
}

/// Positional file items first, then files found by walking.
///
/// # Errors
/// Returns `Compile` for invalid walk filters and `Traversal` if the walk
/// root cannot be read.
pub fn collect_file_items(
    args: &[String],
    walk: Option<&WalkSpec>,
    target: &OutputTarget,
) -> Result<Vec<FileItem>> {
    let mut items = build_file_items(args, target);

    if let Some(walk) = walk {
        let filter = PathFilter::new(walk.pattern.as_deref(), walk.regex.as_deref())?;
        search_files_in_path(&walk.root, &filter, |path| {
            items.push(walked_file_item(path, target));
        })?;
    }

    Ok(items)
}

fn run_files(
    config: &RunConfig,
    changesets: &[Changeset],
    options: &ProcessOptions,
    items: Vec<FileItem>,
    reporter: &dyn Reporter,
) -> Result<RunSummary> {
    if items.is_empty() {
        if config.ignore_empty {
            reporter.info("No files found, nothing to do");
            return Ok(RunSummary::default());
        }
        return Err(ReplacrError::Config("No files specified".into()));
    }

    let dispatcher = Dispatcher::new(config.threads)?;
    tracing::debug!(files = items.len(), mode = ?config.mode, "dispatching");

    let outcomes = if config.mode == Mode::Template {
        dispatcher.dispatch(items, changesets, |item, changesets| {
            apply_template_to_file(item, &changesets, config.dry_run)
        })
    } else {
        dispatcher.dispatch(items, changesets, |item, changesets| {
            apply_changesets_to_file(item, changesets, options)
        })
    };

    let summary = summarize(&outcomes, reporter, config.verbose || config.dry_run);

    if summary.is_success() {
        Ok(summary)
    } else {
        Err(ReplacrError::FilesFailed {
            count: summary.failed,
        })
    }
}
