//! Output sink and run reporting
//!
//! [`write_content`] persists a processed buffer to its output path, or hands
//! it back unwritten in dry-run mode. [`report`] holds the reporter used for
//! verbose per-file blocks and error lines.

pub mod report;

use std::fs;

use crate::engine::FileError;
use crate::files::FileItem;

pub use report::{BufferedReporter, MessageLevel, Reporter, StderrReporter, format_file_report};

/// Persist `content` to the item's output path.
///
/// In dry-run mode nothing is written and the content itself is returned as
/// the report text; otherwise a one-line confirmation is returned.
///
/// # Errors
/// Returns `FileError::Write` if the output file cannot be written.
pub fn write_content(item: &FileItem, content: String, dry_run: bool) -> Result<String, FileError> {
    if dry_run {
        return Ok(content);
    }

    fs::write(&item.output, content.as_bytes()).map_err(|e| FileError::write(&item.output, e))?;
    tracing::debug!(path = %item.output.display(), bytes = content.len(), "wrote output");
    Ok(format!("{} found and replaced match", item.path.display()))
}
