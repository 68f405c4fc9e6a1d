//! Directory traversal for `--path`
//!
//! Walks a root recursively, pruning version-control and build directories,
//! and hands every file that passes the basename glob and full-path regex
//! filters to a callback.

use std::path::Path;

use glob::Pattern as GlobPattern;
use regex::Regex;
use walkdir::WalkDir;

use crate::ReplacrError;
use crate::changeset::CompileError;

/// Directory names that are never descended into
pub static SKIPPED_DIRECTORIES: &[&str] = &[
    "autom4te.cache",
    "blib",
    "_build",
    ".bzr",
    ".cdv",
    "cover_db",
    "CVS",
    "_darcs",
    "~.dep",
    "~.dot",
    ".git",
    ".hg",
    "~.nib",
    ".pc",
    "~.plst",
    "RCS",
    "SCCS",
    "_sgbak",
    ".svn",
    "_obj",
    ".idea",
];

/// Filters applied to walked files
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    /// Glob matched against the file's basename
    pub pattern: Option<GlobPattern>,
    /// Regex matched against the full path
    pub regex: Option<Regex>,
}

impl PathFilter {
    /// Build a filter from the raw `--path-pattern` and `--path-regex` values.
    ///
    /// # Errors
    /// Returns `CompileError` with `PatternKind::Path` if either fails to parse.
    pub fn new(pattern: Option<&str>, regex: Option<&str>) -> Result<Self, CompileError> {
        let pattern = pattern
            .map(|p| GlobPattern::new(p).map_err(|e| CompileError::path(p, &e.to_string())))
            .transpose()?;
        let regex = regex
            .map(|r| Regex::new(r).map_err(|e| CompileError::path(r, &e.to_string())))
            .transpose()?;
        Ok(Self { pattern, regex })
    }

    /// Whether a file at `path` passes both filters
    #[must_use]
    pub fn accepts(&self, path: &Path) -> bool {
        if let Some(pattern) = &self.pattern {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            if !pattern.matches(&name) {
                return false;
            }
        }

        if let Some(regex) = &self.regex
            && !regex.is_match(&path.to_string_lossy())
        {
            return false;
        }

        true
    }
}

fn is_skipped_dir(name: &str) -> bool {
    SKIPPED_DIRECTORIES.contains(&name)
}

/// Walk `root` and invoke `callback` for every accepted file.
///
/// # Errors
/// Returns `ReplacrError::Traversal` if `root` itself cannot be read. Errors on
/// entries below the root are logged and skipped.
pub fn search_files_in_path<F>(
    root: &Path,
    filter: &PathFilter,
    mut callback: F,
) -> Result<(), ReplacrError>
where
    F: FnMut(&Path),
{
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        !(entry.file_type().is_dir() && is_skipped_dir(&entry.file_name().to_string_lossy()))
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(ReplacrError::Traversal {
                    root: root.to_path_buf(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        if filter.accepts(entry.path()) {
            callback(entry.path());
        }
    }

    Ok(())
}
