//! File selection
//!
//! Turns positional arguments (and, via [`walk`], a directory tree) into
//! [`FileItem`]s pairing an input path with the path the result is written to.

pub mod walk;

use std::path::{Path, PathBuf};

/// An input file and the path its output is written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    pub path: PathBuf,
    pub output: PathBuf,
}

impl FileItem {
    /// A file that is rewritten in place
    #[must_use]
    pub fn in_place(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            output: path.clone(),
            path,
        }
    }

    #[must_use]
    pub fn new(path: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            output: output.into(),
        }
    }
}

/// Global output redirection requested on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write back to the input path (or a `source:destination` override)
    #[default]
    InPlace,
    /// Write the single input file to this path
    Explicit(PathBuf),
    /// Strip this suffix from each input path to get its output path
    StripExtension(String),
}

impl OutputTarget {
    /// Whether this target forces a write even when nothing matched
    #[must_use]
    pub const fn forces_write(&self) -> bool {
        !matches!(self, Self::InPlace)
    }
}

/// Strip `suffix` from the end of `path`, if present
#[must_use]
pub fn strip_suffix(path: &Path, suffix: &str) -> PathBuf {
    let s = path.to_string_lossy();
    match s.strip_suffix(suffix) {
        Some(stripped) => PathBuf::from(stripped),
        None => path.to_path_buf(),
    }
}

/// Build file items from positional arguments.
///
/// An argument of the form `source:destination` reads from `source` and writes
/// to `destination`, unless an explicit output or extension stripping is set.
#[must_use]
pub fn build_file_items(args: &[String], target: &OutputTarget) -> Vec<FileItem> {
    args.iter()
        .map(|arg| match target {
            OutputTarget::Explicit(output) => FileItem::new(arg, output.clone()),
            OutputTarget::StripExtension(ext) => {
                FileItem::new(arg, strip_suffix(Path::new(arg), ext))
            }
            OutputTarget::InPlace => match arg.split_once(':') {
                Some((source, destination)) => FileItem::new(source, destination),
                None => FileItem::in_place(arg),
            },
        })
        .collect()
}

/// Build the file item for a path found while walking a directory
#[must_use]
pub fn walked_file_item(path: &Path, target: &OutputTarget) -> FileItem {
    match target {
        OutputTarget::StripExtension(ext) => FileItem::new(path, strip_suffix(path, ext)),
        _ => FileItem::in_place(path),
    }
}
