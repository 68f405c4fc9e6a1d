//! Per-file error types
//!
//! A `FileError` aborts processing of one file only. The dispatcher collects
//! them into the run summary; other files keep going.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure while processing a single file
#[derive(Debug, Error)]
pub enum FileError {
    /// The input could not be opened or read
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output could not be written
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The template failed to parse or render
    #[error("Template error in '{}': {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },
}

impl FileError {
    #[must_use]
    pub fn read(path: &Path, source: io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    #[must_use]
    pub fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    #[must_use]
    pub fn template(path: &Path, source: minijinja::Error) -> Self {
        Self::Template {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Path of the file the error belongs to
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } | Self::Template { path, .. } => {
                path
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_read_error_display() {
        let err = FileError::read(
            Path::new("missing.txt"),
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("Failed to read"));
        assert!(msg.contains("missing.txt"));
        assert_eq!(err.path(), Path::new("missing.txt"));
    }

    #[test]
    fn test_write_error_has_source() {
        let err = FileError::write(
            Path::new("out.txt"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.source().is_some());
        assert!(err.to_string().contains("denied"));
    }
}
