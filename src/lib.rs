//! Replacr - batch search and replace across files
//!
//! This library applies an ordered list of search/replace rules to a set of
//! files (or standard input) in one of four modes: substring replace,
//! whole-line replace, line-in-file insertion, and template rendering. Files
//! are processed concurrently on a bounded worker pool; each file task owns a
//! private copy of the rule list.

use std::path::PathBuf;
use thiserror::Error;

pub mod changeset;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod files;
pub mod options;
pub mod output;
pub mod template;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all run-level failure states of the program
///
/// Failures tied to a single file are [`engine::FileError`]s; they are
/// collected by the dispatcher and only surface here as `FilesFailed`.
#[derive(Debug, Error)]
pub enum ReplacrError {
    /// Conflicting or incomplete options
    #[error("{0}")]
    Config(String),
    /// A search, anchor or path pattern failed to compile
    #[error("{0}")]
    Compile(#[from] changeset::CompileError),
    /// Configuration file or environment could not be loaded
    #[error("Configuration error: {0}")]
    Settings(#[from] ::config::ConfigError),
    /// Represents an I/O error outside of per-file processing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The traversal root could not be read
    #[error("Cannot walk '{}': {reason}", root.display())]
    Traversal { root: PathBuf, reason: String },
    /// The worker pool could not be created
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(String),
    /// Template read from standard input failed to render
    #[error("Template error: {0}")]
    Template(String),
    /// One or more files failed to process
    #[error("One or more files failed ({count})")]
    FilesFailed { count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display_is_bare() {
        let err = ReplacrError::Config("Unequal numbers of search or replace options".into());
        assert_eq!(err.to_string(), "Unequal numbers of search or replace options");
    }

    #[test]
    fn test_compile_error_converts() {
        let err: ReplacrError = changeset::CompileError::search("(", "unclosed").into();
        assert!(matches!(err, ReplacrError::Compile(_)));
        assert!(err.to_string().contains("'('"));
    }

    #[test]
    fn test_files_failed_display() {
        let err = ReplacrError::FilesFailed { count: 2 };
        assert!(err.to_string().contains('2'));
    }
}
