//! Reporter abstraction
//!
//! Verbose per-file reports and error lines go through a [`Reporter`] so the
//! CLI can write them to stderr while tests capture them in memory. Each call
//! emits one complete block; concurrent callers never interleave inside it.

use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use colored::Colorize;

/// Sink for user-visible run output
pub trait Reporter: Send + Sync {
    /// Emit the verbose report block for one processed file
    fn file_report(&self, path: &Path, body: &str);

    /// Emit an error line
    fn error(&self, message: &str);

    /// Emit an informational line
    fn info(&self, message: &str);
}

/// Render the verbose block for one file: title, underline, body
#[must_use]
pub fn format_file_report(path: &Path, body: &str) -> String {
    let title = format!("{}:", path.display());
    let underline = "-".repeat(title.chars().count());
    format!("\n{title}\n{underline}\n\n{body}\n\n")
}

/// CLI implementation - writes to stderr
pub struct StderrReporter;

impl StderrReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn emit(block: &str) {
        let mut handle = io::stderr().lock();
        // nothing sensible to do if stderr is gone
        let _ = handle.write_all(block.as_bytes());
        let _ = handle.flush();
    }
}

impl Default for StderrReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for StderrReporter {
    fn file_report(&self, path: &Path, body: &str) {
        Self::emit(&format_file_report(path, body));
    }

    fn error(&self, message: &str) {
        Self::emit(&format!("{} {message}\n", "Error:".red().bold()));
    }

    fn info(&self, message: &str) {
        Self::emit(&format!("{}\n", message.dimmed()));
    }
}

/// Message level for captured output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Report,
    Error,
    Info,
}

/// In-memory reporter, used by tests and library callers that want the
/// report text instead of terminal output
#[derive(Debug, Default)]
pub struct BufferedReporter {
    messages: Mutex<Vec<(MessageLevel, String)>>,
}

impl BufferedReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured messages in emission order
    #[must_use]
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Captured messages of one level
    #[must_use]
    pub fn of_level(&self, level: MessageLevel) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn push(&self, level: MessageLevel, message: String) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message));
    }
}

impl Reporter for BufferedReporter {
    fn file_report(&self, path: &Path, body: &str) {
        self.push(MessageLevel::Report, format_file_report(path, body));
    }

    fn error(&self, message: &str) {
        self.push(MessageLevel::Error, message.to_string());
    }

    fn info(&self, message: &str) {
        self.push(MessageLevel::Info, message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_reporter_creation() {
        let _reporter = StderrReporter::new();
        let _reporter2 = StderrReporter::default();
    }

    #[test]
    fn test_file_report_format() {
        let block = format_file_report(Path::new("a/b.txt"), "content");
        assert_eq!(block, "\na/b.txt:\n--------\n\ncontent\n\n");
    }

    #[test]
    fn test_buffered_reporter_levels() {
        let reporter = BufferedReporter::new();
        reporter.info("starting");
        reporter.error("broken");
        reporter.file_report(Path::new("x"), "body");

        let messages = reporter.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], (MessageLevel::Info, "starting".to_string()));
        assert_eq!(reporter.of_level(MessageLevel::Error), vec!["broken"]);
        assert!(reporter.of_level(MessageLevel::Report)[0].contains("x:"));
    }

    #[test]
    fn test_buffered_reporter_blocks_are_whole() {
        let reporter = BufferedReporter::new();
        std::thread::scope(|s| {
            for i in 0..8 {
                let reporter = &reporter;
                s.spawn(move || reporter.file_report(Path::new(&format!("f{i}")), "line1\nline2"));
            }
        });
        for block in reporter.of_level(MessageLevel::Report) {
            assert!(block.contains("line1\nline2"));
        }
    }
}
