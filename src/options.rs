//! Option types shared by the CLI and the processing engines

use clap::ValueEnum;
use regex::Regex;

/// Processing mode, exactly one per run
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Replace the matched text inside the line
    #[default]
    Replace,
    /// Replace the whole matching line with the replacement term
    Line,
    /// Replace the whole matching line, or insert the term if no line matches
    #[value(name = "lineinfile")]
    LineInFile,
    /// Render the file as a template
    Template,
}

impl Mode {
    /// Whether a match replaces the entire line instead of the matched text
    #[must_use]
    pub const fn replaces_whole_line(self) -> bool {
        matches!(self, Self::Line | Self::LineInFile)
    }
}

/// Value accepted by `--once`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OncePolicy {
    /// Replace the first match, leave later matching lines untouched
    Keep,
    /// Replace the first match, drop later matching lines
    Unique,
}

/// Per-file dedup policy for rules that already matched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dedup {
    #[default]
    Disabled,
    Keep,
    Unique,
}

impl From<Option<OncePolicy>> for Dedup {
    fn from(policy: Option<OncePolicy>) -> Self {
        match policy {
            None => Self::Disabled,
            Some(OncePolicy::Keep) => Self::Keep,
            Some(OncePolicy::Unique) => Self::Unique,
        }
    }
}

/// Where line-in-file inserts a missing line
#[derive(Debug, Clone)]
pub enum Anchor {
    /// Insert before the first line matching the pattern
    Before(Regex),
    /// Insert after the first line matching the pattern
    After(Regex),
}

/// Read-only options consulted while processing a single file
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub mode: Mode,
    pub dedup: Dedup,
    /// Expand `$1` style references in replacement terms
    pub backrefs: bool,
    /// Line-in-file anchor (lineinfile mode only)
    pub anchor: Option<Anchor>,
    /// Always write the output, even without any match
    pub force_write: bool,
    /// Return content instead of writing it
    pub dry_run: bool,
}
