//! Run orchestration
//!
//! A [`RunConfig`] is the validated, fully merged description of one
//! invocation. [`run`] compiles it, selects files, drives the dispatcher and
//! reports the outcome; [`process_stdin`] handles `--stdin`.

pub mod run;
pub mod stdin;

pub use run::execute as run;
pub use stdin::execute as process_stdin;

use std::path::PathBuf;

use crate::ReplacrError;
use crate::changeset::{self, MatchOptions};
use crate::files::OutputTarget;
use crate::options::{Dedup, Mode, ProcessOptions};

/// Directory walk requested with `--path`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkSpec {
    pub root: PathBuf,
    /// Basename glob (`--path-pattern`)
    pub pattern: Option<String>,
    /// Full-path regex (`--path-regex`)
    pub regex: Option<String>,
}

/// Where input comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    Files {
        /// Positional arguments, possibly `source:destination`
        args: Vec<String>,
        walk: Option<WalkSpec>,
    },
}

/// Everything a run needs, after flags and config have been merged
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunConfig {
    pub mode: Mode,
    pub search: Vec<String>,
    pub replace: Vec<String>,
    pub match_options: MatchOptions,
    pub backrefs: bool,
    pub dedup: Dedup,
    pub lineinfile_before: Option<String>,
    pub lineinfile_after: Option<String>,
    pub input: InputSource,
    pub target: OutputTarget,
    pub dry_run: bool,
    pub verbose: bool,
    pub ignore_empty: bool,
    pub threads: usize,
}

impl RunConfig {
    /// A config for `mode` with no terms, reading the given files in place
    #[must_use]
    pub fn new(mode: Mode, files: Vec<String>) -> Self {
        Self {
            mode,
            search: Vec::new(),
            replace: Vec::new(),
            match_options: MatchOptions::default(),
            backrefs: false,
            dedup: Dedup::Disabled,
            lineinfile_before: None,
            lineinfile_after: None,
            input: InputSource::Files {
                args: files,
                walk: None,
            },
            target: OutputTarget::InPlace,
            dry_run: false,
            verbose: false,
            ignore_empty: false,
            threads: crate::config::DEFAULT_THREADS,
        }
    }

    /// Add one search/replace pair
    #[must_use]
    pub fn with_rule(mut self, search: &str, replace: &str) -> Self {
        self.search.push(search.to_string());
        self.replace.push(replace.to_string());
        self
    }

    /// Check for conflicting or incomplete options.
    ///
    /// # Errors
    /// Returns `ReplacrError::Config` describing the first problem found.
    pub fn validate(&self) -> Result<(), ReplacrError> {
        if self.threads == 0 {
            return Err(config_error("Thread count must be at least 1"));
        }

        if self.mode != Mode::Template && (self.search.is_empty() || self.replace.is_empty()) {
            return Err(config_error("Missing either --search or --replace for this mode"));
        }

        if self.search.len() != self.replace.len() {
            return Err(config_error("Unequal numbers of search or replace options"));
        }

        if let InputSource::Files { args, walk } = &self.input
            && matches!(self.target, OutputTarget::Explicit(_))
            && (args.len() > 1 || walk.is_some())
        {
            return Err(config_error("only one file is allowed when using --output"));
        }

        let has_anchor = self.lineinfile_before.is_some() || self.lineinfile_after.is_some();
        if has_anchor && self.mode != Mode::LineInFile {
            return Err(config_error(
                "--lineinfile-before and --lineinfile-after are only valid in --mode=lineinfile",
            ));
        }

        if self.lineinfile_before.is_some() && self.lineinfile_after.is_some() {
            return Err(config_error(
                "Use only --lineinfile-after or --lineinfile-before, not both",
            ));
        }

        Ok(())
    }

    /// Compile the anchor and assemble the per-file processing options.
    ///
    /// # Errors
    /// Returns `ReplacrError::Compile` if the anchor pattern is invalid.
    pub fn process_options(&self) -> Result<ProcessOptions, ReplacrError> {
        let anchor = changeset::compile_anchor(
            self.lineinfile_before.as_deref(),
            self.lineinfile_after.as_deref(),
        )?;

        Ok(ProcessOptions {
            mode: self.mode,
            dedup: self.dedup,
            backrefs: self.backrefs,
            anchor,
            force_write: self.target.forces_write(),
            dry_run: self.dry_run,
        })
    }
}

fn config_error(message: &str) -> ReplacrError {
    ReplacrError::Config(message.to_string())
}
