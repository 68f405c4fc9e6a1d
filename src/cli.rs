//! Command-line interface definitions and parsing
//!
//! This module defines the CLI for replacr using the `clap` crate and turns
//! parsed flags (merged with [`ReplacrConfig`] defaults) into a validated
//! [`RunConfig`].
//!
//! # Examples
//!
//! ```bash
//! # Replace a term in two files
//! replacr -s foo -r bar a.txt b.txt
//!
//! # Replace whole lines matching a regex, walking a directory
//! replacr --mode=line --regex -s '^port=.*' -r 'port=80' --path conf --path-pattern '*.ini'
//!
//! # Make sure a line exists exactly once
//! replacr --mode=lineinfile -s '^export PATH=' -r 'export PATH=/opt/bin:$PATH' --regex ~/.profile
//!
//! # Render a template to a new file
//! replacr --mode=template -s Name -r world app.conf.tmpl:app.conf
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::ReplacrError;
use crate::changeset::MatchOptions;
use crate::commands::{InputSource, RunConfig, WalkSpec};
use crate::config::ReplacrConfig;
use crate::files::OutputTarget;
use crate::options::{Mode, OncePolicy};

/// Main CLI structure
#[derive(Parser, Debug, Clone)]
#[command(name = "replacr")]
#[command(
    version,
    about = "Search and replace in files, line by line or as templates",
    long_about = None
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Replacement mode
    #[arg(short = 'm', long = "mode", value_enum, default_value_t = Mode::Replace)]
    pub mode: Mode,

    /// Search term (repeatable, paired with --replace by position)
    #[arg(short = 's', long = "search", value_name = "TERM", allow_hyphen_values = true)]
    pub search: Vec<String>,

    /// Replacement term (repeatable, paired with --search by position)
    #[arg(short = 'r', long = "replace", value_name = "TERM", allow_hyphen_values = true)]
    pub replace: Vec<String>,

    /// Insert missing lines before the first line matching this regex (lineinfile mode)
    #[arg(long = "lineinfile-before", value_name = "REGEX")]
    pub lineinfile_before: Option<String>,

    /// Insert missing lines after the first line matching this regex (lineinfile mode)
    #[arg(long = "lineinfile-after", value_name = "REGEX")]
    pub lineinfile_after: Option<String>,

    /// Ignore case of the search pattern
    #[arg(short = 'i', long = "case-insensitive")]
    pub case_insensitive: bool,

    /// Process standard input and print the result
    #[arg(long = "stdin")]
    pub stdin: bool,

    /// Write changes to this file (single input file only)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Strip this suffix from written file names (e.g. `.tmpl`)
    #[arg(long = "output-strip-ext", value_name = "EXT")]
    pub output_strip_ext: Option<String>,

    /// Apply each search term once per file; keep or drop later matching lines
    #[arg(
        long = "once",
        value_enum,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "keep"
    )]
    pub once: Option<OncePolicy>,

    /// Treat search terms as regular expressions
    #[arg(long = "regex")]
    pub regex: bool,

    /// Expand backreferences ($1, ${name}) in replacement terms
    #[arg(long = "regex-backrefs")]
    pub regex_backrefs: bool,

    /// Use POSIX leftmost-longest matching
    #[arg(long = "regex-posix")]
    pub regex_posix: bool,

    /// Process all files below this directory
    #[arg(long = "path", value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Only walk files whose name matches this glob (e.g. *.conf)
    #[arg(long = "path-pattern", value_name = "GLOB")]
    pub path_pattern: Option<String>,

    /// Only walk files whose full path matches this regex
    #[arg(long = "path-regex", value_name = "REGEX")]
    pub path_regex: Option<String>,

    /// Succeed when no files were found
    #[arg(long = "ignore-empty")]
    pub ignore_empty: bool,

    /// Print a report for every processed file
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Show the resulting content without writing files
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Number of files processed concurrently (overrides config)
    #[arg(long = "threads", value_name = "N")]
    pub threads: Option<usize>,

    /// Print only the version number and exit
    #[arg(long = "dumpversion")]
    pub dumpversion: bool,

    /// Files to process; `source:destination` writes the result elsewhere
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Output redirection requested by the flags
    #[must_use]
    pub fn output_target(&self) -> OutputTarget {
        if let Some(output) = &self.output {
            OutputTarget::Explicit(output.clone())
        } else if let Some(ext) = &self.output_strip_ext {
            OutputTarget::StripExtension(ext.clone())
        } else {
            OutputTarget::InPlace
        }
    }

    /// Merge flags with configuration defaults and validate the result.
    ///
    /// # Errors
    /// Returns `ReplacrError::Config` for conflicting or incomplete options.
    pub fn into_run_config(self, config: &ReplacrConfig) -> Result<RunConfig, ReplacrError> {
        let target = self.output_target();

        let input = if self.stdin {
            InputSource::Stdin
        } else {
            InputSource::Files {
                args: self.files,
                walk: self.path.map(|root| WalkSpec {
                    root,
                    pattern: self.path_pattern,
                    regex: self.path_regex,
                }),
            }
        };

        let run_config = RunConfig {
            mode: self.mode,
            search: self.search,
            replace: self.replace,
            match_options: MatchOptions {
                regex: self.regex,
                case_insensitive: self.case_insensitive,
                posix: self.regex_posix,
            },
            backrefs: self.regex_backrefs,
            dedup: self.once.into(),
            lineinfile_before: self.lineinfile_before,
            lineinfile_after: self.lineinfile_after,
            input,
            target,
            dry_run: self.dry_run,
            verbose: self.verbose || config.verbose,
            ignore_empty: self.ignore_empty || config.ignore_empty,
            threads: self.threads.unwrap_or(config.threads),
        };

        run_config.validate()?;
        Ok(run_config)
    }
}
