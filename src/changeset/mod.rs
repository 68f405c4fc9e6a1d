//! Changeset compilation
//!
//! A changeset is one ordered search → replacement rule. The compiler turns
//! paired `--search`/`--replace` terms into changesets with compiled matchers.
//! The matcher is immutable; the `match_found` flag is per-file state and is
//! only ever mutated on a copy owned by a single file task.

mod error;
mod matcher;

pub use error::{CompileError, PatternKind};
pub use matcher::Matcher;

use regex::Regex;

use crate::options::Anchor;

/// Flags controlling how search terms are turned into patterns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct MatchOptions {
    /// Treat search terms as regular expressions instead of literal text
    pub regex: bool,
    /// Ignore case when matching
    pub case_insensitive: bool,
    /// Use POSIX leftmost-longest match semantics
    pub posix: bool,
}

/// One search/replace rule plus its per-file matched state
#[derive(Debug, Clone)]
pub struct Changeset {
    /// Search term exactly as given by the user
    pub search_plain: String,
    /// Compiled matcher for the search term
    pub search: Matcher,
    /// Replacement term (may contain `$1` references when backrefs are enabled)
    pub replace: String,
    /// Whether this rule matched any line of the current file
    pub match_found: bool,
}

impl Changeset {
    #[must_use]
    pub const fn new(search_plain: String, search: Matcher, replace: String) -> Self {
        Self {
            search_plain,
            search,
            replace,
            match_found: false,
        }
    }

    #[must_use]
    pub fn is_match(&self, line: &str) -> bool {
        self.search.is_match(line)
    }
}

/// Build the regex source for a search term
#[must_use]
pub fn build_search_pattern(term: &str, options: &MatchOptions) -> String {
    let pattern = if options.regex {
        term.to_string()
    } else {
        regex::escape(term)
    };

    if options.case_insensitive {
        format!("(?i:{pattern})")
    } else {
        pattern
    }
}

/// Compile a single search term.
///
/// # Errors
/// Returns `CompileError::InvalidRegex` naming `term` when the pattern is invalid.
pub fn compile_search_term(term: &str, options: &MatchOptions) -> Result<Matcher, CompileError> {
    let pattern = build_search_pattern(term, options);
    tracing::debug!(term, %pattern, posix = options.posix, "using regular expression");
    Matcher::new(&pattern, options.posix).map_err(|e| CompileError::search(term, &e.to_string()))
}

/// Compile paired search and replace terms into an ordered changeset list.
///
/// Callers are expected to have checked that both slices have equal length;
/// any surplus terms on either side are ignored.
///
/// # Errors
/// Returns the first `CompileError` encountered; no partial list is produced.
pub fn compile_changesets(
    search: &[String],
    replace: &[String],
    options: &MatchOptions,
) -> Result<Vec<Changeset>, CompileError> {
    search
        .iter()
        .zip(replace)
        .map(|(s, r)| {
            let matcher = compile_search_term(s, options)?;
            Ok(Changeset::new(s.clone(), matcher, r.clone()))
        })
        .collect()
}

/// Compile a line-in-file anchor pattern.
///
/// # Errors
/// Returns `CompileError::InvalidRegex` with `PatternKind::Anchor` when invalid.
pub fn compile_anchor_pattern(pattern: &str) -> Result<Regex, CompileError> {
    Regex::new(pattern).map_err(|e| CompileError::anchor(pattern, &e.to_string()))
}

/// Compile an optional before/after anchor pair into an [`Anchor`].
///
/// # Errors
/// Returns `CompileError` when the configured anchor pattern is invalid.
pub fn compile_anchor(
    before: Option<&str>,
    after: Option<&str>,
) -> Result<Option<Anchor>, CompileError> {
    match (before, after) {
        (Some(p), _) => Ok(Some(Anchor::Before(compile_anchor_pattern(p)?))),
        (None, Some(p)) => Ok(Some(Anchor::After(compile_anchor_pattern(p)?))),
        (None, None) => Ok(None),
    }
}
