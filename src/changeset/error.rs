use thiserror::Error;

/// Which user-supplied pattern failed to compile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Search,
    Anchor,
    Path,
}

/// Errors produced while compiling changesets
#[derive(Debug, Error)]
pub enum CompileError {
    /// Regex failed to compile
    #[error("Invalid {kind:?} pattern '{pattern}': {reason}")]
    InvalidRegex {
        kind: PatternKind,
        pattern: String,
        reason: String,
    },
}

impl CompileError {
    #[must_use]
    pub fn search(pattern: &str, reason: &str) -> Self {
        Self::InvalidRegex {
            kind: PatternKind::Search,
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub fn anchor(pattern: &str, reason: &str) -> Self {
        Self::InvalidRegex {
            kind: PatternKind::Anchor,
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub fn path(pattern: &str, reason: &str) -> Self {
        Self::InvalidRegex {
            kind: PatternKind::Path,
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    /// The offending pattern text
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::InvalidRegex { pattern, .. } => pattern,
        }
    }
}
