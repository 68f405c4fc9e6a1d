//! Template mode
//!
//! Renders a whole file as a template against two namespaces: `Arg`, mapping
//! each search term to its replacement, and `Env`, the process environment.
//! Undefined lookups render as empty strings, so partial data never fails a
//! render. Leading-dot field access (`{{ .Arg.Name }}`) is accepted and
//! treated like `{{ Arg.Name }}`.

mod functions;

use std::collections::BTreeMap;
use std::fs;

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::changeset::Changeset;
use crate::engine::FileError;
use crate::files::FileItem;
use crate::output::write_content;

/// Data a template is rendered against
#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateData {
    #[serde(rename = "Arg")]
    pub arg: BTreeMap<String, String>,
    #[serde(rename = "Env")]
    pub env: BTreeMap<String, String>,
}

impl TemplateData {
    /// Build the data from changesets and the current process environment
    #[must_use]
    pub fn from_changesets(changesets: &[Changeset]) -> Self {
        let env = std::env::vars_os()
            .map(|(k, v)| (k.to_string_lossy().into_owned(), v.to_string_lossy().into_owned()))
            .collect();
        Self::with_env(changesets, env)
    }

    /// Build the data from changesets and an explicit environment map
    #[must_use]
    pub fn with_env(changesets: &[Changeset], env: BTreeMap<String, String>) -> Self {
        let arg = changesets
            .iter()
            .map(|c| (c.search_plain.clone(), c.replace.clone()))
            .collect();
        Self { arg, env }
    }
}

/// Create the template environment with helpers registered
#[must_use]
pub fn create_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Chainable);
    env.set_keep_trailing_newline(true);
    functions::register(&mut env);
    env
}

/// Render `source` against `data`.
///
/// # Errors
/// Returns the template engine's error on syntax or evaluation failures.
pub fn render_with(source: &str, data: &TemplateData) -> Result<String, minijinja::Error> {
    create_environment().render_str(&normalize_dot_fields(source), data)
}

/// Render `source` against the changesets and the process environment.
///
/// # Errors
/// Returns the template engine's error on syntax or evaluation failures.
pub fn render(source: &str, changesets: &[Changeset]) -> Result<String, minijinja::Error> {
    render_with(source, &TemplateData::from_changesets(changesets))
}

/// Render one file and hand the result to the output sink.
///
/// # Errors
/// Returns `FileError::Read`, `FileError::Template` or `FileError::Write`.
pub fn apply_template_to_file(
    item: &FileItem,
    changesets: &[Changeset],
    dry_run: bool,
) -> Result<String, FileError> {
    let source = fs::read_to_string(&item.path).map_err(|e| FileError::read(&item.path, e))?;
    let content = render(&source, changesets).map_err(|e| FileError::template(&item.path, e))?;
    write_content(item, content, dry_run)
}

/// Drop the leading dot of field access inside template tags.
///
/// `.Name` becomes `Name` when the dot starts an operand; dots between
/// identifiers, inside numbers and inside string literals are kept.
#[must_use]
pub fn normalize_dot_fields(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut in_tag = false;
    let mut quote: Option<char> = None;
    let mut prev = ' ';

    while let Some(c) = chars.next() {
        if !in_tag {
            out.push(c);
            if c == '{'
                && let Some(&opener @ ('{' | '%')) = chars.peek()
            {
                out.push(opener);
                chars.next();
                in_tag = true;
                prev = '{';
            }
            continue;
        }

        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if c == q {
                quote = None;
            }
            prev = c;
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '}' | '%' if chars.peek() == Some(&'}') => {
                out.push(c);
                out.push('}');
                chars.next();
                in_tag = false;
                continue;
            }
            '.' if starts_operand(prev)
                && chars
                    .peek()
                    .is_some_and(|n| n.is_ascii_alphabetic() || *n == '_') =>
            {
                prev = c;
                continue;
            }
            _ => {}
        }

        out.push(c);
        prev = c;
    }

    out
}

fn starts_operand(prev: char) -> bool {
    prev.is_whitespace() || "{(,[|=!<>+-*/~:".contains(prev)
}
