//! Extra template helpers
//!
//! Registered on top of the engine's built-in filters. Filters take the piped
//! value as their first argument (`{{ Arg.Name | trimSuffix(".tmpl") }}`).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use minijinja::{Environment, Error, ErrorKind};

/// Register all helpers on `env`
pub fn register(env: &mut Environment<'_>) {
    env.add_function("env", env_var);

    env.add_filter("b64enc", b64enc);
    env.add_filter("b64dec", b64dec);
    env.add_filter("trimSuffix", trim_suffix);
    env.add_filter("trimPrefix", trim_prefix);
    env.add_filter("hasPrefix", has_prefix);
    env.add_filter("hasSuffix", has_suffix);
    env.add_filter("quote", quote_value);
    env.add_filter("squote", squote);
    env.add_filter("nindent", nindent);
    env.add_filter("repeat", repeat);
}

/// Value of an environment variable, empty if unset
fn env_var(name: String) -> String {
    std::env::var(name).unwrap_or_default()
}

fn b64enc(value: String) -> String {
    STANDARD.encode(value.as_bytes())
}

fn b64dec(value: String) -> Result<String, Error> {
    let bytes = STANDARD.decode(value.trim()).map_err(|e| {
        Error::new(ErrorKind::InvalidOperation, format!("invalid base64 input: {e}"))
    })?;
    String::from_utf8(bytes).map_err(|e| {
        Error::new(ErrorKind::InvalidOperation, format!("decoded base64 is not UTF-8: {e}"))
    })
}

fn trim_suffix(value: String, suffix: String) -> String {
    match value.strip_suffix(suffix.as_str()) {
        Some(stripped) => stripped.to_string(),
        None => value,
    }
}

fn trim_prefix(value: String, prefix: String) -> String {
    match value.strip_prefix(prefix.as_str()) {
        Some(stripped) => stripped.to_string(),
        None => value,
    }
}

#[allow(clippy::needless_pass_by_value)]
fn has_prefix(value: String, prefix: String) -> bool {
    value.starts_with(&prefix)
}

#[allow(clippy::needless_pass_by_value)]
fn has_suffix(value: String, suffix: String) -> bool {
    value.ends_with(&suffix)
}

#[allow(clippy::needless_pass_by_value)]
fn squote(value: String) -> String {
    format!("'{value}'")
}

/// Double-quote `value`, escaping only `"` and `\`
#[allow(clippy::needless_pass_by_value)]
fn quote_value(value: String) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Newline followed by `value` with every line indented by `width` spaces
#[allow(clippy::needless_pass_by_value)]
fn nindent(value: String, width: usize) -> String {
    let pad = " ".repeat(width);
    let indented: Vec<String> = value.split('\n').map(|line| format!("{pad}{line}")).collect();
    format!("\n{}", indented.join("\n"))
}

#[allow(clippy::needless_pass_by_value)]
fn repeat(value: String, count: usize) -> String {
    value.repeat(count)
}
