//! Changeset application engine
//!
//! - `line`: applies the ordered changesets to a single line
//! - `reader`: reassembles logical lines from buffered input
//! - `file`: drives the line pass over a file and decides whether to write
//! - `lineinfile`: inserts lines that no changeset matched
//! - `error`: per-file error type

mod error;
mod file;
mod line;
mod lineinfile;
mod reader;

pub use error::FileError;
pub use file::{apply_changesets_to_file, apply_changesets_to_reader};
pub use line::{LineResult, apply_changesets_to_line};
pub use lineinfile::handle_line_in_file;
pub use reader::LineReader;
