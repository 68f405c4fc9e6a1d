//! File processing for replace, line and lineinfile modes

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use super::error::FileError;
use super::line::apply_changesets_to_line;
use super::lineinfile::handle_line_in_file;
use super::reader::LineReader;
use crate::changeset::Changeset;
use crate::files::FileItem;
use crate::options::{Mode, ProcessOptions};
use crate::output::write_content;

/// Run the line pass (and the lineinfile pass) over `reader`.
///
/// Returns the assembled output buffer, every kept line terminated by `\n`,
/// and whether any line changed or was dropped.
///
/// # Errors
/// Propagates read errors from `reader`.
pub fn apply_changesets_to_reader<R: BufRead>(
    reader: R,
    changesets: &mut [Changeset],
    options: &ProcessOptions,
) -> io::Result<(String, bool)> {
    let mut lines = LineReader::new(reader);
    let mut buffer = String::new();
    let mut needs_write = false;

    while let Some(line) = lines.next_line()? {
        let result = apply_changesets_to_line(&line, changesets, options);

        if result.changed || result.drop {
            needs_write = true;
        }

        if !result.drop {
            buffer.push_str(&result.line);
            buffer.push('\n');
        }
    }

    if options.mode == Mode::LineInFile {
        let (inserted, changed) = handle_line_in_file(changesets, &buffer, options.anchor.as_ref());
        if changed {
            buffer = inserted;
            needs_write = true;
        }
    }

    Ok((buffer, needs_write))
}

/// Apply `changesets` to one file and write the result if needed.
///
/// `changesets` is this file's private copy; its matched flags start out
/// clear and are discarded when the call returns.
///
/// # Errors
/// Returns `FileError::Read` if the input cannot be opened or read, and
/// `FileError::Write` if the output cannot be written.
pub fn apply_changesets_to_file(
    item: &FileItem,
    mut changesets: Vec<Changeset>,
    options: &ProcessOptions,
) -> Result<String, FileError> {
    let file = File::open(&item.path).map_err(|e| FileError::read(&item.path, e))?;
    let (buffer, changed) =
        apply_changesets_to_reader(BufReader::new(file), &mut changesets, options)
            .map_err(|e| FileError::read(&item.path, e))?;

    let needs_write = changed || options.force_write;
    tracing::debug!(path = %item.path.display(), changed, needs_write, "processed file");

    if needs_write {
        write_content(item, buffer, options.dry_run)
    } else {
        Ok(format!("{} no match", item.path.display()))
    }
}
