//! Line-in-file insertion pass
//!
//! Runs after the line pass in lineinfile mode. Every changeset that matched
//! no line gets its replacement inserted: before or after the first line
//! matching the anchor, or appended at the end of the file. A line that is
//! already present verbatim is never inserted twice.

use crate::changeset::Changeset;
use crate::options::Anchor;

/// Insert missing lines into `buffer`, returning the new buffer and whether
/// anything was inserted.
#[must_use]
pub fn handle_line_in_file(
    changesets: &[Changeset],
    buffer: &str,
    anchor: Option<&Anchor>,
) -> (String, bool) {
    let mut lines: Vec<&str> = buffer.split_terminator('\n').collect();
    let mut changed = false;

    for changeset in changesets.iter().filter(|c| !c.match_found) {
        let wanted = changeset.replace.as_str();
        if lines.contains(&wanted) {
            continue;
        }

        let position = match anchor {
            None => Some(lines.len()),
            Some(Anchor::Before(re)) => lines.iter().position(|l| re.is_match(l)),
            Some(Anchor::After(re)) => lines.iter().position(|l| re.is_match(l)).map(|i| i + 1),
        };

        match position {
            Some(index) => {
                lines.insert(index, wanted);
                changed = true;
            }
            None => {
                tracing::debug!(line = wanted, "anchor not found, line not inserted");
            }
        }
    }

    if !changed {
        return (buffer.to_string(), false);
    }

    let mut out = String::with_capacity(buffer.len() + 64);
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    (out, true)
}
