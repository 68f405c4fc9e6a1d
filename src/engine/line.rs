//! Per-line rewrite
//!
//! Applies the ordered changesets to one line. Rules are evaluated in order,
//! each seeing the output of the previous one; only a `unique` dedup drop
//! stops evaluation early.

use crate::changeset::Changeset;
use crate::options::{Dedup, ProcessOptions};

/// Outcome of rewriting a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineResult {
    pub line: String,
    /// Any rule matched this line
    pub changed: bool,
    /// The line must be omitted from the output
    pub drop: bool,
}

/// Apply `changesets` to `line`, recording matches in each changeset's
/// `match_found` flag.
pub fn apply_changesets_to_line(
    line: &str,
    changesets: &mut [Changeset],
    options: &ProcessOptions,
) -> LineResult {
    let mut line = line.to_string();
    let mut changed = false;
    let mut drop = false;

    for changeset in changesets.iter_mut() {
        if options.dedup != Dedup::Disabled && changeset.match_found {
            if options.dedup == Dedup::Unique && changeset.is_match(&line) {
                drop = true;
                changed = true;
                break;
            }
            continue;
        }

        if !changeset.is_match(&line) {
            continue;
        }

        line = substitute(&line, changeset, options);
        changeset.match_found = true;
        changed = true;
    }

    LineResult {
        line,
        changed,
        drop,
    }
}

fn substitute(line: &str, changeset: &Changeset, options: &ProcessOptions) -> String {
    if options.mode.replaces_whole_line() {
        if options.backrefs {
            changeset
                .search
                .expand_first(line, &changeset.replace)
                .unwrap_or_else(|| changeset.replace.clone())
        } else {
            changeset.replace.clone()
        }
    } else {
        changeset
            .search
            .replace_all(line, &changeset.replace, options.backrefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changeset::{MatchOptions, compile_changesets};
    use crate::options::Mode;

    fn rules(pairs: &[(&str, &str)], regex: bool) -> Vec<Changeset> {
        let search: Vec<String> = pairs.iter().map(|(s, _)| (*s).to_string()).collect();
        let replace: Vec<String> = pairs.iter().map(|(_, r)| (*r).to_string()).collect();
        let opts = MatchOptions {
            regex,
            ..MatchOptions::default()
        };
        compile_changesets(&search, &replace, &opts).unwrap()
    }

    fn run(lines: &[&str], changesets: &mut [Changeset], options: &ProcessOptions) -> Vec<String> {
        lines
            .iter()
            .map(|l| apply_changesets_to_line(l, changesets, options))
            .filter(|r| !r.drop)
            .map(|r| r.line)
            .collect()
    }

    #[test]
    fn test_replace_without_dedup() {
        let mut sets = rules(&[("foo", "baz")], false);
        let out = run(&["foo", "bar", "foo"], &mut sets, &ProcessOptions::default());
        assert_eq!(out, vec!["baz", "bar", "baz"]);
    }

    #[test]
    fn test_unique_dedup_drops_later_matches() {
        let mut sets = rules(&[("foo", "baz")], false);
        let options = ProcessOptions {
            dedup: Dedup::Unique,
            ..ProcessOptions::default()
        };
        let out = run(&["foo", "bar", "foo", "a foo b"], &mut sets, &options);
        assert_eq!(out, vec!["baz", "bar"]);
    }

    #[test]
    fn test_keep_dedup_leaves_later_matches() {
        let mut sets = rules(&[("foo", "baz")], false);
        let options = ProcessOptions {
            dedup: Dedup::Keep,
            ..ProcessOptions::default()
        };
        let first = apply_changesets_to_line("foo", &mut sets, &options);
        assert!(first.changed);
        for _ in 0..3 {
            let later = apply_changesets_to_line("foo foo", &mut sets, &options);
            assert_eq!(later.line, "foo foo");
            assert!(!later.changed);
            assert!(!later.drop);
        }
    }

    #[test]
    fn test_whole_line_replace() {
        let mut sets = rules(&[("^#.*", "REMOVED")], true);
        let options = ProcessOptions {
            mode: Mode::Line,
            ..ProcessOptions::default()
        };
        let result = apply_changesets_to_line("# comment", &mut sets, &options);
        assert_eq!(result.line, "REMOVED");
        assert!(result.changed);
        assert!(sets[0].match_found);
    }

    #[test]
    fn test_whole_line_with_backrefs_keeps_only_match() {
        let mut sets = rules(&[(r"port=(\d+)", "PORT $1")], true);
        let options = ProcessOptions {
            mode: Mode::Line,
            backrefs: true,
            ..ProcessOptions::default()
        };
        let result = apply_changesets_to_line("  server port=8080 # main", &mut sets, &options);
        assert_eq!(result.line, "PORT 8080");
    }

    #[test]
    fn test_substring_backrefs() {
        let mut sets = rules(&[(r"(\w+)@(\w+)", "$2 at $1")], true);
        let options = ProcessOptions {
            backrefs: true,
            ..ProcessOptions::default()
        };
        let result = apply_changesets_to_line("mail bob@home now", &mut sets, &options);
        assert_eq!(result.line, "mail home at bob now");
    }

    #[test]
    fn test_substring_without_backrefs_is_literal() {
        let mut sets = rules(&[(r"(\w+)@(\w+)", "$2")], true);
        let result =
            apply_changesets_to_line("bob@home", &mut sets, &ProcessOptions::default());
        assert_eq!(result.line, "$2");
    }

    #[test]
    fn test_rules_chain_in_order() {
        let mut sets = rules(&[("a", "b"), ("b", "c")], false);
        let result = apply_changesets_to_line("a", &mut sets, &ProcessOptions::default());
        assert_eq!(result.line, "c");
        assert!(sets.iter().all(|c| c.match_found));
    }

    #[test]
    fn test_no_match_is_unchanged() {
        let mut sets = rules(&[("foo", "bar")], false);
        let result = apply_changesets_to_line("nothing", &mut sets, &ProcessOptions::default());
        assert_eq!(
            result,
            LineResult {
                line: "nothing".into(),
                changed: false,
                drop: false
            }
        );
        assert!(!sets[0].match_found);
    }

    #[test]
    fn test_unique_drop_stops_later_rules() {
        let mut sets = rules(&[("foo", "x"), ("bar", "y")], false);
        let options = ProcessOptions {
            dedup: Dedup::Unique,
            ..ProcessOptions::default()
        };
        apply_changesets_to_line("foo", &mut sets, &options);
        let result = apply_changesets_to_line("foo bar", &mut sets, &options);
        assert!(result.drop);
        assert!(!sets[1].match_found);
    }

    #[test]
    fn test_deterministic_for_fresh_state() {
        let options = ProcessOptions::default();
        let outputs: Vec<_> = (0..5)
            .map(|_| {
                let mut sets = rules(&[("o", "0"), ("f", "F")], false);
                apply_changesets_to_line("foo off", &mut sets, &options)
            })
            .collect();
        assert!(outputs.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(outputs[0].line, "F00 0FF");
    }
}
