//! Compiled search matcher
//!
//! Wraps a [`Regex`] and optionally switches it to POSIX leftmost-longest
//! semantics: the match starts at the leftmost position the default engine
//! finds, then an anchored all-matches search from that start extends it to
//! the longest end the pattern accepts. Assertions such as `$` and `\b` are
//! evaluated against the whole line, not the matched span.

use std::ops::Range;

use regex::{NoExpand, Regex};
use regex_automata::nfa::thompson::pikevm::PikeVM;
use regex_automata::{Anchored, Input, MatchKind, meta};

/// Immutable matcher shared by every copy of a changeset
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    longest: Option<Longest>,
}

/// All-matches engines used to extend matches in POSIX mode
#[derive(Debug, Clone)]
struct Longest {
    /// Reports the end of the longest match at an anchored start
    ends: meta::Regex,
    /// Resolves capture groups for that longest match
    captures: PikeVM,
}

impl Longest {
    fn new(pattern: &str) -> Result<Self, regex::Error> {
        let ends = meta::Regex::builder()
            .configure(meta::Regex::config().match_kind(MatchKind::All))
            .build(pattern)
            .map_err(|e| regex::Error::Syntax(e.to_string()))?;
        let captures = PikeVM::builder()
            .configure(PikeVM::config().match_kind(MatchKind::All))
            .build(pattern)
            .map_err(|e| regex::Error::Syntax(e.to_string()))?;
        Ok(Self { ends, captures })
    }

    /// End of the longest match starting exactly at `start`
    fn longest_end(&self, text: &str, start: usize) -> Option<usize> {
        let input = Input::new(text)
            .span(start..text.len())
            .anchored(Anchored::Yes);
        self.ends.search_half(&input).map(|hm| hm.offset())
    }

    /// Expand `replacement` with the captures of the match spanning `range`
    fn expand_into(&self, text: &str, range: Range<usize>, replacement: &str, out: &mut String) {
        let mut cache = self.captures.create_cache();
        let mut caps = self.captures.create_captures();
        let input = Input::new(text).span(range).anchored(Anchored::Yes);
        self.captures.search(&mut cache, &input, &mut caps);
        if caps.is_match() {
            caps.interpolate_string_into(text, replacement, out);
        } else {
            out.push_str(replacement);
        }
    }
}

impl Matcher {
    /// Compile `pattern`, using leftmost-longest semantics when `posix` is set.
    ///
    /// # Errors
    /// Returns the underlying `regex::Error` when the pattern is invalid.
    pub fn new(pattern: &str, posix: bool) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        let longest = if posix {
            Some(Longest::new(pattern)?)
        } else {
            None
        };
        Ok(Self { regex, longest })
    }

    #[must_use]
    pub const fn is_posix(&self) -> bool {
        self.longest.is_some()
    }

    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Byte range of the first match in `text`
    #[must_use]
    pub fn find(&self, text: &str) -> Option<Range<usize>> {
        self.find_at(text, 0)
    }

    fn find_at(&self, text: &str, start: usize) -> Option<Range<usize>> {
        let m = self.regex.find_at(text, start)?;
        let Some(longest) = &self.longest else {
            return Some(m.range());
        };

        let end = longest
            .longest_end(text, m.start())
            .map_or(m.end(), |end| end.max(m.end()));
        Some(m.start()..end)
    }

    /// Replace every non-overlapping match in `text`.
    ///
    /// With `expand` set, `$1`/`${name}` references in `replacement` are
    /// substituted from the match's capture groups; otherwise the replacement
    /// is inserted verbatim.
    #[must_use]
    pub fn replace_all(&self, text: &str, replacement: &str, expand: bool) -> String {
        if self.longest.is_none() {
            return if expand {
                self.regex.replace_all(text, replacement).into_owned()
            } else {
                self.regex.replace_all(text, NoExpand(replacement)).into_owned()
            };
        }

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut pos = 0;
        let mut prev_end: Option<usize> = None;

        while pos <= text.len() {
            let Some(range) = self.find_at(text, pos) else {
                break;
            };

            // empty matches abutting the previous match are skipped
            let abutting = range.is_empty() && prev_end == Some(range.start);
            if !abutting {
                out.push_str(&text[last..range.start]);
                if expand {
                    self.expand_into(text, range.clone(), replacement, &mut out);
                } else {
                    out.push_str(replacement);
                }
                last = range.end;
                prev_end = Some(range.end);
            }

            pos = if range.is_empty() {
                match text[range.end..].chars().next() {
                    Some(c) => range.end + c.len_utf8(),
                    None => break,
                }
            } else {
                range.end
            };
        }

        out.push_str(&text[last..]);
        out
    }

    /// Expand `replacement` against the first match only, returning the
    /// substituted match text (the rest of `text` is discarded).
    #[must_use]
    pub fn expand_first(&self, text: &str, replacement: &str) -> Option<String> {
        let range = self.find(text)?;
        let mut out = String::new();
        self.expand_into(text, range, replacement, &mut out);
        Some(out)
    }

    fn expand_into(&self, text: &str, range: Range<usize>, replacement: &str, out: &mut String) {
        match &self.longest {
            Some(longest) => longest.expand_into(text, range, replacement, out),
            None => match self.regex.captures_at(text, range.start) {
                Some(caps) => caps.expand(replacement, out),
                None => out.push_str(replacement),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_leftmost_first() {
        let m = Matcher::new("a|ab", false).unwrap();
        assert_eq!(m.find("xab"), Some(1..2));
        assert!(!m.is_posix());
    }

    #[test]
    fn test_posix_is_leftmost_longest() {
        let m = Matcher::new("a|ab", true).unwrap();
        assert_eq!(m.find("xab"), Some(1..3));
        assert_eq!(m.replace_all("ab ab", "X", false), "X X");
    }

    #[test]
    fn test_replace_all_literal_ignores_refs() {
        let m = Matcher::new("(o+)", false).unwrap();
        assert_eq!(m.replace_all("foo", "[$1]", false), "f[$1]");
        assert_eq!(m.replace_all("foo", "[$1]", true), "f[oo]");
    }

    #[test]
    fn test_posix_replace_with_backrefs() {
        let m = Matcher::new("(a+)(b*)", true).unwrap();
        assert_eq!(m.replace_all("xaabbx", "<$2$1>", true), "x<bbaa>x");
    }

    #[test]
    fn test_posix_empty_matches() {
        let m = Matcher::new("a*", true).unwrap();
        assert_eq!(m.replace_all("baaac", "-", false), "-b-c-");
    }

    #[test]
    fn test_expand_first_uses_first_match_only() {
        let m = Matcher::new(r"(\w+)=(\w+)", false).unwrap();
        assert_eq!(
            m.expand_first("  key=value other=x", "$2:$1"),
            Some("value:key".to_string())
        );
        assert_eq!(m.expand_first("nothing here", "$1"), None);
    }

    #[test]
    fn test_posix_assertions_see_the_whole_line() {
        let m = Matcher::new("a|ab$", true).unwrap();
        assert_eq!(m.find("abc"), Some(0..1));
        assert_eq!(m.replace_all("abc", "X", false), "Xbc");
        assert_eq!(m.find("xab"), Some(1..3));

        let m = Matcher::new(r"foo|foobar\b", true).unwrap();
        assert_eq!(m.find("foobarbaz"), Some(0..3));
        assert_eq!(m.find("foobar baz"), Some(0..6));
    }

    #[test]
    fn test_posix_long_line_stays_fast() {
        let m = Matcher::new("a", true).unwrap();
        let line = "a".repeat(50_000);
        let started = std::time::Instant::now();
        let out = m.replace_all(&line, "b", false);
        assert_eq!(out, "b".repeat(50_000));
        assert!(started.elapsed() < std::time::Duration::from_secs(5));

        let m = Matcher::new("a+|a", true).unwrap();
        assert_eq!(m.replace_all(&line, "b", false), "b");
    }

    #[test]
    fn test_multibyte_text() {
        let m = Matcher::new("ä+", true).unwrap();
        assert_eq!(m.replace_all("xääy", "a", false), "xay");
    }
}
