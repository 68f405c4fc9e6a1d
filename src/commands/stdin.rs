//! Stdin command - filter standard input to standard output

use std::io::{BufRead, Write};

use crate::ReplacrError;
use crate::changeset::Changeset;
use crate::commands::RunConfig;
use crate::engine::{LineReader, apply_changesets_to_reader};
use crate::options::Mode;
use crate::template;

type Result<T> = std::result::Result<T, ReplacrError>;

/// Process `reader` as a single document and write the result to `writer`.
///
/// Template mode renders the whole input; the other modes run the line pass
/// (plus the lineinfile pass) and write the buffer whether or not anything
/// changed. Output options and dry-run do not apply here.
///
/// # Errors
/// Returns `Io` on read or write failures, `Compile` for an invalid anchor and
/// `Template` if the input fails to render.
pub fn execute<R: BufRead, W: Write>(
    config: &RunConfig,
    changesets: &[Changeset],
    reader: R,
    mut writer: W,
) -> Result<()> {
    let output = if config.mode == Mode::Template {
        let mut source = String::new();
        for line in LineReader::new(reader) {
            source.push_str(&line?);
            source.push('\n');
        }
        template::render(&source, changesets).map_err(|e| ReplacrError::Template(e.to_string()))?
    } else {
        let options = config.process_options()?;
        let mut changesets = changesets.to_vec();
        let (buffer, _) = apply_changesets_to_reader(reader, &mut changesets, &options)?;
        buffer
    };

    writer.write_all(output.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changeset::{MatchOptions, compile_changesets};
    use std::io::Cursor;

    fn run_stdin(config: &RunConfig, input: &str) -> Result<String> {
        let changesets =
            compile_changesets(&config.search, &config.replace, &config.match_options)?;
        let mut out = Vec::new();
        execute(config, &changesets, Cursor::new(input), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_replace_from_stdin() {
        let config = RunConfig::new(Mode::Replace, Vec::new()).with_rule("foo", "bar");
        assert_eq!(run_stdin(&config, "foo\nfoofoo\n").unwrap(), "bar\nbarbar\n");
    }

    #[test]
    fn test_unchanged_input_is_echoed() {
        let config = RunConfig::new(Mode::Replace, Vec::new()).with_rule("zzz", "y");
        assert_eq!(run_stdin(&config, "a\r\nb").unwrap(), "a\nb\n");
    }

    #[test]
    fn test_lineinfile_from_stdin() {
        let mut config = RunConfig::new(Mode::LineInFile, Vec::new()).with_rule("^b=", "b=2");
        config.match_options = MatchOptions {
            regex: true,
            ..MatchOptions::default()
        };
        assert_eq!(run_stdin(&config, "a=1\n").unwrap(), "a=1\nb=2\n");
    }

    #[test]
    fn test_template_from_stdin() {
        let config = RunConfig::new(Mode::Template, Vec::new()).with_rule("Name", "world");
        assert_eq!(
            run_stdin(&config, "hello {{ .Arg.Name }}\n").unwrap(),
            "hello world\n"
        );
    }

    #[test]
    fn test_template_error() {
        let config = RunConfig::new(Mode::Template, Vec::new());
        let err = run_stdin(&config, "{% if %}\n").unwrap_err();
        assert!(matches!(err, ReplacrError::Template(_)));
    }
}
