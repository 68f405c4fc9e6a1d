//! Replacr CLI application entry point
//!
//! Applies search/replace rules to files, standard input or whole directory
//! trees. See [`replacr::cli`] for the flag reference.
//!
//! # Usage
//!
//! ```bash
//! # Substring replace in place
//! replacr -s foo -r bar a.txt b.txt
//!
//! # Preview without writing
//! replacr --dry-run -s foo -r bar a.txt
//!
//! # Filter standard input
//! cat a.txt | replacr --stdin -s foo -r bar
//! ```
//!
//! # Configuration
//!
//! Defaults for `threads`, `ignore_empty` and `verbose` are read from
//! `~/.config/replacr/config.toml` (on Linux) and `REPLACR_*` environment
//! variables. Diagnostics honor `RUST_LOG`.

use std::process::ExitCode;

use replacr::{
    ReplacrError,
    cli::Cli,
    commands,
    config::ReplacrConfig,
    output::{Reporter, StderrReporter},
};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, ReplacrError>;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "replacr=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn try_main(cli: Cli, reporter: &dyn Reporter) -> Result<()> {
    let config = ReplacrConfig::load()?;
    init_tracing(cli.verbose || config.verbose);

    let run_config = cli.into_run_config(&config)?;
    let summary = commands::run(&run_config, reporter)?;
    tracing::debug!(total = summary.total, failed = summary.failed, "run finished");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if cli.dumpversion {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let reporter = StderrReporter::new();
    match try_main(cli, &reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ReplacrError::FilesFailed { count }) => {
            eprintln!("[ERROR] replacr failed with {count} error(s)");
            ExitCode::FAILURE
        }
        Err(e) => {
            reporter.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
