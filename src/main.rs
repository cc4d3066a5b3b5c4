use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use test_summary::cli::{self, Options};

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();

    let opts = Options::from_args(
        std::env::args_os().map(|a| a.to_string_lossy().into_owned()),
    );
    let outcome = cli::cmd_summarize(&opts, &opts.github_context())?;

    print!("{}", outcome.console);

    if !outcome.summary.threshold_met {
        eprintln!("{}", outcome.summary.failure_message());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
