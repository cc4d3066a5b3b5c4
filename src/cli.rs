//! Command-line options and the summarize pipeline.
//!
//! `cmd_summarize` returns its console output as a `String`, making it easy
//! to test without capturing stdout.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::report::{self, Summary};
use crate::{github, ingest};

/// Flags that take exactly one value token.
const VALUE_FLAGS: [&str; 6] = [
    "--results",
    "--coverage",
    "--threshold",
    "--framework",
    "--output-file",
    "--summary-file",
];

/// Flags forwarded to clap unchanged.
const PASSTHROUGH_FLAGS: [&str; 4] = ["-h", "--help", "-V", "--version"];

/// test-summary — Summarize test results and coverage for CI pipelines.
#[derive(Parser, Debug, Clone)]
#[command(name = "test-summary", version, about, args_override_self = true)]
pub struct Options {
    /// Test results file, or a directory of JUnit XML / Jest JSON reports.
    #[arg(long, default_value = "")]
    pub results: String,

    /// Coverage report (Istanbul coverage-summary.json or JaCoCo XML).
    #[arg(long, default_value = "")]
    pub coverage: String,

    /// Minimum pass rate, in percent.
    #[arg(long, default_value = "80")]
    pub threshold: String,

    /// Test framework label (informational; formats are detected by extension).
    #[arg(long, default_value = "auto")]
    pub framework: String,

    /// File to append `key=value` step outputs to. Empty means unset.
    #[arg(long, env = "GITHUB_OUTPUT", value_name = "PATH")]
    pub output_file: Option<OsString>,

    /// File to append the Markdown report to. Empty means unset.
    #[arg(long, env = "GITHUB_STEP_SUMMARY", value_name = "PATH")]
    pub summary_file: Option<OsString>,
}

impl Options {
    /// Parse options from a raw argument list (including the program name).
    /// Unrecognized arguments are ignored rather than rejected.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        Self::parse_from(normalize_args(args))
    }

    pub fn github_context(&self) -> github::Context {
        github::Context::new(
            self.output_file.clone().map(PathBuf::from),
            self.summary_file.clone().map(PathBuf::from),
        )
    }
}

/// Keep only recognized flags, rewriting `--flag value` as `--flag=value`
/// so values that look like flags are taken verbatim.
///
/// A flag without a value, or with an empty one, is dropped and falls back
/// to its default.
pub fn normalize_args<I: IntoIterator<Item = String>>(args: I) -> Vec<String> {
    let mut args = args.into_iter();
    let mut normalized: Vec<String> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        if let Some(flag) = VALUE_FLAGS.iter().find(|f| *f == &arg.as_str()) {
            match args.next() {
                Some(value) if !value.is_empty() => normalized.push(format!("{flag}={value}")),
                _ => {}
            }
        } else if let Some((flag, value)) = arg.split_once('=') {
            if VALUE_FLAGS.contains(&flag) && !value.is_empty() {
                normalized.push(arg);
            }
        } else if PASSTHROUGH_FLAGS.contains(&arg.as_str()) {
            normalized.push(arg);
        } else {
            debug!("Ignoring argument '{}'", arg);
        }
    }

    normalized
}

/// Result of a summarize run.
#[derive(Debug)]
pub struct Outcome {
    pub summary: Summary,
    /// Report plus recap, for stdout.
    pub console: String,
}

/// Aggregate results and coverage, render the report, and publish it to the
/// configured step summary and outputs.
pub fn cmd_summarize(opts: &Options, ctx: &github::Context) -> Result<Outcome> {
    let counts = ingest::collect_results(&opts.results, &opts.framework);
    let coverage = ingest::read_coverage(&opts.coverage);
    let summary = report::build_summary(counts, coverage, &opts.threshold);

    let markdown = summary.format_markdown();
    ctx.append_step_summary(&markdown)?;
    for (name, value) in summary.outputs() {
        ctx.set_output(name, value)?;
    }

    let console = format!("{markdown}\n{}", summary.format_recap());
    Ok(Outcome { summary, console })
}
