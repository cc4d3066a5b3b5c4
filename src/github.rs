//! GitHub Actions helpers for publishing step outputs and the job summary.

use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing::debug;

/// Destinations for side-channel output. Each is an append-only file; an
/// unset destination is silently skipped.
#[derive(Debug, Clone, Default)]
pub struct Context {
    output: Option<PathBuf>,
    step_summary: Option<PathBuf>,
}

impl Context {
    /// Build a context from explicit destinations. Empty paths count as unset.
    pub fn new(output: Option<PathBuf>, step_summary: Option<PathBuf>) -> Self {
        let non_empty = |p: Option<PathBuf>| p.filter(|p| !p.as_os_str().is_empty());
        Self {
            output: non_empty(output),
            step_summary: non_empty(step_summary),
        }
    }

    /// Append a `name=value` line to the step outputs file.
    pub fn set_output(&self, name: &str, value: impl Display) -> Result<()> {
        let Some(path) = &self.output else {
            return Ok(());
        };
        append(path, &format!("{name}={value}\n"))
            .with_context(|| format!("Failed to write output '{name}' to {}", path.display()))
    }

    /// Append the rendered report to the job step summary.
    pub fn append_step_summary(&self, body: &str) -> Result<()> {
        let Some(path) = &self.step_summary else {
            return Ok(());
        };
        append(path, body)
            .with_context(|| format!("Failed to write step summary to {}", path.display()))?;
        debug!("Step summary written to {}", path.display());
        Ok(())
    }
}

fn append(path: &Path, text: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())
}
