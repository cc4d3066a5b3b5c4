//! Reading report files from disk.
//!
//! Everything here is best-effort: missing paths, unreadable files and
//! malformed content are logged and degrade to zero counts or absent
//! coverage instead of failing the run.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::detect::{detect_coverage_format, detect_results_format, CoverageFormat, ResultsFormat};
use crate::error::Result;
use crate::model::{CoverageSummary, ParsedCounts, Tally, TestCounts};
use crate::parsers::istanbul::IstanbulParser;
use crate::parsers::jacoco::JacocoParser;
use crate::parsers::jest::JestParser;
use crate::parsers::junit::JUnitParser;
use crate::parsers::{CoverageParser, ResultsParser};

/// Placeholder some CI templates pass through for an unset input.
const UNDEFINED_PATH: &str = "undefined";

/// Read one results file, or every `.xml`/`.json` file directly inside a
/// directory, and sum the test counts.
///
/// `framework` is informational; dispatch is always by file extension.
pub fn collect_results(path: &str, framework: &str) -> TestCounts {
    let root = Path::new(path);
    if path.is_empty() || !root.exists() {
        warn!("Test results path not found: {}", path);
        return TestCounts::default();
    }

    log_framework_hint(framework);

    let files = if root.is_dir() {
        match list_report_files(root) {
            Ok(files) => files,
            Err(e) => {
                warn!("Could not list {}: {e}", root.display());
                return TestCounts::default();
            }
        }
    } else {
        vec![root.to_path_buf()]
    };

    let mut tally = Tally::new();
    for file in &files {
        if let Some(counts) = read_results_file(file) {
            debug!(
                file = %file.display(),
                total = counts.total,
                failed = counts.failed,
                skipped = counts.skipped,
                "parsed results"
            );
            tally.add(counts);
        }
    }
    tally.finish()
}

/// Read a coverage report. Returns `None` when no path was given, the file
/// is missing or unsupported, or parsing fails.
pub fn read_coverage(path: &str) -> Option<CoverageSummary> {
    if path.is_empty() || path == UNDEFINED_PATH {
        return None;
    }
    let file = Path::new(path);
    if !file.exists() {
        debug!("Coverage path not found: {}", path);
        return None;
    }

    let Some(format) = detect_coverage_format(file) else {
        debug!("Unsupported coverage file: {}", path);
        return None;
    };

    match parse_coverage_file(file, format) {
        Ok(summary) if summary.is_empty() => {
            debug!("No coverage counters found in {}", path);
            None
        }
        Ok(summary) => Some(summary),
        Err(e) => {
            warn!("Ignoring coverage file {} ({}): {e}", path, format);
            None
        }
    }
}

/// Direct children of `dir` with an `.xml` or `.json` extension, sorted.
fn list_report_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if detect_results_format(&path).is_some() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_results_file(file: &Path) -> Option<ParsedCounts> {
    let format = detect_results_format(file)?;
    match parse_results_file(file, format) {
        Ok(counts) => Some(counts),
        Err(e) => {
            warn!("Ignoring {} ({}): {e}", file.display(), format);
            None
        }
    }
}

fn parse_results_file(file: &Path, format: ResultsFormat) -> Result<ParsedCounts> {
    let content = std::fs::read(file)?;
    match format {
        ResultsFormat::JUnit => JUnitParser.parse(&content),
        ResultsFormat::Jest => JestParser.parse(&content),
    }
}

fn parse_coverage_file(file: &Path, format: CoverageFormat) -> Result<CoverageSummary> {
    let content = std::fs::read(file)?;
    match format {
        CoverageFormat::Istanbul => IstanbulParser.parse(&content),
        CoverageFormat::Jacoco => JacocoParser.parse(&content),
    }
}

fn log_framework_hint(framework: &str) {
    if framework == "auto" {
        return;
    }
    match framework.parse::<ResultsFormat>() {
        Ok(format) => debug!(
            "Framework hint '{}' ({}); dispatching by file extension",
            framework, format
        ),
        Err(_) => debug!("Framework hint '{}' is informational only", framework),
    }
}
