/// Format detection for result and coverage files.
///
/// Dispatch is by file extension only: `.xml` and `.json` map to one format
/// each for test results and one each for coverage. The `--framework` hint
/// does not take part.
use std::path::Path;

use crate::error::SummaryError;

/// Supported test-result formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsFormat {
    JUnit,
    Jest,
}

impl ResultsFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultsFormat::JUnit => "junit",
            ResultsFormat::Jest => "jest",
        }
    }
}

impl std::str::FromStr for ResultsFormat {
    type Err = SummaryError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "junit" => Ok(ResultsFormat::JUnit),
            "jest" => Ok(ResultsFormat::Jest),
            _ => Err(SummaryError::Parse(format!(
                "Unknown results format: '{}'. Supported: junit, jest",
                s
            ))),
        }
    }
}

impl std::fmt::Display for ResultsFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported coverage formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageFormat {
    /// Istanbul / Jest `coverage-summary.json`.
    Istanbul,
    Jacoco,
}

impl CoverageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageFormat::Istanbul => "istanbul",
            CoverageFormat::Jacoco => "jacoco",
        }
    }
}

impl std::fmt::Display for CoverageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the results format of `path`, or `None` for files to skip.
pub fn detect_results_format(path: &Path) -> Option<ResultsFormat> {
    match path.extension()?.to_str()? {
        "xml" => Some(ResultsFormat::JUnit),
        "json" => Some(ResultsFormat::Jest),
        _ => None,
    }
}

/// Detect the coverage format of `path`, or `None` if unsupported.
pub fn detect_coverage_format(path: &Path) -> Option<CoverageFormat> {
    match path.extension()?.to_str()? {
        "json" => Some(CoverageFormat::Istanbul),
        "xml" => Some(CoverageFormat::Jacoco),
        _ => None,
    }
}
