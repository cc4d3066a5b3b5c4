//! Output formatting for test summaries.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::model::{format_pct, rate, CoverageSummary, TestCounts};

/// Width of the pass-rate progress bar, in characters.
pub const PROGRESS_BAR_WIDTH: usize = 30;

/// Leading numeric prefix of a threshold such as "80", "80.0" or "80%".
static THRESHOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap());

/// Aggregated results, ready to be formatted.
#[derive(Debug, Clone)]
pub struct Summary {
    pub counts: TestCounts,
    pub coverage: Option<CoverageSummary>,
    /// Threshold exactly as given on the command line.
    pub threshold: String,
    /// Pass rate with two decimals, or "0" when no tests ran.
    pub pass_rate: String,
    pub threshold_met: bool,
}

/// Build a [`Summary`] and evaluate the threshold.
///
/// The comparison is numeric: "80.0" and "80.00" are equal. A threshold with
/// no numeric prefix can never be met.
pub fn build_summary(
    counts: TestCounts,
    coverage: Option<CoverageSummary>,
    threshold: &str,
) -> Summary {
    let pass_rate = percent_of(counts.passed, counts.total);

    let threshold_met = match parse_threshold(threshold) {
        Some(required) => pass_rate.parse::<f64>().unwrap_or(0.0) >= required,
        None => {
            warn!("Threshold '{}' is not a number; treating it as not met", threshold);
            false
        }
    };

    Summary {
        counts,
        coverage,
        threshold: threshold.to_string(),
        pass_rate,
        threshold_met,
    }
}

/// Numeric value of a threshold, read from its leading numeric prefix.
#[must_use]
pub fn parse_threshold(threshold: &str) -> Option<f64> {
    THRESHOLD_RE
        .find(threshold)
        .and_then(|m| m.as_str().trim().parse().ok())
}

/// `part` as a percentage of `total` with two decimals, or "0" for an empty
/// total.
#[must_use]
pub fn percent_of(part: u64, total: u64) -> String {
    if total == 0 {
        "0".to_string()
    } else {
        format_pct(rate(part, total) * 100.0)
    }
}

/// Text progress bar for a percentage in `[0, 100]`.
#[must_use]
pub fn progress_bar(pct: f64, width: usize) -> String {
    let filled = filled_cells(pct, width);
    let mut bar = "\u{2588}".repeat(filled);
    bar.push_str(&"\u{2591}".repeat(width - filled));
    bar
}

/// Number of filled cells: `round(width * pct / 100)`, clamped to the width.
#[must_use]
pub fn filled_cells(pct: f64, width: usize) -> usize {
    let cells = (width as f64 * pct / 100.0).round();
    if cells.is_nan() {
        0
    } else {
        cells.clamp(0.0, width as f64) as usize
    }
}

impl Summary {
    #[must_use]
    pub fn status_text(&self) -> &'static str {
        if self.threshold_met {
            "PASSED"
        } else {
            "FAILED"
        }
    }

    fn status_emoji(&self) -> &'static str {
        if self.threshold_met {
            "✅"
        } else {
            "❌"
        }
    }

    /// Markdown report for the console and the job step summary.
    #[must_use]
    pub fn format_markdown(&self) -> String {
        let mut md = String::new();
        let c = &self.counts;
        let pass_rate = &self.pass_rate;
        let threshold = &self.threshold;

        writeln!(md, "# {} Test Summary - {}\n", self.status_emoji(), self.status_text()).unwrap();

        md.push_str("## Test Results\n\n");
        md.push_str("| Metric | Count | Percentage |\n");
        md.push_str("|--------|-------|------------|\n");
        writeln!(md, "| ✅ Passed | {} | {pass_rate}% |", c.passed).unwrap();
        writeln!(
            md,
            "| ❌ Failed | {} | {}% |",
            c.failed,
            percent_of(c.failed, c.total)
        )
        .unwrap();
        writeln!(
            md,
            "| ⏭️ Skipped | {} | {}% |",
            c.skipped,
            percent_of(c.skipped, c.total)
        )
        .unwrap();
        writeln!(md, "| 📊 **Total** | **{}** | **100%** |\n", c.total).unwrap();

        let bar = progress_bar(pass_rate.parse().unwrap_or(0.0), PROGRESS_BAR_WIDTH);
        writeln!(md, "### Pass Rate: {pass_rate}%").unwrap();
        writeln!(md, "`{bar}` {pass_rate}% / {threshold}% required\n").unwrap();

        if let Some(coverage) = &self.coverage {
            md.push_str("## Code Coverage\n\n");
            md.push_str("| Type | Coverage |\n");
            md.push_str("|------|----------|\n");
            for (kind, pct) in coverage.iter() {
                writeln!(md, "| {} | {}% |", kind.label(), format_pct(pct)).unwrap();
            }
            md.push('\n');
        }

        md.push_str("## Threshold Check\n\n");
        md.push_str("| Requirement | Status |\n");
        md.push_str("|-------------|--------|\n");
        let status = if self.threshold_met {
            "✅ Met"
        } else {
            "❌ Not Met"
        };
        writeln!(md, "| Pass rate ≥ {threshold}% | {status} |").unwrap();

        md
    }

    /// Short console recap printed after the report.
    #[must_use]
    pub fn format_recap(&self) -> String {
        let verdict = if self.threshold_met {
            "✅ BUILD PASSED"
        } else {
            "❌ BUILD FAILED"
        };
        format!(
            "\n📊 Pass Rate: {}%\n📋 Threshold: {}%\n{verdict}\n",
            self.pass_rate, self.threshold
        )
    }

    /// Error line for a missed threshold.
    #[must_use]
    pub fn failure_message(&self) -> String {
        format!(
            "\n❌ ERROR: Pass rate ({}%) is below threshold ({}%)",
            self.pass_rate, self.threshold
        )
    }

    /// Side-channel outputs, in the order they are written.
    #[must_use]
    pub fn outputs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("total", self.counts.total.to_string()),
            ("passed", self.counts.passed.to_string()),
            ("failed", self.counts.failed.to_string()),
            ("skipped", self.counts.skipped.to_string()),
            ("pass_rate", self.pass_rate.clone()),
            ("threshold_met", self.threshold_met.to_string()),
        ]
    }
}
