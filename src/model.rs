//! Uniform in-memory representation of test results and coverage, independent
//! of any specific report format. Parsers produce `ParsedCounts` and
//! `CoverageSummary`; the renderer consumes `TestCounts`.

use std::fmt;

use tracing::warn;

/// Compute a rate, returning 0.0 when the total is zero.
#[must_use]
pub fn rate(covered: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64
    }
}

/// Format a percentage with two decimals, e.g. `85.5` → `"85.50"`.
///
/// Values exactly halfway between two hundredths (odd multiples of 1/8,
/// like `12.625`) round away from zero instead of to even.
#[must_use]
pub fn format_pct(pct: f64) -> String {
    let is_tie = pct.is_finite() && (pct * 8.0).fract() == 0.0 && (pct * 4.0).fract() != 0.0;
    if is_tie {
        let hundredths = (pct.abs() * 100.0 + 0.5).floor().copysign(pct);
        return format!("{:.2}", hundredths / 100.0);
    }
    format!("{pct:.2}")
}

/// Aggregated test counts for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestCounts {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
}

/// Counts read from a single report file.
///
/// `passed` is `None` when the format does not report it directly (JUnit);
/// it is then derived once, after every file has been summed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsedCounts {
    pub total: u64,
    pub failed: u64,
    pub skipped: u64,
    pub passed: Option<u64>,
}

/// Accumulates `ParsedCounts` across files. Summation only, so the order in
/// which files are added never matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tally {
    reported: TestCounts,
    derived_total: u64,
    derived_failed: u64,
    derived_skipped: u64,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, counts: ParsedCounts) {
        match counts.passed {
            Some(passed) => {
                let r = &mut self.reported;
                r.total = r.total.saturating_add(counts.total);
                r.passed = r.passed.saturating_add(passed);
                r.failed = r.failed.saturating_add(counts.failed);
                r.skipped = r.skipped.saturating_add(counts.skipped);
            }
            None => {
                self.derived_total = self.derived_total.saturating_add(counts.total);
                self.derived_failed = self.derived_failed.saturating_add(counts.failed);
                self.derived_skipped = self.derived_skipped.saturating_add(counts.skipped);
            }
        }
    }

    /// Derive the passed count for formats that don't report it and merge
    /// with the explicitly reported counts.
    ///
    /// A derived passed count below zero is clamped to 0.
    #[must_use]
    pub fn finish(self) -> TestCounts {
        let not_passed = self.derived_failed.saturating_add(self.derived_skipped);
        if not_passed > self.derived_total {
            warn!(
                total = self.derived_total,
                failed = self.derived_failed,
                skipped = self.derived_skipped,
                "failed + skipped exceeds total; clamping passed count to 0"
            );
        }
        let derived_passed = self.derived_total.saturating_sub(not_passed);

        TestCounts {
            total: self.reported.total.saturating_add(self.derived_total),
            passed: self.reported.passed.saturating_add(derived_passed),
            failed: self.reported.failed.saturating_add(self.derived_failed),
            skipped: self.reported.skipped.saturating_add(self.derived_skipped),
        }
    }
}

/// The coverage dimensions a summary can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CoverageKind {
    Lines,
    Branches,
    Functions,
    Statements,
}

impl CoverageKind {
    pub const ALL: [CoverageKind; 4] = [
        CoverageKind::Lines,
        CoverageKind::Branches,
        CoverageKind::Functions,
        CoverageKind::Statements,
    ];

    /// Key used by Istanbul's `coverage-summary.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageKind::Lines => "lines",
            CoverageKind::Branches => "branches",
            CoverageKind::Functions => "functions",
            CoverageKind::Statements => "statements",
        }
    }

    /// Row label in the rendered coverage table.
    pub fn label(&self) -> &'static str {
        match self {
            CoverageKind::Lines => "Lines",
            CoverageKind::Branches => "Branches",
            CoverageKind::Functions => "Functions",
            CoverageKind::Statements => "Statements",
        }
    }
}

impl fmt::Display for CoverageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coverage percentages (0–100) per kind. Kinds missing from the source
/// report are `None` and are never rendered as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageSummary {
    pub lines: Option<f64>,
    pub branches: Option<f64>,
    pub functions: Option<f64>,
    pub statements: Option<f64>,
}

impl CoverageSummary {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, kind: CoverageKind) -> Option<f64> {
        match kind {
            CoverageKind::Lines => self.lines,
            CoverageKind::Branches => self.branches,
            CoverageKind::Functions => self.functions,
            CoverageKind::Statements => self.statements,
        }
    }

    pub fn set(&mut self, kind: CoverageKind, pct: f64) {
        let slot = match kind {
            CoverageKind::Lines => &mut self.lines,
            CoverageKind::Branches => &mut self.branches,
            CoverageKind::Functions => &mut self.functions,
            CoverageKind::Statements => &mut self.statements,
        };
        *slot = Some(pct);
    }

    /// Two-decimal percentage text for `kind`, if present.
    #[must_use]
    pub fn formatted(&self, kind: CoverageKind) -> Option<String> {
        self.get(kind).map(format_pct)
    }

    /// Present kinds in rendering order.
    pub fn iter(&self) -> impl Iterator<Item = (CoverageKind, f64)> + '_ {
        CoverageKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|pct| (kind, pct)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn junit(total: u64, failed: u64, skipped: u64) -> ParsedCounts {
        ParsedCounts {
            total,
            failed,
            skipped,
            passed: None,
        }
    }

    #[test]
    fn test_rate_zero_total() {
        assert_eq!(rate(0, 0), 0.0);
        assert_eq!(rate(3, 4), 0.75);
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(85.5), "85.50");
        assert_eq!(format_pct(100.0), "100.00");
        assert_eq!(format_pct(0.0), "0.00");
    }

    #[test]
    fn test_format_pct_rounds_ties_up() {
        assert_eq!(format_pct(0.125), "0.13");
        assert_eq!(format_pct(0.375), "0.38");
        assert_eq!(format_pct(12.625), "12.63");
        assert_eq!(format_pct(101.0 / 800.0 * 100.0), "12.63");
        assert_eq!(format_pct(87.875), "87.88");
        // Not ties.
        assert_eq!(format_pct(2.5), "2.50");
        assert_eq!(format_pct(0.25), "0.25");
        assert_eq!(format_pct(1.0 / 3.0 * 100.0), "33.33");
    }

    #[test]
    fn test_tally_saturates_huge_counts() {
        let mut tally = Tally::new();
        tally.add(junit(u64::MAX, 0, 0));
        tally.add(junit(1, 0, 0));
        tally.add(ParsedCounts {
            total: u64::MAX,
            failed: 0,
            skipped: 0,
            passed: Some(u64::MAX),
        });
        let counts = tally.finish();
        assert_eq!(counts.total, u64::MAX);
        assert_eq!(counts.passed, u64::MAX);
    }

    #[test]
    fn test_tally_derives_passed_after_summing() {
        let mut tally = Tally::new();
        // On its own this file would have a negative passed count.
        tally.add(junit(1, 2, 0));
        tally.add(junit(9, 0, 1));
        let counts = tally.finish();
        assert_eq!(counts.total, 10);
        assert_eq!(counts.failed, 2);
        assert_eq!(counts.skipped, 1);
        assert_eq!(counts.passed, 7);
    }

    #[test]
    fn test_tally_clamps_negative_passed() {
        let mut tally = Tally::new();
        tally.add(junit(2, 3, 1));
        let counts = tally.finish();
        assert_eq!(counts.passed, 0);
        assert_eq!(counts.total, 2);
    }

    #[test]
    fn test_tally_keeps_reported_passed() {
        let mut tally = Tally::new();
        tally.add(ParsedCounts {
            total: 5,
            failed: 1,
            skipped: 1,
            passed: Some(2),
        });
        tally.add(junit(4, 1, 0));
        let counts = tally.finish();
        assert_eq!(
            counts,
            TestCounts {
                total: 9,
                passed: 5,
                failed: 2,
                skipped: 1,
            }
        );
    }

    #[test]
    fn test_coverage_summary_iter_order() {
        let mut summary = CoverageSummary::new();
        assert!(summary.is_empty());
        summary.set(CoverageKind::Statements, 10.0);
        summary.set(CoverageKind::Lines, 20.0);
        let kinds: Vec<_> = summary.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![CoverageKind::Lines, CoverageKind::Statements]);
        assert_eq!(summary.formatted(CoverageKind::Lines).as_deref(), Some("20.00"));
        assert_eq!(summary.formatted(CoverageKind::Branches), None);
    }
}
