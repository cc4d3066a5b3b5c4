/// Parser for Istanbul / Jest `coverage-summary.json`.
///
/// Reference: https://github.com/istanbuljs/istanbuljs (json-summary reporter)
///
/// The format is a JSON object keyed by file path plus a `total` entry:
///   {
///     "total": {
///       "lines":      { "total": 200, "covered": 171, "skipped": 0, "pct": 85.5 },
///       "statements": { ... },
///       "functions":  { ... },
///       "branches":   { ... }
///     },
///     "/src/app.js": { ... }
///   }
///
/// Only `total` is read. Istanbul writes `"pct": "Unknown"` when a metric has
/// nothing to cover; such kinds are omitted like missing ones.
use serde_json::Value;

use super::CoverageParser;
use crate::error::{Result, SummaryError};
use crate::model::{CoverageKind, CoverageSummary};

pub struct IstanbulParser;

impl CoverageParser for IstanbulParser {
    fn parse(&self, input: &[u8]) -> Result<CoverageSummary> {
        parse(input)
    }
}

/// Parse a coverage summary from raw bytes.
pub fn parse(input: &[u8]) -> Result<CoverageSummary> {
    let root: Value = serde_json::from_slice(input)?;
    let total = root
        .get("total")
        .filter(|v| !v.is_null())
        .ok_or_else(|| SummaryError::Parse("coverage summary has no `total` entry".to_string()))?;

    let mut summary = CoverageSummary::new();
    for kind in CoverageKind::ALL {
        if let Some(pct) = total
            .get(kind.as_str())
            .and_then(|metric| metric.get("pct"))
            .and_then(Value::as_f64)
        {
            summary.set(kind, pct);
        }
    }
    Ok(summary)
}
