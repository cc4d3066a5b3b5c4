/// Parser for Jest `--json` test results.
///
/// Only the aggregate counters at the top level are read:
///   {
///     "numTotalTests": 12,
///     "numPassedTests": 10,
///     "numFailedTests": 1,
///     "numPendingTests": 1,
///     "testResults": [ ... ]
///   }
///
/// Pending tests are reported as skipped.
use serde::Deserialize;

use super::ResultsParser;
use crate::error::Result;
use crate::model::ParsedCounts;

pub struct JestParser;

impl ResultsParser for JestParser {
    fn parse(&self, input: &[u8]) -> Result<ParsedCounts> {
        parse(input)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JestResults {
    num_total_tests: Option<u64>,
    num_passed_tests: Option<u64>,
    num_failed_tests: Option<u64>,
    num_pending_tests: Option<u64>,
}

/// Parse Jest JSON results from raw bytes. Missing or `null` counters are 0.
pub fn parse(input: &[u8]) -> Result<ParsedCounts> {
    let results: JestResults = serde_json::from_slice(input)?;
    Ok(ParsedCounts {
        total: results.num_total_tests.unwrap_or(0),
        failed: results.num_failed_tests.unwrap_or(0),
        skipped: results.num_pending_tests.unwrap_or(0),
        passed: Some(results.num_passed_tests.unwrap_or(0)),
    })
}
