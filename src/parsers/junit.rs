/// Parser for JUnit-style XML test reports.
///
/// JUnit XML structure (as written by Surefire, Gradle, pytest, jest-junit, ...):
///   <testsuites tests="..." failures="..." errors="..." skipped="...">
///     <testsuite name="..." tests="12" failures="1" errors="0" skipped="2" time="...">
///       <testcase classname="..." name="..." time="...">
///         <failure message="...">...</failure>
///       </testcase>
///       ...
///     </testsuite>
///   </testsuites>
///
/// Only the count attributes of the suite elements are read; individual
/// `<testcase>` children are not inspected. Every `<testsuite>` contributes
/// to the totals. The `<testsuites>` root is used only when a report has no
/// `<testsuite>` element at all.
use quick_xml::events::{BytesStart, Event};

use super::{get_count, xml_err, xml_reader, ResultsParser};
use crate::error::Result;
use crate::model::ParsedCounts;

pub struct JUnitParser;

impl ResultsParser for JUnitParser {
    fn parse(&self, input: &[u8]) -> Result<ParsedCounts> {
        parse(input)
    }
}

/// Parse JUnit XML from raw bytes. The passed count is left for the caller
/// to derive after aggregation.
pub fn parse(input: &[u8]) -> Result<ParsedCounts> {
    let mut xml = xml_reader(input);
    let mut buf = Vec::new();

    let mut counts = ParsedCounts::default();
    let mut suites_seen = 0usize;
    let mut root: Option<ParsedCounts> = None;

    loop {
        match xml.read_event_into(&mut buf) {
            Err(e) => return Err(xml_err(e, &xml)),
            Ok(Event::Eof) => break,
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"testsuite" => {
                    let suite = suite_counts(e);
                    counts.total = counts.total.saturating_add(suite.total);
                    counts.failed = counts.failed.saturating_add(suite.failed);
                    counts.skipped = counts.skipped.saturating_add(suite.skipped);
                    suites_seen += 1;
                }
                b"testsuites" if root.is_none() => {
                    root = Some(suite_counts(e));
                }
                _ => {}
            },
            _ => {}
        }
        buf.clear();
    }

    if suites_seen == 0 {
        return Ok(root.unwrap_or_default());
    }
    Ok(counts)
}

fn suite_counts(e: &BytesStart) -> ParsedCounts {
    ParsedCounts {
        total: get_count(e, b"tests"),
        failed: get_count(e, b"failures").saturating_add(get_count(e, b"errors")),
        skipped: get_count(e, b"skipped"),
        passed: None,
    }
}
