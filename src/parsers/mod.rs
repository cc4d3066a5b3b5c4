pub mod istanbul;
pub mod jacoco;
pub mod jest;
pub mod junit;

use quick_xml::events::BytesStart;
use quick_xml::reader::Reader;

use crate::error::{Result, SummaryError};
use crate::model::{CoverageSummary, ParsedCounts};

/// Every test-result parser implements this trait.
pub trait ResultsParser {
    /// Parse the input bytes of one report file into test counts.
    fn parse(&self, input: &[u8]) -> Result<ParsedCounts>;
}

/// Every coverage parser implements this trait.
pub trait CoverageParser {
    /// Parse the input bytes into coverage percentages.
    fn parse(&self, input: &[u8]) -> Result<CoverageSummary>;
}

/// XML reader configured for the loosely-formed reports CI tools emit.
pub(crate) fn xml_reader(input: &[u8]) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(input);
    reader.trim_text(true);
    reader.check_end_names(false);
    reader
}

pub(crate) fn xml_err<R>(source: quick_xml::Error, reader: &Reader<R>) -> SummaryError {
    SummaryError::Xml {
        source,
        position: reader.buffer_position(),
    }
}

/// Unescaped value of attribute `key`, if present.
pub(crate) fn get_attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok())
        .map(|v| v.into_owned())
}

/// Numeric attribute `key`; absent or non-numeric values count as 0.
pub(crate) fn get_count(e: &BytesStart, key: &[u8]) -> u64 {
    get_attr(e, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}
