/// Parser for JaCoCo XML coverage reports.
///
/// JaCoCo XML structure:
///   <report name="...">
///     <sessioninfo id="..." start="..." dump="..."/>
///     <package name="com/example">
///       <class name="com/example/Foo" sourcefilename="Foo.java">
///         <method name="doStuff" desc="()V" line="10">
///           <counter type="LINE" missed="0" covered="3"/>
///           ...
///         </method>
///         ...
///       </class>
///       <counter type="LINE" missed="1" covered="5"/>
///     </package>
///     <counter type="INSTRUCTION" missed="12" covered="80"/>
///     <counter type="BRANCH" missed="3" covered="9"/>
///     <counter type="LINE" missed="4" covered="36"/>
///     <counter type="METHOD" missed="1" covered="11"/>
///   </report>
///
/// Counters repeat at every level (method, class, package, report). The
/// report-level counters, direct children of the root element, hold the
/// totals and win. Without them the first counter of each type in document
/// order is used.
///
/// LINE, BRANCH and METHOD map to lines, branches and functions. A counter
/// with nothing to cover (`covered + missed == 0`) reports 0%.
use quick_xml::events::{BytesStart, Event};

use super::{get_attr, get_count, xml_err, xml_reader, CoverageParser};
use crate::error::Result;
use crate::model::{rate, CoverageKind, CoverageSummary};

pub struct JacocoParser;

impl CoverageParser for JacocoParser {
    fn parse(&self, input: &[u8]) -> Result<CoverageSummary> {
        parse(input)
    }
}

#[derive(Debug, Clone, Copy)]
struct Counter {
    covered: u64,
    missed: u64,
}

impl Counter {
    fn from_element(e: &BytesStart) -> Self {
        Self {
            covered: get_count(e, b"covered"),
            missed: get_count(e, b"missed"),
        }
    }

    fn pct(&self) -> f64 {
        rate(self.covered, self.covered.saturating_add(self.missed)) * 100.0
    }
}

/// First-seen and report-level counter per coverage kind.
#[derive(Debug, Default)]
struct Slot {
    first: Option<Counter>,
    report: Option<Counter>,
}

impl Slot {
    fn resolve(&self) -> Option<Counter> {
        self.report.or(self.first)
    }
}

fn kind_for(counter_type: &str) -> Option<CoverageKind> {
    match counter_type {
        "LINE" => Some(CoverageKind::Lines),
        "BRANCH" => Some(CoverageKind::Branches),
        "METHOD" => Some(CoverageKind::Functions),
        _ => None,
    }
}

/// Parse JaCoCo XML from raw bytes.
pub fn parse(input: &[u8]) -> Result<CoverageSummary> {
    let mut xml = xml_reader(input);
    let mut buf = Vec::new();

    let mut lines = Slot::default();
    let mut branches = Slot::default();
    let mut functions = Slot::default();

    // Number of currently open elements.
    let mut depth = 0usize;

    loop {
        let event = xml.read_event_into(&mut buf);
        let is_start_event = matches!(&event, Ok(Event::Start(_)));
        match event {
            Err(e) => return Err(xml_err(e, &xml)),
            Ok(Event::Eof) => break,
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"counter" {
                    if let Some(kind) = get_attr(e, b"type").as_deref().and_then(kind_for) {
                        let slot = match kind {
                            CoverageKind::Lines => &mut lines,
                            CoverageKind::Branches => &mut branches,
                            _ => &mut functions,
                        };
                        let counter = Counter::from_element(e);
                        if slot.first.is_none() {
                            slot.first = Some(counter);
                        }
                        if depth == 1 {
                            slot.report = Some(counter);
                        }
                    }
                }
                if is_start_event {
                    depth += 1;
                }
            }
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
        buf.clear();
    }

    let mut summary = CoverageSummary::new();
    for (kind, slot) in [
        (CoverageKind::Lines, &lines),
        (CoverageKind::Branches, &branches),
        (CoverageKind::Functions, &functions),
    ] {
        if let Some(counter) = slot.resolve() {
            summary.set(kind, counter.pct());
        }
    }
    Ok(summary)
}
