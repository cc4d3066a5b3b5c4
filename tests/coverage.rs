mod common;

use test_summary::ingest::read_coverage;
use test_summary::model::CoverageKind;

#[test]
fn istanbul_lines_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write(
        dir.path(),
        "coverage-summary.json",
        br#"{"total": {"lines": {"pct": 85.5}}}"#,
    );

    let coverage = read_coverage(&path).unwrap();
    assert_eq!(coverage.formatted(CoverageKind::Lines).as_deref(), Some("85.50"));
    assert_eq!(coverage.branches, None);
    assert_eq!(coverage.functions, None);
    assert_eq!(coverage.statements, None);
}

#[test]
fn istanbul_fixture() {
    let coverage = read_coverage(&common::fixture("coverage-summary.json").to_string_lossy())
        .unwrap();
    let formatted: Vec<_> = coverage
        .iter()
        .map(|(kind, _)| (kind, coverage.formatted(kind).unwrap()))
        .collect();
    assert_eq!(
        formatted,
        vec![
            (CoverageKind::Lines, "85.50".to_string()),
            (CoverageKind::Branches, "68.75".to_string()),
            (CoverageKind::Functions, "87.80".to_string()),
            (CoverageKind::Statements, "83.17".to_string()),
        ]
    );
}

#[test]
fn jacoco_fixture_uses_report_totals() {
    let coverage = read_coverage(&common::fixture("jacoco.xml").to_string_lossy()).unwrap();
    assert_eq!(coverage.formatted(CoverageKind::Lines).as_deref(), Some("75.00"));
    assert_eq!(coverage.formatted(CoverageKind::Branches).as_deref(), Some("62.50"));
    assert_eq!(coverage.formatted(CoverageKind::Functions).as_deref(), Some("80.00"));
    assert_eq!(coverage.statements, None);
}

#[test]
fn jacoco_empty_counter_is_zero_percent() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write(
        dir.path(),
        "jacoco.xml",
        br#"<report name="empty"><counter type="LINE" covered="0" missed="0"/></report>"#,
    );

    let coverage = read_coverage(&path).unwrap();
    assert_eq!(coverage.formatted(CoverageKind::Lines).as_deref(), Some("0.00"));
    assert_eq!(coverage.branches, None);
}

#[test]
fn absent_coverage() {
    let dir = tempfile::tempdir().unwrap();

    assert!(read_coverage("").is_none());
    assert!(read_coverage("undefined").is_none());
    assert!(read_coverage(&dir.path().join("missing.json").to_string_lossy()).is_none());

    let lcov = common::write(dir.path(), "lcov.info", b"SF:/src/lib.rs\nDA:1,1\nend_of_record\n");
    assert!(read_coverage(&lcov).is_none());

    let broken = common::write(dir.path(), "coverage-summary.json", b"{\"total\": {");
    assert!(read_coverage(&broken).is_none());

    let no_total = common::write(dir.path(), "coverage-final.json", br#"{"/src/a.js": {}}"#);
    assert!(read_coverage(&no_total).is_none());

    let no_counters = common::write(dir.path(), "jacoco.xml", br#"<report name="x"/>"#);
    assert!(read_coverage(&no_counters).is_none());
}
