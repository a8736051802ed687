//! Test diagnostics module functionality
#![cfg(feature = "diagnostics")]

use tja_rs::{
    diagnostics::{
        SimpleSource, ToAriadne, collect_parse_reports, emit_parse_error, emit_parse_warnings,
    },
    tja::prelude::*,
};

#[test]
fn test_simple_source_creation() {
    let source_text = "TITLE:Test Song\nBPM:120\n";
    let source = SimpleSource::new("test.tja", source_text);

    assert_eq!(source.text(), source_text);
    assert_eq!(source.name(), "test.tja");
}

#[test]
fn test_emit_warnings_with_real_tja() {
    let source = "#START P2\n1,\n#END\n#START\n1800,\n#BRANCHEND\n#END\n";
    let output = parse_tja(source, default_config()).unwrap();
    assert_eq!(output.warnings.len(), 3);

    emit_parse_warnings("test.tja", source, &output.warnings);
    let reports = collect_parse_reports("test.tja", source, &output.warnings);
    assert_eq!(reports.len(), 3);
}

#[test]
fn test_empty_warnings() {
    let source = "TITLE:test\n";
    let empty_warnings: Vec<ParseWarningWithRange> = vec![];
    emit_parse_warnings("test.tja", source, &empty_warnings);
    assert!(collect_parse_reports("test.tja", source, &empty_warnings).is_empty());
}

#[test]
fn test_error_report() {
    let source = "TITLE:test\n#START\n12x,\n#END\n";
    let err = parse_tja(source, default_config()).unwrap_err();
    assert_eq!(err.content(), &ParseError::UnknownNoteCode('x'));

    let simple = SimpleSource::new("test.tja", source);
    let _report = err.to_report(&simple);
    emit_parse_error("test.tja", source, &err);
}

#[test]
fn test_error_at_end_of_source() {
    let source = "#START\n1,\n";
    let err = parse_tja(source, default_config()).unwrap_err();
    assert_eq!(err.content(), &ParseError::UnterminatedCourse);
    emit_parse_error("test.tja", source, &err);
}

#[test]
fn test_report_is_titled_with_line() {
    let source = "TITLE:test\n#START\n1800,\n#END\n";
    let output = parse_tja(source, default_config()).unwrap();
    let reports = collect_parse_reports("test.tja", source, &output.warnings);
    let mut rendered = vec![];
    reports[0]
        .write(
            ("test.tja".to_owned(), ariadne::Source::from(source)),
            &mut rendered,
        )
        .unwrap();
    let rendered = String::from_utf8(rendered).unwrap();
    assert!(rendered.contains("parse warning at line 3"));
    assert!(rendered.contains("region end without an open region"));
}
