use pretty_assertions::assert_eq;

use tja_rs::tja::prelude::*;

fn parse_err(source: &str) -> ParseErrorWithRange {
    parse_tja(source, default_config()).unwrap_err()
}

#[test]
fn test_unknown_header_names_the_line() {
    let source = "TITLE:ok\nFOO:bar\n#START\n1,\n#END\n";
    let err = parse_err(source);
    assert_eq!(err.content(), &ParseError::UnknownHeader("FOO".to_string()));
    assert_eq!(err.line(), 2);
    assert_eq!(&source[err.range()], "FOO:bar");
    assert_eq!(err.to_string(), "unknown header: FOO at line 2");
}

#[test]
fn test_unknown_note_code() {
    let err = parse_err("#START\n10x0,\n#END\n");
    assert_eq!(err.content(), &ParseError::UnknownNoteCode('x'));
    assert_eq!(err.line(), 2);
}

#[test]
fn test_invalid_values() {
    for (source, target, value) in [
        ("BPM:fast\n", "BPM", "fast"),
        ("BPM:-120\n", "BPM", "-120"),
        ("COURSE:Tower\n", "COURSE", "Tower"),
        ("#START\n#BPMCHANGE 0\n#END\n", "BPMCHANGE", "0"),
        ("#START\n#MEASURE 4\n#END\n", "MEASURE", "4"),
        ("#START\n#SCROLL x\n#END\n", "SCROLL", "x"),
        ("#START\n#BRANCHSTART q,1,2\n#END\n", "BRANCHSTART", "q,1,2"),
        ("#START P3\n#END\n", "START", "P3"),
    ] {
        let err = parse_err(source);
        assert_eq!(
            err.content(),
            &ParseError::InvalidValue {
                target,
                value: value.to_string()
            },
            "{source:?}"
        );
    }
}

#[test]
fn test_course_structure() {
    assert_eq!(parse_err("#END\n").content(), &ParseError::EndWithoutStart);
    assert_eq!(
        parse_err("#START\n1,\n#START\n").content(),
        &ParseError::StartInCourse
    );
    assert_eq!(
        parse_err("#GOGOSTART\n").content(),
        &ParseError::OutsideCourse("#GOGOSTART".to_string())
    );
    assert_eq!(
        parse_err("#START\nBPM:100\n#END\n").content(),
        &ParseError::HeaderInCourse("BPM".to_string())
    );
    assert_eq!(
        parse_err("#START\n#E\n1,\n#END\n").content(),
        &ParseError::SectionOutsideBranch("E".to_string())
    );
}

#[test]
fn test_unterminated() {
    let err = parse_err("#START\n1010,\n1010\n#END\n");
    assert_eq!(err.content(), &ParseError::UnterminatedMeasure);
    assert_eq!(err.line(), 3);

    let err = parse_err("#START\n1010,\n1010\n");
    assert_eq!(err.content(), &ParseError::UnterminatedMeasure);
    assert_eq!(err.line(), 3);

    let source = "#START\n1010,\n";
    let err = parse_err(source);
    assert_eq!(err.content(), &ParseError::UnterminatedCourse);
    assert_eq!(err.range(), source.len()..source.len());
}

#[test]
fn test_regions() {
    let err = parse_err("BALLOON:5\n#START\n7050,\n8,\n#END\n");
    assert_eq!(err.content(), &ParseError::NestedRegion("balloon"));
    assert_eq!(err.line(), 3);

    let err = parse_err("#START\n6000,\n#END\n");
    assert_eq!(err.content(), &ParseError::UnclosedRegion("roll"));
    assert_eq!(err.line(), 2);

    let err = parse_err("BALLOON:5\n#START\n7008,\n9008,\n#END\n");
    assert_eq!(err.content(), &ParseError::MissingBalloonCount(2));
    assert_eq!(err.line(), 4);
}

#[test]
fn test_orphan_region_end_is_a_warning() {
    let ParseOutput { song, warnings } =
        parse_tja("#START\n1800,\n#END\n", default_config()).unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].content(), &ParseWarning::OrphanRegionEnd);
    assert_eq!(warnings[0].line(), 2);
    let course = song.course(Difficulty::Oni).unwrap();
    assert_eq!(course.events[1].kind, EventKind::Rest);
}

#[test]
fn test_ignored_commands_are_accepted() {
    let source = "#BMSCROLL\n#START\n#SECTION\n#LEVELHOLD\n#LYRIC hello\n\
                  #SENOTECHANGE 1\n#HBSCROLL\n#NMSCROLL\n1,\n#END\n";
    let ParseOutput { song, warnings } = parse_tja(source, default_config()).unwrap();
    assert_eq!(warnings, vec![]);
    assert_eq!(song.course(Difficulty::Oni).unwrap().events.len(), 2);
}
