use pretty_assertions::assert_eq;

use tja_rs::tja::prelude::*;

fn parse_oni(source: &str) -> Course {
    let ParseOutput { mut song, warnings } = parse_tja(source, default_config()).unwrap();
    assert_eq!(warnings, vec![]);
    song.courses.remove(&Difficulty::Oni).unwrap()
}

fn times(course: &Course) -> Vec<f64> {
    course.notes().map(|(time, _)| time).collect()
}

#[test]
fn test_four_codes_in_one_measure() {
    let course = parse_oni("BPM:120\n#START\n1212,\n#END\n");
    assert_eq!(times(&course), vec![0.0, 0.5, 1.0, 1.5]);
    assert_eq!(
        course.notes().map(|(_, note)| note).collect::<Vec<_>>(),
        vec![NoteKind::Don, NoteKind::Ka, NoteKind::Don, NoteKind::Ka]
    );
    assert_eq!(course.length(), 2.0);
}

#[test]
fn test_constant_tempo_round_trip() {
    for (bpm, measure, codes) in [
        (120.0, "4/4", "1000"),
        (150.0, "3/4", "101"),
        (173.0, "7/8", "1010101"),
        (96.5, "5/4", "10000000000000000000"),
    ] {
        let measures = 13;
        let body = format!("{codes},\n").repeat(measures);
        let source = format!("BPM:{bpm}\n#START\n#MEASURE {measure}\n{body}#END\n");
        let course = parse_oni(&source);
        let duration = MeasureLength::try_from(measure)
            .unwrap()
            .duration_secs(bpm);
        let expected = measures as f64 * duration;
        assert!(
            (course.length() - expected).abs() < 1e-9,
            "{bpm} {measure}: {} != {expected}",
            course.length()
        );
        assert_eq!(course.events.last().unwrap().kind, EventKind::End);
    }
}

#[test]
fn test_empty_measure_advances_whole_measure() {
    let course = parse_oni("BPM:60\n#START\n,\n,\n1,\n#END\n");
    assert_eq!(times(&course), vec![8.0]);
    assert_eq!(course.length(), 12.0);
}

#[test]
fn test_measure_spans_lines() {
    let course = parse_oni("#START\n10\n#SCROLL 2\n10\n1010,\n#END\n");
    assert_eq!(times(&course), vec![0.0, 0.5, 1.0, 1.5]);
    let scroll = course
        .events
        .iter()
        .find(|event| matches!(event.kind, EventKind::ScrollChange(_)))
        .unwrap();
    assert_eq!(scroll.time, 0.5);
    assert_eq!(scroll.measure, 0);
}

#[test]
fn test_tempo_change_does_not_move_earlier_codes() {
    let course = parse_oni("BPM:120\n#START\n11\n#BPMCHANGE 60\n11,\n1,\n#END\n");
    // Two codes at 120 BPM take 0.5s each, two codes at 60 BPM take 1s each.
    assert_eq!(times(&course), vec![0.0, 0.5, 1.0, 2.0, 3.0]);
    assert_eq!(course.length(), 7.0);
}

#[test]
fn test_delay_shifts_following_events() {
    let course = parse_oni("#START\n1,\n#DELAY 0.25\n1,\n#END\n");
    assert_eq!(times(&course), vec![0.0, 2.25]);
    assert_eq!(course.length(), 4.25);
}

#[test]
fn test_commands_after_last_measure() {
    let course = parse_oni("#START\n1,\n#GOGOSTART\n#BARLINEOFF\n#END\n");
    let tail: Vec<_> = course
        .events
        .iter()
        .skip(1)
        .map(|event| (event.time, event.kind.clone()))
        .collect();
    assert_eq!(
        tail,
        vec![
            (2.0, EventKind::GogoStart),
            (2.0, EventKind::Barline(false)),
            (2.0, EventKind::End),
        ]
    );
}

#[test]
fn test_times_never_decrease() {
    let source = include_str!("files/simple.tja");
    let ParseOutput { song, .. } = parse_tja(source, default_config()).unwrap();
    for course in song.courses.values() {
        assert!(
            course
                .events
                .windows(2)
                .all(|pair| pair[0].time <= pair[1].time)
        );
    }
}
