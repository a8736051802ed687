use pretty_assertions::assert_eq;

use tja_rs::tja::prelude::*;

#[test]
fn test_simple() {
    let source = include_str!("files/simple.tja");
    let ParseOutput { song, warnings } = parse_tja(source, default_config()).unwrap();
    assert_eq!(warnings, vec![]);

    // Check header content
    assert_eq!(song.metadata.title.as_deref(), Some("Sample Song"));
    assert_eq!(song.metadata.subtitle.as_deref(), Some("--Test Composer"));
    assert_eq!(song.metadata.genre.as_deref(), Some("Test"));
    assert_eq!(song.metadata.wave.as_deref(), Some("sample.ogg"));
    assert_eq!(song.metadata.bpm.as_f64(), 120.0);
    assert_eq!(song.metadata.offset, -1.5);
    assert_eq!(song.metadata.demo_start, 10.0);
    assert_eq!(
        song.metadata.others.get("TITLEJA").map(String::as_str),
        Some("サンプル")
    );
    assert_eq!(
        song.difficulties().collect::<Vec<_>>(),
        vec![Difficulty::Easy, Difficulty::Oni]
    );

    let oni = song.course(Difficulty::Oni).unwrap();
    assert_eq!(oni.header.level, Some(8));
    assert_eq!(oni.header.balloons, vec![6]);
    assert_eq!(oni.header.score_init, 100);
    assert_eq!(oni.header.score_diff, 20);
    assert_eq!(oni.length(), 11.5);

    let notes: Vec<_> = oni.notes().collect();
    assert_eq!(
        notes,
        vec![
            (0.0, NoteKind::Don),
            (0.5, NoteKind::Don),
            (1.0, NoteKind::Don),
            (1.5, NoteKind::Don),
            (2.0, NoteKind::Ka),
            (2.5, NoteKind::Ka),
            (3.0, NoteKind::Ka),
            (3.5, NoteKind::Ka),
            (4.0, NoteKind::DonBig),
            (5.0, NoteKind::DonBig),
            (9.5, NoteKind::Don),
        ]
    );

    let controls: Vec<_> = oni
        .events
        .iter()
        .filter(|event| !event.kind.is_subdivision())
        .map(|event| (event.time, event.measure, event.kind.clone()))
        .collect();
    assert_eq!(
        controls,
        vec![
            (4.0, 2, EventKind::GogoStart),
            (6.0, 3, EventKind::GogoEnd),
            (
                8.0,
                4,
                EventKind::MeasureChange(MeasureLength::new(3, 4).unwrap())
            ),
            (
                9.5,
                5,
                EventKind::TempoChange(strict_num_extended::PositiveF64::new_const(240.0))
            ),
            (9.5, 5, EventKind::MeasureChange(MeasureLength::COMMON)),
            (11.5, 7, EventKind::End),
        ]
    );

    let easy = song.course(Difficulty::Easy).unwrap();
    assert_eq!(easy.header.level, Some(2));
    assert_eq!(easy.header.score_init, 0);
    assert_eq!(easy.header.bpm.as_f64(), 120.0);
    assert_eq!(easy.length(), 8.0);
    let balloon = easy
        .events
        .iter()
        .find(|event| matches!(event.kind, EventKind::Balloon { .. }))
        .unwrap();
    assert_eq!(balloon.time, 4.0);
    assert_eq!(
        balloon.kind,
        EventKind::Balloon {
            kind: BalloonKind::Small,
            hits: 4
        }
    );
}

#[test]
fn test_sustain_regions_pair() {
    let source = include_str!("files/simple.tja");
    let ParseOutput { song, .. } = parse_tja(source, default_config()).unwrap();
    for course in song.courses.values() {
        let mut open = false;
        for event in &course.events {
            match event.kind {
                EventKind::SustainStart(_) | EventKind::Balloon { .. } => {
                    assert!(!open, "region opened twice at {}", event.time);
                    open = true;
                }
                EventKind::SustainEnd => {
                    assert!(open, "region closed without start at {}", event.time);
                    open = false;
                }
                _ => {}
            }
        }
        assert!(!open);
    }
}

#[test]
fn test_crlf_and_bom() {
    let source = "\u{feff}TITLE:Windows\r\nBPM:60\r\n#START\r\n1,\r\n#END\r\n";
    let ParseOutput { song, warnings } = parse_tja(source, default_config()).unwrap();
    assert_eq!(warnings, vec![]);
    assert_eq!(song.metadata.title.as_deref(), Some("Windows"));
    assert_eq!(song.course(Difficulty::Oni).unwrap().length(), 4.0);
}
