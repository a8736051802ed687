use strict_num_extended::PositiveF64;

use tja_rs::{analysis::prelude::*, tja::prelude::*};

const CHARTS: &[&str] = &[
    include_str!("../tja/files/simple.tja"),
    include_str!("../tja/files/branched.tja"),
    "BPM:200\nBALLOON:3,4\n#START\n#MEASURE 7/8\n1020304,\n5008,\n60000008,\n,\n7000,8,\n\
     #GOGOSTART\n9008A0B0,\n#GOGOEND\n#END\n",
    "BPM:90\n#START\n12\n#BPMCHANGE 180\n12,\n#DELAY 0.5\n#SCROLL 1.5\n5,\n0,\n8,\n#END\n",
];

fn courses() -> Vec<Course> {
    CHARTS
        .iter()
        .flat_map(|source| {
            parse_tja(source, default_config())
                .unwrap()
                .song
                .courses
                .into_values()
        })
        .collect()
}

#[test]
fn test_combo_conservation() {
    for course in courses() {
        let statistics = course.analyse(AnalysisConfig::default()).unwrap().statistics;
        assert_eq!(
            statistics.total_combo as u64,
            statistics.notes() as u64 + statistics.ticks as u64 + statistics.balloon_hits
        );
    }
}

#[test]
fn test_binning_conservation() {
    for course in courses() {
        for width in [0.1, 0.25, 1.0, 3.0, 1000.0] {
            let config = AnalysisConfig::default().bin_width(PositiveF64::try_from(width).unwrap());
            let AnalysisOutput {
                statistics,
                density,
            } = course.analyse(config).unwrap();
            let don: usize = density.bins.iter().map(|bin| bin.don).sum();
            let ka: usize = density.bins.iter().map(|bin| bin.ka).sum();
            assert_eq!(don, statistics.don_total());
            assert_eq!(ka, statistics.ka_total());
            assert_eq!(
                density.max,
                density.bins.iter().map(|bin| bin.total()).max().unwrap()
            );
            assert!(!density.bins.is_empty());
        }
    }
}

#[test]
fn test_sustain_pairing() {
    for course in courses() {
        let starts = course
            .events
            .iter()
            .filter(|event| matches!(event.kind, EventKind::SustainStart(_)))
            .count();
        let balloons = course
            .events
            .iter()
            .filter(|event| matches!(event.kind, EventKind::Balloon { .. }))
            .count();
        let statistics = course.analyse(AnalysisConfig::default()).unwrap().statistics;
        assert_eq!(statistics.rolls.len(), starts);
        assert_eq!(statistics.balloons.len(), balloons);
        assert!(statistics.rolls.iter().all(|roll| roll.duration > 0.0));
        assert!(statistics.balloons.iter().all(|balloon| balloon.duration > 0.0));
    }
}

#[test]
fn test_scenario() {
    let song = parse_tja("BPM:120\n#START\n1212,\n#END\n", default_config())
        .unwrap()
        .song;
    let AnalysisOutput {
        statistics,
        density,
    } = analyse(&song, Difficulty::Oni, AnalysisConfig::default()).unwrap();
    let course = song.course(Difficulty::Oni).unwrap();
    assert_eq!(
        course.notes().collect::<Vec<_>>(),
        vec![
            (0.0, NoteKind::Don),
            (0.5, NoteKind::Ka),
            (1.0, NoteKind::Don),
            (1.5, NoteKind::Ka),
        ]
    );
    assert_eq!(statistics.total_combo, 4);
    assert_eq!(statistics.length, 2.0);
    assert_eq!(
        density.bins,
        vec![DensityBin { don: 1, ka: 1 }, DensityBin { don: 1, ka: 1 }]
    );
}

#[test]
fn test_milestone_bonus() {
    let body = "1111,\n".repeat(25);
    let source = format!("SCOREINIT:100\nSCOREDIFF:0\n#START\n{body}#END\n");
    let song = parse_tja(&source, default_config()).unwrap().song;
    let statistics = analyse(&song, Difficulty::Oni, AnalysisConfig::default())
        .unwrap()
        .statistics;
    assert_eq!(statistics.total_combo, 100);
    assert_eq!(statistics.max_score, 100 * 100 + 10000);
}

#[test]
fn test_outputs_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Song>();
    assert_send_sync::<ParseOutput>();
    assert_send_sync::<ParseErrorWithRange>();
    assert_send_sync::<AnalysisOutput>();
}
