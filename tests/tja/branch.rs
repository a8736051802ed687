use pretty_assertions::assert_eq;

use tja_rs::tja::prelude::*;

const SOURCE: &str = include_str!("files/branched.tja");

fn oni<S: BranchSelector>(config: ParseConfig<S>) -> Course {
    let ParseOutput { mut song, warnings } = parse_tja(SOURCE, config).unwrap();
    assert_eq!(warnings, vec![]);
    song.courses.remove(&Difficulty::Oni).unwrap()
}

fn branch_points(course: &Course) -> Vec<(Vec<BranchKind>, Option<BranchKind>)> {
    course
        .events
        .iter()
        .filter_map(|event| match &event.kind {
            EventKind::BranchPoint {
                declared, chosen, ..
            } => Some((declared.clone(), *chosen)),
            _ => None,
        })
        .collect()
}

fn balloon_hits(course: &Course) -> Vec<u32> {
    course
        .events
        .iter()
        .filter_map(|event| match event.kind {
            EventKind::Balloon { hits, .. } => Some(hits),
            _ => None,
        })
        .collect()
}

fn note_kinds(course: &Course) -> Vec<NoteKind> {
    course.notes().map(|(_, note)| note).collect()
}

#[test]
fn test_highest_branch_is_deterministic() {
    let first = oni(default_config());
    let second = oni(default_config());
    assert_eq!(first, second);

    use BranchKind::*;
    assert_eq!(
        branch_points(&first),
        vec![
            (vec![Normal, Expert, Master], Some(Master)),
            (vec![Normal, Master], Some(Master)),
        ]
    );
    assert_eq!(balloon_hits(&first), vec![20]);
    assert_eq!(
        note_kinds(&first),
        [
            vec![NoteKind::Don; 4],
            vec![NoteKind::DonBig; 4],
            vec![NoteKind::KaBig],
            vec![NoteKind::Ka; 4],
        ]
        .concat()
    );
    assert!((first.length() - 8.0).abs() < 1e-9);
}

#[test]
fn test_branch_condition_is_kept() {
    let course = oni(default_config());
    let conditions: Vec<_> = course
        .events
        .iter()
        .filter_map(|event| match &event.kind {
            EventKind::BranchPoint { condition, .. } => Some(*condition),
            _ => None,
        })
        .collect();
    assert_eq!(conditions[0].kind, BranchConditionKind::Accuracy);
    assert_eq!(conditions[0].expert.as_f64(), 80.0);
    assert_eq!(conditions[0].master.as_f64(), 95.0);
    assert_eq!(conditions[1].kind, BranchConditionKind::Roll);
}

#[test]
fn test_prefer_normal() {
    let course = oni(default_config().selector(PreferBranch(BranchKind::Normal)));
    assert_eq!(balloon_hits(&course), vec![5]);
    assert_eq!(
        note_kinds(&course),
        [vec![NoteKind::Don; 7], vec![NoteKind::Ka; 4]].concat()
    );
}

#[test]
fn test_prefer_expert_skips_balloons_of_normal() {
    let course = oni(default_config().selector(PreferBranch(BranchKind::Expert)));
    // The second block has no expert section, so it falls back to master.
    assert_eq!(
        branch_points(&course)
            .into_iter()
            .map(|(_, chosen)| chosen)
            .collect::<Vec<_>>(),
        vec![Some(BranchKind::Expert), Some(BranchKind::Master)]
    );
    assert_eq!(balloon_hits(&course), vec![7]);
}

#[test]
fn test_custom_selector() {
    struct Lowest;
    impl BranchSelector for Lowest {
        fn select(&self, declared: &[BranchKind]) -> BranchKind {
            declared[0]
        }
    }
    let lowest = oni(default_config().selector(Lowest));
    let normal = oni(default_config().selector(PreferBranch(BranchKind::Normal)));
    assert_eq!(lowest, normal);
}

#[test]
fn test_sections_of_same_branch_are_merged() {
    let source = "#START\n#BRANCHSTART p,0,0\n#N\n1,\n#M\n3,\n#N\n2,\n#BRANCHEND\n#END\n";
    let ParseOutput { song, .. } = parse_tja(
        source,
        default_config().selector(PreferBranch(BranchKind::Normal)),
    )
    .unwrap();
    let course = song.course(Difficulty::Oni).unwrap();
    assert_eq!(note_kinds(course), vec![NoteKind::Don, NoteKind::Ka]);
}
