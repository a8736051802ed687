//! Statistics of a course, collected in a single scan over its events.

use crate::tja::{
    command::{BalloonKind, NoteKind, RollKind},
    model::{Course, EventKind},
};

use super::score::{ScoreBreakdown, ScoreTable};

/// A drum roll in the course.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollRecord {
    /// The size of the roll.
    pub kind: RollKind,
    /// Seconds when the roll starts.
    pub start: f64,
    /// Seconds from the start to the end of the roll.
    pub duration: f64,
}

/// A balloon in the course.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BalloonRecord {
    /// The size of the balloon.
    pub kind: BalloonKind,
    /// Seconds when the balloon appears.
    pub start: f64,
    /// Seconds from the start to the end of the balloon.
    pub duration: f64,
    /// How many hits pop the balloon.
    pub hits: u32,
}

impl BalloonRecord {
    /// Hits per second needed to pop the balloon in time, or `None` if it has no duration.
    #[must_use]
    pub fn hit_rate(&self) -> Option<f64> {
        (self.duration > 0.0).then(|| self.hits as f64 / self.duration)
    }
}

/// Statistics of a course.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statistics {
    /// Count of small dons.
    pub don: usize,
    /// Count of small kas.
    pub ka: usize,
    /// Count of big dons.
    pub don_big: usize,
    /// Count of big kas.
    pub ka_big: usize,
    /// The max combo, notes plus roll ticks plus balloon hits.
    pub total_combo: usize,
    /// Subdivisions of drum rolls, each of which is one hit.
    pub ticks: usize,
    /// Hits of all balloons.
    pub balloon_hits: u64,
    /// The theoretical max score.
    pub max_score: u64,
    /// Seconds from the start to `#END`.
    pub length: f64,
    /// Drum rolls in order of appearance.
    pub rolls: Vec<RollRecord>,
    /// Balloons in order of appearance.
    pub balloons: Vec<BalloonRecord>,
    /// What the max score consists of.
    pub score: ScoreBreakdown,
}

/// The roll or balloon which is open while scanning.
#[derive(Debug, Clone, Copy)]
enum OpenRegion {
    Roll { kind: RollKind, start: f64 },
    Balloon { kind: BalloonKind, start: f64, hits: u32 },
}

impl Statistics {
    /// Scans the events of the course.
    #[must_use]
    pub fn from_course(course: &Course) -> Self {
        let mut stats = Self::default();
        let mut open = None;
        let mut gogo = false;
        let mut note_combo = 0;
        for event in &course.events {
            match event.kind {
                EventKind::Note(note) => {
                    match note {
                        NoteKind::Don => stats.don += 1,
                        NoteKind::Ka => stats.ka += 1,
                        NoteKind::DonBig => stats.don_big += 1,
                        NoteKind::KaBig => stats.ka_big += 1,
                    }
                    note_combo += 1;
                    stats.total_combo += 1;
                    stats.score.add_note(note.is_big(), gogo, note_combo);
                }
                EventKind::SustainStart(kind) => {
                    open = Some(OpenRegion::Roll {
                        kind,
                        start: event.time,
                    });
                    stats.tick();
                }
                EventKind::Rest => {
                    if matches!(open, Some(OpenRegion::Roll { .. })) {
                        stats.tick();
                    }
                }
                EventKind::Balloon { kind, hits } => {
                    open = Some(OpenRegion::Balloon {
                        kind,
                        start: event.time,
                        hits,
                    });
                }
                EventKind::SustainEnd => match open.take() {
                    Some(OpenRegion::Roll { kind, start }) => stats.rolls.push(RollRecord {
                        kind,
                        start,
                        duration: event.time - start,
                    }),
                    Some(OpenRegion::Balloon { kind, start, hits }) => {
                        stats.balloons.push(BalloonRecord {
                            kind,
                            start,
                            duration: event.time - start,
                            hits,
                        });
                        stats.balloon_hits += u64::from(hits);
                        stats.total_combo += hits as usize;
                        stats.score.add_balloon(kind, hits);
                    }
                    // An end without an open region adds nothing.
                    None => {}
                },
                EventKind::GogoStart => gogo = true,
                EventKind::GogoEnd => gogo = false,
                _ => {}
            }
        }
        stats.length = course.length();
        stats.score.combo = stats.total_combo;
        stats.max_score = stats.score.total(ScoreTable::from(&course.header));
        stats
    }

    const fn tick(&mut self) {
        self.ticks += 1;
        self.total_combo += 1;
    }

    /// Count of all notes.
    #[must_use]
    pub const fn notes(&self) -> usize {
        self.don + self.ka + self.don_big + self.ka_big
    }

    /// Count of dons regardless of size.
    #[must_use]
    pub const fn don_total(&self) -> usize {
        self.don + self.don_big
    }

    /// Count of kas regardless of size.
    #[must_use]
    pub const fn ka_total(&self) -> usize {
        self.ka + self.ka_big
    }

    /// The ratio of dons to all notes, or `None` if there is no note.
    #[must_use]
    pub fn don_ratio(&self) -> Option<f64> {
        let notes = self.notes();
        (notes != 0).then(|| self.don_total() as f64 / notes as f64)
    }

    /// The ratio of kas to all notes, or `None` if there is no note.
    #[must_use]
    pub fn ka_ratio(&self) -> Option<f64> {
        let notes = self.notes();
        (notes != 0).then(|| self.ka_total() as f64 / notes as f64)
    }

    /// Average notes per second over the course, or `None` if the course has no length.
    #[must_use]
    pub fn notes_per_second(&self) -> Option<f64> {
        (self.length > 0.0).then(|| self.notes() as f64 / self.length)
    }

    /// Seconds of all drum rolls.
    #[must_use]
    pub fn total_roll_time(&self) -> f64 {
        self.rolls.iter().map(|roll| roll.duration).sum()
    }

    /// Seconds of all balloons.
    #[must_use]
    pub fn total_balloon_time(&self) -> f64 {
        self.balloons.iter().map(|balloon| balloon.duration).sum()
    }
}
