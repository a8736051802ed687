//! The theoretical max score of a course.
//!
//! A note is worth `SCOREINIT + SCOREDIFF × multiplier`, truncated to a multiple of 10, where the multiplier
//! grows with the combo. In gogo time the value is scaled by 1.2 and truncated again. Every truncation happens
//! per note value before summing, because the order changes the result.

use itertools::izip;

use crate::tja::{command::BalloonKind, model::CourseHeader};

/// Multipliers of `SCOREDIFF` for each combo tier.
pub const MULTIPLIERS: [u32; 5] = [0, 1, 2, 4, 8];

/// Points per balloon hit, indexed by [`balloon_index`].
pub const BALLOON_HIT_POINTS: [u64; 2] = [300, 360];

/// Points for popping a balloon, indexed by [`balloon_index`].
pub const BALLOON_POP_POINTS: [u64; 2] = [5000, 6000];

/// Points for each complete 100 combo.
pub const MILESTONE_POINTS: u64 = 10000;

/// Index of the balloon kind into the balloon tables.
#[must_use]
pub const fn balloon_index(kind: BalloonKind) -> usize {
    match kind {
        BalloonKind::Small => 0,
        BalloonKind::Big => 1,
    }
}

/// The combo tier of the note, by the note combo including the note itself.
#[must_use]
pub const fn combo_tier(combo: usize) -> usize {
    match combo {
        0..10 => 0,
        10..30 => 1,
        30..50 => 2,
        50..100 => 3,
        _ => 4,
    }
}

/// The per-note values of a course, from `SCOREINIT:` and `SCOREDIFF:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreTable {
    /// The base value of a note.
    pub init: u32,
    /// The value added per multiplier.
    pub diff: u32,
}

impl ScoreTable {
    /// Creates a new table.
    #[must_use]
    pub const fn new(init: u32, diff: u32) -> Self {
        Self { init, diff }
    }

    /// The value of a small note on the tier, truncated to a multiple of 10.
    #[must_use]
    pub fn note_value(self, tier: usize, gogo: bool) -> u64 {
        let multiplier = MULTIPLIERS.get(tier).copied().unwrap_or(MULTIPLIERS[4]);
        let value = (u64::from(self.init) + u64::from(self.diff) * u64::from(multiplier)) / 10 * 10;
        if gogo {
            // value × 1.2, truncated to a multiple of 10
            value * 12 / 100 * 10
        } else {
            value
        }
    }
}

impl From<&CourseHeader> for ScoreTable {
    fn from(header: &CourseHeader) -> Self {
        Self::new(header.score_init, header.score_diff)
    }
}

/// What the score of a course consists of, collected while scanning it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreBreakdown {
    /// Note units by gogo state (`0` normal, `1` gogo) and combo tier. A big note is two units.
    pub note_units: [[u64; 5]; 2],
    /// Balloon hits by [`balloon_index`].
    pub balloon_hits: [u64; 2],
    /// Popped balloons by [`balloon_index`].
    pub balloon_pops: [u64; 2],
    /// The total combo, for milestone bonuses.
    pub combo: usize,
}

impl ScoreBreakdown {
    /// Counts a note at the note combo including it.
    pub fn add_note(&mut self, big: bool, gogo: bool, note_combo: usize) {
        let units = if big { 2 } else { 1 };
        if let Some(slot) = self
            .note_units
            .get_mut(usize::from(gogo))
            .and_then(|tiers| tiers.get_mut(combo_tier(note_combo)))
        {
            *slot += units;
        }
    }

    /// Counts a popped balloon.
    pub fn add_balloon(&mut self, kind: BalloonKind, hits: u32) {
        let index = balloon_index(kind);
        if let Some(sum) = self.balloon_hits.get_mut(index) {
            *sum += u64::from(hits);
        }
        if let Some(pops) = self.balloon_pops.get_mut(index) {
            *pops += 1;
        }
    }

    /// Points of the notes.
    #[must_use]
    pub fn note_points(&self, table: ScoreTable) -> u64 {
        self.note_units
            .iter()
            .zip([false, true])
            .flat_map(|(tiers, gogo)| {
                tiers
                    .iter()
                    .enumerate()
                    .map(move |(tier, units)| units * table.note_value(tier, gogo))
            })
            .sum()
    }

    /// Points of the balloon hits and pops.
    #[must_use]
    pub fn balloon_points(&self) -> u64 {
        izip!(
            &self.balloon_hits,
            &self.balloon_pops,
            &BALLOON_HIT_POINTS,
            &BALLOON_POP_POINTS
        )
        .map(|(hits, pops, hit_points, pop_points)| hits * hit_points + pops * pop_points)
        .sum()
    }

    /// Points of the combo milestones.
    #[must_use]
    pub const fn milestone_points(&self) -> u64 {
        (self.combo / 100) as u64 * MILESTONE_POINTS
    }

    /// The theoretical max score.
    #[must_use]
    pub fn total(&self, table: ScoreTable) -> u64 {
        self.note_points(table) + self.balloon_points() + self.milestone_points()
    }
}
