//! Definitions of the timed events in a course.

use strict_num_extended::{FinF64, PositiveF64};

use crate::tja::command::{
    BalloonKind, BranchCondition, BranchKind, MeasureLength, NoteKind, RollKind,
};

/// An event placed on the timeline of the course.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    /// Seconds from the start of the course, the first measure starts at `0.0`.
    pub time: f64,
    /// The index of the measure the event is in, starts with 0.
    pub measure: usize,
    /// What happens.
    pub kind: EventKind,
}

/// A kind of the [`Event`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum EventKind {
    /// A note to strike.
    Note(NoteKind),
    /// Opens a drum roll region, which will be closed by [`EventKind::SustainEnd`].
    SustainStart(RollKind),
    /// Closes the roll or balloon region which is open.
    SustainEnd,
    /// Opens a balloon region, which will be closed by [`EventKind::SustainEnd`].
    Balloon {
        /// The size of the balloon.
        kind: BalloonKind,
        /// How many hits pop the balloon.
        hits: u32,
    },
    /// A subdivision without any note.
    Rest,
    /// `#BPMCHANGE`.
    TempoChange(PositiveF64),
    /// `#MEASURE`.
    MeasureChange(MeasureLength),
    /// `#SCROLL`.
    ScrollChange(FinF64),
    /// `#GOGOSTART`.
    GogoStart,
    /// `#GOGOEND`.
    GogoEnd,
    /// `#BARLINEON` (`true`) or `#BARLINEOFF` (`false`).
    Barline(bool),
    /// `#DELAY`, shifts all following events by the seconds.
    Delay(f64),
    /// `#BRANCHSTART`. Only the events of `chosen` branch follow this.
    BranchPoint {
        /// The condition written in the chart.
        condition: BranchCondition,
        /// Branches declared in the block, in ascending order.
        declared: Vec<BranchKind>,
        /// The branch spliced into the timeline, or `None` if no branch was declared.
        chosen: Option<BranchKind>,
    },
    /// `#END`, the end of the last measure.
    End,
}

impl Event {
    /// Returns the strike type if the event is a note.
    #[must_use]
    pub const fn note(&self) -> Option<NoteKind> {
        match self.kind {
            EventKind::Note(kind) => Some(kind),
            _ => None,
        }
    }
}

impl EventKind {
    /// Whether the event occupies a subdivision of the measure, or is a control change.
    #[must_use]
    pub const fn is_subdivision(&self) -> bool {
        matches!(
            self,
            Self::Note(_)
                | Self::SustainStart(_)
                | Self::SustainEnd
                | Self::Balloon { .. }
                | Self::Rest
        )
    }
}
