//! Definitions of command argument data.
//!
//! Structures in this module can be used in [Lex](super::lex) part, [Parse](super::parse) part, and the output models.

pub mod mixin;

use num::rational::Ratio;
use strict_num_extended::FinF64;

/// A difficulty of the course, declared by the `COURSE:` header.
///
/// The order follows the in-game order, so `Easy < Normal < Hard < Oni < Edit`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    /// `Easy` or `0`.
    Easy,
    /// `Normal` or `1`.
    Normal,
    /// `Hard` or `2`.
    Hard,
    /// `Oni` or `3`. Courses without `COURSE:` header fall into this.
    #[default]
    Oni,
    /// `Edit`, `Ura` or `4`. The hidden Oni course.
    Edit,
}

impl<'a> TryFrom<&'a str> for Difficulty {
    type Error = &'a str;
    fn try_from(value: &'a str) -> core::result::Result<Self, Self::Error> {
        Ok(match value.trim().to_ascii_lowercase().as_str() {
            "easy" | "0" => Self::Easy,
            "normal" | "1" => Self::Normal,
            "hard" | "2" => Self::Hard,
            "oni" | "3" => Self::Oni,
            "edit" | "ura" | "4" => Self::Edit,
            _ => return Err(value),
        })
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "Easy"),
            Self::Normal => write!(f, "Normal"),
            Self::Hard => write!(f, "Hard"),
            Self::Oni => write!(f, "Oni"),
            Self::Edit => write!(f, "Edit"),
        }
    }
}

/// A single character in a data line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoteCode {
    /// `0`, nothing.
    Rest,
    /// `1`, a small don.
    Don,
    /// `2`, a small ka.
    Ka,
    /// `3`, a big don.
    DonBig,
    /// `4`, a big ka.
    KaBig,
    /// `5`, starts a drum roll.
    Roll,
    /// `6`, starts a big drum roll.
    RollBig,
    /// `7`, starts a balloon.
    Balloon,
    /// `8`, ends the roll or balloon which is open.
    RegionEnd,
    /// `9`, starts a big balloon (kusudama).
    BalloonBig,
    /// `A`, a big don to be hit with both hands.
    DonHand,
    /// `B`, a big ka to be hit with both hands.
    KaHand,
}

impl NoteCode {
    /// Reads a note code from its character, or `None` if it is not a note code.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '0' => Self::Rest,
            '1' => Self::Don,
            '2' => Self::Ka,
            '3' => Self::DonBig,
            '4' => Self::KaBig,
            '5' => Self::Roll,
            '6' => Self::RollBig,
            '7' => Self::Balloon,
            '8' => Self::RegionEnd,
            '9' => Self::BalloonBig,
            'A' => Self::DonHand,
            'B' => Self::KaHand,
            _ => return None,
        })
    }

    /// Returns the strike type if the code is a plain note.
    #[must_use]
    pub const fn note_kind(self) -> Option<NoteKind> {
        match self {
            Self::Don => Some(NoteKind::Don),
            Self::Ka => Some(NoteKind::Ka),
            Self::DonBig | Self::DonHand => Some(NoteKind::DonBig),
            Self::KaBig | Self::KaHand => Some(NoteKind::KaBig),
            _ => None,
        }
    }
}

/// A strike type of the note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoteKind {
    /// A small don (red, center hit).
    Don,
    /// A small ka (blue, rim hit).
    Ka,
    /// A big don.
    DonBig,
    /// A big ka.
    KaBig,
}

impl NoteKind {
    /// Whether the note is a big one.
    #[must_use]
    pub const fn is_big(self) -> bool {
        matches!(self, Self::DonBig | Self::KaBig)
    }

    /// Whether the note is hit on the center of the drum, regardless of its size.
    #[must_use]
    pub const fn is_don(self) -> bool {
        matches!(self, Self::Don | Self::DonBig)
    }
}

/// A size of the drum roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RollKind {
    /// `5`.
    Roll,
    /// `6`.
    RollBig,
}

/// A size of the balloon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BalloonKind {
    /// `7`, a normal balloon.
    Small,
    /// `9`, a kusudama.
    Big,
}

/// A named alternative of the branch.
///
/// Ordered by its difficulty, so `Normal < Expert < Master`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BranchKind {
    /// `#N`, the normal branch.
    Normal,
    /// `#E`, the expert (advanced) branch.
    Expert,
    /// `#M`, the master branch.
    Master,
}

impl BranchKind {
    /// Index of the branch, `0` for normal to `2` for master.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Normal => 0,
            Self::Expert => 1,
            Self::Master => 2,
        }
    }
}

impl std::fmt::Display for BranchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Expert => write!(f, "expert"),
            Self::Master => write!(f, "master"),
        }
    }
}

/// What the game measures to decide the branch at `#BRANCHSTART`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BranchConditionKind {
    /// `p`, the accuracy percentage since the last `#SECTION`.
    Accuracy,
    /// `r`, the count of roll hits.
    Roll,
    /// `s`, the score.
    Score,
}

/// The condition of `#BRANCHSTART [type],[expert],[master]`.
///
/// It is kept for the renderer only, the branch is chosen statically when parsing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BranchCondition {
    /// What is measured.
    pub kind: BranchConditionKind,
    /// The threshold to enter the expert branch.
    pub expert: FinF64,
    /// The threshold to enter the master branch.
    pub master: FinF64,
}

impl<'a> TryFrom<&'a str> for BranchCondition {
    type Error = &'a str;
    fn try_from(value: &'a str) -> core::result::Result<Self, Self::Error> {
        let mut parts = value.split(',').map(str::trim);
        let kind = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            Some("p") => BranchConditionKind::Accuracy,
            Some("r") => BranchConditionKind::Roll,
            Some("s") => BranchConditionKind::Score,
            _ => return Err(value),
        };
        let mut threshold = || {
            parts
                .next()
                .and_then(|part| part.parse::<f64>().ok())
                .and_then(|num| FinF64::try_from(num).ok())
                .ok_or(value)
        };
        let expert = threshold()?;
        let master = threshold()?;
        Ok(Self {
            kind,
            expert,
            master,
        })
    }
}

/// A length of the measure, in a fraction of the 4/4 measure. `#MEASURE 3/4` makes a measure of three quarter notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasureLength(Ratio<u32>);

impl MeasureLength {
    /// The common time, 4/4.
    pub const COMMON: Self = Self(Ratio::new_raw(4, 4));

    /// Creates a new measure length of `numerator/denominator`, or `None` if either is zero.
    #[must_use]
    pub fn new(numerator: u32, denominator: u32) -> Option<Self> {
        (numerator != 0 && denominator != 0).then(|| Self(Ratio::new_raw(numerator, denominator)))
    }

    /// The numerator as written.
    #[must_use]
    pub fn numerator(self) -> u32 {
        *self.0.numer()
    }

    /// The denominator as written.
    #[must_use]
    pub fn denominator(self) -> u32 {
        *self.0.denom()
    }

    /// The ratio to the 4/4 measure.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.numerator() as f64 / self.denominator() as f64
    }

    /// Duration in seconds of the measure on the BPM.
    ///
    /// A 4/4 measure is four beats, so it lasts `240 / bpm` seconds.
    #[must_use]
    pub fn duration_secs(self, bpm: f64) -> f64 {
        240.0 / bpm * self.as_f64()
    }
}

impl Default for MeasureLength {
    fn default() -> Self {
        Self::COMMON
    }
}

impl<'a> TryFrom<&'a str> for MeasureLength {
    type Error = &'a str;
    fn try_from(value: &'a str) -> core::result::Result<Self, Self::Error> {
        let (numerator, denominator) = value.split_once('/').ok_or(value)?;
        let numerator = numerator.trim().parse().map_err(|_| value)?;
        let denominator = denominator.trim().parse().map_err(|_| value)?;
        Self::new(numerator, denominator).ok_or(value)
    }
}

impl std::fmt::Display for MeasureLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator(), self.denominator())
    }
}
