//! Analysis of a parsed course.
//!
//! [Song](crate::tja::model::Song) == [analyse] ==> [`Statistics`] and [`DensityTable`] (in [`AnalysisOutput`])
//!
//! The analysis reads the events of a course once, and never modifies the course. Each call returns new values,
//! so it can run on independent courses at the same time.

pub mod density;
pub mod prelude;
pub mod score;
pub mod stats;

use strict_num_extended::PositiveF64;
use thiserror::Error;

use crate::tja::{
    command::Difficulty,
    model::{Course, Song},
};

use self::{density::DensityTable, stats::Statistics};

/// An error occurred when analysing a [`Song`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum AnalysisError {
    /// The song has no course of the difficulty.
    #[error("no course of {0} in the song")]
    UnknownCourse(Difficulty),
    /// The bin width is too small for the length of the course.
    #[error("the density table needs more than {limit} bins, use a wider bin")]
    TooManyBins {
        /// The most bins a table may have.
        limit: usize,
    },
}

/// Type alias of `core::result::Result<T, AnalysisError>`
pub type Result<T> = core::result::Result<T, AnalysisError>;

/// Settings of the analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Seconds of each bin of the [`DensityTable`].
    pub bin_width: PositiveF64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            bin_width: PositiveF64::new_const(1.0),
        }
    }
}

impl AnalysisConfig {
    /// Replaces the bin width of the density table.
    #[must_use]
    pub const fn bin_width(mut self, bin_width: PositiveF64) -> Self {
        self.bin_width = bin_width;
        self
    }
}

/// Analysis Output
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct AnalysisOutput {
    /// Counts, durations and the max score.
    pub statistics: Statistics,
    /// The note density over time.
    pub density: DensityTable,
}

impl Course {
    /// Analyses the course.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::TooManyBins`] if the bin width is too small for the course.
    pub fn analyse(&self, config: AnalysisConfig) -> Result<AnalysisOutput> {
        Ok(AnalysisOutput {
            density: DensityTable::from_course(self, config.bin_width)?,
            statistics: Statistics::from_course(self),
        })
    }
}

/// Analyses the course of the difficulty in the song.
///
/// # Errors
///
/// Returns [`AnalysisError::UnknownCourse`] if the song has no course of `difficulty`, or
/// [`AnalysisError::TooManyBins`] if the bin width is too small for the course.
pub fn analyse(
    song: &Song,
    difficulty: Difficulty,
    config: AnalysisConfig,
) -> Result<AnalysisOutput> {
    song.course(difficulty)
        .ok_or(AnalysisError::UnknownCourse(difficulty))?
        .analyse(config)
}
