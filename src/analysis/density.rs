//! Note density over time, in fixed-width time bins.

use strict_num_extended::PositiveF64;

use crate::tja::model::Course;

use super::{AnalysisError, Result};

/// The most bins a table may have.
pub const MAX_BINS: usize = 1 << 20;

/// Notes in a time bin. Big notes count as their base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DensityBin {
    /// Count of dons.
    pub don: usize,
    /// Count of kas.
    pub ka: usize,
}

impl DensityBin {
    /// Count of all notes in the bin.
    #[must_use]
    pub const fn total(self) -> usize {
        self.don + self.ka
    }
}

/// Notes of a course counted per time bin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DensityTable {
    /// Seconds of each bin.
    pub bin_width: PositiveF64,
    /// The bins from the start of the course. There is at least one bin.
    pub bins: Vec<DensityBin>,
    /// The largest [`DensityBin::total`] of the bins.
    pub max: usize,
}

impl DensityTable {
    /// Counts the notes of the course. A note at or after the end of the last bin falls into the last bin.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::TooManyBins`] if the course needs more than [`MAX_BINS`] bins of `bin_width`.
    pub fn from_course(course: &Course, bin_width: PositiveF64) -> Result<Self> {
        let width = bin_width.as_f64();
        let count = (course.length() / width).ceil();
        if !count.is_finite() || count > MAX_BINS as f64 {
            return Err(AnalysisError::TooManyBins { limit: MAX_BINS });
        }
        let count = (count as usize).max(1);
        let mut bins = vec![DensityBin::default(); count];
        for (time, note) in course.notes() {
            let index = ((time / width).floor() as usize).min(count - 1);
            if let Some(bin) = bins.get_mut(index) {
                if note.is_don() {
                    bin.don += 1;
                } else {
                    bin.ka += 1;
                }
            }
        }
        let max = bins.iter().copied().map(DensityBin::total).max().unwrap_or(0);
        Ok(Self {
            bin_width,
            bins,
            max,
        })
    }

    /// Seconds when the bin starts.
    #[must_use]
    pub fn bin_start(&self, index: usize) -> f64 {
        index as f64 * self.bin_width.as_f64()
    }

    /// Iterates bins with their start time.
    pub fn iter(&self) -> impl Iterator<Item = (f64, DensityBin)> + '_ {
        self.bins
            .iter()
            .enumerate()
            .map(|(index, bin)| (self.bin_start(index), *bin))
    }

    /// Count of all notes in the table.
    #[must_use]
    pub fn total(&self) -> usize {
        self.bins.iter().copied().map(DensityBin::total).sum()
    }
}
