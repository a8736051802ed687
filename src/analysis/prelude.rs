//! Prelude module for the analysis.
//!
//! You can use `use tja_rs::analysis::prelude::*;` to import all analysis types at once.

pub use super::{
    AnalysisConfig, AnalysisError, AnalysisOutput, analyse,
    density::{DensityBin, DensityTable, MAX_BINS},
    score::{ScoreBreakdown, ScoreTable, combo_tier},
    stats::{BalloonRecord, RollRecord, Statistics},
};
