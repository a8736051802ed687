//! The TJA format parser and chart analyzer.
//!
//! TJA is the chart format of taiko rhythm games. A file has song-level headers and one or more courses, each of
//! which is a chart of a difficulty written in note codes and commands.
//!
//! - [`tja`] parses the source text into a [`Song`](tja::model::Song), whose courses have their events placed
//!   on the timeline in seconds.
//! - [`analysis`] walks a course and derives statistics, such as the max combo, the theoretical max score and
//!   the note density over time.
//! - [`diagnostics`] renders parse errors and warnings with `ariadne`.
//!
//! # Example
//!
//! ```
//! use tja_rs::{
//!     analysis::{AnalysisConfig, analyse},
//!     tja::{command::Difficulty, default_config, parse_tja},
//! };
//!
//! let source = "\
//! TITLE:Example
//! BPM:120
//! COURSE:Oni
//! SCOREINIT:100
//! SCOREDIFF:20
//! #START
//! 1122,
//! 3000,
//! #END
//! ";
//! let output = parse_tja(source, default_config()).unwrap();
//! let analysed = analyse(&output.song, Difficulty::Oni, AnalysisConfig::default()).unwrap();
//! assert_eq!(analysed.statistics.total_combo, 5);
//! assert_eq!(analysed.statistics.length, 4.0);
//! assert_eq!(analysed.density.bins.len(), 4);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod analysis;
pub mod diagnostics;
pub mod tja;
