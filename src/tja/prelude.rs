//! Prelude module for the TJA parser.
//!
//! This module re-exports all public types from the TJA module for convenient access.
//! You can use `use tja_rs::tja::prelude::*;` to import all TJA types at once.

#[cfg(feature = "diagnostics")]
pub use crate::diagnostics::{SimpleSource, ToAriadne, emit_parse_error, emit_parse_warnings};

pub use super::{
    command::{
        BalloonKind, BranchCondition, BranchConditionKind, BranchKind, Difficulty, MeasureLength,
        NoteCode, NoteKind, RollKind,
        mixin::{SourceRangeMixin, SourceRangeMixinExt},
    },
    default_config,
    lex::{
        TokenStream,
        token::{Token, TokenWithRange},
    },
    model::{Course, CourseHeader, DEFAULT_BPM, Event, EventKind, Metadata, Song},
    parse::{
        ParseConfig, ParseError, ParseErrorWithRange, ParseOutput, ParseWarning,
        ParseWarningWithRange,
        branch::{BranchSelector, HighestBranch, PreferBranch},
    },
    parse_tja,
};
