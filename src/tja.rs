//! The parser module of TJA (.tja) file, the chart format of taiko rhythm games.
//!
//! This module consists of two phases: lexical analyzing and token parsing.
//!
//! `lex` module provides definitions of TJA tokens and a translator from string into them. Every meaningful line
//! becomes one token, a header (`KEY:VALUE`), a command (`#NAME args`) or a data line of note codes.
//!
//! `parse` module folds the tokens into a [`Song`](model::Song), whose courses hold the events on the timeline in
//! seconds.
//!
//! In detail, our policies are:
//!
//! - Support only decoded text (as required `&str` to input). Decoding Shift_JIS is up to the caller.
//! - Do not support editing TJA source text.
//! - Resolve branches statically when parsing, by a [`BranchSelector`](parse::branch::BranchSelector).
//! - Fail on the first error, but report recoverable oddities as warnings.

pub mod command;
pub mod lex;
pub mod model;
pub mod parse;
pub mod prelude;

use self::{
    lex::TokenStream,
    model::Song,
    parse::{ParseConfig, ParseErrorWithRange, ParseOutput, branch::BranchSelector},
};

pub use self::parse::default_config;

/// Parses TJA source text into a [`Song`].
///
/// # Errors
///
/// Returns the first error found, with the line and byte range of it in `source`.
///
/// # Example
///
/// ```
/// use tja_rs::tja::{command::Difficulty, default_config, parse_tja};
///
/// let source = "TITLE:Example\nBPM:120\n#START\n1212,\n#END\n";
/// let output = parse_tja(source, default_config()).unwrap();
/// let course = output.song.course(Difficulty::Oni).unwrap();
/// assert_eq!(course.notes().count(), 4);
/// assert_eq!(course.length(), 2.0);
/// ```
pub fn parse_tja<S: BranchSelector>(
    source: &str,
    config: ParseConfig<S>,
) -> Result<ParseOutput, ParseErrorWithRange> {
    let token_stream = TokenStream::parse_lex(source);
    Song::from_token_stream(&token_stream, config)
}
