//! Rendering parse errors and warnings with `ariadne`.
//!
//! Parse results carry the line and the byte range of the offending TJA line, so a report titles itself with
//! the line number and underlines the range. Everything but [`SimpleSource`] needs the `diagnostics` feature.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "diagnostics")]
//! # {
//! use tja_rs::{
//!     diagnostics::{emit_parse_error, emit_parse_warnings},
//!     tja::{default_config, parse_tja},
//! };
//!
//! let source = "TITLE:Test\n#START\n1800,\n#END\n";
//! match parse_tja(source, default_config()) {
//!     Ok(output) => emit_parse_warnings("test.tja", source, &output.warnings),
//!     Err(err) => emit_parse_error("test.tja", source, &err),
//! }
//! # }
//! ```

#[cfg(feature = "diagnostics")]
use std::{fmt::Display, ops::Range};

#[cfg(feature = "diagnostics")]
use ariadne::{Color, Label, Report, ReportKind, Source};

#[cfg(feature = "diagnostics")]
use crate::tja::{
    command::mixin::SourceRangeMixin,
    parse::{ParseErrorWithRange, ParseWarningWithRange},
};

/// A TJA source text with the file name to show in reports.
///
/// ```rust
/// use tja_rs::diagnostics::SimpleSource;
///
/// let source = SimpleSource::new("song.tja", "TITLE:test\nBPM:120\n");
/// assert_eq!(source.name(), "song.tja");
/// ```
pub struct SimpleSource<'a> {
    name: &'a str,
    text: &'a str,
}

impl<'a> SimpleSource<'a> {
    /// Pairs the file name with its text.
    #[must_use]
    pub const fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// The whole source text.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// The file name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }
}

/// A labelled span of a report, the file name and the byte range in it.
#[cfg(feature = "diagnostics")]
pub type ReportSpan = (String, Range<usize>);

/// Conversion of positioned parse results into `ariadne` reports.
#[cfg(feature = "diagnostics")]
pub trait ToAriadne {
    /// Builds a report pointing at the offending line of `src`.
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, ReportSpan>;
}

/// Builds a report titled with the TJA line number, labelling the byte range with the message.
#[cfg(feature = "diagnostics")]
fn positioned_report<'a, T: Display>(
    src: &SimpleSource<'a>,
    positioned: &SourceRangeMixin<T>,
    kind: ReportKind<'a>,
    what: &str,
    color: Color,
) -> Report<'a, ReportSpan> {
    let span = (src.name().to_owned(), positioned.range());
    Report::build(kind, span.clone())
        .with_message(format!("{what} at line {}", positioned.line()))
        .with_label(
            Label::new(span)
                .with_message(positioned.content().to_string())
                .with_color(color),
        )
        .finish()
}

#[cfg(feature = "diagnostics")]
impl ToAriadne for ParseErrorWithRange {
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, ReportSpan> {
        positioned_report(src, self, ReportKind::Error, "parse error", Color::Red)
    }
}

#[cfg(feature = "diagnostics")]
impl ToAriadne for ParseWarningWithRange {
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, ReportSpan> {
        positioned_report(src, self, ReportKind::Warning, "parse warning", Color::Blue)
    }
}

/// Prints the report of `error` in `source` to stderr, titled with `name`.
#[cfg(feature = "diagnostics")]
pub fn emit_parse_error(name: &str, source: &str, error: &ParseErrorWithRange) {
    let _ = error
        .to_report(&SimpleSource::new(name, source))
        .eprint((name.to_owned(), Source::from(source)));
}

/// Prints the reports of `warnings` in `source` to stderr, in order.
#[cfg(feature = "diagnostics")]
pub fn emit_parse_warnings<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a ParseWarningWithRange>,
) {
    let simple = SimpleSource::new(name, source);
    let cache = Source::from(source);
    for warning in warnings {
        let _ = warning
            .to_report(&simple)
            .eprint((name.to_owned(), cache.clone()));
    }
}

/// Builds the reports of `warnings` without printing them.
#[cfg(feature = "diagnostics")]
#[must_use]
pub fn collect_parse_reports<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a ParseWarningWithRange>,
) -> Vec<Report<'a, ReportSpan>> {
    let simple = SimpleSource::new(name, source);
    warnings
        .into_iter()
        .map(|warning| warning.to_report(&simple))
        .collect()
}
