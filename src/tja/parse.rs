//! Parsing [`Song`] from [`TokenStream`].
//!
//! Raw [String] == [lex](super::lex) ==> [`TokenStream`] == [parse](self) ==> [`Song`] (in [`ParseOutput`])
//!
//! The tokens are scanned once from left to right. Outside a course, headers are collected into the song metadata
//! and the header of the next course. `#START` opens a course, whose data lines and commands are stamped onto the
//! timeline until `#END`. A branch block is resolved on the spot by the [`BranchSelector`] in [`ParseConfig`], so
//! the timeline of a course is always linear.

pub mod branch;
mod header;
mod timeline;

use std::{collections::BTreeSet, iter::Peekable, slice::Iter};

use thiserror::Error;

use crate::tja::{
    command::{
        BranchCondition, Difficulty, MeasureLength,
        mixin::{SourceRangeMixin, SourceRangeMixinExt},
    },
    lex::{
        TokenStream,
        token::{Token, TokenWithRange},
    },
    model::{Course, EventKind, Song},
};

use self::{
    branch::{BranchBlock, BranchSelector, HighestBranch, count_balloons, section_marker},
    header::HeaderState,
    timeline::CourseBuilder,
};

/// An error occurred when parsing the [`TokenStream`]. Parsing stops at the first error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum ParseError {
    /// The header key is not known.
    #[error("unknown header: {0}")]
    UnknownHeader(String),
    /// The command is not known.
    #[error("unknown command: #{0}")]
    UnknownCommand(String),
    /// The character in the data line is not a note code.
    #[error("unknown note code: {0:?}")]
    UnknownNoteCode(char),
    /// The value of a header or the arguments of a command could not be read.
    #[error("invalid value for {target}: {value:?}")]
    InvalidValue {
        /// The header or command which has the value.
        target: &'static str,
        /// The value as written.
        value: String,
    },
    /// `#END` appeared outside a course.
    #[error("#END without #START")]
    EndWithoutStart,
    /// `#START` appeared inside a course.
    #[error("#START inside a course, expected #END first")]
    StartInCourse,
    /// A data line or a timeline command appeared outside a course.
    #[error("`{0}` outside a course")]
    OutsideCourse(String),
    /// `#N`, `#E` or `#M` appeared outside a branch block.
    #[error("branch section #{0} outside a branch block")]
    SectionOutsideBranch(String),
    /// A header appeared between `#START` and `#END`.
    #[error("header {0} inside a course")]
    HeaderInCourse(String),
    /// The course ended with note codes not terminated by `,`.
    #[error("measure not terminated by `,`")]
    UnterminatedMeasure,
    /// The source ended inside a course.
    #[error("course not terminated by #END")]
    UnterminatedCourse,
    /// A roll or balloon started while the region is open.
    #[error("region starts while a {0} is open")]
    NestedRegion(&'static str),
    /// A roll or balloon was not closed by `8` before `#END`.
    #[error("{0} is not closed before #END")]
    UnclosedRegion(&'static str),
    /// The balloon list has fewer counts than balloons in the course. It holds the 1-based index of the balloon.
    #[error("no hit count for balloon #{0}")]
    MissingBalloonCount(usize),
}

/// Type alias of `core::result::Result<T, ParseError>`
pub(crate) type Result<T> = core::result::Result<T, ParseError>;

/// A parse error with position information.
pub type ParseErrorWithRange = SourceRangeMixin<ParseError>;

/// A recoverable oddity found when parsing. The parser keeps going after it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ParseWarning {
    /// `8` without an open roll or balloon. It is read as a rest.
    #[error("region end without an open region, read as a rest")]
    OrphanRegionEnd,
    /// The course for the second player of double play was skipped.
    #[error("#START P2 is not supported, the course is skipped")]
    SecondPlayerSkipped,
    /// The difficulty has two courses. The later one replaces the earlier one.
    #[error("duplicate course of {0}, the later one is used")]
    DuplicateCourse(Difficulty),
    /// The difficulty has a single play course and a double play course. The single play one is used.
    #[error("double play course of {0} is dropped for the single play one")]
    DoublePlayDropped(Difficulty),
    /// `#BRANCHSTART` without `#N`, `#E` nor `#M`.
    #[error("branch block without any section")]
    EmptyBranchBlock,
    /// `#BRANCHEND` without an open branch block.
    #[error("#BRANCHEND without #BRANCHSTART")]
    StrayBranchEnd,
}

/// A parse warning with position information.
pub type ParseWarningWithRange = SourceRangeMixin<ParseWarning>;

/// TJA Parse Output
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct ParseOutput {
    /// The output song.
    pub song: Song,
    /// Warnings that occurred during parsing.
    pub warnings: Vec<ParseWarningWithRange>,
}

/// Settings of the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseConfig<S> {
    /// Chooses the branch to splice at each branch block.
    pub selector: S,
}

/// The default configuration, which chooses the highest declared branch.
#[must_use]
pub const fn default_config() -> ParseConfig<HighestBranch> {
    ParseConfig {
        selector: HighestBranch,
    }
}

impl<S> ParseConfig<S> {
    /// Replaces the branch selector.
    #[must_use]
    pub fn selector<S2: BranchSelector>(self, selector: S2) -> ParseConfig<S2> {
        ParseConfig { selector }
    }
}

/// Commands accepted anywhere, which have no effect on the timeline.
const IGNORED_COMMANDS: &[&str] = &[
    "SECTION",
    "LEVELHOLD",
    "LYRIC",
    "SENOTECHANGE",
    "BMSCROLL",
    "HBSCROLL",
    "NMSCROLL",
];

fn is_ignored_command(name: &str) -> bool {
    IGNORED_COMMANDS.contains(&name)
}

fn invalid(target: &'static str, value: &str) -> ParseError {
    ParseError::InvalidValue {
        target,
        value: value.to_owned(),
    }
}

/// Reads a command which changes the timeline, or `None` if the command has no effect.
fn timeline_command(name: &str, args: &str) -> Result<Option<EventKind>> {
    Ok(Some(match name {
        "START" => return Err(ParseError::StartInCourse),
        "BPMCHANGE" => EventKind::TempoChange(header::parse_bpm("BPMCHANGE", args)?),
        "MEASURE" => EventKind::MeasureChange(
            MeasureLength::try_from(args).map_err(|_| invalid("MEASURE", args))?,
        ),
        "SCROLL" => EventKind::ScrollChange(header::parse_scroll("SCROLL", args)?),
        "GOGOSTART" => EventKind::GogoStart,
        "GOGOEND" => EventKind::GogoEnd,
        "BARLINEON" => EventKind::Barline(true),
        "BARLINEOFF" => EventKind::Barline(false),
        "DELAY" => {
            let seconds = header::parse_f64("DELAY", args)?;
            if seconds < 0.0 {
                return Err(invalid("DELAY", args));
            }
            EventKind::Delay(seconds)
        }
        _ if is_ignored_command(name) => return Ok(None),
        _ => return Err(ParseError::UnknownCommand(name.to_owned())),
    }))
}

/// The state of the scan.
enum State {
    /// Between courses.
    Outside,
    /// Between `#START` and `#END`.
    InCourse(CourseBuilder),
    /// In a course which is not parsed, until `#END`.
    Skipping,
}

struct Parser<S> {
    selector: S,
    headers: HeaderState,
    song: Song,
    warnings: Vec<ParseWarningWithRange>,
    /// Whether the course being read is for double play, by `#START P1` or `STYLE:Double`.
    double_play: bool,
    /// Difficulties whose stored course is for double play.
    double_play_courses: BTreeSet<Difficulty>,
}

impl<S: BranchSelector> Parser<S> {
    fn outside(
        &mut self,
        token: &TokenWithRange<'_>,
    ) -> core::result::Result<State, ParseErrorWithRange> {
        let wrap = |err: ParseError| err.into_wrapper(token);
        match token.content() {
            Token::Header { name, value } => {
                self.headers.apply(name, value).map_err(wrap)?;
                Ok(State::Outside)
            }
            Token::Command { name, args } => match name.as_ref() {
                "START" => match args.to_ascii_uppercase().as_str() {
                    player @ ("" | "P1") => {
                        self.double_play = player == "P1" || self.headers.course.style == Some(2);
                        Ok(State::InCourse(CourseBuilder::new(
                            self.headers.difficulty,
                            self.headers.course.clone(),
                        )))
                    }
                    "P2" => {
                        self.warnings
                            .push(ParseWarning::SecondPlayerSkipped.into_wrapper(token));
                        Ok(State::Skipping)
                    }
                    _ => Err(wrap(invalid("START", args))),
                },
                "END" => Err(wrap(ParseError::EndWithoutStart)),
                name if is_ignored_command(name) => Ok(State::Outside),
                _ => Err(wrap(ParseError::OutsideCourse(token.content().to_string()))),
            },
            Token::Notes(_) => Err(wrap(ParseError::OutsideCourse(
                token.content().to_string(),
            ))),
        }
    }

    fn in_course<'t, 'a>(
        &mut self,
        mut builder: CourseBuilder,
        token: &'t TokenWithRange<'a>,
        tokens: &mut Peekable<Iter<'t, TokenWithRange<'a>>>,
    ) -> core::result::Result<State, ParseErrorWithRange> {
        if let Token::Command { name, args } = token.content() {
            match name.as_ref() {
                "END" => {
                    let course = builder.finish()?;
                    self.store_course(course, token);
                    self.headers.reset_course();
                    return Ok(State::Outside);
                }
                "BRANCHSTART" => {
                    self.branch(&mut builder, token, args, tokens)?;
                    return Ok(State::InCourse(builder));
                }
                "BRANCHEND" => {
                    self.warnings
                        .push(ParseWarning::StrayBranchEnd.into_wrapper(token));
                    return Ok(State::InCourse(builder));
                }
                _ if section_marker(token.content()).is_some() => {
                    return Err(
                        ParseError::SectionOutsideBranch(name.to_string()).into_wrapper(token)
                    );
                }
                _ => {}
            }
        }
        self.timeline(&mut builder, token)?;
        Ok(State::InCourse(builder))
    }

    /// Stores the finished course. A single play course wins over a double play course of the same
    /// difficulty, whichever comes first. Otherwise the later course wins.
    fn store_course(&mut self, course: Course, token: &TokenWithRange<'_>) {
        let difficulty = course.difficulty;
        if self.song.courses.contains_key(&difficulty) {
            let stored_double = self.double_play_courses.contains(&difficulty);
            let warning = if self.double_play == stored_double {
                ParseWarning::DuplicateCourse(difficulty)
            } else {
                ParseWarning::DoublePlayDropped(difficulty)
            };
            self.warnings.push(warning.into_wrapper(token));
            if self.double_play && !stored_double {
                return;
            }
        }
        if self.double_play {
            self.double_play_courses.insert(difficulty);
        } else {
            self.double_play_courses.remove(&difficulty);
        }
        self.song.courses.insert(difficulty, course);
    }

    /// Splices the chosen section of the branch block just after `#BRANCHSTART`.
    fn branch<'t, 'a>(
        &mut self,
        builder: &mut CourseBuilder,
        token: &'t TokenWithRange<'a>,
        args: &str,
        tokens: &mut Peekable<Iter<'t, TokenWithRange<'a>>>,
    ) -> core::result::Result<(), ParseErrorWithRange> {
        let condition = BranchCondition::try_from(args)
            .map_err(|_| invalid("BRANCHSTART", args).into_wrapper(token))?;
        let block = BranchBlock::collect(tokens);
        let declared = block.declared();
        let chosen = if declared.is_empty() {
            self.warnings
                .push(ParseWarning::EmptyBranchBlock.into_wrapper(token));
            None
        } else {
            Some(self.selector.select(&declared))
        };
        builder.push_control(
            EventKind::BranchPoint {
                condition,
                declared,
                chosen,
            },
            token,
        );
        for common in &block.common {
            self.timeline(builder, common)?;
        }
        for (kind, section) in &block.sections {
            if chosen == Some(*kind) {
                builder.enter_branch(*kind);
                for token in section {
                    self.timeline(builder, token)?;
                }
                builder.leave_branch();
            } else {
                builder.skip_balloons(*kind, count_balloons(section));
            }
        }
        Ok(())
    }

    /// Applies a data line or a timeline command to the course.
    fn timeline(
        &mut self,
        builder: &mut CourseBuilder,
        token: &TokenWithRange<'_>,
    ) -> core::result::Result<(), ParseErrorWithRange> {
        match token.content() {
            Token::Header { name, .. } => {
                Err(ParseError::HeaderInCourse(name.to_string()).into_wrapper(token))
            }
            Token::Notes(notes) => builder.push_notes(notes, token, &mut self.warnings),
            Token::Command { name, args } => {
                if let Some(kind) =
                    timeline_command(name, args).map_err(|err| err.into_wrapper(token))?
                {
                    builder.push_control(kind, token);
                }
                Ok(())
            }
        }
    }
}

impl Song {
    /// Parses a token stream into [`Song`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] found, with the position of the offending line.
    pub fn from_token_stream<S: BranchSelector>(
        token_stream: &TokenStream<'_>,
        config: ParseConfig<S>,
    ) -> core::result::Result<ParseOutput, ParseErrorWithRange> {
        let mut parser = Parser {
            selector: config.selector,
            headers: HeaderState::default(),
            song: Self::default(),
            warnings: vec![],
            double_play: false,
            double_play_courses: BTreeSet::new(),
        };
        let mut state = State::Outside;
        let mut tokens = token_stream.iter().peekable();
        while let Some(token) = tokens.next() {
            state = match state {
                State::Outside => parser.outside(token)?,
                State::InCourse(builder) => parser.in_course(builder, token, &mut tokens)?,
                State::Skipping if token.content().is_command("END") => {
                    parser.headers.reset_course();
                    State::Outside
                }
                State::Skipping => State::Skipping,
            };
        }
        if let State::InCourse(builder) = &state {
            return Err(match builder.unterminated_code() {
                Some(code) => ParseError::UnterminatedMeasure.into_wrapper(code),
                None => ParseError::UnterminatedCourse.into_wrapper_range(
                    token_stream.eof_line,
                    token_stream.eof_index..token_stream.eof_index,
                ),
            });
        }
        let Parser {
            headers,
            mut song,
            warnings,
            ..
        } = parser;
        song.metadata = headers.metadata;
        Ok(ParseOutput { song, warnings })
    }
}
