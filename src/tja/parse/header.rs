//! Applying `KEY:VALUE` headers to the song metadata and the header of the next course.
//!
//! Song-level headers may appear anywhere outside a course, and course-level headers apply to the next `#START`.
//! An empty value leaves the field unset.

use strict_num_extended::{FinF64, PositiveF64};

use crate::tja::{
    command::Difficulty,
    model::{CourseHeader, DEFAULT_SCROLL, Metadata},
};

use super::{ParseError, Result};

/// Keys which are recognized but have no effect on the timeline, kept verbatim in [`Metadata::others`].
const KEPT_VERBATIM: &[&str] = &[
    "BGIMAGE",
    "BGMOVIE",
    "MOVIEOFFSET",
    "LYRICS",
    "SIDE",
    "LIFE",
    "GAME",
    "PREIMAGE",
    "GAUGEINCR",
    "TOTAL",
    "HIDDENBRANCH",
];

fn is_kept_verbatim(name: &str) -> bool {
    KEPT_VERBATIM.contains(&name)
        || name.starts_with("TITLE")
        || name.starts_with("SUBTITLE")
        || name
            .strip_prefix("EXAM")
            .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Headers read so far.
#[derive(Debug, Clone, Default)]
pub(super) struct HeaderState {
    pub(super) metadata: Metadata,
    pub(super) difficulty: Difficulty,
    pub(super) course: CourseHeader,
}

impl HeaderState {
    /// Applies a header. `name` must be uppercase.
    pub(super) fn apply(&mut self, name: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match name {
            "TITLE" => self.metadata.title = non_empty(value),
            "SUBTITLE" => self.metadata.subtitle = non_empty(value),
            "GENRE" => self.metadata.genre = non_empty(value),
            "MAKER" => self.metadata.maker = non_empty(value),
            "WAVE" => self.metadata.wave = non_empty(value),
            "BPM" => {
                if let Some(bpm) = optional(value, |value| parse_bpm("BPM", value))? {
                    self.metadata.bpm = bpm;
                    self.course.bpm = bpm;
                }
            }
            "OFFSET" => {
                self.metadata.offset =
                    optional(value, |value| parse_f64("OFFSET", value))?.unwrap_or(0.0);
            }
            "DEMOSTART" => {
                self.metadata.demo_start =
                    optional(value, |value| parse_f64("DEMOSTART", value))?.unwrap_or(0.0);
            }
            "SCOREMODE" => {
                self.metadata.score_mode = optional(value, |value| parse_int("SCOREMODE", value))?;
            }
            "SONGVOL" => {
                self.metadata.song_volume = optional(value, |value| parse_int("SONGVOL", value))?;
            }
            "SEVOL" => {
                self.metadata.se_volume = optional(value, |value| parse_int("SEVOL", value))?;
            }
            "COURSE" => {
                self.difficulty = optional(value, |value| {
                    Difficulty::try_from(value).map_err(|_| invalid("COURSE", value))
                })?
                .unwrap_or_default();
            }
            "LEVEL" => self.course.level = optional(value, |value| parse_int("LEVEL", value))?,
            "BALLOON" => self.course.balloons = parse_list("BALLOON", value)?,
            "BALLOONNOR" => {
                self.course.branch_balloons[0] =
                    optional(value, |value| parse_list("BALLOONNOR", value))?;
            }
            "BALLOONEXP" => {
                self.course.branch_balloons[1] =
                    optional(value, |value| parse_list("BALLOONEXP", value))?;
            }
            "BALLOONMAS" => {
                self.course.branch_balloons[2] =
                    optional(value, |value| parse_list("BALLOONMAS", value))?;
            }
            "SCOREINIT" => self.course.score_init = parse_first("SCOREINIT", value)?,
            "SCOREDIFF" => self.course.score_diff = parse_first("SCOREDIFF", value)?,
            "STYLE" => {
                self.course.style =
                    optional(value, |value| match value.to_ascii_lowercase().as_str() {
                        "single" => Ok(1),
                        "double" | "couple" => Ok(2),
                        _ => parse_int("STYLE", value),
                    })?;
            }
            "HEADSCROLL" => {
                self.course.scroll = optional(value, |value| parse_scroll("HEADSCROLL", value))?
                    .unwrap_or(DEFAULT_SCROLL);
            }
            _ if is_kept_verbatim(name) => {
                if value.is_empty() {
                    self.metadata.others.remove(name);
                } else {
                    self.metadata.others.insert(name.to_owned(), value.to_owned());
                }
            }
            _ => return Err(ParseError::UnknownHeader(name.to_owned())),
        }
        Ok(())
    }

    /// Resets the course-level headers after `#END`. The tempo, scroll and style carry over to the next course.
    pub(super) fn reset_course(&mut self) {
        self.difficulty = Difficulty::default();
        self.course = CourseHeader {
            bpm: self.course.bpm,
            scroll: self.course.scroll,
            style: self.course.style,
            ..CourseHeader::default()
        };
    }
}

fn invalid(target: &'static str, value: &str) -> ParseError {
    ParseError::InvalidValue {
        target,
        value: value.to_owned(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

fn optional<T>(value: &str, parse: impl FnOnce(&str) -> Result<T>) -> Result<Option<T>> {
    if value.is_empty() {
        Ok(None)
    } else {
        parse(value).map(Some)
    }
}

pub(super) fn parse_f64(target: &'static str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|num| num.is_finite())
        .ok_or_else(|| invalid(target, value))
}

pub(super) fn parse_bpm(target: &'static str, value: &str) -> Result<PositiveF64> {
    PositiveF64::try_from(parse_f64(target, value)?).map_err(|_| invalid(target, value))
}

pub(super) fn parse_scroll(target: &'static str, value: &str) -> Result<FinF64> {
    FinF64::try_from(parse_f64(target, value)?).map_err(|_| invalid(target, value))
}

fn parse_int<T: std::str::FromStr>(target: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| invalid(target, value))
}

/// Reads `5,10,12`. Empty items, such as one after a trailing comma, are ignored.
fn parse_list(target: &'static str, value: &str) -> Result<Vec<u32>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse_int(target, item))
        .collect()
}

/// Reads the first number of a comma list, or zero if empty.
fn parse_first(target: &'static str, value: &str) -> Result<u32> {
    value
        .split(',')
        .map(str::trim)
        .find(|item| !item.is_empty())
        .map_or(Ok(0), |item| parse_int(target, item))
}
