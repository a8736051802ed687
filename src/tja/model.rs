//! The output models of the TJA parser.
//!
//! A [`Song`] owns its [`Course`]s, and a [`Course`] owns its [`Event`]s in time order. They are built once by
//! the parser and never mutated after that, so readers can hold them without any synchronization.

pub mod event;

use std::collections::BTreeMap;

use strict_num_extended::{FinF64, PositiveF64};

use crate::tja::command::{BranchKind, Difficulty, MeasureLength};

pub use self::event::{Event, EventKind};

/// The tempo used when no `BPM:` header is given.
pub const DEFAULT_BPM: PositiveF64 = PositiveF64::new_const(120.0);

/// The scroll speed used when no `HEADSCROLL:` header is given.
pub const DEFAULT_SCROLL: FinF64 = FinF64::new_const(1.0);

/// A parsed TJA file, the song metadata and all courses of it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Song {
    /// The song-level headers.
    pub metadata: Metadata,
    /// The courses keyed by their difficulty.
    pub courses: BTreeMap<Difficulty, Course>,
}

impl Song {
    /// Gets the course of the difficulty.
    #[must_use]
    pub fn course(&self, difficulty: Difficulty) -> Option<&Course> {
        self.courses.get(&difficulty)
    }

    /// Iterates difficulties which have a course, in ascending order.
    pub fn difficulties(&self) -> impl Iterator<Item = Difficulty> + '_ {
        self.courses.keys().copied()
    }
}

/// The song-level headers, which appear before the courses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// `TITLE:`
    pub title: Option<String>,
    /// `SUBTITLE:`. The leading `--` or `++` is kept as written.
    pub subtitle: Option<String>,
    /// `GENRE:`
    pub genre: Option<String>,
    /// `MAKER:`
    pub maker: Option<String>,
    /// `WAVE:`, the path to the music file.
    pub wave: Option<String>,
    /// `BPM:`, the tempo at the start of courses.
    pub bpm: PositiveF64,
    /// `OFFSET:`, seconds of the music at the first measure, usually negative.
    pub offset: f64,
    /// `DEMOSTART:`, seconds of the music to start the preview from.
    pub demo_start: f64,
    /// `SCOREMODE:`
    pub score_mode: Option<u8>,
    /// `SONGVOL:`
    pub song_volume: Option<u32>,
    /// `SEVOL:`
    pub se_volume: Option<u32>,
    /// Other recognized headers, such as `BGMOVIE:` or `TITLEJA:`, as written.
    pub others: BTreeMap<String, String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: None,
            subtitle: None,
            genre: None,
            maker: None,
            wave: None,
            bpm: DEFAULT_BPM,
            offset: 0.0,
            demo_start: 0.0,
            score_mode: None,
            song_volume: None,
            se_volume: None,
            others: BTreeMap::new(),
        }
    }
}

/// A chart of one difficulty.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Course {
    /// The difficulty of the course.
    pub difficulty: Difficulty,
    /// The headers effective for this course.
    pub header: CourseHeader,
    /// The events in time order.
    pub events: Vec<Event>,
}

impl Course {
    /// Seconds from the start to the last event, which is `#END`.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.events.last().map_or(0.0, |event| event.time)
    }

    /// Iterates all notes with their time.
    pub fn notes(&self) -> impl Iterator<Item = (f64, crate::tja::command::NoteKind)> + '_ {
        self.events
            .iter()
            .filter_map(|event| event.note().map(|note| (event.time, note)))
    }
}

/// The headers effective for a course, collected from the song-level and course-level headers before `#START`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CourseHeader {
    /// `LEVEL:`, the star rating.
    pub level: Option<u32>,
    /// The tempo at the first measure.
    pub bpm: PositiveF64,
    /// The measure length at the first measure, always 4/4.
    pub measure: MeasureLength,
    /// `HEADSCROLL:`, the scroll speed at the first measure.
    pub scroll: FinF64,
    /// `SCOREINIT:`, the base score of a note.
    pub score_init: u32,
    /// `SCOREDIFF:`, the score added to a note per combo tier.
    pub score_diff: u32,
    /// `BALLOON:`, the hits required for balloons in order of appearance.
    pub balloons: Vec<u32>,
    /// `BALLOONNOR:`, `BALLOONEXP:` and `BALLOONMAS:`, indexed by [`BranchKind::index`].
    pub branch_balloons: [Option<Vec<u32>>; 3],
    /// `STYLE:`, `1` for single play and `2` for double play.
    pub style: Option<u8>,
}

impl CourseHeader {
    /// The balloon list dedicated to the branch, if declared.
    #[must_use]
    pub fn branch_balloons(&self, branch: BranchKind) -> Option<&[u32]> {
        self.branch_balloons
            .get(branch.index())
            .and_then(Option::as_deref)
    }
}

impl Default for CourseHeader {
    fn default() -> Self {
        Self {
            level: None,
            bpm: DEFAULT_BPM,
            measure: MeasureLength::COMMON,
            scroll: DEFAULT_SCROLL,
            score_init: 0,
            score_diff: 0,
            balloons: vec![],
            branch_balloons: [None, None, None],
            style: None,
        }
    }
}
