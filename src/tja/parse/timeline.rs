//! Building the timeline of a course from note codes and commands.
//!
//! Codes and commands are buffered until `,` closes the measure, because the time step of each code depends on
//! how many codes the whole measure has. Then the buffered items are stamped in order, with the tempo and the
//! measure length current at each item. Time only accumulates forward, so a change never moves events already
//! stamped.

use crate::tja::{
    command::{
        BalloonKind, BranchKind, Difficulty, MeasureLength, NoteCode, RollKind,
        mixin::{SourceRangeMixin, SourceRangeMixinExt},
    },
    model::{Course, CourseHeader, Event, EventKind},
};

use super::{ParseError, ParseErrorWithRange, ParseWarning, ParseWarningWithRange};

/// A buffered item of the measure being read.
#[derive(Debug, Clone)]
pub(super) enum MeasureItem {
    Code(NoteCode),
    Control(EventKind),
}

/// Which region is open, to check `8` and to report the start of unclosed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegionKind {
    Roll,
    Balloon,
}

impl RegionKind {
    const fn name(self) -> &'static str {
        match self {
            Self::Roll => "roll",
            Self::Balloon => "balloon",
        }
    }
}

/// A balloon list with the position of the next count to take.
#[derive(Debug, Clone)]
struct BalloonList {
    counts: Vec<u32>,
    next: usize,
}

impl BalloonList {
    const fn new(counts: Vec<u32>) -> Self {
        Self { counts, next: 0 }
    }

    fn take(&mut self) -> Result<u32, ParseError> {
        let nth = self.next;
        self.next += 1;
        self.counts
            .get(nth)
            .copied()
            .ok_or(ParseError::MissingBalloonCount(nth + 1))
    }
}

/// Hands out hit counts of balloons in order of appearance.
#[derive(Debug, Clone)]
struct BalloonCursor {
    shared: BalloonList,
    dedicated: [Option<BalloonList>; 3],
}

impl BalloonCursor {
    fn new(header: &CourseHeader) -> Self {
        Self {
            shared: BalloonList::new(header.balloons.clone()),
            dedicated: header
                .branch_balloons
                .clone()
                .map(|list| list.map(BalloonList::new)),
        }
    }

    /// The list dedicated to the branch if it exists, or the shared one.
    fn list_mut(&mut self, branch: Option<BranchKind>) -> &mut BalloonList {
        let dedicated = match branch {
            Some(branch) => self.dedicated.get_mut(branch.index()),
            None => None,
        };
        match dedicated {
            Some(Some(list)) => list,
            _ => &mut self.shared,
        }
    }

    /// Takes the next count for a balloon in the branch.
    fn next(&mut self, branch: Option<BranchKind>) -> Result<u32, ParseError> {
        self.list_mut(branch).take()
    }

    /// Skips counts for balloons in a branch which is not chosen.
    fn skip(&mut self, branch: BranchKind, count: usize) {
        self.list_mut(Some(branch)).next += count;
    }
}

/// The cursor state of a course under construction.
pub(super) struct CourseBuilder {
    difficulty: Difficulty,
    header: CourseHeader,
    events: Vec<Event>,
    bpm: f64,
    measure: MeasureLength,
    time: f64,
    measure_index: usize,
    open_region: Option<SourceRangeMixin<RegionKind>>,
    balloons: BalloonCursor,
    branch: Option<BranchKind>,
    pending: Vec<SourceRangeMixin<MeasureItem>>,
}

impl CourseBuilder {
    pub(super) fn new(difficulty: Difficulty, header: CourseHeader) -> Self {
        Self {
            difficulty,
            bpm: header.bpm.as_f64(),
            measure: header.measure,
            time: 0.0,
            measure_index: 0,
            open_region: None,
            balloons: BalloonCursor::new(&header),
            branch: None,
            pending: vec![],
            events: vec![],
            header,
        }
    }

    /// Reads a data line. Each `,` closes the measure.
    pub(super) fn push_notes<T>(
        &mut self,
        notes: &str,
        position: &SourceRangeMixin<T>,
        warnings: &mut Vec<ParseWarningWithRange>,
    ) -> Result<(), ParseErrorWithRange> {
        for c in notes.chars().filter(|c| !c.is_whitespace()) {
            if c == ',' {
                self.close_measure(warnings)?;
                continue;
            }
            let code = NoteCode::from_char(c)
                .ok_or_else(|| ParseError::UnknownNoteCode(c).into_wrapper(position))?;
            self.pending.push(MeasureItem::Code(code).into_wrapper(position));
        }
        Ok(())
    }

    /// Buffers a control event at the current position in the measure.
    pub(super) fn push_control<T>(&mut self, kind: EventKind, position: &SourceRangeMixin<T>) {
        self.pending
            .push(MeasureItem::Control(kind).into_wrapper(position));
    }

    /// Marks the following codes as the content of the branch, until [`Self::leave_branch`].
    pub(super) fn enter_branch(&mut self, branch: BranchKind) {
        self.branch = Some(branch);
    }

    pub(super) fn leave_branch(&mut self) {
        self.branch = None;
    }

    /// Consumes balloon counts for balloons in a branch which is not spliced.
    pub(super) fn skip_balloons(&mut self, branch: BranchKind, count: usize) {
        self.balloons.skip(branch, count);
    }

    fn emit(&mut self, kind: EventKind) {
        self.events.push(Event {
            time: self.time,
            measure: self.measure_index,
            kind,
        });
    }

    fn apply_control(&mut self, kind: EventKind) {
        let delay = match &kind {
            EventKind::TempoChange(bpm) => {
                self.bpm = bpm.as_f64();
                None
            }
            EventKind::MeasureChange(measure) => {
                self.measure = *measure;
                None
            }
            EventKind::Delay(seconds) => Some(*seconds),
            _ => None,
        };
        self.emit(kind);
        if let Some(seconds) = delay {
            self.time += seconds;
        }
    }

    fn stamp_code(
        &mut self,
        code: SourceRangeMixin<NoteCode>,
        warnings: &mut Vec<ParseWarningWithRange>,
    ) -> Result<(), ParseErrorWithRange> {
        if let Some(note) = code.content().note_kind() {
            self.emit(EventKind::Note(note));
            return Ok(());
        }
        let kind = match *code.content() {
            NoteCode::Roll | NoteCode::RollBig => {
                self.open_region(RegionKind::Roll, &code)?;
                EventKind::SustainStart(if *code.content() == NoteCode::Roll {
                    RollKind::Roll
                } else {
                    RollKind::RollBig
                })
            }
            NoteCode::Balloon | NoteCode::BalloonBig => {
                self.open_region(RegionKind::Balloon, &code)?;
                let hits = self
                    .balloons
                    .next(self.branch)
                    .map_err(|err| err.into_wrapper(&code))?;
                EventKind::Balloon {
                    kind: if *code.content() == NoteCode::Balloon {
                        BalloonKind::Small
                    } else {
                        BalloonKind::Big
                    },
                    hits,
                }
            }
            NoteCode::RegionEnd => {
                if self.open_region.take().is_some() {
                    EventKind::SustainEnd
                } else {
                    warnings.push(ParseWarning::OrphanRegionEnd.into_wrapper(&code));
                    EventKind::Rest
                }
            }
            _ => EventKind::Rest,
        };
        self.emit(kind);
        Ok(())
    }

    fn open_region(
        &mut self,
        kind: RegionKind,
        position: &SourceRangeMixin<NoteCode>,
    ) -> Result<(), ParseErrorWithRange> {
        if let Some(open) = &self.open_region {
            return Err(ParseError::NestedRegion(open.content().name()).into_wrapper(position));
        }
        self.open_region = Some(kind.into_wrapper(position));
        Ok(())
    }

    /// Stamps the buffered items of the measure and advances the time to the end of it.
    fn close_measure(
        &mut self,
        warnings: &mut Vec<ParseWarningWithRange>,
    ) -> Result<(), ParseErrorWithRange> {
        let items = std::mem::take(&mut self.pending);
        let codes = items
            .iter()
            .filter(|item| matches!(item.content(), MeasureItem::Code(_)))
            .count();
        for item in items {
            let (line, range) = (item.line(), item.range());
            match item.into_content() {
                MeasureItem::Control(kind) => self.apply_control(kind),
                MeasureItem::Code(code) => {
                    self.stamp_code(code.into_wrapper_range(line, range), warnings)?;
                    self.time += self.measure.duration_secs(self.bpm) / codes as f64;
                }
            }
        }
        if codes == 0 {
            self.time += self.measure.duration_secs(self.bpm);
        }
        self.measure_index += 1;
        Ok(())
    }

    /// Finishes the course at `#END`.
    pub(super) fn finish(mut self) -> Result<Course, ParseErrorWithRange> {
        if let Some(code) = self.unterminated_code() {
            return Err(ParseError::UnterminatedMeasure.into_wrapper(code));
        }
        for item in std::mem::take(&mut self.pending) {
            if let MeasureItem::Control(kind) = item.into_content() {
                self.apply_control(kind);
            }
        }
        if let Some(region) = &self.open_region {
            return Err(ParseError::UnclosedRegion(region.content().name()).into_wrapper(region));
        }
        self.emit(EventKind::End);
        Ok(Course {
            difficulty: self.difficulty,
            header: self.header,
            events: self.events,
        })
    }

    /// The first buffered note code of the unterminated measure, if any.
    pub(super) fn unterminated_code(&self) -> Option<&SourceRangeMixin<MeasureItem>> {
        self.pending
            .iter()
            .find(|item| matches!(item.content(), MeasureItem::Code(_)))
    }
}
