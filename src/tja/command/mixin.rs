//! Mixin types for structures.
//!
//! - `SourceRangeMixin` is a generic wrapper that attaches position information (line number and index span) to a value.
//! - `SourceRangeMixinExt` is a trait that provides extension methods for `SourceRangeMixin`, providing more convenient methods to create `SourceRangeMixin` instances.

use std::ops::Range;

/// A generic wrapper that attaches position information (line number and index span) to a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRangeMixin<T> {
    /// Wrapped content value
    content: T,
    /// Line number in the source string (1-based)
    line: usize,
    /// Start index in the source string (0-based, inclusive)
    start: usize,
    /// End index in the source string (0-based, exclusive)
    end: usize,
}

impl<T> SourceRangeMixin<T> {
    /// Instances a new `SourceRangeMixin`
    pub const fn new(content: T, line: usize, range: Range<usize>) -> Self {
        Self {
            content,
            line,
            start: range.start,
            end: range.end,
        }
    }

    /// Returns the wrapped content.
    pub const fn content(&self) -> &T {
        &self.content
    }

    /// Leans the content out of the wrapper.
    pub fn into_content(self) -> T {
        self.content
    }

    /// Returns the 1-based line number of the source span.
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the source span as a range of byte indices.
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns the length of the source span.
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the source span's length is 0.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maps the content of the wrapper.
    pub fn map<U, F>(self, f: F) -> SourceRangeMixin<U>
    where
        F: FnOnce(T) -> U,
    {
        SourceRangeMixin {
            content: f(self.content),
            line: self.line,
            start: self.start,
            end: self.end,
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for SourceRangeMixin<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at line {}", self.content, self.line)
    }
}

impl<T: std::error::Error + 'static> std::error::Error for SourceRangeMixin<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.content)
    }
}

/// Extension methods for `SourceRangeMixin`.
pub trait SourceRangeMixinExt {
    /// Instances a new `SourceRangeMixin` with the same position as a wrapper.
    fn into_wrapper<W>(self, wrapper: &SourceRangeMixin<W>) -> SourceRangeMixin<Self>
    where
        Self: Sized,
    {
        SourceRangeMixin::new(self, wrapper.line, wrapper.range())
    }

    /// Instances a new `SourceRangeMixin` with a given line and range.
    fn into_wrapper_range(self, line: usize, range: Range<usize>) -> SourceRangeMixin<Self>
    where
        Self: Sized,
    {
        SourceRangeMixin::new(self, line, range)
    }
}

impl<T> SourceRangeMixinExt for T {}
