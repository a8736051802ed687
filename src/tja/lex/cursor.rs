use std::ops::Range;

/// A line in the source, with the comment and surrounding whitespaces stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// The line number, starts with 1.
    pub line: usize,
    /// The byte range of `text` in the source.
    pub range: Range<usize>,
    /// The stripped content, never empty.
    pub text: &'a str,
}

/// Line-oriented cursor over the TJA source text.
pub struct Cursor<'a> {
    /// The line position of the next line to read, starts with 1.
    line: usize,
    /// The index position.
    index: usize,
    /// The source str.
    source: &'a str,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        let index = if source.starts_with('\u{feff}') {
            '\u{feff}'.len_utf8()
        } else {
            0
        };
        Self {
            line: 1,
            index,
            source,
        }
    }

    pub fn is_end(&self) -> bool {
        self.index >= self.source.len()
    }

    /// Returns the line number of the next line to read.
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Moves the cursor over one raw line and returns its range, excluding the line feed and a preceding `\r`.
    fn next_raw_line(&mut self) -> Option<Range<usize>> {
        if self.is_end() {
            return None;
        }
        let start = self.index;
        let remaining = &self.source[start..];
        let (end, next) = match remaining.find('\n') {
            Some(lf) => (start + lf, start + lf + 1),
            None => (self.source.len(), self.source.len()),
        };
        let end = if self.source[start..end].ends_with('\r') {
            end - 1
        } else {
            end
        };
        self.index = next;
        self.line += 1;
        Some(start..end)
    }

    /// Moves the cursor, through empty and comment-only lines, and returns the next meaningful line.
    pub fn next_line(&mut self) -> Option<SourceLine<'a>> {
        loop {
            let line = self.line;
            let raw = self.next_raw_line()?;
            let content = &self.source[raw.clone()];
            let content = content
                .find("//")
                .map_or(content, |comment| &content[..comment]);
            let trimmed = content.trim_start();
            let start = raw.start + (content.len() - trimmed.len());
            let text = trimmed.trim_end();
            if text.is_empty() {
                continue;
            }
            return Some(SourceLine {
                line,
                range: start..start + text.len(),
                text,
            });
        }
    }
}
