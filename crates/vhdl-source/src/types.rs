//! Type definitions for source code representation.
//!
//! This module defines the core types used for representing source code positions, spans,
//! and files throughout the front end. It provides the foundation for accurate source
//! tracking, which is essential for diagnostics and for the parser's location tracker.
//!
//! Key types:
//!
//! - [`Position`]: a line/column/byte-offset position in a file
//! - [`Span`] / [`SourceSpan`]: a byte range, with or without resolved line/column positions
//! - [`Location`]: the merged `{file, first_line, first_col, last_line, last_col, line_text}`
//!   span carried by tokens and tree nodes, with a sentinel "invalid" value
//! - [`SourceFile`] / [`SourceManager`]: file storage with efficient offset-to-position lookup

use std::fmt;
use std::ops::Range;
use std::path::PathBuf;
use std::sync::Arc;

use rustc_hash::FxHashMap;

/// A unique identifier for a source file.
///
/// `FileID` is a newtype wrapper around `usize` that uniquely identifies a source
/// file within a [`SourceManager`]. IDs are assigned by the manager when files are
/// added to it; `0` is reserved for the sentinel/dummy file used by [`Location::INVALID`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileID(usize);

impl FileID {
    /// Creates a new `FileID` with the given value.
    #[must_use]
    pub const fn new(id: usize) -> Self { Self(id) }

    /// Returns the inner value of the `FileID`.
    #[must_use]
    pub const fn value(&self) -> usize { self.0 }
}

impl fmt::Display for FileID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "file:{}", self.0) }
}

/// A position in a source file.
///
/// Positions are 1-indexed for line and column, following common editor conventions.
/// The `offset` is 0-indexed, representing the byte offset from the start of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Byte offset from the start of the file (0-indexed)
    pub offset: usize,
}

impl Position {
    /// Creates a new position with the given line, column, and byte offset.
    #[must_use]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// Creates a new position at the start of a file (line 1, column 1, offset 0).
    #[must_use]
    pub const fn start_of_file() -> Self { Self { line: 1, column: 1, offset: 0 } }

    /// Returns true if this position precedes the other position.
    #[must_use]
    pub const fn precedes(&self, other: &Self) -> bool { self.offset < other.offset }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A simple span that only contains start and end byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start offset
    pub start: usize,
    /// End offset
    pub end: usize,
}

impl Span {
    /// Creates a new simple span with the given start and end offsets.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self { Self { start, end } }

    /// Merges two spans, creating a new span that covers both.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl Default for Span {
    fn default() -> Self { Self::new(0, 0) }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self { Self { start: range.start, end: range.end } }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self { span.start..span.end }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A span in a source file with resolved line/column positions at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    /// Starting position of the span
    pub start: Position,
    /// Ending position of the span (exclusive)
    pub end: Position,
    /// File identifier
    pub file_id: FileID,
}

impl SourceSpan {
    /// Creates a new span with the given start and end positions and file ID.
    #[must_use]
    pub const fn new(start: Position, end: Position, file_id: FileID) -> Self {
        Self { start, end, file_id }
    }

    /// Returns the byte range of this span.
    #[must_use]
    pub const fn byte_range(&self) -> Range<usize> { self.start.offset..self.end.offset }

    /// Creates a new span that encompasses both input spans, taking the earlier start
    /// and the later end. The merged span inherits `self`'s file.
    ///
    /// ## Panics
    ///
    /// Panics if the spans are from different files.
    #[must_use]
    pub fn combine(&self, other: &Self) -> Self {
        assert_eq!(self.file_id, other.file_id, "cannot combine spans from different files");

        let start = if self.start.precedes(&other.start) { self.start } else { other.start };
        let end = if self.end.precedes(&other.end) { other.end } else { self.end };

        Self { start, end, file_id: self.file_id }
    }
}

impl Default for SourceSpan {
    fn default() -> Self {
        Self { start: Position::new(0, 0, 0), end: Position::new(0, 0, 0), file_id: FileID(0) }
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.file_id, self.start, self.end)
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        Self::new(Position::new(1, 1, span.start), Position::new(1, 1, span.end), FileID(0))
    }
}

impl From<SourceSpan> for Span {
    fn from(source_span: SourceSpan) -> Self {
        Self::new(source_span.start.offset, source_span.end.offset)
    }
}

/// The location carried by tokens and tree nodes: `{file, first_line, first_col,
/// last_line, last_col, line_text}`.
///
/// Two locations merge by taking the earlier start and the later end; the merged
/// location inherits the start's file and line text. [`Location::INVALID`] is the
/// sentinel used by the parser's location tracker before a production has consumed
/// its first token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: FileID,
    pub first_line: usize,
    pub first_col: usize,
    pub last_line: usize,
    pub last_col: usize,
    /// The text of the line containing `first_line`, if known.
    pub line_text: Option<Arc<str>>,
}

impl Location {
    /// The sentinel "invalid" location: file 0, all positions 0, no line text.
    pub const INVALID: Self = Self {
        file: FileID(0),
        first_line: 0,
        first_col: 0,
        last_line: 0,
        last_col: 0,
        line_text: None,
    };

    #[must_use]
    pub fn is_invalid(&self) -> bool { *self == Self::INVALID }

    #[must_use]
    pub fn from_span(span: SourceSpan, line_text: Option<Arc<str>>) -> Self {
        Self {
            file: span.file_id,
            first_line: span.start.line,
            first_col: span.start.column,
            last_line: span.end.line,
            last_col: span.end.column,
            line_text,
        }
    }

    /// Merges two locations by taking the earlier start and the later end. The
    /// result inherits `self`'s file and line text, matching the distilled source's
    /// merge rule (`{file, first_line, first_col}` always comes from the earlier span).
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        if self.is_invalid() {
            return other.clone();
        }
        if other.is_invalid() {
            return self.clone();
        }

        let (start, end_line, end_col) = if (self.first_line, self.first_col)
            <= (other.first_line, other.first_col)
        {
            let (el, ec) = (self.last_line, self.last_col).max((other.last_line, other.last_col));
            ((self.first_line, self.first_col, self.line_text.clone()), el, ec)
        } else {
            let (el, ec) = (self.last_line, self.last_col).max((other.last_line, other.last_col));
            ((other.first_line, other.first_col, other.line_text.clone()), el, ec)
        };

        Self {
            file: self.file,
            first_line: start.0,
            first_col: start.1,
            last_line: end_line,
            last_col: end_col,
            line_text: start.2,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.first_line, self.first_col)
    }
}

/// A source file representation: content, name, and precomputed line-start
/// positions for efficient offset-to-position lookup.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub id: FileID,
    pub name: String,
    pub path: Option<PathBuf>,
    pub content: Arc<str>,
    /// Byte offsets of line starts (0-indexed, first entry is always 0)
    pub line_starts: Vec<usize>,
}

impl SourceFile {
    /// Creates a new source file with the given ID, name, and content.
    #[must_use]
    pub fn new(id: FileID, name: String, content: impl Into<Arc<str>>) -> Self {
        let content = content.into();
        let line_starts = compute_line_starts(&content);
        Self { id, name, path: None, content, line_starts }
    }

    /// Creates a new source file with the given ID, name, path, and content.
    #[must_use]
    pub fn with_path(id: FileID, name: String, path: PathBuf, content: impl Into<Arc<str>>) -> Self {
        let content = content.into();
        let line_starts = compute_line_starts(&content);
        Self { id, name, path: Some(path), content, line_starts }
    }

    /// Converts a byte offset to a [`Position`] via binary search on `line_starts`.
    ///
    /// ## Panics
    ///
    /// Panics if the byte offset is greater than the length of the file's content.
    #[must_use]
    pub fn position_from_offset(&self, byte_offset: usize) -> Position {
        assert!(
            byte_offset <= self.content.len(),
            "byte offset {} out of range for file with length {}",
            byte_offset,
            self.content.len()
        );

        match self.line_starts.binary_search(&byte_offset) {
            Ok(line) => Position::new(line + 1, 1, byte_offset),
            Err(line) => {
                let line = line - 1;
                let line_start_offset = self.line_starts[line];
                let column = byte_offset - line_start_offset + 1;
                Position::new(line + 1, column, byte_offset)
            }
        }
    }

    /// Returns the text at the given resolved span.
    ///
    /// ## Panics
    ///
    /// Panics if the span is from a different file.
    #[must_use]
    pub fn text_at_span(&self, span: SourceSpan) -> &str {
        assert_eq!(span.file_id, self.id, "span is from a different file");
        &self.content[span.byte_range()]
    }

    /// Returns the line of text containing the given position.
    ///
    /// ## Panics
    ///
    /// Panics if the position's line is out of range for this file.
    #[must_use]
    pub fn line_at_position(&self, position: Position) -> &str {
        let line_idx = position.line - 1;
        let start_offset = self.line_starts[line_idx];

        let end_offset = if line_idx + 1 < self.line_starts.len() {
            self.line_starts[line_idx + 1] - 1
        } else {
            self.content.len()
        };

        &self.content[start_offset..end_offset]
    }

    #[must_use]
    pub fn line_text_arc(&self, line: usize) -> Option<Arc<str>> {
        if line == 0 || line - 1 >= self.line_starts.len() {
            return None;
        }
        let pos = Position::new(line, 1, self.line_starts[line - 1]);
        Some(Arc::from(self.line_at_position(pos)))
    }
}

fn compute_line_starts(content: &str) -> Vec<usize> {
    let mut line_starts = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            line_starts.push(i + 1);
        }
    }
    line_starts
}

/// Manages all source files for one compiler invocation, assigning unique
/// [`FileID`]s and providing offset-to-position lookups.
#[derive(Debug, Default, Clone)]
pub struct SourceManager {
    files: FxHashMap<FileID, SourceFile>,
    next_id: usize,
}

impl SourceManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: FxHashMap::default(),
            next_id: 1, // 0 is reserved for Location::INVALID
        }
    }

    pub fn add_file(&mut self, name: String, content: impl Into<Arc<str>>) -> FileID {
        let id = FileID::new(self.next_id);
        self.next_id += 1;
        drop(self.files.insert(id, SourceFile::new(id, name, content)));
        id
    }

    pub fn add_file_with_path(
        &mut self,
        name: String,
        path: PathBuf,
        content: impl Into<Arc<str>>,
    ) -> FileID {
        let id = FileID::new(self.next_id);
        self.next_id += 1;
        drop(self.files.insert(id, SourceFile::with_path(id, name, path, content)));
        id
    }

    #[must_use]
    pub fn get_file(&self, id: FileID) -> Option<&SourceFile> { self.files.get(&id) }

    #[must_use]
    pub fn position_from_offset(&self, file_id: FileID, byte_offset: usize) -> Option<Position> {
        self.get_file(file_id).map(|file| file.position_from_offset(byte_offset))
    }

    #[must_use]
    pub fn text_at_span(&self, span: SourceSpan) -> Option<&str> {
        self.get_file(span.file_id).map(|file| file.text_at_span(span))
    }

    #[must_use]
    pub fn line_at_position(&self, file_id: FileID, position: Position) -> Option<&str> {
        self.get_file(file_id).map(|file| file.line_at_position(position))
    }

    /// Builds a [`Location`] for a resolved span, looking up the first line's text.
    #[must_use]
    pub fn location_for(&self, span: SourceSpan) -> Location {
        let line_text = self.get_file(span.file_id).and_then(|f| f.line_text_arc(span.start.line));
        Location::from_span(span, line_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_merge_takes_earlier_start_later_end() {
        let a = Location {
            file: FileID::new(1),
            first_line: 2,
            first_col: 5,
            last_line: 2,
            last_col: 10,
            line_text: Some(Arc::from("signal x : bit;")),
        };
        let b = Location {
            file: FileID::new(1),
            first_line: 1,
            first_col: 1,
            last_line: 3,
            last_col: 1,
            line_text: Some(Arc::from("entity e is")),
        };

        let merged = a.merge(&b);
        assert_eq!(merged.first_line, 1);
        assert_eq!(merged.first_col, 1);
        assert_eq!(merged.last_line, 3);
        assert_eq!(merged.last_col, 1);
        assert_eq!(merged.line_text.as_deref(), Some("entity e is"));
    }

    #[test]
    fn merge_with_invalid_returns_the_other() {
        let valid = Location::from_span(
            SourceSpan::new(Position::new(1, 1, 0), Position::new(1, 5, 4), FileID::new(1)),
            None,
        );
        assert_eq!(Location::INVALID.merge(&valid), valid);
        assert_eq!(valid.merge(&Location::INVALID), valid);
    }

    #[test]
    fn position_from_offset_binary_search() {
        let file = SourceFile::new(FileID::new(1), "x.vhd".into(), "a\nbb\nccc\n");
        assert_eq!(file.position_from_offset(0), Position::new(1, 1, 0));
        assert_eq!(file.position_from_offset(2), Position::new(2, 1, 2));
        assert_eq!(file.position_from_offset(5), Position::new(3, 1, 5));
    }
}
