//! Byte offset to display position mapping
//!
//! Paint instructions carry byte ranges. Text surfaces address text in
//! other units: widgets by (line, character), terminals by display cell.
//! A [`TextMap`] converts between them for one immutable text.

use unicode_width::UnicodeWidthChar;

/// A location in the text as a UI sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Zero-based line number
    pub line: usize,
    /// Characters from the start of the line
    pub column: usize,
    /// Terminal cells from the start of the line
    pub display_column: usize,
}

/// Line index over an immutable text
pub struct TextMap<'a> {
    text: &'a str,
    /// Byte offset of each line start
    line_starts: Vec<usize>,
}

impl<'a> TextMap<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { text, line_starts }
    }

    /// Number of lines (a trailing newline starts an empty last line)
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Largest char boundary not after `offset`
    fn floor_boundary(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    /// Character offset of a byte offset
    pub fn char_offset(&self, byte: usize) -> usize {
        self.text[..self.floor_boundary(byte)].chars().count()
    }

    /// Line, column and display column of a byte offset
    pub fn position(&self, byte: usize) -> Position {
        let byte = self.floor_boundary(byte);
        let line = match self.line_starts.binary_search(&byte) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let prefix = &self.text[self.line_starts[line]..byte];
        Position {
            line,
            column: prefix.chars().count(),
            display_column: prefix
                .chars()
                .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(1))
                .sum(),
        }
    }

    /// Text-widget style index (`"line.column"`, lines counted from 1)
    pub fn widget_index(&self, byte: usize) -> String {
        let pos = self.position(byte);
        format!("{}.{}", pos.line + 1, pos.column)
    }

    /// Byte offset of a (line, character column) pair
    pub fn byte_offset(&self, line: usize, column: usize) -> Option<usize> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.text.len(), |next| next - 1);
        let content = &self.text[start..end];
        if column == content.chars().count() {
            return Some(end);
        }
        content.char_indices().nth(column).map(|(i, _)| start + i)
    }
}
