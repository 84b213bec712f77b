//! Line-vector text storage with edit deltas for cache invalidation.

use crate::coords::DocPosition;
use crate::source::LineSource;
use crate::wrap::{char_len, char_to_byte};
use std::borrow::Cow;

/// What an edit did to the line sequence, in terms the wrap cache understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineEdit {
    /// One line's text changed; the line count did not.
    Changed { line: usize },
    /// Lines were inserted or removed at or after `from`, shifting every later
    /// index.
    Shifted { from: usize },
}

impl LineEdit {
    /// First line index whose cached wrap may be stale.
    pub fn first_line(&self) -> usize {
        match *self {
            Self::Changed { line } => line,
            Self::Shifted { from } => from,
        }
    }
}

/// Mutable document as an ordered list of lines (without line endings).
///
/// Always holds at least one line. Every successful mutation bumps the
/// revision and returns the [`LineEdit`] the caller must hand to the cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
    revision: u64,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            revision: 0,
        }
    }
}

impl LineBuffer {
    /// Create a buffer from text, splitting on `\n` and dropping a trailing `\r`.
    pub fn new(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self::from_lines(lines)
    }

    /// Create a buffer from already split lines.
    pub fn from_lines(mut lines: Vec<String>) -> Self {
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self { lines, revision: 0 }
    }

    /// Borrow all lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines (never zero).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Character length of a line; zero when out of range.
    pub fn line_len_chars(&self, line: usize) -> usize {
        self.lines.get(line).map(|text| char_len(text)).unwrap_or(0)
    }

    /// Revision counter, bumped by every applied edit.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Clamp a position onto an existing line and column.
    pub fn clamp(&self, pos: DocPosition) -> DocPosition {
        let line = pos.line.min(self.lines.len() - 1);
        DocPosition {
            line,
            column: pos.column.min(self.line_len_chars(line)),
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Insert text at a char position. Newlines in `text` split the line.
    pub fn insert_text(&mut self, pos: DocPosition, text: &str) -> Option<LineEdit> {
        if text.is_empty() {
            return None;
        }
        let pos = self.clamp(pos);
        let line = &mut self.lines[pos.line];
        let byte = char_to_byte(line, pos.column);

        if !text.contains('\n') {
            line.insert_str(byte, text);
            self.bump();
            return Some(LineEdit::Changed { line: pos.line });
        }

        let tail = line.split_off(byte);
        let mut pieces: Vec<&str> = text.split('\n').collect();
        let last = pieces.pop().unwrap_or_default();
        let mut pieces = pieces
            .into_iter()
            .map(|piece| piece.strip_suffix('\r').unwrap_or(piece));
        if let Some(first) = pieces.next() {
            line.push_str(first);
        }
        let mut inserted: Vec<String> = pieces.map(str::to_string).collect();
        inserted.push(format!("{}{}", last, tail));

        let at = pos.line + 1;
        self.lines.splice(at..at, inserted);
        self.bump();
        Some(LineEdit::Shifted { from: pos.line })
    }

    /// Delete the chars between two positions (order-insensitive).
    ///
    /// A range spanning lines joins the first and last line.
    pub fn delete_range(&mut self, start: DocPosition, end: DocPosition) -> Option<LineEdit> {
        let (start, end) = {
            let a = self.clamp(start);
            let b = self.clamp(end);
            if a <= b {
                (a, b)
            } else {
                (b, a)
            }
        };
        if start == end {
            return None;
        }

        if start.line == end.line {
            let line = &mut self.lines[start.line];
            let from = char_to_byte(line, start.column);
            let to = char_to_byte(line, end.column);
            line.replace_range(from..to, "");
            self.bump();
            return Some(LineEdit::Changed { line: start.line });
        }

        let end_line = &self.lines[end.line];
        let tail = end_line[char_to_byte(end_line, end.column)..].to_string();
        let first = &mut self.lines[start.line];
        let cut = char_to_byte(first, start.column);
        first.truncate(cut);
        first.push_str(&tail);
        self.lines.drain(start.line + 1..=end.line);
        self.bump();
        Some(LineEdit::Shifted { from: start.line })
    }

    /// Replace the whole text of one line.
    pub fn replace_line(&mut self, line: usize, text: &str) -> Option<LineEdit> {
        let slot = self.lines.get_mut(line)?;
        if slot.as_str() == text {
            return None;
        }
        slot.clear();
        slot.push_str(text);
        self.bump();
        Some(LineEdit::Changed { line })
    }

    /// Insert a new line before `index` (appends when `index` is past the end).
    pub fn insert_line(&mut self, index: usize, text: &str) -> Option<LineEdit> {
        let index = index.min(self.lines.len());
        self.lines.insert(index, text.to_string());
        self.bump();
        Some(LineEdit::Shifted { from: index })
    }

    /// Remove line `index`. Removing the only line empties it instead.
    pub fn remove_line(&mut self, index: usize) -> Option<LineEdit> {
        if index >= self.lines.len() {
            return None;
        }
        if self.lines.len() == 1 {
            return self.replace_line(0, "");
        }
        self.lines.remove(index);
        self.bump();
        Some(LineEdit::Shifted { from: index })
    }
}

impl LineSource for LineBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        self.lines.get(index).map(|line| Cow::Borrowed(line.as_str()))
    }
}
