//! Translation between document coordinates and wrapped-row coordinates.
//!
//! Columns are char offsets into the source line. Wrapping stores no join
//! separator, so a segment's start offset is the sum of the lengths of the
//! segments before it.

use crate::cache::{WrapCache, WrapSegment};
use crate::error::WrapError;
use crate::source::LineSource;
use crate::wrap::char_len;
use serde::{Deserialize, Serialize};

/// Cursor position in document coordinates.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DocPosition {
    /// Zero-based source line.
    pub line: usize,
    /// Char column within the line.
    pub column: usize,
}

impl DocPosition {
    /// Position at `line`, `column`.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Where a document position lands in wrapped-row space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WrappedLocation {
    /// Global wrapped-row index.
    pub wrapped_index: usize,
    /// Segment index within the source line.
    pub segment: usize,
    /// Char offset in the source line where that segment starts.
    pub segment_start: usize,
    /// Column relative to the segment start; the value to carry as the
    /// preferred visual column across vertical moves.
    pub visual_column: usize,
}

impl WrapCache {
    /// Locate `pos` in wrapped-row space.
    ///
    /// Rows of every line before `pos.line` are counted; within the line the
    /// first segment whose end reaches `pos.column` wins, so a column sitting
    /// exactly on a wrap boundary stays on the earlier row. Columns past the
    /// wrapped text land on the last segment. A line past the end of the
    /// source resolves to the row count of the whole source.
    pub fn locate<S>(&mut self, source: &S, pos: DocPosition) -> WrappedLocation
    where
        S: LineSource + ?Sized,
    {
        let line_count = source.line_count();
        let mut wrapped = 0usize;
        for line in 0..pos.line.min(line_count) {
            wrapped += self.line_rows(source, line);
        }
        if pos.line >= line_count {
            return WrappedLocation {
                wrapped_index: wrapped,
                ..WrappedLocation::default()
            };
        }

        let segments = self.segments(source, pos.line);
        let last = segments.len() - 1;
        let mut segment = 0usize;
        let mut consumed = 0usize;
        while segment < last {
            let len = segments[segment].len_chars();
            if pos.column <= consumed + len {
                break;
            }
            consumed += len;
            segment += 1;
        }

        WrappedLocation {
            wrapped_index: wrapped + segment,
            segment,
            segment_start: consumed,
            visual_column: pos.column.saturating_sub(consumed),
        }
    }

    /// Global wrapped-row index of the cursor.
    pub fn wrapped_index_of<S>(&mut self, source: &S, pos: DocPosition) -> usize
    where
        S: LineSource + ?Sized,
    {
        self.locate(source, pos).wrapped_index
    }

    /// Document position for wrapped row `target`.
    ///
    /// The column is `segment_start + preferred_visual_column`, clamped to the
    /// end of the target segment and then to the source line length.
    ///
    /// # Errors
    /// [`WrapError::WrappedIndexOutOfRange`] when `target` is past the last
    /// wrapped row; `total` carries the row count of the whole document.
    pub fn position_at_wrapped_index<S>(
        &mut self,
        source: &S,
        target: usize,
        preferred_visual_column: usize,
    ) -> Result<DocPosition, WrapError>
    where
        S: LineSource + ?Sized,
    {
        let mut wrapped = 0usize;
        for line in 0..source.line_count() {
            let segments = self.segments(source, line);
            if wrapped + segments.len() > target {
                let offset = target - wrapped;
                let segment_start: usize =
                    segments[..offset].iter().map(WrapSegment::len_chars).sum();
                let segment_end = segment_start + segments[offset].len_chars();
                let line_len = source.line(line).map(|text| char_len(&text)).unwrap_or(0);
                let column = segment_start
                    .saturating_add(preferred_visual_column)
                    .min(segment_end)
                    .min(line_len);
                return Ok(DocPosition { line, column });
            }
            wrapped += segments.len();
        }
        Err(WrapError::WrappedIndexOutOfRange {
            index: target,
            total: wrapped,
        })
    }

    /// Move one wrapped row up. `None` on the first row.
    pub fn move_up<S>(
        &mut self,
        source: &S,
        pos: DocPosition,
        preferred_visual_column: usize,
    ) -> Option<DocPosition>
    where
        S: LineSource + ?Sized,
    {
        let target = self.wrapped_index_of(source, pos).checked_sub(1)?;
        self.position_at_wrapped_index(source, target, preferred_visual_column)
            .ok()
    }

    /// Move one wrapped row down. `None` on the last row.
    pub fn move_down<S>(
        &mut self,
        source: &S,
        pos: DocPosition,
        preferred_visual_column: usize,
    ) -> Option<DocPosition>
    where
        S: LineSource + ?Sized,
    {
        let target = self.wrapped_index_of(source, pos).saturating_add(1);
        self.position_at_wrapped_index(source, target, preferred_visual_column)
            .ok()
    }

    /// Move up by `rows` wrapped rows (at least one), stopping at the first row.
    pub fn page_up<S>(
        &mut self,
        source: &S,
        pos: DocPosition,
        preferred_visual_column: usize,
        rows: usize,
    ) -> DocPosition
    where
        S: LineSource + ?Sized,
    {
        let target = self.wrapped_index_of(source, pos).saturating_sub(rows.max(1));
        self.position_at_wrapped_index(source, target, preferred_visual_column)
            .unwrap_or(pos)
    }

    /// Move down by `rows` wrapped rows (at least one), stopping at the last row.
    pub fn page_down<S>(
        &mut self,
        source: &S,
        pos: DocPosition,
        preferred_visual_column: usize,
        rows: usize,
    ) -> DocPosition
    where
        S: LineSource + ?Sized,
    {
        let target = self
            .wrapped_index_of(source, pos)
            .saturating_add(rows.max(1));
        match self.position_at_wrapped_index(source, target, preferred_visual_column) {
            Ok(moved) => moved,
            Err(WrapError::WrappedIndexOutOfRange { total, .. }) if total > 0 => self
                .position_at_wrapped_index(source, total - 1, preferred_visual_column)
                .unwrap_or(pos),
            Err(_) => pos,
        }
    }
}
