//! Visible-window resolution.
//!
//! Scroll domain is wrapped rows, not source lines.

use crate::cache::{WrapCache, WrapSegment};
use crate::source::LineSource;
use tracing::trace;

impl WrapCache {
    /// Wrapped rows `[start, start + count)` of the whole document.
    ///
    /// Walks source lines from the top and stops as soon as the window is
    /// full, so only the lines needed to reach and fill it are wrapped; the
    /// rest of the document is never read. Returns fewer than `count` rows when
    /// the document ends first.
    pub fn visible<S>(&mut self, source: &S, start: usize, count: usize) -> Vec<WrapSegment>
    where
        S: LineSource + ?Sized,
    {
        let mut rows = Vec::with_capacity(count);
        if count == 0 {
            return rows;
        }

        let end = start.saturating_add(count);
        let misses_before = self.stats().misses;
        let mut wrapped = 0usize;
        let mut lines_touched = 0usize;

        for line in 0..source.line_count() {
            let segments = self.segments(source, line);
            lines_touched += 1;
            let line_end = wrapped + segments.len();
            if line_end > start {
                let first = start.max(wrapped);
                let take = end.min(line_end) - first;
                rows.extend(segments.iter().skip(first - wrapped).take(take).cloned());
            }
            wrapped = line_end;
            if wrapped >= end {
                break;
            }
        }

        trace!(
            target: "softwrap::perf",
            start,
            count,
            rows = rows.len(),
            lines_touched,
            misses = self.stats().misses - misses_before,
            "resolved visible window"
        );
        rows
    }
}
