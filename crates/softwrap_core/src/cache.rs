//! Per-source-line wrap cache for lazy, incremental re-layout.
//!
//! Entries are keyed by source-line index at the current wrap width and are
//! only created on a read miss. Edits never recompute eagerly: they drop the
//! affected entries and the next read re-wraps.

use crate::buffer::LineEdit;
use crate::source::LineSource;
use crate::wrap::wrap_line;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// One display row produced by wrapping a source line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WrapSegment {
    /// Row text (no line ending, no trailing join space).
    pub text: String,
    /// Index of the source line this row came from.
    pub source_line: usize,
    /// True for the final row of its source line.
    pub is_last: bool,
}

impl WrapSegment {
    /// Placeholder row for a line index the source does not have.
    pub fn empty(source_line: usize) -> Self {
        Self {
            text: String::new(),
            source_line,
            is_last: true,
        }
    }

    /// Row length in chars.
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }
}

/// Counters for cache traffic since construction or the last reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads answered from an existing entry.
    pub hits: u64,
    /// Reads that wrapped a line and stored the result.
    pub misses: u64,
    /// Entries removed by invalidation (width changes included).
    pub invalidated: u64,
}

fn segments_for_line(line_index: usize, text: &str, width: usize) -> Arc<[WrapSegment]> {
    let rows = wrap_line(text, width);
    let last = rows.len() - 1;
    rows.into_iter()
        .enumerate()
        .map(|(idx, text)| WrapSegment {
            text,
            source_line: line_index,
            is_last: idx == last,
        })
        .collect()
}

/// Memoized wrap segments keyed by source-line index.
///
/// Invariant: every stored entry matches its line's current text at the
/// current width. Callers uphold the text half by reporting edits through
/// [`invalidate_line`](Self::invalidate_line),
/// [`invalidate_from`](Self::invalidate_from) or
/// [`apply_edit`](Self::apply_edit); the width half is enforced by
/// [`set_width`](Self::set_width).
#[derive(Clone, Debug)]
pub struct WrapCache {
    width: usize,
    entries: BTreeMap<usize, Arc<[WrapSegment]>>,
    stats: CacheStats,
}

impl WrapCache {
    /// Create an empty cache wrapping at `width` chars (minimum 1).
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            entries: BTreeMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Current wrap width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cached source lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when `line` has a cached entry.
    pub fn contains(&self, line: usize) -> bool {
        self.entries.contains_key(&line)
    }

    /// Traffic counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Zero the traffic counters.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Wrap segments for `line`, wrapping and storing them on a miss.
    ///
    /// A line the source does not have yields one synthetic empty segment,
    /// which is not stored.
    pub fn segments<S>(&mut self, source: &S, line: usize) -> Arc<[WrapSegment]>
    where
        S: LineSource + ?Sized,
    {
        if let Some(cached) = self.entries.get(&line) {
            self.stats.hits += 1;
            return Arc::clone(cached);
        }

        let Some(text) = source.line(line) else {
            return Arc::from(vec![WrapSegment::empty(line)]);
        };

        let segments = segments_for_line(line, &text, self.width);
        self.stats.misses += 1;
        trace!(line, rows = segments.len(), width = self.width, "wrap cache miss");
        self.entries.insert(line, Arc::clone(&segments));
        segments
    }

    /// Number of display rows `line` occupies.
    pub fn line_rows<S>(&mut self, source: &S, line: usize) -> usize
    where
        S: LineSource + ?Sized,
    {
        self.segments(source, line).len()
    }

    /// Drop the entry for one line after an edit confined to it.
    pub fn invalidate_line(&mut self, line: usize) {
        if self.entries.remove(&line).is_some() {
            self.stats.invalidated += 1;
            debug!(line, "invalidated wrap cache line");
        }
    }

    /// Drop every entry at or after `line`, after lines were inserted or
    /// removed there. Earlier entries stay untouched.
    pub fn invalidate_from(&mut self, line: usize) {
        let dropped = self.entries.split_off(&line);
        if dropped.is_empty() {
            return;
        }
        self.stats.invalidated += dropped.len() as u64;
        debug!(
            from = line,
            dropped = dropped.len(),
            kept = self.entries.len(),
            "invalidated wrap cache suffix"
        );
    }

    /// Drop every entry.
    pub fn invalidate_all(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.stats.invalidated += self.entries.len() as u64;
        debug!(dropped = self.entries.len(), "invalidated whole wrap cache");
        self.entries.clear();
    }

    /// Change the wrap width; any actual change invalidates everything.
    pub fn set_width(&mut self, width: usize) {
        let width = width.max(1);
        if width == self.width {
            return;
        }
        debug!(old = self.width, new = width, "wrap width changed");
        self.width = width;
        self.invalidate_all();
    }

    /// Invalidate whatever an edit reported by [`LineBuffer`](crate::LineBuffer)
    /// touched.
    pub fn apply_edit(&mut self, edit: LineEdit) {
        match edit {
            LineEdit::Changed { line } => self.invalidate_line(line),
            LineEdit::Shifted { from } => self.invalidate_from(from),
        }
    }

    /// Total display rows for the whole source. Walks every line.
    pub fn total_wrapped_lines<S>(&mut self, source: &S) -> usize
    where
        S: LineSource + ?Sized,
    {
        (0..source.line_count())
            .map(|line| self.line_rows(source, line))
            .sum()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
