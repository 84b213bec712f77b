//! Vertical scroll state measured in wrapped rows.

use std::ops::Range;

/// First visible wrapped row plus the number of rows on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    offset_y: usize,
    height: usize,
}

impl Viewport {
    /// Viewport scrolled to the top.
    pub fn new(height: usize) -> Self {
        Self {
            offset_y: 0,
            height,
        }
    }

    /// Wrapped index of the top row.
    pub fn offset_y(&self) -> usize {
        self.offset_y
    }

    /// Rows on screen.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Change the row count; call [`follow`](Self::follow) afterwards.
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
    }

    /// Put `offset_y` at an absolute row, no clamping.
    pub fn scroll_to(&mut self, offset_y: usize) {
        self.offset_y = offset_y;
    }

    /// Wrapped rows currently on screen.
    pub fn rows(&self) -> Range<usize> {
        self.offset_y..self.offset_y.saturating_add(self.height)
    }

    /// True when `wrapped_index` is on screen.
    pub fn contains(&self, wrapped_index: usize) -> bool {
        self.rows().contains(&wrapped_index)
    }

    /// Scroll the minimum distance that brings `cursor` on screen.
    ///
    /// A zero height is treated as one row so the cursor row is always
    /// visible. Returns true when `offset_y` moved.
    pub fn follow(&mut self, cursor: usize) -> bool {
        let height = self.height.max(1);
        let previous = self.offset_y;
        if cursor >= self.offset_y.saturating_add(height) {
            self.offset_y = cursor + 1 - height;
        } else if cursor < self.offset_y {
            self.offset_y = cursor;
        }
        self.offset_y != previous
    }
}
