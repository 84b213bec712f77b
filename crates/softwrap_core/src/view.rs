//! Single owned handle combining the wrap cache, viewport and configuration.

use crate::buffer::LineEdit;
use crate::cache::{WrapCache, WrapSegment};
use crate::config::WrapConfig;
use crate::coords::{DocPosition, WrappedLocation};
use crate::source::LineSource;
use crate::viewport::Viewport;
use tracing::debug;

/// Wrap state owned by one editor.
///
/// Every navigation method re-clamps the viewport around the cursor it
/// returns, so callers only track the cursor and the preferred visual column.
#[derive(Clone, Debug)]
pub struct WrapView {
    config: WrapConfig,
    cache: WrapCache,
    viewport: Viewport,
}

impl WrapView {
    /// Build a view for a terminal `total_width` x `total_height`.
    pub fn new(config: WrapConfig, total_width: usize, total_height: usize) -> Self {
        Self {
            cache: WrapCache::new(config.wrap_width_for(total_width)),
            viewport: Viewport::new(config.visible_height_for(total_height)),
            config,
        }
    }

    /// Settings the view derives its dimensions from.
    pub fn config(&self) -> &WrapConfig {
        &self.config
    }

    /// Underlying wrap cache.
    pub fn cache(&self) -> &WrapCache {
        &self.cache
    }

    /// Mutable access for direct coordinate queries.
    pub fn cache_mut(&mut self) -> &mut WrapCache {
        &mut self.cache
    }

    /// Current scroll state.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current wrap width.
    pub fn wrap_width(&self) -> usize {
        self.cache.width()
    }

    /// Apply new terminal dimensions and keep the cursor on screen.
    ///
    /// The cache is invalidated only when the derived wrap width changes.
    pub fn resize<S>(
        &mut self,
        source: &S,
        cursor: DocPosition,
        total_width: usize,
        total_height: usize,
    ) where
        S: LineSource + ?Sized,
    {
        let width = self.config.wrap_width_for(total_width);
        let height = self.config.visible_height_for(total_height);
        debug!(total_width, total_height, width, height, "resizing wrap view");
        self.cache.set_width(width);
        self.viewport.set_height(height);
        self.follow_cursor(source, cursor);
    }

    /// Rows currently on screen; fewer than the viewport height near the end.
    pub fn visible_rows<S>(&mut self, source: &S) -> Vec<WrapSegment>
    where
        S: LineSource + ?Sized,
    {
        self.cache
            .visible(source, self.viewport.offset_y(), self.viewport.height())
    }

    /// Scroll so the cursor row is visible. Returns true when the view moved.
    pub fn follow_cursor<S>(&mut self, source: &S, cursor: DocPosition) -> bool
    where
        S: LineSource + ?Sized,
    {
        let index = self.cache.wrapped_index_of(source, cursor);
        self.viewport.follow(index)
    }

    /// Put the top of the viewport at an absolute wrapped row.
    pub fn scroll_to(&mut self, offset_y: usize) {
        self.viewport.scroll_to(offset_y);
    }

    /// Drop the cache entries an edit made stale.
    pub fn apply_edit(&mut self, edit: LineEdit) {
        debug!(first_line = edit.first_line(), ?edit, "applying edit to wrap view");
        self.cache.apply_edit(edit);
    }

    /// See [`WrapCache::locate`].
    pub fn locate<S>(&mut self, source: &S, cursor: DocPosition) -> WrappedLocation
    where
        S: LineSource + ?Sized,
    {
        self.cache.locate(source, cursor)
    }

    /// One row up; `None` (and no scroll) on the first row.
    pub fn move_up<S>(
        &mut self,
        source: &S,
        cursor: DocPosition,
        preferred_visual_column: usize,
    ) -> Option<DocPosition>
    where
        S: LineSource + ?Sized,
    {
        let moved = self
            .cache
            .move_up(source, cursor, preferred_visual_column)?;
        self.follow_cursor(source, moved);
        Some(moved)
    }

    /// One row down; `None` (and no scroll) on the last row.
    pub fn move_down<S>(
        &mut self,
        source: &S,
        cursor: DocPosition,
        preferred_visual_column: usize,
    ) -> Option<DocPosition>
    where
        S: LineSource + ?Sized,
    {
        let moved = self
            .cache
            .move_down(source, cursor, preferred_visual_column)?;
        self.follow_cursor(source, moved);
        Some(moved)
    }

    /// One viewport height up.
    pub fn page_up<S>(
        &mut self,
        source: &S,
        cursor: DocPosition,
        preferred_visual_column: usize,
    ) -> DocPosition
    where
        S: LineSource + ?Sized,
    {
        let rows = self.viewport.height();
        let moved = self
            .cache
            .page_up(source, cursor, preferred_visual_column, rows);
        self.follow_cursor(source, moved);
        moved
    }

    /// One viewport height down.
    pub fn page_down<S>(
        &mut self,
        source: &S,
        cursor: DocPosition,
        preferred_visual_column: usize,
    ) -> DocPosition
    where
        S: LineSource + ?Sized,
    {
        let rows = self.viewport.height();
        let moved = self
            .cache
            .page_down(source, cursor, preferred_visual_column, rows);
        self.follow_cursor(source, moved);
        moved
    }
}
