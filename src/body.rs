//! Body layout state: the height cache, expansion side-table, and height
//! profile for one grid instance.
//!
//! This is the single writer of the cache. Row-set replacement rebuilds it,
//! a single expansion toggle point-updates it, and toggling all rows
//! rebuilds once instead of issuing n point updates. Every mutation captures
//! a scroll anchor first so the caller can re-seat the viewport on the same
//! row afterwards.

use crate::error::{Result, VgridError};
use crate::heights::{ExpansionState, RowHeightCache};
use crate::types::RowHeightProfile;
use crate::window::{self, RowWindow, ScrollMode};

/// The row the viewport was visually anchored on when a mutation ran, and
/// that row's start offset at the time.
///
/// After the mutation, scrolling to the anchor row's new start offset keeps
/// it stationary on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnchor {
    /// Adjusted first visible row index, captured before the mutation.
    pub index: usize,
    /// That row's start offset before the mutation.
    pub offset: f32,
}

/// Result of an expansion mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpansionChange {
    /// The toggled row.
    pub index: usize,
    /// The row's new expansion state.
    pub expanded: bool,
    /// Viewport anchor captured before the height change.
    pub anchor: ScrollAnchor,
}

/// Height/expansion state for a grid body.
#[derive(Debug, Clone)]
pub struct BodyLayout {
    profile: RowHeightProfile,
    row_count: usize,
    cache: RowHeightCache,
    expansion: ExpansionState,
}

impl BodyLayout {
    /// Create an empty body with the given height profile.
    pub fn new(profile: RowHeightProfile) -> Result<Self> {
        profile.validate()?;
        Ok(Self {
            profile,
            row_count: 0,
            cache: RowHeightCache::new(),
            expansion: ExpansionState::new(),
        })
    }

    /// Current row count.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// The height profile in effect.
    pub fn profile(&self) -> RowHeightProfile {
        self.profile
    }

    /// Read access to the underlying cache, for windowing and positioning.
    pub fn cache(&self) -> &RowHeightCache {
        &self.cache
    }

    /// Whether row `index` is currently expanded.
    pub fn is_expanded(&self, index: usize) -> bool {
        self.expansion.is_expanded(index)
    }

    /// Number of expanded rows.
    pub fn expanded_count(&self) -> usize {
        self.expansion.expanded_count()
    }

    /// Total height of all rows.
    pub fn total_height(&self) -> f32 {
        self.cache.total_height()
    }

    /// Start offset of row `index`, for absolute positioning or for jumping
    /// the scroll to a row (pager navigation).
    pub fn row_offset(&self, index: usize) -> Result<f32> {
        self.cache.offset_of(index)
    }

    /// Effective height of row `index`.
    pub fn row_height(&self, index: usize) -> Result<f32> {
        self.cache.row_height(index)
    }

    /// Replace the row set (sort, filter, insert, remove all land here).
    ///
    /// Expansion flags for surviving indices are kept; flags beyond the new
    /// count are dropped; the cache is rebuilt.
    pub fn set_row_count(&mut self, row_count: usize) -> Result<()> {
        self.row_count = row_count;
        self.expansion.truncate(row_count);
        self.cache
            .rebuild_uniform(&self.expansion, row_count, &self.profile)
    }

    /// Swap in a new height profile and rebuild.
    pub fn set_profile(&mut self, profile: RowHeightProfile) -> Result<()> {
        profile.validate()?;
        self.profile = profile;
        self.cache
            .rebuild_uniform(&self.expansion, self.row_count, &self.profile)
    }

    /// Window of rows to materialize for the given geometry.
    pub fn window(
        &self,
        mode: ScrollMode,
        scroll_y: f32,
        viewport_height: f32,
        page_offset: usize,
        page_size: usize,
    ) -> RowWindow {
        match mode {
            ScrollMode::Virtual => window::virtual_window(&self.cache, scroll_y, viewport_height),
            ScrollMode::Paged => window::paged_window(page_offset, page_size, self.row_count),
        }
    }

    /// Toggle row `index`'s detail expansion.
    ///
    /// Applies `±detail_row_height` as a point update to the cache, then
    /// flips the side-table flag. The returned anchor was captured before
    /// the mutation; scroll to `row_offset(change.anchor.index)` afterwards
    /// to keep that row visually stationary.
    ///
    /// # Errors
    /// `OutOfRange` if `index` is outside the current row set.
    pub fn toggle_expansion(
        &mut self,
        index: usize,
        scroll_y: f32,
        viewport_height: f32,
    ) -> Result<ExpansionChange> {
        if index >= self.row_count {
            return Err(VgridError::OutOfRange {
                index,
                len: self.row_count,
            });
        }
        let anchor = self.capture_anchor(scroll_y, viewport_height)?;

        let delta = if self.expansion.is_expanded(index) {
            -self.profile.detail_row_height
        } else {
            self.profile.detail_row_height
        };
        self.cache.update(index, delta)?;
        let expanded = self.expansion.toggle(index);

        Ok(ExpansionChange {
            index,
            expanded,
            anchor,
        })
    }

    /// Expand every row. One O(n) rebuild instead of n point updates.
    pub fn expand_all(&mut self, scroll_y: f32, viewport_height: f32) -> Result<ScrollAnchor> {
        self.set_all_expanded(true, scroll_y, viewport_height)
    }

    /// Collapse every row. One O(n) rebuild instead of n point updates.
    pub fn collapse_all(&mut self, scroll_y: f32, viewport_height: f32) -> Result<ScrollAnchor> {
        self.set_all_expanded(false, scroll_y, viewport_height)
    }

    fn set_all_expanded(
        &mut self,
        expanded: bool,
        scroll_y: f32,
        viewport_height: f32,
    ) -> Result<ScrollAnchor> {
        let anchor = self.capture_anchor(scroll_y, viewport_height)?;
        if expanded {
            self.expansion.expand_all(self.row_count);
        } else {
            self.expansion.collapse_all();
        }
        self.cache
            .rebuild_uniform(&self.expansion, self.row_count, &self.profile)?;
        Ok(anchor)
    }

    fn capture_anchor(&self, scroll_y: f32, viewport_height: f32) -> Result<ScrollAnchor> {
        let window = window::virtual_window(&self.cache, scroll_y, viewport_height);
        let index = window::adjusted_first_index(&self.cache, scroll_y, window.first);
        let offset = self.cache.offset_of(index)?;
        Ok(ScrollAnchor { index, offset })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn body(rows: usize) -> BodyLayout {
        let profile = RowHeightProfile::new(30.0, 100.0).unwrap();
        let mut body = BodyLayout::new(profile).unwrap();
        body.set_row_count(rows).unwrap();
        body
    }

    #[test]
    fn test_toggle_updates_heights() {
        let mut body = body(100);
        let change = body.toggle_expansion(50, 0.0, 300.0).unwrap();
        assert!(change.expanded);
        assert_eq!(body.row_height(50).unwrap(), 130.0);
        assert_eq!(body.total_height(), 100.0 * 30.0 + 100.0);

        let change = body.toggle_expansion(50, 0.0, 300.0).unwrap();
        assert!(!change.expanded);
        assert_eq!(body.total_height(), 3000.0);
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut body = body(10);
        assert_eq!(
            body.toggle_expansion(10, 0.0, 300.0),
            Err(VgridError::OutOfRange { index: 10, len: 10 })
        );
    }

    #[test]
    fn test_anchor_keeps_row_stationary() {
        let mut body = body(100);
        // Viewport sits at row 20's start.
        let scroll_y = body.row_offset(20).unwrap();
        let change = body.toggle_expansion(5, scroll_y, 300.0).unwrap();

        // Re-seat the scroll on the anchor row's new offset: the anchored
        // row still heads the recomputed window.
        let new_scroll = body.row_offset(change.anchor.index).unwrap();
        let window = body.window(ScrollMode::Virtual, new_scroll, 300.0, 0, 0);
        assert_eq!(window.first, change.anchor.index);
    }

    #[test]
    fn test_expand_all_matches_point_updates() {
        let mut bulk = body(50);
        bulk.expand_all(0.0, 300.0).unwrap();

        let mut stepwise = body(50);
        for i in 0..50 {
            stepwise.toggle_expansion(i, 0.0, 300.0).unwrap();
        }

        assert_eq!(bulk.total_height(), stepwise.total_height());
        for i in 0..50 {
            assert_eq!(
                bulk.row_offset(i).unwrap(),
                stepwise.row_offset(i).unwrap()
            );
        }
    }

    #[test]
    fn test_collapse_all_restores_uniform_heights() {
        let mut body = body(50);
        body.expand_all(0.0, 300.0).unwrap();
        assert_eq!(body.expanded_count(), 50);

        body.collapse_all(0.0, 300.0).unwrap();
        assert_eq!(body.expanded_count(), 0);
        assert_eq!(body.total_height(), 1500.0);
    }

    #[test]
    fn test_row_set_shrink_drops_stale_flags() {
        let mut body = body(20);
        body.toggle_expansion(15, 0.0, 300.0).unwrap();
        body.set_row_count(10).unwrap();
        assert!(!body.is_expanded(15));
        assert_eq!(body.total_height(), 300.0);
    }

    #[test]
    fn test_empty_body_windows_empty() {
        let body = body(0);
        assert_eq!(body.total_height(), 0.0);
        let window = body.window(ScrollMode::Virtual, 0.0, 300.0, 0, 0);
        assert_eq!(window, RowWindow::empty());
    }
}
