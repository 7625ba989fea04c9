//! Viewport windowing: deciding which row indices must be materialized.
//!
//! The windower is stateless: a pure function of scroll geometry and the
//! row-height cache, re-evaluated on every trigger (scroll, resize, row-count
//! change, mode change). It never updates incrementally, unlike the cache it
//! reads from.

use serde::{Deserialize, Serialize};

use crate::heights::RowHeightCache;

/// How the grid body scrolls through the row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollMode {
    /// Continuous scrolling; only rows intersecting the visible pixel band
    /// are materialized, positioned from cumulative-height queries.
    #[default]
    Virtual,
    /// Discrete pages of fixed-height rows; no height cache involved.
    Paged,
}

/// Direction of the most recent scroll movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Half-open range `[first, last)` of row indices to materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowWindow {
    /// First row index in the window.
    pub first: usize,
    /// One past the last row index in the window.
    pub last: usize,
}

impl RowWindow {
    /// The empty window `{0, 0}`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows in the window.
    pub fn len(&self) -> usize {
        self.last.saturating_sub(self.first)
    }

    /// True if the window holds no rows.
    pub fn is_empty(&self) -> bool {
        self.last <= self.first
    }

    /// Whether `index` falls inside the window.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.first && index < self.last
    }

    /// The window as an iterable index range.
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.first..self.last
    }
}

/// Minimal contiguous window covering the visible pixel band
/// `[scroll_y, scroll_y + viewport_height]`, with at most one extra trailing
/// row for partial visibility at the bottom edge.
pub fn virtual_window(cache: &RowHeightCache, scroll_y: f32, viewport_height: f32) -> RowWindow {
    let Some(first) = cache.row_index_at_offset(scroll_y) else {
        return RowWindow::empty();
    };
    let bottom = cache
        .row_index_at_offset(scroll_y + viewport_height.max(0.0))
        .unwrap_or(first);
    RowWindow {
        first,
        last: (bottom + 1).min(cache.len()),
    }
}

/// Window for page `page_offset` of size `page_size`, clamped to the row
/// count. Every row in a page is assumed fixed-height.
pub fn paged_window(page_offset: usize, page_size: usize, row_count: usize) -> RowWindow {
    let first = page_offset.saturating_mul(page_size).min(row_count);
    RowWindow {
        first,
        last: first.saturating_add(page_size).min(row_count),
    }
}

/// The row to treat as "current" for scroll anchoring: when the row at
/// `first - 1` starts at or before `scroll_y`, prefer it over `first`, so a
/// scroll sitting exactly on a row boundary attributes updates to the row
/// occupying the top edge.
pub fn adjusted_first_index(cache: &RowHeightCache, scroll_y: f32, first: usize) -> usize {
    if first == 0 {
        return 0;
    }
    match cache.offset_of(first - 1) {
        Ok(start) if start <= scroll_y => first - 1,
        _ => first,
    }
}

/// Page size that fits a viewport of fixed-height rows.
///
/// An expanded detail row is still a child of its base row, so the page size
/// stays a function of the base row height only.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn page_size_for_viewport(viewport_height: f32, row_height: f32) -> usize {
    if row_height <= 0.0 || viewport_height <= 0.0 {
        return 0;
    }
    (viewport_height / row_height).ceil() as usize
}

/// Page under a scroll-derived first index. Scrolling up rounds the partial
/// page down, scrolling down rounds it up, so the page flips only once the
/// next page's rows dominate the viewport.
pub fn current_page(first_index: usize, page_size: usize, direction: ScrollDirection) -> usize {
    if page_size == 0 {
        return 0;
    }
    match direction {
        ScrollDirection::Up => first_index / page_size,
        ScrollDirection::Down => first_index.div_ceil(page_size),
    }
}

/// Clamp a scroll offset to the scrollable range
/// `[0, max(total_height - viewport_height, 0)]`.
pub fn clamp_scroll(scroll_y: f32, total_height: f32, viewport_height: f32) -> f32 {
    scroll_y.clamp(0.0, (total_height - viewport_height).max(0.0))
}

/// Per-row vertical offsets for the rows of a window, for absolute
/// positioning during render.
pub fn row_offsets(
    cache: &RowHeightCache,
    window: RowWindow,
) -> impl Iterator<Item = (usize, f32)> + '_ {
    window
        .indices()
        .map(move |index| (index, cache.offset_of(index).unwrap_or(0.0)))
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

    fn uniform_cache(rows: usize, height: f32) -> RowHeightCache {
        let mut cache = RowHeightCache::new();
        cache.rebuild(std::iter::repeat(height).take(rows)).unwrap();
        cache
    }

    #[test]
    fn test_virtual_window_at_top() {
        let cache = uniform_cache(100, 20.0);
        let window = virtual_window(&cache, 0.0, 600.0);
        assert_eq!(window.first, 0);
        // 600 / 20 = 30 rows fill the band; offset 600 lands on row 30, plus
        // the trailing partial row.
        assert_eq!(window.last, 31);
    }

    #[test]
    fn test_virtual_window_empty_cache() {
        let cache = RowHeightCache::new();
        assert_eq!(virtual_window(&cache, 0.0, 500.0), RowWindow::empty());
        assert_eq!(virtual_window(&cache, 250.0, 500.0), RowWindow::empty());
    }

    #[test]
    fn test_virtual_window_clamps_at_end() {
        let cache = uniform_cache(10, 50.0);
        let window = virtual_window(&cache, 400.0, 500.0);
        assert_eq!(window.first, 8);
        assert_eq!(window.last, 10);
    }

    #[test]
    fn test_paged_window() {
        assert_eq!(
            paged_window(2, 25, 1000),
            RowWindow {
                first: 50,
                last: 75
            }
        );
        // Final short page
        assert_eq!(
            paged_window(3, 30, 100),
            RowWindow {
                first: 90,
                last: 100
            }
        );
        // Page beyond the data
        assert_eq!(
            paged_window(50, 30, 100),
            RowWindow {
                first: 100,
                last: 100
            }
        );
        assert_eq!(paged_window(0, 25, 0), RowWindow::empty());
    }

    #[test]
    fn test_adjusted_first_index_prefers_previous_row() {
        let cache = uniform_cache(20, 30.0);
        // Scroll exactly on row 5's start: row 4 starts at 120 <= 150.
        assert_eq!(adjusted_first_index(&cache, 150.0, 5), 4);
        // Top of the grid never adjusts below 0.
        assert_eq!(adjusted_first_index(&cache, 0.0, 0), 0);
    }

    #[test]
    fn test_page_size_for_viewport() {
        assert_eq!(page_size_for_viewport(600.0, 20.0), 30);
        assert_eq!(page_size_for_viewport(610.0, 20.0), 31);
        assert_eq!(page_size_for_viewport(600.0, 0.0), 0);
        assert_eq!(page_size_for_viewport(0.0, 20.0), 0);
    }

    #[test]
    fn test_current_page_rounding() {
        assert_eq!(current_page(47, 25, ScrollDirection::Up), 1);
        assert_eq!(current_page(47, 25, ScrollDirection::Down), 2);
        assert_eq!(current_page(50, 25, ScrollDirection::Up), 2);
        assert_eq!(current_page(50, 25, ScrollDirection::Down), 2);
        assert_eq!(current_page(10, 0, ScrollDirection::Down), 0);
    }

    #[test]
    fn test_clamp_scroll() {
        assert_eq!(clamp_scroll(-10.0, 1000.0, 300.0), 0.0);
        assert_eq!(clamp_scroll(900.0, 1000.0, 300.0), 700.0);
        assert_eq!(clamp_scroll(350.0, 1000.0, 300.0), 350.0);
        // Content shorter than the viewport pins to 0.
        assert_eq!(clamp_scroll(50.0, 200.0, 300.0), 0.0);
    }

    #[test]
    fn test_row_offsets_positions() {
        let cache = uniform_cache(10, 30.0);
        let window = RowWindow { first: 3, last: 6 };
        let offsets: Vec<(usize, f32)> = row_offsets(&cache, window).collect();
        assert_eq!(offsets, vec![(3, 90.0), (4, 120.0), (5, 150.0)]);
    }
}
