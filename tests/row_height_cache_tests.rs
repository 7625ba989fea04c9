//! Row-height cache tests
//!
//! Tests for cumulative-height prefix sums, inverse offset queries, and
//! point updates over large and dynamic row sets.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use vgrid::heights::{ExpansionState, RowHeightCache};
use vgrid::types::RowHeightProfile;
use vgrid::VgridError;

/// Build a cache from explicit per-row heights
fn cache_of(heights: &[f32]) -> RowHeightCache {
    let mut cache = RowHeightCache::new();
    cache.rebuild(heights.iter().copied()).unwrap();
    cache
}

/// Build a uniform cache of `rows` rows of `height` px
fn uniform_cache(rows: usize, height: f32) -> RowHeightCache {
    let mut cache = RowHeightCache::new();
    cache
        .rebuild(std::iter::repeat(height).take(rows))
        .unwrap();
    cache
}

// =============================================================================
// LARGE UNIFORM GRIDS
// =============================================================================

#[test]
fn test_100k_uniform_rows() {
    let cache = uniform_cache(100_000, 30.0);

    assert_eq!(cache.len(), 100_000);
    assert_eq!(
        cache.height_through(999).unwrap(),
        30_000.0,
        "first 1000 rows of height 30 should sum to 30000"
    );
    assert_eq!(
        cache.row_index_at_offset(30_000.0),
        Some(1000),
        "offset exactly on the boundary belongs to the row starting there"
    );
    assert_eq!(cache.total_height(), 3_000_000.0);
}

#[test]
fn test_prefix_sums_equal_linear_sums() {
    // Mixed heights exercising carries across Fenwick node spans
    let heights: Vec<f32> = (0..257).map(|i| 10.0 + (i % 7) as f32 * 2.5).collect();
    let cache = cache_of(&heights);

    let mut running = 0.0f32;
    for (i, h) in heights.iter().enumerate() {
        running += h;
        assert_eq!(
            cache.height_through(i).unwrap(),
            running,
            "prefix sum mismatch at row {i}"
        );
    }
}

// =============================================================================
// EXPANSION POINT UPDATES
// =============================================================================

#[test]
fn test_expanding_row_50_shifts_only_later_rows() {
    let mut expansion = ExpansionState::new();
    let profile = RowHeightProfile::new(30.0, 100.0).unwrap();
    let mut cache = RowHeightCache::new();
    cache.rebuild_uniform(&expansion, 1000, &profile).unwrap();

    let before_49 = cache.height_through(49).unwrap();
    let before_50 = cache.height_through(50).unwrap();

    expansion.set_expanded(50, true);
    cache.update(50, profile.detail_row_height).unwrap();

    assert_eq!(
        cache.height_through(49).unwrap(),
        before_49,
        "rows before the expanded one must not move"
    );
    assert_eq!(
        cache.height_through(50).unwrap(),
        before_50 + 100.0,
        "cumulative height through the expanded row grows by exactly the detail height"
    );
    assert_eq!(cache.row_height(50).unwrap(), 130.0);
}

#[test]
fn test_update_pairs_cancel() {
    let mut cache = uniform_cache(512, 25.0);
    let snapshot: Vec<f32> = (0..512).map(|i| cache.height_through(i).unwrap()).collect();

    // Expand and collapse a scattering of rows in interleaved order
    for &i in &[0, 7, 255, 256, 511, 100] {
        cache.update(i, 80.0).unwrap();
    }
    for &i in &[255, 511, 0, 100, 256, 7] {
        cache.update(i, -80.0).unwrap();
    }

    for (i, expected) in snapshot.iter().enumerate() {
        assert_eq!(
            cache.height_through(i).unwrap(),
            *expected,
            "row {i} prefix changed after a net-zero update sequence"
        );
    }
}

// =============================================================================
// INVERSE QUERIES
// =============================================================================

#[test]
fn test_inverse_consistency_row_starts() {
    let heights: Vec<f32> = (0..300).map(|i| 20.0 + (i % 5) as f32 * 11.0).collect();
    let cache = cache_of(&heights);

    for i in 0..cache.len() {
        let start = cache.offset_of(i).unwrap();
        assert_eq!(
            cache.row_index_at_offset(start),
            Some(i),
            "offset at row {i}'s start must map back to row {i}"
        );
    }
}

#[test]
fn test_inverse_query_interior_offsets() {
    let cache = cache_of(&[30.0, 130.0, 30.0, 30.0]);

    assert_eq!(cache.row_index_at_offset(15.0), Some(0));
    assert_eq!(cache.row_index_at_offset(45.0), Some(1));
    assert_eq!(cache.row_index_at_offset(159.9), Some(1));
    assert_eq!(cache.row_index_at_offset(160.0), Some(2));
}

#[test]
fn test_inverse_query_clamps_out_of_band_offsets() {
    let cache = uniform_cache(10, 30.0);

    // Elastic-bounce offsets are routine during fast scrolls
    assert_eq!(cache.row_index_at_offset(-50.0), Some(0));
    assert_eq!(cache.row_index_at_offset(300.0), Some(9));
    assert_eq!(cache.row_index_at_offset(1.0e12), Some(9));
}

// =============================================================================
// EMPTY AND ERROR CASES
// =============================================================================

#[test]
fn test_empty_row_set() {
    let cache = RowHeightCache::new();

    assert_eq!(cache.total_height(), 0.0);
    assert_eq!(cache.row_index_at_offset(0.0), None);
    assert_eq!(cache.row_index_at_offset(500.0), None);
    assert!(cache.is_empty());
}

#[test]
fn test_rebuild_to_empty() {
    let mut cache = uniform_cache(50, 30.0);
    cache.rebuild(std::iter::empty()).unwrap();

    assert!(cache.is_empty());
    assert_eq!(cache.total_height(), 0.0);
    assert_eq!(cache.row_index_at_offset(10.0), None);
}

#[test]
fn test_index_mutations_reject_out_of_range() {
    let mut cache = uniform_cache(10, 30.0);

    assert_eq!(
        cache.update(10, 5.0),
        Err(VgridError::OutOfRange { index: 10, len: 10 })
    );
    assert_eq!(
        cache.height_through(10),
        Err(VgridError::OutOfRange { index: 10, len: 10 })
    );
    assert!(cache.offset_of(11).is_err());
    // The fence offset one past the end is the total height
    assert_eq!(cache.offset_of(10).unwrap(), 300.0);
}

#[test]
fn test_negative_heights_rejected() {
    let mut cache = RowHeightCache::new();
    assert!(matches!(
        cache.rebuild([10.0, -0.5]),
        Err(VgridError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        cache.rebuild([10.0, f32::INFINITY]),
        Err(VgridError::InvalidConfiguration(_))
    ));
}
