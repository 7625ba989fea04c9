//! Benchmarks for grid layout performance.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vgrid::columns::{flex_fill_widths, force_fill_widths};
use vgrid::heights::RowHeightCache;
use vgrid::types::ColumnDef;
use vgrid::window::virtual_window;

fn build_cache(rows: usize) -> RowHeightCache {
    let mut cache = RowHeightCache::new();
    cache
        .rebuild((0..rows).map(|i| if i % 10 == 0 { 130.0 } else { 30.0 }))
        .expect("valid heights");
    cache
}

/// Benchmark the full cache rebuild across row counts
fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_rebuild");

    for rows in [1_000usize, 10_000, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("rebuild", rows), &rows, |b, &rows| {
            let mut cache = RowHeightCache::new();
            b.iter(|| {
                cache
                    .rebuild((0..rows).map(|i| if i % 10 == 0 { 130.0 } else { 30.0 }))
                    .expect("valid heights");
                black_box(cache.total_height())
            })
        });
    }

    group.finish();
}

/// Benchmark the expansion-toggle point update on a 100k-row cache
fn bench_point_update(c: &mut Criterion) {
    let mut cache = build_cache(100_000);
    let mut toggled = false;

    c.bench_function("update_100k", |b| {
        b.iter(|| {
            let delta = if toggled { -100.0 } else { 100.0 };
            toggled = !toggled;
            cache.update(black_box(50_000), delta).expect("in range")
        })
    });
}

/// Benchmark the forward and inverse queries the scroll path issues per frame
fn bench_scroll_queries(c: &mut Criterion) {
    let cache = build_cache(100_000);
    let total = cache.total_height();

    c.bench_function("height_through_100k", |b| {
        b.iter(|| cache.height_through(black_box(99_999)).expect("in range"))
    });

    c.bench_function("row_index_at_offset_100k", |b| {
        let mut y = 0.0f32;
        b.iter(|| {
            y = (y + 333.0) % total;
            cache.row_index_at_offset(black_box(y))
        })
    });

    c.bench_function("virtual_window_100k", |b| {
        let mut y = 0.0f32;
        b.iter(|| {
            y = (y + 333.0) % total;
            virtual_window(&cache, black_box(y), 600.0)
        })
    });
}

/// Benchmark the column solvers on a wide grid
fn bench_solvers(c: &mut Criterion) {
    let columns: Vec<ColumnDef> = (0..50)
        .map(|i| {
            ColumnDef::with_width(format!("col{i}"), 100.0 + (i % 7) as f32 * 20.0)
                .bounded(Some(60.0), Some(400.0))
        })
        .collect();

    c.bench_function("force_fill_50_cols", |b| {
        b.iter(|| {
            let mut trial = columns.clone();
            force_fill_widths(&mut trial, black_box(9_000.0), None).expect("valid input")
        })
    });

    c.bench_function("flex_fill_50_cols", |b| {
        b.iter(|| {
            let mut trial = columns.clone();
            flex_fill_widths(&mut trial, black_box(9_000.0)).expect("valid input")
        })
    });
}

criterion_group!(
    benches,
    bench_rebuild,
    bench_point_update,
    bench_scroll_queries,
    bench_solvers,
);

criterion_main!(benches);
