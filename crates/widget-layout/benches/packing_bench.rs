//! Benchmarks for widget row packing and layout planning.
//!
//! Run with: `cargo bench --package widget-layout --bench packing_bench`
//!
//! Packing is quadratic in the widget count (each row rescans the waiting
//! queue). Dashboards hold tens of widgets, so the large inputs here exist
//! to catch accidental blowups rather than to model real pages.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use widget_layout::{LayoutCache, LayoutPlanner, WidgetPacker, WidgetSize, WidthTable};

// ============================================================================
// Test Data Generation
// ============================================================================

/// Deterministic mixed dashboard of `count` widgets.
fn mixed_widgets(count: usize) -> Vec<WidgetSize> {
    const PATTERN: [WidgetSize; 7] = [
        WidgetSize::Md,
        WidgetSize::Sm,
        WidgetSize::Lg,
        WidgetSize::Sm,
        WidgetSize::Md,
        WidgetSize::Xl,
        WidgetSize::Full,
    ];
    PATTERN.iter().copied().cycle().take(count).collect()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");
    let table = WidthTable::default();
    let packer = WidgetPacker::new(&table).gap(16);

    for count in [8, 32, 128, 512] {
        let widgets = mixed_widgets(count);
        group.bench_with_input(BenchmarkId::new("mixed", count), &widgets, |b, widgets| {
            b.iter(|| packer.pack(black_box(widgets), black_box(1360)))
        });
    }

    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    let planner = LayoutPlanner::default();
    let widgets = mixed_widgets(32);

    for width in [640.0, 1024.0, 1360.0, 1920.0] {
        group.bench_with_input(BenchmarkId::new("fresh", width), &width, |b, &width| {
            b.iter(|| planner.plan(black_box(&widgets), black_box(width)))
        });
    }

    group.bench_function("cached_resize_storm", |b| {
        let mut cache = LayoutCache::default();
        b.iter(|| {
            for width in (800u32..1920).step_by(40) {
                let _ = black_box(cache.plan(&widgets, f64::from(width)));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_pack, bench_plan);
criterion_main!(benches);
