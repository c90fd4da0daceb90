//! Criterion benchmarks for the derived-data pipeline.
//!
//! The Brent history is roughly 9 000 daily observations, and the pipeline
//! reruns on every range edit, so these sizes bracket the real workload.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use brentlab_core::{align_change_points, compute_stats, filter_by_range, DerivedView};
use brentlab_core::{ChangePoint, DateRange, PriceRecord, Snapshot};
use chrono::{Duration, NaiveDate};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_snapshot(n: usize) -> Snapshot {
    let base = NaiveDate::from_ymd_opt(1987, 5, 20).unwrap();
    let prices: Vec<PriceRecord> = (0..n)
        .map(|i| PriceRecord::new(base + Duration::days(i as i64), 60.0 + (i as f64 * 0.01).sin() * 25.0))
        .collect();
    let change_points = prices
        .iter()
        .step_by(n.max(1) / 12 + 1)
        .map(|p| ChangePoint {
            change_point: p.date,
            event_date: None,
            event_description: String::new(),
        })
        .collect();
    Snapshot {
        prices,
        change_points,
        events: Vec::new(),
    }
}

fn middle_range(snapshot: &Snapshot) -> DateRange {
    let n = snapshot.prices.len();
    DateRange::new(
        snapshot.prices.get(n / 4).map(|p| p.date),
        snapshot.prices.get(3 * n / 4).map(|p| p.date),
    )
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for n in [1_000usize, 9_000, 50_000] {
        let snapshot = make_snapshot(n);
        let range = middle_range(&snapshot);

        group.bench_with_input(BenchmarkId::new("filter_by_range", n), &snapshot, |b, s| {
            b.iter(|| filter_by_range(black_box(&s.prices), black_box(&range)))
        });

        let filtered = filter_by_range(&snapshot.prices, &range);
        group.bench_with_input(BenchmarkId::new("align_change_points", n), &filtered, |b, f| {
            b.iter(|| align_change_points(black_box(f), black_box(&snapshot.change_points)))
        });

        let values: Vec<f64> = filtered.iter().map(|r| r.price).collect();
        group.bench_with_input(BenchmarkId::new("compute_stats", n), &values, |b, v| {
            b.iter(|| compute_stats(black_box(v)))
        });

        group.bench_with_input(BenchmarkId::new("derived_view", n), &snapshot, |b, s| {
            b.iter(|| DerivedView::compute(black_box(s), black_box(range)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
