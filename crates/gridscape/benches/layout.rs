mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use glam::Vec2;
use gridscape::prelude::{run_layout, LayoutConfig, LayoutParams, Pool};

fn bench_run(c: &mut Criterion, name: &str, slots: usize, viewport: Vec2, signal: f64) {
    let config = LayoutConfig::new();
    let params = LayoutParams::new(signal, viewport);

    // Preview a run to set throughput in "slots per iteration".
    let mut preview = Pool::new();
    preview.resize(slots);
    let preview_result = run_layout(&mut preview, &params, &config, None, None);

    let mut group = c.benchmark_group(name);
    group.throughput(common::slots_throughput(preview_result.slots_total));

    group.bench_function("cold", |b| {
        b.iter_batched(
            || {
                let mut pool = Pool::new();
                pool.resize(slots);
                pool
            },
            |mut pool| {
                let result = run_layout(&mut pool, &params, &config, None, None);
                black_box(result.placed);
                black_box(result.items.len());
            },
            BatchSize::SmallInput,
        );
    });

    // Warm reruns hit the minimal-churn path: the pool already matches the
    // targets, so only shape planning and placement do real work.
    group.bench_function("warm", |b| {
        b.iter_batched(
            || preview.clone(),
            |mut pool| {
                let result = run_layout(&mut pool, &params, &config, None, None);
                black_box(result.placed);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn layout_benches(c: &mut Criterion) {
    bench_run(c, "layout/small/12", 12, Vec2::new(480.0, 640.0), 0.2);
    bench_run(c, "layout/medium/24", 24, Vec2::new(800.0, 600.0), 0.5);
    bench_run(c, "layout/large/48", 48, Vec2::new(1440.0, 900.0), 0.5);
    bench_run(
        c,
        "layout/large/96_saturated",
        96,
        Vec2::new(1280.0, 800.0),
        0.8,
    );
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = layout_benches
}
criterion_main!(benches);
