#![allow(missing_docs, reason = "Unnecessary for benchmarks")]
#![allow(unused_results, reason = "Unnecessary for benchmarks")]
#![allow(clippy::missing_assert_message, reason = "Unnecessary for benchmarks")]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pprof::criterion::{Output, PProfProfiler};
use std::hint::black_box;
use sunrot_core::diff_rot::{FrameTime, diff_rot_many};
use sunrot_core::metaframes::{RotationParams, rotate};
use sunrot_core::prelude::*;

fn points(n: usize) -> Components {
    Components::from_points((0..n).map(|idx| {
        let frac = idx as f64 / n as f64;
        [frac * 6.0, (frac - 0.5) * 2.0, 1.0]
    }))
}

fn transform_bench(frame: &RotatedSunFrame<HeliographicStonyhurst>, target: &Helioprojective) {
    assert!(frame.transform_to(target).is_ok());
}

#[allow(clippy::missing_panics_doc, reason = "Benchmarking only")]
pub fn diff_rot_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("DiffRot");
    for n in [1_000, 100_000] {
        let lats: Vec<f64> = points(n).component(1).to_vec();
        let durations = [Duration::new(4.0)];
        group.bench_with_input(BenchmarkId::new("howard", n), &lats, |b, lats| {
            b.iter(|| {
                diff_rot_many(
                    black_box(&durations),
                    black_box(lats),
                    "howard",
                    FrameTime::Sidereal,
                )
                .unwrap()
            });
        });
    }

    let data = points(10_000);
    let params = RotationParams::new(Duration::new(4.0), "snodgrass");
    group.bench_function(BenchmarkId::new("rotate", 10_000), |b| {
        b.iter(|| rotate(black_box(&data), &params, &RotationParams::none()).unwrap());
    });
}

#[allow(clippy::missing_panics_doc, reason = "Benchmarking only")]
pub fn transform_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Transform");
    let obstime = Time::<UTC>::from_iso("2001-01-01").unwrap();
    let target = Helioprojective::new(Some(obstime), Observer::Earth);

    for n in [1, 1_000] {
        let frame = RotatedSunFrame::builder()
            .base(HeliographicStonyhurst::new(Some(obstime)))
            .components(points(n))
            .duration(Duration::new(4.0))
            .build()
            .unwrap();
        group.bench_with_input(BenchmarkId::new("hgs_to_hpc", n), &frame, |b, frame| {
            b.iter(|| transform_bench(black_box(frame), &target));
        });
    }
}

criterion_group!(name=rotation;
                config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
                targets=diff_rot_benchmark, transform_benchmark);
criterion_main!(rotation);
