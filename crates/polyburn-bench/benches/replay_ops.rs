//! Criterion benchmarks for validation and reference following.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use polyburn_bench::{record_pilot, PilotProfile};
use polyburn_core::Simulation;
use polyburn_follow::{ReferencePath, ReplayFollowTracker};
use polyburn_replay::{absolute_inputs, encode, validate_encoded};
use polyburn_test_utils::ToySimulation;

const SESSION_TICKS: usize = 36_000;

/// Benchmark: decode and re-simulate a full session.
fn bench_validate_encoded(c: &mut Criterion) {
    let bytes = encode(&record_pilot(&PilotProfile::casual(SESSION_TICKS), 42));

    c.bench_function("validate_encoded_casual_36k", |b| {
        b.iter(|| {
            let outcome = validate_encoded(black_box(&bytes), &ToySimulation::dogleg_course);
            black_box(outcome.unwrap());
        });
    });
}

/// Benchmark: preprocess a reference run into segments.
fn bench_reference_record(c: &mut Criterion) {
    let frames = record_pilot(&PilotProfile::casual(SESSION_TICKS), 42);

    c.bench_function("reference_path_record_36k", |b| {
        b.iter(|| black_box(ReferencePath::record(&frames, &ToySimulation::dogleg_course)));
    });
}

/// Benchmark: follow a reference tick-for-tick with a live simulation.
fn bench_follow(c: &mut Criterion) {
    let frames = record_pilot(&PilotProfile::casual(SESSION_TICKS), 42);
    let reference = Arc::new(ReferencePath::record(&frames, &ToySimulation::dogleg_course));

    c.bench_function("follow_tracker_36k", |b| {
        b.iter(|| {
            let mut live = ToySimulation::dogleg_course();
            let mut tracker = ReplayFollowTracker::with_defaults(Arc::clone(&reference), &live);
            let mut total = 0.0;
            for input in absolute_inputs(&frames) {
                live.step(input);
                total += tracker.step(&live);
            }
            black_box(total);
        });
    });
}

criterion_group!(
    benches,
    bench_validate_encoded,
    bench_reference_record,
    bench_follow
);
criterion_main!(benches);
