//! End-to-end replay example.
//!
//! Demonstrates: record a live session → encode → submit to a leaderboard
//! (decode + validate) → follow the stored run with a fresh rocket.
//!
//! Set `RUST_LOG=debug` to see encode statistics and validation logs.

use std::sync::Arc;

use polyburn_bench::{record_pilot, PilotProfile};
use polyburn_core::Simulation;
use polyburn_follow::{FollowReward, ReferencePath, ReplayFollowTracker, RewardConfig};
use polyburn_replay::{
    decode, encode_with_stats, submit_run, PlayerId, ReplayRecorder, RunKey, Submission,
};
use polyburn_test_utils::{fixtures, MemoryRunStore, ToySimulation};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Polyburn Replay Example ===\n");

    // --- Record a live session ---
    let mut recorder = ReplayRecorder::new(ToySimulation::dogleg_course());
    for _ in 0..80 {
        recorder.record_tick(fixtures::DOGLEG_HEADING, true);
    }
    let (frames, live) = recorder.finish();
    let (bytes, stats) = encode_with_stats(&frames);
    println!(
        "Recorded {} ticks → {} bytes ({} zero runs, {} nonzero deltas, {} thrust runs)",
        stats.frames,
        bytes.len(),
        stats.zero_runs,
        stats.nonzero_chunks,
        stats.thrust_runs,
    );
    println!("  live run: {:?}\n", live.run_stats());

    // --- Submit ---
    let mut store = MemoryRunStore::new();
    let key = RunKey::new("Dogleg", "Normal");
    let factory = ToySimulation::dogleg_course;
    match submit_run(&mut store, &key, PlayerId(1), &bytes, &factory) {
        Ok(Submission::Improved { stats, rank, .. }) => {
            println!("Accepted: {} ticks, {} deaths, rank {rank}", stats.ticks, stats.deaths);
        }
        Ok(other) => println!("Not stored: {other:?}"),
        Err(err) => println!("Corrupt replay: {err}"),
    }

    // A synthetic pilot flies aimlessly and never finishes.
    let wander = encode_with_stats(&record_pilot(&PilotProfile::casual(600), 42)).0;
    match submit_run(&mut store, &key, PlayerId(2), &wander, &factory) {
        Ok(Submission::Rejected(rejected)) => {
            println!("Rejected wandering pilot after {} ticks", rejected.stats.ticks);
        }
        Ok(other) => println!("Unexpected: {other:?}"),
        Err(err) => println!("Corrupt replay: {err}"),
    }

    // --- Follow the stored run ---
    let Some(stored) = store.standings(&key).first().map(|(_, run)| run.replay.clone()) else {
        println!("\nNo stored run to follow.");
        return;
    };
    let reference_frames = match decode(&stored) {
        Ok(frames) => frames,
        Err(err) => {
            println!("Stored run failed to decode: {err}");
            return;
        }
    };
    let reference = Arc::new(ReferencePath::record(&reference_frames, &factory));
    println!(
        "\nFollowing stored run: {} segments, {} ticks",
        reference.segment_count(),
        reference.tick_count()
    );

    let mut sim = ToySimulation::dogleg_course();
    let tracker = ReplayFollowTracker::with_defaults(Arc::clone(&reference), &sim);
    let mut reward = match FollowReward::new(tracker, RewardConfig::default(), &sim) {
        Ok(reward) => reward,
        Err(err) => {
            println!("Bad reward config: {err}");
            return;
        }
    };

    let mut total = 0.0;
    for input in polyburn_replay::absolute_inputs(&reference_frames) {
        sim.step(input);
        let step = reward.next(&sim);
        total += step.reward;
        if step.done {
            break;
        }
    }
    println!(
        "  episode: {} steps, total reward {total:.3}, ghost target {:?}",
        reward.steps(),
        reward.tracker().current_target(),
    );
}
