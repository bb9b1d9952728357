//! Benchmark profiles and utilities for Polyburn replays.
//!
//! Provides seeded synthetic pilots that produce realistic frame logs:
//!
//! - [`PilotProfile::casual`]: long holds, gentle turns (mostly zero runs)
//! - [`PilotProfile::twitchy`]: constant small corrections (mostly nonzero deltas)
//! - [`record_pilot`]: run a profile through [`FrameCapture`] into frames

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use polyburn_core::Frame;
use polyburn_replay::FrameCapture;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Input habits of a synthetic pilot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PilotProfile {
    /// Session length in ticks.
    pub ticks: usize,
    /// Chance per tick of keeping the current target rotation.
    pub hold_probability: f64,
    /// Largest change of target rotation in one tick, in radians.
    pub turn_scale: f64,
    /// Chance per tick of toggling thrust.
    pub thrust_toggle_probability: f64,
}

impl PilotProfile {
    /// A relaxed pilot: holds most of the time, turns gently.
    pub fn casual(ticks: usize) -> Self {
        Self {
            ticks,
            hold_probability: 0.9,
            turn_scale: 0.05,
            thrust_toggle_probability: 0.02,
        }
    }

    /// A pilot who corrects rotation almost every tick.
    pub fn twitchy(ticks: usize) -> Self {
        Self {
            ticks,
            hold_probability: 0.1,
            turn_scale: 0.2,
            thrust_toggle_probability: 0.2,
        }
    }
}

/// Uniform `f64` in `[0, 1)` from the top 53 bits of a `u64`.
fn unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Raw `(target_rotation, thrust)` input for every tick of a session.
pub fn pilot_inputs(profile: &PilotProfile, seed: u64) -> Vec<(f64, bool)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut target = 0.0;
    let mut thrust = false;
    let mut inputs = Vec::with_capacity(profile.ticks);

    for _ in 0..profile.ticks {
        if unit(&mut rng) >= profile.hold_probability {
            target += (unit(&mut rng) * 2.0 - 1.0) * profile.turn_scale;
        }
        if unit(&mut rng) < profile.thrust_toggle_probability {
            thrust = !thrust;
        }
        inputs.push((target, thrust));
    }

    inputs
}

/// Capture a seeded pilot session into frames.
pub fn record_pilot(profile: &PilotProfile, seed: u64) -> Vec<Frame> {
    let mut capture = FrameCapture::with_capacity(profile.ticks);
    for (target, thrust) in pilot_inputs(profile, seed) {
        capture.capture_tick(target, thrust);
    }
    capture.into_frames()
}
