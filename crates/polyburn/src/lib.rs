//! Polyburn: deterministic replays for a physics platformer.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Polyburn sub-crates. For most users, adding `polyburn` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use polyburn::prelude::*;
//!
//! // A rocket that drifts in its facing direction while thrusting and
//! // "finishes" once it has moved 3 units.
//! #[derive(Default)]
//! struct Drifter {
//!     pos: Point2,
//!     rotation: f64,
//!     ticks: u64,
//! }
//!
//! impl Simulation for Drifter {
//!     fn step(&mut self, input: TickInput) {
//!         self.ticks += 1;
//!         self.rotation = input.rotation;
//!         if input.thrust {
//!             self.pos = self.pos + Point2::new(input.rotation.cos(), input.rotation.sin());
//!         }
//!     }
//!     fn position(&self) -> Point2 { self.pos }
//!     fn rotation(&self) -> f64 { self.rotation }
//!     fn run_stats(&self) -> RunStats {
//!         RunStats { ticks: self.ticks, deaths: 0, finished: self.pos.length() >= 3.0 }
//!     }
//!     fn checkpoints_reached(&self) -> u32 { 0 }
//! }
//!
//! // Record a live session.
//! let mut recorder = ReplayRecorder::new(Drifter::default());
//! for tick in 0..5 {
//!     recorder.record_tick(0.0, tick >= 1);
//! }
//! let (frames, live) = recorder.finish();
//!
//! // Ship the bytes; anyone can re-simulate and check the result.
//! let bytes = encode(&frames);
//! let outcome = validate_encoded(&bytes, &Drifter::default).unwrap();
//! assert_eq!(outcome, Validation::Accepted(live.run_stats()));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `polyburn-core` | Frames, run statistics, points, errors, the `Simulation` trait |
//! | [`replay`] | `polyburn-replay` | Quantizer, capture, binary codec, replayer, validation, leaderboard policy |
//! | [`follow`] | `polyburn-follow` | Reference paths, follow tracker, ghost trails, reward shaping |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`polyburn-core`).
///
/// Contains [`types::Frame`], [`types::RunStats`], the error types, and
/// the [`types::Simulation`] capability trait the physics engine
/// implements.
pub use polyburn_core as types;

/// Capture, encoding and validation of replays (`polyburn-replay`).
///
/// Record with [`replay::FrameCapture`] or [`replay::ReplayRecorder`],
/// pack with [`replay::encode`], and check submissions with
/// [`replay::validate_encoded`] or [`replay::submit_run`].
pub use polyburn_replay as replay;

/// Following a recorded run from a live simulation (`polyburn-follow`).
///
/// Pre-process a reference with [`follow::ReferencePath::record`], then
/// measure live progress with [`follow::ReplayFollowTracker`].
pub use polyburn_follow as follow;

/// Common imports for typical Polyburn usage.
///
/// ```rust
/// use polyburn::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use polyburn_core::{
        EventCursor, Frame, Point2, RunStats, Simulation, SimulationFactory, TickInput,
    };

    // Errors
    pub use polyburn_core::{ConfigError, FormatError};

    // Replay
    pub use polyburn_replay::{
        decode, encode, replay, replay_with, submit_run, validate, validate_encoded, FrameCapture,
        ReplayRecorder, RunKey, RunStore, Submission, Validation,
    };

    // Follow
    pub use polyburn_follow::{
        FollowReward, GhostTrail, ReferencePath, ReplayFollowTracker, RewardConfig, TrackerConfig,
    };
}
