//! Following a recorded reference run from a live simulation.
//!
//! A reference replay is re-simulated once into a [`ReferencePath`]: the
//! rocket's per-tick positions, split into one [`ReplaySegment`] per
//! checkpoint interval. A [`ReplayFollowTracker`] then measures how far a
//! live rocket has progressed along the current segment, [`FollowReward`]
//! turns that into a per-tick training signal, and [`GhostTrail`] keeps
//! the full state of a replayed run for visual playback.
//!
//! Divergence from the reference is never an error; it only yields zero
//! progress.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod ghost;
pub mod reward;
pub mod segments;
pub mod tracker;

pub use config::{RewardConfig, TrackerConfig};
pub use ghost::{GhostSample, GhostTrail};
pub use reward::{FollowReward, RewardStep};
pub use segments::{ReferencePath, ReplaySegment};
pub use tracker::ReplayFollowTracker;
