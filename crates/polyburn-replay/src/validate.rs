//! Accept/reject policy for submitted replays.
//!
//! A replay that decodes cleanly but whose simulation never finishes the
//! course is a legitimate outcome, not an error. It is reported as
//! [`Validation::Rejected`], separate from the [`FormatError`] a corrupt
//! buffer produces.

use polyburn_core::{FormatError, Frame, RunStats, SimulationFactory, Simulation};
use tracing::{debug, warn};

use crate::codec::decode;
use crate::replayer::replay;

/// A replayed run that did not finish its course.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationRejected {
    /// Statistics the simulation reached when the frames ran out.
    pub stats: RunStats,
}

/// Outcome of re-simulating a replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validation {
    /// The run finished. These statistics are authoritative.
    Accepted(RunStats),
    /// The run never finished.
    Rejected(ValidationRejected),
}

impl Validation {
    /// Whether the run was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Statistics of the replayed run, accepted or not.
    pub fn stats(&self) -> RunStats {
        match self {
            Self::Accepted(stats) | Self::Rejected(ValidationRejected { stats }) => *stats,
        }
    }

    /// Convert into a `Result`, with rejection as the error.
    pub fn into_result(self) -> Result<RunStats, ValidationRejected> {
        match self {
            Self::Accepted(stats) => Ok(stats),
            Self::Rejected(rejected) => Err(rejected),
        }
    }
}

/// Replay `frames` on a fresh simulation and judge the result.
pub fn validate<F: SimulationFactory>(frames: &[Frame], factory: &F) -> Validation {
    let stats = replay(frames, factory).run_stats();
    if stats.finished {
        debug!(
            frames = frames.len(),
            ticks = stats.ticks,
            deaths = stats.deaths,
            "replay accepted"
        );
        Validation::Accepted(stats)
    } else {
        debug!(
            frames = frames.len(),
            ticks = stats.ticks,
            deaths = stats.deaths,
            "replay rejected: course not finished"
        );
        Validation::Rejected(ValidationRejected { stats })
    }
}

/// Decode `bytes` and validate the frames.
///
/// # Errors
///
/// Returns the [`FormatError`] from [`decode`] if the buffer is corrupt.
/// Unfinished runs are `Ok(Validation::Rejected(_))`.
pub fn validate_encoded<F: SimulationFactory>(
    bytes: &[u8],
    factory: &F,
) -> Result<Validation, FormatError> {
    let frames = decode(bytes).inspect_err(|err| {
        warn!(len = bytes.len(), %err, "replay failed to decode");
    })?;
    Ok(validate(&frames, factory))
}
