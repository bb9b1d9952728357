//! Personal-best submission policy.
//!
//! Storage is external. [`RunStore`] is the narrow interface this module
//! needs; [`submit_run`] decodes, validates and compares a submitted
//! replay against the player's current best before anything is written.

use polyburn_core::{FormatError, RunStats, SimulationFactory};
use thiserror::Error;
use tracing::info;

use crate::codec::{decode, encode};
use crate::hash::replay_fingerprint;
use crate::validate::{validate, Validation, ValidationRejected};

/// Opaque player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u64);

/// Identifies one leaderboard: a world played under a gamemode.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RunKey {
    /// World name.
    pub world: String,
    /// Gamemode name.
    pub gamemode: String,
}

impl RunKey {
    /// Create a key.
    pub fn new(world: impl Into<String>, gamemode: impl Into<String>) -> Self {
        Self {
            world: world.into(),
            gamemode: gamemode.into(),
        }
    }
}

/// A validated run as persisted by a [`RunStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredRun {
    /// Authoritative statistics from re-simulation.
    pub stats: RunStats,
    /// [`replay_fingerprint`] of the frames.
    pub fingerprint: u64,
    /// Canonical encoding of the frames.
    pub replay: Vec<u8>,
}

/// Storage for personal bests, one entry per player per [`RunKey`].
pub trait RunStore {
    /// Storage failure.
    type Error: std::error::Error + 'static;

    /// The player's stored run for `key`, if any.
    fn personal_best(
        &self,
        key: &RunKey,
        player: PlayerId,
    ) -> Result<Option<StoredRun>, Self::Error>;

    /// 1 + the number of stored runs for `key` with strictly fewer ticks.
    fn rank_for_ticks(&self, key: &RunKey, ticks: u64) -> Result<u32, Self::Error>;

    /// Insert or replace the player's run for `key`.
    fn upsert(
        &mut self,
        key: &RunKey,
        player: PlayerId,
        run: StoredRun,
    ) -> Result<(), Self::Error>;
}

/// A submission could not be processed.
///
/// An unfinished run is not an error; it is [`Submission::Rejected`].
#[derive(Debug, Error)]
pub enum SubmitError<E: std::error::Error + 'static> {
    /// The replay bytes are corrupt.
    #[error("replay could not be decoded")]
    Format(#[from] FormatError),
    /// The run store failed.
    #[error("run store failed")]
    Store(#[source] E),
}

/// Result of a processed submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The replay never finished its course. Nothing was stored.
    Rejected(ValidationRejected),
    /// The run is the player's new personal best and was stored.
    Improved {
        /// Statistics of the submitted run.
        stats: RunStats,
        /// The replaced personal best, if there was one.
        previous_best: Option<RunStats>,
        /// Leaderboard rank of the new run.
        rank: u32,
    },
    /// The run finished but did not beat the stored best.
    NoImprovement {
        /// Statistics of the submitted run.
        stats: RunStats,
        /// The player's standing personal best.
        best: RunStats,
        /// Leaderboard rank of that best.
        rank_of_best: u32,
    },
}

/// Whether `candidate` should replace `best`.
///
/// Fewer ticks wins, then fewer deaths. A tie replaces the stored run.
pub fn is_improvement(candidate: &RunStats, best: &RunStats) -> bool {
    candidate.ranking_key() <= best.ranking_key()
}

/// Decode, validate and record a submitted replay.
///
/// # Errors
///
/// [`SubmitError::Format`] if `bytes` do not decode, and
/// [`SubmitError::Store`] if the store fails. A run that decodes but does
/// not finish is `Ok(Submission::Rejected(_))`.
pub fn submit_run<S, F>(
    store: &mut S,
    key: &RunKey,
    player: PlayerId,
    bytes: &[u8],
    factory: &F,
) -> Result<Submission, SubmitError<S::Error>>
where
    S: RunStore,
    F: SimulationFactory,
{
    let frames = decode(bytes)?;

    let stats = match validate(&frames, factory) {
        Validation::Accepted(stats) => stats,
        Validation::Rejected(rejected) => {
            info!(
                world = %key.world,
                gamemode = %key.gamemode,
                player = player.0,
                ticks = rejected.stats.ticks,
                "submission rejected: run not finished"
            );
            return Ok(Submission::Rejected(rejected));
        }
    };

    let previous = store
        .personal_best(key, player)
        .map_err(SubmitError::Store)?
        .map(|run| run.stats);

    if let Some(best) = previous.filter(|best| !is_improvement(&stats, best)) {
        let rank_of_best = store
            .rank_for_ticks(key, best.ticks)
            .map_err(SubmitError::Store)?;
        info!(
            world = %key.world,
            gamemode = %key.gamemode,
            player = player.0,
            ticks = stats.ticks,
            best_ticks = best.ticks,
            "submission kept previous best"
        );
        return Ok(Submission::NoImprovement {
            stats,
            best,
            rank_of_best,
        });
    }

    let run = StoredRun {
        stats,
        fingerprint: replay_fingerprint(&frames),
        replay: encode(&frames),
    };
    store.upsert(key, player, run).map_err(SubmitError::Store)?;
    let rank = store
        .rank_for_ticks(key, stats.ticks)
        .map_err(SubmitError::Store)?;

    info!(
        world = %key.world,
        gamemode = %key.gamemode,
        player = player.0,
        ticks = stats.ticks,
        deaths = stats.deaths,
        rank,
        "new personal best"
    );
    Ok(Submission::Improved {
        stats,
        previous_best: previous,
        rank,
    })
}
