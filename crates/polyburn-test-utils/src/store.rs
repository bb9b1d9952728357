//! In-memory [`RunStore`].

use std::convert::Infallible;

use indexmap::IndexMap;
use polyburn_replay::{PlayerId, RunKey, RunStore, StoredRun};

/// Personal bests held in insertion order, one map per leaderboard.
#[derive(Clone, Debug, Default)]
pub struct MemoryRunStore {
    boards: IndexMap<RunKey, IndexMap<PlayerId, StoredRun>>,
}

impl MemoryRunStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of players with a stored run for `key`.
    pub fn len(&self, key: &RunKey) -> usize {
        self.boards.get(key).map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self, key: &RunKey) -> bool {
        self.len(key) == 0
    }

    /// Stored runs for `key`, fastest first.
    pub fn standings(&self, key: &RunKey) -> Vec<(PlayerId, &StoredRun)> {
        let mut runs: Vec<(PlayerId, &StoredRun)> = self
            .boards
            .get(key)
            .map(|board| board.iter().map(|(p, r)| (*p, r)).collect())
            .unwrap_or_default();
        runs.sort_by_key(|(_, run)| run.stats.ranking_key());
        runs
    }
}

impl RunStore for MemoryRunStore {
    type Error = Infallible;

    fn personal_best(
        &self,
        key: &RunKey,
        player: PlayerId,
    ) -> Result<Option<StoredRun>, Infallible> {
        Ok(self.boards.get(key).and_then(|b| b.get(&player)).cloned())
    }

    fn rank_for_ticks(&self, key: &RunKey, ticks: u64) -> Result<u32, Infallible> {
        let faster = self
            .boards
            .get(key)
            .map_or(0, |b| b.values().filter(|r| r.stats.ticks < ticks).count());
        Ok(1 + faster as u32)
    }

    fn upsert(
        &mut self,
        key: &RunKey,
        player: PlayerId,
        run: StoredRun,
    ) -> Result<(), Infallible> {
        self.boards.entry(key.clone()).or_default().insert(player, run);
        Ok(())
    }
}
