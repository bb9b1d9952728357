//! Tracker and reward configuration.

use polyburn_core::ConfigError;

// ── TrackerConfig ──────────────────────────────────────────────────

/// Configuration for [`ReplayFollowTracker`](crate::ReplayFollowTracker).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackerConfig {
    /// Reference positions within this distance of the live rocket count
    /// as reached. Default: 8.0.
    pub follow_radius: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { follow_radius: 8.0 }
    }
}

impl TrackerConfig {
    /// Check that the radius is finite and positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = self.follow_radius;
        if !r.is_finite() || r <= 0.0 {
            return Err(ConfigError::InvalidRadius { value: r });
        }
        Ok(())
    }
}

// ── RewardConfig ───────────────────────────────────────────────────

/// Shape of the per-tick reward produced by
/// [`FollowReward`](crate::FollowReward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RewardConfig {
    /// Added every tick. Default: -0.01.
    pub step_cost: f64,
    /// Episode length before a forced stop. Default: 10 000.
    pub max_steps: u64,
    /// Reward when `max_steps` is reached. Default: -1.0.
    pub timeout_reward: f64,
    /// Multiplier on tracker progress. Default: 0.5.
    pub progress_weight: f64,
    /// Reward on death; ends the episode. Default: -0.5.
    pub death_reward: f64,
    /// Bonus per tick for the first `capture_bonus_ticks` ticks inside a
    /// capture area. Default: 0.1.
    pub capture_bonus: f64,
    /// Default: 4.
    pub capture_bonus_ticks: u32,
    /// Bonus per tick inside a capture area after the initial ticks.
    /// Default: 0.01.
    pub in_capture_reward: f64,
    /// Reward for capturing a checkpoint. Default: 1.0.
    pub checkpoint_reward: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            step_cost: -0.01,
            max_steps: 10_000,
            timeout_reward: -1.0,
            progress_weight: 0.5,
            death_reward: -0.5,
            capture_bonus: 0.1,
            capture_bonus_ticks: 4,
            in_capture_reward: 0.01,
            checkpoint_reward: 1.0,
        }
    }
}

impl RewardConfig {
    /// Check that every weight is finite and the episode has at least one step.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == 0 {
            return Err(ConfigError::InvalidReward {
                reason: "max_steps must be at least 1".to_string(),
            });
        }
        let weights = [
            ("step_cost", self.step_cost),
            ("timeout_reward", self.timeout_reward),
            ("progress_weight", self.progress_weight),
            ("death_reward", self.death_reward),
            ("capture_bonus", self.capture_bonus),
            ("in_capture_reward", self.in_capture_reward),
            ("checkpoint_reward", self.checkpoint_reward),
        ];
        for (name, value) in weights {
            if !value.is_finite() {
                return Err(ConfigError::InvalidReward {
                    reason: format!("{name} must be finite, got {value}"),
                });
            }
        }
        Ok(())
    }
}
