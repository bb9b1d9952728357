//! Per-tick reward for agents learning to fly a course.
//!
//! Combines a step cost, progress along a reference run, capture-area
//! bonuses and terminal rewards for death, timeout and checkpoint
//! captures. Weights come from [`RewardConfig`].

use polyburn_core::{ConfigError, EventCursor, Simulation};
use tracing::debug;

use crate::config::RewardConfig;
use crate::tracker::ReplayFollowTracker;

/// Reward for one tick and whether the episode is over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RewardStep {
    /// Scalar reward.
    pub reward: f64,
    /// The episode ended on this tick.
    pub done: bool,
}

impl RewardStep {
    fn new(reward: f64, done: bool) -> Self {
        Self { reward, done }
    }
}

/// Reward shaper that follows a reference run.
///
/// Computes, after every live tick:
/// - `timeout_reward`, done, once `max_steps` ticks have elapsed
/// - `death_reward`, done, if the rocket died this tick
/// - `checkpoint_reward` if a checkpoint was captured this tick; done
///   when that finished the course
/// - otherwise `step_cost + progress_weight * progress` plus the capture
///   bonus while inside a capture area
#[derive(Clone, Debug)]
pub struct FollowReward {
    tracker: ReplayFollowTracker,
    config: RewardConfig,
    steps: u64,
    deaths: EventCursor,
    checkpoints: EventCursor,
    in_capture_for: u32,
}

impl FollowReward {
    /// Start shaping rewards for an episode on `sim`.
    pub fn new<S: Simulation + ?Sized>(
        tracker: ReplayFollowTracker,
        config: RewardConfig,
        sim: &S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tracker,
            config,
            steps: 0,
            deaths: EventCursor::new(sim.run_stats().deaths),
            checkpoints: EventCursor::new(sim.checkpoints_reached()),
            in_capture_for: 0,
        })
    }

    /// Score the tick the caller just stepped `sim` through.
    pub fn next<S: Simulation + ?Sized>(&mut self, sim: &S) -> RewardStep {
        let cfg = &self.config;
        self.steps += 1;
        if self.steps >= cfg.max_steps {
            debug!(steps = self.steps, "episode timed out");
            return RewardStep::new(cfg.timeout_reward, true);
        }

        let mut reward = cfg.step_cost + cfg.progress_weight * self.tracker.step(sim);

        if self.deaths.advance(sim.run_stats().deaths) > 0 {
            debug!(steps = self.steps, "episode ended by death");
            return RewardStep::new(cfg.death_reward, true);
        }

        if sim.in_capture() {
            if self.in_capture_for < cfg.capture_bonus_ticks {
                reward += cfg.capture_bonus;
                self.in_capture_for += 1;
            } else {
                reward += cfg.in_capture_reward;
            }
        }

        if self.checkpoints.advance(sim.checkpoints_reached()) > 0 {
            self.in_capture_for = 0;
            let finished = sim.run_stats().finished;
            debug!(steps = self.steps, finished, "checkpoint captured");
            return RewardStep::new(cfg.checkpoint_reward, finished);
        }

        RewardStep::new(reward, false)
    }

    /// Ticks scored so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// The underlying follow tracker.
    pub fn tracker(&self) -> &ReplayFollowTracker {
        &self.tracker
    }

    /// Active configuration.
    pub fn config(&self) -> &RewardConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::ReferencePath;
    use polyburn_core::{Frame, Point2, RunStats, TickInput};
    use polyburn_replay::absolute_inputs;
    use polyburn_test_utils::{fixtures, ToySimulation};
    use std::sync::Arc;

    #[derive(Default)]
    struct Puppet {
        position: Point2,
        captured: u32,
        deaths: u32,
        finished: bool,
        in_capture: bool,
    }

    impl Simulation for Puppet {
        fn step(&mut self, _input: TickInput) {}
        fn position(&self) -> Point2 {
            self.position
        }
        fn rotation(&self) -> f64 {
            0.0
        }
        fn run_stats(&self) -> RunStats {
            RunStats {
                ticks: 0,
                deaths: self.deaths,
                finished: self.finished,
            }
        }
        fn checkpoints_reached(&self) -> u32 {
            self.captured
        }
        fn in_capture(&self) -> bool {
            self.in_capture
        }
    }

    fn shaper(puppet: &Puppet, config: RewardConfig) -> FollowReward {
        // Reference far away so progress is always zero.
        let far = vec![vec![Point2::new(1000.0, 1000.0)]];
        let reference = Arc::new(ReferencePath::from_positions(far));
        let tracker = ReplayFollowTracker::with_defaults(reference, puppet);
        FollowReward::new(tracker, config, puppet).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn idle_tick_costs_step_cost() {
        let puppet = Puppet::default();
        let mut r = shaper(&puppet, RewardConfig::default());
        let step = r.next(&puppet);
        assert!(close(step.reward, -0.01), "{step:?}");
        assert!(!step.done);
    }

    #[test]
    fn death_ends_episode() {
        let mut puppet = Puppet::default();
        let mut r = shaper(&puppet, RewardConfig::default());
        r.next(&puppet);
        puppet.deaths = 1;
        assert_eq!(r.next(&puppet), RewardStep::new(-0.5, true));
    }

    #[test]
    fn capture_bonus_tapers_after_four_ticks() {
        let mut puppet = Puppet::default();
        let mut r = shaper(&puppet, RewardConfig::default());
        puppet.in_capture = true;
        let rewards: Vec<f64> = (0..6).map(|_| r.next(&puppet).reward).collect();
        for reward in &rewards[..4] {
            assert!(close(*reward, -0.01 + 0.1), "{rewards:?}");
        }
        for reward in &rewards[4..] {
            assert!(close(*reward, -0.01 + 0.01), "{rewards:?}");
        }
    }

    #[test]
    fn checkpoint_rewards_and_resets_capture_counter() {
        let mut puppet = Puppet::default();
        let mut r = shaper(&puppet, RewardConfig::default());
        puppet.in_capture = true;
        for _ in 0..5 {
            r.next(&puppet);
        }
        puppet.captured = 1;
        assert_eq!(r.next(&puppet), RewardStep::new(1.0, false));

        // Bonus restarts for the next capture area.
        assert!(close(r.next(&puppet).reward, -0.01 + 0.1));
    }

    #[test]
    fn final_checkpoint_ends_episode() {
        let mut puppet = Puppet::default();
        let mut r = shaper(&puppet, RewardConfig::default());
        puppet.captured = 1;
        puppet.finished = true;
        assert_eq!(r.next(&puppet), RewardStep::new(1.0, true));
    }

    #[test]
    fn timeout_after_max_steps() {
        let puppet = Puppet::default();
        let config = RewardConfig {
            max_steps: 3,
            ..RewardConfig::default()
        };
        let mut r = shaper(&puppet, config);
        assert!(!r.next(&puppet).done);
        assert!(!r.next(&puppet).done);
        assert_eq!(r.next(&puppet), RewardStep::new(-1.0, true));
        assert_eq!(r.steps(), 3);
    }

    #[test]
    fn invalid_config_rejected() {
        let puppet = Puppet::default();
        let reference = Arc::new(ReferencePath::from_positions(vec![]));
        let tracker = ReplayFollowTracker::with_defaults(reference, &puppet);
        let config = RewardConfig {
            step_cost: f64::INFINITY,
            ..RewardConfig::default()
        };
        assert!(FollowReward::new(tracker, config, &puppet).is_err());
    }

    #[test]
    fn following_the_reference_beats_idling() {
        let frames = fixtures::straight_course_winning_frames();
        let reference = Arc::new(ReferencePath::record(&frames, &ToySimulation::straight_course));

        let episode = |inputs: Vec<TickInput>| {
            let mut sim = ToySimulation::straight_course();
            let tracker = ReplayFollowTracker::with_defaults(Arc::clone(&reference), &sim);
            let mut shaper = FollowReward::new(tracker, RewardConfig::default(), &sim).unwrap();
            let mut total = 0.0;
            for input in inputs {
                sim.step(input);
                let step = shaper.next(&sim);
                total += step.reward;
                if step.done {
                    break;
                }
            }
            total
        };

        let following = episode(absolute_inputs(&frames).collect());
        let idling = episode(absolute_inputs(&vec![Frame::IDLE; frames.len()]).collect());
        assert!(following > idling, "following {following}, idling {idling}");
        assert!(following > 1.0);
    }
}
