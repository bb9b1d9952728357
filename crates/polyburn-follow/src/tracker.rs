//! Progress along a reference run.
//!
//! The tracker keeps a cursor into the current [`ReplaySegment`] and
//! advances it past every reference position within the follow radius of
//! the live rocket. Progress per tick is the fraction of the segment the
//! cursor moved over, so a live run that reproduces the reference
//! tick-for-tick collects exactly `1.0` per segment.
//!
//! [`ReplaySegment`]: crate::ReplaySegment

use std::sync::Arc;

use polyburn_core::{ConfigError, EventCursor, Point2, Simulation};
use tracing::{debug, trace};

use crate::config::TrackerConfig;
use crate::segments::ReferencePath;

/// Follows a live simulation along a [`ReferencePath`].
///
/// The reference is shared, so any number of trackers (one per live
/// episode) can follow the same pre-processed run.
#[derive(Clone, Debug)]
pub struct ReplayFollowTracker {
    reference: Arc<ReferencePath>,
    config: TrackerConfig,
    checkpoints: EventCursor,
    segment: usize,
    index: usize,
}

impl ReplayFollowTracker {
    /// Start following `reference` from the beginning.
    ///
    /// Checkpoints `sim` has already captured are not counted.
    pub fn new<S: Simulation + ?Sized>(
        reference: Arc<ReferencePath>,
        config: TrackerConfig,
        sim: &S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            reference,
            config,
            checkpoints: EventCursor::new(sim.checkpoints_reached()),
            segment: 0,
            index: 0,
        })
    }

    /// Start following with [`TrackerConfig::default`].
    pub fn with_defaults<S: Simulation + ?Sized>(reference: Arc<ReferencePath>, sim: &S) -> Self {
        Self {
            reference,
            config: TrackerConfig::default(),
            checkpoints: EventCursor::new(sim.checkpoints_reached()),
            segment: 0,
            index: 0,
        }
    }

    /// Rewind to the start of the reference for a new episode on `sim`.
    pub fn reset<S: Simulation + ?Sized>(&mut self, sim: &S) {
        self.checkpoints = EventCursor::new(sim.checkpoints_reached());
        self.segment = 0;
        self.index = 0;
    }

    /// Advance after the live simulation has stepped; returns progress in `[0, 1]`.
    ///
    /// Call once per live tick. Returns `0.0` when the live rocket is not
    /// near the next reference position, when the current segment is used
    /// up, or when the live run has captured more checkpoints than the
    /// reference.
    pub fn step<S: Simulation + ?Sized>(&mut self, sim: &S) -> f64 {
        let captured = self.checkpoints.advance(sim.checkpoints_reached());
        if captured > 0 {
            self.segment += captured as usize;
            self.index = 0;
            debug!(segment = self.segment, "follow tracker entered next segment");
        }

        let Some(segment) = self.reference.segment(self.segment) else {
            return 0.0;
        };
        let positions = segment.positions();
        if self.index >= positions.len() {
            return 0.0;
        }

        let live = sim.position();
        let radius = self.config.follow_radius;
        let before = self.index;
        // The segment's last position is consumed too.
        while self.index < positions.len() && positions[self.index].distance(live) <= radius {
            self.index += 1;
        }

        let advanced = self.index - before;
        trace!(segment = self.segment, index = self.index, advanced, "follow step");
        advanced as f64 / positions.len() as f64
    }

    /// The reference position the live rocket should head for next.
    ///
    /// Clamps to the segment's last position once the cursor has passed
    /// it, and to the run's last position past the final segment. `None`
    /// only when the reference holds no positions at all.
    pub fn current_target(&self) -> Option<Point2> {
        match self.reference.segment(self.segment) {
            Some(segment) if !segment.is_empty() => segment
                .positions()
                .get(self.index)
                .copied()
                .or_else(|| segment.last()),
            _ => self.reference.last_position(),
        }
    }

    /// Index of the segment being followed.
    pub fn segment_index(&self) -> usize {
        self.segment
    }

    /// Cursor within the current segment.
    pub fn position_index(&self) -> usize {
        self.index
    }

    /// The reference being followed.
    pub fn reference(&self) -> &Arc<ReferencePath> {
        &self.reference
    }

    /// Active configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyburn_core::{RunStats, TickInput};
    use polyburn_replay::absolute_inputs;
    use polyburn_test_utils::{fixtures, ToySimulation};
    use proptest::prelude::*;

    /// A simulation whose position and capture count are set directly.
    #[derive(Default)]
    struct Puppet {
        position: Point2,
        captured: u32,
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
            RunStats::default()
        }
        fn checkpoints_reached(&self) -> u32 {
            self.captured
        }
    }

    fn line(n: usize, spacing: f64) -> Vec<Point2> {
        (0..n).map(|i| Point2::new(i as f64 * spacing, 0.0)).collect()
    }

    fn tracker(segments: Vec<Vec<Point2>>, puppet: &Puppet) -> ReplayFollowTracker {
        let reference = Arc::new(ReferencePath::from_positions(segments));
        ReplayFollowTracker::with_defaults(reference, puppet)
    }

    #[test]
    fn advances_past_everything_within_radius() {
        let mut puppet = Puppet::default();
        let mut t = tracker(vec![line(10, 5.0)], &puppet);

        // At x=0: positions 0 and 5 are within 8, 10 is not.
        assert_eq!(t.step(&puppet), 2.0 / 10.0);
        assert_eq!(t.position_index(), 2);
        assert_eq!(t.current_target(), Some(Point2::new(10.0, 0.0)));

        puppet.position = Point2::new(12.0, 0.0);
        // 10 and 15 within 8 of x=12; 20 is exactly 8 away and counts.
        assert_eq!(t.step(&puppet), 3.0 / 10.0);
        assert_eq!(t.position_index(), 5);
    }

    #[test]
    fn far_from_reference_makes_no_progress() {
        let puppet = Puppet {
            position: Point2::new(0.0, 100.0),
            captured: 0,
        };
        let mut t = tracker(vec![line(10, 1.0)], &puppet);
        for _ in 0..5 {
            assert_eq!(t.step(&puppet), 0.0);
        }
        assert_eq!(t.current_target(), Some(Point2::ZERO));
    }

    #[test]
    fn exhausted_segment_returns_zero_and_clamps_target() {
        let puppet = Puppet::default();
        let mut t = tracker(vec![line(3, 1.0)], &puppet);
        assert_eq!(t.step(&puppet), 1.0);
        assert_eq!(t.step(&puppet), 0.0);
        assert_eq!(t.current_target(), Some(Point2::new(2.0, 0.0)));
    }

    #[test]
    fn cursor_consumes_last_position_then_stalls() {
        let mut puppet = Puppet::default();
        let mut t = tracker(vec![line(6, 10.0)], &puppet);
        let mut total = 0.0;
        for x in [0.0, 10.0, 20.0, 30.0, 40.0] {
            puppet.position = Point2::new(x, 0.0);
            total += t.step(&puppet);
        }
        assert_eq!(t.position_index(), 5);

        // Reaching the final position moves the cursor to the segment end.
        puppet.position = Point2::new(50.0, 0.0);
        total += t.step(&puppet);
        assert_eq!(t.position_index(), 6);
        assert!((total - 1.0).abs() < 1e-12, "{total}");

        assert_eq!(t.step(&puppet), 0.0);
        assert_eq!(t.position_index(), 6);
        assert_eq!(t.current_target(), Some(Point2::new(50.0, 0.0)));
    }

    #[test]
    fn checkpoint_moves_to_next_segment() {
        let mut puppet = Puppet::default();
        let second = vec![Point2::new(50.0, 0.0), Point2::new(51.0, 0.0)];
        let mut t = tracker(vec![line(4, 1.0), second], &puppet);

        t.step(&puppet);
        puppet.captured = 1;
        puppet.position = Point2::new(50.0, 0.0);
        assert_eq!(t.step(&puppet), 1.0);
        assert_eq!(t.segment_index(), 1);
    }

    #[test]
    fn running_past_the_reference_clamps_to_last_position() {
        let mut puppet = Puppet::default();
        let mut t = tracker(vec![line(2, 1.0), vec![Point2::new(9.0, 9.0)]], &puppet);
        puppet.captured = 5;
        assert_eq!(t.step(&puppet), 0.0);
        assert_eq!(t.segment_index(), 5);
        assert_eq!(t.current_target(), Some(Point2::new(9.0, 9.0)));
    }

    #[test]
    fn empty_reference_has_no_target() {
        let puppet = Puppet::default();
        let mut t = tracker(vec![], &puppet);
        assert_eq!(t.step(&puppet), 0.0);
        assert_eq!(t.current_target(), None);
    }

    #[test]
    fn already_captured_checkpoints_are_ignored() {
        let puppet = Puppet {
            position: Point2::ZERO,
            captured: 3,
        };
        let mut t = tracker(vec![line(4, 1.0), line(4, 1.0)], &puppet);
        t.step(&puppet);
        assert_eq!(t.segment_index(), 0);
    }

    #[test]
    fn reset_rewinds() {
        let puppet = Puppet::default();
        let mut t = tracker(vec![line(4, 1.0)], &puppet);
        t.step(&puppet);
        t.reset(&puppet);
        assert_eq!((t.segment_index(), t.position_index()), (0, 0));
    }

    #[test]
    fn invalid_config_rejected() {
        let puppet = Puppet::default();
        let reference = Arc::new(ReferencePath::from_positions(vec![line(2, 1.0)]));
        let result = ReplayFollowTracker::new(
            reference,
            TrackerConfig {
                follow_radius: -1.0,
            },
            &puppet,
        );
        assert!(matches!(result, Err(ConfigError::InvalidRadius { .. })));
    }

    /// Step a live copy of the reference run tick-for-tick, collecting
    /// progress per segment.
    fn follow_exactly(frames: &[polyburn_core::Frame]) -> (Arc<ReferencePath>, Vec<f64>) {
        let reference = Arc::new(ReferencePath::record(frames, &ToySimulation::dogleg_course));
        let mut live = ToySimulation::dogleg_course();
        let mut t = ReplayFollowTracker::with_defaults(Arc::clone(&reference), &live);
        let mut per_segment = vec![0.0; reference.segment_count()];
        for input in absolute_inputs(frames) {
            live.step(input);
            let progress = t.step(&live);
            per_segment[t.segment_index()] += progress;
        }
        (reference, per_segment)
    }

    #[test]
    fn exact_replay_collects_one_per_segment() {
        let frames = fixtures::dogleg_winning_frames();
        let (reference, per_segment) = follow_exactly(&frames);
        assert_eq!(reference.segment_count(), 2);
        for (k, total) in per_segment.iter().enumerate() {
            assert!((total - 1.0).abs() < 1e-9, "segment {k}: {total}");
        }
    }

    #[test]
    fn straight_course_segments_each_sum_to_one() {
        let frames = fixtures::straight_course_frames_with_death();
        let reference = Arc::new(ReferencePath::record(&frames, &ToySimulation::straight_course));
        let mut live = ToySimulation::straight_course();
        let mut t = ReplayFollowTracker::with_defaults(Arc::clone(&reference), &live);
        let mut per_segment = vec![0.0; reference.segment_count()];
        for input in absolute_inputs(&frames) {
            live.step(input);
            let progress = t.step(&live);
            assert!((0.0..=1.0).contains(&progress));
            per_segment[t.segment_index()] += progress;
        }
        assert_eq!(per_segment.len(), 3);
        for total in per_segment {
            assert!((total - 1.0).abs() < 1e-9, "{total}");
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn exact_replay_of_any_run_sums_to_one(
            targets in prop::collection::vec(-1.5f64..1.5, 1..150),
            thrust_mask in any::<u64>(),
        ) {
            let mut capture = polyburn_replay::FrameCapture::new();
            for (tick, &target) in targets.iter().enumerate() {
                capture.capture_tick(target, (thrust_mask >> (tick % 64)) & 1 == 1);
            }
            let (reference, per_segment) = follow_exactly(capture.frames());
            for (k, total) in per_segment.iter().enumerate() {
                let len = reference.segment(k).map_or(0, |s| s.len());
                if len > 0 {
                    prop_assert!((total - 1.0).abs() < 1e-9, "segment {}: {}", k, total);
                }
            }
        }
    }
}
