//! Reference runs split at checkpoint captures.

use polyburn_core::{EventCursor, Frame, Point2, Simulation, SimulationFactory};
use polyburn_replay::replay_with;
use tracing::debug;

/// Positions of the reference rocket between two checkpoint captures,
/// one per tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReplaySegment {
    positions: Vec<Point2>,
}

impl ReplaySegment {
    /// Wrap a list of per-tick positions.
    pub fn new(positions: Vec<Point2>) -> Self {
        Self { positions }
    }

    /// Per-tick positions in order.
    pub fn positions(&self) -> &[Point2] {
        &self.positions
    }

    /// Number of ticks in the segment.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the segment holds no positions.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Final position, if any.
    pub fn last(&self) -> Option<Point2> {
        self.positions.last().copied()
    }
}

/// A pre-processed reference run, ready to be followed.
///
/// Segment `k` holds the positions recorded after the `k`-th checkpoint
/// capture and up to the next one. The tick on which a checkpoint is
/// captured opens the new segment. Several captures on the same tick
/// leave empty segments in between.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferencePath {
    segments: Vec<ReplaySegment>,
}

impl ReferencePath {
    /// Replay `frames` once and split the rocket's positions into segments.
    pub fn record<F: SimulationFactory>(frames: &[Frame], factory: &F) -> Self {
        let mut segments = vec![Vec::new()];
        let mut captures = EventCursor::new(0);

        replay_with(frames, factory, |sim, _| {
            for _ in 0..captures.advance(sim.checkpoints_reached()) {
                segments.push(Vec::new());
            }
            if let Some(current) = segments.last_mut() {
                current.push(sim.position());
            }
        });

        let path = Self::from_positions(segments);
        debug!(
            ticks = path.tick_count(),
            segments = path.segment_count(),
            "reference path recorded"
        );
        path
    }

    /// Build from already split per-tick positions.
    ///
    /// An empty list is treated as a single empty segment.
    pub fn from_positions(segments: Vec<Vec<Point2>>) -> Self {
        let mut segments: Vec<ReplaySegment> =
            segments.into_iter().map(ReplaySegment::new).collect();
        if segments.is_empty() {
            segments.push(ReplaySegment::default());
        }
        Self { segments }
    }

    /// All segments in checkpoint order. Never empty.
    pub fn segments(&self) -> &[ReplaySegment] {
        &self.segments
    }

    /// Segment `index`, if the reference has that many.
    pub fn segment(&self, index: usize) -> Option<&ReplaySegment> {
        self.segments.get(index)
    }

    /// Number of segments, i.e. checkpoint captures plus one.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Total positions across all segments.
    pub fn tick_count(&self) -> usize {
        self.segments.iter().map(ReplaySegment::len).sum()
    }

    /// The last recorded position of the whole run.
    pub fn last_position(&self) -> Option<Point2> {
        self.segments.iter().rev().find_map(ReplaySegment::last)
    }
}
