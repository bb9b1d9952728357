//! Ghost trails for visual playback of a recorded run.

use polyburn_core::{Frame, Point2, Simulation, SimulationFactory};
use polyburn_replay::replay_with;

/// Rocket state after one replayed tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GhostSample {
    /// Zero-based frame index.
    pub tick: u64,
    /// Rocket position after the tick.
    pub position: Point2,
    /// Rocket rotation after the tick.
    pub rotation: f64,
    /// Whether thrust was applied on the tick.
    pub thrust: bool,
}

/// Per-tick samples of a replayed run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GhostTrail {
    samples: Vec<GhostSample>,
}

impl GhostTrail {
    /// Replay `frames` and sample the rocket after every tick.
    pub fn record<F: SimulationFactory>(frames: &[Frame], factory: &F) -> Self {
        let mut samples = Vec::with_capacity(frames.len());
        replay_with(frames, factory, |sim, input| {
            samples.push(GhostSample {
                tick: samples.len() as u64,
                position: sim.position(),
                rotation: sim.rotation(),
                thrust: input.thrust,
            });
        });
        Self { samples }
    }

    /// The sample for `tick`, or the last one if the run was shorter.
    ///
    /// `None` only for an empty trail.
    pub fn sample(&self, tick: u64) -> Option<&GhostSample> {
        let index = usize::try_from(tick).unwrap_or(usize::MAX);
        self.samples.get(index).or_else(|| self.samples.last())
    }

    /// All samples in tick order.
    pub fn samples(&self) -> &[GhostSample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Positions in tick order, for drawing the trail as a polyline.
    pub fn positions(&self) -> impl Iterator<Item = Point2> + '_ {
        self.samples.iter().map(|s| s.position)
    }
}
