//! Live input capture.
//!
//! [`FrameCapture`] turns the player's raw target rotation into the
//! quantized delta stream stored in a replay. The live simulation must be
//! stepped with the rotation `capture_tick` returns, not the raw target,
//! so that quantization error is baked identically into the live run and
//! every later replay. [`ReplayRecorder`] couples the two so callers
//! cannot get this wrong.

use polyburn_core::{Frame, Simulation, TickInput};
use tracing::debug;

use crate::codec::encode;
use crate::quantize::canonical_delta;

/// Per-session accumulator that records one [`Frame`] per tick.
///
/// Owned by the caller, one per live session.
///
/// # Examples
///
/// ```
/// use polyburn_replay::FrameCapture;
///
/// let mut capture = FrameCapture::new();
/// let applied = capture.capture_tick(0.1, true);
/// // 0.1 is not representable in half precision.
/// assert_eq!(applied, 0.0999755859375);
/// // Tiny wobble below the capture epsilon is recorded as no change.
/// assert_eq!(capture.capture_tick(0.10001, false), applied);
/// assert_eq!(capture.frames()[1].delta, 0.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FrameCapture {
    accumulated: f64,
    frames: Vec<Frame>,
}

impl FrameCapture {
    /// Start an empty session with accumulated rotation zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an empty session with room for `ticks` frames.
    pub fn with_capacity(ticks: usize) -> Self {
        Self {
            accumulated: 0.0,
            frames: Vec::with_capacity(ticks),
        }
    }

    /// Record one tick and return the rotation the live simulation must use.
    pub fn capture_tick(&mut self, target_rotation: f64, thrust: bool) -> f64 {
        let delta = canonical_delta(target_rotation - self.accumulated);
        self.accumulated += delta;
        self.frames.push(Frame::new(delta, thrust));
        self.accumulated
    }

    /// Quantized absolute rotation after the last captured tick.
    pub fn accumulated_rotation(&self) -> f64 {
        self.accumulated
    }

    /// Frames recorded so far, in tick order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of ticks recorded.
    pub fn tick_count(&self) -> usize {
        self.frames.len()
    }

    /// Discard the session log and zero the accumulator.
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
        self.frames.clear();
    }

    /// Encode the frames recorded so far.
    pub fn encode(&self) -> Vec<u8> {
        encode(&self.frames)
    }

    /// Consume the capture and return its frames.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

/// Drives a live simulation while recording its input.
///
/// Each [`record_tick`](ReplayRecorder::record_tick) captures the raw
/// input and steps the simulation with the quantized rotation. The
/// simulation is only reachable through `&` while recording, so nothing
/// else can step it out of band.
pub struct ReplayRecorder<S: Simulation> {
    capture: FrameCapture,
    sim: S,
}

impl<S: Simulation> ReplayRecorder<S> {
    /// Start recording a session on a freshly built simulation.
    pub fn new(sim: S) -> Self {
        Self {
            capture: FrameCapture::new(),
            sim,
        }
    }

    /// Capture one tick of raw input and step the simulation with it.
    ///
    /// Returns the input actually applied.
    pub fn record_tick(&mut self, target_rotation: f64, thrust: bool) -> TickInput {
        let rotation = self.capture.capture_tick(target_rotation, thrust);
        let input = TickInput::new(rotation, thrust);
        self.sim.step(input);
        input
    }

    /// The live simulation.
    pub fn simulation(&self) -> &S {
        &self.sim
    }

    /// The capture accumulator.
    pub fn capture(&self) -> &FrameCapture {
        &self.capture
    }

    /// Stop recording, returning the frame log and the simulation.
    pub fn finish(self) -> (Vec<Frame>, S) {
        let stats = self.sim.run_stats();
        debug!(
            ticks = self.capture.tick_count(),
            finished = stats.finished,
            deaths = stats.deaths,
            "recording finished"
        );
        (self.capture.into_frames(), self.sim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::quantize;
    use polyburn_test_utils::ToySimulation;

    #[test]
    fn first_tick_delta_is_quantized_target() {
        let mut capture = FrameCapture::new();
        let applied = capture.capture_tick(1.2345, false);
        assert_eq!(applied, quantize(1.2345));
        assert_eq!(capture.frames(), &[Frame::new(quantize(1.2345), false)]);
    }

    #[test]
    fn holding_rotation_records_zero_deltas() {
        let mut capture = FrameCapture::new();
        let first = capture.capture_tick(0.75, true);
        for _ in 0..10 {
            assert_eq!(capture.capture_tick(0.75, true), first);
        }
        assert!(capture.frames()[1..].iter().all(|f| f.delta == 0.0));
        assert_eq!(capture.tick_count(), 11);
    }

    #[test]
    fn accumulator_tracks_target_within_half_precision() {
        let mut capture = FrameCapture::new();
        for i in 0..500 {
            let target = (i as f64) * 0.013;
            let applied = capture.capture_tick(target, i % 3 == 0);
            // Each tick corrects toward the target, so drift never builds up.
            assert!(
                (applied - target).abs() < 0.01,
                "tick {i}: applied {applied}, target {target}"
            );
        }
    }

    #[test]
    fn reset_restarts_session() {
        let mut capture = FrameCapture::new();
        capture.capture_tick(2.0, true);
        capture.reset();
        assert_eq!(capture.accumulated_rotation(), 0.0);
        assert!(capture.frames().is_empty());
        assert_eq!(capture.capture_tick(0.5, false), 0.5);
    }

    #[test]
    fn recorder_steps_simulation_with_quantized_rotation() {
        let mut recorder = ReplayRecorder::new(ToySimulation::straight_course());
        let input = recorder.record_tick(0.1, true);
        assert_eq!(input.rotation, quantize(0.1));
        assert_eq!(recorder.simulation().rotation(), quantize(0.1));
        assert_eq!(recorder.simulation().run_stats().ticks, 1);

        let (frames, sim) = recorder.finish();
        assert_eq!(frames.len(), 1);
        assert_eq!(sim.run_stats().ticks, 1);
    }
}
