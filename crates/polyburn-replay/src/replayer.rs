//! Deterministic re-simulation of a recorded frame sequence.
//!
//! Stored deltas are already half-precision values, so summing them in
//! `f64` reproduces the capture-time absolute rotation exactly. Nothing
//! here re-rounds.

use std::iter::FusedIterator;

use polyburn_core::{Frame, Simulation, SimulationFactory, TickInput};

/// Lazy per-tick absolute inputs reconstructed from frames.
///
/// Finite and restartable: clone it, or call [`absolute_inputs`] again.
#[derive(Clone, Debug)]
pub struct AbsoluteInputs<'a> {
    frames: std::slice::Iter<'a, Frame>,
    accumulated: f64,
}

impl Iterator for AbsoluteInputs<'_> {
    type Item = TickInput;

    fn next(&mut self) -> Option<TickInput> {
        let frame = self.frames.next()?;
        self.accumulated += frame.delta;
        Some(TickInput::new(self.accumulated, frame.thrust))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.frames.size_hint()
    }
}

impl ExactSizeIterator for AbsoluteInputs<'_> {}
impl FusedIterator for AbsoluteInputs<'_> {}

/// Turn frames into the absolute inputs the simulation was stepped with.
///
/// # Examples
///
/// ```
/// use polyburn_core::Frame;
/// use polyburn_replay::absolute_inputs;
///
/// let frames = [Frame::new(0.5, true), Frame::IDLE, Frame::new(-0.25, false)];
/// let rotations: Vec<f64> = absolute_inputs(&frames).map(|i| i.rotation).collect();
/// assert_eq!(rotations, vec![0.5, 0.5, 0.25]);
/// ```
pub fn absolute_inputs(frames: &[Frame]) -> AbsoluteInputs<'_> {
    AbsoluteInputs {
        frames: frames.iter(),
        accumulated: 0.0,
    }
}

/// Replay `frames` through a fresh simulation and return it in its final state.
pub fn replay<F: SimulationFactory>(frames: &[Frame], factory: &F) -> F::Sim {
    replay_with(frames, factory, |_, _| {})
}

/// Replay `frames`, calling `on_tick` after every step.
///
/// The observer sees the simulation after the step and the input that
/// was applied. It cannot step or mutate the simulation.
pub fn replay_with<F, O>(frames: &[Frame], factory: &F, mut on_tick: O) -> F::Sim
where
    F: SimulationFactory,
    O: FnMut(&F::Sim, TickInput),
{
    let mut sim = factory.create();
    for input in absolute_inputs(frames) {
        sim.step(input);
        on_tick(&sim, input);
    }
    sim
}
