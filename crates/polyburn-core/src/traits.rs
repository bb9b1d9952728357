//! Capability traits for the external physics simulation.
//!
//! The replay core never sees the physics engine directly. It drives and
//! samples it through [`Simulation`], which is small enough to be backed
//! by a fake in tests.

use crate::frame::{RunStats, TickInput};
use crate::geometry::Point2;

/// A steppable, deterministic platformer simulation.
///
/// Two instances built from the same world configuration and stepped with
/// the same sequence of [`TickInput`]s must reach bit-identical states.
/// Replays rely on this; the trait cannot enforce it.
pub trait Simulation {
    /// Advance the simulation by one tick.
    fn step(&mut self, input: TickInput);

    /// Current position of the player's rocket.
    fn position(&self) -> Point2;

    /// Current facing angle of the player's rocket.
    fn rotation(&self) -> f64;

    /// Tick count, death count and completion flag.
    fn run_stats(&self) -> RunStats;

    /// Total number of checkpoints captured since the simulation was built.
    ///
    /// Monotonically non-decreasing. Consumers detect "checkpoint reached"
    /// events by watching this counter with an
    /// [`EventCursor`](crate::EventCursor).
    fn checkpoints_reached(&self) -> u32;

    /// Whether the rocket is currently inside the next checkpoint's capture area.
    fn in_capture(&self) -> bool {
        false
    }
}

impl<S: Simulation + ?Sized> Simulation for Box<S> {
    fn step(&mut self, input: TickInput) {
        (**self).step(input)
    }

    fn position(&self) -> Point2 {
        (**self).position()
    }

    fn rotation(&self) -> f64 {
        (**self).rotation()
    }

    fn run_stats(&self) -> RunStats {
        (**self).run_stats()
    }

    fn checkpoints_reached(&self) -> u32 {
        (**self).checkpoints_reached()
    }

    fn in_capture(&self) -> bool {
        (**self).in_capture()
    }
}

/// Builds fresh, ready-to-step simulations for one world and gamemode.
///
/// Every call must return an instance in the same initial state. Any
/// `Fn() -> S` closure is a factory.
pub trait SimulationFactory {
    /// The simulation type produced.
    type Sim: Simulation;

    /// Construct a new simulation instance.
    fn create(&self) -> Self::Sim;
}

impl<F, S> SimulationFactory for F
where
    F: Fn() -> S,
    S: Simulation,
{
    type Sim = S;

    fn create(&self) -> S {
        self()
    }
}
