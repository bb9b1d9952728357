//! A deterministic stand-in for the physics engine.

use std::sync::Arc;

use polyburn_core::{Point2, RunStats, Simulation, TickInput};

/// A circular capture area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Checkpoint {
    pub center: Point2,
    pub radius: f64,
}

impl Checkpoint {
    pub const fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            center: Point2::new(x, y),
            radius,
        }
    }

    pub fn contains(&self, p: Point2) -> bool {
        self.center.distance(p) <= self.radius
    }
}

/// Static world description shared by every simulation built from it.
#[derive(Clone, Debug, PartialEq)]
pub struct Course {
    pub spawn: Point2,
    /// Falling below this height kills the rocket.
    pub floor: f64,
    pub gravity: f64,
    /// Acceleration along the facing direction while thrusting.
    pub thrust: f64,
    /// Velocity multiplier applied every tick.
    pub damping: f64,
    /// Consecutive ticks inside a checkpoint needed to capture it.
    pub capture_ticks: u32,
    /// Captured strictly in order.
    pub checkpoints: Vec<Checkpoint>,
}

impl Course {
    /// Two checkpoints straight above the spawn. Holding thrust at
    /// rotation zero captures both.
    pub fn straight() -> Self {
        Self {
            spawn: Point2::ZERO,
            floor: -5.0,
            gravity: 0.05,
            thrust: 0.15,
            damping: 0.9,
            capture_ticks: 3,
            checkpoints: vec![Checkpoint::new(0.0, 15.0, 3.0), Checkpoint::new(0.0, 30.0, 3.0)],
        }
    }

    /// One checkpoint up and to the left, reachable by thrusting while
    /// tilted.
    pub fn dogleg() -> Self {
        Self {
            checkpoints: vec![Checkpoint::new(-12.0, 20.0, 4.0)],
            ..Self::straight()
        }
    }
}

/// Point-mass rocket with gravity, damped velocity, thrust along its
/// facing direction, ordered checkpoints and a lethal floor.
///
/// Rotation `0` faces straight up; positive rotation turns left. Dying
/// respawns the rocket at rest on the last captured checkpoint (or the
/// spawn). Once every checkpoint is captured the simulation freezes:
/// further steps change nothing, including the tick count.
#[derive(Clone, Debug)]
pub struct ToySimulation {
    course: Arc<Course>,
    position: Point2,
    velocity: Point2,
    rotation: f64,
    respawn: Point2,
    ticks: u64,
    deaths: u32,
    captured: u32,
    inside_for: u32,
}

impl ToySimulation {
    pub fn new(course: Course) -> Self {
        Self::with_shared(Arc::new(course))
    }

    /// Build a simulation over a course shared with other instances.
    pub fn with_shared(course: Arc<Course>) -> Self {
        Self {
            position: course.spawn,
            velocity: Point2::ZERO,
            rotation: 0.0,
            respawn: course.spawn,
            ticks: 0,
            deaths: 0,
            captured: 0,
            inside_for: 0,
            course,
        }
    }

    /// A fresh simulation on [`Course::straight`].
    pub fn straight_course() -> Self {
        Self::new(Course::straight())
    }

    /// A fresh simulation on [`Course::dogleg`].
    pub fn dogleg_course() -> Self {
        Self::new(Course::dogleg())
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn velocity(&self) -> Point2 {
        self.velocity
    }

    fn finished(&self) -> bool {
        self.captured as usize >= self.course.checkpoints.len()
    }

    fn die(&mut self) {
        self.deaths += 1;
        self.position = self.respawn;
        self.velocity = Point2::ZERO;
        self.inside_for = 0;
    }
}

impl Simulation for ToySimulation {
    fn step(&mut self, input: TickInput) {
        if self.finished() {
            return;
        }
        self.ticks += 1;
        self.rotation = input.rotation;

        let mut accel = Point2::new(0.0, -self.course.gravity);
        if input.thrust {
            let heading = Point2::new(-input.rotation.sin(), input.rotation.cos());
            accel = accel + heading.scale(self.course.thrust);
        }
        self.velocity = self.velocity.scale(self.course.damping) + accel;
        self.position = self.position + self.velocity;

        if self.position.y < self.course.floor {
            self.die();
            return;
        }

        let Some(next) = self.course.checkpoints.get(self.captured as usize) else {
            return;
        };
        if next.contains(self.position) {
            self.inside_for += 1;
            if self.inside_for >= self.course.capture_ticks {
                self.captured += 1;
                self.inside_for = 0;
                self.respawn = next.center;
            }
        } else {
            self.inside_for = 0;
        }
    }

    fn position(&self) -> Point2 {
        self.position
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn run_stats(&self) -> RunStats {
        RunStats {
            ticks: self.ticks,
            deaths: self.deaths,
            finished: self.finished(),
        }
    }

    fn checkpoints_reached(&self) -> u32 {
        self.captured
    }

    fn in_capture(&self) -> bool {
        self.inside_for > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(sim: &mut ToySimulation, ticks: usize, input: TickInput) {
        for _ in 0..ticks {
            sim.step(input);
        }
    }

    #[test]
    fn idle_rocket_falls_and_dies() {
        let mut sim = ToySimulation::straight_course();
        run(&mut sim, 30, TickInput::new(0.0, false));
        let stats = sim.run_stats();
        assert_eq!(stats.ticks, 30);
        assert_eq!(stats.deaths, 1);
        assert!(!stats.finished);
    }

    #[test]
    fn full_thrust_captures_both_checkpoints_and_freezes() {
        let mut sim = ToySimulation::straight_course();
        run(&mut sim, 60, TickInput::new(0.0, true));
        let stats = sim.run_stats();
        assert!(stats.finished);
        assert_eq!(stats.deaths, 0);
        assert_eq!(sim.checkpoints_reached(), 2);

        let frozen = sim.position();
        run(&mut sim, 10, TickInput::new(1.0, true));
        assert_eq!(sim.position(), frozen);
        assert_eq!(sim.run_stats(), stats);
    }

    #[test]
    fn capture_needs_consecutive_ticks_inside() {
        let mut sim = ToySimulation::straight_course();
        let mut saw_in_capture = false;
        for _ in 0..30 {
            sim.step(TickInput::new(0.0, true));
            saw_in_capture |= sim.in_capture();
            if sim.checkpoints_reached() == 1 {
                break;
            }
        }
        assert!(saw_in_capture);
        assert_eq!(sim.checkpoints_reached(), 1);
        assert!(!sim.in_capture());
    }

    #[test]
    fn tilted_thrust_drifts_sideways() {
        let mut sim = ToySimulation::straight_course();
        run(&mut sim, 5, TickInput::new(0.5, true));
        assert!(sim.position().x < 0.0);
        assert_eq!(sim.rotation(), 0.5);
    }

    #[test]
    fn clones_stay_in_lockstep() {
        let mut a = ToySimulation::dogleg_course();
        let mut b = a.clone();
        for i in 0..50 {
            let input = TickInput::new(i as f64 * 0.01, i % 3 != 0);
            a.step(input);
            b.step(input);
        }
        assert_eq!(a.position(), b.position());
        assert_eq!(a.run_stats(), b.run_stats());
    }
}
