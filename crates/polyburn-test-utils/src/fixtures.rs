//! Reusable frame sequences for the [`ToySimulation`](crate::ToySimulation) courses.
//!
//! - [`straight_course_winning_frames`]: full thrust, finishes with no deaths.
//! - [`straight_course_frames_with_death`]: falls once, then finishes.
//! - [`dogleg_winning_frames`]: tilted thrust through the dogleg checkpoint.

use polyburn_core::Frame;
use polyburn_replay::FrameCapture;

/// Rotation that points the dogleg course's thrust at its checkpoint.
pub const DOGLEG_HEADING: f64 = 0.37;

/// Holding thrust at rotation zero for 60 ticks.
pub fn straight_course_winning_frames() -> Vec<Frame> {
    vec![Frame::new(0.0, true); 60]
}

/// 30 idle ticks (one fall to the floor), then 80 ticks of full thrust.
pub fn straight_course_frames_with_death() -> Vec<Frame> {
    let mut frames = vec![Frame::IDLE; 30];
    frames.extend(std::iter::repeat_n(Frame::new(0.0, true), 80));
    frames
}

/// Turn to [`DOGLEG_HEADING`] on the first tick and hold thrust.
pub fn dogleg_winning_frames() -> Vec<Frame> {
    let mut capture = FrameCapture::with_capacity(80);
    for _ in 0..80 {
        capture.capture_tick(DOGLEG_HEADING, true);
    }
    capture.into_frames()
}

/// Deterministic wobbling target rotations, for exercising the accumulator.
pub fn wobble_targets(ticks: usize) -> Vec<f64> {
    (0..ticks)
        .map(|t| {
            let t = t as f64;
            0.8 * (t * 0.05).sin() + 0.01 * (t * 1.3).cos()
        })
        .collect()
}
