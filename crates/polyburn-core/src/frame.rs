//! Recorded frames, per-tick simulation input, and run statistics.

/// One tick's recorded input: a quantized rotation delta and a thrust flag.
///
/// `delta` is the change in facing angle since the previous tick. Frames
/// produced by the capture accumulator always hold a value that is exactly
/// representable as an IEEE-754 half-precision float, and any magnitude
/// below the capture epsilon is stored as exactly `0.0`.
///
/// # Examples
///
/// ```
/// use polyburn_core::Frame;
///
/// let frame = Frame::new(0.25, true);
/// assert_eq!(frame.delta, 0.25);
/// assert!(frame.thrust);
/// assert_eq!(Frame::IDLE, Frame::new(0.0, false));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Rotation change applied this tick.
    pub delta: f64,
    /// Whether thrust was active this tick.
    pub thrust: bool,
}

impl Frame {
    /// A frame with no rotation change and no thrust.
    pub const IDLE: Frame = Frame {
        delta: 0.0,
        thrust: false,
    };

    /// Create a frame.
    pub const fn new(delta: f64, thrust: bool) -> Self {
        Self { delta, thrust }
    }
}

/// The absolute input fed into one simulation step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickInput {
    /// Absolute facing angle.
    pub rotation: f64,
    /// Whether thrust is active.
    pub thrust: bool,
}

impl TickInput {
    /// Create a tick input.
    pub const fn new(rotation: f64, thrust: bool) -> Self {
        Self { rotation, thrust }
    }
}

/// Run statistics exposed by a simulation.
///
/// After a full replay these are the authoritative, recordable result of
/// the run, provided `finished` is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RunStats {
    /// Ticks simulated so far.
    pub ticks: u64,
    /// Times the player died and respawned.
    pub deaths: u32,
    /// Whether every checkpoint of the course has been captured.
    pub finished: bool,
}

impl RunStats {
    /// Leaderboard ordering key: fewer ticks first, then fewer deaths.
    pub fn ranking_key(&self) -> (u64, u32) {
        (self.ticks, self.deaths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_key_orders_by_ticks_then_deaths() {
        let fast = RunStats {
            ticks: 100,
            deaths: 5,
            finished: true,
        };
        let slow = RunStats {
            ticks: 101,
            deaths: 0,
            finished: true,
        };
        let fast_clean = RunStats {
            ticks: 100,
            deaths: 1,
            finished: true,
        };
        assert!(fast.ranking_key() < slow.ranking_key());
        assert!(fast_clean.ranking_key() < fast.ranking_key());
    }
}
