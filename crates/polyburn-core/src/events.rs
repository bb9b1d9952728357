//! Per-consumer cursors over monotonic simulation event counters.

/// Tracks how many events of one kind a single consumer has already seen.
///
/// Simulations expose checkpoint captures and deaths as cumulative
/// counters. Each consumer (the follow tracker, the reward shaper, a
/// preprocessing observer) owns its own cursor, so draining events in one
/// place never hides them from another.
///
/// # Examples
///
/// ```
/// use polyburn_core::EventCursor;
///
/// let mut cursor = EventCursor::new(0);
/// assert_eq!(cursor.advance(2), 2);
/// assert_eq!(cursor.advance(2), 0);
/// assert_eq!(cursor.advance(3), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventCursor {
    seen: u32,
}

impl EventCursor {
    /// Start a cursor that treats `current` events as already consumed.
    pub const fn new(current: u32) -> Self {
        Self { seen: current }
    }

    /// Consume events up to `current`, returning how many are new.
    ///
    /// A counter that moved backwards (a different simulation instance)
    /// reports zero new events and re-bases the cursor.
    pub fn advance(&mut self, current: u32) -> u32 {
        let fresh = current.saturating_sub(self.seen);
        self.seen = current;
        fresh
    }

    /// Number of events consumed so far.
    pub fn seen(&self) -> u32 {
        self.seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_from_current_count() {
        let mut cursor = EventCursor::new(5);
        assert_eq!(cursor.advance(5), 0);
        assert_eq!(cursor.advance(7), 2);
        assert_eq!(cursor.seen(), 7);
    }

    #[test]
    fn backwards_counter_reports_nothing() {
        let mut cursor = EventCursor::new(4);
        assert_eq!(cursor.advance(1), 0);
        assert_eq!(cursor.advance(2), 1);
    }
}
