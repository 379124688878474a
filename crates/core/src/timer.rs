use std::time::Instant;

/// Identity of one scheduled deadline. A slot only honors its current
/// generation, so a superseded timer can never fire late and clear state
/// that a newer event owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// One owned timer: a monotonically increasing generation plus an optional
/// deadline. `fire` reports true at most once per scheduled generation.
#[derive(Debug, Default)]
pub struct TimerSlot {
    generation: u64,
    deadline: Option<Instant>,
}

impl TimerSlot {
    /// Schedule a new deadline, superseding any pending one.
    pub fn schedule(&mut self, deadline: Instant) -> Generation {
        self.generation += 1;
        self.deadline = Some(deadline);
        Generation(self.generation)
    }

    /// Drop the pending deadline without firing it.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.deadline = None;
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Whether a generation obtained from `schedule` is still the live one.
    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.generation
    }

    /// True exactly once, when the pending deadline has elapsed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn fires_once_after_the_deadline() {
        let start = Instant::now();
        let mut slot = TimerSlot::default();
        slot.schedule(start + Duration::from_millis(100));
        assert!(!slot.fire(start));
        assert!(!slot.fire(start + Duration::from_millis(99)));
        assert!(slot.fire(start + Duration::from_millis(100)));
        assert!(!slot.fire(start + Duration::from_millis(200)));
    }

    #[test]
    fn rescheduling_supersedes_the_earlier_deadline() {
        let start = Instant::now();
        let mut slot = TimerSlot::default();
        let first = slot.schedule(start + Duration::from_millis(100));
        let second = slot.schedule(start + Duration::from_millis(300));
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));
        // The first deadline passing must not fire the superseded timer.
        assert!(!slot.fire(start + Duration::from_millis(150)));
        assert!(slot.fire(start + Duration::from_millis(300)));
    }

    #[test]
    fn cancel_clears_without_firing() {
        let start = Instant::now();
        let mut slot = TimerSlot::default();
        let generation = slot.schedule(start + Duration::from_millis(50));
        slot.cancel();
        assert!(!slot.pending());
        assert!(!slot.is_current(generation));
        assert!(!slot.fire(start + Duration::from_millis(60)));
    }
}
