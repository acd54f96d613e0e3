//! Cancellable one-shot timer over a logical millisecond clock
//!
//! The reducer owns the clock (advanced by `Action::Tick`), so the timer is
//! plain data: scheduling replaces any pending deadline, and `fire` reports
//! the deadline exactly once when the clock has reached it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Debounce {
    delay_ms: u64,
    due_at: Option<u64>,
}

impl Debounce {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            due_at: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// (Re)arm the timer relative to `now`, superseding any pending deadline.
    pub fn schedule(&mut self, now: u64) {
        self.due_at = Some(now.saturating_add(self.delay_ms));
    }

    /// Drop the pending deadline. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.due_at.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.due_at.is_some()
    }

    pub fn due_at(&self) -> Option<u64> {
        self.due_at
    }

    /// Consume the deadline if the clock has reached it.
    pub fn fire(&mut self, now: u64) -> bool {
        match self.due_at {
            Some(due) if now >= due => {
                self.due_at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let mut timer = Debounce::new(220);
        timer.schedule(0);

        assert!(!timer.fire(219));
        assert!(timer.fire(220));
        assert!(!timer.fire(500));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_reschedule_supersedes_pending() {
        let mut timer = Debounce::new(220);
        timer.schedule(0);
        timer.schedule(100);
        timer.schedule(200);

        assert_eq!(timer.due_at(), Some(420));
        assert!(!timer.fire(400));
        assert!(timer.fire(420));
    }

    #[test]
    fn test_cancel() {
        let mut timer = Debounce::new(220);
        assert!(!timer.cancel());

        timer.schedule(10);
        assert!(timer.cancel());
        assert!(!timer.fire(1_000));
    }
}
