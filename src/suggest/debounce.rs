//! Restartable single-shot debounce timer.

use std::time::{Duration, Instant};

/// Default quiet period before a suggestion fetch fires.
pub const DEBOUNCE_DELAY_MS: u64 = 300;

/// A restartable single-shot timer expressed as data.
///
/// Nothing is scheduled; the owner calls [`Debounce::ready`] with the
/// current time and acts when it returns true. `now` is always passed in so
/// tests control time instead of sleeping.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    /// Creates a disarmed timer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Arms the timer at `now + delay`, superseding any pending deadline.
    pub fn restart(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Disarms the timer without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true at most once per arming, when `now` has reached the
    /// deadline. Firing disarms the timer.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Returns true while a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns the configured quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_DELAY_MS))
    }
}
