//! One-second tick source.
//!
//! The scheduler never calls anything itself: the event loop asks how long
//! to wait and how many ticks came due, and the session starts and stops it
//! around prompts.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Scheduler {
    period: Duration,
    next_due: Option<Instant>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Scheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Arms the scheduler; the first tick is due one period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// `None` while stopped: the caller should wait for input only.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Consumes one due tick, if any, moving the deadline one period on.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                self.next_due = Some(due + self.period);
                true
            }
            _ => false,
        }
    }
}
