//! Deadline timers driven by host-supplied instants.
//!
//! Views never spawn tasks. The host passes `Instant`s into `tick`-style
//! calls and these timers answer whether a deadline has passed. Dropping the
//! owning view drops the timer, which is all "clearing" needs to mean.

use std::time::{Duration, Instant};

/// A repeating deadline, e.g. carousel auto-advance.
#[derive(Debug, Clone)]
pub struct AutoAdvance {
    interval: Duration,
    deadline: Option<Instant>,
}

impl AutoAdvance {
    /// A disarmed timer.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Arm (or re-arm) so the next firing is one interval after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fire if the deadline has passed, re-arming from `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.arm(now);
                true
            }
            _ => false,
        }
    }
}

/// A value that is visible until a deadline, e.g. a "copied" toast.
#[derive(Debug, Clone)]
pub struct Transient<T> {
    ttl: Duration,
    current: Option<(T, Instant)>,
}

impl<T> Transient<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    /// Show `value` from `now` for one ttl, replacing anything shown.
    pub fn show(&mut self, value: T, now: Instant) {
        self.current = Some((value, now + self.ttl));
    }

    /// The value, if still visible at `now`.
    pub fn get(&self, now: Instant) -> Option<&T> {
        match &self.current {
            Some((value, hide_at)) if now < *hide_at => Some(value),
            _ => None,
        }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.get(now).is_some()
    }

    /// Drop the value if it has expired. Returns true when something was hidden.
    pub fn expire(&mut self, now: Instant) -> bool {
        let expired = matches!(&self.current, Some((_, hide_at)) if now >= *hide_at);
        if expired {
            self.current = None;
        }
        expired
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
