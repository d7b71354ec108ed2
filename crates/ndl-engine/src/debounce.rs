//! # Debounce Timers
//!
//! Single-slot cancellable deadlines for the two recomputation classes:
//! suggestion refresh and result/table/map refresh. Re-arming cancels and
//! reschedules, so at most one recomputation per class is ever pending.
//!
//! The engine never reads the wall clock itself. Callers pass the current
//! instant into every entry point and drive expiry through
//! [`Debouncer::fire_due`] from their timer callback, which keeps the
//! windows deterministic under test.

use std::time::{Duration, Instant};

/// Window for suggestion refresh after the last name-field keystroke.
pub const SUGGEST_WINDOW: Duration = Duration::from_millis(150);

/// Window for result/table/map refresh after the last keystroke in either
/// field.
pub const REFRESH_WINDOW: Duration = Duration::from_millis(300);

/// A single-flight debounce timer.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Create a disarmed timer with the given window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the timer: any pending deadline is replaced.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Drop any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a recomputation is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, for hosts that schedule a real timer.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fire if the deadline has passed. Firing disarms the timer; at most
    /// one fire per arm.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
