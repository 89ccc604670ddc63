//! Time source for the controller
//!
//! The controller never reads wall time directly. Hosts inject a [`Clock`];
//! tests use [`ManualClock`] to step through gravity and line-clear delays.

use std::cell::Cell;
use std::time::Instant;

/// Monotonic milliseconds plus today's calendar date
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin; never goes backwards
    fn now_ms(&self) -> u64;

    /// Local date as `YYYY-MM-DD`, used to stamp high-score entries
    fn today(&self) -> String {
        chrono::Local::now().format("%Y-%m-%d").to_string()
    }
}

/// Real clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock with a fixed date
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<u64>,
    date: String,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
            date: "2024-01-01".to_string(),
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn today(&self) -> String {
        self.date.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(100);
        clock.advance(16);
        assert_eq!(clock.now_ms(), 116);
        clock.set(5000);
        assert_eq!(clock.now_ms(), 5000);
    }

    #[test]
    fn manual_clock_date_is_fixed() {
        let clock = ManualClock::default().with_date("2023-07-14");
        assert_eq!(clock.today(), "2023-07-14");
    }

    #[test]
    fn system_clock_date_format() {
        let today = SystemClock::new().today();
        let parts: Vec<&str> = today.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 4);
        assert_eq!(parts[1].len(), 2);
        assert_eq!(parts[2].len(), 2);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
