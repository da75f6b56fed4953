//! Run timer
//!
//! Elapsed time is counted in ticks, not measured: each delivered tick adds
//! exactly `interval_ms`. Scheduler jitter therefore never shows up in the
//! displayed time, but neither does a stalled tab.

use serde::{Deserialize, Serialize};

use super::state::GameSession;
use crate::consts::TICK_INTERVAL_MS;

/// Lazily armed fixed-interval accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    /// Milliseconds added per tick
    pub interval_ms: u32,
    armed: bool,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(TICK_INTERVAL_MS)
    }
}

impl Timer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            armed: false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Arm the timer. Returns true if it was not already armed.
    pub fn arm(&mut self) -> bool {
        !std::mem::replace(&mut self.armed, true)
    }

    /// Cancel the timer. Returns true if it was armed.
    pub fn disarm(&mut self) -> bool {
        std::mem::replace(&mut self.armed, false)
    }

    /// Whether a tick delivered now would count
    pub fn should_count(&self, session: &GameSession) -> bool {
        self.armed && session.is_timing()
    }
}

/// Format milliseconds as `M:SS.CC`
pub fn format_time(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms / 1000) % 60;
    let centis = (ms % 1000) / 10;
    format!("{}:{:02}.{:02}", minutes, seconds, centis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(65432), "1:05.43");
        assert_eq!(format_time(0), "0:00.00");
        assert_eq!(format_time(9), "0:00.00");
        assert_eq!(format_time(59_999), "0:59.99");
        assert_eq!(format_time(60_000), "1:00.00");
        assert_eq!(format_time(754_010), "12:34.01");
    }

    #[test]
    fn test_arm_once() {
        let mut timer = Timer::default();
        assert_eq!(timer.interval_ms, 10);
        assert!(timer.arm());
        assert!(!timer.arm());
        assert!(timer.is_armed());
        assert!(timer.disarm());
        assert!(!timer.disarm());
    }
}
