//! Randomness and time ports
//!
//! Die draws and timestamps come in through these traits so that roll
//! resolution stays deterministic under test.

use chrono::{DateTime, Utc};

/// Source of die faces
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform integer in [1, sides]
    fn roll_die(&self, sides: i32) -> i32;
}

/// Source of the current time
#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
