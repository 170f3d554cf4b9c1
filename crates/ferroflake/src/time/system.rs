use crate::TimeSource;
use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

/// A [`TimeSource`] backed by [`SystemTime`].
///
/// Wall-clock adjustments (NTP slews, manual changes) are visible through this
/// clock. The generator tolerates backward jumps by continuing from its last
/// issued time unit.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Duration {
        // Clocks set before 1970 collapse to the UNIX epoch itself, which any
        // valid start time is ahead of.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
    }
}
