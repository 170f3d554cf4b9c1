use core::time::Duration;

/// Default epoch: Wednesday, January 1, 2025 00:00:00 UTC
pub const DEFAULT_EPOCH: Duration = Duration::from_secs(1_735_689_600);

/// A trait for wall-clock time sources.
///
/// This abstraction lets the generator run against the real system clock or a
/// controllable clock in tests. Timestamps are expressed as a [`Duration`]
/// since the UNIX epoch (1970-01-01 00:00:00 UTC).
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use ferroflake::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn now(&self) -> Duration {
///         Duration::from_secs(1_800_000_000)
///     }
/// }
///
/// assert_eq!(FixedTime.now().as_secs(), 1_800_000_000);
/// ```
pub trait TimeSource {
    /// Returns the current wall-clock time since the UNIX epoch.
    fn now(&self) -> Duration;

    /// Blocks the calling thread for `duration`.
    ///
    /// The generator calls this for its compensating sleep when the sequence
    /// space of a time unit is exhausted. Mock clocks can override it to
    /// advance simulated time instead of sleeping.
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}
