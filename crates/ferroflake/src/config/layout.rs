use crate::{DEFAULT_EPOCH, Error, Result, Settings};
use core::time::Duration;

/// Total number of usable bits in an ID. The sign bit is always zero.
pub const TOTAL_BITS: u32 = 63;

/// Default width of the sequence field.
pub const DEFAULT_BITS_SEQUENCE: u32 = 8;

/// Default width of the machine ID field.
pub const DEFAULT_BITS_MACHINE_ID: u32 = 16;

/// Upper bound for the sequence and machine ID field widths.
pub const MAX_BITS_FIELD: u32 = 30;

/// Lower bound for the derived time field width.
pub const MIN_BITS_TIME: u32 = 32;

/// Default duration of one time tick.
pub const DEFAULT_TIME_UNIT: Duration = Duration::from_millis(10);

/// Smallest accepted time tick.
pub const MIN_TIME_UNIT: Duration = Duration::from_millis(1);

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// The normalized bit layout of a generator.
///
/// Derived once from [`Settings`] and immutable afterwards. An ID is laid out
/// most-significant-first as:
///
/// ```text
///  Bit Index:  63           63 62                          0
///              +--------------+-------------+-------------+-------------+
///  Field:      | reserved (1) | time        | sequence    | machine ID  |
///              +--------------+-------------+-------------+-------------+
///  Default:    |      0       |     39      |      8      |     16      |
/// ```
///
/// `bits_time + bits_sequence + bits_machine == 63` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    bits_time: u32,
    bits_sequence: u32,
    bits_machine: u32,
    // nanoseconds per tick
    time_unit: u64,
    // epoch in ticks since the UNIX epoch
    start_time: i64,
}

impl Layout {
    /// Validates `settings` and normalizes them into a layout.
    ///
    /// `now` is the construction instant used to reject a start time in the
    /// future.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidBitsSequence`] if the sequence width exceeds
    ///   [`MAX_BITS_FIELD`]
    /// - [`Error::InvalidBitsMachineId`] if the machine ID width exceeds
    ///   [`MAX_BITS_FIELD`]
    /// - [`Error::InvalidBitsTime`] if fewer than [`MIN_BITS_TIME`] bits remain
    ///   for time
    /// - [`Error::InvalidTimeUnit`] if a non-zero time unit is below
    ///   [`MIN_TIME_UNIT`]
    /// - [`Error::StartTimeAhead`] if the effective start time (including the
    ///   default epoch) is later than `now`
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use ferroflake::{Layout, Settings};
    ///
    /// let now = Duration::from_secs(1_800_000_000);
    /// let layout = Layout::from_settings(&Settings::default(), now).unwrap();
    /// assert_eq!(layout.bits_time(), 39);
    /// assert_eq!(layout.bits_sequence(), 8);
    /// assert_eq!(layout.bits_machine(), 16);
    /// assert_eq!(layout.time_unit(), Duration::from_millis(10));
    /// ```
    pub fn from_settings(settings: &Settings, now: Duration) -> Result<Self> {
        if settings.bits_sequence > MAX_BITS_FIELD {
            return Err(Error::InvalidBitsSequence);
        }
        if settings.bits_machine_id > MAX_BITS_FIELD {
            return Err(Error::InvalidBitsMachineId);
        }

        let bits_sequence = match settings.bits_sequence {
            0 => DEFAULT_BITS_SEQUENCE,
            bits => bits,
        };
        let bits_machine = match settings.bits_machine_id {
            0 => DEFAULT_BITS_MACHINE_ID,
            bits => bits,
        };
        let bits_time = TOTAL_BITS - bits_sequence - bits_machine;
        if bits_time < MIN_BITS_TIME {
            return Err(Error::InvalidBitsTime);
        }

        let time_unit = match settings.time_unit {
            Duration::ZERO => DEFAULT_TIME_UNIT,
            unit if unit < MIN_TIME_UNIT => return Err(Error::InvalidTimeUnit),
            unit => unit,
        };
        let time_unit = u64::try_from(time_unit.as_nanos()).map_err(|_| Error::InvalidTimeUnit)?;

        let start_time = match settings.start_time {
            Duration::ZERO => DEFAULT_EPOCH,
            start => start,
        };
        if start_time > now {
            return Err(Error::StartTimeAhead);
        }

        let mut layout = Self {
            bits_time,
            bits_sequence,
            bits_machine,
            time_unit,
            start_time: 0,
        };
        layout.start_time = layout.to_ticks(start_time);
        Ok(layout)
    }

    /// Width of the time field in bits.
    pub const fn bits_time(&self) -> u32 {
        self.bits_time
    }

    /// Width of the sequence field in bits.
    pub const fn bits_sequence(&self) -> u32 {
        self.bits_sequence
    }

    /// Width of the machine ID field in bits.
    pub const fn bits_machine(&self) -> u32 {
        self.bits_machine
    }

    /// Duration of one time tick.
    pub const fn time_unit(&self) -> Duration {
        Duration::from_nanos(self.time_unit)
    }

    /// The epoch, truncated to the tick granularity, since the UNIX epoch.
    pub fn start_time(&self) -> Duration {
        self.ticks_to_duration(self.start_time)
    }

    /// Largest sequence number that fits the sequence field.
    pub const fn max_sequence(&self) -> u32 {
        (1 << self.bits_sequence) - 1
    }

    /// Largest machine ID that fits the machine ID field.
    pub const fn max_machine_id(&self) -> u32 {
        (1 << self.bits_machine) - 1
    }

    /// Largest elapsed tick count that fits the time field.
    pub const fn max_elapsed_time(&self) -> u64 {
        u64::MAX >> (u64::BITS - self.bits_time)
    }

    /// How long after the epoch IDs can be issued before
    /// [`Error::OverTimeLimit`].
    ///
    /// About 174 years with the default layout.
    pub fn lifetime(&self) -> Duration {
        nanos_to_duration((u128::from(self.max_elapsed_time()) + 1) * u128::from(self.time_unit))
    }

    /// Converts an instant since the UNIX epoch into whole ticks.
    ///
    /// Saturates at `i64::MAX`, which is past every time field and so ends
    /// in [`Error::OverTimeLimit`].
    pub fn to_ticks(&self, at: Duration) -> i64 {
        i64::try_from(at.as_nanos() / u128::from(self.time_unit)).unwrap_or(i64::MAX)
    }

    /// Whole ticks elapsed between the epoch and `at`; negative if `at`
    /// precedes the epoch.
    pub fn elapsed_ticks(&self, at: Duration) -> i64 {
        self.to_ticks(at) - self.start_time
    }

    /// Time remaining from `now` until the start of the tick that lies
    /// `overtime` ticks past the one containing `now`.
    pub(crate) fn sleep_time(&self, overtime: i64, now: Duration) -> Duration {
        let overtime = u128::try_from(overtime).unwrap_or(0);
        let unit = u128::from(self.time_unit);
        nanos_to_duration((overtime * unit).saturating_sub(now.as_nanos() % unit))
    }

    pub(crate) fn ticks_to_duration(&self, ticks: i64) -> Duration {
        let ticks = u128::try_from(ticks).unwrap_or(0);
        nanos_to_duration(ticks * u128::from(self.time_unit))
    }
}

fn nanos_to_duration(nanos: u128) -> Duration {
    match u64::try_from(nanos / NANOS_PER_SEC) {
        Ok(secs) => Duration::new(secs, (nanos % NANOS_PER_SEC) as u32),
        Err(_) => Duration::MAX,
    }
}
