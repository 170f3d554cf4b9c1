use crate::{AddressSource, BoxError, CheckMachineIdFn, MachineIdFn};
use core::fmt;
use core::time::Duration;

/// Caller-facing configuration for a [`Sonyflake`] generator.
///
/// Every field is optional. Zero bit widths, a zero time unit and a zero
/// start time select the defaults listed below; a missing machine ID
/// capability selects the private-IP heuristic.
///
/// | Field              | Default                                   |
/// |--------------------|-------------------------------------------|
/// | `bits_sequence`    | [`DEFAULT_BITS_SEQUENCE`] (8)             |
/// | `bits_machine_id`  | [`DEFAULT_BITS_MACHINE_ID`] (16)          |
/// | `time_unit`        | [`DEFAULT_TIME_UNIT`] (10 ms)             |
/// | `start_time`       | [`DEFAULT_EPOCH`] (2025-01-01 UTC)        |
/// | `machine_id`       | lower 16 bits of a private IPv4 address   |
/// | `check_machine_id` | none, every machine ID is accepted        |
/// | `address_source`   | [`InterfaceAddrs`]                        |
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use ferroflake::Settings;
///
/// let settings = Settings::default()
///     .with_bits_sequence(10)
///     .with_time_unit(Duration::from_millis(1))
///     .with_machine_id(|| Ok(42))
///     .with_check_machine_id(|id| id != 0);
/// assert_eq!(settings.bits_sequence, 10);
/// ```
///
/// [`Sonyflake`]: crate::Sonyflake
/// [`DEFAULT_BITS_SEQUENCE`]: crate::DEFAULT_BITS_SEQUENCE
/// [`DEFAULT_BITS_MACHINE_ID`]: crate::DEFAULT_BITS_MACHINE_ID
/// [`DEFAULT_TIME_UNIT`]: crate::DEFAULT_TIME_UNIT
/// [`DEFAULT_EPOCH`]: crate::DEFAULT_EPOCH
/// [`InterfaceAddrs`]: crate::InterfaceAddrs
#[derive(Default)]
pub struct Settings {
    /// Width of the sequence field in bits.
    pub bits_sequence: u32,
    /// Width of the machine ID field in bits.
    pub bits_machine_id: u32,
    /// Duration of one tick of the time field.
    pub time_unit: Duration,
    /// Epoch as a duration since the UNIX epoch. Must not be in the future.
    pub start_time: Duration,
    /// Supplies the machine ID. Its error aborts construction.
    pub machine_id: Option<MachineIdFn>,
    /// Validates the resolved machine ID, e.g. against a fleet registry.
    pub check_machine_id: Option<CheckMachineIdFn>,
    /// Address source used by the private-IP heuristic.
    pub address_source: Option<Box<dyn AddressSource>>,
}

impl Settings {
    pub fn with_bits_sequence(mut self, bits: u32) -> Self {
        self.bits_sequence = bits;
        self
    }

    pub fn with_bits_machine_id(mut self, bits: u32) -> Self {
        self.bits_machine_id = bits;
        self
    }

    pub fn with_time_unit(mut self, time_unit: Duration) -> Self {
        self.time_unit = time_unit;
        self
    }

    pub fn with_start_time(mut self, start_time: Duration) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn with_machine_id<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Result<u32, BoxError> + Send + Sync + 'static,
    {
        self.machine_id = Some(Box::new(f));
        self
    }

    pub fn with_check_machine_id<F>(mut self, f: F) -> Self
    where
        F: Fn(u32) -> bool + Send + Sync + 'static,
    {
        self.check_machine_id = Some(Box::new(f));
        self
    }

    pub fn with_address_source(mut self, source: impl AddressSource + 'static) -> Self {
        self.address_source = Some(Box::new(source));
        self
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("bits_sequence", &self.bits_sequence)
            .field("bits_machine_id", &self.bits_machine_id)
            .field("time_unit", &self.time_unit)
            .field("start_time", &self.start_time)
            .field("machine_id", &self.machine_id.is_some())
            .field("check_machine_id", &self.check_machine_id.is_some())
            .field("address_source", &self.address_source.is_some())
            .finish()
    }
}
