use crate::{Error, FlakeId, Layout, Parts, Result};
use core::time::Duration;

impl Layout {
    const fn shift_time(&self) -> u32 {
        self.bits_sequence() + self.bits_machine()
    }

    const fn shift_sequence(&self) -> u32 {
        self.bits_machine()
    }

    /// Packs explicit field values into an ID.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`Error::StartTimeAhead`] if `elapsed_time` is negative
    /// - [`Error::OverTimeLimit`] if `elapsed_time` does not fit the time field
    /// - [`Error::InvalidSequence`] if `sequence` does not fit the sequence
    ///   field
    /// - [`Error::InvalidMachineId`] if `machine_id` does not fit the machine
    ///   ID field
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use ferroflake::{Layout, Settings};
    ///
    /// let layout =
    ///     Layout::from_settings(&Settings::default(), Duration::from_secs(1_800_000_000)).unwrap();
    /// let id = layout.compose_raw(100, 0, 127).unwrap();
    /// assert_eq!(id.to_raw(), (100 << 24) | 127);
    /// ```
    pub fn compose_raw(&self, elapsed_time: i64, sequence: u32, machine_id: u32) -> Result<FlakeId> {
        let elapsed_time = u64::try_from(elapsed_time).map_err(|_| Error::StartTimeAhead)?;
        if elapsed_time > self.max_elapsed_time() {
            return Err(Error::OverTimeLimit);
        }
        if sequence > self.max_sequence() {
            return Err(Error::InvalidSequence);
        }
        if machine_id > self.max_machine_id() {
            return Err(Error::InvalidMachineId);
        }

        Ok(FlakeId::from_raw(
            (elapsed_time << self.shift_time())
                | (u64::from(sequence) << self.shift_sequence())
                | u64::from(machine_id),
        ))
    }

    /// Packs an ID for the absolute instant `at` (since the UNIX epoch).
    ///
    /// Useful for backfills and for building range bounds: every ID issued in
    /// the same tick as `at` sorts between `compose(at, 0, 0)` and
    /// `compose(at, max_sequence, max_machine_id)`.
    ///
    /// # Errors
    ///
    /// Same as [`Layout::compose_raw`]; [`Error::StartTimeAhead`] means `at`
    /// precedes the epoch.
    pub fn compose(&self, at: Duration, sequence: u32, machine_id: u32) -> Result<FlakeId> {
        self.compose_raw(self.elapsed_ticks(at), sequence, machine_id)
    }

    /// Splits an ID into its fields. Never fails; the reserved sign bit is
    /// ignored.
    pub fn decompose(&self, id: FlakeId) -> Parts {
        Parts {
            id: id.to_raw(),
            time: self.time_part(id),
            sequence: self.sequence_part(id),
            machine: self.machine_part(id),
        }
    }

    /// Ticks elapsed since the epoch.
    pub const fn time_part(&self, id: FlakeId) -> u64 {
        (id.to_raw() >> self.shift_time()) & self.max_elapsed_time()
    }

    pub const fn sequence_part(&self, id: FlakeId) -> u32 {
        ((id.to_raw() >> self.shift_sequence()) & self.max_sequence() as u64) as u32
    }

    pub const fn machine_part(&self, id: FlakeId) -> u32 {
        (id.to_raw() & self.max_machine_id() as u64) as u32
    }

    /// Time elapsed between the epoch and the tick the ID was issued in.
    pub fn elapsed_time(&self, id: FlakeId) -> Duration {
        self.ticks_to_duration(i64::try_from(self.time_part(id)).unwrap_or(i64::MAX))
    }

    /// Reconstructs the issuing instant (since the UNIX epoch), truncated to
    /// the start of its tick.
    pub fn to_time(&self, id: FlakeId) -> Duration {
        self.start_time().saturating_add(self.elapsed_time(id))
    }
}
