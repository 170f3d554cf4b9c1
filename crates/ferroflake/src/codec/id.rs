use core::fmt;

/// A 63-bit Sonyflake-style identifier.
///
/// The raw value is never negative when interpreted as `i64`. Field
/// boundaries depend on the [`Layout`] of the generator that produced the ID,
/// so decoding goes through [`Layout::decompose`] or
/// [`Sonyflake::decompose`].
///
/// IDs compare in the order of their raw value, which is the order of
/// `(elapsed time, sequence)` for IDs from the same generator.
///
/// [`Layout`]: crate::Layout
/// [`Layout::decompose`]: crate::Layout::decompose
/// [`Sonyflake::decompose`]: crate::Sonyflake::decompose
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlakeId {
    id: u64,
}

impl FlakeId {
    pub const fn from_raw(id: u64) -> Self {
        Self { id }
    }

    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Returns the ID as a signed integer, the representation most SQL
    /// databases and JSON consumers expect.
    pub const fn to_i64(&self) -> i64 {
        (self.id & (i64::MAX as u64)) as i64
    }
}

impl From<FlakeId> for u64 {
    fn from(id: FlakeId) -> Self {
        id.id
    }
}

impl From<u64> for FlakeId {
    fn from(id: u64) -> Self {
        Self { id }
    }
}

impl fmt::Display for FlakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// The fields of a decomposed [`FlakeId`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Parts {
    /// The raw identifier.
    pub id: u64,
    /// Ticks elapsed since the epoch.
    pub time: u64,
    /// Sequence number within the tick.
    pub sequence: u32,
    /// Machine ID of the issuing generator.
    pub machine: u32,
}
