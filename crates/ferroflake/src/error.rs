use std::io;

/// A boxed error returned by caller-supplied capabilities.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `ferroflake` can emit.
///
/// Configuration and resolution errors are only produced while constructing a
/// [`Sonyflake`]; the generator is not created. Runtime errors are produced by
/// [`Sonyflake::next_id`] and the compose family.
///
/// [`Sonyflake`]: crate::Sonyflake
/// [`Sonyflake::next_id`]: crate::Sonyflake::next_id
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The derived time field is narrower than
    /// [`MIN_BITS_TIME`](crate::MIN_BITS_TIME) bits.
    #[error("invalid bit length for time")]
    InvalidBitsTime,

    /// The sequence field width is above
    /// [`MAX_BITS_FIELD`](crate::MAX_BITS_FIELD).
    #[error("invalid bit length for sequence number")]
    InvalidBitsSequence,

    /// The machine ID field width is above
    /// [`MAX_BITS_FIELD`](crate::MAX_BITS_FIELD).
    #[error("invalid bit length for machine id")]
    InvalidBitsMachineId,

    /// A non-zero time unit below [`MIN_TIME_UNIT`](crate::MIN_TIME_UNIT).
    #[error("invalid time unit")]
    InvalidTimeUnit,

    /// The start time is later than now, or a composed time precedes it.
    #[error("start time is ahead")]
    StartTimeAhead,

    /// No private or link-local IPv4 address was found.
    #[error("no private ip address")]
    NoPrivateAddress,

    /// The machine ID is out of range or was rejected by the check callback.
    #[error("invalid machine id")]
    InvalidMachineId,

    /// An explicit sequence number does not fit the sequence field.
    #[error("invalid sequence number")]
    InvalidSequence,

    /// The elapsed time no longer fits the time field. Permanent for the
    /// generator that returned it.
    #[error("over the time limit")]
    OverTimeLimit,

    /// Enumerating network interface addresses failed.
    #[error("failed to read interface addresses: {0}")]
    AddressSource(#[from] io::Error),

    /// The caller-supplied machine ID capability failed.
    #[error("failed to get machine id: {0}")]
    MachineId(#[source] BoxError),

    /// The generator state lock was poisoned by a panicking thread. Not
    /// available with `parking-lot`, whose mutexes do not poison.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

impl Error {
    /// Returns `true` when the generator that produced this error can never
    /// issue another ID and must be replaced.
    pub fn is_permanent(&self) -> bool {
        match self {
            Self::OverTimeLimit => true,
            #[cfg(not(feature = "parking-lot"))]
            Self::LockPoisoned => true,
            _ => false,
        }
    }
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
