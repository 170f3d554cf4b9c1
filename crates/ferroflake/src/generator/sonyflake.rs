use core::fmt;
use core::time::Duration;

#[cfg(feature = "tracing")]
use tracing::{instrument, trace};

use crate::{
    Error, FlakeId, Layout, Mutex, Parts, Result, Settings, SystemClock, TimeSource,
    resolve_machine_id,
};

/// Mutable generator state, only touched under the generator's lock.
#[derive(Debug)]
struct State {
    elapsed_time: i64,
    sequence: u32,
}

/// A lock-based Sonyflake ID generator, safe to share across threads.
///
/// Each call to [`Sonyflake::next_id`] samples the clock under an exclusive
/// lock and advances `(elapsed time, sequence)`:
///
/// - if the clock moved to a later tick, the sequence restarts at zero;
/// - otherwise (same tick, or the clock went backwards) the sequence is
///   incremented, and once it wraps the generator moves to the next tick and
///   sleeps until that tick starts, still holding the lock.
///
/// IDs from one generator are therefore strictly increasing, including across
/// threads, and a call blocks for at most about one time unit in the common
/// case.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Runtime-configurable bit layout
/// - ✅ Reproducible IDs via [`Sonyflake::next_id_at`]
///
/// ## See Also
/// - [`Layout`] for composing and decomposing IDs without a generator
pub struct Sonyflake<T = SystemClock>
where
    T: TimeSource,
{
    layout: Layout,
    machine_id: u32,
    time: T,
    state: Mutex<State>,
}

impl Sonyflake<SystemClock> {
    /// Creates a generator on the system clock.
    ///
    /// # Errors
    ///
    /// Any configuration or machine ID resolution error; see
    /// [`Layout::from_settings`] and [`resolve_machine_id`].
    ///
    /// # Example
    /// ```
    /// use ferroflake::{Settings, Sonyflake};
    ///
    /// let generator = Sonyflake::new(Settings::default().with_machine_id(|| Ok(1))).unwrap();
    /// let a = generator.next_id().unwrap();
    /// let b = generator.next_id().unwrap();
    /// assert!(a < b);
    /// assert_eq!(generator.decompose(a).machine, 1);
    /// ```
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_clock(settings, SystemClock)
    }
}

impl<T> Sonyflake<T>
where
    T: TimeSource,
{
    /// Creates a generator reading time from `time`.
    ///
    /// The layout is validated against `time.now()`, then the machine ID is
    /// resolved. The first ID is issued in the tick of the first call.
    ///
    /// # Errors
    ///
    /// Any configuration or machine ID resolution error; see
    /// [`Layout::from_settings`] and [`resolve_machine_id`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(time)))]
    pub fn with_clock(settings: Settings, time: T) -> Result<Self> {
        let layout = Layout::from_settings(&settings, time.now())?;
        let machine_id = resolve_machine_id(&settings, &layout)?;

        Ok(Self {
            state: Mutex::new(State {
                elapsed_time: 0,
                // The first increment wraps, so a call in the epoch's own tick
                // behaves like any other exhausted tick.
                sequence: layout.max_sequence(),
            }),
            layout,
            machine_id,
            time,
        })
    }

    /// Generates the next ID from the current time.
    ///
    /// Blocks while the sequence space of the current tick is exhausted.
    ///
    /// # Errors
    ///
    /// - [`Error::OverTimeLimit`] once the time field overflows; permanent
    #[cfg_attr(
        not(feature = "parking-lot"),
        doc = "- [`Error::LockPoisoned`] if another thread panicked while holding the lock"
    )]
    ///
    /// [`Error::OverTimeLimit`]: crate::Error::OverTimeLimit
    #[cfg_attr(
        not(feature = "parking-lot"),
        doc = "[`Error::LockPoisoned`]: crate::Error::LockPoisoned"
    )]
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<FlakeId> {
        let mut state = self.lock()?;
        let now = self.time.now();
        self.advance(&mut state, now)
    }

    /// Generates the next ID treating `now` (since the UNIX epoch) as the
    /// current time.
    ///
    /// Follows the same rules as [`Sonyflake::next_id`], so a fresh generator
    /// fed the same instants yields the same IDs. Exhausting a tick still
    /// performs a real compensating sleep, computed against `now`.
    ///
    /// # Errors
    ///
    /// - [`Error::StartTimeAhead`] if `now` precedes the epoch; the generator
    ///   state is left untouched
    /// - otherwise the same as [`Sonyflake::next_id`]
    ///
    /// [`Error::StartTimeAhead`]: crate::Error::StartTimeAhead
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id_at(&self, now: Duration) -> Result<FlakeId> {
        if self.layout.elapsed_ticks(now) < 0 {
            return Err(Error::StartTimeAhead);
        }
        let mut state = self.lock()?;
        self.advance(&mut state, now)
    }

    fn lock(&self) -> Result<crate::MutexGuard<'_, State>> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.state.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.state.lock()?)
        }
    }

    fn advance(&self, state: &mut State, now: Duration) -> Result<FlakeId> {
        let current = self.layout.elapsed_ticks(now);
        if u64::try_from(current).is_ok_and(|c| c > self.layout.max_elapsed_time()) {
            return Err(Error::OverTimeLimit);
        }

        if state.elapsed_time < current {
            state.elapsed_time = current;
            state.sequence = 0;
        } else {
            let sequence = (state.sequence + 1) & self.layout.max_sequence();
            if sequence == 0 {
                let next = state.elapsed_time.checked_add(1).ok_or(Error::OverTimeLimit)?;
                let overtime = next.checked_sub(current).ok_or(Error::OverTimeLimit)?;
                state.elapsed_time = next;
                self.cold_wait_for_tick(overtime, now);
            }
            state.sequence = sequence;
        }

        self.layout
            .compose_raw(state.elapsed_time, state.sequence, self.machine_id)
    }

    #[cold]
    #[inline(never)]
    fn cold_wait_for_tick(&self, overtime: i64, now: Duration) {
        let sleep_for = self.layout.sleep_time(overtime, now);
        #[cfg(feature = "tracing")]
        trace!(overtime, ?sleep_for, "sequence exhausted, sleeping");
        self.time.sleep(sleep_for);
    }

    /// Packs an ID for an explicit instant, sequence and machine ID without
    /// touching generator state.
    ///
    /// # Errors
    ///
    /// See [`Layout::compose`].
    pub fn compose(&self, at: Duration, sequence: u32, machine_id: u32) -> Result<FlakeId> {
        self.layout.compose(at, sequence, machine_id)
    }

    pub fn decompose(&self, id: FlakeId) -> Parts {
        self.layout.decompose(id)
    }

    /// Approximate instant (since the UNIX epoch) at which `id` was issued.
    pub fn to_time(&self, id: FlakeId) -> Duration {
        self.layout.to_time(id)
    }

    pub fn machine_id(&self) -> u32 {
        self.machine_id
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}

impl<T> fmt::Debug for Sonyflake<T>
where
    T: TimeSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sonyflake")
            .field("layout", &self.layout)
            .field("machine_id", &self.machine_id)
            .finish_non_exhaustive()
    }
}
