//! Timestamps and the clock capability used by pending pots.
//!
//! `Pending` and `PendingStale` record when loading started so callers can
//! compute how long a load has been in flight. The pot never reads a clock on
//! its own behalf in the `*_at` transition methods: the caller passes `now`
//! explicitly, which keeps every transition referentially transparent. The
//! convenience forms (`pending`, `retry`, `duration`) read [`SystemClock`].
//!
//! # Examples
//!
//! ```
//! use pot::clock::{Clock, ManualClock, Timestamp};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new(Timestamp::from_millis(1_000));
//! let started = clock.now();
//! clock.advance(Duration::from_millis(250));
//!
//! assert_eq!(clock.now().duration_since(started), Duration::from_millis(250));
//! ```

use std::cell::Cell;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A point in time, in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timestamp(u64);

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Create a timestamp from milliseconds since the epoch.
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Timestamp(millis)
    }

    /// Milliseconds since the epoch.
    #[inline]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Time elapsed from `earlier` to `self`.
    ///
    /// Saturates to zero if `earlier` is later than `self`, which can happen
    /// when the wall clock is adjusted backwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use pot::clock::Timestamp;
    /// use std::time::Duration;
    ///
    /// let t0 = Timestamp::from_millis(100);
    /// let t1 = Timestamp::from_millis(350);
    ///
    /// assert_eq!(t1.duration_since(t0), Duration::from_millis(250));
    /// assert_eq!(t0.duration_since(t1), Duration::ZERO);
    /// ```
    #[inline]
    pub fn duration_since(self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    /// This timestamp moved forward by `duration`, saturating at the maximum.
    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Timestamp(self.0.saturating_add(millis))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        let millis = time
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        Timestamp(millis)
    }
}

/// A source of the current time.
///
/// Implement this to inject time into code that drives pot transitions, so
/// that tests can freeze or step the clock.
pub trait Clock {
    /// The current time.
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Wall-clock time from [`SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from(SystemTime::now())
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// A clock that only moves when told to.
///
/// Single-threaded by design; share a `FixedClock` value instead when a clock
/// must cross threads.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Create a clock starting at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Cell::new(start.as_millis()),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let next = Timestamp::from_millis(self.now.get()).saturating_add(by);
        self.now.set(next.as_millis());
    }

    /// Jump to an absolute time.
    pub fn set(&self, to: Timestamp) {
        self.now.set(to.as_millis());
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.now.get())
    }
}
