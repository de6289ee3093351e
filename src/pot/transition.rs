//! Lifecycle transitions: `pending`, `fail` and `retry`.
//!
//! Every transition is total. The `*_at` forms take the current time from the
//! caller; the short forms read the wall clock.

use super::Pot;
use crate::clock::{Clock, SystemClock, Timestamp};
use crate::failure::Failure;

impl<T> Pot<T> {
    /// Start (or restart) loading with `retries` retries, at time `now`.
    ///
    /// | From                     | To                                       |
    /// |--------------------------|------------------------------------------|
    /// | `Empty`                  | `Pending(retries, now)`                  |
    /// | `Ready(x)`               | `PendingStale(x, retries, now)`          |
    /// | `Pending(_, t)`          | `Pending(retries, t)`                    |
    /// | `PendingStale(x, _, t)`  | `PendingStale(x, retries, t)`            |
    /// | `Failed(e, _)`           | `Failed(e, retries)`                     |
    /// | `FailedStale(x, _, _)`   | `PendingStale(x, retries, now)`          |
    ///
    /// A pot that is already pending keeps its original start time. To keep
    /// the current retry budget, pass `pot.retries_left()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::Pot;
    /// use pot::clock::Timestamp;
    ///
    /// let t0 = Timestamp::from_millis(100);
    /// let p = Pot::ready("v").pending_at(3, t0);
    ///
    /// assert_eq!(
    ///     p,
    ///     Pot::PendingStale { value: "v", retries_left: 3, start_time: t0 }
    /// );
    /// ```
    pub fn pending_at(self, retries: u32, now: Timestamp) -> Self {
        let from = self.variant_name();
        let next = match self {
            Pot::Empty => Pot::Pending {
                retries_left: retries,
                start_time: now,
            },
            Pot::Ready(value) => Pot::PendingStale {
                value,
                retries_left: retries,
                start_time: now,
            },
            Pot::Pending { start_time, .. } => Pot::Pending {
                retries_left: retries,
                start_time,
            },
            Pot::PendingStale {
                value, start_time, ..
            } => Pot::PendingStale {
                value,
                retries_left: retries,
                start_time,
            },
            Pot::Failed { failure, .. } => Pot::Failed {
                failure,
                retries_left: retries,
            },
            Pot::FailedStale { value, .. } => Pot::PendingStale {
                value,
                retries_left: retries,
                start_time: now,
            },
        };
        trace_transition(from, &next);
        next
    }

    /// [`pending_at`](Pot::pending_at) stamped by `clock`.
    #[inline]
    pub fn pending_with(self, retries: u32, clock: &impl Clock) -> Self {
        self.pending_at(retries, clock.now())
    }

    /// [`pending_at`](Pot::pending_at) stamped by the wall clock.
    #[inline]
    pub fn pending(self, retries: u32) -> Self {
        self.pending_with(retries, &SystemClock)
    }

    /// Record a failed load.
    ///
    /// Valueless pots become `Failed`, pots carrying a value become
    /// `FailedStale` with the value kept. The retry budget always resets to
    /// zero: a fresh failure does not inherit the previous budget.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::{Failure, Pot};
    /// use pot::clock::Timestamp;
    ///
    /// let p: Pot<i32> = Pot::pending_since(5, Timestamp::EPOCH);
    /// let failed = p.fail(Failure::msg("timeout"));
    ///
    /// assert!(failed.is_failed());
    /// assert_eq!(failed.retries_left(), 0);
    /// ```
    pub fn fail(self, failure: impl Into<Failure>) -> Self {
        let from = self.variant_name();
        let failure = failure.into();
        let next = match self.into_option() {
            Some(value) => Pot::FailedStale {
                value,
                failure,
                retries_left: 0,
            },
            None => Pot::Failed {
                failure,
                retries_left: 0,
            },
        };
        trace_transition(from, &next);
        next
    }

    /// Spend one retry and go back to loading, at time `now`.
    ///
    /// `Empty` and `Ready` are returned unchanged. For the other variants:
    ///
    /// | From                               | To                                   |
    /// |------------------------------------|--------------------------------------|
    /// | `Pending(n > 0, t)`                | `Pending(n - 1, t)`                  |
    /// | `PendingStale(x, n > 0, t)`        | `PendingStale(x, n - 1, t)`          |
    /// | `Failed(_, n > 0)`                 | `Pending(n - 1, now)`                |
    /// | `FailedStale(x, _, n > 0)`         | `PendingStale(x, n - 1, now)`        |
    /// | valueless, `n == 0`                | `Failed(RetriesExhausted, 0)`        |
    /// | carrying `x`, `n == 0`             | `FailedStale(x, RetriesExhausted, 0)`|
    ///
    /// Exhaustion discards any earlier failure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::Pot;
    /// use pot::clock::Timestamp;
    ///
    /// let t0 = Timestamp::EPOCH;
    ///
    /// let p: Pot<()> = Pot::pending_since(2, t0).retry_at(t0);
    /// assert_eq!(p, Pot::pending_since(1, t0));
    ///
    /// let done: Pot<()> = Pot::pending_since(0, t0).retry_at(t0);
    /// assert!(done.failure().is_some_and(|f| f.is_retries_exhausted()));
    /// ```
    pub fn retry_at(self, now: Timestamp) -> Self {
        if matches!(self, Pot::Empty | Pot::Ready(_)) {
            return self;
        }

        let from = self.variant_name();
        let next = if self.can_retry() {
            match self {
                Pot::Pending {
                    retries_left,
                    start_time,
                } => Pot::Pending {
                    retries_left: retries_left - 1,
                    start_time,
                },
                Pot::PendingStale {
                    value,
                    retries_left,
                    start_time,
                } => Pot::PendingStale {
                    value,
                    retries_left: retries_left - 1,
                    start_time,
                },
                Pot::Failed { retries_left, .. } => Pot::Pending {
                    retries_left: retries_left - 1,
                    start_time: now,
                },
                Pot::FailedStale {
                    value,
                    retries_left,
                    ..
                } => Pot::PendingStale {
                    value,
                    retries_left: retries_left - 1,
                    start_time: now,
                },
                // Empty and Ready returned early.
                other => other,
            }
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(from, "retry budget exhausted");

            match self.into_option() {
                Some(value) => Pot::FailedStale {
                    value,
                    failure: Failure::retries_exhausted(),
                    retries_left: 0,
                },
                None => Pot::Failed {
                    failure: Failure::retries_exhausted(),
                    retries_left: 0,
                },
            }
        };
        trace_transition(from, &next);
        next
    }

    /// [`retry_at`](Pot::retry_at) stamped by `clock`.
    #[inline]
    pub fn retry_with(self, clock: &impl Clock) -> Self {
        self.retry_at(clock.now())
    }

    /// [`retry_at`](Pot::retry_at) stamped by the wall clock.
    #[inline]
    pub fn retry(self) -> Self {
        self.retry_with(&SystemClock)
    }
}

#[cfg(feature = "tracing")]
fn trace_transition<T>(from: &'static str, next: &Pot<T>) {
    let to = next.variant_name();
    if from != to {
        tracing::trace!(from, to, retries_left = next.retries_left(), "pot transition");
    }
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
fn trace_transition<T>(_from: &'static str, _next: &Pot<T>) {}
