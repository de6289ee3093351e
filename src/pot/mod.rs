//! The `Pot` potential-value type.
//!
//! A `Pot<T>` is one point in the lifecycle of an asynchronously loaded value:
//!
//! | Variant        | Carries value | `is_empty` | `is_pending` | `is_stale` | `is_failed` |
//! |----------------|---------------|------------|--------------|------------|-------------|
//! | `Empty`        | no            | yes        |              |            |             |
//! | `Ready`        | yes           |            |              |            |             |
//! | `Pending`      | no            | yes        | yes          |            |             |
//! | `PendingStale` | yes           |            | yes          | yes        |             |
//! | `Failed`       | no            | yes        |              |            | yes         |
//! | `FailedStale`  | yes           |            |              | yes        | yes         |
//!
//! Pots are immutable values: every transition consumes the pot and returns a
//! new one. The code holding the pot (a reducer, a store, a view model)
//! replaces its copy with the result.
//!
//! # Lifecycle
//!
//! ```rust
//! use pot::{Failure, Pot, PotState};
//! use pot::clock::Timestamp;
//!
//! let t0 = Timestamp::from_millis(1_000);
//!
//! // Nothing requested yet.
//! let users: Pot<Vec<&str>> = Pot::Empty;
//!
//! // Fetch started with a budget of two retries.
//! let users = users.pending_at(2, t0);
//! assert_eq!(users.state(), PotState::Pending);
//!
//! // The fetch failed; the caller decides to retry.
//! let users = users.fail(Failure::msg("503")).retry_at(t0);
//! assert!(users.is_failed()); // fail() reset the budget to zero
//!
//! // A later fetch succeeds: completion is just a new Ready value.
//! let users = Pot::ready(vec!["ada", "grace"]);
//! assert_eq!(users.get().map(|v| v.len()), Ok(2));
//! ```

mod combinators;
mod transition;

#[cfg(test)]
mod tests;

use std::time::Duration;

use crate::clock::{Clock, SystemClock, Timestamp};
use crate::failure::{EmptyValue, Failure};
use crate::state::PotState;

/// A potential value: absent, loading, loaded, or failed, with or without a
/// previously loaded ("stale") value.
///
/// `Empty`, `Pending` and `Failed` carry no value; `Ready`, `PendingStale`
/// and `FailedStale` do. The stale variants keep showing the last good value
/// while a reload is in flight or after it failed.
///
/// # Example
///
/// ```rust
/// use pot::Pot;
/// use pot::clock::Timestamp;
///
/// let profile = Pot::ready("ada");
/// let refreshing = profile.pending_at(3, Timestamp::from_millis(10));
///
/// assert!(refreshing.is_pending());
/// assert!(refreshing.is_stale());
/// assert_eq!(refreshing.get(), Ok(&"ada"));
/// assert_eq!(refreshing.retries_left(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Pot<T> {
    /// Nothing has been requested.
    Empty,
    /// A current, successfully loaded value.
    Ready(T),
    /// A load is in flight and there is no earlier value.
    Pending {
        /// Remaining automatic retries.
        retries_left: u32,
        /// When the load started.
        start_time: Timestamp,
    },
    /// A load is in flight while an earlier value is still shown.
    PendingStale {
        /// The earlier value.
        value: T,
        /// Remaining automatic retries.
        retries_left: u32,
        /// When the load started.
        start_time: Timestamp,
    },
    /// The last load failed and there is no earlier value.
    Failed {
        /// Why the load failed.
        failure: Failure,
        /// Remaining automatic retries.
        retries_left: u32,
    },
    /// The last load failed while an earlier value is still shown.
    FailedStale {
        /// The earlier value.
        value: T,
        /// Why the load failed.
        failure: Failure,
        /// Remaining automatic retries.
        retries_left: u32,
    },
}

impl<T> Pot<T> {
    // ========== Constructors ==========

    /// An empty pot.
    #[inline]
    pub fn empty() -> Self {
        Pot::Empty
    }

    /// A ready pot holding `value`.
    #[inline]
    pub fn ready(value: T) -> Self {
        Pot::Ready(value)
    }

    /// A pending pot with `retries_left` retries, started at `start_time`.
    #[inline]
    pub fn pending_since(retries_left: u32, start_time: Timestamp) -> Self {
        Pot::Pending {
            retries_left,
            start_time,
        }
    }

    /// A failed pot with no retries left.
    #[inline]
    pub fn failed(failure: impl Into<Failure>) -> Self {
        Pot::Failed {
            failure: failure.into(),
            retries_left: 0,
        }
    }

    /// Build a pot from a load result: `Ok` is `Ready`, `Err` is `Failed`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::Pot;
    /// use std::num::ParseIntError;
    ///
    /// let parsed: Pot<i32> = Pot::from_result("42".parse::<i32>());
    /// assert_eq!(parsed, Pot::Ready(42));
    ///
    /// let broken: Pot<i32> = Pot::from_result("x".parse::<i32>());
    /// assert!(broken.failure().is_some_and(|f| f.is::<ParseIntError>()));
    /// ```
    pub fn from_result<E>(result: Result<T, E>) -> Self
    where
        E: Into<Failure>,
    {
        match result {
            Ok(value) => Pot::Ready(value),
            Err(error) => Pot::failed(error),
        }
    }

    // ========== Predicates ==========

    /// Returns `true` if no value is carried (`Empty`, `Pending`, `Failed`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Pot::Empty | Pot::Pending { .. } | Pot::Failed { .. })
    }

    /// Returns `true` if a value is carried.
    #[inline]
    pub fn non_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Returns `true` for `Pending` and `PendingStale`.
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, Pot::Pending { .. } | Pot::PendingStale { .. })
    }

    /// Returns `true` for `PendingStale` and `FailedStale`.
    #[inline]
    pub fn is_stale(&self) -> bool {
        matches!(self, Pot::PendingStale { .. } | Pot::FailedStale { .. })
    }

    /// Returns `true` for `Failed` and `FailedStale`.
    #[inline]
    pub fn is_failed(&self) -> bool {
        matches!(self, Pot::Failed { .. } | Pot::FailedStale { .. })
    }

    /// Returns `true` only for `Ready`: a value is carried and it is current.
    #[inline]
    pub fn is_ready(&self) -> bool {
        !self.is_empty() && !self.is_stale()
    }

    /// Remaining automatic retries; always `0` for `Empty` and `Ready`.
    #[inline]
    pub fn retries_left(&self) -> u32 {
        match self {
            Pot::Empty | Pot::Ready(_) => 0,
            Pot::Pending { retries_left, .. }
            | Pot::PendingStale { retries_left, .. }
            | Pot::Failed { retries_left, .. }
            | Pot::FailedStale { retries_left, .. } => *retries_left,
        }
    }

    /// Returns `true` if at least one retry is left.
    #[inline]
    pub fn can_retry(&self) -> bool {
        self.retries_left() > 0
    }

    /// The coarse lifecycle tag. Stale variants report their base phase.
    pub fn state(&self) -> PotState {
        match self {
            Pot::Empty => PotState::Empty,
            Pot::Ready(_) => PotState::Ready,
            Pot::Pending { .. } | Pot::PendingStale { .. } => PotState::Pending,
            Pot::Failed { .. } | Pot::FailedStale { .. } => PotState::Failed,
        }
    }

    /// When the current load started, for `Pending` and `PendingStale`.
    #[inline]
    pub fn start_time(&self) -> Option<Timestamp> {
        match self {
            Pot::Pending { start_time, .. } | Pot::PendingStale { start_time, .. } => {
                Some(*start_time)
            }
            _ => None,
        }
    }

    /// How long the current load has been in flight at `now`.
    ///
    /// `None` unless the pot is pending.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::Pot;
    /// use pot::clock::Timestamp;
    /// use std::time::Duration;
    ///
    /// let loading: Pot<()> = Pot::pending_since(0, Timestamp::from_millis(500));
    /// assert_eq!(
    ///     loading.duration_at(Timestamp::from_millis(800)),
    ///     Some(Duration::from_millis(300))
    /// );
    /// assert_eq!(Pot::<()>::Empty.duration_at(Timestamp::from_millis(800)), None);
    /// ```
    #[inline]
    pub fn duration_at(&self, now: Timestamp) -> Option<Duration> {
        self.start_time().map(|start| now.duration_since(start))
    }

    /// [`duration_at`](Pot::duration_at) measured against `clock`.
    #[inline]
    pub fn duration_with(&self, clock: &impl Clock) -> Option<Duration> {
        self.duration_at(clock.now())
    }

    /// [`duration_at`](Pot::duration_at) measured against the wall clock.
    #[inline]
    pub fn duration(&self) -> Option<Duration> {
        self.duration_with(&SystemClock)
    }

    /// The carried failure, for `Failed` and `FailedStale`.
    #[inline]
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Pot::Failed { failure, .. } | Pot::FailedStale { failure, .. } => Some(failure),
            _ => None,
        }
    }

    // ========== Extractors ==========

    /// Borrow the carried value.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyValue`] for `Empty`, `Pending` and `Failed`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::{EmptyValue, Pot};
    ///
    /// assert_eq!(Pot::ready(7).get(), Ok(&7));
    /// assert_eq!(Pot::<i32>::Empty.get(), Err(EmptyValue));
    /// ```
    #[inline]
    pub fn get(&self) -> Result<&T, EmptyValue> {
        self.value().ok_or(EmptyValue)
    }

    /// Borrow the carried value, if any.
    #[inline]
    pub fn value(&self) -> Option<&T> {
        match self {
            Pot::Ready(value)
            | Pot::PendingStale { value, .. }
            | Pot::FailedStale { value, .. } => Some(value),
            Pot::Empty | Pot::Pending { .. } | Pot::Failed { .. } => None,
        }
    }

    /// Take the carried value, panicking if there is none.
    ///
    /// # Panics
    ///
    /// Panics on `Empty`, `Pending` and `Failed`.
    #[inline]
    pub fn unwrap(self) -> T {
        match self.into_option() {
            Some(value) => value,
            None => panic!("called `Pot::unwrap()` on an empty value"),
        }
    }

    /// Take the carried value, panicking with `msg` if there is none.
    ///
    /// # Panics
    ///
    /// Panics with `msg` on `Empty`, `Pending` and `Failed`.
    #[inline]
    pub fn expect(self, msg: &str) -> T {
        match self.into_option() {
            Some(value) => value,
            None => panic!("{}", msg),
        }
    }

    /// Convert `&Pot<T>` to `Pot<&T>`, keeping all metadata.
    ///
    /// Lets the consuming combinators run on a borrowed pot.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::Pot;
    ///
    /// let name = Pot::ready(String::from("ada"));
    /// let len = name.as_ref().map(|s| s.len());
    /// assert_eq!(len, Pot::Ready(3));
    /// assert_eq!(name, Pot::Ready(String::from("ada")));
    /// ```
    pub fn as_ref(&self) -> Pot<&T> {
        match self {
            Pot::Empty => Pot::Empty,
            Pot::Ready(value) => Pot::Ready(value),
            Pot::Pending {
                retries_left,
                start_time,
            } => Pot::Pending {
                retries_left: *retries_left,
                start_time: *start_time,
            },
            Pot::PendingStale {
                value,
                retries_left,
                start_time,
            } => Pot::PendingStale {
                value,
                retries_left: *retries_left,
                start_time: *start_time,
            },
            Pot::Failed {
                failure,
                retries_left,
            } => Pot::Failed {
                failure: failure.clone(),
                retries_left: *retries_left,
            },
            Pot::FailedStale {
                value,
                failure,
                retries_left,
            } => Pot::FailedStale {
                value,
                failure: failure.clone(),
                retries_left: *retries_left,
            },
        }
    }

    // ========== Iteration ==========

    /// Iterate over the carried value: zero or one element.
    ///
    /// Each call starts a fresh iterator.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::Pot;
    ///
    /// let p = Pot::ready(1);
    /// assert_eq!(p.iter().count(), 1);
    /// assert_eq!(p.iter().count(), 1);
    /// assert_eq!(Pot::<i32>::Empty.iter().next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> std::option::IntoIter<&T> {
        self.value().into_iter()
    }

    pub(crate) fn variant_name(&self) -> &'static str {
        match self {
            Pot::Empty => "empty",
            Pot::Ready(_) => "ready",
            Pot::Pending { .. } => "pending",
            Pot::PendingStale { .. } => "pending_stale",
            Pot::Failed { .. } => "failed",
            Pot::FailedStale { .. } => "failed_stale",
        }
    }
}

// ========== Trait Implementations ==========

impl<T> Default for Pot<T> {
    /// Returns `Pot::Empty`.
    fn default() -> Self {
        Pot::Empty
    }
}

impl<T> From<Option<T>> for Pot<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Pot::Ready(value),
            None => Pot::Empty,
        }
    }
}

impl<T> IntoIterator for Pot<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_option().into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Pot<T> {
    type Item = &'a T;
    type IntoIter = std::option::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
