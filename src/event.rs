//! Load-lifecycle events and the pure reducer that applies them.
//!
//! A store that holds a `Pot<T>` usually reacts to the same handful of events:
//! a fetch starts, succeeds, fails, the user asks to retry, or the data is
//! cleared. [`Pot::apply`] folds one such event into a pot. It is a plain
//! function; serializing concurrent updates is the store's job.
//!
//! # Examples
//!
//! ```rust
//! use pot::{Failure, Pot, PotEvent};
//! use pot::clock::Timestamp;
//!
//! let now = Timestamp::from_millis(10);
//!
//! let pot: Pot<u32> = Pot::Empty
//!     .apply(PotEvent::Started { retries: 1 }, now)
//!     // First failure is absorbed by the retry budget.
//!     .apply(PotEvent::Failed(Failure::msg("503")), now);
//! assert!(pot.is_pending());
//! assert_eq!(pot.retries_left(), 0);
//!
//! // Second failure has nothing left to spend.
//! let pot = pot.apply(PotEvent::Failed(Failure::msg("503")), now);
//! assert!(pot.is_failed());
//!
//! let pot = pot.apply(PotEvent::Succeeded(42), now);
//! assert_eq!(pot, Pot::Ready(42));
//! ```

use crate::clock::Timestamp;
use crate::failure::Failure;
use crate::pot::Pot;

/// Something that happened to the load behind a pot.
#[derive(Debug, Clone, PartialEq)]
pub enum PotEvent<T> {
    /// A fetch started with the given retry budget.
    Started {
        /// Retries the fetch may spend.
        retries: u32,
    },
    /// The fetch produced a value.
    Succeeded(T),
    /// The fetch failed.
    Failed(Failure),
    /// Someone asked for another attempt.
    RetryRequested,
    /// The data was discarded.
    Cleared,
}

impl<T> PotEvent<T> {
    /// Shorthand for [`PotEvent::Failed`] from any error.
    pub fn failed(failure: impl Into<Failure>) -> Self {
        PotEvent::Failed(failure.into())
    }
}

impl<T> Pot<T> {
    /// Apply a lifecycle event at time `now`.
    ///
    /// | Event                 | Result                                                   |
    /// |-----------------------|----------------------------------------------------------|
    /// | `Started { retries }` | `pending_at(retries, now)`                               |
    /// | `Succeeded(x)`        | `Ready(x)`                                               |
    /// | `Failed(f)`           | `retry_at(now)` if pending with budget left, else `fail(f)` |
    /// | `RetryRequested`      | `retry_at(now)`                                          |
    /// | `Cleared`             | `Empty`                                                  |
    ///
    /// After applying, a pending result means the caller should issue a
    /// (new) fetch.
    pub fn apply(self, event: PotEvent<T>, now: Timestamp) -> Self {
        match event {
            PotEvent::Started { retries } => self.pending_at(retries, now),
            PotEvent::Succeeded(value) => Pot::Ready(value),
            PotEvent::Failed(failure) => {
                if self.is_pending() && self.can_retry() {
                    self.retry_at(now)
                } else {
                    self.fail(failure)
                }
            }
            PotEvent::RetryRequested => self.retry_at(now),
            PotEvent::Cleared => Pot::Empty,
        }
    }
}
