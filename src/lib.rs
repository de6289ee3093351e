//! # Pot
//!
//! > *A value you don't have yet.*
//!
//! A Rust library for modelling remote data as it loads: absent, loading,
//! loaded, reloading with a stale value, failed, or failed with a stale value.
//!
//! ## Philosophy
//!
//! **Pot** keeps the load lifecycle out of ad-hoc boolean flags:
//! - One immutable value per point in the lifecycle
//! - Pure transitions (`pending`, `fail`, `retry`) that return a new pot
//! - The familiar `Option` vocabulary (`map`, `and_then`, `filter`, `fold`, ...)
//!   over whatever value is currently available
//!
//! Fetching, scheduling and rendering belong to the code that holds the pot.
//!
//! ## Quick Example
//!
//! ```rust
//! use pot::{Failure, Pot, PotState};
//! use pot::clock::Timestamp;
//!
//! let t0 = Timestamp::from_millis(0);
//!
//! // Show cached data while refreshing.
//! let feed = Pot::ready(vec!["hello"]).pending_at(2, t0);
//! assert_eq!(feed.state(), PotState::Pending);
//! assert!(feed.is_stale());
//!
//! // The refresh failed; the cached data is still there.
//! let feed = feed.fail(Failure::msg("offline"));
//! assert!(feed.is_failed());
//! assert_eq!(feed.get().map(|items| items.len()), Ok(1));
//!
//! // Render without caring which variant we are in.
//! let count = feed.as_ref().map(|items| items.len()).get_or_else(|| 0);
//! assert_eq!(count, 1);
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for `Pot`, `Failure` and `Timestamp`
//! - `tracing`: trace-level events for every state change
//! - `proptest`: `Arbitrary` for `Pot`
//! - `jitter`: randomized delays in [`RetryPolicy`]

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod clock;
pub mod either;
pub mod event;
pub mod failure;
mod pot;
pub mod retry;
pub mod state;
pub mod testing;

#[cfg(feature = "serde")]
mod serde_impl;

// Re-exports
pub use either::Either;
pub use event::PotEvent;
pub use failure::{EmptyValue, Failure, RetriesExhausted};
pub use pot::Pot;
pub use retry::RetryPolicy;
pub use state::PotState;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::clock::{Clock, FixedClock, SystemClock, Timestamp};
    pub use crate::either::Either;
    pub use crate::event::PotEvent;
    pub use crate::failure::{EmptyValue, Failure, RetriesExhausted};
    pub use crate::pot::Pot;
    pub use crate::retry::RetryPolicy;
    pub use crate::state::PotState;
}
