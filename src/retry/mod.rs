//! Retry policies for pots.
//!
//! A [`RetryPolicy`] is pure data describing how many times a load may be
//! retried and how long to wait before each attempt. It never sleeps or
//! schedules anything: the code that owns the fetch reads the delay and
//! decides when to call [`Pot::retry`](crate::Pot::retry).
//!
//! # Quick Start
//!
//! ```rust
//! use pot::{Failure, Pot, RetryPolicy};
//! use pot::clock::Timestamp;
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::exponential(Duration::from_millis(100)).with_max_retries(3);
//! let now = Timestamp::EPOCH;
//!
//! // Start loading with the policy's budget.
//! let pot: Pot<String> = policy.start(Pot::Empty, now);
//! assert_eq!(pot.retries_left(), 3);
//!
//! // First attempt failed: wait 100ms, then retry.
//! assert_eq!(policy.next_delay(&pot), Some(Duration::from_millis(100)));
//! let pot = pot.retry_at(now);
//!
//! // Second attempt failed: wait 200ms.
//! assert_eq!(policy.next_delay(&pot), Some(Duration::from_millis(200)));
//! ```
//!
//! # Strategies
//!
//! - **Immediate**: retry without waiting
//! - **Constant**: fixed delay between retries
//! - **Exponential**: delay multiplied by a factor (default 2) each retry
//!
//! # Jitter Support
//!
//! Enable the `jitter` feature to spread retries out randomly:
//!
//! ```toml
//! pot = { version = "...", features = ["jitter"] }
//! ```

mod policy;

pub use policy::{JitterStrategy, RetryPolicy, RetryStrategy};
