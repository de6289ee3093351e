//! Serde support (feature-gated).
//!
//! `Pot<T>` serializes as an externally tagged enum with snake_case variant
//! names, `Timestamp` as integer milliseconds, and [`Failure`] as its message.
//! The concrete error type does not survive the trip: a deserialized failure
//! is a [`Failure::msg`].
//!
//! # Example
//!
//! ```rust,ignore
//! use pot::{Failure, Pot};
//!
//! let pot: Pot<u32> = Pot::ready(7).fail(Failure::msg("offline"));
//! let json = serde_json::to_string(&pot).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"failed_stale":{"value":7,"failure":"offline","retries_left":0}}"#
//! );
//!
//! let back: Pot<u32> = serde_json::from_str(&json).unwrap();
//! assert_eq!(back, pot);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::failure::Failure;

impl Serialize for Failure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Failure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let message = String::deserialize(deserializer)?;
        Ok(Failure::msg(message))
    }
}
