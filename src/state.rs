//! Coarse lifecycle tag for a [`Pot`](crate::Pot).

use std::fmt;

/// Which phase of the load lifecycle a pot is in.
///
/// Staleness is orthogonal: `PendingStale` reports [`PotState::Pending`] and
/// `FailedStale` reports [`PotState::Failed`]. Check
/// [`Pot::is_stale`](crate::Pot::is_stale) to tell them apart.
///
/// # Examples
///
/// ```
/// use pot::{Pot, PotState};
/// use pot::clock::Timestamp;
///
/// let stale = Pot::ready("cached").pending_at(1, Timestamp::EPOCH);
/// assert_eq!(stale.state(), PotState::Pending);
/// assert!(stale.is_stale());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PotState {
    /// Nothing has been requested.
    Empty,
    /// A value is available and current.
    Ready,
    /// A load is in flight.
    Pending,
    /// The last load failed.
    Failed,
}

impl PotState {
    /// Lower-case name of the state.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PotState::Empty => "empty",
            PotState::Ready => "ready",
            PotState::Pending => "pending",
            PotState::Failed => "failed",
        }
    }
}

impl fmt::Display for PotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
