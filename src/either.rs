//! A neutral two-way sum type, returned by [`Pot::to_left`](crate::Pot::to_left)
//! and [`Pot::to_right`](crate::Pot::to_right).
//!
//! Unlike `Result`, neither side means failure: `to_left` puts the pot's
//! value on the left and the fallback on the right, `to_right` the reverse.
//!
//! # Examples
//!
//! ```rust
//! use pot::{Either, Pot};
//!
//! let cached: Pot<&str> = Pot::ready("cached");
//! assert_eq!(cached.to_right(|| 0), Either::Right("cached"));
//!
//! let missing: Pot<&str> = Pot::Empty;
//! assert_eq!(missing.to_right(|| 0), Either::Left(0));
//! ```

/// One of two values: what `to_left`/`to_right` put on either side of a pot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    /// The left variant
    Left(L),
    /// The right variant
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    /// Returns the left value if present.
    #[inline]
    pub fn into_left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// Returns the right value if present.
    #[inline]
    pub fn into_right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    /// Collapse either side into one value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::{Either, Pot};
    ///
    /// let label = Pot::ready(3)
    ///     .to_left(|| "nothing yet")
    ///     .fold(|n| format!("{} items", n), |s| s.to_string());
    /// assert_eq!(label, "3 items");
    /// ```
    #[inline]
    pub fn fold<T, F, G>(self, on_left: F, on_right: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => on_left(l),
            Either::Right(r) => on_right(r),
        }
    }

    /// Mirror the sides.
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Either::Left(l) => Either::Right(l),
            Either::Right(r) => Either::Left(r),
        }
    }

    /// `Right` as `Ok`, `Left` as `Err`.
    #[inline]
    pub fn into_result(self) -> Result<R, L> {
        match self {
            Either::Left(l) => Err(l),
            Either::Right(r) => Ok(r),
        }
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    fn from(either: Either<L, R>) -> Self {
        either.into_result()
    }
}
