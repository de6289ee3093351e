//! Combinators over the carried value.
//!
//! These work on the value slot only. They treat every valued variant
//! (`Ready`, `PendingStale`, `FailedStale`) as "has a value" and every other
//! variant as "has none", like `Option`. Transforming combinators return
//! `Ready`: mapping is a successful transform of what you have now, so the
//! pending, failed and retry metadata is dropped.

use std::error::Error as StdError;

use super::Pot;
use crate::either::Either;
use crate::failure::{EmptyValue, Failure};

impl<T> Pot<T> {
    // ========== Extractors ==========

    /// Return the carried value or compute a default.
    ///
    /// `default` runs only when no value is carried.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::Pot;
    ///
    /// assert_eq!(Pot::ready(1).get_or_else(|| 0), 1);
    /// assert_eq!(Pot::<i32>::Empty.get_or_else(|| 0), 0);
    /// ```
    #[inline]
    pub fn get_or_else<F>(self, default: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.into_option().unwrap_or_else(default)
    }

    /// Return the carried value or `default`.
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        self.into_option().unwrap_or(default)
    }

    // ========== Transformations ==========

    /// Transform the carried value into a `Ready` pot.
    ///
    /// Valueless pots become `Empty`. Stale, pending and failed metadata is
    /// dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::{Failure, Pot};
    ///
    /// let stale = Pot::ready(20).fail(Failure::msg("offline"));
    /// assert_eq!(stale.map(|n| n + 1), Pot::Ready(21));
    ///
    /// let failed: Pot<i32> = Pot::failed(Failure::msg("offline"));
    /// assert_eq!(failed.map(|n| n + 1), Pot::Empty);
    /// ```
    #[inline]
    pub fn map<U, F>(self, f: F) -> Pot<U>
    where
        F: FnOnce(T) -> U,
    {
        match self.into_option() {
            Some(value) => Pot::Ready(f(value)),
            None => Pot::Empty,
        }
    }

    /// Chain a computation that produces another pot (flatMap).
    ///
    /// The result of `f` is returned as-is, so it may be in any state.
    /// Valueless pots become `Empty`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::Pot;
    /// use pot::clock::Timestamp;
    ///
    /// let user_id = Pot::ready(7);
    /// let posts: Pot<Vec<&str>> = user_id.and_then(|_| Pot::pending_since(1, Timestamp::EPOCH));
    /// assert!(posts.is_pending());
    /// ```
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Pot<U>
    where
        F: FnOnce(T) -> Pot<U>,
    {
        match self.into_option() {
            Some(value) => f(value),
            None => Pot::Empty,
        }
    }

    /// Transform the value with a partial function (collect).
    ///
    /// `Ready(y)` when a value is carried and `f` returns `Some(y)`, `Empty`
    /// otherwise.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::Pot;
    ///
    /// let even = |n: i32| (n % 2 == 0).then_some(n / 2);
    /// assert_eq!(Pot::ready(8).filter_map(even), Pot::Ready(4));
    /// assert_eq!(Pot::ready(7).filter_map(even), Pot::Empty);
    /// ```
    #[inline]
    pub fn filter_map<U, F>(self, f: F) -> Pot<U>
    where
        F: FnOnce(T) -> Option<U>,
    {
        self.into_option().and_then(f).into()
    }

    /// Keep the pot if it is valueless or its value satisfies `predicate`,
    /// otherwise collapse to `Empty`.
    ///
    /// A kept pot is returned unchanged, metadata included.
    #[inline]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        if self.for_all(predicate) {
            self
        } else {
            Pot::Empty
        }
    }

    /// Keep the pot if it is valueless or its value fails `predicate`,
    /// otherwise collapse to `Empty`.
    #[inline]
    pub fn filter_not<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        self.filter(|value| !predicate(value))
    }

    /// Return `self` if it carries a value, otherwise the lazily computed
    /// `alternative`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::Pot;
    ///
    /// let cached: Pot<&str> = Pot::Empty;
    /// assert_eq!(cached.or_else(|| Pot::ready("default")), Pot::Ready("default"));
    /// ```
    #[inline]
    pub fn or_else<F>(self, alternative: F) -> Self
    where
        F: FnOnce() -> Pot<T>,
    {
        if self.non_empty() {
            self
        } else {
            alternative()
        }
    }

    // ========== Folding & queries ==========

    /// `f(value)` if a value is carried, otherwise `if_empty()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::Pot;
    ///
    /// let label = |p: Pot<u32>| p.fold(|| "loading".to_string(), |n| format!("{} rows", n));
    /// assert_eq!(label(Pot::ready(3)), "3 rows");
    /// assert_eq!(label(Pot::Empty), "loading");
    /// ```
    #[inline]
    pub fn fold<U, D, F>(self, if_empty: D, f: F) -> U
    where
        D: FnOnce() -> U,
        F: FnOnce(T) -> U,
    {
        match self.into_option() {
            Some(value) => f(value),
            None => if_empty(),
        }
    }

    /// Returns `true` if the carried value equals `elem`.
    #[inline]
    pub fn contains(&self, elem: &T) -> bool
    where
        T: PartialEq,
    {
        self.value() == Some(elem)
    }

    /// Returns `true` if a value is carried and satisfies `predicate`.
    #[inline]
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&T) -> bool,
    {
        self.value().is_some_and(predicate)
    }

    /// Returns `true` if no value is carried or the value satisfies
    /// `predicate`.
    #[inline]
    pub fn for_all<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&T) -> bool,
    {
        self.value().is_none_or(predicate)
    }

    /// Run `f` on the carried value, if any.
    #[inline]
    pub fn for_each<F>(&self, f: F)
    where
        F: FnOnce(&T),
    {
        if let Some(value) = self.value() {
            f(value);
        }
    }

    // ========== Recovery ==========

    /// Returns `self` unchanged on every variant.
    ///
    /// The handler is accepted for symmetry with
    /// [`recover_with`](Pot::recover_with) but never called, matching the
    /// established behaviour of this operation: it does not turn a failure
    /// into `Ready`. Use `recover_with` and wrap the value in `Pot::Ready`
    /// to actually recover.
    #[inline]
    pub fn recover<F>(self, _handler: F) -> Self
    where
        F: FnOnce(&Failure) -> Option<T>,
    {
        self
    }

    /// Replace a failed pot with the handler's result.
    ///
    /// On `Failed` and `FailedStale`, if `handler` returns `Some(pot)` for
    /// the carried failure, that pot is returned as-is. Otherwise, and on
    /// every other variant, `self` is returned unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::{Failure, Pot};
    ///
    /// let failed: Pot<i32> = Pot::failed(Failure::msg("not found"));
    ///
    /// let recovered = failed
    ///     .clone()
    ///     .recover_with(|f| (f.message() == "not found").then(|| Pot::ready(0)));
    /// assert_eq!(recovered, Pot::Ready(0));
    ///
    /// let untouched = failed.clone().recover_with(|_| None);
    /// assert_eq!(untouched, failed);
    /// ```
    pub fn recover_with<F>(self, handler: F) -> Self
    where
        F: FnOnce(&Failure) -> Option<Pot<T>>,
    {
        let recovered = self.failure().and_then(handler);
        recovered.unwrap_or(self)
    }

    /// Replace a failed pot whose failure is of type `E`.
    ///
    /// Like [`recover_with`](Pot::recover_with), matching on the concrete
    /// error type instead of inspecting the failure by hand.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::Pot;
    /// use std::io;
    ///
    /// let failed: Pot<String> = Pot::failed(io::Error::other("disk"));
    ///
    /// let recovered = failed
    ///     .clone()
    ///     .recover_with_kind(|_: &io::Error| Pot::ready("fallback".to_string()));
    /// assert_eq!(recovered, Pot::Ready("fallback".to_string()));
    ///
    /// let untouched = failed
    ///     .clone()
    ///     .recover_with_kind(|_: &std::fmt::Error| Pot::ready(String::new()));
    /// assert_eq!(untouched, failed);
    /// ```
    pub fn recover_with_kind<E, F>(self, handler: F) -> Self
    where
        E: StdError + 'static,
        F: FnOnce(&E) -> Pot<T>,
    {
        let recovered = self
            .failure()
            .and_then(|failure| failure.downcast_ref::<E>())
            .map(handler);
        recovered.unwrap_or(self)
    }

    // ========== Conversions ==========

    /// The carried value, if any.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Pot::Ready(value)
            | Pot::PendingStale { value, .. }
            | Pot::FailedStale { value, .. } => Some(value),
            Pot::Empty | Pot::Pending { .. } | Pot::Failed { .. } => None,
        }
    }

    /// `Ok` with the carried value, or `Err` with the carried failure.
    ///
    /// `Empty` and `Pending` give an [`EmptyValue`] failure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::{EmptyValue, Failure, Pot};
    ///
    /// assert_eq!(Pot::ready(1).into_result(), Ok(1));
    ///
    /// let failed: Pot<i32> = Pot::failed(Failure::msg("gone"));
    /// assert_eq!(failed.into_result(), Err(Failure::msg("gone")));
    ///
    /// let empty = Pot::<i32>::Empty.into_result().unwrap_err();
    /// assert!(empty.is::<EmptyValue>());
    /// ```
    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            Pot::Ready(value)
            | Pot::PendingStale { value, .. }
            | Pot::FailedStale { value, .. } => Ok(value),
            Pot::Failed { failure, .. } => Err(failure),
            Pot::Empty | Pot::Pending { .. } => Err(Failure::new(EmptyValue)),
        }
    }

    /// A vector of zero or one element.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }

    /// `Left(value)` if a value is carried, otherwise `Right(right())`.
    #[inline]
    pub fn to_left<R, F>(self, right: F) -> Either<T, R>
    where
        F: FnOnce() -> R,
    {
        match self.into_option() {
            Some(value) => Either::Left(value),
            None => Either::Right(right()),
        }
    }

    /// `Right(value)` if a value is carried, otherwise `Left(left())`.
    #[inline]
    pub fn to_right<L, F>(self, left: F) -> Either<L, T>
    where
        F: FnOnce() -> L,
    {
        match self.into_option() {
            Some(value) => Either::Right(value),
            None => Either::Left(left()),
        }
    }
}

impl<T> Pot<Pot<T>> {
    /// Flatten a nested pot.
    ///
    /// The inner pot if the outer one carries it, otherwise `Empty`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot::Pot;
    ///
    /// let nested = Pot::ready(Pot::ready(1));
    /// assert_eq!(nested.flatten(), Pot::Ready(1));
    ///
    /// let outer: Pot<Pot<i32>> = Pot::Empty;
    /// assert_eq!(outer.flatten(), Pot::Empty);
    /// ```
    #[inline]
    pub fn flatten(self) -> Pot<T> {
        self.into_option().unwrap_or(Pot::Empty)
    }
}
