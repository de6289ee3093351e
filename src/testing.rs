//! Testing utilities for code that holds pots.
//!
//! Assertion macros that print the whole pot on failure, and (behind the
//! `proptest` feature) an [`Arbitrary`](proptest::arbitrary::Arbitrary)
//! implementation that generates every variant.
//!
//! # Examples
//!
//! ```rust
//! use pot::{assert_empty, assert_failed, assert_pending, assert_ready, Failure, Pot};
//! use pot::clock::Timestamp;
//!
//! assert_empty!(Pot::<i32>::Empty);
//! assert_ready!(Pot::ready(1), 1);
//! assert_pending!(Pot::<i32>::pending_since(2, Timestamp::EPOCH));
//! assert_failed!(Pot::<i32>::failed(Failure::msg("boom")));
//! ```
//!
//! Pending pots compare their start time. Freeze time with
//! [`FixedClock`](crate::clock::FixedClock) or the `*_at` transition methods
//! before comparing them with `assert_eq!`.

/// Assert that a pot is `Ready`, optionally with a specific value.
///
/// # Example
///
/// ```rust
/// use pot::{assert_ready, Pot};
///
/// assert_ready!(Pot::ready("ok"));
/// assert_ready!(Pot::ready("ok"), "ok");
/// ```
#[macro_export]
macro_rules! assert_ready {
    ($pot:expr) => {
        match &$pot {
            $crate::Pot::Ready(_) => {}
            other => panic!("Expected Ready, got {:?}", other),
        }
    };
    ($pot:expr, $expected:expr) => {
        match &$pot {
            $crate::Pot::Ready(value) => assert_eq!(value, &$expected),
            other => panic!("Expected Ready({:?}), got {:?}", $expected, other),
        }
    };
}

/// Assert that a pot is `Empty`.
#[macro_export]
macro_rules! assert_empty {
    ($pot:expr) => {
        match &$pot {
            $crate::Pot::Empty => {}
            other => panic!("Expected Empty, got {:?}", other),
        }
    };
}

/// Assert that a pot is `Pending` or `PendingStale`.
#[macro_export]
macro_rules! assert_pending {
    ($pot:expr) => {
        match &$pot {
            p if p.is_pending() => {}
            other => panic!("Expected Pending, got {:?}", other),
        }
    };
}

/// Assert that a pot is `Failed` or `FailedStale`, optionally with a failure
/// of a specific error type.
///
/// # Example
///
/// ```rust
/// use pot::{assert_failed, Pot, RetriesExhausted};
/// use pot::clock::Timestamp;
///
/// let exhausted = Pot::<()>::pending_since(0, Timestamp::EPOCH).retry_at(Timestamp::EPOCH);
/// assert_failed!(exhausted, RetriesExhausted);
/// ```
#[macro_export]
macro_rules! assert_failed {
    ($pot:expr) => {
        match &$pot {
            p if p.is_failed() => {}
            other => panic!("Expected Failed, got {:?}", other),
        }
    };
    ($pot:expr, $kind:ty) => {{
        let pot = &$pot;
        match pot.failure() {
            Some(failure) if failure.is::<$kind>() => {}
            Some(failure) => panic!(
                "Expected Failed with {}, got failure {:?}",
                stringify!($kind),
                failure
            ),
            None => panic!("Expected Failed, got {:?}", pot),
        }
    }};
}

#[cfg(feature = "proptest")]
mod arbitrary {
    use crate::clock::Timestamp;
    use crate::failure::Failure;
    use crate::Pot;
    use proptest::prelude::*;

    impl Arbitrary for Timestamp {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            any::<u64>().prop_map(Timestamp::from_millis).boxed()
        }
    }

    impl Arbitrary for Failure {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            prop_oneof![
                "[a-z ]{1,16}".prop_map(|message: String| Failure::msg(message)),
                Just(Failure::retries_exhausted()),
            ]
            .boxed()
        }
    }

    impl<T> Arbitrary for Pot<T>
    where
        T: Arbitrary + Clone + 'static,
        T::Strategy: 'static,
    {
        type Parameters = T::Parameters;
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
            let value = any_with::<T>(args).boxed();
            let retries = 0u32..8;
            prop_oneof![
                Just(Pot::Empty),
                value.clone().prop_map(Pot::Ready),
                (retries.clone(), any::<Timestamp>()).prop_map(|(retries_left, start_time)| {
                    Pot::Pending {
                        retries_left,
                        start_time,
                    }
                }),
                (value.clone(), retries.clone(), any::<Timestamp>()).prop_map(
                    |(value, retries_left, start_time)| Pot::PendingStale {
                        value,
                        retries_left,
                        start_time,
                    }
                ),
                (any::<Failure>(), retries.clone()).prop_map(|(failure, retries_left)| {
                    Pot::Failed {
                        failure,
                        retries_left,
                    }
                }),
                (value, any::<Failure>(), retries).prop_map(|(value, failure, retries_left)| {
                    Pot::FailedStale {
                        value,
                        failure,
                        retries_left,
                    }
                }),
            ]
            .boxed()
        }
    }
}
