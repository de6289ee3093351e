//! Unit tests for `Pot` queries, transitions and combinators.

use super::*;
use crate::either::Either;
use crate::failure::RetriesExhausted;
use std::cell::Cell;
use std::fmt;

const T0: Timestamp = Timestamp::from_millis(1_000);
const T1: Timestamp = Timestamp::from_millis(4_000);

#[derive(Debug, Clone, PartialEq)]
struct NetworkError;

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("network unreachable")
    }
}

impl std::error::Error for NetworkError {}

#[derive(Debug)]
struct ParseError;

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("bad payload")
    }
}

impl std::error::Error for ParseError {}

fn net() -> Failure {
    Failure::new(NetworkError)
}

/// One instance of every variant, all carrying `7` where a value fits.
fn all_variants() -> Vec<Pot<i32>> {
    vec![
        Pot::Empty,
        Pot::Ready(7),
        Pot::Pending {
            retries_left: 2,
            start_time: T0,
        },
        Pot::PendingStale {
            value: 7,
            retries_left: 2,
            start_time: T0,
        },
        Pot::Failed {
            failure: net(),
            retries_left: 2,
        },
        Pot::FailedStale {
            value: 7,
            failure: net(),
            retries_left: 2,
        },
    ]
}

// ========== Predicates ==========

#[test]
fn test_predicate_table() {
    // (is_empty, is_pending, is_stale, is_failed, is_ready)
    let expected = [
        (true, false, false, false, false),
        (false, false, false, false, true),
        (true, true, false, false, false),
        (false, true, true, false, false),
        (true, false, false, true, false),
        (false, false, true, true, false),
    ];

    for (pot, flags) in all_variants().iter().zip(expected) {
        assert_eq!(
            (
                pot.is_empty(),
                pot.is_pending(),
                pot.is_stale(),
                pot.is_failed(),
                pot.is_ready()
            ),
            flags,
            "flags for {:?}",
            pot
        );
        assert_eq!(pot.non_empty(), !pot.is_empty());
        assert_eq!(pot.value().is_some(), pot.non_empty());
    }
}

#[test]
fn test_state_tags() {
    let states: Vec<PotState> = all_variants().iter().map(Pot::state).collect();
    assert_eq!(
        states,
        vec![
            PotState::Empty,
            PotState::Ready,
            PotState::Pending,
            PotState::Pending,
            PotState::Failed,
            PotState::Failed,
        ]
    );
}

#[test]
fn test_retries_left_is_zero_for_empty_and_ready() {
    assert_eq!(Pot::<i32>::Empty.retries_left(), 0);
    assert_eq!(Pot::Ready(1).retries_left(), 0);
    assert!(!Pot::Ready(1).can_retry());
    assert!(Pot::<i32>::pending_since(1, T0).can_retry());
    assert!(!Pot::<i32>::pending_since(0, T0).can_retry());
}

#[test]
fn test_duration_only_for_pending_variants() {
    let durations: Vec<Option<Duration>> = all_variants()
        .iter()
        .map(|p| p.duration_at(T1))
        .collect();
    let three_secs = Some(Duration::from_secs(3));
    assert_eq!(
        durations,
        vec![None, None, three_secs, three_secs, None, None]
    );
}

#[test]
fn test_duration_with_clock() {
    let clock = crate::clock::ManualClock::new(T0);
    let pot: Pot<()> = Pot::Empty.pending_with(0, &clock);
    clock.advance(Duration::from_millis(120));
    assert_eq!(pot.duration_with(&clock), Some(Duration::from_millis(120)));
}

#[test]
fn test_wall_clock_duration_is_available_while_pending() {
    let pot: Pot<()> = Pot::Empty.pending(1);
    assert!(pot.duration().is_some());
    assert!(Pot::<()>::Empty.duration().is_none());
}

// ========== pending ==========

#[test]
fn test_pending_from_each_variant() {
    let results: Vec<Pot<i32>> = all_variants()
        .into_iter()
        .map(|p| p.pending_at(5, T1))
        .collect();

    assert_eq!(
        results,
        vec![
            Pot::Pending {
                retries_left: 5,
                start_time: T1
            },
            Pot::PendingStale {
                value: 7,
                retries_left: 5,
                start_time: T1
            },
            Pot::Pending {
                retries_left: 5,
                start_time: T0
            },
            Pot::PendingStale {
                value: 7,
                retries_left: 5,
                start_time: T0
            },
            Pot::Failed {
                failure: net(),
                retries_left: 5
            },
            Pot::PendingStale {
                value: 7,
                retries_left: 5,
                start_time: T1
            },
        ]
    );
}

#[test]
fn test_pending_keeping_current_budget() {
    let pot: Pot<i32> = Pot::pending_since(4, T0);
    let retries = pot.retries_left();
    assert_eq!(pot.pending_at(retries, T1), Pot::pending_since(4, T0));
}

#[test]
fn test_ready_pending_is_stale() {
    let pot = Pot::ready("v").pending_at(3, T0);
    assert!(pot.is_stale());
    assert!(!pot.is_empty());
    assert_eq!(pot.retries_left(), 3);
    assert_eq!(pot.get(), Ok(&"v"));
}

// ========== fail ==========

#[test]
fn test_fail_from_each_variant_resets_retries() {
    let err = Failure::new(ParseError);
    for pot in all_variants() {
        let carried = pot.value().copied();
        let failed = pot.fail(err.clone());

        assert_eq!(failed.retries_left(), 0);
        assert_eq!(failed.failure(), Some(&err));
        match carried {
            Some(value) => assert_eq!(
                failed,
                Pot::FailedStale {
                    value,
                    failure: err.clone(),
                    retries_left: 0
                }
            ),
            None => assert_eq!(
                failed,
                Pot::Failed {
                    failure: err.clone(),
                    retries_left: 0
                }
            ),
        }
    }
}

#[test]
fn test_fail_accepts_plain_errors() {
    let failed: Pot<i32> = Pot::pending_since(5, T0).fail(NetworkError);
    assert_eq!(failed, Pot::failed(NetworkError));
}

// ========== retry ==========

#[test]
fn test_retry_is_identity_on_empty_and_ready() {
    assert_eq!(Pot::<i32>::Empty.retry_at(T1), Pot::Empty);
    assert_eq!(Pot::Ready(3).retry_at(T1), Pot::Ready(3));
}

#[test]
fn test_retry_with_budget() {
    let results: Vec<Pot<i32>> = all_variants()
        .into_iter()
        .skip(2)
        .map(|p| p.retry_at(T1))
        .collect();

    assert_eq!(
        results,
        vec![
            Pot::Pending {
                retries_left: 1,
                start_time: T0
            },
            Pot::PendingStale {
                value: 7,
                retries_left: 1,
                start_time: T0
            },
            Pot::Pending {
                retries_left: 1,
                start_time: T1
            },
            Pot::PendingStale {
                value: 7,
                retries_left: 1,
                start_time: T1
            },
        ]
    );
}

#[test]
fn test_retry_exhausted_without_value() {
    let pending: Pot<i32> = Pot::pending_since(0, T0);
    let failed: Pot<i32> = Pot::Failed {
        failure: net(),
        retries_left: 0,
    };

    for pot in [pending, failed] {
        let retried = pot.retry_at(T1);
        assert_eq!(
            retried,
            Pot::Failed {
                failure: Failure::retries_exhausted(),
                retries_left: 0
            }
        );
    }
}

#[test]
fn test_retry_exhausted_keeps_value_and_drops_old_failure() {
    let pot = Pot::FailedStale {
        value: "old",
        failure: net(),
        retries_left: 0,
    };
    let retried = pot.retry_at(T1);

    assert_eq!(retried.get(), Ok(&"old"));
    assert!(retried.failure().is_some_and(|f| f.is::<RetriesExhausted>()));
    assert!(!retried.failure().is_some_and(|f| f.is::<NetworkError>()));
}

#[test]
fn test_retry_counts_down_to_exhaustion() {
    let mut pot: Pot<()> = Pot::pending_since(2, T0);
    pot = pot.retry_at(T1);
    assert_eq!(pot.retries_left(), 1);
    pot = pot.retry_at(T1);
    assert_eq!(pot.retries_left(), 0);
    assert!(pot.is_pending());
    pot = pot.retry_at(T1);
    assert!(pot.is_failed());
    assert!(pot.failure().is_some_and(Failure::is_retries_exhausted));
}

// ========== Extractors ==========

#[test]
fn test_get_on_valueless_variants() {
    for pot in all_variants() {
        if pot.is_empty() {
            assert_eq!(pot.get(), Err(EmptyValue));
        } else {
            assert_eq!(pot.get(), Ok(&7));
        }
    }
}

#[test]
#[should_panic(expected = "called `Pot::unwrap()` on an empty value")]
fn test_unwrap_panics_when_empty() {
    Pot::<i32>::pending_since(1, T0).unwrap();
}

#[test]
#[should_panic(expected = "profile not loaded")]
fn test_expect_panics_with_message() {
    Pot::<i32>::Empty.expect("profile not loaded");
}

#[test]
fn test_unwrap_stale_value() {
    let pot = Pot::Ready(9).fail(net());
    assert_eq!(pot.unwrap(), 9);
}

#[test]
fn test_get_or_else_is_lazy() {
    let calls = Cell::new(0);
    let default = || {
        calls.set(calls.get() + 1);
        0
    };

    assert_eq!(Pot::Ready(5).get_or_else(default), 5);
    assert_eq!(calls.get(), 0);

    assert_eq!(Pot::<i32>::Empty.get_or_else(default), 0);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_unwrap_or() {
    assert_eq!(Pot::Ready(5).unwrap_or(1), 5);
    assert_eq!(Pot::failed(net()).unwrap_or(1), 1);
}

#[test]
fn test_as_ref_keeps_metadata() {
    let pot = Pot::PendingStale {
        value: String::from("x"),
        retries_left: 2,
        start_time: T0,
    };
    let borrowed = pot.as_ref();
    assert_eq!(borrowed.retries_left(), 2);
    assert_eq!(borrowed.start_time(), Some(T0));
    assert_eq!(borrowed.get(), Ok(&&String::from("x")));
}

// ========== Combinators ==========

#[test]
fn test_map_collapses_state() {
    let mapped: Vec<Pot<i32>> = all_variants().into_iter().map(|p| p.map(|x| x * 2)).collect();
    assert_eq!(
        mapped,
        vec![
            Pot::Empty,
            Pot::Ready(14),
            Pot::Empty,
            Pot::Ready(14),
            Pot::Empty,
            Pot::Ready(14),
        ]
    );
}

#[test]
fn test_and_then_returns_inner_state() {
    let pot = Pot::Ready(1).and_then(|_| Pot::<i32>::failed(net()));
    assert!(pot.is_failed());

    let pot = Pot::<i32>::pending_since(1, T0).and_then(|x| Pot::Ready(x + 1));
    assert_eq!(pot, Pot::Empty);
}

#[test]
fn test_flatten() {
    let inner: Pot<i32> = Pot::pending_since(3, T0);
    assert_eq!(Pot::Ready(inner.clone()).flatten(), inner);

    let outer: Pot<Pot<i32>> = Pot::Failed {
        failure: net(),
        retries_left: 1,
    };
    assert_eq!(outer.flatten(), Pot::Empty);
}

#[test]
fn test_fold() {
    assert_eq!(Pot::Ready(2).fold(|| -1, |x| x * 10), 20);
    assert_eq!(Pot::<i32>::failed(net()).fold(|| -1, |x| x * 10), -1);
}

#[test]
fn test_filter_keeps_empty_and_matching() {
    let pending: Pot<i32> = Pot::pending_since(1, T0);
    assert_eq!(pending.clone().filter(|_| false), pending);

    let stale = Pot::PendingStale {
        value: 4,
        retries_left: 1,
        start_time: T0,
    };
    assert_eq!(stale.clone().filter(|x| *x > 3), stale);
    assert_eq!(stale.clone().filter(|x| *x > 5), Pot::Empty);
    assert_eq!(stale.clone().filter_not(|x| *x > 5), stale);
    assert_eq!(stale.filter_not(|x| *x > 3), Pot::Empty);
}

#[test]
fn test_contains_exists_for_all() {
    let ready = Pot::Ready(3);
    let empty = Pot::<i32>::Empty;

    assert!(ready.contains(&3));
    assert!(!ready.contains(&4));
    assert!(!empty.contains(&3));

    assert!(ready.exists(|x| *x == 3));
    assert!(!empty.exists(|_| true));

    assert!(ready.for_all(|x| *x == 3));
    assert!(!ready.for_all(|x| *x == 4));
    assert!(empty.for_all(|_| false));
}

#[test]
fn test_for_each() {
    let seen = Cell::new(None);
    Pot::Ready(8).for_each(|x| seen.set(Some(*x)));
    assert_eq!(seen.get(), Some(8));

    let seen = Cell::new(None);
    Pot::<i32>::Empty.for_each(|x| seen.set(Some(*x)));
    assert_eq!(seen.get(), None);
}

#[test]
fn test_filter_map() {
    let halve = |x: i32| (x % 2 == 0).then_some(x / 2);
    assert_eq!(Pot::Ready(10).filter_map(halve), Pot::Ready(5));
    assert_eq!(Pot::Ready(9).filter_map(halve), Pot::Empty);
    assert_eq!(Pot::<i32>::failed(net()).filter_map(halve), Pot::Empty);
}

#[test]
fn test_or_else_is_lazy() {
    let calls = Cell::new(0);
    let alt = || {
        calls.set(calls.get() + 1);
        Pot::Ready(0)
    };

    assert_eq!(Pot::Ready(1).or_else(alt), Pot::Ready(1));
    assert_eq!(calls.get(), 0);
    assert_eq!(Pot::<i32>::pending_since(1, T0).or_else(alt), Pot::Ready(0));
    assert_eq!(calls.get(), 1);
}

// ========== Recovery ==========

#[test]
fn test_recover_is_identity_everywhere() {
    for pot in all_variants() {
        let expected = pot.clone();
        assert_eq!(pot.recover(|_| Some(0)), expected);
    }
}

#[test]
fn test_recover_with_matching_handler() {
    let failed: Pot<i32> = Pot::failed(NetworkError);
    let recovered = failed.recover_with(|f| f.is::<NetworkError>().then(|| Pot::Ready(0)));
    assert_eq!(recovered, Pot::Ready(0));
}

#[test]
fn test_recover_with_returns_result_unwrapped() {
    let failed: Pot<i32> = Pot::failed(NetworkError);
    let recovered = failed.recover_with(|_| Some(Pot::pending_since(3, T0)));
    assert_eq!(recovered, Pot::pending_since(3, T0));
}

#[test]
fn test_recover_with_non_matching_handler() {
    let failed: Pot<i32> = Pot::failed(NetworkError);
    let recovered = failed
        .clone()
        .recover_with(|f| f.is::<ParseError>().then(|| Pot::Ready(0)));
    assert_eq!(recovered, failed);
}

#[test]
fn test_recover_with_ignores_non_failed() {
    let calls = Cell::new(0);
    for pot in all_variants().into_iter().filter(|p| !p.is_failed()) {
        let expected = pot.clone();
        let out = pot.recover_with(|_| {
            calls.set(calls.get() + 1);
            Some(Pot::Ready(0))
        });
        assert_eq!(out, expected);
    }
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_recover_with_kind_on_stale_failure() {
    let stale = Pot::FailedStale {
        value: 1,
        failure: net(),
        retries_left: 0,
    };
    let recovered = stale
        .clone()
        .recover_with_kind(|_: &NetworkError| Pot::Ready(2));
    assert_eq!(recovered, Pot::Ready(2));

    let untouched = stale.clone().recover_with_kind(|_: &ParseError| Pot::Ready(2));
    assert_eq!(untouched, stale);
}

// ========== Conversions ==========

#[test]
fn test_into_option_and_vec() {
    assert_eq!(Pot::Ready(1).into_option(), Some(1));
    assert_eq!(Pot::<i32>::Empty.into_option(), None);
    assert_eq!(Pot::Ready(1).into_vec(), vec![1]);
    assert_eq!(Pot::<i32>::failed(net()).into_vec(), Vec::<i32>::new());
}

#[test]
fn test_into_result() {
    assert_eq!(Pot::Ready(1).into_result(), Ok(1));
    assert_eq!(
        Pot::FailedStale {
            value: 1,
            failure: net(),
            retries_left: 0
        }
        .into_result(),
        Ok(1)
    );
    assert_eq!(Pot::<i32>::failed(net()).into_result(), Err(net()));
    let err = Pot::<i32>::pending_since(1, T0).into_result().unwrap_err();
    assert!(err.is::<EmptyValue>());
}

#[test]
fn test_to_left_to_right() {
    assert_eq!(Pot::Ready(1).to_left(|| "none"), Either::Left(1));
    assert_eq!(Pot::<i32>::Empty.to_left(|| "none"), Either::Right("none"));
    assert_eq!(Pot::Ready(1).to_right(|| "none"), Either::Right(1));
    assert_eq!(Pot::<i32>::Empty.to_right(|| "none"), Either::Left("none"));
}

#[test]
fn test_iterators_are_restartable() {
    let pot = Pot::Ready(4);
    assert_eq!(pot.iter().collect::<Vec<_>>(), vec![&4]);
    assert_eq!(pot.iter().collect::<Vec<_>>(), vec![&4]);
    assert_eq!((&pot).into_iter().count(), 1);
    assert_eq!(pot.into_iter().collect::<Vec<_>>(), vec![4]);
    assert_eq!(Pot::<i32>::Empty.iter().count(), 0);
}

#[test]
fn test_from_option_and_result() {
    assert_eq!(Pot::from(Some(1)), Pot::Ready(1));
    assert_eq!(Pot::<i32>::from(None), Pot::Empty);
    assert_eq!(Pot::from_result(Ok::<_, NetworkError>(1)), Pot::Ready(1));
    assert_eq!(
        Pot::<i32>::from_result(Err(NetworkError)),
        Pot::Failed {
            failure: net(),
            retries_left: 0
        }
    );
}

#[test]
fn test_default_is_empty() {
    assert_eq!(Pot::<String>::default(), Pot::Empty);
}

#[test]
fn test_start_time_participates_in_equality() {
    assert_ne!(
        Pot::<()>::pending_since(1, T0),
        Pot::<()>::pending_since(1, T1)
    );
}

#[test]
fn test_variant_names() {
    let names: Vec<&str> = all_variants().iter().map(Pot::variant_name).collect();
    assert_eq!(
        names,
        vec![
            "empty",
            "ready",
            "pending",
            "pending_stale",
            "failed",
            "failed_stale"
        ]
    );
}

// ========== Laws ==========

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_pot() -> impl Strategy<Value = Pot<i32>> {
        prop_oneof![
            Just(Pot::Empty),
            any::<i32>().prop_map(Pot::Ready),
            (0u32..5).prop_map(|n| Pot::pending_since(n, T0)),
            (any::<i32>(), 0u32..5).prop_map(|(value, retries_left)| Pot::PendingStale {
                value,
                retries_left,
                start_time: T0
            }),
            (0u32..5).prop_map(|retries_left| Pot::Failed {
                failure: net(),
                retries_left
            }),
            (any::<i32>(), 0u32..5).prop_map(|(value, retries_left)| Pot::FailedStale {
                value,
                failure: net(),
                retries_left
            }),
        ]
    }

    proptest! {
        #[test]
        fn prop_empty_xor_value(pot in any_pot()) {
            prop_assert_ne!(pot.is_empty(), pot.value().is_some());
            prop_assert_eq!(pot.is_ready(), matches!(pot, Pot::Ready(_)));
        }

        #[test]
        fn prop_functor_identity(x: i32) {
            prop_assert_eq!(Pot::Ready(x).map(|v| v), Pot::Ready(x));
        }

        #[test]
        fn prop_and_then_associativity(pot in any_pot()) {
            let f = |x: i32| if x % 3 == 0 { Pot::Empty } else { Pot::Ready(x.wrapping_mul(2)) };
            let g = |x: i32| if x % 2 == 0 { Pot::Ready(x.wrapping_add(1)) } else { Pot::failed(NetworkError) };

            prop_assert_eq!(
                pot.clone().and_then(f).and_then(g),
                pot.and_then(|x| f(x).and_then(g))
            );
        }

        #[test]
        fn prop_fail_resets_retries(pot in any_pot()) {
            let had_value = pot.non_empty();
            let failed = pot.fail(ParseError);
            prop_assert_eq!(failed.retries_left(), 0);
            prop_assert_eq!(failed.is_stale(), had_value);
        }

        #[test]
        fn prop_retry_never_increases_budget(pot in any_pot()) {
            let before = pot.retries_left();
            let after = pot.retry_at(T1).retries_left();
            prop_assert!(after <= before);
        }

        #[test]
        fn prop_pending_preserves_value(pot in any_pot(), retries in 0u32..10) {
            let value = pot.value().copied();
            prop_assert_eq!(pot.pending_at(retries, T1).value().copied(), value);
        }
    }
}
