//! Fetch Lifecycle Example
//!
//! Walks a profile through the life of a remote value:
//! - First load from nothing
//! - Refresh while showing the cached value
//! - A failed refresh that keeps the stale value
//! - Rendering every state with the combinators
//!
//! Run with: cargo run --example fetch_lifecycle

use std::time::Duration;

use pot::clock::{Clock, ManualClock, Timestamp};
use pot::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Profile {
    name: String,
    followers: u32,
}

fn render(pot: &Pot<Profile>, clock: &impl Clock) -> String {
    let body = pot
        .as_ref()
        .map(|p| format!("{} ({} followers)", p.name, p.followers))
        .get_or_else(|| "-".to_string());

    match pot.state() {
        PotState::Empty => "nothing loaded".to_string(),
        PotState::Ready => body,
        PotState::Pending => format!(
            "{body} [loading for {:?}, {} retries left]",
            pot.duration_with(clock).unwrap_or_default(),
            pot.retries_left()
        ),
        PotState::Failed => format!(
            "{body} [error: {}]",
            pot.failure().map(Failure::message).unwrap_or_default()
        ),
    }
}

// ==================== First Load ====================

fn example_first_load(clock: &ManualClock) -> Pot<Profile> {
    println!("\n=== Example 1: First Load ===");

    let pot: Pot<Profile> = Pot::empty();
    println!("  {}", render(&pot, clock));

    let pot = pot.pending_with(2, clock);
    clock.advance(Duration::from_millis(120));
    println!("  {}", render(&pot, clock));

    let pot = pot.apply(
        PotEvent::Succeeded(Profile {
            name: "Ada".to_string(),
            followers: 1_815,
        }),
        clock.now(),
    );
    println!("  {}", render(&pot, clock));
    pot
}

// ==================== Refresh ====================

fn example_refresh(pot: Pot<Profile>, clock: &ManualClock) -> Pot<Profile> {
    println!("\n=== Example 2: Refresh With Stale Data ===");

    let pot = pot.pending_with(1, clock);
    clock.advance(Duration::from_millis(300));
    println!("  stale: {}, {}", pot.is_stale(), render(&pot, clock));

    let pot = pot.fail(Failure::msg("connection reset"));
    println!("  stale: {}, {}", pot.is_stale(), render(&pot, clock));
    pot
}

// ==================== Retry ====================

fn example_retry(pot: Pot<Profile>, clock: &ManualClock) {
    println!("\n=== Example 3: Retry Until Exhausted ===");

    // A fresh failure carries no budget; a new request grants one.
    let mut pot = pot.pending_with(2, clock);
    for attempt in 1.. {
        clock.advance(Duration::from_millis(50));
        pot = pot.retry_with(clock);
        println!("  retry {attempt}: {}", render(&pot, clock));
        if pot.is_failed() {
            break;
        }
    }

    let kept = pot.value().map(|p| p.name.as_str()).unwrap_or("none");
    println!("  value kept through exhaustion: {kept}");
}

// ==================== Combinators ====================

fn example_combinators() {
    println!("\n=== Example 4: Combinators ===");

    let followers: Pot<u32> = Pot::ready(1_815);

    let popular = followers.clone().filter(|n| *n > 1_000);
    println!("  popular: {:?}", popular.value());

    let tier = followers
        .clone()
        .and_then(|n| if n > 10_000 { Pot::ready("gold") } else { Pot::ready("silver") });
    println!("  tier: {:?}", tier.into_option());

    let total = followers.fold(|| 0, |n| n * 2);
    println!("  doubled via fold: {total}");

    let nested: Pot<Pot<&str>> = Pot::ready(Pot::ready("inner"));
    println!("  flattened: {:?}", nested.flatten());

    let as_result: Result<u32, Failure> = Pot::<u32>::empty().into_result();
    println!("  empty as result: {:?}", as_result.map_err(|e| e.to_string()));
}

fn main() {
    println!("Fetch Lifecycle Examples");
    println!("========================");

    let clock = ManualClock::new(Timestamp::from_millis(0));

    let loaded = example_first_load(&clock);
    let refreshed = example_refresh(loaded, &clock);
    example_retry(refreshed, &clock);
    example_combinators();

    println!("\n=== All examples completed successfully! ===");
}
