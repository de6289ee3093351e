//! Retry Backoff Example
//!
//! Drives a flaky fetch with a [`RetryPolicy`] and a simulated clock:
//! - The policy grants the retry budget when the fetch starts
//! - Each failure is fed back as an event; the pot decides whether to retry
//! - The policy turns the remaining budget into a backoff delay
//!
//! Run with: cargo run --example retry_backoff
//! Add `--features jitter` to randomize the delays.

use std::time::Duration;

use pot::clock::{Clock, ManualClock, Timestamp};
use pot::prelude::*;

/// A server that fails the first `failures` requests.
struct FlakyServer {
    failures: u32,
    calls: u32,
}

impl FlakyServer {
    fn fetch(&mut self) -> Result<String, Failure> {
        self.calls += 1;
        if self.calls <= self.failures {
            Err(Failure::msg(format!("503 on call {}", self.calls)))
        } else {
            Ok(format!("payload after {} calls", self.calls))
        }
    }
}

fn run(policy: &RetryPolicy, server: &mut FlakyServer, clock: &ManualClock) -> Pot<String> {
    let mut pot = policy.start(Pot::empty(), clock.now());

    while pot.is_pending() {
        let event = match server.fetch() {
            Ok(body) => PotEvent::Succeeded(body),
            Err(failure) => PotEvent::Failed(failure),
        };
        let delay = policy.next_delay(&pot);
        pot = pot.apply(event, clock.now());

        if pot.is_pending() {
            let delay = delay.unwrap_or_default();
            println!(
                "  {} retries left, waiting {:?}",
                pot.retries_left(),
                delay
            );
            clock.advance(delay);
        }
    }

    pot
}

fn report(pot: &Pot<String>, clock: &ManualClock, started: Timestamp) {
    let elapsed = clock.now().duration_since(started);
    match pot.get() {
        Ok(body) if pot.is_ready() => println!("  ready after {elapsed:?}: {body}"),
        _ => println!(
            "  gave up after {elapsed:?}: {}",
            pot.failure().map(Failure::message).unwrap_or_default()
        ),
    }
}

fn main() {
    println!("Retry Backoff Examples");
    println!("======================");

    let policy = RetryPolicy::exponential(Duration::from_millis(100))
        .with_max_retries(4)
        .with_max_delay(Duration::from_millis(500))
        .with_jitter(0.2);

    println!("\n=== Example 1: Recovers Within Budget ===");
    let clock = ManualClock::new(Timestamp::from_millis(0));
    let started = clock.now();
    let mut server = FlakyServer {
        failures: 2,
        calls: 0,
    };
    let pot = run(&policy, &mut server, &clock);
    report(&pot, &clock, started);

    println!("\n=== Example 2: Budget Runs Out ===");
    let clock = ManualClock::new(Timestamp::from_millis(0));
    let started = clock.now();
    let mut server = FlakyServer {
        failures: 10,
        calls: 0,
    };
    let pot = run(&policy, &mut server, &clock);
    report(&pot, &clock, started);
    println!("  calls made: {}", server.calls);

    println!("\n=== Example 3: Delay Schedule ===");
    for attempt in 0..=policy.max_retries() {
        match policy.delay_for_attempt(attempt) {
            Some(delay) => println!("  retry {attempt}: {delay:?}"),
            None => println!("  retry {attempt}: budget spent"),
        }
    }

    println!("\n=== All examples completed successfully! ===");
}
