//! Demonstrates the trace events emitted by pot transitions
//!
//! Run with: cargo run --example tracing_demo --features tracing

use std::time::Duration;

use pot::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    tracing::info!("Starting tracing demo");

    let t0 = Timestamp::from_millis(0);
    let policy = RetryPolicy::constant(Duration::from_millis(250)).with_max_retries(1);

    let pot: Pot<&str> = policy.start(Pot::empty(), t0);
    let pot = pot.apply(PotEvent::Succeeded("v1"), t0);

    // Refresh, fail, and run out of retries while keeping "v1".
    let pot = policy.start(pot, t0);
    let _ = policy.next_delay(&pot);
    let pot = pot.retry_at(t0).retry_at(t0);

    tracing::info!(state = %pot.state(), stale = pot.is_stale(), "Finished: {:?}", pot.value());
}
