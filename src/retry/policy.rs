//! Retry budgets and backoff schedules for pots.

use std::time::Duration;

use crate::clock::Timestamp;
use crate::pot::Pot;

/// A retry policy: a retry budget plus a backoff schedule.
///
/// A policy only computes numbers. The pot holds the budget and the caller
/// does the waiting.
///
/// The budget defaults to zero retries; set it with
/// [`with_max_retries`](RetryPolicy::with_max_retries).
///
/// # Examples
///
/// ```rust
/// use pot::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::exponential(Duration::from_millis(100))
///     .with_max_retries(5)
///     .with_max_delay(Duration::from_secs(1));
///
/// assert_eq!(policy.max_retries(), 5);
/// assert_eq!(policy.delay_for_attempt(4), Some(Duration::from_secs(1)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    strategy: RetryStrategy,
    max_retries: u32,
    max_delay: Option<Duration>,
    jitter: JitterStrategy,
}

/// How the delay grows from one retry to the next.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryStrategy {
    /// Retry straight away.
    Immediate,
    /// Same delay before every retry.
    Constant(Duration),
    /// Delay grows geometrically: base * factor^attempt.
    Exponential {
        /// Delay before the first retry.
        base: Duration,
        /// Growth factor per retry.
        factor: f64,
    },
}

/// Randomness mixed into each delay.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JitterStrategy {
    /// Use the delay as computed.
    #[default]
    None,
    /// Spread the delay by up to this fraction either way.
    Proportional(f64),
    /// Anywhere from zero up to the computed delay.
    Full,
}

impl RetryPolicy {
    /// Retry without delay, up to `max_retries` times.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pot::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::immediate(2);
    /// assert_eq!(policy.delay_for_attempt(0), Some(Duration::ZERO));
    /// assert_eq!(policy.delay_for_attempt(2), None);
    /// ```
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            strategy: RetryStrategy::Immediate,
            max_retries,
            max_delay: None,
            jitter: JitterStrategy::None,
        }
    }

    /// Wait `delay` before every retry.
    pub fn constant(delay: Duration) -> Self {
        Self::immediate(0).with_strategy(RetryStrategy::Constant(delay))
    }

    /// Create a policy whose delay doubles with every retry.
    ///
    /// Use [`with_factor`](RetryPolicy::with_factor) for a different growth
    /// rate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pot::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::exponential(Duration::from_millis(100))
    ///     .with_max_retries(5);
    ///
    /// // Delay doubles: 100ms, 200ms, 400ms, ...
    /// assert_eq!(policy.delay_for_attempt(0), Some(Duration::from_millis(100)));
    /// assert_eq!(policy.delay_for_attempt(1), Some(Duration::from_millis(200)));
    /// assert_eq!(policy.delay_for_attempt(2), Some(Duration::from_millis(400)));
    /// ```
    pub fn exponential(base: Duration) -> Self {
        Self::immediate(0).with_strategy(RetryStrategy::Exponential { base, factor: 2.0 })
    }

    fn with_strategy(mut self, strategy: RetryStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the retry budget.
    ///
    /// This does not include the initial attempt.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the growth factor of an exponential policy.
    ///
    /// Factors below `1.0` are raised to `1.0`. Has no effect on other
    /// strategies.
    pub fn with_factor(mut self, factor: f64) -> Self {
        if let RetryStrategy::Exponential { factor: f, .. } = &mut self.strategy {
            *f = factor.max(1.0);
        }
        self
    }

    /// Cap every delay at `d`, jitter included.
    pub fn with_max_delay(mut self, cap: Duration) -> Self {
        self.max_delay = Some(cap);
        self
    }

    /// Spread each delay by up to `factor` of itself.
    ///
    /// `0.25` means the actual delay lands within ±25% of the calculated one.
    ///
    /// **Note**: Requires the `jitter` feature. Without it, delays are
    /// returned unchanged.
    pub fn with_jitter(mut self, factor: f64) -> Self {
        self.jitter = JitterStrategy::Proportional(factor.clamp(0.0, 1.0));
        self
    }

    /// Use full jitter: a random delay between 0 and the calculated delay.
    ///
    /// **Note**: Requires the `jitter` feature.
    pub fn with_full_jitter(mut self) -> Self {
        self.jitter = JitterStrategy::Full;
        self
    }

    /// Retries granted by [`start`](RetryPolicy::start).
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// The delay cap, if any.
    pub fn max_delay(&self) -> Option<Duration> {
        self.max_delay
    }

    /// Jitter mixed into delays.
    pub fn jitter(&self) -> &JitterStrategy {
        &self.jitter
    }

    /// Backoff schedule.
    pub fn strategy(&self) -> &RetryStrategy {
        &self.strategy
    }

    /// Calculate the delay before retry N (0-indexed), without jitter.
    ///
    /// Returns None once the budget is spent.
    pub fn delay_for_attempt(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_retries {
            return None;
        }

        let raw = match &self.strategy {
            RetryStrategy::Immediate => Duration::ZERO,
            RetryStrategy::Constant(delay) => *delay,
            RetryStrategy::Exponential { base, factor } => {
                let exp = i32::try_from(attempt).unwrap_or(i32::MAX);
                scale(*base, factor.powi(exp))
            }
        };

        Some(self.max_delay.map_or(raw, |cap| raw.min(cap)))
    }

    /// Calculate the delay before retry N with jitter applied.
    pub fn delay_with_jitter(&self, attempt: u32) -> Option<Duration> {
        self.delay_for_attempt(attempt)
            .map(|delay| self.jitter.apply(delay, self.max_delay))
    }

    /// Start loading `pot` with this policy's budget.
    pub fn start<T>(&self, pot: Pot<T>, now: Timestamp) -> Pot<T> {
        pot.pending_at(self.max_retries, now)
    }

    /// Which retry `pot` is on, counted from this policy's budget.
    ///
    /// Returns None when the pot has no retries left.
    pub fn attempt_of<T>(&self, pot: &Pot<T>) -> Option<u32> {
        if !pot.can_retry() {
            return None;
        }
        Some(self.max_retries.saturating_sub(pot.retries_left()))
    }

    /// How long to wait before retrying `pot`, jitter included.
    ///
    /// Returns None when `pot` cannot retry: `retry` would exhaust it.
    pub fn next_delay<T>(&self, pot: &Pot<T>) -> Option<Duration> {
        let attempt = self.attempt_of(pot)?;
        let delay = self.delay_with_jitter(attempt)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "next retry delay");

        Some(delay)
    }
}

impl Default for RetryPolicy {
    /// No retries.
    fn default() -> Self {
        RetryPolicy::immediate(0)
    }
}

impl JitterStrategy {
    /// Apply jitter to `delay`, then cap the result at `max_delay`.
    pub fn apply(&self, delay: Duration, max_delay: Option<Duration>) -> Duration {
        let out = match *self {
            JitterStrategy::None => delay,
            JitterStrategy::Proportional(spread) => {
                let low = scale(delay, 1.0 - spread);
                let high = scale(delay, 1.0 + spread);
                random_between(low, high).unwrap_or(delay)
            }
            JitterStrategy::Full => random_between(Duration::ZERO, delay).unwrap_or(delay),
        };
        max_delay.map_or(out, |cap| out.min(cap))
    }
}

/// `delay * by`, rounded to the nanosecond and saturating at `Duration::MAX`.
fn scale(delay: Duration, by: f64) -> Duration {
    let nanos = (delay.as_nanos() as f64 * by.max(0.0)).round();
    if nanos >= u64::MAX as f64 {
        Duration::MAX
    } else {
        Duration::from_nanos(nanos as u64)
    }
}

/// Uniform pick in `low..=high`, or None without the `jitter` feature.
#[cfg(feature = "jitter")]
fn random_between(low: Duration, high: Duration) -> Option<Duration> {
    use rand::Rng;
    let (low, high) = (low.as_nanos() as u64, high.as_nanos() as u64);
    if high <= low {
        return Some(Duration::from_nanos(low));
    }
    Some(Duration::from_nanos(rand::rng().random_range(low..=high)))
}

#[cfg(not(feature = "jitter"))]
fn random_between(_low: Duration, _high: Duration) -> Option<Duration> {
    None
}
