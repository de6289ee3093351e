//! Error types carried by and produced from a [`Pot`](crate::Pot).
//!
//! Two kinds of error live here:
//!
//! - [`Failure`]: the opaque domain error stored inside `Failed` and
//!   `FailedStale`. The pot never interprets it; it only stores, exposes and
//!   replaces it.
//! - [`EmptyValue`] and [`RetriesExhausted`]: errors the pot itself produces,
//!   when a value is requested from a valueless pot and when `retry` runs out
//!   of budget.
//!
//! # Examples
//!
//! ```
//! use pot::{Failure, RetriesExhausted};
//! use std::io;
//!
//! let failure = Failure::new(io::Error::new(io::ErrorKind::TimedOut, "slow upstream"));
//! assert!(failure.is::<io::Error>());
//! assert_eq!(failure.message(), "slow upstream");
//!
//! let exhausted = Failure::retries_exhausted();
//! assert!(exhausted.is::<RetriesExhausted>());
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Error returned when a value is requested from a pot that carries none.
///
/// Produced by [`Pot::get`](crate::Pot::get) on `Empty`, `Pending` and
/// `Failed`, and by [`Pot::into_result`](crate::Pot::into_result) on `Empty`
/// and `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EmptyValue;

impl fmt::Display for EmptyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("empty value")
    }
}

impl StdError for EmptyValue {}

/// Synthetic error stored by [`Pot::retry`](crate::Pot::retry) when no
/// retries are left.
///
/// Seeing this inside a failed pot means automatic retrying must stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RetriesExhausted;

impl fmt::Display for RetriesExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no more retries left")
    }
}

impl StdError for RetriesExhausted {}

/// A plain-text failure, used by [`Failure::msg`] and by deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FailureMessage(pub String);

impl fmt::Display for FailureMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for FailureMessage {}

/// An opaque, cheaply clonable domain error.
///
/// `Failure` wraps any `Error + Send + Sync + 'static` behind an `Arc`, so a
/// failed pot can be cloned and shared without requiring the error itself to
/// be `Clone`. The concrete type is remembered and can be recovered with
/// [`downcast_ref`](Failure::downcast_ref).
///
/// `Failure` deliberately does not implement `std::error::Error` itself, which
/// keeps the blanket `From<E: Error>` conversion coherent. Use
/// [`as_error`](Failure::as_error) to get at the underlying error object.
///
/// # Equality
///
/// Two failures are equal when they share the same allocation, or when they
/// wrap the same concrete type and render the same message.
///
/// # Examples
///
/// ```
/// use pot::Failure;
/// use std::fmt;
///
/// #[derive(Debug)]
/// struct NetworkError;
///
/// impl fmt::Display for NetworkError {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str("network unreachable")
///     }
/// }
///
/// impl std::error::Error for NetworkError {}
///
/// let failure: Failure = NetworkError.into();
/// assert!(failure.is::<NetworkError>());
/// assert_eq!(failure, Failure::new(NetworkError));
/// assert_ne!(failure, Failure::msg("network unreachable"));
/// ```
#[derive(Clone)]
pub struct Failure {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
    kind: &'static str,
}

impl Failure {
    /// Wrap a domain error.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(error),
            kind: std::any::type_name::<E>(),
        }
    }

    /// Create a failure from a plain message.
    ///
    /// # Examples
    ///
    /// ```
    /// use pot::Failure;
    ///
    /// let failure = Failure::msg("upstream returned 503");
    /// assert_eq!(failure.message(), "upstream returned 503");
    /// ```
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(FailureMessage(message.into()))
    }

    /// The failure stored by an exhausted retry.
    pub fn retries_exhausted() -> Self {
        Self::new(RetriesExhausted)
    }

    /// Returns `true` if the wrapped error is of type `E`.
    pub fn is<E>(&self) -> bool
    where
        E: StdError + 'static,
    {
        self.inner.is::<E>()
    }

    /// Returns `true` if this is the synthetic exhausted-retries failure.
    pub fn is_retries_exhausted(&self) -> bool {
        self.is::<RetriesExhausted>()
    }

    /// Borrow the wrapped error as `E`, if that is its concrete type.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.inner.downcast_ref::<E>()
    }

    /// Borrow the wrapped error object.
    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.inner
    }

    /// Type name of the wrapped error.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Rendered message of the wrapped error.
    pub fn message(&self) -> String {
        self.inner.to_string()
    }
}

impl<E> From<E> for Failure
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Failure::new(error)
    }
}

impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.kind == other.kind && self.message() == other.message())
    }
}

impl Eq for Failure {}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("kind", &self.kind)
            .field("error", &self.inner)
            .finish()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner, f)
    }
}

impl AsRef<dyn StdError + Send + Sync + 'static> for Failure {
    fn as_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.as_error()
    }
}
