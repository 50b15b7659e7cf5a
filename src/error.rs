//! Recoverable, tagged errors.
//!
//! Errors that a caller is expected to handle travel as the payload of
//! [`Result::Err`](crate::Result::Err). Every such error implements
//! [`ResultError`], which gives it a constant tag for structural matching and
//! an optional [`Origin`] describing a foreign cause.
//!
//! [`StdError`] is the tagged error produced by the bridging functions in
//! [`crate::bridge`] whenever a foreign fault is converted into an `Err`.

use crate::panic::{Origin, origin_suffix};

/// A recoverable error with a constant discriminant.
///
/// Implement it by hand or with `#[derive(ResultError)]`.
///
/// # Examples
///
/// ```rust
/// use okerr::ResultError;
///
/// #[derive(Debug)]
/// struct NotFound;
///
/// impl std::fmt::Display for NotFound {
///     fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         formatter.write_str("resource not found")
///     }
/// }
///
/// impl std::error::Error for NotFound {}
///
/// impl ResultError for NotFound {
///     const TAG: &'static str = "NotFound";
/// }
///
/// assert_eq!(NotFound.tag(), "NotFound");
/// assert_eq!(NotFound.name(), "NotFound");
/// assert!(NotFound.has_tag("NotFound"));
/// ```
pub trait ResultError: std::error::Error + Send + 'static {
    /// The discriminant used for structural matching.
    const TAG: &'static str;

    /// The foreign cause wrapped by this error, if any.
    fn origin(&self) -> Option<&Origin> {
        None
    }

    /// Returns [`Self::TAG`].
    fn tag(&self) -> &'static str {
        Self::TAG
    }

    /// `TAG`, or `"<TAG> from <origin name>"` when the origin is named.
    fn name(&self) -> String {
        format!("{}{}", Self::TAG, origin_suffix(self.origin()))
    }

    /// Returns `true` if this error carries `tag`.
    fn has_tag(&self, tag: &str) -> bool {
        Self::TAG == tag
    }
}

/// The standard tagged error produced at bridging boundaries.
///
/// Displays as `"<name>: <message>"`, for example
/// `"StdError from ParseIntError: invalid digit found in string"`.
#[derive(Debug, thiserror::Error)]
#[error("StdError{}: {}", origin_suffix(Some(.origin)), .origin.message().unwrap_or(UNKNOWN_MESSAGE))]
pub struct StdError {
    origin: Origin,
}

const UNKNOWN_MESSAGE: &str = "unknown error";

impl StdError {
    /// Wraps an origin.
    #[must_use]
    pub const fn new(origin: Origin) -> Self {
        Self { origin }
    }

    /// Wraps a standard library error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::{ResultError, StdError};
    ///
    /// let error = StdError::from_error("x".parse::<i32>().unwrap_err());
    /// assert_eq!(error.name(), "StdError from ParseIntError");
    /// assert_eq!(error.message(), "invalid digit found in string");
    /// ```
    #[must_use]
    pub fn from_error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + 'static,
    {
        Self::new(Origin::from_error(error))
    }

    /// Wraps a payload caught from an unwind.
    #[must_use]
    pub fn from_payload(payload: Box<dyn std::any::Any + Send>) -> Self {
        Self::new(Origin::from_payload(payload))
    }

    /// The message of the origin, or `"unknown error"`.
    #[must_use]
    pub fn message(&self) -> &str {
        self.origin.message().unwrap_or(UNKNOWN_MESSAGE)
    }

    /// Gives back the origin.
    #[must_use]
    pub fn into_origin(self) -> Origin {
        self.origin
    }
}

impl ResultError for StdError {
    const TAG: &'static str = "StdError";

    fn origin(&self) -> Option<&Origin> {
        Some(&self.origin)
    }
}

impl From<Origin> for StdError {
    fn from(origin: Origin) -> Self {
        Self::new(origin)
    }
}

static_assertions::assert_impl_all!(StdError: Send, std::error::Error);
