//! `Result` - success or recoverable failure.
//!
//! [`Result<T, E>`] is exactly one of `Ok(T)` or `Err(E)`. Values are never
//! mutated: every combinator consumes `self` and produces a new `Result`,
//! moving the untouched variant's payload through as-is.
//!
//! Only the `unwrap`/`expect` families can fail; they raise a
//! [`Panic`](crate::Panic) instead of returning. Everything else is total.
//!
//! # Examples
//!
//! ```rust
//! use okerr::{Result, err, ok};
//!
//! let parsed: Result<i32, &str> = ok(2);
//! assert_eq!(parsed.and(ok::<_, &str>(3)), ok(3));
//!
//! let failed: Result<i32, &str> = err("a");
//! assert_eq!(failed.and(ok::<i32, &str>(3)), err("a"));
//!
//! let total = ok::<i32, &str>(20)
//!     .map(|x| x + 1)
//!     .and_then(|x| if x > 0 { ok(x * 2) } else { err("negative") });
//! assert_eq!(total.unwrap(), 42);
//! ```

use std::fmt;

use crate::either::Either;
use crate::option::Option;
use crate::panic::{Panic, UnwrapPanic};

/// Success (`Ok`) or recoverable failure (`Err`).
#[must_use = "this `Result` may be an `Err` variant, which should be handled"]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Result<T, E> {
    /// The success variant.
    Ok(T),
    /// The failure variant.
    Err(E),
}

/// Creates `Result::Ok(value)`.
#[inline]
pub const fn ok<T, E>(value: T) -> Result<T, E> {
    Result::Ok(value)
}

/// Creates `Result::Err(error)`.
#[inline]
pub const fn err<T, E>(error: E) -> Result<T, E> {
    Result::Err(error)
}

impl<T, E> Result<T, E> {
    // =========================================================================
    // Type Checking
    // =========================================================================

    /// Returns `true` if this is `Ok`.
    #[inline]
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns `true` if this is `Err`.
    #[inline]
    #[must_use]
    pub const fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    /// Returns `true` if this is `Ok` and the value satisfies `predicate`.
    #[inline]
    #[must_use]
    pub fn is_ok_and<F>(self, predicate: F) -> bool
    where
        F: FnOnce(T) -> bool,
    {
        match self {
            Self::Ok(value) => predicate(value),
            Self::Err(_) => false,
        }
    }

    /// Returns `true` if this is `Err` and the error satisfies `predicate`.
    #[inline]
    #[must_use]
    pub fn is_err_and<F>(self, predicate: F) -> bool
    where
        F: FnOnce(E) -> bool,
    {
        match self {
            Self::Ok(_) => false,
            Self::Err(error) => predicate(error),
        }
    }

    // =========================================================================
    // Projection
    // =========================================================================

    /// Projects onto the success value, discarding any error.
    #[inline]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Option::Some(value),
            Self::Err(_) => Option::None,
        }
    }

    /// Projects onto the error, discarding any success value.
    #[inline]
    pub fn err(self) -> Option<E> {
        match self {
            Self::Ok(_) => Option::None,
            Self::Err(error) => Option::Some(error),
        }
    }

    /// Borrows the payload.
    #[inline]
    pub const fn as_ref(&self) -> Result<&T, &E> {
        match self {
            Self::Ok(value) => Result::Ok(value),
            Self::Err(error) => Result::Err(error),
        }
    }

    /// Mutably borrows the payload.
    #[inline]
    pub fn as_mut(&mut self) -> Result<&mut T, &mut E> {
        match self {
            Self::Ok(value) => Result::Ok(value),
            Self::Err(error) => Result::Err(error),
        }
    }

    // =========================================================================
    // Mapping
    // =========================================================================

    /// Transforms the success value; an `Err` passes through.
    #[inline]
    pub fn map<U, F>(self, function: F) -> Result<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ok(value) => Result::Ok(function(value)),
            Self::Err(error) => Result::Err(error),
        }
    }

    /// Transforms the error; an `Ok` passes through.
    #[inline]
    pub fn map_err<G, F>(self, function: F) -> Result<T, G>
    where
        F: FnOnce(E) -> G,
    {
        match self {
            Self::Ok(value) => Result::Ok(value),
            Self::Err(error) => Result::Err(function(error)),
        }
    }

    /// `function(value)` for `Ok`, `default` for `Err`.
    #[inline]
    #[must_use]
    pub fn map_or<U, F>(self, default: U, function: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ok(value) => function(value),
            Self::Err(_) => default,
        }
    }

    /// `function(value)` for `Ok`, `default(error)` for `Err`.
    #[inline]
    #[must_use]
    pub fn map_or_else<U, D, F>(self, default: D, function: F) -> U
    where
        D: FnOnce(E) -> U,
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ok(value) => function(value),
            Self::Err(error) => default(error),
        }
    }

    /// Calls `function` with the success value and returns `self` unchanged.
    #[inline]
    pub fn inspect<F>(self, function: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Self::Ok(value) = &self {
            function(value);
        }
        self
    }

    /// Calls `function` with the error and returns `self` unchanged.
    #[inline]
    pub fn inspect_err<F>(self, function: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Self::Err(error) = &self {
            function(error);
        }
        self
    }

    // =========================================================================
    // Boolean Combinators
    // =========================================================================

    /// `other` if this is `Ok`, otherwise this `Err`.
    ///
    /// The first failure wins; `other` is dropped when `self` is `Err`.
    #[inline]
    pub fn and<U>(self, other: Result<U, E>) -> Result<U, E> {
        match self {
            Self::Ok(_) => other,
            Self::Err(error) => Result::Err(error),
        }
    }

    /// `function(value)` if this is `Ok`, otherwise this `Err`.
    #[inline]
    pub fn and_then<U, F>(self, function: F) -> Result<U, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        match self {
            Self::Ok(value) => function(value),
            Self::Err(error) => Result::Err(error),
        }
    }

    /// This `Ok` if it is one, otherwise `other`.
    #[inline]
    pub fn or<G>(self, other: Result<T, G>) -> Result<T, G> {
        match self {
            Self::Ok(value) => Result::Ok(value),
            Self::Err(_) => other,
        }
    }

    /// This `Ok` if it is one, otherwise `function(error)`.
    #[inline]
    pub fn or_else<G, F>(self, function: F) -> Result<T, G>
    where
        F: FnOnce(E) -> Result<T, G>,
    {
        match self {
            Self::Ok(value) => Result::Ok(value),
            Self::Err(error) => function(error),
        }
    }

    // =========================================================================
    // Extraction
    // =========================================================================

    /// Dispatches to exactly one handler.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::{Result, err};
    ///
    /// let outcome: Result<u16, &str> = err("timeout");
    /// let text = outcome.match_with(|port| format!("port {port}"), |error| error.to_uppercase());
    /// assert_eq!(text, "TIMEOUT");
    /// ```
    #[inline]
    #[must_use]
    pub fn match_with<R, F, G>(self, on_ok: F, on_err: G) -> R
    where
        F: FnOnce(T) -> R,
        G: FnOnce(E) -> R,
    {
        match self {
            Self::Ok(value) => on_ok(value),
            Self::Err(error) => on_err(error),
        }
    }

    /// The success value, or `default`.
    #[inline]
    #[must_use]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(_) => default,
        }
    }

    /// The success value, or `function(error)`.
    #[inline]
    #[must_use]
    pub fn unwrap_or_else<F>(self, function: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Self::Ok(value) => value,
            Self::Err(error) => function(error),
        }
    }

    /// The success value, or `T::default()`.
    #[inline]
    #[must_use]
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Self::Ok(value) => value,
            Self::Err(_) => T::default(),
        }
    }

    /// The success value.
    ///
    /// # Panics
    ///
    /// Raises a [`Panic`] carrying `message` if this is `Err`.
    #[track_caller]
    pub fn expect(self, message: &str) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(_) => Panic::new(message).raise(),
        }
    }

    /// The error.
    ///
    /// # Panics
    ///
    /// Raises a [`Panic`] carrying `message` if this is `Ok`.
    #[track_caller]
    pub fn expect_err(self, message: &str) -> E {
        match self {
            Self::Ok(_) => Panic::new(message).raise(),
            Self::Err(error) => error,
        }
    }

    /// Converts into the standard library `Result`.
    #[inline]
    pub fn into_std(self) -> std::result::Result<T, E> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Err(error) => Err(error),
        }
    }

    /// Iterates over the success value, if any.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> std::option::IntoIter<&T> {
        self.as_ref().ok().into_std().into_iter()
    }
}

impl<T, E: fmt::Debug> Result<T, E> {
    /// The success value.
    ///
    /// # Panics
    ///
    /// Raises an `UnwrapPanic` embedding the error if this is `Err`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::{Panic, PanicKind, Result, err};
    ///
    /// let failed: Result<i32, &str> = err("boom");
    /// let panic = Panic::capture(|| failed.unwrap()).unwrap_err();
    /// assert_eq!(panic.kind(), PanicKind::Unwrap);
    /// assert!(panic.message().contains("Err(\"boom\")"));
    /// ```
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(error) => UnwrapPanic::new(format!(
                "called `Result::unwrap()` on an `Err` value: Err({error:?})"
            ))
            .raise(),
        }
    }
}

impl<T: fmt::Debug, E> Result<T, E> {
    /// The error.
    ///
    /// # Panics
    ///
    /// Raises an `UnwrapPanic` embedding the value if this is `Ok`.
    #[track_caller]
    pub fn unwrap_err(self) -> E {
        match self {
            Self::Ok(value) => UnwrapPanic::new(format!(
                "called `Result::unwrap_err()` on an `Ok` value: Ok({value:?})"
            ))
            .raise(),
            Self::Err(error) => error,
        }
    }
}

// =============================================================================
// Nesting
// =============================================================================

impl<T, E> Result<Result<T, E>, E> {
    /// Removes one level of nesting.
    ///
    /// `Ok(Ok(a))` becomes `Ok(a)`, `Ok(Err(e))` becomes `Err(e)` and an outer
    /// `Err(e)` stays `Err(e)`.
    #[inline]
    pub fn flatten(self) -> Result<T, E> {
        match self {
            Self::Ok(inner) => inner,
            Self::Err(error) => Result::Err(error),
        }
    }
}

impl<T, E1, E2> Result<Result<T, E2>, E1> {
    /// Removes one level of nesting when the two error types differ.
    ///
    /// The outer error becomes `Either::Left`, the inner one `Either::Right`.
    #[inline]
    pub fn flatten_either(self) -> Result<T, Either<E1, E2>> {
        match self {
            Self::Ok(Result::Ok(value)) => Result::Ok(value),
            Self::Ok(Result::Err(inner)) => Result::Err(Either::Right(inner)),
            Self::Err(outer) => Result::Err(Either::Left(outer)),
        }
    }
}

impl<T, E> Result<Option<T>, E> {
    /// `Ok(Some(v))` becomes `Some(Ok(v))`, `Ok(None)` becomes `None` and
    /// `Err(e)` becomes `Some(Err(e))`.
    #[inline]
    pub fn transpose(self) -> Option<Result<T, E>> {
        match self {
            Self::Ok(Option::Some(value)) => Option::Some(Result::Ok(value)),
            Self::Ok(Option::None) => Option::None,
            Self::Err(error) => Option::Some(Result::Err(error)),
        }
    }
}

// =============================================================================
// Display
// =============================================================================

impl<T: fmt::Display, E: fmt::Display> fmt::Display for Result<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok(value) => write!(formatter, "Ok({value})"),
            Self::Err(error) => write!(formatter, "Err({error})"),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl<T, E> From<std::result::Result<T, E>> for Result<T, E> {
    #[inline]
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(error) => Self::Err(error),
        }
    }
}

impl<T, E> From<Result<T, E>> for std::result::Result<T, E> {
    #[inline]
    fn from(result: Result<T, E>) -> Self {
        result.into_std()
    }
}

impl<T, E> IntoIterator for Result<T, E> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.ok().into_std().into_iter()
    }
}

impl<'a, T, E> IntoIterator for &'a Result<T, E> {
    type Item = &'a T;
    type IntoIter = std::option::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<A, E, V> FromIterator<Result<A, E>> for Result<V, E>
where
    V: FromIterator<A>,
{
    /// Collects every success value, stopping at the first `Err`.
    fn from_iter<I: IntoIterator<Item = Result<A, E>>>(iterator: I) -> Self {
        iterator
            .into_iter()
            .map(Result::into_std)
            .collect::<std::result::Result<V, E>>()
            .into()
    }
}
