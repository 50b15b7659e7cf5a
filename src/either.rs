//! Either type - one of two error types.
//!
//! [`Either`] is the error type produced when flattening a nested `Result`
//! whose outer and inner errors differ (see
//! [`Result::flatten_either`](crate::Result::flatten_either)): the outer error
//! becomes `Left`, the inner error becomes `Right`.
//!
//! # Examples
//!
//! ```rust
//! use okerr::{Either, Result};
//!
//! let nested: Result<Result<i32, &str>, u8> = Result::Ok(Result::Err("inner"));
//! assert_eq!(nested.flatten_either(), Result::Err(Either::Right("inner")));
//! ```

use std::fmt;

/// A value that is either a `Left(L)` or a `Right(R)`.
#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Either<L, R> {
    /// The left variant.
    Left(L),
    /// The right variant.
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Returns `true` if this is a `Left` value.
    #[inline]
    #[must_use]
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    #[must_use]
    pub const fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    /// Applies a function to the left value if present.
    #[inline]
    pub fn map_left<T, F>(self, function: F) -> Either<T, R>
    where
        F: FnOnce(L) -> T,
    {
        match self {
            Self::Left(value) => Either::Left(function(value)),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Applies a function to the right value if present.
    #[inline]
    pub fn map_right<T, F>(self, function: F) -> Either<L, T>
    where
        F: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => Either::Right(function(value)),
        }
    }

    /// Eliminates the `Either` by applying one of two functions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::Either;
    ///
    /// let outer: Either<u8, &str> = Either::Left(4);
    /// assert_eq!(outer.fold(|code| code.to_string(), str::to_owned), "4");
    /// ```
    #[inline]
    #[must_use]
    pub fn fold<T, F, G>(self, left_function: F, right_function: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => left_function(value),
            Self::Right(value) => right_function(value),
        }
    }
}

impl<T> Either<T, T> {
    /// Collapses an `Either` whose sides share a type.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Self::Left(value) | Self::Right(value) => value,
        }
    }
}

impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for Either<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left(value) => formatter.debug_tuple("Left").field(value).finish(),
            Self::Right(value) => formatter.debug_tuple("Right").field(value).finish(),
        }
    }
}

impl<L: fmt::Display, R: fmt::Display> fmt::Display for Either<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left(value) => fmt::Display::fmt(value, formatter),
            Self::Right(value) => fmt::Display::fmt(value, formatter),
        }
    }
}

impl<L, R> std::error::Error for Either<L, R>
where
    L: std::error::Error,
    R: std::error::Error,
{
}
