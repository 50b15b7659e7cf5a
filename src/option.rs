//! `Option` - presence or absence of a value.
//!
//! [`Option<T>`] is exactly one of `Some(T)` or `None`. Like
//! [`Result`](crate::Result), it is immutable: combinators consume `self`
//! and return a new value. Only `unwrap`/`expect` can raise a
//! [`Panic`](crate::Panic).
//!
//! # Examples
//!
//! ```rust
//! use okerr::{Option, none, some};
//!
//! assert_eq!(some(5).filter(|v| *v > 10), none());
//! assert_eq!(none::<i32>().filter(|_| true), none());
//! assert_eq!(some(1).xor(none()), some(1));
//! assert_eq!(some(1).xor(some(2)), Option::None);
//! ```

use std::fmt;

use crate::panic::{Panic, UnwrapPanic};
use crate::result::Result;

/// Presence (`Some`) or absence (`None`) of a value.
#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum Option<T> {
    /// No value.
    #[default]
    None,
    /// A value.
    Some(T),
}

/// Creates `Option::Some(value)`.
#[inline]
pub const fn some<T>(value: T) -> Option<T> {
    Option::Some(value)
}

/// Creates `Option::None`.
#[inline]
pub const fn none<T>() -> Option<T> {
    Option::None
}

impl<T> Option<T> {
    // =========================================================================
    // Type Checking
    // =========================================================================

    /// Returns `true` if this is `Some`.
    #[inline]
    #[must_use]
    pub const fn is_some(&self) -> bool {
        matches!(self, Self::Some(_))
    }

    /// Returns `true` if this is `None`.
    #[inline]
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns `true` if this is `Some` and the value satisfies `predicate`.
    #[inline]
    #[must_use]
    pub fn is_some_and<F>(self, predicate: F) -> bool
    where
        F: FnOnce(T) -> bool,
    {
        match self {
            Self::Some(value) => predicate(value),
            Self::None => false,
        }
    }

    /// Returns `true` if this is `None` or the value satisfies `predicate`.
    #[inline]
    #[must_use]
    pub fn is_none_or<F>(self, predicate: F) -> bool
    where
        F: FnOnce(T) -> bool,
    {
        match self {
            Self::Some(value) => predicate(value),
            Self::None => true,
        }
    }

    /// Borrows the payload.
    #[inline]
    pub const fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Some(value) => Option::Some(value),
            Self::None => Option::None,
        }
    }

    /// Mutably borrows the payload.
    #[inline]
    pub fn as_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Some(value) => Option::Some(value),
            Self::None => Option::None,
        }
    }

    // =========================================================================
    // Mapping
    // =========================================================================

    /// Transforms the contained value; `None` passes through.
    #[inline]
    pub fn map<U, F>(self, function: F) -> Option<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Some(value) => Option::Some(function(value)),
            Self::None => Option::None,
        }
    }

    /// `function(value)` for `Some`, `default` for `None`.
    #[inline]
    #[must_use]
    pub fn map_or<U, F>(self, default: U, function: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Some(value) => function(value),
            Self::None => default,
        }
    }

    /// `function(value)` for `Some`, `default()` for `None`.
    #[inline]
    #[must_use]
    pub fn map_or_else<U, D, F>(self, default: D, function: F) -> U
    where
        D: FnOnce() -> U,
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Some(value) => function(value),
            Self::None => default(),
        }
    }

    /// Calls `function` with the contained value and returns `self` unchanged.
    #[inline]
    pub fn inspect<F>(self, function: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Self::Some(value) = &self {
            function(value);
        }
        self
    }

    /// Keeps the value only if it satisfies `predicate`.
    #[inline]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        if let Self::Some(value) = self
            && predicate(&value)
        {
            return Self::Some(value);
        }
        Self::None
    }

    // =========================================================================
    // Boolean Combinators
    // =========================================================================

    /// `other` if this is `Some`, otherwise `None`.
    #[inline]
    pub fn and<U>(self, other: Option<U>) -> Option<U> {
        match self {
            Self::Some(_) => other,
            Self::None => Option::None,
        }
    }

    /// `function(value)` if this is `Some`, otherwise `None`.
    #[inline]
    pub fn and_then<U, F>(self, function: F) -> Option<U>
    where
        F: FnOnce(T) -> Option<U>,
    {
        match self {
            Self::Some(value) => function(value),
            Self::None => Option::None,
        }
    }

    /// This `Some` if it is one, otherwise `other`.
    #[inline]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Some(value) => Self::Some(value),
            Self::None => other,
        }
    }

    /// This `Some` if it is one, otherwise `function()`.
    #[inline]
    pub fn or_else<F>(self, function: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Some(value) => Self::Some(value),
            Self::None => function(),
        }
    }

    /// `Some` exactly when one side is `Some`.
    #[inline]
    pub fn xor(self, other: Self) -> Self {
        match (self, other) {
            (Self::Some(value), Self::None) | (Self::None, Self::Some(value)) => Self::Some(value),
            _ => Self::None,
        }
    }

    /// Pairs two values when both are present.
    #[inline]
    pub fn zip<U>(self, other: Option<U>) -> Option<(T, U)> {
        match (self, other) {
            (Self::Some(left), Option::Some(right)) => Option::Some((left, right)),
            _ => Option::None,
        }
    }

    // =========================================================================
    // Conversion to Result
    // =========================================================================

    /// `Ok(value)` for `Some`, `Err(error)` for `None`.
    #[inline]
    pub fn ok_or<E>(self, error: E) -> Result<T, E> {
        match self {
            Self::Some(value) => Result::Ok(value),
            Self::None => Result::Err(error),
        }
    }

    /// `Ok(value)` for `Some`, `Err(function())` for `None`.
    #[inline]
    pub fn ok_or_else<E, F>(self, function: F) -> Result<T, E>
    where
        F: FnOnce() -> E,
    {
        match self {
            Self::Some(value) => Result::Ok(value),
            Self::None => Result::Err(function()),
        }
    }

    // =========================================================================
    // Extraction
    // =========================================================================

    /// Dispatches to exactly one handler.
    #[inline]
    #[must_use]
    pub fn match_with<R, F, G>(self, on_some: F, on_none: G) -> R
    where
        F: FnOnce(T) -> R,
        G: FnOnce() -> R,
    {
        match self {
            Self::Some(value) => on_some(value),
            Self::None => on_none(),
        }
    }

    /// The contained value.
    ///
    /// # Panics
    ///
    /// Raises an `UnwrapPanic` if this is `None`.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Self::Some(value) => value,
            Self::None => {
                UnwrapPanic::new("called `Option::unwrap()` on a `None` value: None").raise()
            }
        }
    }

    /// The contained value.
    ///
    /// # Panics
    ///
    /// Raises a [`Panic`] carrying `message` if this is `None`.
    #[track_caller]
    pub fn expect(self, message: &str) -> T {
        match self {
            Self::Some(value) => value,
            Self::None => Panic::new(message).raise(),
        }
    }

    /// The contained value, or `default`.
    #[inline]
    #[must_use]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Some(value) => value,
            Self::None => default,
        }
    }

    /// The contained value, or `function()`.
    #[inline]
    #[must_use]
    pub fn unwrap_or_else<F>(self, function: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Some(value) => value,
            Self::None => function(),
        }
    }

    /// The contained value, or `T::default()`.
    #[inline]
    #[must_use]
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Self::Some(value) => value,
            Self::None => T::default(),
        }
    }

    /// Converts into the standard library `Option`.
    #[inline]
    #[must_use]
    pub fn into_std(self) -> std::option::Option<T> {
        match self {
            Self::Some(value) => Some(value),
            Self::None => None,
        }
    }

    /// Iterates over the contained value, if any.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> std::option::IntoIter<&T> {
        self.as_ref().into_std().into_iter()
    }
}

impl<T> Option<Option<T>> {
    /// Removes one level of nesting.
    #[inline]
    pub fn flatten(self) -> Option<T> {
        match self {
            Self::Some(inner) => inner,
            Self::None => Option::None,
        }
    }
}

impl<T, E> Option<Result<T, E>> {
    /// `Some(Ok(v))` becomes `Ok(Some(v))`, `Some(Err(e))` becomes `Err(e)`
    /// and `None` becomes `Ok(None)`.
    #[inline]
    pub fn transpose(self) -> Result<Option<T>, E> {
        match self {
            Self::Some(Result::Ok(value)) => Result::Ok(Option::Some(value)),
            Self::Some(Result::Err(error)) => Result::Err(error),
            Self::None => Result::Ok(Option::None),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Option<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Some(value) => write!(formatter, "Some({value})"),
            Self::None => formatter.write_str("None"),
        }
    }
}

impl<T> From<std::option::Option<T>> for Option<T> {
    #[inline]
    fn from(option: std::option::Option<T>) -> Self {
        match option {
            Some(value) => Self::Some(value),
            None => Self::None,
        }
    }
}

impl<T> From<Option<T>> for std::option::Option<T> {
    #[inline]
    fn from(option: Option<T>) -> Self {
        option.into_std()
    }
}

impl<T> IntoIterator for Option<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_std().into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Option<T> {
    type Item = &'a T;
    type IntoIter = std::option::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<A, V> FromIterator<Option<A>> for Option<V>
where
    V: FromIterator<A>,
{
    /// Collects every value, stopping at the first `None`.
    fn from_iter<I: IntoIterator<Item = Option<A>>>(iterator: I) -> Self {
        iterator
            .into_iter()
            .map(Option::into_std)
            .collect::<std::option::Option<V>>()
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panic::PanicKind;
    use crate::result::{err, ok};
    use rstest::rstest;

    #[rstest]
    #[case(some(1), none(), some(1))]
    #[case(none(), some(2), some(2))]
    #[case(some(1), some(2), none())]
    #[case(none(), none(), none())]
    fn xor_truth_table(
        #[case] left: Option<i32>,
        #[case] right: Option<i32>,
        #[case] expected: Option<i32>,
    ) {
        assert_eq!(left.xor(right), expected);
    }

    #[rstest]
    #[case(some(1), some(2), some(2))]
    #[case(some(1), none(), none())]
    #[case(none(), some(2), none())]
    fn and_truth_table(
        #[case] left: Option<i32>,
        #[case] right: Option<i32>,
        #[case] expected: Option<i32>,
    ) {
        assert_eq!(left.and(right), expected);
    }

    #[rstest]
    #[case(some(1), some(2), some(1))]
    #[case(none(), some(2), some(2))]
    #[case(none(), none(), none())]
    fn or_truth_table(
        #[case] left: Option<i32>,
        #[case] right: Option<i32>,
        #[case] expected: Option<i32>,
    ) {
        assert_eq!(left.or(right), expected);
    }

    #[rstest]
    #[case(some(5), none())]
    #[case(some(15), some(15))]
    #[case(none(), none())]
    fn filter_keeps_matching_values(#[case] input: Option<i32>, #[case] expected: Option<i32>) {
        assert_eq!(input.filter(|v| *v > 10), expected);
    }

    #[rstest]
    fn and_then_skips_function_on_none() {
        let mut called = false;
        let result = none::<i32>().and_then(|x| {
            called = true;
            some(x)
        });
        assert_eq!(result, none());
        assert!(!called);
    }

    #[rstest]
    fn flatten_removes_one_level() {
        assert_eq!(some(some(1)).flatten(), some(1));
        assert_eq!(some(none::<i32>()).flatten(), none());
        assert_eq!(none::<Option<i32>>().flatten(), none());
    }

    #[rstest]
    fn unwrap_raises_unwrap_panic_on_none() {
        let panic = Panic::capture(|| none::<i32>().unwrap()).unwrap_err();
        assert_eq!(panic.kind(), PanicKind::Unwrap);
        assert!(panic.message().contains("None"));
    }

    #[rstest]
    fn expect_carries_caller_message() {
        let panic = Panic::capture(|| none::<i32>().expect("user must exist")).unwrap_err();
        assert_eq!(panic.to_string(), "Panic: user must exist");
    }

    #[rstest]
    fn ok_or_converts_to_result() {
        assert_eq!(some(1).ok_or("missing"), ok(1));
        assert_eq!(none::<i32>().ok_or("missing"), err("missing"));
        assert_eq!(none::<i32>().ok_or_else(|| 404), err(404));
    }

    #[rstest]
    fn match_with_dispatches_once() {
        assert_eq!(some(3).match_with(|v| v * 2, || 0), 6);
        assert_eq!(none::<i32>().match_with(|v| v * 2, || 0), 0);
    }

    #[rstest]
    #[case(some(9), "Some(9)")]
    #[case(none(), "None")]
    fn display_renders_variant(#[case] input: Option<i32>, #[case] expected: &str) {
        assert_eq!(input.to_string(), expected);
    }

    #[rstest]
    fn zip_requires_both() {
        assert_eq!(some(1).zip(some("a")), some((1, "a")));
        assert_eq!(some(1).zip(none::<&str>()), none());
    }

    #[rstest]
    fn collect_stops_at_first_none() {
        let collected: Option<Vec<i32>> = vec![some(1), none(), some(3)].into_iter().collect();
        assert_eq!(collected, none());
    }

    #[rstest]
    fn borrowed_option_iterates_in_for_loops() {
        let present = some(4);
        let mut seen = Vec::new();
        for value in &present {
            seen.push(*value);
        }
        for value in &none::<i32>() {
            seen.push(*value);
        }
        assert_eq!(seen, vec![4]);
        assert_eq!(present, some(4));
    }

    #[rstest]
    fn transpose_swaps_layers() {
        assert_eq!(some(ok::<i32, &str>(1)).transpose(), ok(some(1)));
        assert_eq!(some(err::<i32, &str>("e")).transpose(), err("e"));
        assert_eq!(none::<Result<i32, &str>>().transpose(), ok(none()));
    }

    #[rstest]
    fn default_is_none() {
        assert_eq!(Option::<i32>::default(), Option::None);
    }
}
