//! Bridging between unwinding code and [`Result`] values.
//!
//! Every function in this module is a *boundary*: it runs a computation,
//! catches any unwind escaping it, and classifies the payload.
//!
//! - A [`Panic`] payload is re-raised with [`std::panic::resume_unwind`] using
//!   the very same box. Panics are never turned into data.
//! - Any other payload (a plain `panic!`, a `panic_any` of a foreign value)
//!   becomes `Err(StdError)` with the payload as its [`Origin`].
//!
//! The `*_with` variants pass the [`StdError`] through a caller supplied
//! handler to build a custom error. If that handler itself unwinds with a
//! foreign payload, no valid error exists and the boundary raises an
//! [`InvalidErrorPanic`].
//!
//! Bridging relies on unwinding; with `panic = "abort"` a fault terminates the
//! process before any boundary can observe it.
//!
//! # Examples
//!
//! ```rust
//! use okerr::bridge::try_fn;
//! use okerr::ResultError;
//!
//! let parsed = try_fn(|| "42".parse::<i32>().unwrap_or_else(|_| panic!("not a number")));
//! assert_eq!(parsed.unwrap(), 42);
//!
//! let failed = try_fn(|| -> i32 { panic!("not a number") });
//! let error = failed.unwrap_err();
//! assert_eq!(error.name(), "StdError");
//! assert_eq!(error.message(), "not a number");
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

#[cfg(feature = "async")]
use std::future::IntoFuture;

#[cfg(feature = "async")]
use futures::FutureExt;
#[cfg(feature = "async")]
use futures::future;

use crate::error::StdError;
use crate::panic::{InvalidErrorPanic, Origin, Panic};
use crate::result::Result;

#[cfg(feature = "async")]
use crate::deferred::DeferredResult;

// =============================================================================
// Payload Classification
// =============================================================================

/// Re-raises a [`Panic`] payload, converts anything else into a [`StdError`].
fn into_std_error(payload: Box<dyn Any + Send>) -> StdError {
    if Panic::is_panic(&*payload) {
        tracing::trace!("re-raising panic at bridging boundary");
        panic::resume_unwind(payload)
    }
    let error = StdError::from_payload(payload);
    tracing::debug!(
        reason = error.message(),
        "converted foreign panic into StdError"
    );
    error
}

/// Applies an error handler inside its own boundary.
fn convert_with<E, H>(error: StdError, handle: H) -> E
where
    H: FnOnce(StdError) -> E,
{
    match panic::catch_unwind(AssertUnwindSafe(move || handle(error))) {
        Ok(converted) => converted,
        Err(payload) => {
            if Panic::is_panic(&*payload) {
                panic::resume_unwind(payload)
            }
            let origin = Origin::from_payload(payload);
            tracing::warn!(origin = %origin, "error handler failed to produce an error");
            InvalidErrorPanic::new("error handler failed to produce an error", origin)
                .raise()
        }
    }
}

// =============================================================================
// Synchronous Boundaries
// =============================================================================

/// Runs `function`, turning a foreign unwind into `Err(StdError)`.
///
/// # Panics
///
/// Re-raises a [`Panic`] escaping `function`, unchanged.
pub fn try_fn<T, F>(function: F) -> Result<T, StdError>
where
    F: FnOnce() -> T,
{
    match panic::catch_unwind(AssertUnwindSafe(function)) {
        Ok(value) => Result::Ok(value),
        Err(payload) => Result::Err(into_std_error(payload)),
    }
}

/// Like [`try_fn`], but builds the error with `handle`.
///
/// # Examples
///
/// ```rust
/// use okerr::bridge::try_fn_with;
///
/// let result = try_fn_with(
///     || -> u8 { panic!("disk full") },
///     |error| format!("write failed: {}", error.message()),
/// );
/// assert_eq!(result.unwrap_err(), "write failed: disk full");
/// ```
///
/// # Panics
///
/// Re-raises a [`Panic`] escaping `function` or `handle`. Raises an
/// [`InvalidErrorPanic`] when `handle` unwinds with a foreign payload.
pub fn try_fn_with<T, E, F, H>(function: F, handle: H) -> Result<T, E>
where
    F: FnOnce() -> T,
    H: FnOnce(StdError) -> E,
{
    try_fn(function).map_err(|error| convert_with(error, handle))
}

/// Converts a standard library result, wrapping the error in a [`StdError`].
///
/// # Examples
///
/// ```rust
/// use okerr::bridge::try_std;
/// use okerr::ResultError;
///
/// let error = try_std("x".parse::<i32>()).unwrap_err();
/// assert_eq!(error.name(), "StdError from ParseIntError");
/// ```
pub fn try_std<T, E>(result: std::result::Result<T, E>) -> Result<T, StdError>
where
    E: std::error::Error + Send + 'static,
{
    Result::from(result.map_err(StdError::from_error))
}

/// Decorates `function` so that each call goes through [`try_fn`].
///
/// Functions of several arguments take them as a tuple.
///
/// # Examples
///
/// ```rust
/// use okerr::bridge::guard;
///
/// let divide = guard(|(left, right): (i32, i32)| left / right);
/// assert_eq!(divide((6, 3)).unwrap(), 2);
/// assert!(divide((1, 0)).is_err());
/// ```
#[must_use]
pub fn guard<A, T, F>(function: F) -> impl Fn(A) -> Result<T, StdError>
where
    F: Fn(A) -> T,
{
    move |argument| try_fn(|| function(argument))
}

/// Decorates `function` so that each call goes through [`try_fn_with`].
#[must_use]
pub fn guard_with<A, T, E, F, H>(function: F, handle: H) -> impl Fn(A) -> Result<T, E>
where
    F: Fn(A) -> T,
    H: Fn(StdError) -> E,
{
    move |argument| try_fn_with(|| function(argument), &handle)
}

// =============================================================================
// Asynchronous Boundaries
// =============================================================================

/// A deferred value that settles the caught `payload` when polled.
#[cfg(feature = "async")]
fn settle_later<T>(payload: Box<dyn Any + Send>) -> DeferredResult<T, StdError>
where
    T: Send + 'static,
{
    DeferredResult::new(future::lazy(move |_| Result::Err(into_std_error(payload))))
}

/// Awaits `future`, turning a foreign unwind while polling into
/// `Err(StdError)`.
///
/// A [`Panic`] raised while polling propagates out of the returned future.
#[cfg(feature = "async")]
pub fn try_future<Fut>(future: Fut) -> DeferredResult<Fut::Output, StdError>
where
    Fut: IntoFuture,
    Fut::IntoFuture: Send + 'static,
    Fut::Output: Send + 'static,
{
    DeferredResult::new(
        AssertUnwindSafe(future.into_future())
            .catch_unwind()
            .map(|outcome| match outcome {
                Ok(value) => Result::Ok(value),
                Err(payload) => Result::Err(into_std_error(payload)),
            }),
    )
}

/// Like [`try_future`], but builds the error with `handle`.
#[cfg(feature = "async")]
pub fn try_future_with<Fut, E, H>(future: Fut, handle: H) -> DeferredResult<Fut::Output, E>
where
    Fut: IntoFuture,
    Fut::IntoFuture: Send + 'static,
    Fut::Output: Send + 'static,
    E: Send + 'static,
    H: FnOnce(StdError) -> E + Send + 'static,
{
    try_future(future).map_err(move |error| convert_with(error, handle))
}

/// Calls `function` and awaits the future it returns.
///
/// A foreign unwind while *creating* the future is reported the same way as
/// one while polling it: the returned value settles to `Err(StdError)`.
///
/// # Examples
///
/// ```rust
/// use futures::executor::block_on;
/// use okerr::bridge::try_async_fn;
///
/// let settled = try_async_fn(|| async { 7 });
/// assert_eq!(block_on(settled.unwrap()), 7);
///
/// let failed = try_async_fn(|| -> std::future::Ready<i32> { panic!("no connection") });
/// assert_eq!(block_on(failed.unwrap_err()).message(), "no connection");
/// ```
#[cfg(feature = "async")]
pub fn try_async_fn<F, Fut>(function: F) -> DeferredResult<Fut::Output, StdError>
where
    F: FnOnce() -> Fut,
    Fut: IntoFuture,
    Fut::IntoFuture: Send + 'static,
    Fut::Output: Send + 'static,
{
    match panic::catch_unwind(AssertUnwindSafe(|| function().into_future())) {
        Ok(future) => try_future(future),
        Err(payload) => settle_later(payload),
    }
}

/// Like [`try_async_fn`], but builds the error with `handle`.
#[cfg(feature = "async")]
pub fn try_async_fn_with<F, Fut, E, H>(function: F, handle: H) -> DeferredResult<Fut::Output, E>
where
    F: FnOnce() -> Fut,
    Fut: IntoFuture,
    Fut::IntoFuture: Send + 'static,
    Fut::Output: Send + 'static,
    E: Send + 'static,
    H: FnOnce(StdError) -> E + Send + 'static,
{
    try_async_fn(function).map_err(move |error| convert_with(error, handle))
}

/// Decorates an async `function` so that each call goes through
/// [`try_async_fn`].
#[cfg(feature = "async")]
#[must_use]
pub fn guard_async<A, F, Fut>(function: F) -> impl Fn(A) -> DeferredResult<Fut::Output, StdError>
where
    F: Fn(A) -> Fut,
    Fut: IntoFuture,
    Fut::IntoFuture: Send + 'static,
    Fut::Output: Send + 'static,
{
    move |argument| try_async_fn(|| function(argument))
}

/// Decorates an async `function` so that each call goes through
/// [`try_async_fn_with`].
#[cfg(feature = "async")]
#[must_use]
pub fn guard_async_with<A, F, Fut, E, H>(
    function: F,
    handle: H,
) -> impl Fn(A) -> DeferredResult<Fut::Output, E>
where
    F: Fn(A) -> Fut,
    Fut: IntoFuture,
    Fut::IntoFuture: Send + 'static,
    Fut::Output: Send + 'static,
    E: Send + 'static,
    H: Fn(StdError) -> E + Clone + Send + 'static,
{
    move |argument| try_async_fn_with(|| function(argument), handle.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResultError;
    use crate::panic::PanicKind;
    use crate::result::ok;
    use rstest::rstest;

    #[derive(Debug)]
    struct DomainError(&'static str);

    #[cfg(feature = "async")]
    async fn poll_failure(message: &'static str) -> i32 {
        tokio::task::yield_now().await;
        panic!("{message}")
    }

    #[cfg(feature = "async")]
    async fn poll_fatal() -> i32 {
        tokio::task::yield_now().await;
        Panic::new("fatal").raise()
    }

    #[rstest]
    fn try_fn_wraps_return_value() {
        assert_eq!(try_fn(|| 5).ok(), crate::option::some(5));
    }

    #[rstest]
    #[case::static_str("bad")]
    #[case::formatted("bad input 7")]
    fn try_fn_converts_message_panics(#[case] message: &'static str) {
        let error = try_fn(|| -> i32 { panic!("{message}") }).unwrap_err();
        assert_eq!(error.message(), message);
        assert_eq!(error.to_string(), format!("StdError: {message}"));
    }

    #[rstest]
    fn try_fn_keeps_foreign_payload_as_origin() {
        let error = try_fn(|| -> i32 { panic::panic_any(DomainError("x")) }).unwrap_err();
        let origin = ResultError::origin(&error).unwrap();
        assert_eq!(origin.downcast_ref::<DomainError>().map(|e| e.0), Some("x"));
        assert_eq!(error.message(), "unknown error");
    }

    #[rstest]
    fn try_fn_reraises_the_same_panic_allocation() {
        let boxed: Box<dyn Any + Send> = Box::new(Panic::new("fatal"));
        let address = std::ptr::from_ref::<dyn Any + Send>(&*boxed).addr();

        let payload = panic::catch_unwind(AssertUnwindSafe(move || {
            try_fn(move || -> i32 { panic::resume_unwind(boxed) })
        }))
        .unwrap_err();

        let caught = std::ptr::from_ref::<dyn Any + Send>(&*payload).addr();
        assert_eq!(caught, address);
        assert_eq!(payload.downcast_ref::<Panic>().unwrap().message(), "fatal");
    }

    #[rstest]
    fn try_fn_with_applies_handler() {
        let result = try_fn_with(
            || -> i32 { panic!("boom") },
            |error| error.message().len(),
        );
        assert_eq!(result.unwrap_err(), 4);
    }

    #[rstest]
    fn try_fn_with_skips_handler_on_success() {
        let result = try_fn_with(|| 1, |_| -> String { unreachable!() });
        assert_eq!(result, ok(1));
    }

    #[rstest]
    fn failing_handler_raises_invalid_error_panic() {
        let raised = Panic::capture(|| {
            try_fn_with(
                || -> i32 { panic!("boom") },
                |_| -> String { panic!("handler broke") },
            )
        })
        .unwrap_err();
        assert_eq!(raised.kind(), PanicKind::InvalidError);
        assert_eq!(
            raised.origin().and_then(Origin::message),
            Some("handler broke")
        );
    }

    #[rstest]
    fn handler_panic_is_reraised_unchanged() {
        let raised = Panic::capture(|| {
            try_fn_with(
                || -> i32 { panic!("boom") },
                |_| -> String { Panic::new("handler fault").raise() },
            )
        })
        .unwrap_err();
        assert_eq!(raised.kind(), PanicKind::Panic);
        assert_eq!(raised.message(), "handler fault");
    }

    #[rstest]
    fn try_std_wraps_std_errors() {
        let error = try_std("x".parse::<i32>()).unwrap_err();
        assert_eq!(error.name(), "StdError from ParseIntError");
        assert_eq!(try_std("3".parse::<i32>()).unwrap(), 3);
    }

    #[rstest]
    fn guard_reuses_the_decorated_function() {
        let checked = guard(|value: i32| {
            assert!(value >= 0, "negative");
            value * 2
        });
        assert_eq!(checked(2).unwrap(), 4);
        assert_eq!(checked(-1).unwrap_err().message(), "negative");
        assert_eq!(checked(3).unwrap(), 6);
    }

    #[rstest]
    fn guard_with_maps_every_failure() {
        let checked = guard_with(
            |value: i32| {
                assert!(value != 0, "zero");
                10 / value
            },
            |error| error.message().to_owned(),
        );
        assert_eq!(checked(0).unwrap_err(), "zero");
        assert_eq!(checked(5), ok(2));
    }

    #[cfg(feature = "async")]
    #[rstest]
    #[tokio::test]
    async fn try_future_converts_poll_panics() {
        let error = try_future(poll_failure("poll failed")).await.unwrap_err();
        assert_eq!(error.message(), "poll failed");
    }

    #[cfg(feature = "async")]
    #[rstest]
    #[tokio::test]
    async fn try_future_with_applies_handler() {
        let result =
            try_future_with(poll_failure("late"), |error| error.message().to_uppercase()).await;
        assert_eq!(result.unwrap_err(), "LATE");
    }

    #[cfg(feature = "async")]
    #[rstest]
    #[tokio::test]
    async fn try_async_fn_converts_creation_panics() {
        fn exploding() -> futures::future::Ready<i32> {
            panic!("not even started")
        }
        let error = try_async_fn(exploding).await.unwrap_err();
        assert_eq!(error.message(), "not even started");
    }

    #[cfg(feature = "async")]
    #[rstest]
    #[tokio::test]
    async fn try_async_fn_with_resolves_success() {
        let result = try_async_fn_with(|| async { 3 }, |error| error.message().to_owned()).await;
        assert_eq!(result, ok(3));
    }

    #[cfg(feature = "async")]
    #[rstest]
    #[tokio::test]
    async fn guard_async_decorates_each_call() {
        let halve = guard_async(|value: i32| async move {
            assert!(value % 2 == 0, "odd");
            value / 2
        });
        assert_eq!(halve(8).await.unwrap(), 4);
        assert_eq!(halve(3).await.unwrap_err().message(), "odd");
    }

    #[cfg(feature = "async")]
    #[rstest]
    #[tokio::test]
    async fn guard_async_with_maps_failures() {
        let halve = guard_async_with(
            |value: i32| async move {
                assert!(value % 2 == 0, "odd");
                value / 2
            },
            |error: StdError| error.message().len(),
        );
        assert_eq!(halve(3).await.unwrap_err(), 3);
    }

    #[cfg(feature = "async")]
    #[rstest]
    #[tokio::test]
    async fn async_panic_propagates_from_await() {
        let outcome = AssertUnwindSafe(try_future(poll_fatal()).into_future())
            .catch_unwind()
            .await;
        let payload = outcome.unwrap_err();
        assert_eq!(payload.downcast_ref::<Panic>().unwrap().message(), "fatal");
    }
}
