//! `run!` and `run_async!`: do-notation over the evaluator.
//!
//! # Syntax
//!
//! - `pattern <= expression;` - Bind: waits on a fallible step, binds its value
//! - `let pattern = expression;` - Pure let binding
//! - `yield expression` - Final value (wrapped in `Ok`)
//! - `expression` - Final step (already a `Result`, or a deferred one for
//!   `run_async!`)
//!
//! `<=` stands in for `<-`, which macro patterns cannot match.
//!
//! Each bind expands into a continuation closure, so everything after a bind
//! only runs once that bind has succeeded.

/// Evaluates a sequence of fallible steps, stopping at the first `Err`.
///
/// # Examples
///
/// ```rust
/// use okerr::{ok, run, Result};
///
/// fn halve(value: i32) -> Result<i32, String> {
///     if value % 2 == 0 {
///         ok(value / 2)
///     } else {
///         okerr::err(format!("{value} is odd"))
///     }
/// }
///
/// let outcome = run! {
///     a <= halve(40);
///     b <= halve(a);
///     let total = a + b;
///     yield total
/// };
/// assert_eq!(outcome, ok(30));
///
/// let failed: Result<i32, String> = run! {
///     a <= halve(6);
///     halve(a)
/// };
/// assert_eq!(failed, okerr::err("3 is odd".to_owned()));
/// ```
#[macro_export]
macro_rules! run {
    // ==========================================================================
    // Terminal cases
    // ==========================================================================

    (@steps yield $value:expr) => {
        $crate::evaluator::Step::pure($value)
    };

    // ==========================================================================
    // Bind operation: pattern <= result; rest
    // ==========================================================================

    (@steps $pattern:ident <= $source:expr ; $($rest:tt)+) => {
        $crate::evaluator::Step::bind($source, move |$pattern| {
            $crate::run!(@steps $($rest)+)
        })
    };

    (@steps ($($pattern:tt)*) <= $source:expr ; $($rest:tt)+) => {
        $crate::evaluator::Step::bind($source, move |($($pattern)*)| {
            $crate::run!(@steps $($rest)+)
        })
    };

    (@steps _ <= $source:expr ; $($rest:tt)+) => {
        $crate::evaluator::Step::bind($source, move |_| {
            $crate::run!(@steps $($rest)+)
        })
    };

    // ==========================================================================
    // Let binding: let pattern = expression; rest
    // ==========================================================================

    (@steps let $pattern:ident = $expr:expr ; $($rest:tt)+) => {
        {
            let $pattern = $expr;
            $crate::run!(@steps $($rest)+)
        }
    };

    (@steps let $pattern:ident : $ty:ty = $expr:expr ; $($rest:tt)+) => {
        {
            let $pattern: $ty = $expr;
            $crate::run!(@steps $($rest)+)
        }
    };

    (@steps let ($($pattern:tt)*) = $expr:expr ; $($rest:tt)+) => {
        {
            let ($($pattern)*) = $expr;
            $crate::run!(@steps $($rest)+)
        }
    };

    (@steps $result:expr) => {
        $crate::evaluator::Step::done($result)
    };

    // ==========================================================================
    // Entry point
    // ==========================================================================

    ($($body:tt)+) => {
        $crate::evaluator::run(move || $crate::run!(@steps $($body)+))
    };
}

/// Evaluates a sequence of possibly deferred fallible steps, stopping at the
/// first `Err`. Produces a [`DeferredResult`](crate::deferred::DeferredResult).
///
/// # Examples
///
/// ```rust
/// use futures::executor::block_on;
/// use okerr::deferred::DeferredResult;
/// use okerr::run_async;
///
/// let outcome = run_async! {
///     a <= DeferredResult::<i32, String>::from_ok(1);
///     b <= okerr::ok(2);
///     yield a + b
/// };
/// assert_eq!(block_on(outcome.into_future()), okerr::ok(3));
/// ```
#[cfg(feature = "async")]
#[macro_export]
macro_rules! run_async {
    (@steps yield $value:expr) => {
        $crate::evaluator::AsyncStep::pure($value)
    };

    (@steps $pattern:ident <= $source:expr ; $($rest:tt)+) => {
        $crate::evaluator::AsyncStep::bind($source, move |$pattern| {
            $crate::run_async!(@steps $($rest)+)
        })
    };

    (@steps ($($pattern:tt)*) <= $source:expr ; $($rest:tt)+) => {
        $crate::evaluator::AsyncStep::bind($source, move |($($pattern)*)| {
            $crate::run_async!(@steps $($rest)+)
        })
    };

    (@steps _ <= $source:expr ; $($rest:tt)+) => {
        $crate::evaluator::AsyncStep::bind($source, move |_| {
            $crate::run_async!(@steps $($rest)+)
        })
    };

    (@steps let $pattern:ident = $expr:expr ; $($rest:tt)+) => {
        {
            let $pattern = $expr;
            $crate::run_async!(@steps $($rest)+)
        }
    };

    (@steps let $pattern:ident : $ty:ty = $expr:expr ; $($rest:tt)+) => {
        {
            let $pattern: $ty = $expr;
            $crate::run_async!(@steps $($rest)+)
        }
    };

    (@steps let ($($pattern:tt)*) = $expr:expr ; $($rest:tt)+) => {
        {
            let ($($pattern)*) = $expr;
            $crate::run_async!(@steps $($rest)+)
        }
    };

    // A final step may itself be deferred, so it is awaited like a bind.
    (@steps $result:expr) => {
        $crate::evaluator::AsyncStep::bind($result, $crate::evaluator::AsyncStep::pure)
    };

    ($($body:tt)+) => {
        $crate::evaluator::run_async(move || $crate::run_async!(@steps $($body)+))
    };
}
