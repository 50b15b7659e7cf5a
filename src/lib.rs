//! # okerr
//!
//! Algebraic error handling for Rust: `Result` and `Option` types with a
//! uniform combinator surface, a small taxonomy separating recoverable errors
//! from unrecoverable faults, bridges from unwinding code into `Result`
//! values, deferred async wrappers, and a short-circuiting evaluator.
//!
//! ## Overview
//!
//! - **Values**: [`Result<T, E>`] and [`Option<T>`] with `map`, `and_then`,
//!   `or_else`, `match_with`, `unwrap_or`, ... and the free constructors
//!   [`ok`], [`err`], [`some`], [`none`].
//! - **Taxonomy**: recoverable errors implement [`ResultError`] and travel as
//!   `Err` payloads. Unrecoverable faults are [`Panic`]s and travel by
//!   unwinding.
//! - **Bridging**: [`bridge`] turns unwinding computations into `Result`s,
//!   re-raising [`Panic`]s untouched and wrapping everything else in
//!   [`StdError`].
//! - **Deferred values**: [`deferred`] wraps futures of `Result`/`Option`
//!   with the same combinators.
//! - **Evaluator**: [`evaluator`] drives chains of fallible steps to the
//!   first `Err`, with the [`run!`] and [`run_async!`] front ends.
//!
//! ## Feature Flags
//!
//! - `async`: deferred wrappers, async bridges, `run_async` (default)
//! - `derive`: `#[derive(ResultError)]` (default)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use okerr::prelude::*;
//!
//! let total: Result<i32, &str> = run! {
//!     a <= ok(20);
//!     b <= ok(1);
//!     yield (a + b) * 2
//! };
//! assert_eq!(total.unwrap_or(0), 42);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use okerr::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bridge::{guard, guard_with, try_fn, try_fn_with, try_std};
    pub use crate::either::Either;
    pub use crate::error::{ResultError, StdError};
    pub use crate::evaluator::{Step, run};
    pub use crate::option::{Option, none, some};
    pub use crate::panic::{InvalidErrorPanic, Origin, Panic, PanicKind, UnwrapPanic};
    pub use crate::result::{Result, err, ok};

    #[cfg(feature = "async")]
    pub use crate::bridge::{
        guard_async, guard_async_with, try_async_fn, try_async_fn_with, try_future,
        try_future_with,
    };
    #[cfg(feature = "async")]
    pub use crate::deferred::{DeferredOption, DeferredResult};
    #[cfg(feature = "async")]
    pub use crate::evaluator::{AsyncStep, IntoDeferredResult, run_async};

    pub use crate::run;
    #[cfg(feature = "async")]
    pub use crate::run_async;
}

pub mod bridge;
#[cfg(feature = "async")]
pub mod deferred;
pub mod either;
pub mod error;
pub mod evaluator;
pub mod option;
pub mod panic;
pub mod result;

pub use either::Either;
pub use error::{ResultError, StdError};
pub use option::{Option, none, some};
pub use panic::{InvalidErrorPanic, Origin, Panic, PanicKind, UnwrapPanic};
pub use result::{Result, err, ok};

#[cfg(feature = "async")]
pub use deferred::{DeferredOption, DeferredResult};

#[cfg(feature = "derive")]
pub use okerr_derive::ResultError;
