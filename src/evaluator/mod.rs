//! Short-circuiting evaluation of fallible step chains.
//!
//! A computation made of several fallible steps is written as a chain of
//! binds: each bind holds a source producing a `Result` and a continuation
//! receiving the success value. The drivers [`run`] and [`run_async`]
//! interpret such a chain in a loop, stopping at the first `Err`. Once a step
//! fails, no later source is evaluated and no later continuation is called.
//!
//! Driving `run` over a chain gives the same outcome as folding
//! [`Result::and_then`](crate::Result::and_then) across the same steps.
//!
//! The [`run!`](crate::run) and [`run_async!`](crate::run_async) macros
//! provide a do-notation front end:
//!
//! ```rust
//! use okerr::{err, ok, run};
//!
//! let outcome = run! {
//!     x <= ok::<i32, &str>(2);
//!     y <= err::<i32, &str>("boom");
//!     let sum: i32 = x + y;
//!     yield sum
//! };
//! assert_eq!(outcome, err("boom"));
//! ```

#[cfg(feature = "async")]
mod async_step;
mod macros;
mod step;

#[cfg(feature = "async")]
pub use async_step::{AsyncContinuationBox, AsyncStep, IntoDeferredResult, run_async};
pub use step::{ContinuationBox, Step, run};
