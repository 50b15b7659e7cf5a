//! Deferred `Result` and `Option` values.
//!
//! [`DeferredResult<T, E>`] and [`DeferredOption<T>`] own a future that will
//! produce a [`Result`](crate::Result) or an [`Option`](crate::Option), and
//! expose the same combinators as the plain types. Combinators compose the
//! underlying future instead of awaiting it, so a whole chain is driven by a
//! single `.await` at the end.
//!
//! Every transformation has a synchronous form (`map`, `and_then`, ...) and a
//! form whose mapper returns something awaitable (`map_async`,
//! `and_then_async`, ...). The async forms accept any [`IntoFuture`], which
//! includes the deferred types themselves, so nested deferred values never
//! need to be wrapped twice.
//!
//! Terminal operations (`unwrap`, `unwrap_or`, `match_with`, ...) are
//! `async fn`s returning a plain value. Awaiting the wrapper itself yields the
//! inner `Result`/`Option`.
//!
//! # Examples
//!
//! ```rust
//! use futures::executor::block_on;
//! use okerr::deferred::DeferredResult;
//!
//! let total = DeferredResult::<i32, String>::from_ok(20)
//!     .map(|x| x + 1)
//!     .and_then_async(|x| async move { okerr::ok(x * 2) })
//!     .unwrap_or(0);
//! assert_eq!(block_on(total), 42);
//! ```
//!
//! [`IntoFuture`]: std::future::IntoFuture

mod option;
mod result;

pub use option::DeferredOption;
pub use result::DeferredResult;

/// The boxed future owned by a deferred wrapper.
pub(crate) type Pending<A> = futures::future::BoxFuture<'static, A>;
