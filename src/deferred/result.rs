//! `DeferredResult` - a future of a `Result` with the `Result` combinators.

use std::fmt;
use std::future::{Future, IntoFuture};

use futures::FutureExt;
use futures::future::{self, BoxFuture};

use super::{DeferredOption, Pending};
use crate::result::Result;

/// A future of a [`Result`] exposing the [`Result`] combinators.
///
/// Nothing runs until the value (or a terminal operation on it) is awaited.
///
/// # Examples
///
/// ```rust
/// use futures::executor::block_on;
/// use okerr::deferred::DeferredResult;
///
/// let lookup = DeferredResult::<u32, &str>::new(async { okerr::ok(7) });
/// let doubled = lookup.map(|x| x * 2);
/// assert_eq!(block_on(doubled.into_future()), okerr::ok(14));
/// ```
#[must_use = "deferred values do nothing unless awaited"]
pub struct DeferredResult<T, E> {
    future: Pending<Result<T, E>>,
}

// =============================================================================
// Constructors
// =============================================================================

impl<T, E> DeferredResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Wraps a future producing a [`Result`].
    pub fn new<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            future: future.boxed(),
        }
    }

    /// Wraps an already settled [`Result`].
    pub fn from_result(result: Result<T, E>) -> Self {
        Self::new(future::ready(result))
    }

    /// A deferred `Ok(value)`.
    pub fn from_ok(value: T) -> Self {
        Self::from_result(Result::Ok(value))
    }

    /// A deferred `Err(error)`.
    pub fn from_err(error: E) -> Self {
        Self::from_result(Result::Err(error))
    }
}

// =============================================================================
// Mapping
// =============================================================================

impl<T, E> DeferredResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Transforms the success value.
    pub fn map<U, F>(self, function: F) -> DeferredResult<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        DeferredResult::new(self.future.map(move |result| result.map(function)))
    }

    /// Transforms the success value with an awaitable mapper.
    pub fn map_async<U, F, Fut>(self, function: F) -> DeferredResult<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: IntoFuture<Output = U>,
        Fut::IntoFuture: Send + 'static,
    {
        DeferredResult::new(async move {
            match self.future.await {
                Result::Ok(value) => Result::Ok(function(value).await),
                Result::Err(error) => Result::Err(error),
            }
        })
    }

    /// Transforms the error.
    pub fn map_err<G, F>(self, function: F) -> DeferredResult<T, G>
    where
        G: Send + 'static,
        F: FnOnce(E) -> G + Send + 'static,
    {
        DeferredResult::new(self.future.map(move |result| result.map_err(function)))
    }

    /// Transforms the error with an awaitable mapper.
    pub fn map_err_async<G, F, Fut>(self, function: F) -> DeferredResult<T, G>
    where
        G: Send + 'static,
        F: FnOnce(E) -> Fut + Send + 'static,
        Fut: IntoFuture<Output = G>,
        Fut::IntoFuture: Send + 'static,
    {
        DeferredResult::new(async move {
            match self.future.await {
                Result::Ok(value) => Result::Ok(value),
                Result::Err(error) => Result::Err(function(error).await),
            }
        })
    }

    /// Observes the success value.
    pub fn inspect<F>(self, function: F) -> Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        Self::new(self.future.map(move |result| result.inspect(function)))
    }

    /// Observes the success value with an awaitable observer.
    ///
    /// The observer's future must not borrow the value; clone what it needs.
    pub fn inspect_async<F, Fut>(self, function: F) -> Self
    where
        F: FnOnce(&T) -> Fut + Send + 'static,
        Fut: IntoFuture<Output = ()>,
        Fut::IntoFuture: Send + 'static,
    {
        Self::new(async move {
            let result = self.future.await;
            let observer = match &result {
                Result::Ok(value) => Some(function(value).into_future()),
                Result::Err(_) => None,
            };
            if let Some(observer) = observer {
                observer.await;
            }
            result
        })
    }

    /// Observes the error.
    pub fn inspect_err<F>(self, function: F) -> Self
    where
        F: FnOnce(&E) + Send + 'static,
    {
        Self::new(self.future.map(move |result| result.inspect_err(function)))
    }

    /// Observes the error with an awaitable observer.
    pub fn inspect_err_async<F, Fut>(self, function: F) -> Self
    where
        F: FnOnce(&E) -> Fut + Send + 'static,
        Fut: IntoFuture<Output = ()>,
        Fut::IntoFuture: Send + 'static,
    {
        Self::new(async move {
            let result = self.future.await;
            let observer = match &result {
                Result::Ok(_) => None,
                Result::Err(error) => Some(function(error).into_future()),
            };
            if let Some(observer) = observer {
                observer.await;
            }
            result
        })
    }
}

// =============================================================================
// Boolean Combinators
// =============================================================================

impl<T, E> DeferredResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// `other` if this settles to `Ok`, otherwise this `Err`.
    ///
    /// Both futures are polled concurrently; the decision is taken once both
    /// have settled.
    pub fn and<U>(self, other: DeferredResult<U, E>) -> DeferredResult<U, E>
    where
        U: Send + 'static,
    {
        DeferredResult::new(
            future::join(self.future, other.future).map(|(left, right)| left.and(right)),
        )
    }

    /// Chains a fallible step.
    pub fn and_then<U, F>(self, function: F) -> DeferredResult<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Result<U, E> + Send + 'static,
    {
        DeferredResult::new(self.future.map(move |result| result.and_then(function)))
    }

    /// Chains a fallible step that is itself awaitable.
    ///
    /// The mapper may return a [`DeferredResult`] or any future of a
    /// [`Result`].
    pub fn and_then_async<U, F, Fut>(self, function: F) -> DeferredResult<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: IntoFuture<Output = Result<U, E>>,
        Fut::IntoFuture: Send + 'static,
    {
        DeferredResult::new(async move {
            match self.future.await {
                Result::Ok(value) => function(value).await,
                Result::Err(error) => Result::Err(error),
            }
        })
    }

    /// This `Ok` if it is one, otherwise `other`.
    ///
    /// Both futures are polled concurrently.
    pub fn or<G>(self, other: DeferredResult<T, G>) -> DeferredResult<T, G>
    where
        G: Send + 'static,
    {
        DeferredResult::new(
            future::join(self.future, other.future).map(|(left, right)| left.or(right)),
        )
    }

    /// Recovers from an error.
    pub fn or_else<G, F>(self, function: F) -> DeferredResult<T, G>
    where
        G: Send + 'static,
        F: FnOnce(E) -> Result<T, G> + Send + 'static,
    {
        DeferredResult::new(self.future.map(move |result| result.or_else(function)))
    }

    /// Recovers from an error with an awaitable handler.
    pub fn or_else_async<G, F, Fut>(self, function: F) -> DeferredResult<T, G>
    where
        G: Send + 'static,
        F: FnOnce(E) -> Fut + Send + 'static,
        Fut: IntoFuture<Output = Result<T, G>>,
        Fut::IntoFuture: Send + 'static,
    {
        DeferredResult::new(async move {
            match self.future.await {
                Result::Ok(value) => Result::Ok(value),
                Result::Err(error) => function(error).await,
            }
        })
    }

    /// Projects onto the success value.
    pub fn ok(self) -> DeferredOption<T> {
        DeferredOption::new(self.future.map(Result::ok))
    }

    /// Projects onto the error.
    pub fn err(self) -> DeferredOption<E> {
        DeferredOption::new(self.future.map(Result::err))
    }
}

impl<T, E> DeferredResult<Result<T, E>, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Removes one level of nesting.
    pub fn flatten(self) -> DeferredResult<T, E> {
        DeferredResult::new(self.future.map(Result::flatten))
    }
}

// =============================================================================
// Terminal Operations
// =============================================================================

impl<T, E> DeferredResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Resolves to `true` if this settles to `Ok`.
    pub async fn is_ok(self) -> bool {
        self.future.await.is_ok()
    }

    /// Resolves to `true` if this settles to `Err`.
    pub async fn is_err(self) -> bool {
        self.future.await.is_err()
    }

    /// Resolves to the success value, or `default`.
    pub async fn unwrap_or(self, default: T) -> T {
        self.future.await.unwrap_or(default)
    }

    /// Resolves to the success value, or `function(error)`.
    pub async fn unwrap_or_else<F>(self, function: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        self.future.await.unwrap_or_else(function)
    }

    /// Resolves to the success value, or `T::default()`.
    pub async fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.future.await.unwrap_or_default()
    }

    /// Resolves to `function(value)`, or `default` for an error.
    pub async fn map_or<U, F>(self, default: U, function: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        self.future.await.map_or(default, function)
    }

    /// Resolves to `function(value)`, or `default(error)` for an error.
    pub async fn map_or_else<U, D, F>(self, default: D, function: F) -> U
    where
        D: FnOnce(E) -> U,
        F: FnOnce(T) -> U,
    {
        self.future.await.map_or_else(default, function)
    }

    /// Resolves, then dispatches to exactly one handler.
    pub async fn match_with<R, F, G>(self, on_ok: F, on_err: G) -> R
    where
        F: FnOnce(T) -> R,
        G: FnOnce(E) -> R,
    {
        self.future.await.match_with(on_ok, on_err)
    }

    /// Resolves to the success value.
    ///
    /// # Panics
    ///
    /// Raises a [`Panic`](crate::Panic) carrying `message` on `Err`.
    pub async fn expect(self, message: &str) -> T {
        self.future.await.expect(message)
    }

    /// Resolves to the error.
    ///
    /// # Panics
    ///
    /// Raises a [`Panic`](crate::Panic) carrying `message` on `Ok`.
    pub async fn expect_err(self, message: &str) -> E {
        self.future.await.expect_err(message)
    }
}

impl<T, E> DeferredResult<T, E>
where
    T: Send + 'static,
    E: fmt::Debug + Send + 'static,
{
    /// Resolves to the success value.
    ///
    /// # Panics
    ///
    /// Raises an `UnwrapPanic` on `Err`.
    pub async fn unwrap(self) -> T {
        self.future.await.unwrap()
    }
}

impl<T, E> DeferredResult<T, E>
where
    T: fmt::Debug + Send + 'static,
    E: Send + 'static,
{
    /// Resolves to the error.
    ///
    /// # Panics
    ///
    /// Raises an `UnwrapPanic` on `Ok`.
    pub async fn unwrap_err(self) -> E {
        self.future.await.unwrap_err()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T, E> IntoFuture for DeferredResult<T, E> {
    type Output = Result<T, E>;
    type IntoFuture = BoxFuture<'static, Result<T, E>>;

    fn into_future(self) -> Self::IntoFuture {
        self.future
    }
}

impl<T, E> From<Result<T, E>> for DeferredResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn from(result: Result<T, E>) -> Self {
        Self::from_result(result)
    }
}

impl<T, E> fmt::Debug for DeferredResult<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("DeferredResult")
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(DeferredResult<i32, crate::StdError>: Send);
