//! `DeferredOption` - a future of an `Option` with the `Option` combinators.

use std::fmt;
use std::future::{Future, IntoFuture};

use futures::FutureExt;
use futures::future::{self, BoxFuture};

use super::{DeferredResult, Pending};
use crate::option::Option;

/// A future of an [`Option`] exposing the [`Option`] combinators.
#[must_use = "deferred values do nothing unless awaited"]
pub struct DeferredOption<T> {
    future: Pending<Option<T>>,
}

impl<T: Send + 'static> DeferredOption<T> {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Wraps a future producing an [`Option`].
    pub fn new<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Option<T>> + Send + 'static,
    {
        Self {
            future: future.boxed(),
        }
    }

    /// Wraps an already settled [`Option`].
    pub fn from_option(option: Option<T>) -> Self {
        Self::new(future::ready(option))
    }

    /// A deferred `Some(value)`.
    pub fn some(value: T) -> Self {
        Self::from_option(Option::Some(value))
    }

    /// A deferred `None`.
    pub fn none() -> Self {
        Self::from_option(Option::None)
    }

    // =========================================================================
    // Mapping
    // =========================================================================

    /// Transforms the contained value.
    pub fn map<U, F>(self, function: F) -> DeferredOption<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        DeferredOption::new(self.future.map(move |option| option.map(function)))
    }

    /// Transforms the contained value with an awaitable mapper.
    pub fn map_async<U, F, Fut>(self, function: F) -> DeferredOption<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: IntoFuture<Output = U>,
        Fut::IntoFuture: Send + 'static,
    {
        DeferredOption::new(async move {
            match self.future.await {
                Option::Some(value) => Option::Some(function(value).await),
                Option::None => Option::None,
            }
        })
    }

    /// Observes the contained value.
    pub fn inspect<F>(self, function: F) -> Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        Self::new(self.future.map(move |option| option.inspect(function)))
    }

    /// Observes the contained value with an awaitable observer.
    pub fn inspect_async<F, Fut>(self, function: F) -> Self
    where
        F: FnOnce(&T) -> Fut + Send + 'static,
        Fut: IntoFuture<Output = ()>,
        Fut::IntoFuture: Send + 'static,
    {
        Self::new(async move {
            let option = self.future.await;
            let observer = match &option {
                Option::Some(value) => Some(function(value).into_future()),
                Option::None => None,
            };
            if let Some(observer) = observer {
                observer.await;
            }
            option
        })
    }

    /// Keeps the value only if it satisfies `predicate`.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool + Send + 'static,
    {
        Self::new(self.future.map(move |option| option.filter(predicate)))
    }

    /// Keeps the value only if an awaitable `predicate` resolves to `true`.
    pub fn filter_async<P, Fut>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> Fut + Send + 'static,
        Fut: IntoFuture<Output = bool>,
        Fut::IntoFuture: Send + 'static,
    {
        Self::new(async move {
            match self.future.await {
                Option::Some(value) => {
                    let verdict = predicate(&value).into_future();
                    if verdict.await {
                        Option::Some(value)
                    } else {
                        Option::None
                    }
                }
                Option::None => Option::None,
            }
        })
    }

    // =========================================================================
    // Boolean Combinators
    // =========================================================================

    /// `other` if this settles to `Some`, otherwise `None`.
    ///
    /// Both futures are polled concurrently.
    pub fn and<U>(self, other: DeferredOption<U>) -> DeferredOption<U>
    where
        U: Send + 'static,
    {
        DeferredOption::new(
            future::join(self.future, other.future).map(|(left, right)| left.and(right)),
        )
    }

    /// Chains an optional step.
    pub fn and_then<U, F>(self, function: F) -> DeferredOption<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Option<U> + Send + 'static,
    {
        DeferredOption::new(self.future.map(move |option| option.and_then(function)))
    }

    /// Chains an optional step that is itself awaitable.
    pub fn and_then_async<U, F, Fut>(self, function: F) -> DeferredOption<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: IntoFuture<Output = Option<U>>,
        Fut::IntoFuture: Send + 'static,
    {
        DeferredOption::new(async move {
            match self.future.await {
                Option::Some(value) => function(value).await,
                Option::None => Option::None,
            }
        })
    }

    /// This `Some` if it is one, otherwise `other`.
    ///
    /// Both futures are polled concurrently.
    pub fn or(self, other: Self) -> Self {
        Self::new(
            future::join(self.future, other.future).map(|(left, right)| left.or(right)),
        )
    }

    /// Falls back to `function()` when `None`.
    pub fn or_else<F>(self, function: F) -> Self
    where
        F: FnOnce() -> Option<T> + Send + 'static,
    {
        Self::new(self.future.map(move |option| option.or_else(function)))
    }

    /// Falls back to an awaitable `function()` when `None`.
    pub fn or_else_async<F, Fut>(self, function: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: IntoFuture<Output = Option<T>>,
        Fut::IntoFuture: Send + 'static,
    {
        Self::new(async move {
            match self.future.await {
                Option::Some(value) => Option::Some(value),
                Option::None => function().await,
            }
        })
    }

    /// `Some` exactly when one side settles to `Some`.
    ///
    /// Both futures are polled concurrently.
    pub fn xor(self, other: Self) -> Self {
        Self::new(
            future::join(self.future, other.future).map(|(left, right)| left.xor(right)),
        )
    }

    /// `Ok(value)` for `Some`, `Err(error)` for `None`.
    pub fn ok_or<E>(self, error: E) -> DeferredResult<T, E>
    where
        E: Send + 'static,
    {
        DeferredResult::new(self.future.map(move |option| option.ok_or(error)))
    }

    /// `Ok(value)` for `Some`, `Err(function())` for `None`.
    pub fn ok_or_else<E, F>(self, function: F) -> DeferredResult<T, E>
    where
        E: Send + 'static,
        F: FnOnce() -> E + Send + 'static,
    {
        DeferredResult::new(self.future.map(move |option| option.ok_or_else(function)))
    }

    // =========================================================================
    // Terminal Operations
    // =========================================================================

    /// Resolves to `true` if this settles to `Some`.
    pub async fn is_some(self) -> bool {
        self.future.await.is_some()
    }

    /// Resolves to `true` if this settles to `None`.
    pub async fn is_none(self) -> bool {
        self.future.await.is_none()
    }

    /// Resolves to the contained value.
    ///
    /// # Panics
    ///
    /// Raises an `UnwrapPanic` on `None`.
    pub async fn unwrap(self) -> T {
        self.future.await.unwrap()
    }

    /// Resolves to the contained value.
    ///
    /// # Panics
    ///
    /// Raises a [`Panic`](crate::Panic) carrying `message` on `None`.
    pub async fn expect(self, message: &str) -> T {
        self.future.await.expect(message)
    }

    /// Resolves to the contained value, or `default`.
    pub async fn unwrap_or(self, default: T) -> T {
        self.future.await.unwrap_or(default)
    }

    /// Resolves to the contained value, or `function()`.
    pub async fn unwrap_or_else<F>(self, function: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.future.await.unwrap_or_else(function)
    }

    /// Resolves to the contained value, or `T::default()`.
    pub async fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.future.await.unwrap_or_default()
    }

    /// Resolves to `function(value)`, or `default` for `None`.
    pub async fn map_or<U, F>(self, default: U, function: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        self.future.await.map_or(default, function)
    }

    /// Resolves to `function(value)`, or `default()` for `None`.
    pub async fn map_or_else<U, D, F>(self, default: D, function: F) -> U
    where
        D: FnOnce() -> U,
        F: FnOnce(T) -> U,
    {
        self.future.await.map_or_else(default, function)
    }

    /// Resolves, then dispatches to exactly one handler.
    pub async fn match_with<R, F, G>(self, on_some: F, on_none: G) -> R
    where
        F: FnOnce(T) -> R,
        G: FnOnce() -> R,
    {
        self.future.await.match_with(on_some, on_none)
    }
}

impl<T: Send + 'static> DeferredOption<Option<T>> {
    /// Removes one level of nesting.
    pub fn flatten(self) -> DeferredOption<T> {
        DeferredOption::new(self.future.map(Option::flatten))
    }
}

impl<T> IntoFuture for DeferredOption<T> {
    type Output = Option<T>;
    type IntoFuture = BoxFuture<'static, Option<T>>;

    fn into_future(self) -> Self::IntoFuture {
        self.future
    }
}

impl<T: Send + 'static> From<Option<T>> for DeferredOption<T> {
    fn from(option: Option<T>) -> Self {
        Self::from_option(option)
    }
}

impl<T> fmt::Debug for DeferredOption<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("DeferredOption")
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(DeferredOption<String>: Send);
