//! Asynchronous steps and the [`run_async`] driver.

use futures::future::BoxFuture;

use crate::deferred::DeferredResult;
use crate::result::Result;

/// Anything an [`AsyncStep`] can wait on.
///
/// Implemented for [`DeferredResult`], for this crate's [`Result`] and for
/// [`std::result::Result`], so already settled values need no wrapping.
pub trait IntoDeferredResult {
    /// The success type.
    type Ok;
    /// The error type.
    type Err;

    /// Converts into a deferred result.
    fn into_deferred(self) -> DeferredResult<Self::Ok, Self::Err>;
}

impl<T, E> IntoDeferredResult for DeferredResult<T, E> {
    type Ok = T;
    type Err = E;

    #[inline]
    fn into_deferred(self) -> Self {
        self
    }
}

impl<T: Send + 'static, E: Send + 'static> IntoDeferredResult for Result<T, E> {
    type Ok = T;
    type Err = E;

    #[inline]
    fn into_deferred(self) -> DeferredResult<T, E> {
        DeferredResult::from_result(self)
    }
}

impl<T: Send + 'static, E: Send + 'static> IntoDeferredResult for std::result::Result<T, E> {
    type Ok = T;
    type Err = E;

    #[inline]
    fn into_deferred(self) -> DeferredResult<T, E> {
        DeferredResult::from_result(self.into())
    }
}

trait AsyncStepContinuation<T, E>: Send {
    fn resume(self: Box<Self>) -> BoxFuture<'static, Result<AsyncStep<T, E>, E>>;
}

/// Hides the continuation trait from the public enum.
#[doc(hidden)]
pub struct AsyncContinuationBox<T, E>(Box<dyn AsyncStepContinuation<T, E>>);

impl<T, E> AsyncContinuationBox<T, E> {
    fn new<C: AsyncStepContinuation<T, E> + 'static>(continuation: C) -> Self {
        Self(Box::new(continuation))
    }

    fn resume(self) -> BoxFuture<'static, Result<AsyncStep<T, E>, E>> {
        self.0.resume()
    }
}

/// One point in a chain of fallible steps that may wait.
///
/// The asynchronous counterpart of [`Step`](super::Step): each bind waits on
/// a [`DeferredResult`] (or anything implementing [`IntoDeferredResult`])
/// before handing the value to its continuation.
#[must_use = "steps do nothing unless driven by `run_async`"]
pub enum AsyncStep<T, E> {
    /// The chain has finished with this outcome.
    Done(Result<T, E>),
    /// Internal bind node.
    #[doc(hidden)]
    BindInternal(AsyncContinuationBox<T, E>),
}

impl<T, E> AsyncStep<T, E> {
    /// Finishes the chain with `result`.
    #[inline]
    pub const fn done(result: Result<T, E>) -> Self {
        Self::Done(result)
    }

    /// Finishes the chain successfully.
    #[inline]
    pub const fn pure(value: T) -> Self {
        Self::Done(Result::Ok(value))
    }

    /// Finishes the chain with a failure.
    #[inline]
    pub const fn fail(error: E) -> Self {
        Self::Done(Result::Err(error))
    }
}

impl<T: Send + 'static, E: Send + 'static> AsyncStep<T, E> {
    /// Waits on `source`, then continues with its value; stops on `Err`.
    pub fn bind<S, F>(source: S, continuation: F) -> Self
    where
        S: IntoDeferredResult<Err = E>,
        S::Ok: Send + 'static,
        F: FnOnce(S::Ok) -> Self + Send + 'static,
    {
        Self::BindInternal(AsyncContinuationBox::new(AsyncBind {
            source: source.into_deferred(),
            continuation,
        }))
    }

    /// Like [`AsyncStep::bind`], but `source` is only created when the driver
    /// reaches this step.
    pub fn bind_with<S, G, F>(source: G, continuation: F) -> Self
    where
        G: FnOnce() -> S + Send + 'static,
        S: IntoDeferredResult<Err = E>,
        S::Ok: Send + 'static,
        F: FnOnce(S::Ok) -> Self + Send + 'static,
    {
        let deferred = DeferredResult::new(async move { source().into_deferred().await });
        Self::bind(deferred, continuation)
    }

    /// Waits on `source`, then continues with `next`, discarding the value.
    pub fn then<S>(source: S, next: Self) -> Self
    where
        S: IntoDeferredResult<Err = E>,
        S::Ok: Send + 'static,
    {
        Self::bind(source, move |_| next)
    }
}

struct AsyncBind<A, E, F> {
    source: DeferredResult<A, E>,
    continuation: F,
}

impl<A, T, E, F> AsyncStepContinuation<T, E> for AsyncBind<A, E, F>
where
    A: Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    F: FnOnce(A) -> AsyncStep<T, E> + Send + 'static,
{
    fn resume(self: Box<Self>) -> BoxFuture<'static, Result<AsyncStep<T, E>, E>> {
        let Self {
            source,
            continuation,
        } = *self;
        Box::pin(async move { source.await.map(continuation) })
    }
}

// =============================================================================
// Driver
// =============================================================================

/// Drives the chain built by `body`, awaiting each step in turn.
///
/// Waiting on a step yields to the executor. The returned value settles once
/// every step has settled or at the first `Err`, after which no later step is
/// created. A panic while waiting propagates out of the returned future.
///
/// # Examples
///
/// ```rust
/// use futures::executor::block_on;
/// use okerr::deferred::DeferredResult;
/// use okerr::evaluator::{run_async, AsyncStep};
///
/// let total = run_async(|| {
///     AsyncStep::bind(DeferredResult::<i32, String>::from_ok(1), |left| {
///         AsyncStep::bind(okerr::ok(2), move |right| AsyncStep::pure(left + right))
///     })
/// });
/// assert_eq!(block_on(total.into_future()), okerr::ok(3));
/// ```
pub fn run_async<T, E, F>(body: F) -> DeferredResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
    F: FnOnce() -> AsyncStep<T, E> + Send + 'static,
{
    DeferredResult::new(async move {
        let mut current = body();
        let mut index = 0_usize;

        loop {
            match current {
                AsyncStep::Done(result) => {
                    tracing::trace!(steps = index, ok = result.is_ok(), "evaluation finished");
                    return result;
                }
                AsyncStep::BindInternal(continuation) => {
                    index += 1;
                    match continuation.resume().await {
                        Result::Ok(next) => {
                            tracing::trace!(step = index, "step settled");
                            current = next;
                        }
                        Result::Err(error) => {
                            tracing::debug!(step = index, "evaluation short-circuited");
                            return Result::Err(error);
                        }
                    }
                }
            }
        }
    })
}

impl<T: std::fmt::Debug, E: std::fmt::Debug> std::fmt::Debug for AsyncStep<T, E> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Done(result) => formatter.debug_tuple("Done").field(result).finish(),
            Self::BindInternal(_) => formatter
                .debug_tuple("BindInternal")
                .field(&"<continuation>")
                .finish(),
        }
    }
}

static_assertions::assert_impl_all!(AsyncStep<i32, String>: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{err, ok};
    use rstest::rstest;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn delayed<T: Send + 'static>(
        result: Result<T, &'static str>,
    ) -> DeferredResult<T, &'static str> {
        DeferredResult::new(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            result
        })
    }

    #[rstest]
    #[tokio::test]
    async fn binds_deferred_and_plain_results() {
        let total = run_async(|| {
            AsyncStep::bind(delayed(ok(1)), |left| {
                AsyncStep::bind(ok::<i32, &str>(2), move |middle| {
                    AsyncStep::bind(std::result::Result::Ok(3), move |right| {
                        AsyncStep::pure(left + middle + right)
                    })
                })
            })
        });
        assert_eq!(total.await, ok(6));
    }

    #[rstest]
    #[tokio::test]
    async fn failure_stops_later_steps() {
        let executed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&executed);

        let outcome = run_async(move || {
            AsyncStep::bind(delayed(ok(1)), move |_| {
                AsyncStep::bind(delayed(err::<i32, _>("x")), move |_| {
                    AsyncStep::bind_with(
                        move || {
                            counter.fetch_add(1, Ordering::SeqCst);
                            ok::<i32, &str>(2)
                        },
                        AsyncStep::pure,
                    )
                })
            })
        })
        .await;

        assert_eq!(outcome, err("x"));
        assert_eq!(executed.load(Ordering::SeqCst), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn bind_with_defers_source_creation() {
        let created = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&created);

        let pending = run_async(move || {
            AsyncStep::bind_with(
                move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    delayed(ok(4))
                },
                |value| AsyncStep::pure(value * 2),
            )
        });
        assert_eq!(created.load(Ordering::SeqCst), 0);
        assert_eq!(pending.await, ok(8));
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn then_waits_before_continuing() {
        let body = || AsyncStep::then(delayed(ok("ignored")), AsyncStep::pure(5));
        assert_eq!(run_async(body).await, ok(5));
    }
}
