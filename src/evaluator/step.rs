//! Synchronous steps and the [`run`] driver.

use std::marker::PhantomData;

use crate::result::Result;

/// Type-erased "run the source, then continue" node.
///
/// Erasing the intermediate value type lets a single [`Step<T, E>`] hold a
/// chain whose steps produce different types.
trait StepContinuation<T, E> {
    /// Evaluates the source. `Ok` carries the next step, `Err` the failure.
    fn resume(self: Box<Self>) -> Result<Step<T, E>, E>;
}

/// Hides [`StepContinuation`] from the public enum.
#[doc(hidden)]
pub struct ContinuationBox<T, E>(Box<dyn StepContinuation<T, E>>);

impl<T, E> ContinuationBox<T, E> {
    fn new<C: StepContinuation<T, E> + 'static>(continuation: C) -> Self {
        Self(Box::new(continuation))
    }

    fn resume(self) -> Result<Step<T, E>, E> {
        self.0.resume()
    }
}

/// One point in a chain of fallible steps.
///
/// A step is either finished, holding the outcome of the whole chain, or a
/// bind: a source producing a `Result<A, E>` plus a continuation that turns
/// the `A` into the next step. [`run`] interprets the chain in a loop, so deep
/// chains use constant stack space.
///
/// # Examples
///
/// ```rust
/// use okerr::evaluator::{run, Step};
/// use okerr::{err, ok, Result};
///
/// fn parse(input: &str) -> Result<i32, String> {
///     input.parse::<i32>().map_err(|_| format!("not a number: {input}")).into()
/// }
///
/// let sum = run(|| {
///     Step::bind(parse("2"), |left| {
///         Step::bind(parse("40"), move |right| Step::pure(left + right))
///     })
/// });
/// assert_eq!(sum, ok(42));
///
/// let failed = run(|| Step::bind(parse("x"), |value| Step::pure(value * 2)));
/// assert_eq!(failed, err("not a number: x".to_owned()));
/// ```
#[must_use = "steps do nothing unless driven by `run`"]
pub enum Step<T, E> {
    /// The chain has finished with this outcome.
    Done(Result<T, E>),
    /// Internal bind node.
    #[doc(hidden)]
    BindInternal(ContinuationBox<T, E>),
}

impl<T, E> Step<T, E> {
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

impl<T: 'static, E: 'static> Step<T, E> {
    /// Continues with `continuation` if `result` is `Ok`; stops otherwise.
    pub fn bind<A, F>(result: Result<A, E>, continuation: F) -> Self
    where
        A: 'static,
        F: FnOnce(A) -> Self + 'static,
    {
        Self::bind_with(move || result, continuation)
    }

    /// Like [`Step::bind`], but the source runs only when the driver reaches
    /// this step.
    pub fn bind_with<A, S, F>(source: S, continuation: F) -> Self
    where
        A: 'static,
        S: FnOnce() -> Result<A, E> + 'static,
        F: FnOnce(A) -> Self + 'static,
    {
        Self::BindInternal(ContinuationBox::new(Bind {
            source,
            continuation,
            marker: PhantomData,
        }))
    }

    /// Continues with `next` if `result` is `Ok`, discarding the value.
    pub fn then<A: 'static>(result: Result<A, E>, next: Self) -> Self {
        Self::bind(result, move |_| next)
    }
}

struct Bind<A, S, F> {
    source: S,
    continuation: F,
    marker: PhantomData<fn() -> A>,
}

impl<A, T, E, S, F> StepContinuation<T, E> for Bind<A, S, F>
where
    S: FnOnce() -> Result<A, E>,
    F: FnOnce(A) -> Step<T, E>,
{
    fn resume(self: Box<Self>) -> Result<Step<T, E>, E> {
        let Self {
            source,
            continuation,
            ..
        } = *self;
        source().map(continuation)
    }
}

// =============================================================================
// Driver
// =============================================================================

/// Drives the chain built by `body` to its first failure or to its end.
///
/// On an `Ok` step the continuation receives the value. On an `Err` step the
/// driver stops: no later source or continuation runs, and that `Err` is the
/// output.
///
/// # Examples
///
/// ```rust
/// use okerr::evaluator::{run, Step};
/// use okerr::{err, ok};
///
/// let outcome = run(|| {
///     Step::bind(ok::<i32, &str>(2), |_| {
///         Step::bind(err("boom"), |value: i32| Step::pure(value + 97))
///     })
/// });
/// assert_eq!(outcome, err("boom"));
/// ```
pub fn run<T, E, F>(body: F) -> Result<T, E>
where
    F: FnOnce() -> Step<T, E>,
{
    let mut current = body();
    let mut index = 0_usize;

    loop {
        match current {
            Step::Done(result) => {
                tracing::trace!(steps = index, ok = result.is_ok(), "evaluation finished");
                return result;
            }
            Step::BindInternal(continuation) => {
                index += 1;
                match continuation.resume() {
                    Result::Ok(next) => {
                        tracing::trace!(step = index, "step succeeded");
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
}

impl<T: std::fmt::Debug, E: std::fmt::Debug> std::fmt::Debug for Step<T, E> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{err, ok};
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    #[rstest]
    #[case(Step::pure(1), ok(1))]
    #[case(Step::fail("no"), err("no"))]
    #[case(Step::done(ok(3)), ok(3))]
    fn finished_steps_return_their_outcome(
        #[case] step: Step<i32, &'static str>,
        #[case] expected: Result<i32, &'static str>,
    ) {
        assert_eq!(run(move || step), expected);
    }

    #[rstest]
    fn failure_stops_later_steps() {
        let executed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&executed);

        let outcome = run(move || {
            let first = Rc::clone(&counter);
            Step::bind_with(
                move || {
                    first.set(first.get() + 1);
                    ok::<i32, &str>(2)
                },
                move |_| {
                    let second = Rc::clone(&counter);
                    Step::bind_with(
                        move || {
                            second.set(second.get() + 1);
                            err::<i32, &str>("boom")
                        },
                        move |_| {
                            counter.set(counter.get() + 1);
                            Step::pure(99)
                        },
                    )
                },
            )
        });

        assert_eq!(outcome, err("boom"));
        assert_eq!(executed.get(), 2);
    }

    #[rstest]
    fn then_discards_value() {
        let outcome = run(|| Step::then(ok::<&str, &str>("ignored"), Step::pure(7)));
        assert_eq!(outcome, ok(7));
    }

    #[rstest]
    fn deep_chains_use_constant_stack() {
        fn count(remaining: u32, total: u64) -> Step<u64, String> {
            if remaining == 0 {
                Step::pure(total)
            } else {
                Step::bind(ok(u64::from(remaining)), move |value| {
                    count(remaining - 1, total + value)
                })
            }
        }
        assert_eq!(run(|| count(100_000, 0)), ok(5_000_050_000));
    }

    #[rstest]
    fn debug_hides_continuations() {
        let step: Step<i32, ()> = Step::bind(ok(1), Step::pure);
        assert_eq!(format!("{step:?}"), "BindInternal(\"<continuation>\")");
        assert_eq!(format!("{:?}", Step::<i32, ()>::pure(1)), "Done(Ok(1))");
    }
}
