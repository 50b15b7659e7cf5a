//! Property-based tests for the evaluator.
//!
//! - **Equivalence**: `run` over a step sequence equals folding `and_then`
//! - **Short-circuit**: no step after the first `Err` executes

use std::cell::Cell;
use std::rc::Rc;

use okerr::evaluator::{Step, run};
use okerr::{Result, ok};
use proptest::prelude::*;

fn any_result() -> impl Strategy<Value = Result<i32, u8>> {
    any::<std::result::Result<i32, u8>>().prop_map(Result::from)
}

fn chain(
    mut steps: std::vec::IntoIter<Result<i32, u8>>,
    total: i32,
    executed: Rc<Cell<usize>>,
) -> Step<i32, u8> {
    match steps.next() {
        None => Step::pure(total),
        Some(step) => {
            let counter = Rc::clone(&executed);
            Step::bind_with(
                move || {
                    counter.set(counter.get() + 1);
                    step
                },
                move |value| chain(steps, total.wrapping_add(value), executed),
            )
        }
    }
}

fn fold(steps: &[Result<i32, u8>]) -> Result<i32, u8> {
    steps.iter().fold(ok(0), |total, step| {
        total.and_then(|sum| step.map(|value| sum.wrapping_add(value)))
    })
}

proptest! {
    #[test]
    fn prop_run_equals_folded_and_then(steps in proptest::collection::vec(any_result(), 0..32)) {
        let expected = fold(&steps);
        let executed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&executed);
        let sequence = steps.clone();
        prop_assert_eq!(run(move || chain(sequence.into_iter(), 0, counter)), expected);
    }

    #[test]
    fn prop_no_step_runs_after_failure(steps in proptest::collection::vec(any_result(), 0..32)) {
        let executed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&executed);
        let sequence = steps.clone();
        let _ = run(move || chain(sequence.into_iter(), 0, counter));

        let expected = steps
            .iter()
            .position(Result::is_err)
            .map_or(steps.len(), |index| index + 1);
        prop_assert_eq!(executed.get(), expected);
    }
}

proptest! {
    #![proptest_config(proptest::prelude::ProptestConfig::with_cases(16))]
    #[test]
    fn prop_long_chains_are_stack_safe(length in 10_000usize..20_000usize) {
        let steps = vec![ok(1); length];
        let executed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&executed);
        let outcome = run(move || chain(steps.into_iter(), 0, counter));
        prop_assert_eq!(outcome, ok(i32::try_from(length).unwrap()));
    }
}
