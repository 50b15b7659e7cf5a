//! Scenario tests for the synchronous evaluator and the combinators it is
//! built on.

use std::cell::Cell;
use std::panic;
use std::rc::Rc;

use okerr::bridge::try_fn;
use okerr::evaluator::{Step, run};
use okerr::{Result, ResultError, err, none, ok, some};
use rstest::rstest;

#[derive(Debug, PartialEq)]
struct TypeError(&'static str);

fn install_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("okerr=trace"))
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Scenarios
// =============================================================================

#[rstest]
#[case(ok(2), ok(3), ok(3))]
#[case(err("a"), ok(3), err("a"))]
#[case(ok(2), err("b"), err("b"))]
fn scenario_and(
    #[case] left: Result<i32, &'static str>,
    #[case] right: Result<i32, &'static str>,
    #[case] expected: Result<i32, &'static str>,
) {
    assert_eq!(left.and(right), expected);
}

#[rstest]
fn scenario_sequence_stops_at_boom() {
    install_tracing();
    let side_effects = Rc::new(Cell::new(0));
    let third = Rc::clone(&side_effects);

    let outcome = run(move || {
        Step::bind(ok::<i32, &str>(2), move |_| {
            Step::bind(err::<i32, &str>("boom"), move |_| {
                Step::bind_with(
                    move || {
                        third.set(third.get() + 1);
                        ok(99)
                    },
                    Step::pure,
                )
            })
        })
    });

    assert_eq!(outcome, err("boom"));
    assert_eq!(side_effects.get(), 0);
}

#[rstest]
fn scenario_thrown_type_error() {
    let error = try_fn(|| -> i32 { panic::panic_any(TypeError("bad")) }).unwrap_err();
    let origin = error.origin().unwrap();
    assert_eq!(origin.downcast_ref::<TypeError>(), Some(&TypeError("bad")));
}

#[rstest]
#[case(some(5), none())]
#[case(some(15), some(15))]
#[case(none(), none())]
fn scenario_filter(#[case] option: okerr::Option<i32>, #[case] expected: okerr::Option<i32>) {
    assert_eq!(option.filter(|value| *value > 10), expected);
}

#[rstest]
fn none_filter_never_calls_predicate() {
    let mut called = false;
    let filtered = none::<i32>().filter(|_| {
        called = true;
        true
    });
    assert_eq!(filtered, none());
    assert!(!called);
}

// =============================================================================
// Macro Front End
// =============================================================================

fn parse(input: &str) -> Result<i32, String> {
    input
        .parse::<i32>()
        .map_err(|error| format!("{input}: {error}"))
        .into()
}

#[rstest]
#[case("2", "40", ok(42))]
#[case("2", "x", err("x: invalid digit found in string".to_owned()))]
#[case("y", "x", err("y: invalid digit found in string".to_owned()))]
fn run_macro_sums_parsed_values(
    #[case] left: &'static str,
    #[case] right: &'static str,
    #[case] expected: Result<i32, String>,
) {
    let outcome = okerr::run! {
        a <= parse(left);
        b <= parse(right);
        yield a + b
    };
    assert_eq!(outcome, expected);
}

#[rstest]
fn run_matches_folded_and_then() {
    let steps = [ok(1), ok(2), err("third"), ok(4)];

    let folded = steps.iter().fold(ok::<i32, &str>(0), |total, step| {
        total.and_then(|sum| step.map(|value| sum + value))
    });

    let evaluated = okerr::run! {
        a <= steps[0];
        b <= steps[1];
        c <= steps[2];
        d <= steps[3];
        yield a + b + c + d
    };

    assert_eq!(evaluated, folded);
    assert_eq!(evaluated, err("third"));
}
