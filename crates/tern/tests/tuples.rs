//! Tests for tuple construction, flattening, normalization, and the
//! labelling/assignment binding rule.

use pretty_assertions::assert_eq;
use tern::{Context, Error, Value, evaluate_blocking, parse};

fn eval_str(source: &str) -> Result<Value, Error> {
    let program = parse(source)?;
    let context = Context::new();
    evaluate_blocking(&program, &context)
}

fn eval_ok(source: &str) -> Value {
    eval_str(source).expect("evaluation should succeed")
}

fn eval_in(context: &Context, source: &str) -> Value {
    let program = parse(source).expect("parse should succeed");
    evaluate_blocking(&program, context).expect("evaluation should succeed")
}

fn nums(values: impl IntoIterator<Item = f64>) -> Value {
    Value::tuple(values.into_iter().map(Value::number))
}

// =============================================================================
// 1. Flattening and normalization
// =============================================================================

/// Nested pairs flatten eagerly and empty groups vanish.
#[test]
fn pairs_flatten() {
    assert_eq!(eval_ok("1, (2, 3), (), 4"), nums([1.0, 2.0, 3.0, 4.0]));
    assert_eq!(eval_ok("(1, (2, 3), 4)"), eval_ok("(1, 2, 3, 4)"));
    assert_eq!(eval_ok("(1, (), 2)"), eval_ok("(1, 2)"));
}

/// The empty group is `Nothing`.
#[test]
fn empty_group_is_nothing() {
    assert!(eval_ok("()").is_nothing());
    assert_eq!(eval_ok("()"), Value::Nothing);
}

/// A singleton tuple is its element.
#[test]
fn singleton_normalizes_to_element() {
    assert_eq!(eval_ok("(5, ())"), Value::Number(5.0));
    assert_eq!(eval_ok("((), 'x', ())"), Value::string("x"));
}

/// Parentheses group without creating a tuple.
#[test]
fn parentheses_do_not_create_tuples() {
    assert_eq!(eval_ok("(5)"), Value::Number(5.0));
    assert_eq!(eval_ok("((5))"), Value::Number(5.0));
}

/// Lists are deep: a nested list literal stays a list element, while a
/// nested tuple splices.
#[test]
fn lists_are_not_auto_flattened() {
    let inner = Value::list(vec![Value::Number(2.0), Value::Number(3.0)]);
    assert_eq!(
        eval_ok("[1, [2, 3], 4]"),
        Value::list(vec![Value::Number(1.0), inner, Value::Number(4.0)])
    );
    assert_eq!(
        eval_ok("[1, (2, 3), 4]"),
        Value::list(vec![
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0),
            Value::Number(4.0),
        ])
    );
}

/// The empty list and empty namespace literals are not `Nothing`.
#[test]
fn empty_containers_are_not_nothing() {
    assert_eq!(eval_ok("[]"), Value::list(vec![]));
    assert!(!eval_ok("[]").is_nothing());
    assert!(!eval_ok("{}").is_nothing());
}

// =============================================================================
// 2. Labelling and assignment
// =============================================================================

/// `:` returns the values; `=` returns `Nothing`.
#[test]
fn label_returns_values_set_returns_nothing() {
    assert_eq!(eval_ok("(x : 5)"), Value::Number(5.0));
    assert_eq!(eval_ok("(x = 5)"), Value::Nothing);
}

/// Bindings persist in the context across evaluations.
#[test]
fn bindings_persist_across_programs() {
    let context = Context::new();
    eval_in(&context, "x = 10");
    assert_eq!(eval_in(&context, "x + 1"), Value::Number(11.0));
}

/// Fewer values than names: trailing names bind to `Nothing` but are
/// defined.
#[test]
fn binding_pads_with_nothing() {
    let context = Context::new();
    eval_in(&context, "(x, y, z) = (1, 2)");
    assert_eq!(eval_in(&context, "x"), Value::Number(1.0));
    assert_eq!(eval_in(&context, "y"), Value::Number(2.0));
    assert_eq!(eval_in(&context, "z"), Value::Nothing);
    assert_eq!(eval_in(&context, "type z"), Value::string("Nothing"));
}

/// More values than names: the last name takes the tuple of the tail.
#[test]
fn binding_packs_tail_into_last_name() {
    let context = Context::new();
    eval_in(&context, "(x, y) = (1, 2, 3, 4)");
    assert_eq!(eval_in(&context, "x"), Value::Number(1.0));
    assert_eq!(eval_in(&context, "y"), nums([2.0, 3.0, 4.0]));
}

/// A single name against a tuple takes the whole tuple.
#[test]
fn binding_single_name_takes_all() {
    let context = Context::new();
    eval_in(&context, "t = (1, 2, 3)");
    assert_eq!(eval_in(&context, "t"), nums([1.0, 2.0, 3.0]));
}

/// Assignments sequence under `,` because their `Nothing` results vanish in
/// the surrounding tuple.
#[test]
fn assignments_sequence_under_pairing() {
    assert_eq!(eval_ok("x = 1, y = 2, x + y"), Value::Number(3.0));
}

/// Anything but names and pairs on the left of `:` or `=` is an error.
#[test]
fn invalid_binding_targets() {
    let err = eval_str("1 : 2").expect_err("expected operator error");
    assert_eq!(err.message(), "valid name(s) expected on the left of ':'");
    let err = eval_str("(x + y) = 2").expect_err("expected operator error");
    assert_eq!(err.message(), "valid name(s) expected on the left of '='");
}

/// Rebinding a name shadows the outer frame without touching it.
#[test]
fn rebinding_shadows_globals() {
    let context = Context::with_globals([("a".to_owned(), Value::number(1.0))]);
    eval_in(&context, "a = 2");
    assert_eq!(eval_in(&context, "a"), Value::Number(2.0));
}
