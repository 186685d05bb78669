//! Tests for the polymorphic operator semantics: the arithmetic/string
//! table, tuple lifting, comparison, equality, and the short-circuit forms.

use pretty_assertions::assert_eq;
use tern::{Context, Error, ErrorKind, Value, evaluate_blocking, parse};

fn seeded_context() -> Context {
    Context::with_globals([
        ("a".to_owned(), Value::number(10.0)),
        ("b".to_owned(), Value::number(20.0)),
        ("T".to_owned(), Value::Boolean(true)),
        ("F".to_owned(), Value::Boolean(false)),
    ])
}

fn eval_str(source: &str) -> Result<Value, Error> {
    let program = parse(source)?;
    evaluate_blocking(&program, &seeded_context())
}

fn eval_ok(source: &str) -> Value {
    eval_str(source).expect("evaluation should succeed")
}

fn eval_err(source: &str) -> Error {
    eval_str(source).expect_err("expected evaluation error")
}

fn nums(values: impl IntoIterator<Item = f64>) -> Value {
    Value::tuple(values.into_iter().map(Value::number))
}

// =============================================================================
// 1. Sum
// =============================================================================

/// `+` over numbers, strings, lists, namespaces and booleans.
#[test]
fn sum_table() {
    assert_eq!(eval_ok("a + b"), Value::Number(30.0));
    assert_eq!(eval_ok("'ab' + 'cd'"), Value::string("abcd"));
    assert_eq!(
        eval_ok("[1] + [2, 3]"),
        Value::list(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)])
    );
    assert_eq!(eval_ok("T + F"), Value::Boolean(true));
    assert_eq!(eval_ok("F + F"), Value::Boolean(false));
}

/// `Nothing` is the identity of `+` on both sides.
#[test]
fn sum_nothing_identity() {
    assert_eq!(eval_ok("() + 5"), Value::Number(5.0));
    assert_eq!(eval_ok("5 + ()"), Value::Number(5.0));
    assert_eq!(eval_ok("() + ()"), Value::Nothing);
}

/// Namespace merge is right-biased on key collisions.
#[test]
fn sum_namespace_merge() {
    let context = Context::new();
    let program = parse("m = {x = 1, y = 2} + {y = 20, z = 30}, (m 'x', m 'y', m 'z')").unwrap();
    let result = evaluate_blocking(&program, &context).unwrap();
    assert_eq!(result, nums([1.0, 20.0, 30.0]));
}

/// An undefined `+` combination reports the documented message.
#[test]
fn sum_errors() {
    let err = eval_err("T + 1");
    assert_eq!(err.kind(), ErrorKind::Operator);
    assert_eq!(err.message(), "Sum operation not defined between Boolean and Number");
    let err = eval_err("'x' + 1");
    assert_eq!(err.message(), "Sum operation not defined between String and Number");
}

// =============================================================================
// 2. Subtraction, division, modulo, exponentiation
// =============================================================================

/// `-` is defined for numbers, with `Nothing` absorbing on the left and
/// passing through on the right.
#[test]
fn subtraction_table() {
    assert_eq!(eval_ok("b - a"), Value::Number(10.0));
    assert_eq!(eval_ok("() - 5"), Value::Nothing);
    assert_eq!(eval_ok("5 - ()"), Value::Number(5.0));
    let err = eval_err("'x' - 'y'");
    assert_eq!(err.message(), "Subtraction operation not defined between String and String");
}

/// Division follows IEEE-754: by zero gives infinity, zero by zero is NaN
/// which normalizes to `Nothing`.
#[test]
fn division_table() {
    assert_eq!(eval_ok("b / a"), Value::Number(2.0));
    assert_eq!(eval_ok("1 / 0"), Value::Number(f64::INFINITY));
    assert!(eval_ok("0 / 0").is_nothing());
    assert_eq!(eval_ok("() / 5"), Value::Nothing);
    let err = eval_err("5 / 'x'");
    assert_eq!(err.message(), "Division operation not defined between Number and String");
}

/// `() % y` is `y`; numbers take the remainder.
#[test]
fn modulo_table() {
    assert_eq!(eval_ok("7 % 3"), Value::Number(1.0));
    assert_eq!(eval_ok("() % 5"), Value::Number(5.0));
    let err = eval_err("5 % ()");
    assert_eq!(err.message(), "Modulo operation not defined between Number and Nothing");
}

/// Exponentiation over numbers.
#[test]
fn exponentiation_table() {
    assert_eq!(eval_ok("2 ^ 10"), Value::Number(1024.0));
    assert_eq!(eval_ok("() ^ 3"), Value::Nothing);
    let err = eval_err("'x' ^ 2");
    assert_eq!(err.message(), "Exponentiation operation not defined between String and Number");
}

// =============================================================================
// 3. Product and repetition
// =============================================================================

/// `*` over numbers and booleans, and repetition of strings and lists.
#[test]
fn product_table() {
    assert_eq!(eval_ok("a * b"), Value::Number(200.0));
    assert_eq!(eval_ok("T * F"), Value::Boolean(false));
    assert_eq!(eval_ok("'ab' * 3"), Value::string("ababab"));
    assert_eq!(eval_ok("3 * 'ab'"), Value::string("ababab"));
    assert_eq!(
        eval_ok("[1, 2, 3] * 2"),
        Value::list(vec![
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0),
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0),
        ])
    );
}

/// Repetition truncates toward zero; a negative count is empty.
#[test]
fn repetition_truncates() {
    assert_eq!(eval_ok("'ab' * 2.9"), Value::string("abab"));
    assert_eq!(eval_ok("'ab' * (-1)"), Value::string(""));
    assert_eq!(eval_ok("[1] * 0.5"), Value::list(vec![]));
}

/// `Nothing` absorbs `*` from either side.
#[test]
fn product_nothing_absorbs() {
    assert_eq!(eval_ok("() * 5"), Value::Nothing);
    assert_eq!(eval_ok("'x' * ()"), Value::Nothing);
}

// =============================================================================
// 4. Tuple lifting
// =============================================================================

/// Arithmetic lifts elementwise over tuples, padding the shorter side with
/// `Nothing`.
#[test]
fn lifting_zips_pairwise() {
    assert_eq!(eval_ok("(1, 2, 3) + (10, 20, 30)"), nums([11.0, 22.0, 33.0]));
    // (1+10, 2+(), 3+()) = (11, 2, 3)
    assert_eq!(eval_ok("(1, 2, 3) + 10"), nums([11.0, 2.0, 3.0]));
    // 0/0 normalizes to Nothing, which drops out of the result tuple
    assert_eq!(eval_ok("(0, 1) / (0, 2)"), Value::Number(0.5));
}

/// A lifted element error aborts the whole operation.
#[test]
fn lifting_propagates_element_errors() {
    let err = eval_err("(1, T) + (2, 3)");
    assert_eq!(err.message(), "Sum operation not defined between Boolean and Number");
}

// =============================================================================
// 5. Comparison
// =============================================================================

/// Tuples compare lexicographically; `Nothing` is strictly least.
#[test]
fn comparison_lexicographic() {
    assert_eq!(eval_ok("(1, 2, 3) < (1, 2, 4)"), Value::Boolean(true));
    assert_eq!(eval_ok("(1, 2) < (1, 2, 4)"), Value::Boolean(true));
    assert_eq!(eval_ok("() < 0"), Value::Boolean(true));
    assert_eq!(eval_ok("(1, 2) >= (1, 2)"), Value::Boolean(true));
    assert_eq!(eval_ok("'abc' < 'abd'"), Value::Boolean(true));
    assert_eq!(eval_ok("F < T"), Value::Boolean(true));
    assert_eq!(eval_ok("[1, 2] < [1, 2, 0]"), Value::Boolean(true));
}

/// Comparison across kinds (other than `Nothing`) raises.
#[test]
fn comparison_kind_mismatch() {
    let err = eval_err("1 < 'x'");
    assert_eq!(err.kind(), ErrorKind::Operator);
    assert_eq!(err.message(), "Comparison operation not defined between Number and String");
}

/// Namespaces and functions have no order.
#[test]
fn comparison_unordered_kinds() {
    let err = eval_err("{} < {}");
    assert_eq!(err.message(), "Comparison operation not defined between Namespace and Namespace");
    let err = eval_err("(x -> x) < (x -> x)");
    assert_eq!(err.message(), "Comparison operation not defined between Function and Function");
}

// =============================================================================
// 6. Equality
// =============================================================================

/// `==` is value equality within a kind and always false across kinds.
#[test]
fn equality_table() {
    assert_eq!(eval_ok("1 == 1"), Value::Boolean(true));
    assert_eq!(eval_ok("1 == '1'"), Value::Boolean(false));
    assert_eq!(eval_ok("'x' == 'x'"), Value::Boolean(true));
    assert_eq!(eval_ok("[1, 2] == [1, 2]"), Value::Boolean(true));
    assert_eq!(eval_ok("[1, 2] == [1, 3]"), Value::Boolean(false));
    assert_eq!(eval_ok("{x = 1} == {x = 1}"), Value::Boolean(true));
    assert_eq!(eval_ok("{x = 1} == {x = 2}"), Value::Boolean(false));
    assert_eq!(eval_ok("(1, 2) == (1, 2)"), Value::Boolean(true));
    assert_eq!(eval_ok("(1, 2) == (1, 2, 3)"), Value::Boolean(false));
    assert_eq!(eval_ok("() == ()"), Value::Boolean(true));
    assert_eq!(eval_ok("1 != 2"), Value::Boolean(true));
}

/// Function equality is identity: a function equals itself, not a
/// structurally identical twin.
#[test]
fn function_equality_is_identity() {
    assert_eq!(eval_ok("f = x -> x, f == f"), Value::Boolean(true));
    assert_eq!(eval_ok("(x -> x) == (x -> x)"), Value::Boolean(false));
}

// =============================================================================
// 7. Short-circuit forms
// =============================================================================

/// `|` returns the first truthy operand, `&` gates on the left, `?` guards,
/// `;` falls back on `Nothing`.
#[test]
fn logical_and_sequencing() {
    assert_eq!(eval_ok("F | 'hi'"), Value::string("hi"));
    assert_eq!(eval_ok("'first' | 'second'"), Value::string("first"));
    assert_eq!(eval_ok("10 & 0"), Value::Number(0.0));
    assert_eq!(eval_ok("0 & 10"), Value::Number(0.0));
    assert_eq!(eval_ok("T ? 'yes'"), Value::string("yes"));
    assert!(eval_ok("F ? 'yes'").is_nothing());
    assert_eq!(eval_ok("() ; 'fallback'"), Value::string("fallback"));
    assert_eq!(eval_ok("'kept' ; 'fallback'"), Value::string("kept"));
}

/// The right operand is not evaluated when the left decides the result:
/// applying `Nothing` (the unresolved name) would otherwise error.
#[test]
fn short_circuit_skips_right_operand() {
    assert_eq!(eval_ok("T | (missing 1)"), Value::Boolean(true));
    assert_eq!(eval_ok("F & (missing 1)"), Value::Boolean(false));
    assert!(eval_ok("F ? (missing 1)").is_nothing());
    assert_eq!(eval_ok("5 ; (missing 1)"), Value::Number(5.0));
    // and the non-short-circuit path does evaluate it
    let err = eval_err("F | (missing 1)");
    assert_eq!(err.kind(), ErrorKind::Operator);
}

// =============================================================================
// 8. Application on data
// =============================================================================

/// String application indexes characters, 0-based, negatives from the end,
/// out-of-range empty.
#[test]
fn string_indexing() {
    assert_eq!(eval_ok("'abc' 0"), Value::string("a"));
    assert_eq!(eval_ok("'abc' 1.9"), Value::string("b"));
    assert_eq!(eval_ok("'abc' (-1)"), Value::string("c"));
    assert_eq!(eval_ok("'abc' 9"), Value::string(""));
    assert_eq!(eval_ok("'abc' 'x'"), Value::string(""));
}

/// List application indexes elements, 0-based, out-of-range `Nothing`.
#[test]
fn list_indexing() {
    assert_eq!(eval_ok("[10, 20, 30] 0"), Value::Number(10.0));
    assert_eq!(eval_ok("[10, 20, 30] (-1)"), Value::Number(30.0));
    assert!(eval_ok("[10, 20, 30] 5").is_nothing());
    assert!(eval_ok("[10, 20, 30] 'x'").is_nothing());
}

/// Applying a tuple lifts application over its elements.
#[test]
fn application_lifts_over_tuples() {
    assert_eq!(eval_ok("('ab', 'cd') 1"), Value::tuple([Value::string("b"), Value::string("d")]));
}

/// Application dispatches on the applied value alone, so a non-applicable
/// kind reports in the single-operand form.
#[test]
fn application_errors() {
    let err = eval_err("5 3");
    assert_eq!(err.kind(), ErrorKind::Operator);
    assert_eq!(err.message(), "Application operation not defined for Number");
    let err = eval_err("T 'x'");
    assert_eq!(err.message(), "Application operation not defined for Boolean");
    let err = eval_err("() 1");
    assert_eq!(err.message(), "Application operation not defined for Nothing");
}

// =============================================================================
// 9. Evaluation order
// =============================================================================

/// Operator errors carry the source position of the failing operator.
#[test]
fn errors_carry_positions() {
    let err = eval_err("x = T,\nx + 1");
    assert_eq!(err.message(), "Sum operation not defined between Boolean and Number");
    let pos = err.pos().expect("operator error should carry a position");
    assert_eq!(pos.line, 2);
}
