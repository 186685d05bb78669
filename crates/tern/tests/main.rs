use pretty_assertions::assert_eq;
use tern::{Context, Value, evaluate_blocking, parse, stringify};

/// A parsed program is immutable and re-runnable: evaluating it twice gives
/// the same result.
#[test]
fn repeat_evaluation() {
    let program = parse("1 + 2").unwrap();

    let context = Context::new();
    assert_eq!(evaluate_blocking(&program, &context).unwrap(), Value::Number(3.0));
    assert_eq!(evaluate_blocking(&program, &context).unwrap(), Value::Number(3.0));
}

/// One program's bindings feed the next evaluation in the same context.
#[test]
fn programs_share_a_context() {
    let context = Context::new();
    let define = parse("greeting = 'hello'").unwrap();
    let use_it = parse("greeting + ' world'").unwrap();
    evaluate_blocking(&define, &context).unwrap();
    assert_eq!(evaluate_blocking(&use_it, &context).unwrap(), Value::string("hello world"));
}

/// `stringify` is the `str` built-in as a host-side function.
#[test]
fn stringify_matches_str_builtin() {
    let program = parse("(1, ' and ', 2)").unwrap();
    let context = Context::new();
    let value = evaluate_blocking(&program, &context).unwrap();
    assert_eq!(stringify(&value), "1 and 2");

    let via_str = parse("str (1, ' and ', 2)").unwrap();
    assert_eq!(evaluate_blocking(&via_str, &context).unwrap(), Value::string("1 and 2"));
}

/// A fresh context isolates evaluations; a child context reads through but
/// writes locally.
#[test]
fn child_contexts_isolate_writes() {
    let parent = Context::new();
    parent.set("x", Value::number(1.0));
    let child = parent.child();

    let rebind = parse("x = 2, x").unwrap();
    assert_eq!(evaluate_blocking(&rebind, &child).unwrap(), Value::Number(2.0));
    let read = parse("x").unwrap();
    assert_eq!(evaluate_blocking(&read, &parent).unwrap(), Value::Number(1.0));
}
