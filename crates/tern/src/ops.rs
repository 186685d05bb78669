//! Polymorphic operator semantics: the tuple-lifting discipline, the
//! arithmetic/string operator table, and ordering comparison.
//!
//! Every arithmetic operator is lifted uniformly: the two operand tuples are
//! zipped pairwise (a scalar counts as a 1-tuple, the shorter side is padded
//! with `Nothing`) and the scalar operation applies elementwise; the result
//! tuple then renormalizes. Ordering comparisons are *not* lifted; they
//! compare tuples lexicographically and yield a single boolean.

use std::cmp::Ordering;

use crate::{
    error::{Error, RunResult},
    expressions::BinaryOp,
    value::Value,
};

/// Applies an arithmetic/string operator with the lifting discipline.
pub(crate) fn arithmetic(op: BinaryOp, x: Value, y: Value) -> RunResult<Value> {
    let xs = x.into_items();
    let ys = y.into_items();
    if xs.len() <= 1 && ys.len() <= 1 {
        let a = xs.into_iter().next().unwrap_or(Value::Nothing);
        let b = ys.into_iter().next().unwrap_or(Value::Nothing);
        return scalar(op, a, b);
    }
    let len = xs.len().max(ys.len());
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        let a = xs.get(i).cloned().unwrap_or(Value::Nothing);
        let b = ys.get(i).cloned().unwrap_or(Value::Nothing);
        out.push(scalar(op, a, b)?);
    }
    Ok(Value::tuple(out))
}

fn scalar(op: BinaryOp, x: Value, y: Value) -> RunResult<Value> {
    match op {
        BinaryOp::Add => add(x, y),
        BinaryOp::Sub => sub(x, y),
        BinaryOp::Mul => mul(x, y),
        BinaryOp::Div => div(x, y),
        BinaryOp::Mod => rem(x, y),
        BinaryOp::Pow => pow(x, y),
        _ => unreachable!("not an arithmetic operator"),
    }
}

fn add(x: Value, y: Value) -> RunResult<Value> {
    match (x, y) {
        (Value::Nothing, v) | (v, Value::Nothing) => Ok(v),
        (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(a || b)),
        (Value::Number(a), Value::Number(b)) => Ok(Value::number(a + b)),
        (Value::String(a), Value::String(b)) => Ok(Value::string(format!("{a}{b}"))),
        (Value::List(a), Value::List(b)) => {
            let mut items = (*a).clone();
            items.extend(b.iter().cloned());
            Ok(Value::list(items))
        }
        (Value::Namespace(a), Value::Namespace(b)) => Ok(Value::namespace(a.merged(&b))),
        (x, y) => Err(Error::operator_binary("Sum", x.kind(), y.kind())),
    }
}

fn sub(x: Value, y: Value) -> RunResult<Value> {
    match (x, y) {
        (Value::Nothing, _) => Ok(Value::Nothing),
        (v, Value::Nothing) => Ok(v),
        (Value::Number(a), Value::Number(b)) => Ok(Value::number(a - b)),
        (x, y) => Err(Error::operator_binary("Subtraction", x.kind(), y.kind())),
    }
}

fn mul(x: Value, y: Value) -> RunResult<Value> {
    match (x, y) {
        (Value::Nothing, _) | (_, Value::Nothing) => Ok(Value::Nothing),
        (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(a && b)),
        (Value::Number(a), Value::Number(b)) => Ok(Value::number(a * b)),
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            Ok(Value::string(s.repeat(repeat_count(n))))
        }
        (Value::Number(n), Value::List(items)) | (Value::List(items), Value::Number(n)) => {
            let count = repeat_count(n);
            let mut out = Vec::with_capacity(items.len() * count);
            for _ in 0..count {
                out.extend(items.iter().cloned());
            }
            Ok(Value::list(out))
        }
        (x, y) => Err(Error::operator_binary("Product", x.kind(), y.kind())),
    }
}

/// Repetition count: truncated toward zero, negative counts are empty.
fn repeat_count(n: f64) -> usize {
    if n.is_finite() && n > 0.0 { n.trunc() as usize } else { 0 }
}

fn div(x: Value, y: Value) -> RunResult<Value> {
    match (x, y) {
        (Value::Nothing, _) => Ok(Value::Nothing),
        // division by zero follows IEEE-754: the result is an infinity,
        // and 0/0 is NaN which normalizes to Nothing
        (Value::Number(a), Value::Number(b)) => Ok(Value::number(a / b)),
        (x, y) => Err(Error::operator_binary("Division", x.kind(), y.kind())),
    }
}

fn rem(x: Value, y: Value) -> RunResult<Value> {
    match (x, y) {
        (Value::Nothing, v) => Ok(v),
        (Value::Number(a), Value::Number(b)) => Ok(Value::number(a % b)),
        (x, y) => Err(Error::operator_binary("Modulo", x.kind(), y.kind())),
    }
}

fn pow(x: Value, y: Value) -> RunResult<Value> {
    match (x, y) {
        (Value::Nothing, _) => Ok(Value::Nothing),
        (Value::Number(a), Value::Number(b)) => Ok(Value::number(a.powf(b))),
        (x, y) => Err(Error::operator_binary("Exponentiation", x.kind(), y.kind())),
    }
}

/// Three-way comparison. `Nothing` is strictly less than anything else;
/// otherwise both operands must share a kind. Namespaces and functions do
/// not have an order. Tuples (and a scalar against a tuple) compare
/// lexicographically with `Nothing` filling the shorter side.
pub(crate) fn compare(x: &Value, y: &Value) -> RunResult<Ordering> {
    if matches!(x, Value::Tuple(_)) || matches!(y, Value::Tuple(_)) {
        let xs = x.items();
        let ys = y.items();
        for i in 0..xs.len().max(ys.len()) {
            let a = xs.get(i).unwrap_or(&Value::Nothing);
            let b = ys.get(i).unwrap_or(&Value::Nothing);
            match compare(a, b)? {
                Ordering::Equal => {}
                decided => return Ok(decided),
            }
        }
        return Ok(Ordering::Equal);
    }
    scalar_compare(x, y)
}

fn scalar_compare(x: &Value, y: &Value) -> RunResult<Ordering> {
    match (x, y) {
        (Value::Nothing, Value::Nothing) => Ok(Ordering::Equal),
        (Value::Nothing, _) => Ok(Ordering::Less),
        (_, Value::Nothing) => Ok(Ordering::Greater),
        (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => Ok(a.partial_cmp(b).unwrap_or(Ordering::Equal)),
        (Value::String(a), Value::String(b)) => Ok(a.as_ref().cmp(b.as_ref())),
        (Value::List(a), Value::List(b)) => {
            for (item_a, item_b) in a.iter().zip(b.iter()) {
                match compare(item_a, item_b)? {
                    Ordering::Equal => {}
                    decided => return Ok(decided),
                }
            }
            Ok(a.len().cmp(&b.len()))
        }
        (x, y) => Err(Error::operator_binary("Comparison", x.kind(), y.kind())),
    }
}
