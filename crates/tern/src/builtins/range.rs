//! `range`: counts from 0 toward its argument, stopping one short of it.
//!
//! The argument truncates toward zero; a count of 0 yields `Nothing` (the
//! empty tuple), and a negative count steps downward.

use crate::{
    error::{Error, ErrorKind, RunResult},
    value::Value,
};

pub(super) fn of(arg: &Value) -> RunResult<Value> {
    let Value::Number(n) = arg else {
        return Err(Error::builtin("range", arg.kind()));
    };
    if !n.is_finite() {
        return Err(Error::new(ErrorKind::Builtin, "range not defined for non-finite numbers"));
    }
    let count = n.trunc().abs() as u64;
    let sign = if *n < 0.0 { -1.0 } else { 1.0 };
    Ok(Value::tuple((0..count).map(|i| Value::number(sign * i as f64))))
}
