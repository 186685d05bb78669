//! `bool` and `not` share the truthiness logic from the value model.

use crate::{error::RunResult, value::Value};

pub(super) fn truth(arg: &Value) -> RunResult<Value> {
    Ok(Value::Boolean(arg.truth()))
}

pub(super) fn negation(arg: &Value) -> RunResult<Value> {
    Ok(Value::Boolean(!arg.truth()))
}
