//! `map`: lifts a function to apply elementwise over a tuple.
//!
//! `map f` returns a new function; applying that function to a tuple applies
//! `f` to each element and collects the results into a tuple. The actual
//! elementwise application happens in the evaluator, since calling `f` may
//! suspend on a host callable.

use crate::{
    error::{Error, RunResult},
    function::FunctionValue,
    value::Value,
};

pub(super) fn lifted(arg: Value) -> RunResult<Value> {
    match arg {
        f @ Value::Function(_) => Ok(Value::function(FunctionValue::Mapped(f))),
        other => Err(Error::builtin("map", other.kind())),
    }
}
