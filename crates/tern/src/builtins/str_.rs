//! `str`: the canonical string form of a value.
//!
//! Delegates to the value model's `Display` implementation, which honors a
//! namespace's `__str__` hook and concatenates the string forms of tuple
//! elements.

use crate::{error::RunResult, value::Value};

pub(super) fn stringified(arg: &Value) -> RunResult<Value> {
    Ok(Value::string(arg.to_string()))
}
