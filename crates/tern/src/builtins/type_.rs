//! `type`: the kind name of a value as a string.

use crate::{error::RunResult, value::Value};

pub(super) fn name(arg: &Value) -> RunResult<Value> {
    Ok(Value::string(arg.type_name()))
}
