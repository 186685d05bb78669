//! `size`: character count of a string, element count of a list, owned
//! identifier count of a namespace.

use crate::{
    error::{Error, RunResult},
    value::Value,
};

pub(super) fn of(arg: &Value) -> RunResult<Value> {
    match arg {
        Value::String(s) => Ok(Value::number(s.chars().count() as f64)),
        Value::List(items) => Ok(Value::number(items.len() as f64)),
        Value::Namespace(ns) => Ok(Value::number(ns.len() as f64)),
        other => Err(Error::builtin("size", other.kind())),
    }
}
