//! `enum`: the entries of a container as a tuple of records.
//!
//! Namespaces enumerate to `{name, value}` records preserving insertion
//! order; lists and strings enumerate to `{index, value}` records starting
//! at index 0, strings yielding single-character strings.

use crate::{
    error::{Error, RunResult},
    namespace::Namespace,
    value::Value,
};

fn record(key: &'static str, key_value: Value, value: Value) -> Value {
    let ns: Namespace = [(key.to_owned(), key_value), ("value".to_owned(), value)]
        .into_iter()
        .collect();
    Value::namespace(ns)
}

pub(super) fn entries(arg: &Value) -> RunResult<Value> {
    match arg {
        Value::Namespace(ns) => Ok(Value::tuple(
            ns.iter()
                .map(|(name, value)| record("name", Value::string(name), value.clone())),
        )),
        Value::List(items) => Ok(Value::tuple(
            items
                .iter()
                .enumerate()
                .map(|(i, value)| record("index", Value::number(i as f64), value.clone())),
        )),
        Value::String(s) => Ok(Value::tuple(s.chars().enumerate().map(|(i, c)| {
            record("index", Value::number(i as f64), Value::string(c.to_string()))
        }))),
        other => Err(Error::builtin("enum", other.kind())),
    }
}
