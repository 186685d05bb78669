//! Intrinsic functions present in the default root scope.
//!
//! Each built-in has its own submodule for organization. A built-in behaves
//! like any other function value: it receives the flat tuple of its
//! arguments, normalized back to a single value before dispatch, so
//! `size "ab"` sees a string and `type (1, 2)` sees a tuple.

mod bool_;
mod enum_;
mod map;
mod range;
mod size;
mod str_;
mod type_;

use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::{context::Scope, error::RunResult, function::FunctionValue, value::Value};

/// Enumerates the intrinsic functions.
///
/// Uses strum derives for automatic `Display` and iteration; all variants
/// render in lowercase (e.g. `Bool` -> "bool"), which is also the name each
/// one is bound to in the root scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Builtin {
    Bool,
    Not,
    Str,
    Size,
    Enum,
    Range,
    Type,
    Map,
}

impl Builtin {
    /// Calls this built-in with its argument tuple normalized to a single
    /// value.
    pub(crate) fn call(self, arg: Value) -> RunResult<Value> {
        match self {
            Self::Bool => bool_::truth(&arg),
            Self::Not => bool_::negation(&arg),
            Self::Str => str_::stringified(&arg),
            Self::Size => size::of(&arg),
            Self::Enum => enum_::entries(&arg),
            Self::Range => range::of(&arg),
            Self::Type => type_::name(&arg),
            Self::Map => map::lifted(arg),
        }
    }
}

/// Installs the built-ins and the boolean constants into `scope`.
pub(crate) fn install(scope: &Scope) {
    for builtin in Builtin::iter() {
        scope.set(builtin.to_string(), Value::function(FunctionValue::Builtin(builtin)));
    }
    scope.set("TRUE", Value::Boolean(true));
    scope.set("FALSE", Value::Boolean(false));
}
