//! Function values: defined in the language, intrinsic, host-supplied, or
//! produced by the `map` built-in.
//!
//! Function equality is identity: two function values are `==` exactly when
//! they are the same allocation. Comparison (`<`, `>`) of functions is not
//! defined and raises.

use std::{fmt, rc::Rc};

use futures::future::LocalBoxFuture;

use crate::{builtins::Builtin, context::Scope, error::Error, expressions::Node, value::Value};

/// Future returned by host callables. Host callables are the evaluator's
/// only suspension points.
pub type HostFuture = LocalBoxFuture<'static, Result<Value, Error>>;

/// A function defined with `params -> body`.
///
/// The captured scope is shared, not copied: a later write to a captured
/// frame is visible to the function, which is the intended lexical-scope
/// semantics (and what makes `f = n -> n <= 1 ? 1 ; n * f(n - 1)` recursive).
pub struct DefinedFunction {
    pub(crate) params: Vec<String>,
    pub(crate) body: Rc<Node>,
    pub(crate) scope: Scope,
}

/// A callable supplied by the host when seeding a context.
pub struct HostFunction {
    pub(crate) name: String,
    pub(crate) call: Box<dyn Fn(Vec<Value>) -> HostFuture>,
}

/// The callable payload behind [`Value::Function`].
pub enum FunctionValue {
    Defined(DefinedFunction),
    Builtin(Builtin),
    Host(HostFunction),
    /// Elementwise wrapper produced by the `map` built-in; holds the wrapped
    /// function value.
    Mapped(Value),
}

// Manual Debug: a defined function's captured scope can reach back to the
// function itself, so the derive would recurse forever.
impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(d) => f
                .debug_struct("Defined")
                .field("params", &d.params)
                .finish_non_exhaustive(),
            Self::Builtin(b) => write!(f, "Builtin({b})"),
            Self::Host(h) => write!(f, "Host({})", h.name),
            Self::Mapped(_) => f.write_str("Mapped(..)"),
        }
    }
}

impl FunctionValue {
    /// A short label for trace output.
    pub(crate) fn label(&self) -> String {
        match self {
            Self::Defined(_) => "function".to_owned(),
            Self::Builtin(b) => b.to_string(),
            Self::Host(h) => h.name.clone(),
            Self::Mapped(_) => "map".to_owned(),
        }
    }
}

impl Value {
    /// Wraps an asynchronous host callable as a function value.
    ///
    /// The callable receives the flat tuple of argument values and returns a
    /// future; the evaluator awaits it, making this the point where a host
    /// may suspend for I/O. Failures reported through [`Error::host`] (or
    /// any other [`Error`]) abort the evaluation and propagate to the
    /// embedding caller untouched.
    #[must_use]
    pub fn host_fn<F>(name: impl Into<String>, call: F) -> Self
    where
        F: Fn(Vec<Value>) -> HostFuture + 'static,
    {
        Self::function(FunctionValue::Host(HostFunction {
            name: name.into(),
            call: Box::new(call),
        }))
    }

    /// Wraps a synchronous host callable as a function value.
    #[must_use]
    pub fn host_fn_sync<F>(name: impl Into<String>, call: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Self, Error> + 'static,
    {
        Self::host_fn(name, move |args| -> HostFuture {
            Box::pin(std::future::ready(call(args)))
        })
    }
}
