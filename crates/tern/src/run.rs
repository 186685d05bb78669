//! Public interface for parsing and evaluating tern programs.

use serde::{Deserialize, Serialize};

use crate::{
    context::Context,
    error::Error,
    eval::Interp,
    expressions::Node,
    parse::parse_source,
    resource::Limits,
    tracer::{EvalTracer, NoopTracer},
    value::Value,
};

/// A parsed program: immutable, freely re-runnable, and safe to share.
///
/// # Example
/// ```
/// use tern::{parse, evaluate_blocking, Context, Value};
///
/// let program = parse("a * 2 + 1").unwrap();
/// let context = Context::new();
/// context.set("a", Value::number(10.0));
/// let result = evaluate_blocking(&program, &context).unwrap();
/// assert_eq!(result, Value::Number(21.0));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    source: String,
    root: Node,
}

impl Program {
    /// The source text this program was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Serializes the program to a binary format.
    ///
    /// The serialized data can be stored and later restored with
    /// [`Program::load`], letting hosts cache parsed programs instead of
    /// re-parsing on every use.
    pub fn dump(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    /// Deserializes a program from the binary format produced by
    /// [`Program::dump`].
    pub fn load(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }

    pub(crate) fn root(&self) -> &Node {
        &self.root
    }
}

/// Parses source text into a [`Program`].
///
/// Parsing is fail-fast: the first tokenization or structural mismatch
/// aborts with a `ParseError` carrying the source position.
pub fn parse(source: &str) -> Result<Program, Error> {
    let root = parse_source(source)?;
    Ok(Program {
        source: source.to_owned(),
        root,
    })
}

/// Options for [`evaluate_with`]: resource limits and a tracer.
pub struct EvalOptions<'t> {
    pub limits: Limits,
    pub tracer: &'t dyn EvalTracer,
}

impl Default for EvalOptions<'static> {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            tracer: &NoopTracer,
        }
    }
}

/// Runs `program` in `context` with default options, returning the
/// normalized result value.
///
/// Evaluation may bind names in the context's innermost frame; bindings made
/// before a failure stay in place, so a host that wants isolation should
/// evaluate in a [`Context::child`] and discard it on error. The returned
/// future suspends only while awaiting host callables, and dropping it
/// abandons the evaluation cleanly.
pub async fn evaluate(program: &Program, context: &Context) -> Result<Value, Error> {
    evaluate_with(program, context, &EvalOptions::default()).await
}

/// Runs `program` in `context` with explicit limits and tracer.
pub async fn evaluate_with(program: &Program, context: &Context, options: &EvalOptions<'_>) -> Result<Value, Error> {
    let interp = Interp::new(options.limits, options.tracer);
    interp.eval(program.root(), context.scope()).await
}

/// Blocking convenience around [`evaluate`] for hosts without an async
/// runtime. Host callables still run; their futures are driven on the
/// current thread.
pub fn evaluate_blocking(program: &Program, context: &Context) -> Result<Value, Error> {
    futures::executor::block_on(evaluate(program, context))
}

/// The canonical string form of a value, as produced by the `str` built-in.
#[must_use]
pub fn stringify(value: &Value) -> String {
    value.to_string()
}
