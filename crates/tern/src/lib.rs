#![doc = include_str!("../../../README.md")]

mod builtins;
mod context;
mod error;
mod eval;
mod expressions;
mod function;
mod namespace;
mod ops;
mod parse;
mod resource;
mod run;
mod tokenize;
mod tracer;
mod value;

pub use crate::{
    builtins::Builtin,
    context::Context,
    error::{Error, ErrorKind},
    function::{DefinedFunction, FunctionValue, HostFunction, HostFuture},
    namespace::{Namespace, is_valid_identifier},
    resource::{DEFAULT_MAX_DEPTH, Limits},
    run::{EvalOptions, Program, evaluate, evaluate_blocking, evaluate_with, parse, stringify},
    tokenize::{Pos, StringKind},
    tracer::{EvalTracer, NoopTracer, RecordingTracer, StderrTracer, TraceEvent},
    value::{Kind, Value},
};
