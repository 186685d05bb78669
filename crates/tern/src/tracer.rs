//! Evaluation tracing hooks.
//!
//! A trait-based tracing surface with hook points at the evaluator's
//! interesting events: name lookups, function calls and returns, and host
//! callable invocations. The default [`NoopTracer`] does nothing;
//! [`RecordingTracer`] captures events for post-mortem inspection or test
//! assertions (e.g. proving that a short-circuit operator never touched its
//! right operand); [`StderrTracer`] writes human-readable log lines.
//!
//! Hooks take `&self` so a tracer can be shared with the evaluator for the
//! whole run; implementations that accumulate state use interior
//! mutability.

use std::cell::RefCell;

/// Hook points invoked by the evaluator.
pub trait EvalTracer {
    /// An identifier was resolved (or not) against the scope chain.
    fn on_lookup(&self, _name: &str, _found: bool) {}

    /// A function is about to run; `depth` is the call depth including this
    /// call.
    fn on_call(&self, _function: &str, _depth: usize) {}

    /// A function finished (successfully or not); `depth` is the call depth
    /// after the return.
    fn on_return(&self, _depth: usize) {}

    /// A host callable is about to be awaited.
    fn on_host_call(&self, _name: &str) {}
}

/// Tracer that does nothing (the default).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl EvalTracer for NoopTracer {}

/// One recorded evaluation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Lookup { name: String, found: bool },
    Call { function: String, depth: usize },
    Return { depth: usize },
    HostCall { name: String },
}

/// Tracer that records every event for later inspection.
#[derive(Debug, Default)]
pub struct RecordingTracer {
    events: RefCell<Vec<TraceEvent>>,
}

impl RecordingTracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The events recorded so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.borrow().clone()
    }

    /// The names of host callables invoked so far, in order.
    #[must_use]
    pub fn host_calls(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                TraceEvent::HostCall { name } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }
}

impl EvalTracer for RecordingTracer {
    fn on_lookup(&self, name: &str, found: bool) {
        self.events.borrow_mut().push(TraceEvent::Lookup {
            name: name.to_owned(),
            found,
        });
    }

    fn on_call(&self, function: &str, depth: usize) {
        self.events.borrow_mut().push(TraceEvent::Call {
            function: function.to_owned(),
            depth,
        });
    }

    fn on_return(&self, depth: usize) {
        self.events.borrow_mut().push(TraceEvent::Return { depth });
    }

    fn on_host_call(&self, name: &str) {
        self.events
            .borrow_mut()
            .push(TraceEvent::HostCall { name: name.to_owned() });
    }
}

/// Tracer that writes human-readable log lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrTracer;

impl EvalTracer for StderrTracer {
    fn on_lookup(&self, name: &str, found: bool) {
        eprintln!("lookup {name} -> {}", if found { "hit" } else { "miss" });
    }

    fn on_call(&self, function: &str, depth: usize) {
        eprintln!("{}call {function}", "  ".repeat(depth.saturating_sub(1)));
    }

    fn on_return(&self, depth: usize) {
        eprintln!("{}return", "  ".repeat(depth));
    }

    fn on_host_call(&self, name: &str) {
        eprintln!("await host callable {name}");
    }
}
