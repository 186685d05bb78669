//! Lexical scope chain and the host-facing evaluation context.
//!
//! A context is an ordered chain of scope frames behind reference-counted
//! handles. Reads walk the chain from innermost to outermost; writes always
//! go to the innermost frame. Functions capture the chain itself (not a
//! copy), so a frame stays alive as long as the enclosing evaluation or any
//! capturing function holds it.

use std::{cell::RefCell, fmt, rc::Rc};

use indexmap::IndexMap;

use crate::{
    builtins,
    namespace::{self, Namespace},
    value::Value,
};

struct Frame {
    vars: IndexMap<String, Value>,
    parent: Option<Scope>,
}

/// One level of the scope chain. Cloning a `Scope` shares the frame.
#[derive(Clone)]
pub(crate) struct Scope(Rc<RefCell<Frame>>);

impl Scope {
    /// A fresh frame with no parent.
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Frame {
            vars: IndexMap::new(),
            parent: None,
        })))
    }

    /// A fresh innermost frame sharing this chain as its parent.
    pub fn child(&self) -> Self {
        Self(Rc::new(RefCell::new(Frame {
            vars: IndexMap::new(),
            parent: Some(self.clone()),
        })))
    }

    /// Walks the chain from innermost to outermost. Names that are not legal
    /// identifiers never resolve, regardless of what a host injected.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if !namespace::is_valid_identifier(name) {
            return None;
        }
        let mut scope = self.clone();
        loop {
            let frame = scope.0.borrow();
            if let Some(value) = frame.vars.get(name) {
                return Some(value.clone());
            }
            let parent = frame.parent.clone();
            drop(frame);
            match parent {
                Some(p) => scope = p,
                None => return None,
            }
        }
    }

    /// Binds `name` in this frame, shadowing any outer binding.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().vars.insert(name.into(), value);
    }

    /// Seeds this frame with a namespace's entries (used by subcontexting).
    pub fn insert_entries(&self, ns: &Namespace) {
        let mut frame = self.0.borrow_mut();
        for (name, value) in ns.iter() {
            frame.vars.insert(name.to_owned(), value.clone());
        }
    }

    /// Snapshot of this frame's own bindings as a namespace (used by the
    /// namespace literal). Bindings written into parent frames are not
    /// captured.
    pub fn own_namespace(&self) -> Namespace {
        Namespace::from_entries(self.0.borrow().vars.clone())
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // shallow on purpose: frames can reach back to themselves through
        // captured functions
        let frame = self.0.borrow();
        write!(f, "Scope({} bindings", frame.vars.len())?;
        if frame.parent.is_some() {
            f.write_str(", nested")?;
        }
        f.write_str(")")
    }
}

/// The host-facing evaluation context: a root scope whose outer frame holds
/// the language's built-ins plus any caller-supplied globals, and whose
/// inner frame receives the bindings evaluation creates.
///
/// A context may be reused across programs; bindings made by one evaluation
/// are visible to the next. It is owned by a single evaluation task at a
/// time; concurrent evaluation against one context is not supported.
pub struct Context {
    scope: Scope,
}

impl Context {
    /// A context containing only the built-ins.
    #[must_use]
    pub fn new() -> Self {
        Self::with_globals(std::iter::empty())
    }

    /// A context whose outer frame contains the built-ins plus `globals`.
    /// Globals shadow built-ins of the same name.
    #[must_use]
    pub fn with_globals(globals: impl IntoIterator<Item = (String, Value)>) -> Self {
        let root = Scope::new();
        builtins::install(&root);
        for (name, value) in globals {
            root.set(name, value);
        }
        Self { scope: root.child() }
    }

    /// Binds `name` in the context's innermost frame.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.scope.set(name, value);
    }

    /// Reads a binding, walking out through the built-ins frame.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.scope.lookup(name)
    }

    /// A child context layered on this one: reads see this context, writes
    /// stay in the child.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            scope: self.scope.child(),
        }
    }

    pub(crate) fn scope(&self) -> &Scope {
        &self.scope
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").field("scope", &self.scope).finish()
    }
}
