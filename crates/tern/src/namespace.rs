//! The namespace value type and identifier legality.
//!
//! A namespace maps legal identifiers to values and preserves insertion
//! order (the `enum` built-in exposes it). Lookup only ever considers
//! entries the namespace genuinely owns, and only under names that pass
//! [`is_valid_identifier`], the single legality predicate shared with the
//! scope chain, so a host can never smuggle a binding in under a name the
//! language cannot produce.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::{function::FunctionValue, value::Value};

/// Entry invoked when a namespace is applied as a function.
pub(crate) const APPLY_HOOK: &str = "__apply__";
/// Entry used as a namespace's string form.
pub(crate) const STR_HOOK: &str = "__str__";

/// Returns whether `name` is a legal identifier: `[A-Za-z_][A-Za-z0-9_]*`.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// An insertion-ordered mapping from identifiers to values.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    entries: IndexMap<String, Value>,
}

impl Namespace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_entries(entries: IndexMap<String, Value>) -> Self {
        Self { entries }
    }

    /// Inserts an entry. Re-inserting an existing name overwrites its value
    /// but keeps the name's original position.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), value);
    }

    /// Looks up an owned entry. Names that are not legal identifiers never
    /// resolve, even when an entry was inserted under one.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        if !is_valid_identifier(name) {
            return None;
        }
        self.entries.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merges `other` over `self`; on key collisions the right side wins.
    pub(crate) fn merged(&self, other: &Self) -> Self {
        let mut entries = self.entries.clone();
        for (name, value) in &other.entries {
            entries.insert(name.clone(), value.clone());
        }
        Self { entries }
    }

    /// The `__apply__` hook, when present and callable.
    pub(crate) fn apply_hook(&self) -> Option<Rc<FunctionValue>> {
        match self.entries.get(APPLY_HOOK) {
            Some(Value::Function(f)) => Some(Rc::clone(f)),
            _ => None,
        }
    }

    /// The `__str__` hook, when present and a string.
    pub(crate) fn str_hook(&self) -> Option<&str> {
        match self.entries.get(STR_HOOK) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// Namespaces are equal when they own the same identifier set and each name
/// maps to `==` values; insertion order does not participate.
impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(name, value)| other.entries.get(name) == Some(value))
    }
}

impl FromIterator<(String, Value)> for Namespace {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
