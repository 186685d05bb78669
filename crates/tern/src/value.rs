//! Runtime values.
//!
//! The value universe is a closed tagged sum. Heavier payloads (strings,
//! lists, namespaces, functions) sit behind `Rc` so cloning a value during
//! tuple lifting is cheap; values are immutable once built.
//!
//! Tuples obey three invariants, maintained by the [`Value::tuple`]
//! constructor: a tuple is always flat (never contains another tuple), never
//! contains `Nothing`, and always has at least two elements: a would-be
//! empty tuple is `Nothing` and a would-be singleton is its sole element.
//! NaN never survives as a `Number`: [`Value::number`] normalizes it to
//! `Nothing`.

use std::{fmt, rc::Rc};

use strum::{Display, IntoStaticStr};

use crate::{function::FunctionValue, namespace::Namespace};

/// A runtime value.
///
/// Use [`Value::number`] and [`Value::tuple`] rather than the raw variants
/// when constructing numbers and tuples, so the normalization invariants
/// above hold.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// The absence of a value; observably equal to the empty tuple.
    #[default]
    Nothing,
    Boolean(bool),
    Number(f64),
    String(Rc<str>),
    List(Rc<Vec<Value>>),
    Namespace(Rc<Namespace>),
    Function(Rc<FunctionValue>),
    /// A flat sequence of at least two non-`Nothing` values.
    Tuple(Vec<Value>),
}

/// The kind of a runtime value, as reported by the `type` built-in and used
/// in operator error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum Kind {
    Nothing,
    Boolean,
    Number,
    String,
    List,
    Namespace,
    Function,
    Tuple,
}

impl Value {
    /// Creates a number value, normalizing NaN to `Nothing`.
    #[must_use]
    pub fn number(n: f64) -> Self {
        if n.is_nan() { Self::Nothing } else { Self::Number(n) }
    }

    #[must_use]
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Self::String(s.into())
    }

    #[must_use]
    pub fn list(items: Vec<Self>) -> Self {
        Self::List(Rc::new(items))
    }

    #[must_use]
    pub fn namespace(ns: Namespace) -> Self {
        Self::Namespace(Rc::new(ns))
    }

    pub(crate) fn function(f: FunctionValue) -> Self {
        Self::Function(Rc::new(f))
    }

    /// Builds a tuple from `items`, flattening nested tuples, dropping
    /// `Nothing`, and normalizing the result (empty -> `Nothing`, singleton
    /// -> the element).
    #[must_use]
    pub fn tuple(items: impl IntoIterator<Item = Self>) -> Self {
        let mut flat = Vec::new();
        for item in items {
            match item {
                Self::Tuple(elements) => flat.extend(elements),
                v => {
                    if !v.is_nothing() {
                        flat.push(v);
                    }
                }
            }
        }
        if flat.len() == 1 {
            flat.remove(0)
        } else if flat.is_empty() {
            Self::Nothing
        } else {
            Self::Tuple(flat)
        }
    }

    /// Views this value as a tuple slice: `Nothing` is empty, a tuple is its
    /// elements, and any other value is a singleton.
    #[must_use]
    pub fn items(&self) -> &[Self] {
        match self {
            Self::Nothing => &[],
            Self::Tuple(elements) => elements,
            v => std::slice::from_ref(v),
        }
    }

    /// Owned variant of [`Value::items`].
    #[must_use]
    pub fn into_items(self) -> Vec<Self> {
        match self {
            Self::Nothing => Vec::new(),
            Self::Tuple(elements) => elements,
            v => vec![v],
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Nothing => Kind::Nothing,
            Self::Boolean(_) => Kind::Boolean,
            Self::Number(_) => Kind::Number,
            Self::String(_) => Kind::String,
            Self::List(_) => Kind::List,
            Self::Namespace(_) => Kind::Namespace,
            Self::Function(_) => Kind::Function,
            Self::Tuple(_) => Kind::Tuple,
        }
    }

    /// The kind name as a string, e.g. `"Number"`.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.kind().into()
    }

    /// A value is "nothing" when it is `Nothing`, a tuple that normalizes to
    /// `Nothing`, or a numeric NaN.
    #[must_use]
    pub fn is_nothing(&self) -> bool {
        match self {
            Self::Nothing => true,
            Self::Number(n) => n.is_nan(),
            Self::Tuple(elements) => elements.is_empty(),
            _ => false,
        }
    }

    /// Truthiness, as used by `bool`, `not`, `|`, `&` and `?`.
    #[must_use]
    pub fn truth(&self) -> bool {
        match self {
            Self::Nothing => false,
            Self::Boolean(b) => *b,
            Self::Number(n) => !n.is_nan() && *n != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::List(items) => !items.is_empty(),
            Self::Namespace(ns) => !ns.is_empty(),
            Self::Function(_) => true,
            Self::Tuple(elements) => elements.iter().any(Self::truth),
        }
    }
}

/// Equality follows the language's `==` operator: values of different kinds
/// are never equal, functions compare by identity, lists elementwise, and
/// namespaces by owned identifier set with `==` values.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nothing, Self::Nothing) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y),
            (Self::Namespace(a), Self::Namespace(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Tuple(a), Self::Tuple(b)) => a == b,
            _ => false,
        }
    }
}

/// The canonical string form, as produced by the `str` built-in.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nothing => Ok(()),
            Self::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::String(s) => f.write_str(s),
            Self::List(items) => write!(f, "[[List of {} items]]", items.len()),
            Self::Namespace(ns) => match ns.str_hook() {
                Some(s) => f.write_str(s),
                None => write!(f, "[[Namespace of {} items]]", ns.len()),
            },
            Self::Function(_) => f.write_str("[[Function]]"),
            Self::Tuple(elements) => {
                for element in elements {
                    write!(f, "{element}")?;
                }
                Ok(())
            }
        }
    }
}

/// Renders a number in its canonical decimal form: integral values without a
/// fractional part, fractional values via ryu's shortest round-trip form.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        return String::new();
    }
    if n.is_infinite() {
        return (if n > 0.0 { "Infinity" } else { "-Infinity" }).to_owned();
    }
    if n == n.trunc() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        ryu::Buffer::new().format(n).to_owned()
    }
}
