//! Error types reported to the host.
//!
//! Every failure carries a kind tag, a human-readable message, and, where
//! available, the source position of the subtree that produced it. The
//! evaluator never recovers from an error: a failing subexpression aborts the
//! whole evaluation and scope frames mutated before the failure stay mutated.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{tokenize::Pos, value::Kind};

/// Result type alias for operations that can fail during evaluation.
pub(crate) type RunResult<T> = Result<T, Error>;

/// Kind tag carried by every [`Error`].
///
/// Uses strum derives for automatic `Display`, `FromStr`, and
/// `Into<&'static str>` implementations; the string form is the tag reported
/// to hosts (e.g. `Operator` -> "OperatorError").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed source text. Fatal to parsing; never raised during evaluation.
    #[strum(serialize = "ParseError")]
    Parse,
    /// An operator applied to a kind combination it is not defined for.
    /// Application on a non-applicable kind reports under this tag as well.
    #[strum(serialize = "OperatorError")]
    Operator,
    /// The left operand of `.` did not evaluate to a namespace.
    #[strum(serialize = "DotError")]
    Dot,
    /// A built-in rejected the kind of its argument.
    #[strum(serialize = "BuiltinError")]
    Builtin,
    /// An evaluation limit was exceeded.
    #[strum(serialize = "ResourceError")]
    Resource,
    /// A failure raised by a host-supplied callable, propagated untouched.
    #[strum(serialize = "HostError")]
    Host,
}

/// A parse or evaluation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    pos: Option<Pos>,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            pos: None,
        }
    }

    pub(crate) fn parse(message: impl Into<String>, pos: Pos) -> Self {
        Self::new(ErrorKind::Parse, message).with_pos(pos)
    }

    /// An operator applied between two kinds it is not defined for.
    pub(crate) fn operator_binary(operation: &str, left: Kind, right: Kind) -> Self {
        Self::new(
            ErrorKind::Operator,
            format!("{operation} operation not defined between {left} and {right}"),
        )
    }

    /// The single-operand variant of [`Error::operator_binary`], for
    /// operations whose definedness turns on one operand's kind alone
    /// (application dispatches on the applied value only).
    pub(crate) fn operator_unary(operation: &str, kind: Kind) -> Self {
        Self::new(
            ErrorKind::Operator,
            format!("{operation} operation not defined for {kind}"),
        )
    }

    pub(crate) fn dot() -> Self {
        Self::new(ErrorKind::Dot, "namespace expected on the left of '.'")
    }

    pub(crate) fn builtin(operation: &str, kind: Kind) -> Self {
        Self::new(ErrorKind::Builtin, format!("{operation} not defined for {kind}"))
    }

    pub(crate) fn resource(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Resource, message)
    }

    /// Creates a host error. This is the constructor host callables use to
    /// signal failure; the message is propagated to the embedding caller
    /// untouched.
    pub fn host(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Host, message)
    }

    /// Attaches a source position unless one is already present.
    pub(crate) fn with_pos(mut self, pos: Pos) -> Self {
        if self.pos.is_none() {
            self.pos = Some(pos);
        }
        self
    }

    /// The kind tag of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The human-readable message, without the kind tag or position.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The source position of the failing subtree, where available.
    #[must_use]
    pub fn pos(&self) -> Option<Pos> {
        self.pos
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(pos) = self.pos {
            write!(f, " at {pos}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}
