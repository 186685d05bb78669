//! Evaluation resource limits.
//!
//! The evaluator checks the call depth on every function application, so
//! runaway recursion in an evaluated program surfaces as a resource error
//! instead of exhausting the native stack. Hosts embedding untrusted
//! expressions can lower the limit further through
//! [`EvalOptions`](crate::EvalOptions).

use serde::{Deserialize, Serialize};

use crate::error::{Error, RunResult};

/// Recommended maximum evaluation call depth if not otherwise specified.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Limits applied to a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum nesting of function calls, counting built-ins and host
    /// callables.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Limits {
    pub(crate) fn check_depth(&self, depth: usize) -> RunResult<()> {
        if depth > self.max_depth {
            Err(Error::resource("maximum call depth exceeded"))
        } else {
            Ok(())
        }
    }
}
