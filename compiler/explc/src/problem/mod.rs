//! Structured problems.
//!
//! A `Problem` is whatever stops a submission: a syntax error handed over by
//! the external parser, a name the resolver could not bind, or a runtime
//! failure. Problems keep the structured error; conversion to a
//! [`Diagnostic`] happens only when the problem is reported.

use std::fmt;

use expl_diagnostic::{Diagnostic, ErrorCode};
use expl_eval::{ErrorCategory, EvalError, ResolveError};
use expl_ir::Span;

#[derive(Clone, Debug, PartialEq)]
pub enum Problem {
    /// Reported by the parser before the program reaches the session.
    Syntax { message: String, span: Span },
    Resolve(ResolveError),
    Eval(EvalError),
}

impl Problem {
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Problem::Syntax {
            message: message.into(),
            span,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            Problem::Syntax { .. } => ErrorCode::E1001,
            Problem::Resolve(_) => ErrorCode::E2001,
            Problem::Eval(err) => match err.category() {
                ErrorCategory::Unbound => ErrorCode::E2001,
                ErrorCategory::Type => ErrorCode::E2002,
            },
        }
    }

    /// Primary location. Runtime errors raised without one map to a dummy
    /// span, which the emitter skips.
    pub fn span(&self) -> Span {
        match self {
            Problem::Syntax { span, .. } => *span,
            Problem::Resolve(err) => err.span,
            Problem::Eval(err) => err.span_or_dummy(),
        }
    }

    /// Convert to a diagnostic. Static and runtime unbound names render the
    /// same way; only runtime errors carry a backtrace.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.error_code(), self.to_string(), self.span());
        match self {
            Problem::Eval(err) => diag.with_backtrace(err.frames().iter().copied()),
            Problem::Syntax { .. } | Problem::Resolve(_) => diag,
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Syntax { message, .. } => f.write_str(message),
            Problem::Resolve(err) => write!(f, "{err}"),
            Problem::Eval(err) => f.write_str(&err.message()),
        }
    }
}

impl std::error::Error for Problem {}

impl From<ResolveError> for Problem {
    fn from(err: ResolveError) -> Self {
        Problem::Resolve(err)
    }
}

impl From<EvalError> for Problem {
    fn from(err: EvalError) -> Self {
        Problem::Eval(err)
    }
}
