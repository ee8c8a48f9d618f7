//! Core diagnostic type.
//!
//! Every problem the runtime reports is fatal to its submission, so a
//! diagnostic is always an error: a code, a message, where it happened and
//! the calls that led there.

use expl_ir::Span;
use std::fmt;

use crate::ErrorCode;

/// An error ready for rendering.
///
/// `backtrace` holds call-site spans in the order the calls were made, so the
/// most recent call is last.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    pub message: String,
    /// Primary location. A dummy span renders the header alone.
    pub span: Span,
    /// Call sites active when the error was raised.
    pub backtrace: Vec<Span>,
}

impl Diagnostic {
    pub fn error(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Diagnostic {
            code,
            message: message.into(),
            span,
            backtrace: Vec::new(),
        }
    }

    pub fn with_backtrace(mut self, backtrace: impl IntoIterator<Item = Span>) -> Self {
        self.backtrace = backtrace.into_iter().collect();
        self
    }

    /// `error[E2001]`, the first thing printed for this diagnostic.
    pub fn header(&self) -> String {
        format!("error[{}]", self.code)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.header(), self.span, self.message)
    }
}

#[cfg(test)]
mod tests;
