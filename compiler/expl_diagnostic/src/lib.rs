//! Diagnostic system for error reporting.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong), rendered as an annotated snippet
//! - Call-site backtrace for runtime failures

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod snippet;

pub use diagnostic::Diagnostic;
pub use emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use error_code::ErrorCode;
