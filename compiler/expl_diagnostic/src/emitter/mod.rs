//! Diagnostic Emitters
//!
//! Each emitter implements the `DiagnosticEmitter` trait. Only the terminal
//! emitter exists today; it renders the annotated snippets of [`crate::snippet`].

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic against the source it was produced from.
    fn emit(&mut self, diagnostic: &Diagnostic, source: &str);

    /// Flush any buffered output.
    fn flush(&mut self);
}
