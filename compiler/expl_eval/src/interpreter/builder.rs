//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use super::Interpreter;
use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::prelude::prelude;
use crate::print_handler::{stdin_handler, stdout_handler, SharedInputHandler, SharedPrintHandler};

/// Builder for creating Interpreter instances.
///
/// Defaults: a top-level frame whose parent is a fresh prelude, output to
/// stdout and input from stdin.
#[derive(Default)]
pub struct InterpreterBuilder {
    env: Option<Environment>,
    print_handler: Option<SharedPrintHandler>,
    input_handler: Option<SharedInputHandler>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame evaluation starts in.
    ///
    /// Builtins are only visible if `env` or one of its ancestors binds them;
    /// pass `prelude().child()` for the usual layout.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Set where `print` writes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set where `input` reads from.
    #[must_use]
    pub fn input_handler(mut self, handler: SharedInputHandler) -> Self {
        self.input_handler = Some(handler);
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            env: self.env.unwrap_or_else(|| prelude().child()),
            call_stack: CallStack::new(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            input_handler: self.input_handler.unwrap_or_else(stdin_handler),
        }
    }
}
