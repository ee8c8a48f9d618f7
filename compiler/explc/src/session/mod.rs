//! Submission driver.
//!
//! Each submission is resolved against the session's live frames, then
//! evaluated in the top-level frame. Whatever the outcome, the call stack is
//! cleared afterwards so a failure never leaks frames into the next
//! submission. Bindings made before a failure stay.

use std::io::IsTerminal;

use tracing::{debug, trace};

use expl_diagnostic::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use expl_eval::{Interpreter, Resolver, Value};
use expl_ir::{AstPrinter, Name, Program};

use crate::Problem;

/// Session-wide settings.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionOptions {
    /// Color mode for rendered problems.
    pub color: ColorMode,
    /// Log every resolved name with its binding depth at `debug` level.
    pub trace_resolution: bool,
}

pub struct Session {
    interpreter: Interpreter,
    options: SessionOptions,
}

impl Session {
    /// A session on a fresh prelude, printing to stdout and reading stdin.
    pub fn new(options: SessionOptions) -> Self {
        Self::with_interpreter(Interpreter::new(), options)
    }

    /// A session driving an interpreter configured through
    /// [`Interpreter::builder`], e.g. with captured output.
    pub fn with_interpreter(interpreter: Interpreter, options: SessionOptions) -> Self {
        Session {
            interpreter,
            options,
        }
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Resolve and evaluate one submission.
    pub fn submit(&mut self, program: &Program) -> Result<Value, Problem> {
        debug!(statements = program.stmts.len(), "submit");
        trace!(tree = %AstPrinter::print(program), "submitted program");
        let result = self.run(program);
        self.interpreter.clear_backtrace();
        if let Err(problem) = &result {
            debug!(code = %problem.error_code(), "submission failed");
        }
        result
    }

    fn run(&mut self, program: &Program) -> Result<Value, Problem> {
        Resolver::new(self.interpreter.env())
            .log_depths(self.options.trace_resolution)
            .resolve(program)?;
        Ok(self.interpreter.evaluate(program)?)
    }

    /// Render `problem` against the source it came from.
    ///
    /// `ColorMode::Auto` colors only when stderr is a terminal.
    pub fn render(&self, problem: &Problem, source: &str) -> String {
        let is_tty = std::io::stderr().is_terminal();
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), self.options.color, is_tty);
        emitter.emit(&problem.to_diagnostic(), source);
        emitter.flush();
        String::from_utf8_lossy(&emitter.into_inner()).into_owned()
    }

    /// Render `problem` straight to stderr.
    pub fn report(&self, problem: &Problem, source: &str) {
        let is_tty = std::io::stderr().is_terminal();
        let mut emitter = TerminalEmitter::stderr(self.options.color, is_tty);
        emitter.emit(&problem.to_diagnostic(), source);
        emitter.flush();
    }

    /// Top-level bindings, sorted by name.
    pub fn bindings(&self) -> Vec<(Name, Value)> {
        self.interpreter.env().bindings()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}
