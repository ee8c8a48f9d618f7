//! Expl Eval - resolver and interpreter for the Expl runtime.
//!
//! Every value carries an optional explanation, and operators compose the
//! explanations of their operands into one for their result.
//!
//! # Architecture
//!
//! - `Resolver`: static pass recording each name reference's binding depth
//! - `Environment`: shared, parent-linked frames
//! - `Interpreter`: tree-walking evaluator with RAII frame and call guards
//! - `evaluate_binary`: enum-based operator dispatch with explanation synthesis
//! - `prelude`: builtins bound in the root frame
//! - `CallStack`: live call-site spans, snapshotted into an error's backtrace

mod diagnostics;
mod environment;
pub mod errors;
pub mod interpreter;
mod operators;
pub mod prelude;
mod print_handler;
mod resolver;
mod value;

pub use diagnostics::CallStack;
pub use environment::{Environment, LocalScope, Undefined};
pub use errors::{Backtrace, ErrorCategory, EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use operators::evaluate_binary;
pub use prelude::{prelude, Primitive};
pub use print_handler::{
    buffer_handler, scripted_input, silent_handler, stdin_handler, stdout_handler,
    InputHandlerImpl, PrintHandlerImpl, SharedInputHandler, SharedPrintHandler,
};
pub use resolver::{ResolveError, Resolver};
pub use value::{Closure, Explanation, ListValue, Value, ValueKind};

#[cfg(test)]
mod tests;
