//! RAII guards for the interpreter's frame and call stack.
//!
//! [`ScopedInterpreter`] swaps in a new current frame and puts the previous
//! one back when dropped. [`CallFrameGuard`] pushes a call-site span and pops
//! it when dropped. Both run on every exit path: normal return, early `?`
//! return and unwinding.
//!
//! Each guard holds `&mut Interpreter` and implements `Deref`/`DerefMut`, so
//! code inside the guarded region uses it exactly like the interpreter.
//!
//! ```text
//! self.with_child_scope(|scoped| scoped.eval_sequence(stmts))
//!
//! self.with_call_frame(span, |call| {
//!     call.with_env(frame, |scoped| scoped.eval(body))
//! })
//! ```

use std::mem;
use std::ops::{Deref, DerefMut};

use expl_ir::Span;

use super::Interpreter;
use crate::environment::Environment;

/// Restores the saved frame as the interpreter's current frame on drop.
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
    saved: Environment,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        mem::swap(&mut self.interpreter.env, &mut self.saved);
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

/// Pops the call stack on drop.
pub struct CallFrameGuard<'guard> {
    interpreter: &'guard mut Interpreter,
}

impl Drop for CallFrameGuard<'_> {
    fn drop(&mut self) {
        self.interpreter.call_stack.pop();
    }
}

impl Deref for CallFrameGuard<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for CallFrameGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Make `env` the current frame until the returned guard is dropped.
    pub fn scoped(&mut self, env: Environment) -> ScopedInterpreter<'_> {
        let saved = mem::replace(&mut self.env, env);
        ScopedInterpreter {
            interpreter: self,
            saved,
        }
    }

    /// Run `f` with `env` as the current frame.
    pub fn with_env<T, F>(&mut self, env: Environment, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped(env);
        f(&mut scoped)
    }

    /// Run `f` in a fresh child of the current frame.
    pub fn with_child_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let child = self.env.child();
        self.with_env(child, f)
    }

    /// Push `call_span` until the returned guard is dropped.
    pub fn call_frame(&mut self, call_span: Span) -> CallFrameGuard<'_> {
        self.call_stack.push(call_span);
        CallFrameGuard { interpreter: self }
    }

    pub fn with_call_frame<T, F>(&mut self, call_span: Span, f: F) -> T
    where
        F: FnOnce(&mut CallFrameGuard<'_>) -> T,
    {
        let mut call = self.call_frame(call_span);
        f(&mut call)
    }
}
