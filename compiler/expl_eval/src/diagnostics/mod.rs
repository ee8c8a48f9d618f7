//! Live call stack.
//!
//! Each call pushes the span of its call expression and pops it on the way
//! out, whether the call returned or failed. When an error is raised the
//! frames are snapshotted into a [`Backtrace`] via [`CallStack::capture`].

use expl_ir::Span;

use crate::errors::{Backtrace, EvalError};

#[derive(Clone, Debug, Default)]
pub struct CallStack {
    frames: Vec<Span>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, call_span: Span) {
        self.frames.push(call_span);
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Span] {
        &self.frames
    }

    /// Snapshot in call order, outermost first.
    pub fn capture(&self) -> Backtrace {
        Backtrace::new(self.frames.clone())
    }

    /// Fill in the location of an error that doesn't have one yet.
    ///
    /// Errors already located by a deeper node pass through untouched.
    pub fn locate(&self, mut err: EvalError, span: Span) -> EvalError {
        if err.span.is_none() {
            err.span = Some(span);
        }
        if err.backtrace.is_none() {
            err.backtrace = Some(self.capture());
        }
        err
    }

    /// Drop every frame. Used to reset after an aborted evaluation.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

#[cfg(test)]
mod tests;
