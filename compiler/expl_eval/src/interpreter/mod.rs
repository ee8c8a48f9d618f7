//! Tree-walking interpreter.
//!
//! Evaluates AST nodes against the current frame. Name references use the
//! depth recorded by the resolver when there is one and fall back to a
//! search of the frame chain otherwise, so unresolved trees still run.
//!
//! Every error leaves through `?`. Frame restoration and call-stack popping
//! live in `Drop` guards (see `scope_guard`), so an aborted evaluation leaves
//! the interpreter exactly as it found it apart from side effects already
//! performed.

mod builder;
mod scope_guard;

use std::rc::Rc;

use tracing::{debug, trace};

use expl_ir::{BinaryOp, Expr, ExprKind, NameRef, Program, Span};
use expl_stack::ensure_sufficient_stack;

use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::errors::{
    cannot_explain_with, non_bool_condition, non_bool_operand, not_callable, undefined_variable,
    wrong_arg_count, EvalError, EvalResult,
};
use crate::operators::{conjunction, disjunction, evaluate_binary};
use crate::prelude::{Primitive, PrimitiveContext};
use crate::print_handler::{SharedInputHandler, SharedPrintHandler};
use crate::value::{Closure, Value, ValueKind};

pub use builder::InterpreterBuilder;
pub use scope_guard::{CallFrameGuard, ScopedInterpreter};

pub struct Interpreter {
    /// Current frame.
    pub(crate) env: Environment,
    pub(crate) call_stack: CallStack,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) input_handler: SharedInputHandler,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// An interpreter on a fresh prelude with stdout/stdin handlers.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// The current frame. At top level this is the frame submissions bind into.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    /// Forget any frames left from an aborted evaluation.
    pub fn clear_backtrace(&mut self) {
        self.call_stack.clear();
    }

    /// Evaluate a top-level program in the current frame.
    ///
    /// Yields the value of the last statement, or `Unit` for an empty program.
    pub fn evaluate(&mut self, program: &Program) -> EvalResult {
        debug!(statements = program.stmts.len(), "evaluate");
        self.eval_sequence(&program.stmts)
    }

    pub fn eval(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr))
    }

    fn eval_inner(&mut self, expr: &Expr) -> EvalResult {
        let span = expr.span;
        match &expr.kind {
            ExprKind::Block(stmts) => self.with_child_scope(|scoped| scoped.eval_sequence(stmts)),
            ExprKind::Assign { target, value } => {
                let value = self.eval(value)?;
                self.assign(target, value.clone(), span)?;
                Ok(value)
            }
            ExprKind::Declare { name, value } => {
                let value = self.eval(value)?;
                self.env.put(name.clone(), value.clone());
                Ok(value)
            }
            ExprKind::Name(name_ref) => self.lookup(name_ref, span),
            ExprKind::Literal(literal) => Ok(Value::from_literal(literal)),
            ExprKind::Binary { op, lhs, rhs } => self.eval_binary(*op, lhs, rhs, span),
            ExprKind::And { lhs, rhs } => {
                let left = self.eval(lhs)?;
                if !self.operand_bool(&left, "&", lhs.span)? {
                    return Ok(left);
                }
                let right = self.eval_branch(rhs)?;
                let value = self.operand_bool(&right, "&", rhs.span)?;
                Ok(conjunction(&left, &right, value))
            }
            ExprKind::Or { lhs, rhs } => {
                let left = self.eval(lhs)?;
                if self.operand_bool(&left, "|", lhs.span)? {
                    return Ok(left);
                }
                let right = self.eval_branch(rhs)?;
                let value = self.operand_bool(&right, "|", rhs.span)?;
                Ok(disjunction(&left, &right, value))
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_condition(cond)? {
                    self.eval_branch(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.eval_branch(else_branch)
                } else {
                    Ok(Value::unit())
                }
            }
            ExprKind::While { cond, body } => {
                let mut last = Value::unit();
                while self.eval_condition(cond)? {
                    last = self.eval_branch(body)?;
                }
                Ok(last)
            }
            ExprKind::Call { callee, args } => self.eval_call(callee, args, span),
            ExprKind::Fn(def) => Ok(Value::closure(Closure {
                env: self.env.clone(),
                def: Rc::clone(def),
            })),
            ExprKind::Explain(target) => {
                let value = self.eval(target)?;
                Ok(value
                    .explanation()
                    .map_or_else(Value::unit, |explanation| Value::comment(explanation.clone())))
            }
            ExprKind::Commented { target, comment } => {
                let value = self.eval(target)?;
                let comment = self.eval(comment)?;
                match comment.kind() {
                    ValueKind::Comment(text) => Ok(value.explained(text.clone())),
                    other => Err(self.locate(cannot_explain_with(other.type_name()), span)),
                }
            }
        }
    }

    /// Evaluate statements in order, yielding the last value.
    fn eval_sequence(&mut self, stmts: &[Expr]) -> EvalResult {
        let mut last = Value::unit();
        for stmt in stmts {
            last = self.eval(stmt)?;
        }
        Ok(last)
    }

    /// Evaluate code that may not run (an `if` branch, a loop body, the right
    /// side of `&`/`|`) in its own frame unless it is a block, which opens
    /// one itself. The resolver scopes the same nodes.
    fn eval_branch(&mut self, expr: &Expr) -> EvalResult {
        if expr.opens_scope() {
            self.eval(expr)
        } else {
            self.with_child_scope(|scoped| scoped.eval(expr))
        }
    }

    fn eval_binary(&mut self, op: BinaryOp, lhs: &Expr, rhs: &Expr, span: Span) -> EvalResult {
        let left = self.eval(lhs)?;
        let right = self.eval(rhs)?;
        evaluate_binary(&left, &right, op).map_err(|err| self.locate(err, span))
    }

    fn eval_condition(&mut self, cond: &Expr) -> Result<bool, EvalError> {
        let value = self.eval(cond)?;
        value
            .as_bool()
            .ok_or_else(|| self.locate(non_bool_condition(value.type_name()), cond.span))
    }

    fn operand_bool(&self, value: &Value, op: &'static str, span: Span) -> Result<bool, EvalError> {
        value
            .as_bool()
            .ok_or_else(|| self.locate(non_bool_operand(op, value.type_name()), span))
    }

    fn lookup(&self, name_ref: &NameRef, span: Span) -> EvalResult {
        let name = name_ref.name.as_str();
        let found = match name_ref.depth() {
            Some(depth) => {
                self.debug_check_depth(depth);
                self.env.get_at(depth, name)
            }
            None => self.env.get(name),
        };
        found.ok_or_else(|| self.locate(undefined_variable(name), span))
    }

    fn assign(&self, target: &NameRef, value: Value, span: Span) -> Result<(), EvalError> {
        let name = target.name.as_str();
        let stored = match target.depth() {
            Some(depth) => {
                self.debug_check_depth(depth);
                self.env.assign_at(depth, name, value)
            }
            None => self.env.assign(name, value),
        };
        stored.map_err(|_| self.locate(undefined_variable(name), span))
    }

    /// The resolver mirrors the frames this interpreter creates, so a
    /// recorded depth never reaches past the root.
    #[inline]
    fn debug_check_depth(&self, depth: usize) {
        debug_assert!(
            depth <= self.env.depth(),
            "binding depth {depth} exceeds frame chain of depth {}",
            self.env.depth()
        );
    }

    fn eval_call(&mut self, callee: &Expr, args: &[Expr], span: Span) -> EvalResult {
        let func = self.eval(callee)?;
        if !func.is_callable() {
            return Err(self.locate(not_callable(func.type_name()), span));
        }
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg)?);
        }
        self.call_value(&func, values, span)
    }

    /// Invoke a callable value with already-evaluated arguments.
    ///
    /// `call_span` is pushed on the call stack for the duration of the call.
    pub fn call_value(&mut self, func: &Value, args: Vec<Value>, call_span: Span) -> EvalResult {
        match func.kind() {
            ValueKind::Closure(closure) => self.call_closure(closure, args, call_span),
            ValueKind::Primitive(primitive) => self.call_primitive(*primitive, &args, call_span),
            _ => Err(self.locate(not_callable(func.type_name()), call_span)),
        }
    }

    fn call_closure(&mut self, closure: &Closure, args: Vec<Value>, call_span: Span) -> EvalResult {
        let params = closure.params();
        if params.len() != args.len() {
            return Err(self.locate(wrong_arg_count(params.len(), args.len()), call_span));
        }
        trace!(
            params = params.len(),
            depth = self.call_stack.depth() + 1,
            at = %call_span,
            "call closure"
        );
        let frame = closure.env.child();
        for (param, arg) in params.iter().zip(args) {
            frame.put(param.clone(), arg);
        }
        self.with_call_frame(call_span, |call| {
            call.with_env(frame, |scoped| scoped.eval(&closure.def.body))
        })
    }

    fn call_primitive(
        &mut self,
        primitive: &'static Primitive,
        args: &[Value],
        call_span: Span,
    ) -> EvalResult {
        if let Some(arity) = primitive.arity {
            if arity != args.len() {
                return Err(self.locate(wrong_arg_count(arity, args.len()), call_span));
            }
        }
        trace!(name = primitive.name, at = %call_span, "call builtin");
        let result = self.with_call_frame(call_span, |call| {
            let ctx = PrimitiveContext {
                print: &call.print_handler,
                input: &call.input_handler,
            };
            (primitive.func)(&ctx, args)
        });
        // Located after the frame is popped: the builtin's own call site is
        // the error span, not a backtrace entry.
        result.map_err(|err| self.locate(err, call_span))
    }

    /// Attach `span` and the current backtrace to an error that has neither.
    fn locate(&self, err: EvalError, span: Span) -> EvalError {
        self.call_stack.locate(err, span)
    }
}
