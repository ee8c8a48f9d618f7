//! Static name resolution.
//!
//! Walks a program before it runs and records, on every name reference, how
//! many frames separate it from its declaration. The interpreter then reads
//! the binding from exactly that frame instead of searching the chain.
//!
//! The resolver mirrors the frames the interpreter will create: one scope per
//! block and one per function body (holding the parameters). It is seeded
//! with one scope per frame of the environment it will run in, so names bound
//! by earlier submissions or by the prelude resolve too.

use std::fmt;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use expl_ir::{Expr, ExprKind, Name, NameRef, Program, Span};
use expl_stack::ensure_sufficient_stack;

use crate::environment::Environment;

/// A reference to a name no enclosing scope declares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveError {
    pub name: Name,
    pub span: Span,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unbound variable {}", self.name)
    }
}

impl std::error::Error for ResolveError {}

pub struct Resolver {
    /// Innermost scope last.
    scopes: Vec<FxHashSet<Name>>,
    /// Log every recorded depth at debug level.
    log_depths: bool,
}

impl Resolver {
    /// A resolver whose outer scopes match the frames of `env`.
    pub fn new(env: &Environment) -> Self {
        let scopes = env
            .frames()
            .iter()
            .map(|frame| frame.names().into_iter().collect())
            .collect();
        Resolver {
            scopes,
            log_depths: false,
        }
    }

    #[must_use]
    pub fn log_depths(mut self, enabled: bool) -> Self {
        self.log_depths = enabled;
        self
    }

    /// Resolve every statement of a top-level program.
    ///
    /// Stops at the first unbound reference. Depths recorded before the
    /// failure stay on the tree; the program must not be run after an error.
    pub fn resolve(&mut self, program: &Program) -> Result<(), ResolveError> {
        trace!(statements = program.stmts.len(), scopes = self.scopes.len(), "resolve");
        for stmt in &program.stmts {
            self.resolve_expr(stmt)?;
        }
        Ok(())
    }

    pub fn resolve_expr(&mut self, expr: &Expr) -> Result<(), ResolveError> {
        ensure_sufficient_stack(|| self.resolve_expr_inner(expr))
    }

    fn resolve_expr_inner(&mut self, expr: &Expr) -> Result<(), ResolveError> {
        match &expr.kind {
            ExprKind::Block(stmts) => self.with_scope(Vec::new(), |r| {
                for stmt in stmts {
                    r.resolve_expr(stmt)?;
                }
                Ok(())
            }),
            ExprKind::Assign { target, value } => {
                self.resolve_expr(value)?;
                self.resolve_name(target, expr.span)
            }
            // A function body runs only after the binding exists, so it may
            // name itself. Any other initializer still sees the outer binding.
            ExprKind::Declare { name, value } if matches!(value.kind, ExprKind::Fn(_)) => {
                self.declare(name);
                self.resolve_expr(value)
            }
            ExprKind::Declare { name, value } => {
                self.resolve_expr(value)?;
                self.declare(name);
                Ok(())
            }
            ExprKind::Name(name_ref) => self.resolve_name(name_ref, expr.span),
            ExprKind::Literal(_) => Ok(()),
            ExprKind::Binary { lhs, rhs, .. } => {
                self.resolve_expr(lhs)?;
                self.resolve_expr(rhs)
            }
            ExprKind::And { lhs, rhs } | ExprKind::Or { lhs, rhs } => {
                self.resolve_expr(lhs)?;
                self.resolve_branch(rhs)
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(cond)?;
                self.resolve_branch(then_branch)?;
                match else_branch {
                    Some(else_branch) => self.resolve_branch(else_branch),
                    None => Ok(()),
                }
            }
            ExprKind::While { cond, body } => {
                self.resolve_expr(cond)?;
                self.resolve_branch(body)
            }
            ExprKind::Call { callee, args } => {
                self.resolve_expr(callee)?;
                for arg in args {
                    self.resolve_expr(arg)?;
                }
                Ok(())
            }
            ExprKind::Fn(def) => {
                self.with_scope(def.params.clone(), |r| r.resolve_expr(&def.body))
            }
            ExprKind::Explain(target) => self.resolve_expr(target),
            ExprKind::Commented { target, comment } => {
                self.resolve_expr(target)?;
                self.resolve_expr(comment)
            }
        }
    }

    /// Code that may not run gets a scope of its own, so a declaration in it
    /// never shadows a name the surrounding code resolves. Blocks already
    /// open one.
    fn resolve_branch(&mut self, expr: &Expr) -> Result<(), ResolveError> {
        if expr.opens_scope() {
            self.resolve_expr(expr)
        } else {
            self.with_scope(Vec::new(), |r| r.resolve_expr(expr))
        }
    }

    fn declare(&mut self, name: &Name) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.clone());
        }
    }

    /// Record the distance to the innermost scope declaring `name_ref`.
    fn resolve_name(&mut self, name_ref: &NameRef, span: Span) -> Result<(), ResolveError> {
        let found = self
            .scopes
            .iter()
            .rev()
            .position(|scope| scope.contains(name_ref.name.as_str()));
        match found {
            Some(depth) => {
                if self.log_depths {
                    debug!(name = %name_ref.name, depth, at = %span, "resolved");
                }
                name_ref.set_depth(depth);
                Ok(())
            }
            None => Err(ResolveError {
                name: name_ref.name.clone(),
                span,
            }),
        }
    }

    /// Run `f` inside a fresh scope pre-populated with `names`.
    fn with_scope<F>(&mut self, names: Vec<Name>, f: F) -> Result<(), ResolveError>
    where
        F: FnOnce(&mut Self) -> Result<(), ResolveError>,
    {
        self.scopes.push(names.into_iter().collect());
        let result = f(self);
        self.scopes.pop();
        result
    }
}
