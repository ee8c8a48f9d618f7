//! AST nodes.
//!
//! The tree is produced by an external parser and handed to the resolver and
//! the interpreter. Every node carries the span it was parsed from. Function
//! bodies sit behind an `Rc` so a closure can keep its body alive after the
//! program that created it has been dropped (REPL submissions).
//!
//! The associated constructors on [`Expr`] build nodes with a dummy span;
//! chain [`Expr::at`] to attach the real one.

mod operators;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::{Name, Span};

pub use operators::BinaryOp;

/// A top-level submission: statements evaluated directly in the current frame.
#[derive(Debug, Default)]
pub struct Program {
    pub stmts: Vec<Expr>,
}

impl Program {
    pub fn new(stmts: Vec<Expr>) -> Self {
        Program { stmts }
    }
}

/// Literal payload, already converted by the parser.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Number(f64),
    Str(String),
    Bool(bool),
    Unit,
    /// Comment text, without delimiters.
    Comment(String),
}

/// A variable reference.
///
/// `depth` is empty until the resolver records how many scopes lie between
/// the reference and its declaration.
#[derive(Clone)]
pub struct NameRef {
    pub name: Name,
    depth: Cell<Option<usize>>,
}

impl NameRef {
    pub fn new(name: impl Into<Name>) -> Self {
        NameRef {
            name: name.into(),
            depth: Cell::new(None),
        }
    }

    /// The binding depth recorded by the resolver, if it has run.
    #[inline]
    pub fn depth(&self) -> Option<usize> {
        self.depth.get()
    }

    #[inline]
    pub fn set_depth(&self, depth: usize) {
        self.depth.set(Some(depth));
    }
}

impl fmt::Debug for NameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.depth() {
            Some(depth) => write!(f, "{}@{depth}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Function literal: parameter names and body.
#[derive(Debug)]
pub struct FnDef {
    pub params: Vec<Name>,
    pub body: Expr,
}

/// Expression node.
#[derive(Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Expression variants.
#[derive(Debug)]
pub enum ExprKind {
    /// `{ a; b; c }`, opens a new scope.
    Block(Vec<Expr>),
    /// `name = value`, rebinds the nearest existing binding.
    Assign { target: NameRef, value: Box<Expr> },
    /// `let name = value`, binds in the innermost scope.
    Declare { name: Name, value: Box<Expr> },
    Name(NameRef),
    Literal(Literal),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Short-circuit `&`.
    And { lhs: Box<Expr>, rhs: Box<Expr> },
    /// Short-circuit `|`.
    Or { lhs: Box<Expr>, rhs: Box<Expr> },
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
    },
    While { cond: Box<Expr>, body: Box<Expr> },
    Call { callee: Box<Expr>, args: Vec<Expr> },
    Fn(Rc<FnDef>),
    /// `expr?`, the explanation attached to `expr`.
    Explain(Box<Expr>),
    /// `expr /* comment */`, a copy of `expr` explained by `comment`.
    Commented { target: Box<Expr>, comment: Box<Expr> },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Replace this node's span.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    fn synth(kind: ExprKind) -> Self {
        Expr::new(kind, Span::DUMMY)
    }

    pub fn block(stmts: Vec<Expr>) -> Self {
        Self::synth(ExprKind::Block(stmts))
    }

    pub fn assign(target: impl Into<Name>, value: Expr) -> Self {
        Self::synth(ExprKind::Assign {
            target: NameRef::new(target),
            value: Box::new(value),
        })
    }

    pub fn declare(name: impl Into<Name>, value: Expr) -> Self {
        Self::synth(ExprKind::Declare {
            name: name.into(),
            value: Box::new(value),
        })
    }

    pub fn name(name: impl Into<Name>) -> Self {
        Self::synth(ExprKind::Name(NameRef::new(name)))
    }

    pub fn literal(literal: Literal) -> Self {
        Self::synth(ExprKind::Literal(literal))
    }

    pub fn number(value: f64) -> Self {
        Self::literal(Literal::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::literal(Literal::Str(value.into()))
    }

    pub fn boolean(value: bool) -> Self {
        Self::literal(Literal::Bool(value))
    }

    pub fn unit() -> Self {
        Self::literal(Literal::Unit)
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::literal(Literal::Comment(text.into()))
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::synth(ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub fn and(lhs: Expr, rhs: Expr) -> Self {
        Self::synth(ExprKind::And {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub fn or(lhs: Expr, rhs: Expr) -> Self {
        Self::synth(ExprKind::Or {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub fn if_else(cond: Expr, then_branch: Expr, else_branch: Option<Expr>) -> Self {
        Self::synth(ExprKind::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        })
    }

    pub fn while_loop(cond: Expr, body: Expr) -> Self {
        Self::synth(ExprKind::While {
            cond: Box::new(cond),
            body: Box::new(body),
        })
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Self::synth(ExprKind::Call {
            callee: Box::new(callee),
            args,
        })
    }

    pub fn function<N: Into<Name>>(params: impl IntoIterator<Item = N>, body: Expr) -> Self {
        Self::synth(ExprKind::Fn(Rc::new(FnDef {
            params: params.into_iter().map(Into::into).collect(),
            body,
        })))
    }

    pub fn explain(target: Expr) -> Self {
        Self::synth(ExprKind::Explain(Box::new(target)))
    }

    pub fn commented(target: Expr, comment: Expr) -> Self {
        Self::synth(ExprKind::Commented {
            target: Box::new(target),
            comment: Box::new(comment),
        })
    }

    /// Node name used by the AST printer.
    /// Whether evaluating this node creates a frame of its own.
    #[inline]
    pub fn opens_scope(&self) -> bool {
        matches!(self.kind, ExprKind::Block(_))
    }

    pub fn node_name(&self) -> &'static str {
        match &self.kind {
            ExprKind::Block(_) => "Block",
            ExprKind::Assign { .. } => "Assignment",
            ExprKind::Declare { .. } => "Declaration",
            ExprKind::Name(_) => "Name",
            ExprKind::Literal(_) => "Literal",
            ExprKind::Binary { .. } => "BinExpr",
            ExprKind::And { .. } => "And",
            ExprKind::Or { .. } => "Or",
            ExprKind::If { .. } => "If",
            ExprKind::While { .. } => "While",
            ExprKind::Call { .. } => "Call",
            ExprKind::Fn(_) => "Fn",
            ExprKind::Explain(_) => "Explain",
            ExprKind::Commented { .. } => "CommentedExpr",
        }
    }
}
