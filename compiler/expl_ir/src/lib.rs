//! Expl IR - AST and source location types.
//!
//! This crate contains the data structures shared by every stage of the
//! Expl runtime:
//! - Spans (`line:column` ranges) for source locations
//! - Names for identifiers
//! - AST nodes (`Program`, `Expr`, `ExprKind`) as produced by an external parser
//! - A `Visitor` trait and an indented `AstPrinter` for debugging
//!
//! The AST is consumed read-only. The only slot written after construction is
//! the binding depth of a name reference, which the resolver fills through a
//! `Cell`.

pub mod ast;
mod name;
mod span;
pub mod visitor;

pub use ast::{BinaryOp, Expr, ExprKind, FnDef, Literal, NameRef, Program};
pub use name::Name;
pub use span::{Position, Span};
pub use visitor::{AstPrinter, Visitor};
