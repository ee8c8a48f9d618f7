//! AST Visitor Pattern
//!
//! Default implementations call `walk_*` functions that traverse children.
//! Override `visit_*` methods to add custom behavior at specific nodes.
//!
//! Passes that must stop at the first failure (the resolver) match on
//! `ExprKind` directly and return `Result`; this trait is for infallible
//! traversals such as [`AstPrinter`].

use std::fmt::Write as _;

use crate::ast::{Expr, ExprKind, Literal, Program};

/// AST Visitor trait.
pub trait Visitor<'ast> {
    fn visit_program(&mut self, program: &'ast Program) {
        walk_program(self, program);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }
}

pub fn walk_program<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, program: &'ast Program) {
    for stmt in &program.stmts {
        visitor.visit_expr(stmt);
    }
}

/// Visit the children of `expr` in evaluation order.
pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expr) {
    match &expr.kind {
        ExprKind::Block(stmts) => {
            for stmt in stmts {
                visitor.visit_expr(stmt);
            }
        }
        ExprKind::Assign { value, .. } | ExprKind::Declare { value, .. } => {
            visitor.visit_expr(value);
        }
        ExprKind::Name(_) | ExprKind::Literal(_) => {}
        ExprKind::Binary { lhs, rhs, .. } | ExprKind::And { lhs, rhs } | ExprKind::Or { lhs, rhs } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(cond);
            visitor.visit_expr(then_branch);
            if let Some(else_branch) = else_branch {
                visitor.visit_expr(else_branch);
            }
        }
        ExprKind::While { cond, body } => {
            visitor.visit_expr(cond);
            visitor.visit_expr(body);
        }
        ExprKind::Call { callee, args } => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Fn(def) => visitor.visit_expr(&def.body),
        ExprKind::Explain(target) => visitor.visit_expr(target),
        ExprKind::Commented { target, comment } => {
            visitor.visit_expr(target);
            visitor.visit_expr(comment);
        }
    }
}

/// Renders an AST as an indented outline, one node per line.
///
/// ```text
/// Declaration x
///  |BinExpr +
///  | |Literal 3
///  | |Literal 4
/// ```
#[derive(Default)]
pub struct AstPrinter {
    out: String,
    indent: usize,
}

impl AstPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print a whole program.
    pub fn print(program: &Program) -> String {
        let mut printer = AstPrinter::new();
        printer.visit_program(program);
        printer.out
    }

    /// Print a single expression tree.
    pub fn print_expr(expr: &Expr) -> String {
        let mut printer = AstPrinter::new();
        printer.visit_expr(expr);
        printer.out
    }

    fn detail(expr: &Expr) -> Option<String> {
        Some(match &expr.kind {
            ExprKind::Assign { target, .. } => format!("{target:?}"),
            ExprKind::Declare { name, .. } => name.to_string(),
            ExprKind::Name(name_ref) => format!("<{name_ref:?}>"),
            ExprKind::Literal(literal) => match literal {
                Literal::Number(n) => n.to_string(),
                Literal::Str(s) => format!("{s:?}"),
                Literal::Bool(b) => b.to_string(),
                Literal::Unit => "()".to_string(),
                Literal::Comment(c) => format!("/*{c}*/"),
            },
            ExprKind::Binary { op, .. } => op.as_symbol().to_string(),
            ExprKind::Fn(def) => {
                let params: Vec<&str> = def.params.iter().map(crate::Name::as_str).collect();
                format!("({})", params.join(", "))
            }
            _ => return None,
        })
    }
}

impl<'ast> Visitor<'ast> for AstPrinter {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        self.out.push_str(&" |".repeat(self.indent));
        self.out.push_str(expr.node_name());
        if let Some(detail) = Self::detail(expr) {
            let _ = write!(self.out, " {detail}");
        }
        self.out.push('\n');
        self.indent += 1;
        walk_expr(self, expr);
        self.indent -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BinaryOp;
    use pretty_assertions::assert_eq;

    #[test]
    fn prints_nested_outline() {
        let program = Program::new(vec![
            Expr::declare(
                "x",
                Expr::binary(BinaryOp::Add, Expr::number(3.0), Expr::number(4.0)),
            ),
            Expr::call(Expr::name("print"), vec![Expr::name("x")]),
        ]);
        assert_eq!(
            AstPrinter::print(&program),
            "Declaration x\n \
             |BinExpr +\n \
             | |Literal 3\n \
             | |Literal 4\n\
             Call\n \
             |Name <print>\n \
             |Name <x>\n"
        );
    }

    #[test]
    fn counts_nodes_with_default_walk() {
        struct Count(usize);
        impl<'ast> Visitor<'ast> for Count {
            fn visit_expr(&mut self, expr: &'ast Expr) {
                self.0 += 1;
                walk_expr(self, expr);
            }
        }

        let expr = Expr::if_else(
            Expr::boolean(true),
            Expr::block(vec![Expr::number(1.0)]),
            Some(Expr::function(["a"], Expr::name("a"))),
        );
        let mut count = Count(0);
        count.visit_expr(&expr);
        // If, cond, Block, its literal, Fn, its body
        assert_eq!(count.0, 6);
    }
}
