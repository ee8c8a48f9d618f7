//! Binary operators.
//!
//! Short-circuit `&` and `|` are not binary operators here: they have their
//! own `ExprKind::And` / `ExprKind::Or` nodes because the right operand is
//! evaluated lazily.

/// Eagerly evaluated binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    Lt,
    Gt,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    ///
    /// Used in error messages to show the exact operator that failed.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::Lt => "<",
            Self::Gt => ">",
        }
    }

    /// Map a source symbol back to its operator.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Mod,
            "==" => Self::Eq,
            "<" => Self::Lt,
            ">" => Self::Gt,
            _ => return None,
        })
    }
}
