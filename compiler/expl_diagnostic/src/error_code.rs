//! Error codes for all runtime diagnostics.
//!
//! Format: E#### where the first digit indicates the stage:
//! - E1xxx: Parser errors (reported by the external front end)
//! - E2xxx: Resolution and evaluation errors

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Syntax error reported by the parser
    E1001,
    /// Unbound variable (static or at runtime)
    E2001,
    /// Operand, callee or argument of the wrong kind
    E2002,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
