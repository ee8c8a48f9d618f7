//! Evaluation errors and their constructors.
//!
//! Every failure the interpreter can raise is an [`EvalError`] built by one
//! of the factory functions below. Operators and builtins return errors
//! without a location; the interpreter fills in the span of the failing node
//! and a snapshot of the call stack before propagating them.

use std::fmt;

use expl_ir::{BinaryOp, Span};

use crate::value::Value;

pub type EvalResult = Result<Value, EvalError>;

/// Broad error class, used to pick a diagnostic code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A name was read or assigned with no binding in scope.
    Unbound,
    /// An operation was applied to values of the wrong kind or shape.
    Type,
}

/// Structured error kind.
#[derive(Clone, Debug, PartialEq)]
pub enum EvalErrorKind {
    UndefinedVariable {
        name: String,
    },
    BinaryTypeMismatch {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
    },
    /// A short-circuit operand that is not a `Bool`.
    NonBoolOperand {
        op: &'static str,
        type_name: &'static str,
    },
    NonBoolCondition {
        type_name: &'static str,
    },
    NotCallable {
        type_name: &'static str,
    },
    ArityMismatch {
        expected: usize,
        got: usize,
    },
    /// The right side of a comment attachment is not a `Comment`.
    CannotExplainWith {
        type_name: &'static str,
    },
    WrongArgType {
        function: &'static str,
        expected: &'static str,
        got: &'static str,
    },
    IndexOutOfBounds {
        index: f64,
        len: usize,
    },
    InvalidNumber {
        text: String,
    },
}

impl EvalErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UndefinedVariable { .. } => ErrorCategory::Unbound,
            _ => ErrorCategory::Type,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedVariable { name } => write!(f, "unbound variable {name}"),
            Self::BinaryTypeMismatch { op, left, right } => {
                write!(f, "`{}` not possible for types {left} and {right}", op.as_symbol())
            }
            Self::NonBoolOperand { op, type_name } => {
                write!(f, "`{op}` expects Bool operands, got {type_name}")
            }
            Self::NonBoolCondition { type_name } => {
                write!(f, "condition must be Bool, got {type_name}")
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::ArityMismatch { expected, got } => {
                write!(f, "expected {expected} arguments, got {got}")
            }
            Self::CannotExplainWith { type_name } => {
                write!(f, "type {type_name} can not be used to explain values")
            }
            Self::WrongArgType {
                function,
                expected,
                got,
            } => write!(f, "`{function}` expects {expected}, got {got}"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for a list of length {len}")
            }
            Self::InvalidNumber { text } => write!(f, "cannot convert {text:?} to a Number"),
        }
    }
}

/// Call-site spans active when an error was raised, outermost call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Backtrace {
    frames: Vec<Span>,
}

impl Backtrace {
    pub fn new(frames: Vec<Span>) -> Self {
        Backtrace { frames }
    }

    pub fn frames(&self) -> &[Span] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Node that failed. `None` until the interpreter locates the error.
    pub span: Option<Span>,
    /// Call stack at the failure. `None` until the interpreter locates the error.
    pub backtrace: Option<Backtrace>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            span: None,
            backtrace: None,
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: Backtrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub fn span_or_dummy(&self) -> Span {
        self.span.unwrap_or(Span::DUMMY)
    }

    /// Backtrace frames, empty when none was captured.
    pub fn frames(&self) -> &[Span] {
        self.backtrace.as_ref().map_or(&[], Backtrace::frames)
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "{span}: {}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for EvalError {}

// Variable errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

// Operator errors

#[cold]
pub fn binary_type_mismatch(op: BinaryOp, left: &'static str, right: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::BinaryTypeMismatch { op, left, right })
}

#[cold]
pub fn non_bool_operand(op: &'static str, type_name: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::NonBoolOperand { op, type_name })
}

#[cold]
pub fn non_bool_condition(type_name: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::NonBoolCondition { type_name })
}

#[cold]
pub fn cannot_explain_with(type_name: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::CannotExplainWith { type_name })
}

// Call errors

#[cold]
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::NotCallable { type_name })
}

#[cold]
pub fn wrong_arg_count(expected: usize, got: usize) -> EvalError {
    EvalError::new(EvalErrorKind::ArityMismatch { expected, got })
}

#[cold]
pub fn wrong_arg_type(function: &'static str, expected: &'static str, got: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::WrongArgType {
        function,
        expected,
        got,
    })
}

// Builtin errors

#[cold]
pub fn index_out_of_bounds(index: f64, len: usize) -> EvalError {
    EvalError::new(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn invalid_number(text: &str) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidNumber {
        text: text.to_string(),
    })
}
