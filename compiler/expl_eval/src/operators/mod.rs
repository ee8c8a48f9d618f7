//! Binary and short-circuit operators.
//!
//! Dispatch is a match on the operand kinds. Every result carries an
//! explanation composed from the operands' descriptions, e.g.
//! "the sum of the number 3 and the number 4".

use std::rc::Rc;

use expl_ir::BinaryOp;

use crate::errors::{binary_type_mismatch, EvalError, EvalResult};
use crate::value::{Explanation, Value, ValueKind};

/// Evaluate `left op right` on already-evaluated operands.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let kind = match (left.kind(), right.kind()) {
        (ValueKind::Number(a), ValueKind::Number(b)) => eval_number_binary(*a, *b, op),
        (ValueKind::Str(a), ValueKind::Str(b)) => eval_string_binary(a, b, op),
        (ValueKind::Bool(a), ValueKind::Bool(b)) => eval_equality(a == b, op),
        (ValueKind::Unit, ValueKind::Unit) => eval_equality(true, op),
        (ValueKind::Comment(a), ValueKind::Comment(b)) => eval_equality(a == b, op),
        _ => None,
    };
    let kind = kind.ok_or_else(|| mismatch(left, right, op))?;
    let explanation = explain_binary(left, right, op);
    Ok(Value::with_explanation(kind, explanation))
}

#[cold]
fn mismatch(left: &Value, right: &Value, op: BinaryOp) -> EvalError {
    binary_type_mismatch(op, left.type_name(), right.type_name())
}

#[allow(clippy::float_cmp)]
fn eval_number_binary(a: f64, b: f64, op: BinaryOp) -> Option<ValueKind> {
    Some(match op {
        BinaryOp::Add => ValueKind::Number(a + b),
        BinaryOp::Sub => ValueKind::Number(a - b),
        BinaryOp::Mul => ValueKind::Number(a * b),
        BinaryOp::Div => ValueKind::Number(a / b),
        BinaryOp::Mod => ValueKind::Number(a % b),
        BinaryOp::Eq => ValueKind::Bool(a == b),
        BinaryOp::Lt => ValueKind::Bool(a < b),
        BinaryOp::Gt => ValueKind::Bool(a > b),
    })
}

fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> Option<ValueKind> {
    match op {
        BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Some(ValueKind::Str(Rc::from(joined)))
        }
        BinaryOp::Eq => Some(ValueKind::Bool(a == b)),
        BinaryOp::Lt => Some(ValueKind::Bool(a < b)),
        BinaryOp::Gt => Some(ValueKind::Bool(a > b)),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => None,
    }
}

/// Kinds that only support `==`.
fn eval_equality(equal: bool, op: BinaryOp) -> Option<ValueKind> {
    (op == BinaryOp::Eq).then_some(ValueKind::Bool(equal))
}

fn explain_binary(left: &Value, right: &Value, op: BinaryOp) -> String {
    let a = left.describe();
    let b = right.describe();
    match op {
        BinaryOp::Add if matches!(left.kind(), ValueKind::Str(_)) => {
            format!("the concatenation of {a} and {b}")
        }
        BinaryOp::Add => format!("the sum of {a} and {b}"),
        BinaryOp::Sub => format!("the difference of {a} and {b}"),
        BinaryOp::Mul => format!("the product of {a} and {b}"),
        BinaryOp::Div => format!("the quotient of {a} and {b}"),
        BinaryOp::Mod => format!("the remainder of {a} divided by {b}"),
        BinaryOp::Eq => format!("whether {a} equals {b}"),
        BinaryOp::Lt => format!("whether {a} is less than {b}"),
        BinaryOp::Gt => format!("whether {a} is greater than {b}"),
    }
}

/// Result of `left & right` once both sides have been evaluated as `Bool`.
pub fn conjunction(left: &Value, right: &Value, value: bool) -> Value {
    Value::with_explanation(
        ValueKind::Bool(value),
        Explanation::from(format!(
            "the conjunction of {} and {}",
            left.describe(),
            right.describe()
        )),
    )
}

/// Result of `left | right` once both sides have been evaluated as `Bool`.
pub fn disjunction(left: &Value, right: &Value, value: bool) -> Value {
    Value::with_explanation(
        ValueKind::Bool(value),
        Explanation::from(format!(
            "the disjunction of {} and {}",
            left.describe(),
            right.describe()
        )),
    )
}

#[cfg(test)]
mod tests;
