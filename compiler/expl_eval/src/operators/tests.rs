use super::*;
use crate::errors::EvalErrorKind;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn num(n: f64) -> Value {
    Value::number(n)
}

fn explanation(value: &Value) -> &str {
    value.explanation().map_or("", Explanation::as_str)
}

#[test]
fn arithmetic() {
    let cases = [
        (BinaryOp::Add, 7.0, "the sum of the number 3 and the number 4"),
        (BinaryOp::Sub, -1.0, "the difference of the number 3 and the number 4"),
        (BinaryOp::Mul, 12.0, "the product of the number 3 and the number 4"),
        (BinaryOp::Div, 0.75, "the quotient of the number 3 and the number 4"),
        (BinaryOp::Mod, 3.0, "the remainder of the number 3 divided by the number 4"),
    ];
    for (op, expected, text) in cases {
        let Ok(result) = evaluate_binary(&num(3.0), &num(4.0), op) else {
            panic!("{op:?} on numbers failed");
        };
        assert_eq!(result.kind(), &ValueKind::Number(expected), "{op:?}");
        assert_eq!(explanation(&result), text);
    }
}

#[test]
fn division_follows_ieee() {
    let Ok(result) = evaluate_binary(&num(1.0), &num(0.0), BinaryOp::Div) else {
        panic!("division by zero is not an error");
    };
    assert_eq!(result.as_number(), Some(f64::INFINITY));
    let Ok(result) = evaluate_binary(&num(1.0), &num(0.0), BinaryOp::Mod) else {
        panic!("modulo by zero is not an error");
    };
    assert!(result.as_number().is_some_and(f64::is_nan));
}

#[test]
fn comparisons() {
    let Ok(lt) = evaluate_binary(&num(1.0), &num(2.0), BinaryOp::Lt) else {
        panic!("comparison failed");
    };
    assert_eq!(lt.as_bool(), Some(true));
    assert_eq!(explanation(&lt), "whether the number 1 is less than the number 2");

    let Ok(gt) = evaluate_binary(&Value::string("b"), &Value::string("a"), BinaryOp::Gt) else {
        panic!("string comparison failed");
    };
    assert_eq!(gt.as_bool(), Some(true));

    let Ok(eq) = evaluate_binary(&num(2.0), &num(2.0), BinaryOp::Eq) else {
        panic!("equality failed");
    };
    assert_eq!(explanation(&eq), "whether the number 2 equals the number 2");
}

#[test]
fn string_concatenation() {
    let Ok(joined) = evaluate_binary(&Value::string("ab"), &Value::string("cd"), BinaryOp::Add)
    else {
        panic!("concatenation failed");
    };
    assert_eq!(joined.to_string(), "abcd");
    assert_eq!(
        explanation(&joined),
        "the concatenation of the string \"ab\" and the string \"cd\""
    );
}

#[test]
fn equality_on_scalars() {
    let cases = [
        (Value::boolean(true), Value::boolean(true), true),
        (Value::boolean(true), Value::boolean(false), false),
        (Value::unit(), Value::unit(), true),
        (Value::comment("a"), Value::comment("a"), true),
        (Value::comment("a"), Value::comment("b"), false),
    ];
    for (left, right, expected) in cases {
        let Ok(result) = evaluate_binary(&left, &right, BinaryOp::Eq) else {
            panic!("== on {} failed", left.type_name());
        };
        assert_eq!(result.as_bool(), Some(expected));
    }
}

#[test]
fn operands_use_their_explanations() {
    let a = num(3.0).explained("the width");
    let b = num(4.0).explained("the height");
    let Ok(area) = evaluate_binary(&a, &b, BinaryOp::Mul) else {
        panic!("multiplication failed");
    };
    assert_eq!(explanation(&area), "the product of the width and the height");
}

#[test]
fn unexplained_operands_fall_back() {
    let Ok(result) = evaluate_binary(&Value::unit(), &Value::unit(), BinaryOp::Eq) else {
        panic!("unit equality failed");
    };
    assert_eq!(explanation(&result), "whether unit equals unit");
}

#[test]
fn mismatched_kinds_fail() {
    let err = evaluate_binary(&num(1.0), &Value::boolean(true), BinaryOp::Add)
        .err()
        .map(|e| e.kind);
    assert_eq!(
        err,
        Some(EvalErrorKind::BinaryTypeMismatch {
            op: BinaryOp::Add,
            left: "Number",
            right: "Bool",
        })
    );
}

#[test]
fn unsupported_ops_on_matching_kinds_fail() {
    assert!(evaluate_binary(&Value::string("a"), &Value::string("b"), BinaryOp::Sub).is_err());
    assert!(evaluate_binary(&Value::boolean(true), &Value::boolean(true), BinaryOp::Lt).is_err());
    assert!(evaluate_binary(&Value::unit(), &Value::unit(), BinaryOp::Add).is_err());
    assert!(evaluate_binary(&Value::list(vec![]), &Value::list(vec![]), BinaryOp::Eq).is_err());
}

#[test]
fn logical_explanations() {
    let t = Value::boolean(true);
    let f = Value::boolean(false);
    assert_eq!(
        explanation(&conjunction(&t, &f, false)),
        "the conjunction of the boolean \"true\" and the boolean \"false\""
    );
    assert_eq!(
        explanation(&disjunction(&f, &t, true)),
        "the disjunction of the boolean \"false\" and the boolean \"true\""
    );
}

proptest! {
    #[test]
    fn number_addition_matches_host(a in -1.0e12f64..1.0e12, b in -1.0e12f64..1.0e12) {
        let result = evaluate_binary(&num(a), &num(b), BinaryOp::Add);
        prop_assert!(result.is_ok());
        if let Ok(value) = result {
            prop_assert_eq!(value.as_number(), Some(a + b));
            let expected = format!(
                "the sum of the number {} and the number {}",
                crate::value::format_number(a),
                crate::value::format_number(b)
            );
            prop_assert_eq!(explanation(&value), expected.as_str());
        }
    }
}
