use super::*;
use crate::prelude::lookup_primitive;
use expl_ir::Expr;
use pretty_assertions::assert_eq;

fn explanation_of(value: &Value) -> Option<&str> {
    value.explanation().map(Explanation::as_str)
}

#[test]
fn literals_carry_default_explanations() {
    assert_eq!(explanation_of(&Value::number(3.0)), Some("the number 3"));
    assert_eq!(explanation_of(&Value::number(2.5)), Some("the number 2.5"));
    assert_eq!(explanation_of(&Value::string("hi")), Some("the string \"hi\""));
    assert_eq!(explanation_of(&Value::boolean(true)), Some("the boolean \"true\""));
    assert_eq!(explanation_of(&Value::unit()), None);
    assert_eq!(explanation_of(&Value::comment("note")), None);
}

#[test]
fn from_literal_matches_constructors() {
    assert_eq!(Value::from_literal(&Literal::Number(7.0)), Value::number(7.0));
    assert_eq!(Value::from_literal(&Literal::Str("a".into())), Value::string("a"));
    assert_eq!(Value::from_literal(&Literal::Bool(false)), Value::boolean(false));
    assert_eq!(Value::from_literal(&Literal::Unit), Value::unit());
    assert_eq!(
        Value::from_literal(&Literal::Comment("why".into())),
        Value::comment("why")
    );
}

#[test]
fn explained_copies_and_leaves_original_alone() {
    let original = Value::number(1.0);
    let copy = original.explained("one");
    assert_eq!(explanation_of(&original), Some("the number 1"));
    assert_eq!(explanation_of(&copy), Some("one"));
    assert_eq!(copy.kind(), original.kind());
}

#[test]
fn describe_prefers_explanation() {
    let v = Value::number(4.0).explained("four");
    assert_eq!(v.describe(), "four");
}

#[test]
fn describe_falls_back_per_kind() {
    assert_eq!(Value::new(ValueKind::Number(4.0)).describe(), "the number 4");
    assert_eq!(Value::new(ValueKind::Str("x".into())).describe(), "the string \"x\"");
    assert_eq!(Value::new(ValueKind::Bool(false)).describe(), "the boolean \"false\"");
    assert_eq!(Value::unit().describe(), "unit");
    assert_eq!(Value::comment("c").describe(), "a comment");
    assert_eq!(Value::list(vec![]).describe(), "a list of 0 items");
    assert_eq!(Value::list(vec![Value::unit()]).describe(), "a list of 1 item");
    assert_eq!(
        Value::list(vec![Value::unit(), Value::unit()]).describe(),
        "a list of 2 items"
    );
}

#[test]
fn closure_and_primitive_forms() {
    let def = Rc::new(FnDef {
        params: vec![Name::from("x"), Name::from("y")],
        body: Expr::unit(),
    });
    let closure = Value::closure(Closure {
        env: Environment::new(),
        def,
    });
    assert_eq!(closure.describe(), "a function of (x, y)");
    assert_eq!(closure.to_string(), "<fn(x, y)>");
    assert!(closure.is_callable());

    let Some(print) = lookup_primitive("print") else {
        panic!("print is a builtin");
    };
    let prim = Value::primitive(print);
    assert_eq!(prim.describe(), "the builtin print function");
    assert_eq!(prim.to_string(), "<builtin print>");
    assert!(prim.is_callable());
}

#[test]
fn textual_forms() {
    assert_eq!(Value::number(3.0).to_string(), "3");
    assert_eq!(Value::number(-0.25).to_string(), "-0.25");
    assert_eq!(Value::string("hi").to_string(), "hi");
    assert_eq!(Value::boolean(true).to_string(), "true");
    assert_eq!(Value::unit().to_string(), "()");
    assert_eq!(Value::comment("a note").to_string(), "a note");
    let list = Value::list(vec![Value::number(1.0), Value::string("a")]);
    assert_eq!(list.to_string(), "[1, \"a\"]");
}

#[test]
fn type_names() {
    assert_eq!(Value::number(0.0).type_name(), "Number");
    assert_eq!(Value::string("").type_name(), "String");
    assert_eq!(Value::boolean(true).type_name(), "Bool");
    assert_eq!(Value::unit().type_name(), "Unit");
    assert_eq!(Value::list(vec![]).type_name(), "List");
    assert_eq!(Value::comment("").type_name(), "Comment");
}

#[test]
fn list_handles_share_storage() {
    let a = ListValue::new(vec![Value::number(1.0)]);
    let b = a.clone();
    b.push(Value::number(2.0));
    assert_eq!(a.len(), 2);
    assert!(a.ptr_eq(&b));
    assert!(a.set(0, Value::number(9.0)));
    assert!(!a.set(5, Value::unit()));
    assert_eq!(b.get(0), Some(Value::number(9.0)));
    assert_eq!(b.get(7), None);
}

#[test]
fn lists_compare_by_content() {
    let a = ListValue::new(vec![Value::number(1.0)]);
    let b = ListValue::new(vec![Value::number(1.0)]);
    assert!(!a.ptr_eq(&b));
    assert_eq!(a, b);
}

#[test]
fn self_containing_list_prints_marker() {
    let list = ListValue::new(vec![Value::number(1.0)]);
    let value = Value::new(ValueKind::List(list.clone()));
    list.push(value.clone());
    assert_eq!(value.to_string(), "[1, [...]]");
    assert!(format!("{list:?}").contains("[...]"));
    // The guard is released, so a second rendering matches the first.
    assert_eq!(value.to_string(), "[1, [...]]");
}

#[test]
fn cyclic_lists_compare_without_overflow() {
    let a = ListValue::default();
    a.push(Value::new(ValueKind::List(a.clone())));
    let b = ListValue::default();
    b.push(Value::new(ValueKind::List(b.clone())));
    assert!(a == a.clone());
    assert!(a == b);

    let c = ListValue::default();
    c.push(Value::new(ValueKind::List(c.clone())));
    c.push(Value::number(1.0));
    assert!(a != c);
}
