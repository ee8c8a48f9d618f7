use super::*;
use crate::errors::undefined_variable;
use pretty_assertions::assert_eq;

#[test]
fn push_pop_depth() {
    let mut stack = CallStack::new();
    assert!(stack.is_empty());
    stack.push(Span::line(1, 1, 4));
    stack.push(Span::line(2, 1, 4));
    assert_eq!(stack.depth(), 2);
    stack.pop();
    assert_eq!(stack.frames(), &[Span::line(1, 1, 4)]);
}

#[test]
fn capture_keeps_call_order() {
    let mut stack = CallStack::new();
    stack.push(Span::line(5, 1, 5));
    stack.push(Span::line(2, 3, 8));
    let bt = stack.capture();
    assert_eq!(bt.frames(), &[Span::line(5, 1, 5), Span::line(2, 3, 8)]);
}

#[test]
fn locate_fills_missing_parts_only() {
    let mut stack = CallStack::new();
    stack.push(Span::line(3, 1, 5));

    let located = stack.locate(undefined_variable("x"), Span::line(1, 9, 10));
    assert_eq!(located.span, Some(Span::line(1, 9, 10)));
    assert_eq!(located.frames(), &[Span::line(3, 1, 5)]);

    stack.pop();
    let relocated = stack.locate(located.clone(), Span::line(3, 1, 5));
    assert_eq!(relocated, located);
}

#[test]
fn clear_empties_stack() {
    let mut stack = CallStack::new();
    stack.push(Span::line(1, 1, 2));
    stack.clear();
    assert!(stack.is_empty());
    assert!(stack.capture().is_empty());
}
