use super::*;

#[test]
fn error_builder() {
    let diag = Diagnostic::error(ErrorCode::E2001, "unbound variable foo", Span::line(1, 1, 4))
        .with_backtrace([Span::line(2, 1, 5)]);

    assert_eq!(diag.backtrace, vec![Span::line(2, 1, 5)]);
    assert_eq!(diag.header(), "error[E2001]");
    assert_eq!(
        diag.to_string(),
        "error[E2001] at 1:1: unbound variable foo"
    );
}

#[test]
fn backtrace_defaults_empty() {
    let diag = Diagnostic::error(ErrorCode::E1001, "expected `)`", Span::DUMMY);
    assert!(diag.backtrace.is_empty());
}
