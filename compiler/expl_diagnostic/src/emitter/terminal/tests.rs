use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;

#[test]
fn renders_header_and_snippet() {
    let source = "print(1 + true);";
    let diag = Diagnostic::error(
        ErrorCode::E2002,
        "`+` not possible for types Number and Bool",
        Span::line(1, 7, 15),
    );
    assert_eq!(
        TerminalEmitter::render(&diag, source),
        "error[E2002]: `+` not possible for types Number and Bool\n \
         --> 1:7\n  \
         |\n\
         1 | print(1 + true);\n  \
         |       ^~~~~~~~\n"
    );
}

#[test]
fn backtrace_precedes_message_in_call_order() {
    let source = "let f = fn(x) { x + true };\nf(1);";
    let diag = Diagnostic::error(
        ErrorCode::E2002,
        "`+` not possible for types Number and Bool",
        Span::line(1, 17, 25),
    )
    .with_backtrace([Span::line(2, 1, 5)]);

    assert_eq!(
        TerminalEmitter::render(&diag, source),
        "backtrace (most recent call last):\n \
         --> 2:1\n  \
         |\n\
         2 | f(1);\n  \
         | ^~~~\n\
         error[E2002]: `+` not possible for types Number and Bool\n \
         --> 1:17\n  \
         |\n\
         1 | let f = fn(x) { x + true };\n  \
         |                 ^~~~~~~~\n"
    );
}

#[test]
fn dummy_span_renders_header_only() {
    let diag = Diagnostic::error(ErrorCode::E2001, "unbound variable x", Span::DUMMY);
    assert_eq!(
        TerminalEmitter::render(&diag, ""),
        "error[E2001]: unbound variable x\n"
    );
}

#[test]
fn colors_wrap_header() {
    let diag = Diagnostic::error(ErrorCode::E2001, "unbound variable x", Span::DUMMY);
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
    emitter.emit(&diag, "");
    let out = String::from_utf8_lossy(&emitter.into_inner()).into_owned();
    assert_eq!(out, "\x1b[1;31merror[E2001]: unbound variable x\x1b[0m\n");
}

#[test]
fn color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}
