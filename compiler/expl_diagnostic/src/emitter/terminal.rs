//! Plain-text renderer for terminals, optionally with ANSI styling.
//!
//! ```text
//! backtrace (most recent call last):
//!  --> 3:1
//!   |
//! 3 | f(1);
//!   | ^~~~
//! error[E2002]: `+` not possible for types Number and Bool
//!  --> 1:16
//!   |
//! 1 | let f = fn(x) { x + true };
//!   |                 ^~~~~~~~
//! ```

use std::io::{self, Write};

use expl_ir::Span;

use super::DiagnosticEmitter;
use crate::{snippet, Diagnostic};

/// Styles the emitter applies when colors are on.
#[derive(Clone, Copy)]
enum Style {
    /// Bold red, for the `error[...]` header.
    Error,
    /// Bold, for the backtrace title.
    Title,
}

impl Style {
    fn ansi(self) -> &'static str {
        match self {
            Style::Error => "\x1b[1;31m",
            Style::Title => "\x1b[1m",
        }
    }
}

const ANSI_RESET: &str = "\x1b[0m";

/// When to style output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Style only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => is_tty,
        }
    }
}

/// Renders diagnostics to any writer.
///
/// Write failures are ignored: there is nowhere left to report them.
pub struct TerminalEmitter<W: Write> {
    out: W,
    styled: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// `is_tty` only matters for `ColorMode::Auto`.
    pub fn with_color_mode(out: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            out,
            styled: mode.should_use_colors(is_tty),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn styled_line(&mut self, text: &str, style: Style) {
        let _ = if self.styled {
            writeln!(self.out, "{}{text}{ANSI_RESET}", style.ansi())
        } else {
            writeln!(self.out, "{text}")
        };
    }

    /// ` --> line:col` followed by the annotated snippet.
    fn location(&mut self, span: Span, source: &str) {
        if span.is_dummy() {
            return;
        }
        let _ = write!(
            self.out,
            " --> {}\n{}",
            span.start,
            snippet::render(source, span)
        );
    }
}

impl TerminalEmitter<Vec<u8>> {
    /// Render one diagnostic to a string without styling.
    pub fn render(diagnostic: &Diagnostic, source: &str) -> String {
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
        emitter.emit(diagnostic, source);
        String::from_utf8_lossy(&emitter.into_inner()).into_owned()
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic, source: &str) {
        if !diagnostic.backtrace.is_empty() {
            self.styled_line("backtrace (most recent call last):", Style::Title);
            for &call in &diagnostic.backtrace {
                self.location(call, source);
            }
        }

        let header = format!("{}: {}", diagnostic.header(), diagnostic.message);
        self.styled_line(&header, Style::Error);
        self.location(diagnostic.span, source);
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests;
