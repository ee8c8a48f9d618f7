//! Annotated source snippets.
//!
//! Renders the lines a span touches with an underline beneath them:
//!
//! ```text
//!   |
//! 1 | print(1 + true);
//!   |       ^~~~~~~~
//! ```
//!
//! A multi-line span underlines from its start column to the end of the first
//! line and the last line up to its end column. A single intervening line is
//! shown in full; longer gaps collapse into a `...` marker.
//!
//! Columns count characters, not bytes, and are 1-based. End columns are
//! exclusive.

use std::fmt::Write as _;

use expl_ir::Span;

const CARET: char = '^';
const FILL: char = '~';
const ELLIPSIS: &str = "...";

/// Render `span` against `source`.
///
/// Returns an empty string for dummy spans and spans outside the source.
pub fn render(source: &str, span: Span) -> String {
    let lines: Vec<&str> = source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let first = span.start.line as usize;
    if span.is_dummy() || first == 0 || first > lines.len() {
        return String::new();
    }
    let last = (span.end.line as usize).clamp(first, lines.len());
    let width = digits(last);

    let mut out = String::new();
    let _ = writeln!(out, "{:width$} |", "");

    if first == last {
        let end = if span.end.line as usize == first {
            span.end.column
        } else {
            line_end(lines[first - 1])
        };
        push_line(&mut out, width, first, lines[first - 1]);
        push_underline(&mut out, width, span.start.column, end, CARET);
        return out;
    }

    let head = lines[first - 1];
    push_line(&mut out, width, first, head);
    push_underline(&mut out, width, span.start.column, line_end(head), CARET);

    match last - first - 1 {
        0 => {}
        1 => {
            let middle = lines[first];
            push_line(&mut out, width, first + 1, middle);
            if !middle.trim().is_empty() {
                push_underline(&mut out, width, indent_column(middle), line_end(middle), FILL);
            }
        }
        _ => {
            let _ = writeln!(out, "{ELLIPSIS}");
        }
    }

    let tail = lines[last - 1];
    push_line(&mut out, width, last, tail);
    push_underline(&mut out, width, indent_column(tail), span.end.column, FILL);
    out
}

/// Build an underline starting at `start` (1-based) and ending before `end`.
///
/// At least one marker is drawn even for empty or inverted ranges.
pub fn underline(start: u32, end: u32, first: char) -> String {
    let lead = start.saturating_sub(1) as usize;
    let len = end.saturating_sub(start).max(1) as usize;
    let mut marks = String::with_capacity(lead + len);
    marks.extend(std::iter::repeat(' ').take(lead));
    marks.push(first);
    marks.extend(std::iter::repeat(FILL).take(len - 1));
    marks
}

fn push_line(out: &mut String, width: usize, number: usize, text: &str) {
    let _ = writeln!(out, "{number:>width$} | {text}");
}

fn push_underline(out: &mut String, width: usize, start: u32, end: u32, first: char) {
    let _ = writeln!(out, "{:width$} | {}", "", underline(start, end, first));
}

/// Exclusive end column of a line.
fn line_end(line: &str) -> u32 {
    u32::try_from(line.chars().count()).unwrap_or(u32::MAX).saturating_add(1)
}

/// Column of the first non-whitespace character.
fn indent_column(line: &str) -> u32 {
    let indent = line.chars().take_while(|c| c.is_whitespace()).count();
    u32::try_from(indent).unwrap_or(0).saturating_add(1)
}

fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
