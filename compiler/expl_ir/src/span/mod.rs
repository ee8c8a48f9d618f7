//! Source location spans.
//!
//! Spans are recorded as 1-based `line:column` positions, the way the
//! external parser reports them. The end column is exclusive: a token `foo`
//! starting at column 1 ends at column 4.

use std::fmt;

/// A 1-based line and column in the source text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source location span.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Dummy span for synthesized nodes.
    pub const DUMMY: Span = Span {
        start: Position { line: 0, column: 0 },
        end: Position { line: 0, column: 0 },
    };

    /// Create a new span.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Create a span that starts and ends on the same line.
    #[inline]
    pub const fn line(line: u32, start_column: u32, end_column: u32) -> Self {
        Span {
            start: Position::new(line, start_column),
            end: Position::new(line, end_column),
        }
    }

    /// Check if this is the dummy span.
    #[inline]
    pub fn is_dummy(&self) -> bool {
        *self == Span::DUMMY
    }

    /// Check if the span covers more than one line.
    #[inline]
    pub const fn is_multiline(&self) -> bool {
        self.end.line > self.start.line
    }

    /// Number of lines touched by this span.
    #[inline]
    pub const fn line_count(&self) -> u32 {
        self.end.line.saturating_sub(self.start.line) + 1
    }

    /// Merge two spans to create one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)
    }
}
