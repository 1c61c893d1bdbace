//! Line/column source locations.
//!
//! The cleanup passes only ever compare start lines, but the full span is kept
//! so a serializer can round-trip what the parser produced.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text (1-based line, 0-based column).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Position {
        Position { line, column }
    }
}

/// Start/end positions of a node as reported by the parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: Position,
    pub end: Position,
}

impl SourceSpan {
    pub const fn new(start: Position, end: Position) -> SourceSpan {
        SourceSpan { start, end }
    }

    /// Span covering `start_col..end_col` on a single line.
    pub const fn on_line(line: u32, start_col: u32, end_col: u32) -> SourceSpan {
        SourceSpan {
            start: Position::new(line, start_col),
            end: Position::new(line, end_col),
        }
    }

    #[inline]
    pub const fn start_line(&self) -> u32 {
        self.start.line
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start.line, self.start.column)
    }
}
