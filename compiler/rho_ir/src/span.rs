//! Source locations.

use std::fmt;

/// A point in the source text.
///
/// `line` and `col` are 1-based; `offset` is the byte offset from the start
/// of the parse unit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub col: u32,
}

impl Position {
    #[inline]
    pub const fn new(offset: u32, line: u32, col: u32) -> Self {
        Position { offset, line, col }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Source location span: start and end positions (end exclusive).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Span for synthesized nodes.
    pub const DUMMY: Span = Span {
        start: Position::new(0, 0, 0),
        end: Position::new(0, 0, 0),
    };

    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        if self.is_dummy() {
            return other;
        }
        if other.is_dummy() {
            return self;
        }
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    #[inline]
    pub fn is_dummy(self) -> bool {
        self == Span::DUMMY
    }

    /// Byte range, for diagnostics renderers.
    pub fn range(self) -> std::ops::Range<usize> {
        self.start.offset as usize..self.end.offset as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start.line, self.start.col)
    }
}
