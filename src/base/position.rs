//! Cursor and result coordinates.
//!
//! Positions are 0-indexed lines and byte columns, matching what an LSP
//! host hands us after its own encoding conversion. Both artifacts of a
//! pair must use the same units.

/// A span covering a range of source text (0-indexed, end-inclusive bounds
/// for containment checks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// A position in source text (0-indexed line and byte column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from line/column coordinates.
    pub fn from_coords(
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// Check if a position falls within this span.
    pub fn contains(&self, position: Position) -> bool {
        if position.line < self.start.line || position.line > self.end.line {
            return false;
        }
        if position.line == self.start.line && position.column < self.start.column {
            return false;
        }
        if position.line == self.end.line && position.column > self.end.column {
            return false;
        }
        true
    }
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_contains_bounds() {
        let span = Span::from_coords(1, 4, 3, 2);
        assert!(span.contains(Position::new(1, 4)));
        assert!(span.contains(Position::new(2, 0)));
        assert!(span.contains(Position::new(3, 2)));
        assert!(!span.contains(Position::new(1, 3)));
        assert!(!span.contains(Position::new(3, 3)));
        assert!(!span.contains(Position::new(0, 10)));
    }
}
