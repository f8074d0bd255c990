//! Line/column ↔ byte-offset conversion.
//!
//! Built once per parsed text. The CSTs speak byte offsets ([`TextSize`]),
//! editor hosts speak line/column; this is the bridge between them.

use text_size::{TextRange, TextSize};

use super::position::{Position, Span};

/// Maps byte offsets to 0-indexed line/column positions and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the start of each line. Always begins with 0.
    line_starts: Vec<TextSize>,
    /// Total length of the indexed text.
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(TextSize::new(i as u32 + 1));
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Convert a position to a byte offset.
    ///
    /// Returns `None` if the line does not exist or the column runs past
    /// the end of the text; callers treat that as "nothing under the
    /// cursor".
    pub fn offset(&self, position: Position) -> Option<TextSize> {
        let line_start = *self.line_starts.get(position.line)?;
        let offset = line_start + TextSize::new(position.column as u32);
        (offset <= self.len).then_some(offset)
    }

    /// Convert a byte offset to a position. Offsets past the end clamp to
    /// the last line.
    pub fn position(&self, offset: TextSize) -> Position {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let column = u32::from(offset - self.line_starts[line]) as usize;
        Position::new(line, column)
    }

    /// Convert a byte range to a line/column span.
    pub fn span(&self, range: TextRange) -> Span {
        Span::new(self.position(range.start()), self.position(range.end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_round_trip() {
        let text = "message Order {\n  int32 count = 1;\n}\n";
        let index = LineIndex::new(text);

        let pos = Position::new(1, 8);
        let offset = index.offset(pos).unwrap();
        assert_eq!(&text[usize::from(offset)..usize::from(offset) + 5], "count");
        assert_eq!(index.position(offset), pos);
    }

    #[test]
    fn out_of_range_line_is_none() {
        let index = LineIndex::new("one line");
        assert!(index.offset(Position::new(5, 0)).is_none());
    }

    #[test]
    fn column_past_end_is_none() {
        let index = LineIndex::new("ab");
        assert!(index.offset(Position::new(0, 3)).is_none());
        assert!(index.offset(Position::new(0, 2)).is_some());
    }

    #[test]
    fn span_covers_token() {
        let text = "a\nbb\nccc";
        let index = LineIndex::new(text);
        let range = TextRange::new(TextSize::new(2), TextSize::new(4));
        assert_eq!(index.span(range), Span::from_coords(1, 0, 1, 2));
    }
}
