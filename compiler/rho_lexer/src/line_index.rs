//! Byte offset to line/column conversion.

use rho_ir::{Position, Span};

/// Start offsets of every line in a source text.
#[derive(Clone, Debug)]
pub struct LineIndex<'src> {
    source: &'src str,
    line_starts: Vec<u32>,
}

impl<'src> LineIndex<'src> {
    pub fn new(source: &'src str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'\n')
                    .map(|(i, _)| i as u32 + 1),
            )
            .collect();
        LineIndex {
            source,
            line_starts,
        }
    }

    /// 1-based line and column (columns count characters, not bytes).
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&(offset as u32)) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line] as usize;
        let col = self
            .source
            .get(line_start..offset)
            .map_or(offset - line_start, |text| text.chars().count());
        Position::new(offset as u32, line as u32 + 1, col as u32 + 1)
    }

    pub fn span(&self, range: std::ops::Range<usize>) -> Span {
        Span::new(self.position(range.start), self.position(range.end))
    }
}
