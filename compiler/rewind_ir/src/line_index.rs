//! Byte offset to line/column conversion.

use crate::Position;

/// Precomputed line starts for a source text.
///
/// `position()` is a binary search over line starts followed by a character
/// count within the line, so columns are correct for non-ASCII text.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offset of the first character of every line. Always starts with 0.
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(u32::try_from(offset + 1).unwrap_or(u32::MAX));
            }
        }
        LineIndex { line_starts }
    }

    /// Number of lines (a trailing newline opens an empty last line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line/column of `offset` in `source`.
    ///
    /// `source` must be the text this index was built from. Offsets past the
    /// end clamp to the end of the text.
    pub fn position(&self, source: &str, offset: u32) -> Position {
        let offset = offset.min(u32::try_from(source.len()).unwrap_or(u32::MAX));
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line] as usize;
        let column = source
            .get(line_start..offset as usize)
            .map_or(0, |text| text.chars().count());
        Position::new(
            u32::try_from(line + 1).unwrap_or(u32::MAX),
            u32::try_from(column + 1).unwrap_or(u32::MAX),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        let src = "class A {}";
        let index = LineIndex::new(src);
        assert_eq!(index.position(src, 0), Position::new(1, 1));
        assert_eq!(index.position(src, 6), Position::new(1, 7));
    }

    #[test]
    fn test_after_newlines() {
        let src = "a\nbc\n\nd";
        let index = LineIndex::new(src);
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.position(src, 2), Position::new(2, 1));
        assert_eq!(index.position(src, 3), Position::new(2, 2));
        assert_eq!(index.position(src, 6), Position::new(4, 1));
    }

    #[test]
    fn test_columns_count_chars() {
        let src = "é = x";
        let index = LineIndex::new(src);
        // 'é' is two bytes but one column.
        assert_eq!(index.position(src, 3), Position::new(1, 3));
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let src = "ab";
        let index = LineIndex::new(src);
        assert_eq!(index.position(src, 99), Position::new(1, 3));
    }
}
