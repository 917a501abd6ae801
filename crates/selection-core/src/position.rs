//! Buffer positions and character-wise navigation.
//!
//! Positions are `(line, column)` pairs in **character** coordinates (not
//! bytes). Navigation steps over whole grapheme clusters, so a block cursor
//! never lands inside a combined character.

use unicode_segmentation::UnicodeSegmentation;

use crate::document::Document;

/// Cursor position in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (0-based)
    pub line: usize,
    /// Column number (0-based, in characters)
    pub column: usize,
}

impl Position {
    /// Create a new position
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

/// First position of any document.
pub fn first_position() -> Position {
    Position::new(0, 0)
}

/// Position just past the last character of `doc`.
pub fn last_position(doc: &dyn Document) -> Position {
    doc.position_at(doc.char_count())
}

/// The position one character after `pos`, or `None` at the end of the buffer.
///
/// Within a line this advances past the grapheme cluster under `pos`; at
/// end-of-line it crosses to column 0 of the next line.
pub fn next_position(doc: &dyn Document, pos: Position) -> Option<Position> {
    if pos.column < doc.line_len(pos.line) {
        let line = doc.line_text(pos.line)?;
        let step = grapheme_len_at(&line, pos.column);
        return Some(Position::new(pos.line, pos.column + step));
    }
    if pos.line + 1 < doc.line_count() {
        return Some(Position::new(pos.line + 1, 0));
    }
    None
}

/// The position one character before `pos`, or `None` at the start of the buffer.
///
/// At column 0 this crosses to the end of the previous line.
pub fn prev_position(doc: &dyn Document, pos: Position) -> Option<Position> {
    if pos.column > 0 {
        let line = doc.line_text(pos.line)?;
        let step = grapheme_len_before(&line, pos.column);
        return Some(Position::new(pos.line, pos.column - step));
    }
    if pos.line > 0 {
        return Some(Position::new(pos.line - 1, doc.line_len(pos.line - 1)));
    }
    None
}

/// Character length of the grapheme cluster covering `column`.
fn grapheme_len_at(line: &str, column: usize) -> usize {
    let mut start = 0;
    for cluster in line.graphemes(true) {
        let len = cluster.chars().count();
        if start + len > column {
            return start + len - column;
        }
        start += len;
    }
    1
}

/// Character length of the grapheme cluster ending at `column`.
fn grapheme_len_before(line: &str, column: usize) -> usize {
    let mut start = 0;
    for cluster in line.graphemes(true) {
        let len = cluster.chars().count();
        if start + len >= column {
            return column - start;
        }
        start += len;
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextDocument;

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(0, 5) < Position::new(1, 0));
        assert!(Position::new(1, 2) < Position::new(1, 3));
        assert_eq!(Position::new(2, 4), Position::new(2, 4));
    }

    #[test]
    fn test_next_position_within_line() {
        let doc = TextDocument::from_text("abc\ndef");

        assert_eq!(
            next_position(&doc, Position::new(0, 0)),
            Some(Position::new(0, 1))
        );
        assert_eq!(
            next_position(&doc, Position::new(0, 2)),
            Some(Position::new(0, 3))
        );
    }

    #[test]
    fn test_next_position_crosses_line() {
        let doc = TextDocument::from_text("abc\ndef");

        // From end-of-line to column 0 of the next line
        assert_eq!(
            next_position(&doc, Position::new(0, 3)),
            Some(Position::new(1, 0))
        );
    }

    #[test]
    fn test_next_position_at_buffer_end() {
        let doc = TextDocument::from_text("abc\ndef");

        assert_eq!(next_position(&doc, Position::new(1, 3)), None);
    }

    #[test]
    fn test_prev_position_within_line() {
        let doc = TextDocument::from_text("abc\ndef");

        assert_eq!(
            prev_position(&doc, Position::new(1, 2)),
            Some(Position::new(1, 1))
        );
    }

    #[test]
    fn test_prev_position_crosses_line() {
        let doc = TextDocument::from_text("abc\ndef");

        // From column 0 to the end of the previous line
        assert_eq!(
            prev_position(&doc, Position::new(1, 0)),
            Some(Position::new(0, 3))
        );
    }

    #[test]
    fn test_prev_position_at_buffer_start() {
        let doc = TextDocument::from_text("abc");

        assert_eq!(prev_position(&doc, Position::new(0, 0)), None);
    }

    #[test]
    fn test_grapheme_stepping() {
        // "🇺🇸" is one cluster made of two chars
        let doc = TextDocument::from_text("a🇺🇸b");

        assert_eq!(
            next_position(&doc, Position::new(0, 1)),
            Some(Position::new(0, 3))
        );
        assert_eq!(
            prev_position(&doc, Position::new(0, 3)),
            Some(Position::new(0, 1))
        );
    }

    #[test]
    fn test_combining_mark_stepping() {
        // "e\u{301}" renders as one cluster of two chars
        let doc = TextDocument::from_text("xe\u{301}y");

        assert_eq!(
            next_position(&doc, Position::new(0, 1)),
            Some(Position::new(0, 3))
        );
        assert_eq!(
            prev_position(&doc, Position::new(0, 3)),
            Some(Position::new(0, 1))
        );
    }

    #[test]
    fn test_first_last_position() {
        let doc = TextDocument::from_text("ab\ncd");

        assert_eq!(first_position(), Position::new(0, 0));
        assert_eq!(last_position(&doc), Position::new(1, 2));
    }

    #[test]
    fn test_last_position_trailing_newline() {
        let doc = TextDocument::from_text("ab\n");

        // The trailing break opens a final empty line
        assert_eq!(last_position(&doc), Position::new(1, 0));
    }
}
