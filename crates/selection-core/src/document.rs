//! Document access for the selection engine.
//!
//! The engine never owns the text it operates on. [`Document`] is the minimal
//! read-only surface it needs: line metrics and offset/position conversion,
//! all in character coordinates. [`TextDocument`] is a rope-backed reference
//! implementation used by the test suite and by embedders that do not bring
//! their own buffer.

use ropey::Rope;

use crate::position::Position;

/// Line ending convention of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix style (`\n`)
    #[default]
    Lf,
    /// Windows style (`\r\n`)
    Crlf,
}

impl LineEnding {
    /// Detect the convention used by `text`, defaulting to LF.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// The break sequence for this convention.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }

    /// Rewrite LF-normalized `text` with this convention's breaks.
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            Self::Crlf => text.replace('\n', "\r\n"),
        }
    }
}

/// Read-only view of a text buffer.
///
/// Lines are 0-based and columns count characters, excluding the line break.
/// Implementations expose LF-normalized content (every break is one
/// character) and are expected to clamp out-of-range input rather than panic:
/// the engine assumes positions handed to it lie within bounds and does not
/// re-validate them.
pub trait Document {
    /// Total number of lines. Never 0: an empty buffer has one empty line.
    fn line_count(&self) -> usize;

    /// Character length of `line`, excluding its break. 0 when out of range.
    fn line_len(&self, line: usize) -> usize;

    /// Text of `line` without its break, or `None` when out of range.
    fn line_text(&self, line: usize) -> Option<String>;

    /// Total character count, one per line break.
    fn char_count(&self) -> usize;

    /// Linear character offset of `pos`.
    fn offset_at(&self, pos: Position) -> usize;

    /// Position of the character at `offset`.
    fn position_at(&self, offset: usize) -> Position;

    /// Line ending convention the document was loaded with.
    fn line_ending(&self) -> LineEnding {
        LineEnding::Lf
    }

    /// Position just past the last character of the buffer.
    fn last_position(&self) -> Position {
        self.position_at(self.char_count())
    }

    /// Text covered by `[start, end)`, breaks included.
    fn text_between(&self, start: Position, end: Position) -> String {
        if end <= start {
            return String::new();
        }
        if start.line == end.line {
            let line = self.line_text(start.line).unwrap_or_default();
            return line
                .chars()
                .skip(start.column)
                .take(end.column - start.column)
                .collect();
        }
        let mut text = String::new();
        for line_no in start.line..end.line.min(self.line_count()) {
            let line = self.line_text(line_no).unwrap_or_default();
            if line_no == start.line {
                text.extend(line.chars().skip(start.column));
            } else {
                text.push_str(&line);
            }
            text.push('\n');
        }
        if let Some(line) = self.line_text(end.line) {
            text.extend(line.chars().take(end.column));
        }
        text
    }
}

/// Rope-backed [`Document`] implementation.
///
/// Rope storage keeps line access and offset conversion at O(log N), so large
/// buffers stay cheap to query. Text is normalized to LF internally; the
/// detected [`LineEnding`] is kept so [`TextDocument::text`] can restore it.
#[derive(Debug, Clone)]
pub struct TextDocument {
    rope: Rope,
    line_ending: LineEnding,
}

impl TextDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            line_ending: LineEnding::Lf,
        }
    }

    /// Build a document from text, detecting and normalizing its line endings.
    pub fn from_text(text: &str) -> Self {
        let line_ending = LineEnding::detect(text);
        let normalized;
        let source = if line_ending == LineEnding::Crlf {
            normalized = text.replace("\r\n", "\n");
            normalized.as_str()
        } else {
            text
        };
        Self {
            rope: Rope::from_str(source),
            line_ending,
        }
    }

    /// Full text with the original line ending restored.
    pub fn text(&self) -> String {
        self.line_ending.apply(&self.rope.to_string())
    }
}

impl Default for TextDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for TextDocument {
    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line_len(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let start = self.rope.line_to_char(line);
        if line + 1 < self.rope.len_lines() {
            self.rope.line_to_char(line + 1) - start - 1 // -1 for the newline
        } else {
            self.rope.len_chars() - start
        }
    }

    fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }

        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }

        Some(text)
    }

    fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    fn offset_at(&self, pos: Position) -> usize {
        if pos.line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        let start = self.rope.line_to_char(pos.line);
        start + pos.column.min(self.line_len(pos.line))
    }

    fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        Position::new(line, offset - self.rope.line_to_char(line))
    }

    fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    fn text_between(&self, start: Position, end: Position) -> String {
        let start = self.offset_at(start);
        let end = self.offset_at(end).max(start);
        self.rope.slice(start..end).to_string()
    }
}
