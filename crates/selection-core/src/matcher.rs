//! Pattern matching over selection text.
//!
//! Split and select-within operations hand each selection's covered text to
//! this module and get back **character-offset** ranges (not byte offsets),
//! relative to that text. Patterns are regular expressions compiled with
//! multi-line mode on, so `^`/`$` anchor per line.

use regex::{Regex, RegexBuilder};

use crate::selection_set::SelectionError;

/// A half-open character range within a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRange {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

impl MatchRange {
    /// Returns the length of the range in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Character/byte offset mapping for one piece of text.
#[derive(Debug)]
pub(crate) struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    pub(crate) fn char_count(&self) -> usize {
        self.char_to_byte.len().saturating_sub(1)
    }

    pub(crate) fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex, SelectionError> {
    RegexBuilder::new(pattern)
        .multi_line(true)
        .build()
        .map_err(SelectionError::from)
}

/// All non-empty occurrences of `pattern` in `text`, as character ranges.
///
/// Empty matches are skipped: a zero-width selection is never a useful
/// select-within result and would multiply without bound.
pub fn match_ranges(text: &str, pattern: &str) -> Result<Vec<MatchRange>, SelectionError> {
    let re = compile_pattern(pattern)?;
    let index = CharIndex::new(text);

    let mut ranges: Vec<MatchRange> = Vec::new();
    for m in re.find_iter(text) {
        let candidate = MatchRange {
            start: index.byte_to_char(m.start()),
            end: index.byte_to_char(m.end()),
        };
        if candidate.is_empty() {
            continue;
        }
        ranges.push(candidate);
    }

    Ok(ranges)
}

/// The pieces of `text` left between occurrences of `pattern`.
///
/// Every gap is reported, including empty ones: splitting `"a,,b"` on `","`
/// yields three ranges, the middle one empty. Text with no match at all
/// comes back as one range covering everything.
pub fn split_ranges(text: &str, pattern: &str) -> Result<Vec<MatchRange>, SelectionError> {
    let matches = match_ranges(text, pattern)?;
    let index = CharIndex::new(text);

    let mut ranges: Vec<MatchRange> = Vec::with_capacity(matches.len() + 1);
    let mut gap_start = 0;
    for m in matches {
        ranges.push(MatchRange {
            start: gap_start,
            end: m.start,
        });
        gap_start = m.end;
    }
    ranges.push(MatchRange {
        start: gap_start,
        end: index.char_count(),
    });

    Ok(ranges)
}
