//! Ordered, never-empty selection containers and set-level utilities.
//!
//! A [`SelectionSet`] holds at least one selection at all times. Order is
//! meaningful: the selection at index 0 is the primary one, and per-index
//! batch operations, rotation, and register correlation all rely on index
//! identity being stable across reads.

use std::ops::Index;
use std::slice;

use thiserror::Error;

use crate::context::EditorContext;
use crate::document::Document;
use crate::matcher::{self, MatchRange};
use crate::merge;
use crate::position::{Position, prev_position};
use crate::selection::Selection;

/// Errors produced by selection-set construction and transforms.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// A selection set was constructed from, or replaced with, an empty list.
    #[error("a selection set must contain at least one selection")]
    EmptySelectionSet,

    /// A committed transform would have left no selections behind.
    #[error("operation would leave no selections")]
    NoSelections,

    /// A split or select-within pattern failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A per-selection function reported a failure of its own.
    #[error("{0}")]
    Other(String),
}

/// An ordered sequence of selections with at least one element.
///
/// The selection at index 0 is the primary selection. Every operation that
/// returns a new set preserves the invariant that the set is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    selections: Vec<Selection>,
}

impl SelectionSet {
    /// Creates a selection set from a list of selections.
    ///
    /// Fails with [`SelectionError::EmptySelectionSet`] if the list is empty.
    pub fn new(selections: Vec<Selection>) -> Result<Self, SelectionError> {
        if selections.is_empty() {
            return Err(SelectionError::EmptySelectionSet);
        }
        Ok(Self { selections })
    }

    /// Creates a selection set containing a single selection.
    pub fn single(selection: Selection) -> Self {
        Self {
            selections: vec![selection],
        }
    }

    /// Internal constructor for lists already known to be non-empty.
    pub(crate) fn from_vec_unchecked(selections: Vec<Selection>) -> Self {
        debug_assert!(!selections.is_empty());
        Self { selections }
    }

    /// Returns the primary selection, the one at index 0.
    pub fn primary(&self) -> Selection {
        self.selections[0]
    }

    /// Returns the number of selections in the set.
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Always `false`: a selection set cannot be empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the selections as a slice, in set order.
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Consumes the set and returns the underlying list.
    pub fn into_vec(self) -> Vec<Selection> {
        self.selections
    }

    /// Iterates over the selections in set order.
    pub fn iter(&self) -> slice::Iter<'_, Selection> {
        self.selections.iter()
    }

    /// Returns `true` if any selection in the set contains `pos`.
    pub fn contains(&self, pos: Position) -> bool {
        self.selections
            .iter()
            .any(|selection| selection.contains(pos))
    }

    /// Returns a new set with every selection moved from index `i` to
    /// `(i + by) mod len`.
    ///
    /// Rotating by one makes the last selection primary. `by` may be
    /// negative or larger than the set; it is normalized first. A rotation
    /// of zero still returns a fresh copy.
    pub fn rotate(&self, by: isize) -> SelectionSet {
        let len = self.selections.len();
        let by = by.rem_euclid(len as isize) as usize;
        let mut selections = self.selections.clone();
        selections.rotate_right(by);
        Self { selections }
    }

    /// Returns a new set stably sorted by start position, earliest first.
    pub fn sort_top_to_bottom(&self) -> SelectionSet {
        let mut selections = self.selections.clone();
        selections.sort_by(|a, b| a.start().cmp(&b.start()));
        Self { selections }
    }

    /// Returns a new set stably sorted by start position, latest first.
    pub fn sort_bottom_to_top(&self) -> SelectionSet {
        let mut selections = self.selections.clone();
        selections.sort_by(|a, b| b.start().cmp(&a.start()));
        Self { selections }
    }

    /// Collects, in traversal order, every line touched by a selection.
    ///
    /// Only the start line and end line of each selection are checked
    /// against already-collected lines. Interior lines are pushed unchecked;
    /// disjoint selections cannot revisit them.
    pub fn lines(&self) -> Vec<usize> {
        let mut lines: Vec<usize> = Vec::new();
        for selection in &self.selections {
            let start_line = selection.start().line;
            let end_line = selection.end_line();
            for line in start_line..=end_line {
                let is_boundary = line == start_line || line == end_line;
                if is_boundary && lines.contains(&line) {
                    continue;
                }
                lines.push(line);
            }
        }
        lines
    }

    /// Returns a new set with every empty selection moved one character
    /// earlier. Empty selections at the start of the buffer and non-empty
    /// selections are left as they are.
    pub fn shift_empty_left(&self, doc: &dyn Document) -> SelectionSet {
        let selections = self
            .selections
            .iter()
            .map(|selection| {
                if !selection.is_empty() {
                    return *selection;
                }
                match prev_position(doc, selection.active) {
                    Some(pos) => Selection::empty(pos),
                    None => *selection,
                }
            })
            .collect();
        Self { selections }
    }

    /// Returns a new set with overlapping selections merged.
    pub fn merge_overlapping(&self) -> SelectionSet {
        Self {
            selections: merge::merge_overlapping(&self.selections),
        }
    }

    /// Returns a new set with overlapping and touching selections merged.
    pub fn merge_consecutive(&self) -> SelectionSet {
        Self {
            selections: merge::merge_consecutive(&self.selections),
        }
    }
}

impl Index<usize> for SelectionSet {
    type Output = Selection;

    fn index(&self, index: usize) -> &Selection {
        &self.selections[index]
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a Selection;
    type IntoIter = slice::Iter<'a, Selection>;

    fn into_iter(self) -> Self::IntoIter {
        self.selections.iter()
    }
}

impl TryFrom<Vec<Selection>> for SelectionSet {
    type Error = SelectionError;

    fn try_from(selections: Vec<Selection>) -> Result<Self, Self::Error> {
        Self::new(selections)
    }
}

fn ranges_to_selections(
    doc: &dyn Document,
    parent: &Selection,
    ranges: &[MatchRange],
) -> Vec<Selection> {
    let base = doc.offset_at(parent.start());
    let direction = parent.direction();
    ranges
        .iter()
        .map(|range| {
            let start = doc.position_at(base + range.start);
            let end = doc.position_at(base + range.end);
            Selection::from_start_end(start, end, direction)
        })
        .collect()
}

/// Splits every selection in the context around occurrences of `pattern`.
///
/// Each selection is replaced by the gaps between matches within its covered
/// text, including empty gaps. The produced selections inherit their parent's
/// direction and are concatenated in input order.
pub fn split_selections(
    ctx: &EditorContext<'_>,
    pattern: &str,
) -> Result<Vec<Selection>, SelectionError> {
    let doc = ctx.document();
    let mut out: Vec<Selection> = Vec::new();
    for selection in ctx.selections() {
        let text = selection.text(doc);
        let ranges = matcher::split_ranges(&text, pattern)?;
        out.extend(ranges_to_selections(doc, selection, &ranges));
    }
    Ok(out)
}

/// Selects every occurrence of `pattern` within each selection of the
/// context.
///
/// Empty matches are skipped. The produced selections inherit their parent's
/// direction and are concatenated in input order.
pub fn select_within(
    ctx: &EditorContext<'_>,
    pattern: &str,
) -> Result<Vec<Selection>, SelectionError> {
    let doc = ctx.document();
    let mut out: Vec<Selection> = Vec::new();
    for selection in ctx.selections() {
        let text = selection.text(doc);
        let ranges = matcher::match_ranges(&text, pattern)?;
        out.extend(ranges_to_selections(doc, selection, &ranges));
    }
    Ok(out)
}
