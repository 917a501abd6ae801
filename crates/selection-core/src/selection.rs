//! Selection values and the algebra over them.
//!
//! A [`Selection`] is an ordered pair of positions: the `anchor` stays put
//! while the `active` end moves with the cursor. `start`/`end`/direction are
//! derived, never stored. Everything here is pure: operations take a
//! selection by value and return a new one.

use crate::context::{EditorContext, SelectionBehavior};
use crate::document::Document;
use crate::position::{Position, next_position, prev_position};

/// Direction a selection faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionDirection {
    /// Anchor at or before the active end.
    Forward,
    /// Active end before the anchor.
    Backward,
}

/// How [`Selection::shift`] treats the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    /// Move anchor and active both to the target: a plain cursor jump.
    Jump,
    /// Anchor at the old active end, active at the target: start a new selection.
    Select,
    /// Keep the anchor, move the active end: grow or shrink the selection.
    Extend,
}

/// A single cursor/selection range.
///
/// The covered span is the half-open character range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    /// The fixed end.
    pub anchor: Position,
    /// The moving end (where the cursor is).
    pub active: Position,
}

impl Selection {
    /// Create a selection from its two endpoints.
    pub fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    /// Empty selection at `position`.
    pub fn empty(position: Position) -> Self {
        Self::new(position, position)
    }

    /// Build from ordered endpoints; `direction` picks which one is the anchor.
    ///
    /// Callers pass `start <= end`; the pair is not re-ordered.
    pub fn from_start_end(start: Position, end: Position, direction: SelectionDirection) -> Self {
        match direction {
            SelectionDirection::Forward => Self::new(start, end),
            SelectionDirection::Backward => Self::new(end, start),
        }
    }

    /// Build a selection covering `len` characters from `start`.
    ///
    /// `len == 0` short-circuits to an empty selection without touching the
    /// document.
    pub fn from_length(
        doc: &dyn Document,
        start: Position,
        len: usize,
        direction: SelectionDirection,
    ) -> Self {
        if len == 0 {
            return Self::empty(start);
        }
        let end = doc.position_at(doc.offset_at(start) + len);
        Self::from_start_end(start, end, direction)
    }

    /// Earlier of the two endpoints.
    pub fn start(&self) -> Position {
        self.anchor.min(self.active)
    }

    /// Later of the two endpoints.
    pub fn end(&self) -> Position {
        self.anchor.max(self.active)
    }

    /// `true` when the active end precedes the anchor.
    pub fn is_reversed(&self) -> bool {
        self.active < self.anchor
    }

    /// `true` when both endpoints coincide.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// Direction the selection faces. Empty selections report `Forward`.
    pub fn direction(&self) -> SelectionDirection {
        if self.is_reversed() {
            SelectionDirection::Backward
        } else {
            SelectionDirection::Forward
        }
    }

    /// The same span facing forward.
    pub fn forward(&self) -> Self {
        if self.is_reversed() {
            Self::new(self.active, self.anchor)
        } else {
            *self
        }
    }

    /// The same span facing backward.
    pub fn backward(&self) -> Self {
        if self.is_reversed() {
            *self
        } else {
            Self::new(self.active, self.anchor)
        }
    }

    /// Anchor and active swapped.
    pub fn flip(&self) -> Self {
        Self::new(self.active, self.anchor)
    }

    /// The same span facing `direction`.
    pub fn with_direction(&self, direction: SelectionDirection) -> Self {
        match direction {
            SelectionDirection::Forward => self.forward(),
            SelectionDirection::Backward => self.backward(),
        }
    }

    /// `true` if `pos` lies on the selection, both boundaries inclusive.
    pub fn contains(&self, pos: Position) -> bool {
        self.start() <= pos && pos <= self.end()
    }

    /// Line the selection ends on.
    ///
    /// A non-empty selection whose `end` sits at column 0 of a later line is
    /// read as ending on the previous line (it covers that line's trailing
    /// break, not the next line's first character).
    pub fn end_line(&self) -> usize {
        let (start, end) = (self.start(), self.end());
        if !self.is_empty() && end.column == 0 && end.line > start.line {
            end.line - 1
        } else {
            end.line
        }
    }

    /// Column the selection ends at, under the [`Selection::end_line`] reading.
    ///
    /// In the column-0 case this is one past the previous line's length: the
    /// extra column stands for the covered line break.
    pub fn end_character(&self, doc: &dyn Document) -> usize {
        let (start, end) = (self.start(), self.end());
        if !self.is_empty() && end.column == 0 && end.line > start.line {
            doc.line_len(end.line - 1) + 1
        } else {
            end.column
        }
    }

    /// End position under the [`Selection::end_line`] reading.
    pub fn end_position(&self, doc: &dyn Document) -> Position {
        Position::new(self.end_line(), self.end_character(doc))
    }

    /// Line the active end sits on, with the end reading applied when the
    /// selection faces forward.
    pub fn active_line(&self) -> usize {
        if self.is_reversed() {
            self.active.line
        } else {
            self.end_line()
        }
    }

    /// Column of the active end, with the end reading applied when the
    /// selection faces forward.
    pub fn active_character(&self, doc: &dyn Document) -> usize {
        if self.is_reversed() {
            self.active.column
        } else {
            self.end_character(doc)
        }
    }

    /// Position of the active end, with the end reading applied when the
    /// selection faces forward.
    pub fn active_position(&self, doc: &dyn Document) -> Position {
        if self.is_reversed() {
            self.active
        } else {
            self.end_position(doc)
        }
    }

    /// `true` if the selection starts and ends on the same line.
    ///
    /// A selection ending at column 0 of the next line counts as single-line:
    /// it covers nothing beyond its start line's break.
    pub fn is_single_line(&self) -> bool {
        self.start().line == self.end_line()
    }

    /// `true` if the selection covers exactly one character.
    ///
    /// A lone line break counts as one character.
    pub fn is_single_character(&self, doc: &dyn Document) -> bool {
        self.length(doc) == 1
    }

    /// `true` if the selection covers exactly one full line, break included.
    pub fn is_entire_line(&self) -> bool {
        let (start, end) = (self.start(), self.end());
        start.column == 0 && end.column == 0 && end.line == start.line + 1
    }

    /// `true` if the selection covers one or more full lines, breaks included.
    pub fn is_entire_lines(&self) -> bool {
        let (start, end) = (self.start(), self.end());
        start.column == 0 && end.column == 0 && start.line != end.line
    }

    /// `true` if the first line of the selection is fully covered.
    pub fn starts_with_entire_line(&self) -> bool {
        let (start, end) = (self.start(), self.end());
        start.column == 0 && start.line != end.line
    }

    /// `true` if the selection ends exactly on a line boundary.
    pub fn ends_with_entire_line(&self) -> bool {
        let (start, end) = (self.start(), self.end());
        end.column == 0 && start.line != end.line
    }

    /// `true` if the line holding the active end is fully covered.
    pub fn active_line_is_fully_selected(&self) -> bool {
        if self.is_reversed() {
            self.starts_with_entire_line()
        } else {
            self.ends_with_entire_line()
        }
    }

    /// `true` if a motion in `direction` from the active end shrinks the
    /// selection.
    ///
    /// Empty selections report `true` for `Backward`.
    pub fn is_moving_towards_anchor(&self, direction: SelectionDirection) -> bool {
        match direction {
            SelectionDirection::Forward => self.is_reversed(),
            SelectionDirection::Backward => !self.is_reversed(),
        }
    }

    /// Number of characters covered.
    ///
    /// Stays on column arithmetic for single-line selections; only cross-line
    /// selections pay for offset conversion.
    pub fn length(&self, doc: &dyn Document) -> usize {
        let (start, end) = (self.start(), self.end());
        if start.line == end.line {
            end.column - start.column
        } else {
            doc.offset_at(end) - doc.offset_at(start)
        }
    }

    /// Text covered by the selection.
    pub fn text(&self, doc: &dyn Document) -> String {
        doc.text_between(self.start(), self.end())
    }

    /// Move the active end to `pos`, picking the anchor per `kind`.
    ///
    /// In Character mode the anchor of a non-Jump shift is routed through
    /// [`Selection::seek_from`], so the character under the old block cursor
    /// stays inside the new selection.
    pub fn shift(&self, pos: Position, kind: Shift, ctx: &EditorContext<'_>) -> Selection {
        let anchor = match kind {
            Shift::Jump => pos,
            Shift::Select => self.active,
            Shift::Extend => self.anchor,
        };
        let anchor = if kind != Shift::Jump && ctx.behavior() == SelectionBehavior::Character {
            let direction = if pos >= anchor {
                SelectionDirection::Forward
            } else {
                SelectionDirection::Backward
            };
            self.seek_from(direction, anchor, ctx)
        } else {
            anchor
        };
        Selection::new(anchor, pos)
    }

    /// Like [`Selection::shift`] for a motion facing `direction`.
    ///
    /// In Character mode a backward motion targets the character *under* the
    /// block at `pos`, so the position is advanced by one first to keep the
    /// resulting block oriented correctly.
    pub fn shift_towards(
        &self,
        pos: Position,
        kind: Shift,
        direction: SelectionDirection,
        ctx: &EditorContext<'_>,
    ) -> Selection {
        let pos = if ctx.behavior() == SelectionBehavior::Character
            && direction == SelectionDirection::Backward
        {
            next_position(ctx.document(), pos).unwrap_or(pos)
        } else {
            pos
        };
        self.shift(pos, kind, ctx)
    }

    /// Adjust a seek origin so it includes the character under a block cursor.
    ///
    /// In Character mode, when `pos` sits exactly on the boundary of a
    /// non-empty selection implied by `direction` (Forward: the end, Backward:
    /// the start), the adjacent character position is returned instead. In
    /// Caret mode, or anywhere else, `pos` comes back unchanged. Empty
    /// selections already face their character and are never adjusted.
    pub fn seek_from(
        &self,
        direction: SelectionDirection,
        pos: Position,
        ctx: &EditorContext<'_>,
    ) -> Position {
        if ctx.behavior() != SelectionBehavior::Character || self.is_empty() {
            return pos;
        }
        let doc = ctx.document();
        match direction {
            SelectionDirection::Forward if pos == self.end() => {
                prev_position(doc, pos).unwrap_or(pos)
            }
            SelectionDirection::Backward if pos == self.start() => {
                next_position(doc, pos).unwrap_or(pos)
            }
            _ => pos,
        }
    }
}
