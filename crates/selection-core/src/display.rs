//! Translation between caret and block-cursor selection conventions.
//!
//! Logically the engine works with caret selections: an empty selection is a
//! zero-width cursor between characters. Some frontends render every cursor
//! as a one-character block instead. Under that convention an empty caret at
//! P is shown as the block `[P, next(P))`, and a forward selection ending at
//! E is shown with its block on `previous(E)`. The two functions here convert
//! a whole selection list between the conventions.
//!
//! Both directions step by grapheme cluster, so the conversions invert each
//! other away from the end of the buffer:
//! `from_character_mode(to_character_mode(s)) == s` for forward non-empty
//! `s`, and `to_character_mode(from_character_mode(s)) == s` for empty `s`.

use crate::document::Document;
use crate::position::{next_position, prev_position};
use crate::selection::{Selection, SelectionDirection};

/// Convert one logical selection to its block-cursor form.
///
/// Forward selections give up their last character to the block: a
/// one-character selection becomes an empty selection at its anchor, a longer
/// one has its active end stepped back (landing at the end of the previous
/// line when the active end sat at column 0). A reversed selection covering
/// exactly one character becomes an empty selection at its active end; other
/// reversed selections and empty selections pass through unchanged.
pub fn selection_to_character_mode(sel: Selection, doc: &dyn Document) -> Selection {
    if sel.is_empty() {
        return sel;
    }

    if sel.is_reversed() {
        if next_position(doc, sel.active) == Some(sel.anchor) {
            return Selection::empty(sel.active);
        }
        return sel;
    }

    match prev_position(doc, sel.active) {
        Some(prev) if prev == sel.anchor => Selection::empty(sel.anchor),
        Some(prev) => Selection::new(sel.anchor, prev),
        None => sel,
    }
}

/// Convert one block-cursor selection back to its logical form.
///
/// Only empty or forward-facing selections are extended: the active end steps
/// forward one character, crossing to column 0 of the next line when it sat
/// at end-of-line. At the very last position of the buffer there is nothing
/// to extend over and the selection passes through unchanged, as do reversed
/// selections (wherever they sit, including the start of the buffer).
///
/// `direction = Some(Backward)` makes a just-extended single-character result
/// come out reversed, so a block produced by a backward motion faces its
/// cursor correctly.
pub fn selection_from_character_mode(
    sel: Selection,
    doc: &dyn Document,
    direction: Option<SelectionDirection>,
) -> Selection {
    if sel.is_reversed() {
        return sel;
    }

    let Some(next) = next_position(doc, sel.active) else {
        return sel;
    };

    if sel.is_empty() && direction == Some(SelectionDirection::Backward) {
        return Selection::new(next, sel.active);
    }

    Selection::new(sel.anchor, next)
}

/// [`selection_to_character_mode`] over a whole selection list.
pub fn to_character_mode(selections: &[Selection], doc: &dyn Document) -> Vec<Selection> {
    selections
        .iter()
        .map(|&sel| selection_to_character_mode(sel, doc))
        .collect()
}

/// [`selection_from_character_mode`] over a whole selection list.
pub fn from_character_mode(
    selections: &[Selection],
    doc: &dyn Document,
    direction: Option<SelectionDirection>,
) -> Vec<Selection> {
    selections
        .iter()
        .map(|&sel| selection_from_character_mode(sel, doc, direction))
        .collect()
}
