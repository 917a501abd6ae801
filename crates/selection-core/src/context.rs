//! The editing context shared by every selection transform.
//!
//! An [`EditorContext`] ties together the document being edited, the current
//! [`SelectionSet`], the active [`SelectionBehavior`], and the reveal hook
//! that scrolls the primary selection into view after a committed update.

use crate::document::Document;
use crate::selection::Selection;
use crate::selection_set::{SelectionError, SelectionSet};

/// How selections are presented and navigated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionBehavior {
    /// A thin caret sits between characters; empty selections are the norm.
    #[default]
    Caret,

    /// A block cursor covers at least one character, so the position under
    /// the cursor counts as part of the selection.
    Character,
}

/// Callback invoked with the primary selection after every committed update.
pub type RevealCallback = Box<dyn FnMut(&Selection)>;

/// The mutable editing state a batch of selection transforms runs against.
pub struct EditorContext<'d> {
    document: &'d dyn Document,
    selections: SelectionSet,
    behavior: SelectionBehavior,
    reveal: Option<RevealCallback>,
}

impl<'d> EditorContext<'d> {
    /// Creates a context over `document` with an initial selection set and
    /// the default caret behavior.
    pub fn new(document: &'d dyn Document, selections: SelectionSet) -> Self {
        Self {
            document,
            selections,
            behavior: SelectionBehavior::default(),
            reveal: None,
        }
    }

    /// Returns the document this context reads from.
    pub fn document(&self) -> &'d dyn Document {
        self.document
    }

    /// Returns the current selection set.
    pub fn selections(&self) -> &SelectionSet {
        &self.selections
    }

    /// Returns the active selection behavior.
    pub fn behavior(&self) -> SelectionBehavior {
        self.behavior
    }

    /// Switches the active selection behavior.
    pub fn set_behavior(&mut self, behavior: SelectionBehavior) {
        self.behavior = behavior;
    }

    /// Replaces the current selection set without revealing anything.
    ///
    /// Rejects an empty list with [`SelectionError::EmptySelectionSet`]; the
    /// existing set is kept on failure.
    pub fn set_selections(&mut self, selections: Vec<Selection>) -> Result<(), SelectionError> {
        self.selections = SelectionSet::new(selections)?;
        Ok(())
    }

    /// Registers the callback invoked with the primary selection after each
    /// committed update.
    pub fn on_reveal(&mut self, callback: impl FnMut(&Selection) + 'static) {
        self.reveal = Some(Box::new(callback));
    }

    /// Commits `selections` as the new current set and reveals the primary
    /// selection.
    ///
    /// Fails with [`SelectionError::NoSelections`] when the list is empty;
    /// the prior set survives unchanged and nothing is revealed.
    pub(crate) fn commit(&mut self, selections: Vec<Selection>) -> Result<(), SelectionError> {
        if selections.is_empty() {
            log::debug!("rejecting empty commit");
            return Err(SelectionError::NoSelections);
        }
        log::debug!("committing {} selection(s)", selections.len());
        self.selections = SelectionSet::from_vec_unchecked(selections);
        if let Some(reveal) = self.reveal.as_mut() {
            reveal(&self.selections.primary());
        }
        Ok(())
    }
}
