#![warn(missing_docs)]
//! Selection Core - Headless Multi-Cursor Selection Engine
//!
//! # Overview
//!
//! `selection-core` is the selection engine of a headless modal editor. It
//! owns the anchor/active selection value model, the ordered never-empty
//! [`SelectionSet`], overlap merging, caret/block mode translation, and a
//! batch transform runner that applies per-selection functions without
//! forcing call sites to care whether those functions suspend. It does not
//! render, edit text, or keep history; the document is consumed read-only
//! through the [`Document`] trait.
//!
//! # Core Features
//!
//! - **Selection Algebra**: anchor/active pairs with derived start/end,
//!   direction, length, and line queries
//! - **Merge Engine**: deterministic overlap and touch merging that keeps
//!   first-seen order and direction
//! - **Mode Translation**: lossless-away-from-EOF conversion between caret
//!   selections and block-cursor selections
//! - **Batch Transforms**: filter/map/update over all selections, in index
//!   order, synchronous when possible and joined in one suspension otherwise
//! - **Pattern Utilities**: regex-backed split and select-within
//!
//! # Architecture Layers
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Batch Transform Runner (Eventual)           │  ← Command-facing API
//! ├──────────────────────────────────────────────┤
//! │  EditorContext (SelectionSet + Behavior)     │  ← Editing state
//! ├──────────────────────────────────────────────┤
//! │  Merge Engine & Mode Translator              │  ← Normalization
//! ├──────────────────────────────────────────────┤
//! │  Selection Algebra (anchor/active)           │  ← Value model
//! ├──────────────────────────────────────────────┤
//! │  Position & Document (Rope-backed)           │  ← Coordinates
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Merging overlapping selections
//!
//! ```rust
//! use selection_core::{Position, Selection, SelectionSet};
//!
//! let set = SelectionSet::new(vec![
//!     Selection::new(Position::new(0, 0), Position::new(0, 4)),
//!     Selection::new(Position::new(0, 3), Position::new(0, 7)),
//! ])
//! .unwrap();
//!
//! let merged = set.merge_overlapping();
//! assert_eq!(merged.len(), 1);
//! assert_eq!(merged.primary().end(), Position::new(0, 7));
//! ```
//!
//! ## Updating every selection at once
//!
//! ```rust
//! use futures::executor::block_on;
//! use selection_core::{
//!     EditorContext, Eventual, Position, Selection, SelectionSet, TextDocument, update_by_index,
//! };
//!
//! let doc = TextDocument::from_text("alpha\nbeta\ngamma");
//! let set = SelectionSet::new(vec![
//!     Selection::empty(Position::new(0, 0)),
//!     Selection::empty(Position::new(1, 0)),
//! ])
//! .unwrap();
//! let mut ctx = EditorContext::new(&doc, set);
//!
//! // Move every caret one line down
//! let result = update_by_index(&mut ctx, |_, selection, _| {
//!     Eventual::ready(Ok(Some(Selection::empty(Position::new(
//!         selection.active.line + 1,
//!         selection.active.column,
//!     )))))
//! });
//! block_on(result.into_future()).unwrap();
//!
//! assert_eq!(
//!     ctx.selections().primary(),
//!     Selection::empty(Position::new(1, 0)),
//! );
//! ```
//!
//! # Module Description
//!
//! - [`position`] - grapheme-aware position stepping
//! - [`document`] - the read-only [`Document`] trait and a rope-backed
//!   implementation
//! - [`selection`] - the anchor/active selection value model
//! - [`merge`] - overlap and touch merging
//! - [`display`] - caret/block selection mode translation
//! - [`matcher`] - regex-backed match and split ranges
//! - [`selection_set`] - the ordered never-empty selection container
//! - [`context`] - the editing context and reveal hook
//! - [`batch`] - the batch transform runner
//!
//! # Performance Notes
//!
//! - Merging is O(n²) in the worst case and near-linear for the common
//!   disjoint case
//! - An all-synchronous batch never touches an executor and allocates only
//!   the result vector
//!
//! # Unicode Support
//!
//! - UTF-8 internal encoding; columns count `char`s within a line
//! - Position stepping moves over whole grapheme clusters (emoji sequences,
//!   combining marks), so mode translation never splits a cluster

pub mod batch;
pub mod context;
pub mod display;
pub mod document;
pub mod matcher;
pub mod merge;
pub mod position;
pub mod selection;
pub mod selection_set;

pub use batch::{
    Eventual, SelectionOutcome, filter, filter_by_index, map, map_by_index, update,
    update_by_index, update_with_fallback,
};
pub use context::{EditorContext, RevealCallback, SelectionBehavior};
pub use display::{
    from_character_mode, selection_from_character_mode, selection_to_character_mode,
    to_character_mode,
};
pub use document::{Document, LineEnding, TextDocument};
pub use matcher::{MatchRange, match_ranges, split_ranges};
pub use merge::{merge_consecutive, merge_overlapping};
pub use position::{Position, first_position, last_position, next_position, prev_position};
pub use selection::{Selection, SelectionDirection, Shift};
pub use selection_set::{SelectionError, SelectionSet, select_within, split_selections};
