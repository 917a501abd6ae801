//! Batch application of per-selection transforms.
//!
//! Commands run a function over every selection of the current set. The
//! function may produce its result immediately or suspend, and [`Eventual`]
//! carries that distinction outward so an all-synchronous batch never touches
//! an executor. Three guarantees hold regardless of suspension:
//!
//! - Results are assembled in input index order.
//! - Once one call suspends, every remaining call is invoked immediately and
//!   all pending work is joined in a single suspension.
//! - Updates commit atomically: on any error the prior selection set
//!   survives unchanged and nothing is revealed.

use std::fmt;
use std::future::Future;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};

use crate::context::EditorContext;
use crate::document::Document;
use crate::selection::Selection;
use crate::selection_set::SelectionError;

/// A value that is either available now or still being computed.
pub enum Eventual<'a, T> {
    /// The value is already available; no executor involved.
    Ready(T),
    /// The value arrives once the carried future is driven to completion.
    Pending(LocalBoxFuture<'a, T>),
}

impl<'a, T: 'a> Eventual<'a, T> {
    /// Wraps an already-computed value.
    pub fn ready(value: T) -> Self {
        Eventual::Ready(value)
    }

    /// Wraps a computation that has to be awaited.
    pub fn pending(future: impl Future<Output = T> + 'a) -> Self {
        Eventual::Pending(future.boxed_local())
    }

    /// Returns `true` if the value is available without awaiting.
    pub fn is_ready(&self) -> bool {
        matches!(self, Eventual::Ready(_))
    }

    /// Converts into a future resolving to the value either way.
    pub fn into_future(self) -> LocalBoxFuture<'a, T> {
        match self {
            Eventual::Ready(value) => future::ready(value).boxed_local(),
            Eventual::Pending(future) => future,
        }
    }

    /// Applies `f` to the eventual value without forcing a suspension.
    pub fn map<U: 'a>(self, f: impl FnOnce(T) -> U + 'a) -> Eventual<'a, U> {
        match self {
            Eventual::Ready(value) => Eventual::Ready(f(value)),
            Eventual::Pending(future) => Eventual::Pending(future.map(f).boxed_local()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Eventual<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eventual::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Eventual::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Per-selection result of a fallback-aware update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// A selection to keep.
    Selection(Selection),
    /// A stand-in, used only when no call produced a real selection.
    Fallback(Selection),
    /// No selection for this slot.
    Discard,
}

/// Runs `f` over `selections`, collecting results in index order.
///
/// Calls proceed synchronously while results come back `Ready`. At the first
/// `Pending` result the remaining calls are all issued immediately and the
/// outstanding futures are joined in one suspension. The first `Err`, in
/// index order, aborts the batch.
fn run_batch<'d, T, F>(
    doc: &'d dyn Document,
    selections: Vec<Selection>,
    mut f: F,
) -> Eventual<'d, Result<Vec<T>, SelectionError>>
where
    T: 'd,
    F: FnMut(usize, Selection, &'d dyn Document) -> Eventual<'d, Result<T, SelectionError>>,
{
    let mut ready: Vec<T> = Vec::with_capacity(selections.len());
    let mut iter = selections.into_iter().enumerate();
    while let Some((index, selection)) = iter.next() {
        match f(index, selection, doc) {
            Eventual::Ready(Ok(value)) => ready.push(value),
            Eventual::Ready(Err(err)) => return Eventual::Ready(Err(err)),
            Eventual::Pending(first) => {
                log::trace!("batch suspended at index {index}");
                let mut pending: Vec<LocalBoxFuture<'d, Result<T, SelectionError>>> = vec![first];
                for (index, selection) in iter.by_ref() {
                    pending.push(f(index, selection, doc).into_future());
                }
                return Eventual::Pending(
                    async move {
                        let late = future::join_all(pending).await;
                        let mut values = ready;
                        for result in late {
                            values.push(result?);
                        }
                        Ok(values)
                    }
                    .boxed_local(),
                );
            }
        }
    }
    Eventual::Ready(Ok(ready))
}

/// Commits an eventual selection list into the context.
fn commit_eventual<'c, 'd: 'c>(
    ctx: &'c mut EditorContext<'d>,
    selections: Eventual<'d, Result<Vec<Selection>, SelectionError>>,
) -> Eventual<'c, Result<(), SelectionError>> {
    match selections {
        Eventual::Ready(Ok(selections)) => Eventual::Ready(ctx.commit(selections)),
        Eventual::Ready(Err(err)) => Eventual::Ready(Err(err)),
        Eventual::Pending(future) => Eventual::Pending(
            async move {
                let selections = future.await?;
                ctx.commit(selections)
            }
            .boxed_local(),
        ),
    }
}

/// Maps every selection through `f`, keeping the `Some` results in index
/// order.
pub fn map_by_index<'d, F>(
    ctx: &EditorContext<'d>,
    f: F,
) -> Eventual<'d, Result<Vec<Selection>, SelectionError>>
where
    F: FnMut(usize, Selection, &'d dyn Document) -> Eventual<'d, Result<Option<Selection>, SelectionError>>,
{
    let snapshot = ctx.selections().selections().to_vec();
    run_batch(ctx.document(), snapshot, f)
        .map(|results| results.map(|options| options.into_iter().flatten().collect()))
}

/// Keeps the selections for which `f` returns `true`, in index order.
pub fn filter_by_index<'d, F>(
    ctx: &EditorContext<'d>,
    mut f: F,
) -> Eventual<'d, Result<Vec<Selection>, SelectionError>>
where
    F: FnMut(usize, Selection, &'d dyn Document) -> Eventual<'d, Result<bool, SelectionError>>,
{
    map_by_index(ctx, move |index, selection, doc| {
        f(index, selection, doc).map(move |keep| keep.map(|keep| keep.then_some(selection)))
    })
}

/// Maps every selection through `f` and commits the surviving results as the
/// new current set, revealing the primary selection.
pub fn update_by_index<'c, 'd, F>(
    ctx: &'c mut EditorContext<'d>,
    f: F,
) -> Eventual<'c, Result<(), SelectionError>>
where
    'd: 'c,
    F: FnMut(usize, Selection, &'d dyn Document) -> Eventual<'d, Result<Option<Selection>, SelectionError>>,
{
    let snapshot = ctx.selections().selections().to_vec();
    let mapped = run_batch(ctx.document(), snapshot, f)
        .map(|results| results.map(|options| options.into_iter().flatten().collect()));
    commit_eventual(ctx, mapped)
}

/// Like [`map_by_index`], with each selection's covered text resolved first.
pub fn map<'d, F>(
    ctx: &EditorContext<'d>,
    mut f: F,
) -> Eventual<'d, Result<Vec<Selection>, SelectionError>>
where
    F: FnMut(usize, String, Selection) -> Eventual<'d, Result<Option<Selection>, SelectionError>>,
{
    map_by_index(ctx, move |index, selection, doc| {
        f(index, selection.text(doc), selection)
    })
}

/// Like [`filter_by_index`], with each selection's covered text resolved
/// first.
pub fn filter<'d, F>(
    ctx: &EditorContext<'d>,
    mut f: F,
) -> Eventual<'d, Result<Vec<Selection>, SelectionError>>
where
    F: FnMut(usize, String, Selection) -> Eventual<'d, Result<bool, SelectionError>>,
{
    filter_by_index(ctx, move |index, selection, doc| {
        f(index, selection.text(doc), selection)
    })
}

/// Like [`update_by_index`], with each selection's covered text resolved
/// first.
pub fn update<'c, 'd, F>(
    ctx: &'c mut EditorContext<'d>,
    mut f: F,
) -> Eventual<'c, Result<(), SelectionError>>
where
    'd: 'c,
    F: FnMut(usize, String, Selection) -> Eventual<'d, Result<Option<Selection>, SelectionError>>,
{
    update_by_index(ctx, move |index, selection, doc| {
        f(index, selection.text(doc), selection)
    })
}

fn resolve_outcomes(outcomes: Vec<SelectionOutcome>) -> Vec<Selection> {
    let mut real: Vec<Selection> = Vec::new();
    let mut fallback: Vec<Selection> = Vec::new();
    for outcome in outcomes {
        match outcome {
            SelectionOutcome::Selection(selection) => real.push(selection),
            SelectionOutcome::Fallback(selection) => fallback.push(selection),
            SelectionOutcome::Discard => {}
        }
    }
    if real.is_empty() {
        if !fallback.is_empty() {
            log::trace!("no selections survived, using {} fallback(s)", fallback.len());
        }
        fallback
    } else {
        real
    }
}

/// Updates the selection set from per-selection outcomes with a fallback
/// protocol.
///
/// When at least one call produces [`SelectionOutcome::Selection`], only
/// those are kept. Otherwise the [`SelectionOutcome::Fallback`] stand-ins are
/// used. If neither exists the update fails with
/// [`SelectionError::NoSelections`] and the prior set survives.
pub fn update_with_fallback<'c, 'd, F>(
    ctx: &'c mut EditorContext<'d>,
    f: F,
) -> Eventual<'c, Result<(), SelectionError>>
where
    'd: 'c,
    F: FnMut(usize, Selection, &'d dyn Document) -> Eventual<'d, Result<SelectionOutcome, SelectionError>>,
{
    let snapshot = ctx.selections().selections().to_vec();
    let resolved =
        run_batch(ctx.document(), snapshot, f).map(|results| results.map(resolve_outcomes));
    commit_eventual(ctx, resolved)
}
