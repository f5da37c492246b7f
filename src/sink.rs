//! Change sinks and the generic change traversal.
//!
//! A [`ChangeSink`] receives three primitive callbacks. The provided
//! [`ChangeSink::apply_diff`] walks a resolved [`DiffContext`] once and
//! drives those callbacks in index order, so every output shape (unordered
//! buckets, replayable steps, a UI adapter) shares the same move detection.
//!
//! # Order of callbacks
//!
//! 1. `delete` for every old position without a counterpart, ascending
//! 2. `insert` / `update_or_move` while walking the new positions, ascending

use crate::algo::{DiffContext, Reference};

// =============================================================================
// ChangeSink
// =============================================================================

/// Consumer of primitive diff callbacks.
pub trait ChangeSink<T> {
    /// `element` was inserted at `index` of the new sequence.
    fn insert(&mut self, element: &T, index: usize);

    /// The element at `index` of the old sequence was deleted.
    fn delete(&mut self, index: usize);

    /// A paired element was updated, moved, or both.
    ///
    /// Never called with both flags false. A sink must accept the combined
    /// `updated && moved` case.
    fn update_or_move(
        &mut self,
        old_element: &T,
        old_index: usize,
        new_element: &T,
        new_index: usize,
        updated: bool,
        moved: bool,
    );

    /// Walk a resolved context and emit its changes into this sink.
    fn apply_diff(&mut self, ctx: &DiffContext<T>)
    where
        T: PartialEq,
    {
        let old = ctx.old();
        let new = ctx.new_sequence();

        // Deletions among old positions before j
        let mut delete_offsets = Vec::with_capacity(old.len());
        let mut running = 0usize;

        for (j, reference) in ctx.old_references().iter().enumerate() {
            delete_offsets.push(running);
            if !reference.is_resolved() {
                self.delete(j);
                running += 1;
            }
        }

        running = 0;

        for (i, reference) in ctx.new_references().iter().enumerate() {
            match reference {
                Reference::Unresolved(_) => {
                    self.insert(&new[i], i);
                    running += 1;
                }
                Reference::Resolved(j) => {
                    let j = *j;
                    let (old_element, new_element) = (&old[j], &new[i]);

                    // Not where deletions and insertions so far would put it
                    if j - delete_offsets[j] + running != i {
                        let updated = old_element != new_element;
                        self.update_or_move(old_element, j, new_element, i, updated, true);
                    } else if old_element != new_element {
                        self.update_or_move(old_element, j, new_element, i, true, false);
                    }
                }
            }
        }
    }
}

// =============================================================================
// Change / FnSink
// =============================================================================

/// One primitive callback as a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change<'a, T> {
    Insert {
        element: &'a T,
        index: usize,
    },
    Delete {
        index: usize,
    },
    UpdateOrMove {
        old_element: &'a T,
        old_index: usize,
        new_element: &'a T,
        new_index: usize,
        updated: bool,
        moved: bool,
    },
}

impl<T> Change<'_, T> {
    /// Whether this change relocates an element
    pub fn is_move(&self) -> bool {
        matches!(self, Change::UpdateOrMove { moved: true, .. })
    }
}

/// A sink that forwards every callback to a closure.
///
/// This is the plug-in point for adapters that translate changes into their
/// own domain, such as list row animations.
///
/// ```
/// use tola_seqdiff::{Change, ChangeSink, DiffContext, FnSink};
///
/// let ctx = DiffContext::new("ab".chars(), "abc".chars());
/// let mut inserted = Vec::new();
/// FnSink::new(|change: Change<'_, char>| {
///     if let Change::Insert { element, index } = change {
///         inserted.push((index, *element));
///     }
/// })
/// .apply_diff(&ctx);
/// assert_eq!(inserted, vec![(2, 'c')]);
/// ```
pub struct FnSink<F> {
    f: F,
}

impl<F> FnSink<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }

    pub fn into_inner(self) -> F {
        self.f
    }
}

impl<T, F> ChangeSink<T> for FnSink<F>
where
    F: FnMut(Change<'_, T>),
{
    fn insert(&mut self, element: &T, index: usize) {
        (self.f)(Change::Insert { element, index });
    }

    fn delete(&mut self, index: usize) {
        (self.f)(Change::Delete { index });
    }

    fn update_or_move(
        &mut self,
        old_element: &T,
        old_index: usize,
        new_element: &T,
        new_index: usize,
        updated: bool,
        moved: bool,
    ) {
        (self.f)(Change::UpdateOrMove {
            old_element,
            old_index,
            new_element,
            new_index,
            updated,
            moved,
        });
    }
}

// =============================================================================
// Tests
// =============================================================================
