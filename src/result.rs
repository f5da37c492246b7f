//! Unordered diff result.
//!
//! Buckets changes into four independent lists. Useful for reporting and
//! animation planning where the application order does not matter. For a
//! result that can be replayed onto a live sequence, use
//! [`OrderedDiffResult`](crate::OrderedDiffResult).

use std::hash::Hash;

use crate::algo::DiffContext;
use crate::sink::ChangeSink;

/// Statistics from a diff result
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffStats {
    pub inserted: usize,
    pub deleted: usize,
    pub updated: usize,
    pub moved: usize,
}

impl DiffStats {
    /// Total number of changes
    pub fn edit_count(&self) -> usize {
        self.inserted + self.deleted + self.updated + self.moved
    }

    pub fn is_empty(&self) -> bool {
        self.edit_count() == 0
    }
}

/// Changes between two sequences, grouped by kind.
///
/// Each list is in traversal order: deletions by ascending old index,
/// insertions and updates by ascending new index. No order is implied
/// between lists.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct DiffResult<T> {
    /// New indices with inserted elements
    pub insertions: Vec<(usize, T)>,
    /// Old indices of deleted elements
    pub deletions: Vec<usize>,
    /// New indices with updated elements
    pub updates: Vec<(usize, T)>,
    /// `(old_index, new_index)` of moved elements
    pub moves: Vec<(usize, usize)>,
}

impl<T> Default for DiffResult<T> {
    fn default() -> Self {
        Self {
            insertions: Vec::new(),
            deletions: Vec::new(),
            updates: Vec::new(),
            moves: Vec::new(),
        }
    }
}

impl<T: Clone + PartialEq> DiffResult<T> {
    /// Build from a resolved context.
    pub fn from_context(ctx: &DiffContext<T>) -> Self {
        let mut builder = DiffResultBuilder::new();
        builder.apply_diff(ctx);
        builder.build()
    }
}

impl<T> DiffResult<T> {
    /// Check if no changes were detected
    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty()
            && self.deletions.is_empty()
            && self.updates.is_empty()
            && self.moves.is_empty()
    }

    pub fn stats(&self) -> DiffStats {
        DiffStats {
            inserted: self.insertions.len(),
            deleted: self.deletions.len(),
            updated: self.updates.len(),
            moved: self.moves.len(),
        }
    }
}

/// Sink that fills a [`DiffResult`].
///
/// A move that also changed value degrades to a deletion plus an insertion.
#[derive(Debug)]
pub struct DiffResultBuilder<T> {
    result: DiffResult<T>,
}

impl<T> Default for DiffResultBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DiffResultBuilder<T> {
    pub fn new() -> Self {
        Self {
            result: DiffResult::default(),
        }
    }

    pub fn build(self) -> DiffResult<T> {
        self.result
    }
}

impl<T: Clone> ChangeSink<T> for DiffResultBuilder<T> {
    fn insert(&mut self, element: &T, index: usize) {
        self.result.insertions.push((index, element.clone()));
    }

    fn delete(&mut self, index: usize) {
        self.result.deletions.push(index);
    }

    fn update_or_move(
        &mut self,
        _old_element: &T,
        old_index: usize,
        new_element: &T,
        new_index: usize,
        updated: bool,
        moved: bool,
    ) {
        match (updated, moved) {
            (true, true) => {
                self.result.deletions.push(old_index);
                self.result.insertions.push((new_index, new_element.clone()));
            }
            (false, true) => self.result.moves.push((old_index, new_index)),
            (true, false) => self.result.updates.push((new_index, new_element.clone())),
            (false, false) => {}
        }
    }
}

/// Diff two sequences into an unordered [`DiffResult`].
///
/// ```
/// use tola_seqdiff::diff;
///
/// let result = diff(&['a', 'b', 'c'], &['a', 'c', 'b']);
/// assert!(result.insertions.is_empty());
/// assert!(result.deletions.is_empty());
/// assert_eq!(result.moves, vec![(2, 1), (1, 2)]);
/// ```
pub fn diff<T>(old: &[T], new: &[T]) -> DiffResult<T>
where
    T: Hash + Eq + Clone,
{
    let ctx = DiffContext::new(old.iter().cloned(), new.iter().cloned());
    DiffResult::from_context(&ctx)
}

// =============================================================================
// Tests
// =============================================================================
