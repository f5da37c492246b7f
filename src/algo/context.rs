//! Heckel diff context
//!
//! Builds the symbol table and the OA/NA arrays, then resolves them in five
//! linear passes.
//!
//! # Algorithm
//!
//! 1. Scan new: count occurrences per symbol, fill NA with symbol refs
//! 2. Scan old: count occurrences, remember the position of single occurrences
//!    - then pair the common prefix and suffix in place
//! 3. Pair every element that occurs exactly once on each side
//! 4. Extend pairs forward through runs of identical neighbours
//! 5. Extend pairs backward the same way
//!
//! After pass 5 the context is the state shown in figure 1 of Heckel's
//! paper, "A technique for isolating differences between files" (1978).
//!
//! # Complexity
//!
//! - Time: O(n + m), every lookup is a hash probe or direct index
//! - Space: O(n + m)

use std::hash::Hash;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::hash::hash_element;
use super::symbol::Symbol;

// =============================================================================
// Reference
// =============================================================================

/// Entry of the OA or NA array.
#[derive(Debug, Clone)]
pub enum Reference {
    /// Not paired yet; holds the symbol of the element at this position
    Unresolved(Rc<Symbol>),
    /// Paired with this index in the other array
    Resolved(usize),
}

impl Reference {
    /// Index in the other array, if resolved
    #[inline]
    pub fn resolved(&self) -> Option<usize> {
        match self {
            Self::Resolved(index) => Some(*index),
            Self::Unresolved(_) => None,
        }
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    #[inline]
    fn symbol(&self) -> Option<&Rc<Symbol>> {
        match self {
            Self::Unresolved(symbol) => Some(symbol),
            Self::Resolved(_) => None,
        }
    }
}

// =============================================================================
// DiffContext
// =============================================================================

/// Resolved pairing between an old and a new sequence.
///
/// Construction runs the whole resolution; a context is never observable in
/// a partially resolved state. Feed it to a [`ChangeSink`](crate::ChangeSink)
/// to turn the pairing into changes.
///
/// A context holds `Rc` handles and is therefore neither `Send` nor `Sync`.
/// Independent pairs should each get their own context (see
/// [`diff_batch`](crate::diff_batch)).
///
/// # Example
///
/// ```
/// use tola_seqdiff::DiffContext;
///
/// let ctx = DiffContext::new("abc".chars(), "acb".chars());
/// assert_eq!(ctx.new_references()[0].resolved(), Some(0));
/// assert_eq!(ctx.new_references()[1].resolved(), Some(2));
/// ```
#[derive(Debug)]
pub struct DiffContext<T> {
    old: Vec<T>,
    new: Vec<T>,
    table: FxHashMap<u64, Rc<Symbol>>,
    oa: Vec<Reference>,
    na: Vec<Reference>,
}

impl<T: Hash + Eq> DiffContext<T> {
    /// Create and resolve a context from `old` to `new`.
    pub fn new<O, N>(old: O, new: N) -> Self
    where
        O: IntoIterator<Item = T>,
        N: IntoIterator<Item = T>,
    {
        let mut ctx = Self {
            old: old.into_iter().collect(),
            new: new.into_iter().collect(),
            table: FxHashMap::default(),
            oa: Vec::new(),
            na: Vec::new(),
        };
        ctx.calculate();
        ctx
    }

    /// Rebase onto a new destination.
    ///
    /// The current new sequence becomes the old one. All derived state is
    /// dropped and recomputed; nothing is reused across generations.
    pub fn update<N>(&mut self, new_destination: N)
    where
        N: IntoIterator<Item = T>,
    {
        let next: Vec<T> = new_destination.into_iter().collect();
        self.old = std::mem::replace(&mut self.new, next);

        self.oa.clear();
        self.na.clear();
        self.table.clear();

        self.calculate();
    }

    fn calculate(&mut self) {
        self.oa.reserve(self.old.len());
        self.na.reserve(self.new.len());

        // Pass 1: new sequence
        for element in &self.new {
            let symbol = self
                .table
                .entry(hash_element(element))
                .or_insert_with(Symbol::shared);
            symbol.advance_new();
            self.na.push(Reference::Unresolved(Rc::clone(symbol)));
        }

        // Pass 2: old sequence
        for (i, element) in self.old.iter().enumerate() {
            let symbol = self
                .table
                .entry(hash_element(element))
                .or_insert_with(Symbol::shared);
            symbol.advance_old(i);
            self.oa.push(Reference::Unresolved(Rc::clone(symbol)));
        }

        self.pair_common_ends();

        // Pass 3: unique in both
        #[cfg(feature = "tracing")]
        let mut unique_pairs = 0usize;
        for i in 0..self.na.len() {
            let paired = self.na[i].symbol().and_then(|symbol| symbol.unique_pair());
            if let Some(j) = paired {
                self.pair(i, j);
                #[cfg(feature = "tracing")]
                {
                    unique_pairs += 1;
                }
            }
        }

        // Pass 4: forward
        for i in 0..self.na.len().saturating_sub(1) {
            if let Some(j) = self.na[i].resolved() {
                if j + 1 < self.oa.len() && self.same_unresolved(i + 1, j + 1) {
                    self.pair(i + 1, j + 1);
                }
            }
        }

        // Pass 5: backward
        for i in (1..self.na.len()).rev() {
            if let Some(j) = self.na[i].resolved() {
                if j > 0 && self.same_unresolved(i - 1, j - 1) {
                    self.pair(i - 1, j - 1);
                }
            }
        }

        debug_assert!(self.pairing_is_mutual(), "OA/NA pairing must be mutual");

        #[cfg(feature = "tracing")]
        tracing::trace!(
            old = self.old.len(),
            new = self.new.len(),
            symbols = self.table.len(),
            unique_pairs,
            resolved = self.na.iter().filter(|r| r.is_resolved()).count(),
            "resolved diff context"
        );
    }

    /// Pair the common prefix and suffix in place.
    ///
    /// Repeated elements have no unique anchor; without this an unchanged
    /// `aa` resolves to nothing at all.
    fn pair_common_ends(&mut self) {
        let (n, m) = (self.old.len(), self.new.len());

        let mut prefix = 0;
        while prefix < n && prefix < m && self.old[prefix] == self.new[prefix] {
            self.pair(prefix, prefix);
            prefix += 1;
        }

        let mut suffix = 0;
        while suffix < n - prefix
            && suffix < m - prefix
            && self.old[n - 1 - suffix] == self.new[m - 1 - suffix]
        {
            self.pair(m - 1 - suffix, n - 1 - suffix);
            suffix += 1;
        }
    }
}

impl<T> DiffContext<T> {
    /// The old sequence (O)
    #[inline]
    pub fn old(&self) -> &[T] {
        &self.old
    }

    /// The new sequence (N)
    #[inline]
    pub fn new_sequence(&self) -> &[T] {
        &self.new
    }

    /// OA: one entry per old position
    #[inline]
    pub fn old_references(&self) -> &[Reference] {
        &self.oa
    }

    /// NA: one entry per new position
    #[inline]
    pub fn new_references(&self) -> &[Reference] {
        &self.na
    }

    /// Number of distinct element hashes seen on either side
    #[inline]
    pub fn symbol_count(&self) -> usize {
        self.table.len()
    }

    /// Take back the new sequence, dropping all derived state.
    pub fn into_new(self) -> Vec<T> {
        self.new
    }

    #[inline]
    fn pair(&mut self, new_index: usize, old_index: usize) {
        self.na[new_index] = Reference::Resolved(old_index);
        self.oa[old_index] = Reference::Resolved(new_index);
    }

    /// Both positions unresolved and referring to the same symbol instance.
    #[inline]
    fn same_unresolved(&self, new_index: usize, old_index: usize) -> bool {
        match (self.na[new_index].symbol(), self.oa[old_index].symbol()) {
            (Some(new), Some(old)) => Rc::ptr_eq(new, old),
            _ => false,
        }
    }

    fn pairing_is_mutual(&self) -> bool {
        self.na.iter().enumerate().all(|(i, reference)| match reference {
            Reference::Resolved(j) => matches!(self.oa.get(*j), Some(Reference::Resolved(k)) if *k == i),
            Reference::Unresolved(_) => true,
        }) && self.oa.iter().enumerate().all(|(j, reference)| match reference {
            Reference::Resolved(i) => matches!(self.na.get(*i), Some(Reference::Resolved(k)) if *k == j),
            Reference::Unresolved(_) => true,
        })
    }
}

impl<T: PartialEq> DiffContext<T> {
    /// Whether both sequences are equal element by element.
    ///
    /// Equal sequences are always paired entirely in place, so an identical
    /// context produces no changes.
    pub fn is_identical(&self) -> bool {
        self.old == self.new
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(refs: &[Reference]) -> Vec<Option<usize>> {
        refs.iter().map(Reference::resolved).collect()
    }

    #[test]
    fn test_empty_sequences() {
        let ctx: DiffContext<char> = DiffContext::new(Vec::new(), Vec::new());
        assert!(ctx.old_references().is_empty());
        assert!(ctx.new_references().is_empty());
        assert_eq!(ctx.symbol_count(), 0);
        assert!(ctx.is_identical());
    }

    #[test]
    fn test_identical_sequences_pair_in_place() {
        let ctx = DiffContext::new("abc".chars(), "abc".chars());
        assert_eq!(pairs(ctx.new_references()), vec![Some(0), Some(1), Some(2)]);
        assert_eq!(pairs(ctx.old_references()), vec![Some(0), Some(1), Some(2)]);
        assert!(ctx.is_identical());
    }

    #[test]
    fn test_unique_elements_pair_regardless_of_position() {
        let ctx = DiffContext::new("abc".chars(), "bca".chars());
        assert_eq!(pairs(ctx.new_references()), vec![Some(1), Some(2), Some(0)]);
        assert_eq!(pairs(ctx.old_references()), vec![Some(2), Some(0), Some(1)]);
        assert!(!ctx.is_identical());
    }

    #[test]
    fn test_forward_pass_resolves_duplicates() {
        // 'a' occurs twice on both sides; only the unique 'x' anchors it
        let ctx = DiffContext::new("zxaab".chars(), "xaabq".chars());
        assert_eq!(
            pairs(ctx.new_references()),
            vec![Some(1), Some(2), Some(3), Some(4), None]
        );
    }

    #[test]
    fn test_backward_pass_resolves_duplicates() {
        let ctx = DiffContext::new("aabq".chars(), "zaab".chars());
        assert_eq!(pairs(ctx.new_references()), vec![None, Some(0), Some(1), Some(2)]);
        assert_eq!(pairs(ctx.old_references()), vec![Some(1), Some(2), Some(3), None]);
    }

    #[test]
    fn test_repeated_elements_pair_in_place_when_unchanged() {
        for seq in ["aa", "abab", "aaabbb"] {
            let ctx = DiffContext::new(seq.chars(), seq.chars());
            let expected: Vec<Option<usize>> = (0..seq.len()).map(Some).collect();
            assert_eq!(pairs(ctx.new_references()), expected, "{seq}");
            assert_eq!(pairs(ctx.old_references()), expected, "{seq}");
            assert!(ctx.is_identical());
        }
    }

    #[test]
    fn test_common_ends_pair_around_a_change() {
        let ctx = DiffContext::new("aaxbb".chars(), "aaybb".chars());
        assert_eq!(
            pairs(ctx.new_references()),
            vec![Some(0), Some(1), None, Some(3), Some(4)]
        );
        assert!(!ctx.old_references()[2].is_resolved());
    }

    #[test]
    fn test_duplicates_without_anchor_stay_unresolved() {
        let ctx = DiffContext::new("aab".chars(), "baa".chars());
        assert_eq!(pairs(ctx.new_references()), vec![Some(2), None, None]);
        assert_eq!(pairs(ctx.old_references()), vec![None, None, Some(0)]);
    }

    #[test]
    fn test_heckel_reference_case_has_no_unique_elements() {
        // Every element repeats on both sides, so nothing is anchored
        let ctx = DiffContext::new("abcabba".chars(), "cbabac".chars());
        assert!(ctx.new_references().iter().all(|r| !r.is_resolved()));
        assert!(ctx.old_references().iter().all(|r| !r.is_resolved()));
        assert_eq!(ctx.symbol_count(), 3);
    }

    #[test]
    fn test_unresolved_entries_share_symbols() {
        let ctx = DiffContext::new("aa".chars(), "baab".chars());
        let (oa, na) = (ctx.old_references(), ctx.new_references());
        assert!(oa.iter().chain(na).all(|r| !r.is_resolved()));

        let a: Vec<&Rc<Symbol>> = [&oa[0], &oa[1], &na[1], &na[2]]
            .into_iter()
            .filter_map(Reference::symbol)
            .collect();
        assert_eq!(a.len(), 4);
        assert!(a.windows(2).all(|w| Rc::ptr_eq(w[0], w[1])));

        let b0 = na[0].symbol().unwrap();
        assert!(Rc::ptr_eq(b0, na[3].symbol().unwrap()));
        assert!(!Rc::ptr_eq(b0, a[0]));
    }

    #[test]
    fn test_update_rebases_on_previous_destination() {
        let mut ctx = DiffContext::new("ab".chars(), "abc".chars());
        ctx.update("cab".chars());

        assert_eq!(ctx.old(), &['a', 'b', 'c']);
        assert_eq!(ctx.new_sequence(), &['c', 'a', 'b']);
        assert_eq!(pairs(ctx.new_references()), vec![Some(2), Some(0), Some(1)]);
        assert_eq!(ctx.symbol_count(), 3);
    }

    #[test]
    fn test_update_clears_previous_table() {
        let mut ctx = DiffContext::new("xyz".chars(), "q".chars());
        assert_eq!(ctx.symbol_count(), 4);
        ctx.update("q".chars());
        assert_eq!(ctx.symbol_count(), 1);
        assert!(ctx.is_identical());
    }

    #[test]
    fn test_pairing_is_mutual() {
        let ctx = DiffContext::new("the quick brown fox".chars(), "quick the fox brown".chars());
        assert!(ctx.pairing_is_mutual());
    }
}
