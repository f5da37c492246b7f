//! Ordered, replayable diff result.
//!
//! Produces a single list of steps that can be applied to a live mutable
//! sequence without index-shift corruption.
//!
//! # Step order
//!
//! ```text
//! deletions   old-index domain, descending
//! insertions  new-index domain, ascending
//! updates     new-index domain, ascending
//! ```
//!
//! Deleting from the back first keeps the remaining old indices valid.
//! Once every deletion has run, ascending insertions land exactly on their
//! new indices, and updates then overwrite in place. Any other order can
//! corrupt indices mid-replay.
//!
//! There is no native move step: a move is a deletion plus an insertion.

use std::collections::VecDeque;
use std::hash::Hash;

use smallvec::SmallVec;

use crate::algo::DiffContext;
use crate::error::{SeqDiffError, SeqDiffResult, StepKind};
use crate::sink::ChangeSink;

// =============================================================================
// Step
// =============================================================================

/// One replay step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    /// Insert `element` at `index`
    Insert { element: T, index: usize },
    /// Remove the element at `index`
    Delete { index: usize },
    /// Overwrite the element at `index`
    Update { element: T, index: usize },
}

impl<T> Step<T> {
    pub fn kind(&self) -> StepKind {
        match self {
            Self::Insert { .. } => StepKind::Insert,
            Self::Delete { .. } => StepKind::Delete,
            Self::Update { .. } => StepKind::Update,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Insert { index, .. } | Self::Delete { index } | Self::Update { index, .. } => {
                *index
            }
        }
    }
}

// =============================================================================
// ReplayTarget
// =============================================================================

/// A mutable sequence steps can be replayed onto.
///
/// Implementations follow the usual collection contract and panic on an
/// out-of-range index.
pub trait ReplayTarget<T> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert_at(&mut self, index: usize, element: T);

    fn remove_at(&mut self, index: usize);

    fn replace_at(&mut self, index: usize, element: T);
}

impl<T> ReplayTarget<T> for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn insert_at(&mut self, index: usize, element: T) {
        self.insert(index, element);
    }

    fn remove_at(&mut self, index: usize) {
        self.remove(index);
    }

    fn replace_at(&mut self, index: usize, element: T) {
        self[index] = element;
    }
}

impl<T> ReplayTarget<T> for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn insert_at(&mut self, index: usize, element: T) {
        self.insert(index, element);
    }

    fn remove_at(&mut self, index: usize) {
        let removed = self.remove(index);
        assert!(removed.is_some(), "removal index {index} out of bounds");
    }

    fn replace_at(&mut self, index: usize, element: T) {
        self[index] = element;
    }
}

impl<A: smallvec::Array> ReplayTarget<A::Item> for SmallVec<A> {
    fn len(&self) -> usize {
        SmallVec::len(self)
    }

    fn insert_at(&mut self, index: usize, element: A::Item) {
        self.insert(index, element);
    }

    fn remove_at(&mut self, index: usize) {
        self.remove(index);
    }

    fn replace_at(&mut self, index: usize, element: A::Item) {
        self[index] = element;
    }
}

// =============================================================================
// OrderedDiffResult
// =============================================================================

/// Diff result as a replayable list of steps.
///
/// ```
/// use tola_seqdiff::diff_ordered;
///
/// let old = vec!['x', 'y', 'z'];
/// let new = vec!['y', 'q'];
/// let result = diff_ordered(&old, &new);
///
/// let mut live = old.clone();
/// result.apply(&mut live);
/// assert_eq!(live, new);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct OrderedDiffResult<T> {
    steps: Vec<Step<T>>,
}

impl<T> Default for OrderedDiffResult<T> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<T> OrderedDiffResult<T> {
    /// Wrap an existing step list. The caller is responsible for its order.
    pub fn new(steps: Vec<Step<T>>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Step<T>> {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<T: Clone + PartialEq> OrderedDiffResult<T> {
    /// Build from a resolved context.
    pub fn from_context(ctx: &DiffContext<T>) -> Self {
        let mut builder = OrderedDiffResultBuilder::new();
        builder.apply_diff(ctx);
        builder.build()
    }
}

impl<T: Clone> OrderedDiffResult<T> {
    /// Replay every step onto `target`.
    ///
    /// `target` must equal the old sequence the diff was computed from.
    ///
    /// # Panics
    ///
    /// Panics if a step addresses an index the target does not have, which
    /// means the precondition above was violated. Use
    /// [`try_apply`](Self::try_apply) to check first.
    pub fn apply<R: ReplayTarget<T> + ?Sized>(&self, target: &mut R) {
        for step in &self.steps {
            match step {
                Step::Delete { index } => target.remove_at(*index),
                Step::Insert { element, index } => target.insert_at(*index, element.clone()),
                Step::Update { element, index } => target.replace_at(*index, element.clone()),
            }
        }
    }

    /// Replay every step onto `target` after checking that all of them fit.
    ///
    /// The check simulates the length changes of the whole replay. On error
    /// the target is left untouched.
    pub fn try_apply<R: ReplayTarget<T> + ?Sized>(&self, target: &mut R) -> SeqDiffResult<()> {
        self.check_bounds(target.len())?;
        self.apply(target);
        Ok(())
    }

    fn check_bounds(&self, mut len: usize) -> SeqDiffResult<()> {
        for step in &self.steps {
            let index = step.index();
            let fits = match step {
                Step::Insert { .. } => index <= len,
                Step::Delete { .. } | Step::Update { .. } => index < len,
            };

            if !fits {
                #[cfg(feature = "tracing")]
                tracing::debug!(step = %step.kind(), index, len, "rejected replay step");
                return Err(SeqDiffError::StepOutOfBounds {
                    step: step.kind(),
                    index,
                    len,
                });
            }

            match step {
                Step::Insert { .. } => len += 1,
                Step::Delete { .. } => len -= 1,
                Step::Update { .. } => {}
            }
        }
        Ok(())
    }
}

/// Sink that collects steps for an [`OrderedDiffResult`].
#[derive(Debug)]
pub struct OrderedDiffResultBuilder<T> {
    deletion_indices: Vec<usize>,
    insertions: Vec<Step<T>>,
    updates: Vec<Step<T>>,
}

impl<T> Default for OrderedDiffResultBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedDiffResultBuilder<T> {
    pub fn new() -> Self {
        Self {
            deletion_indices: Vec::new(),
            insertions: Vec::new(),
            updates: Vec::new(),
        }
    }

    /// Assemble the final step order: deletions descending, then
    /// insertions, then updates.
    pub fn build(self) -> OrderedDiffResult<T> {
        let Self {
            mut deletion_indices,
            insertions,
            updates,
        } = self;

        deletion_indices.sort_unstable_by(|a, b| b.cmp(a));

        let mut steps = Vec::with_capacity(deletion_indices.len() + insertions.len() + updates.len());
        steps.extend(deletion_indices.into_iter().map(|index| Step::Delete { index }));
        steps.extend(insertions);
        steps.extend(updates);

        OrderedDiffResult { steps }
    }
}

impl<T: Clone> ChangeSink<T> for OrderedDiffResultBuilder<T> {
    fn insert(&mut self, element: &T, index: usize) {
        self.insertions.push(Step::Insert {
            element: element.clone(),
            index,
        });
    }

    fn delete(&mut self, index: usize) {
        self.deletion_indices.push(index);
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
        if moved {
            self.insertions.push(Step::Insert {
                element: new_element.clone(),
                index: new_index,
            });
            self.deletion_indices.push(old_index);
        } else if updated {
            self.updates.push(Step::Update {
                element: new_element.clone(),
                index: new_index,
            });
        }
    }
}

/// Diff two sequences into a replayable [`OrderedDiffResult`].
pub fn diff_ordered<T>(old: &[T], new: &[T]) -> OrderedDiffResult<T>
where
    T: Hash + Eq + Clone,
{
    let ctx = DiffContext::new(old.iter().cloned(), new.iter().cloned());
    OrderedDiffResult::from_context(&ctx)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::hash::Hasher;

    use smallvec::smallvec;

    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn replay(old: &str, new: &str) -> String {
        let result = diff_ordered(&chars(old), &chars(new));
        let mut live = chars(old);
        result.apply(&mut live);
        live.into_iter().collect()
    }

    fn delete(index: usize) -> Step<char> {
        Step::Delete { index }
    }

    fn insert(element: char, index: usize) -> Step<char> {
        Step::Insert { element, index }
    }

    #[test]
    fn test_no_changes() {
        let result = diff_ordered(&chars("abc"), &chars("abc"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_insert_all() {
        let result = diff_ordered(&chars(""), &chars("xyz"));
        assert_eq!(result.steps(), &[insert('x', 0), insert('y', 1), insert('z', 2)]);
    }

    #[test]
    fn test_delete_all_descending() {
        let result = diff_ordered(&chars("xyz"), &chars(""));
        assert_eq!(result.steps(), &[delete(2), delete(1), delete(0)]);
    }

    #[test]
    fn test_move_is_delete_plus_insert() {
        let result = diff_ordered(&chars("abc"), &chars("acb"));
        assert_eq!(
            result.steps(),
            &[delete(2), delete(1), insert('c', 1), insert('b', 2)]
        );
        assert_eq!(replay("abc", "acb"), "acb");
    }

    #[test]
    fn test_duplicates_without_anchor() {
        let result = diff_ordered(&chars("aab"), &chars("baa"));
        assert_eq!(
            result.steps(),
            &[delete(1), delete(0), insert('a', 1), insert('a', 2)]
        );
        assert_eq!(replay("aab", "baa"), "baa");
    }

    #[test]
    fn test_heckel_reference_case_round_trip() {
        assert_eq!(replay("abcabba", "cbabac"), "cbabac");
    }

    #[test]
    fn test_unicode_round_trip() {
        let old = "åƒåß©©©åßasfa";
        let new = "😉ååß©åßas🤩🤩fa";
        assert_eq!(replay(old, new), new);
    }

    #[test]
    fn test_paul_heckel_paper_round_trip() {
        let old = vec![
            "MUCH", "WRITING", "IS", "LIKE", "SNOW", ",", "A", "MASS", "OF", "LONG", "WORDS", "AND",
            "PHRASES", "FALLS", "UPON", "THE", "RELEVANT", "FACTS", "COVERING", "UP", "THE",
            "DETAILS", ".",
        ];
        let new = vec![
            "A", "MASS", "OF", "LATIN", "WORDS", "FALLS", "UPON", "THE", "RELEVANT", "FACTS",
            "LIKE", "SOFT", "SNOW", ",", "COVERING", "UP", "THE", "DETAILS", ".",
        ];

        let result = diff_ordered(&old, &new);
        let mut live = old.clone();
        result.apply(&mut live);
        assert_eq!(live, new);
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        id: u32,
        label: &'static str,
    }

    impl Hash for Row {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.id.hash(state);
        }
    }

    #[test]
    fn test_updates_come_last() {
        let old = vec![
            Row { id: 1, label: "a" },
            Row { id: 2, label: "b" },
            Row { id: 3, label: "c" },
        ];
        let new = vec![
            Row { id: 1, label: "A" },
            Row { id: 2, label: "b" },
            Row { id: 4, label: "d" },
        ];

        let result = diff_ordered(&old, &new);
        let kinds: Vec<StepKind> = result.steps().iter().map(Step::kind).collect();
        assert_eq!(kinds, vec![StepKind::Delete, StepKind::Insert, StepKind::Update]);

        let mut live = old.clone();
        result.apply(&mut live);
        assert_eq!(live, new);
    }

    #[test]
    fn test_apply_to_vec_deque() {
        let old: VecDeque<char> = "kitten".chars().collect();
        let new: VecDeque<char> = "sitting".chars().collect();
        let result = diff_ordered(
            &old.iter().copied().collect::<Vec<_>>(),
            &new.iter().copied().collect::<Vec<_>>(),
        );

        let mut live = old.clone();
        result.apply(&mut live);
        assert_eq!(live, new);
    }

    #[test]
    fn test_apply_to_smallvec() {
        let old: SmallVec<[u8; 8]> = smallvec![1, 2, 3, 4];
        let new: SmallVec<[u8; 8]> = smallvec![4, 1, 2, 5];
        let result = diff_ordered(&old, &new);

        let mut live = old.clone();
        result.apply(&mut live);
        assert_eq!(live, new);
    }

    #[test]
    fn test_try_apply_rejects_mismatched_target() {
        let result = diff_ordered(&chars("abcd"), &chars("a"));
        let mut short = chars("ab");

        let err = result.try_apply(&mut short).unwrap_err();
        match err {
            SeqDiffError::StepOutOfBounds { step, index, len } => {
                assert_eq!(step, StepKind::Delete);
                assert_eq!(index, 3);
                assert_eq!(len, 2);
            }
        }
        assert_eq!(short, chars("ab"), "target must be left untouched");
    }

    #[test]
    fn test_try_apply_tracks_length() {
        // Insert at 3 is only valid after the preceding insert at 2
        let result = OrderedDiffResult::new(vec![insert('x', 2), insert('y', 3)]);
        let mut live = chars("ab");
        result.try_apply(&mut live).unwrap();
        assert_eq!(live, chars("abxy"));

        let result = OrderedDiffResult::new(vec![insert('y', 3), insert('x', 2)]);
        assert!(result.try_apply(&mut chars("ab")).is_err());
    }

    #[test]
    #[should_panic]
    fn test_apply_panics_on_mismatched_target() {
        let result = diff_ordered(&chars("abcd"), &chars(""));
        let mut short = chars("a");
        result.apply(&mut short);
    }

    #[test]
    fn test_builder_realizes_moves_as_delete_insert() {
        let mut builder = OrderedDiffResultBuilder::new();
        builder.delete(0);
        builder.update_or_move(&'b', 1, &'B', 3, true, true);
        builder.update_or_move(&'c', 2, &'c', 0, false, true);
        builder.update_or_move(&'d', 4, &'D', 4, true, false);

        let result = builder.build();
        assert_eq!(
            result.steps(),
            &[
                delete(2),
                delete(1),
                delete(0),
                insert('B', 3),
                insert('c', 0),
                Step::Update { element: 'D', index: 4 },
            ]
        );
    }

    #[test]
    fn test_step_accessors() {
        let step = insert('x', 7);
        assert_eq!(step.kind(), StepKind::Insert);
        assert_eq!(step.index(), 7);
        assert_eq!(delete(3).kind(), StepKind::Delete);
    }
}
