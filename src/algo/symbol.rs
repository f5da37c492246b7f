//! Symbol table entries
//!
//! One [`Symbol`] exists per distinct element hash. It counts occurrences on
//! each side, saturating at `Many`, and remembers the old position of an
//! element that occurs exactly once in the old sequence.
//!
//! Symbols are shared by `Rc` between the table and every array entry that
//! refers to them. Resolution compares them by handle identity.

use std::cell::Cell;
use std::rc::Rc;

/// Occurrence count of an element in the old sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OldCount {
    #[default]
    Zero,
    /// Exactly one occurrence, at this old index
    One(usize),
    Many,
}

impl OldCount {
    /// Record another occurrence at `index`.
    ///
    /// The first occurrence keeps its position; any further one discards it.
    #[inline]
    pub fn advance(self, index: usize) -> Self {
        match self {
            Self::Zero => Self::One(index),
            Self::One(_) | Self::Many => Self::Many,
        }
    }
}

/// Occurrence count of an element in the new sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewCount {
    #[default]
    Zero,
    One,
    Many,
}

impl NewCount {
    #[inline]
    pub fn advance(self) -> Self {
        match self {
            Self::Zero => Self::One,
            Self::One | Self::Many => Self::Many,
        }
    }
}

/// Per-hash occurrence record.
#[derive(Debug, Default)]
pub struct Symbol {
    old: Cell<OldCount>,
    new: Cell<NewCount>,
}

impl Symbol {
    /// Create a shared symbol with both counters at zero.
    pub(crate) fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Occurrences in the old sequence.
    #[inline]
    pub fn old_count(&self) -> OldCount {
        self.old.get()
    }

    /// Occurrences in the new sequence.
    #[inline]
    pub fn new_count(&self) -> NewCount {
        self.new.get()
    }

    /// Old index of an element that is unique in both sequences.
    #[inline]
    pub fn unique_pair(&self) -> Option<usize> {
        match (self.old.get(), self.new.get()) {
            (OldCount::One(index), NewCount::One) => Some(index),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn advance_old(&self, index: usize) {
        self.old.set(self.old.get().advance(index));
    }

    #[inline]
    pub(crate) fn advance_new(&self) {
        self.new.set(self.new.get().advance());
    }
}
