//! Element hashing for the symbol table
//!
//! The table is keyed by a 64-bit hash rather than by the element itself, so
//! the context never needs to borrow from its own sequences. Distinct values
//! that collide share a symbol; the traversal re-checks true equality.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// Hash an element into a symbol table key.
///
/// Uses FxHash: fast, non-cryptographic, deterministic within a process.
#[inline]
pub fn hash_element<T: Hash + ?Sized>(element: &T) -> u64 {
    let mut hasher = FxHasher::default();
    element.hash(&mut hasher);
    hasher.finish()
}
