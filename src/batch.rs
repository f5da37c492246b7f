//! Batch diffing of independent sequence pairs.
//!
//! Every pair gets its own [`DiffContext`]; contexts are never shared.
//! With the `parallel` feature, pairs are spread over the rayon pool.

use std::hash::Hash;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::algo::DiffContext;
use crate::ordered::OrderedDiffResult;

/// Compute an ordered result for each `(old, new)` pair, in input order.
#[cfg(feature = "parallel")]
pub fn diff_batch<T, S>(pairs: &[(S, S)]) -> Vec<OrderedDiffResult<T>>
where
    T: Hash + Eq + Clone + Send + Sync,
    S: AsRef<[T]> + Sync,
{
    pairs
        .par_iter()
        .map(|(old, new)| diff_pair(old.as_ref(), new.as_ref()))
        .collect()
}

/// Compute an ordered result for each `(old, new)` pair, in input order.
#[cfg(not(feature = "parallel"))]
pub fn diff_batch<T, S>(pairs: &[(S, S)]) -> Vec<OrderedDiffResult<T>>
where
    T: Hash + Eq + Clone,
    S: AsRef<[T]>,
{
    pairs
        .iter()
        .map(|(old, new)| diff_pair(old.as_ref(), new.as_ref()))
        .collect()
}

fn diff_pair<T: Hash + Eq + Clone>(old: &[T], new: &[T]) -> OrderedDiffResult<T> {
    let ctx = DiffContext::new(old.iter().cloned(), new.iter().cloned());
    OrderedDiffResult::from_context(&ctx)
}
