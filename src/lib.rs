//! tola-seqdiff - Linear-time sequence diffing with replayable results
//!
//! ## Core Concepts
//!
//! **Heckel Resolution**: [`DiffContext`] pairs old and new positions using
//! Paul Heckel's symbol-table algorithm in O(n + m). Elements unique on both
//! sides anchor the pairing; runs of identical neighbours extend it.
//!
//! **Pluggable Sinks**: [`ChangeSink`] turns a resolved context into
//! insert / delete / update-or-move callbacks. The move detection lives in
//! one place and every output shape reuses it.
//!
//! ## Modules
//! - `algo`: Symbol table, `DiffContext`, five-pass resolution
//! - `sink`: `ChangeSink` traversal and the closure adapter `FnSink`
//! - `result`: Unordered `DiffResult` (insertions, deletions, updates, moves)
//! - `ordered`: Replayable `OrderedDiffResult` and `ReplayTarget`
//! - `batch`: Diffing many independent pairs
//! - `error`: Replay errors
//!
//! ## Usage
//!
//! ```
//! use tola_seqdiff::{diff, diff_ordered};
//!
//! let old: Vec<char> = "abcd".chars().collect();
//! let new: Vec<char> = "abxd".chars().collect();
//!
//! // Categorized changes
//! let result = diff(&old, &new);
//! assert_eq!(result.deletions, vec![2]);
//! assert_eq!(result.insertions, vec![(2, 'x')]);
//!
//! // Replay onto a live sequence
//! let mut live = old.clone();
//! diff_ordered(&old, &new).apply(&mut live);
//! assert_eq!(live, new);
//! ```

// =============================================================================
// Core modules
// =============================================================================

/// Algorithms: symbol table, resolution
pub mod algo;

/// Change sinks and traversal
pub mod sink;

/// Unordered result
pub mod result;

/// Ordered result and replay
pub mod ordered;

/// Batch diffing
pub mod batch;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Algorithms
pub use algo::{DiffContext, NewCount, OldCount, Reference, Symbol};

// Sinks
pub use sink::{Change, ChangeSink, FnSink};

// Results
pub use ordered::{
    diff_ordered, OrderedDiffResult, OrderedDiffResultBuilder, ReplayTarget, Step,
};
pub use result::{diff, DiffResult, DiffResultBuilder, DiffStats};

// Batch
pub use batch::diff_batch;

// Error types
pub use error::{SeqDiffError, SeqDiffResult, StepKind};

// =============================================================================
// Tests
// =============================================================================
