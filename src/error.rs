//! Error types for tola-seqdiff.
//!
//! Diffing itself cannot fail. Errors only arise when replaying steps onto a
//! sequence that does not match the one the diff was computed from.

use std::fmt;

use thiserror::Error;

/// Kind of a replay step, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Insert,
    Delete,
    Update,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Update => "update",
        })
    }
}

/// Errors that can occur during sequence diff operations.
#[derive(Debug, Error)]
pub enum SeqDiffError {
    /// A replay step addresses a position the target does not have
    #[error("{step} step index {index} out of bounds for sequence of length {len}")]
    StepOutOfBounds {
        /// Kind of the offending step
        step: StepKind,
        /// Index the step addresses
        index: usize,
        /// Length of the target when the step would run
        len: usize,
    },
}

/// Result type alias for sequence diff operations.
pub type SeqDiffResult<T> = Result<T, SeqDiffError>;
