//! Prelude module for common imports.
//!
//! ```ignore
//! use tola_seqdiff::prelude::*;
//! ```

// Algorithms
pub use crate::algo::{DiffContext, Reference};

// Sinks
pub use crate::sink::{Change, ChangeSink, FnSink};

// Results
pub use crate::ordered::{diff_ordered, OrderedDiffResult, ReplayTarget, Step};
pub use crate::result::{diff, DiffResult, DiffStats};

// Batch
pub use crate::batch::diff_batch;

// Error
pub use crate::error::{SeqDiffError, SeqDiffResult, StepKind};
