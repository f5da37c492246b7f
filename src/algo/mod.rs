//! Algorithm implementations for sequence diffing.
//!
//! - `context`: Heckel symbol table and five-pass resolution
//! - `symbol`: per-hash occurrence records
//! - `hash`: element hashing for the symbol table

mod context;
mod hash;
mod symbol;

pub use context::{DiffContext, Reference};
pub use hash::hash_element;
pub use symbol::{NewCount, OldCount, Symbol};
