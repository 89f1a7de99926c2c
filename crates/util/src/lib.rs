//! ejson-util - leaf utilities for the ejson codec.
//!
//! Small helpers with no internal dependencies: JSON string escaping and a
//! stable insertion sort used by the deterministic printer.

pub mod sort;
pub mod strings;

// Re-exports for convenience
pub use sort::{insertion_sort, insertion_sort_by};
pub use strings::escape;
