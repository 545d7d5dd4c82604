//! State module for tracking export progress
//!
//! - `PageState`: the outcome of an individual page (exported or skipped, and why)
//! - `TraversalState`: the traversal loop's own state machine

mod page_state;

// Re-export main types
pub use page_state::{PageState, TraversalState};
