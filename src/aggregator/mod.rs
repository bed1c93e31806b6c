//! Aggregation of decoded samples into analytical views.
//!
//! This module transforms a `Stats` dataset into:
//! - A flat "topmost function" histogram
//! - A merged call tree (raw, or cut at the program's entry point)
//! - Per-function subtree aggregates

pub mod histogram;
pub mod root_locator;
pub mod subtree;
pub mod tree_builder;

// Re-export main types and functions
pub use histogram::{top_counts, top_profile};
pub use root_locator::{filter_top, get_tree};
pub use subtree::{function_profile, FunctionProfile};
pub use tree_builder::{build_tree, locate_root};
