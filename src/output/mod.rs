//! Output writers for serialized trees and reports.
//!
//! This module handles writing data to disk:
//! - Serialized call trees (the nested exchange structure)
//! - View reports (flat histogram and function aggregates)

pub mod json;

// Re-export main functions
pub use json::{read_report, read_tree, validate_path, write_report, write_tree};
