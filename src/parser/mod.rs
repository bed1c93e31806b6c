//! Dataset parsing and schema definitions.
//!
//! This module handles:
//! - Loading decoded profiler output from JSON
//! - Classifying sample entries into frame markers
//! - Validating dataset format
//! - Defining the report schema

pub mod decoded;
pub mod schema;

// Re-export main types
pub use decoded::{parse_dataset, parse_dataset_str, read_dataset, validate_dataset_format};
pub use schema::{CalleeEntry, FunctionView, RawDataset, RawFrame, RawProfile, TopEntry, ViewReport};
