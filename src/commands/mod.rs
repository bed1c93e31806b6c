//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod models;
pub mod report;
pub mod utils;

// Re-export main command functions
pub use analyze::{execute_function, execute_top, execute_tree, validate_limit};
pub use models::{FunctionArgs, FunctionTarget, ReportArgs, TopArgs, TreeArgs};
pub use report::{build_report, execute_report};
