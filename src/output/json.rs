//! JSON output writer for serialized trees and view reports.

use crate::parser::schema::ViewReport;
use crate::tree::SerializedNode;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write a serialized call tree to a JSON file
///
/// **Public** - main entry point for tree output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let tree = get_tree(&stats, &LocatorConfig::default())?;
/// write_tree(&tree.serialize(), "tree.json")?;
/// ```
pub fn write_tree(tree: &SerializedNode, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    write_json(tree, output_path.as_ref())
}

/// Read a serialized call tree back from disk
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_tree(input_path: impl AsRef<Path>) -> Result<SerializedNode, OutputError> {
    let tree: SerializedNode = read_json(input_path.as_ref())?;
    debug!("Tree loaded: root {} ({})", tree.name(), tree.addr_text());
    Ok(tree)
}

/// Write a view report to a JSON file
pub fn write_report(report: &ViewReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    write_json(report, output_path.as_ref())
}

/// Read a view report back from disk
pub fn read_report(input_path: impl AsRef<Path>) -> Result<ViewReport, OutputError> {
    let report: ViewReport = read_json(input_path.as_ref())?;
    debug!("Report loaded: version {}, {} profiles", report.version, report.profile_count);
    Ok(report)
}

/// Validate that output path is writable
///
/// **Public** - also used by commands for early validation
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Pretty-print any serializable value to a file
///
/// **Private** - shared by the tree and report writers
fn write_json<T: Serialize>(value: &T, output_path: &Path) -> Result<(), OutputError> {
    info!("Writing JSON to: {}", output_path.display());

    validate_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, value)?;

    info!("JSON written successfully ({} bytes)", calculate_file_size(output_path));

    Ok(())
}

fn read_json<T: DeserializeOwned>(input_path: &Path) -> Result<T, OutputError> {
    debug!("Reading JSON from: {}", input_path.display());

    let file = File::open(input_path)?;
    let value = serde_json::from_reader(BufReader::new(file))?;

    Ok(value)
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
