//! Loader for decoded profiler datasets.
//!
//! The raw profiler log is decoded elsewhere; this module only turns the
//! decoder's JSON document into a typed `Stats`, classifying every sample
//! entry into a `FrameMarker` on the way.

use super::schema::{RawDataset, RawFrame, RawProfile};
use crate::stats::{FrameMarker, Profile, Stats};
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::ParseError;
use log::{debug, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parse a decoded dataset from a JSON value
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::JsonError` - Document does not match the dataset schema
/// * `ParseError::InvalidFormat` - Unsupported version or inconsistent fields
pub fn parse_dataset(raw: &serde_json::Value) -> Result<Stats, ParseError> {
    validate_dataset_format(raw)?;

    let dataset: RawDataset = serde_json::from_value(raw.clone())?;
    into_stats(dataset)
}

/// Parse a decoded dataset from JSON text
pub fn parse_dataset_str(json: &str) -> Result<Stats, ParseError> {
    let raw: serde_json::Value = serde_json::from_str(json)?;
    parse_dataset(&raw)
}

/// Read and parse a decoded dataset file
///
/// **Public** - used by every CLI command
///
/// # Errors
/// * `ParseError::ReadFailed` - File cannot be opened
/// * `ParseError::JsonError` / `ParseError::InvalidFormat` - see `parse_dataset`
pub fn read_dataset(input_path: impl AsRef<Path>) -> Result<Stats, ParseError> {
    let input_path = input_path.as_ref();

    debug!("Reading dataset from: {}", input_path.display());

    let file = File::open(input_path)?;
    let raw: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;

    parse_dataset(&raw)
}

/// Check the document shape before full deserialization
///
/// **Public** - can be called for early validation
pub fn validate_dataset_format(raw: &serde_json::Value) -> Result<(), ParseError> {
    let obj = raw.as_object().ok_or_else(|| {
        ParseError::InvalidFormat("Dataset must be a JSON object".to_string())
    })?;

    match obj.get("profiles") {
        Some(profiles) if profiles.is_array() => {}
        Some(_) => {
            return Err(ParseError::InvalidFormat(
                "\"profiles\" must be an array".to_string(),
            ))
        }
        None => {
            return Err(ParseError::InvalidFormat(
                "Missing required field: profiles".to_string(),
            ))
        }
    }

    if let Some(version) = obj.get("version").and_then(|v| v.as_str()) {
        if !is_compatible_version(version) {
            return Err(ParseError::InvalidFormat(format!(
                "Unsupported dataset version: {} (expected {})",
                version, SCHEMA_VERSION
            )));
        }
    }

    Ok(())
}

/// Same major version as the one we understand
///
/// **Private** - internal helper for validate_dataset_format
fn is_compatible_version(version: &str) -> bool {
    let major = |v: &str| v.split('.').next().map(str::to_string);
    major(version) == major(SCHEMA_VERSION)
}

/// Convert the raw schema into the dataset model
///
/// **Private** - internal helper for parse_dataset
fn into_stats(dataset: RawDataset) -> Result<Stats, ParseError> {
    if let (Some(start), Some(end)) = (dataset.start_time, dataset.end_time) {
        if end < start {
            warn!("Dataset end time {} precedes start time {}", end, start);
        }
    }

    let profiles = dataset
        .profiles
        .into_iter()
        .enumerate()
        .map(|(index, raw)| convert_profile(index, raw))
        .collect::<Result<Vec<Profile>, ParseError>>()?;

    if dataset.profile_lines {
        check_line_interleaving(&profiles)?;
    }

    debug!(
        "Parsed {} profiles, {} dictionary entries",
        profiles.len(),
        dataset.addresses.as_ref().map_or(0, |d| d.len())
    );

    Ok(Stats::new(profiles, dataset.addresses)
        .with_meta(dataset.meta)
        .with_times(dataset.start_time, dataset.end_time)
        .with_profile_lines(dataset.profile_lines))
}

/// Tagged frames must name a real code address
///
/// **Private** - internal helper for into_stats
fn convert_profile(index: usize, raw: RawProfile) -> Result<Profile, ParseError> {
    if raw
        .frames
        .iter()
        .any(|frame| matches!(frame, RawFrame::Tagged { addr: 0, .. }))
    {
        return Err(ParseError::InvalidFormat(format!(
            "Profile {} has a tagged frame at address 0",
            index
        )));
    }

    Ok(Profile {
        frames: raw.frames.into_iter().map(FrameMarker::from).collect(),
        meta: raw.meta,
    })
}

/// In line mode every odd entry must be a line marker
///
/// **Private** - internal validation
fn check_line_interleaving(profiles: &[Profile]) -> Result<(), ParseError> {
    for (index, profile) in profiles.iter().enumerate() {
        let misplaced = profile
            .frames
            .iter()
            .skip(1)
            .step_by(2)
            .any(|frame| !frame.is_line());

        if misplaced {
            return Err(ParseError::InvalidFormat(format!(
                "Profile {} has a code address where a line marker is expected",
                index
            )));
        }
    }
    Ok(())
}
