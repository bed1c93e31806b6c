//! JSON schema definitions: the decoded dataset we read and the report we write.
//!
//! Schema is versioned to allow future evolution.

use crate::stats::{AddressDictionary, ExecutionMode, FrameMarker};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Top-level decoded dataset as produced by the upstream decoder
#[derive(Debug, Clone, Deserialize)]
pub struct RawDataset {
    /// Schema version for compatibility checking
    #[serde(default)]
    pub version: Option<String>,

    /// Samples interleave address and line entries
    #[serde(default)]
    pub profile_lines: bool,

    /// Address dictionary; absent when symbols were not collected
    #[serde(default)]
    pub addresses: Option<AddressDictionary>,

    /// Process/session metadata (argv, VM, ...)
    #[serde(default)]
    pub meta: IndexMap<String, String>,

    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,

    /// One entry per observed sample
    pub profiles: Vec<RawProfile>,
}

/// A single decoded sample
#[derive(Debug, Clone, Deserialize)]
pub struct RawProfile {
    pub frames: Vec<RawFrame>,

    #[serde(default)]
    pub meta: IndexMap<String, serde_json::Value>,
}

/// One raw sample entry
///
/// Positive integers are plain code addresses, non-positive integers are
/// line markers, objects carry an explicit execution mode. A tagged frame at
/// address 0 is rejected by the loader before conversion.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum RawFrame {
    Address(u64),
    Line(i64),
    Tagged {
        addr: u64,
        #[serde(default)]
        kind: ExecutionMode,
    },
}

impl From<RawFrame> for FrameMarker {
    fn from(raw: RawFrame) -> Self {
        match raw {
            RawFrame::Address(0) => FrameMarker::LineMarker(0),
            RawFrame::Address(addr) => FrameMarker::plain(addr),
            RawFrame::Line(line) => FrameMarker::from_raw(line),
            RawFrame::Tagged { addr, kind } => FrameMarker::CodeAddress { addr, mode: kind },
        }
    }
}

/// Summary report written by the `report` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Command line of the profiled process
    pub argv: String,

    /// Runtime of the profiled process in microseconds (0 if unknown)
    pub runtime_us: i64,

    /// Number of samples in the dataset
    pub profile_count: usize,

    /// Flat histogram, descending by count
    pub top_functions: Vec<TopEntry>,

    /// Subtree aggregate for a queried function
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub function: Option<FunctionView>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// One row of the flat histogram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopEntry {
    pub name: String,
    pub count: u64,
}

/// Subtree aggregate of one function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionView {
    /// Address as text, like the serialized tree
    pub addr: String,
    pub name: String,
    pub total: u64,
    pub callees: Vec<CalleeEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalleeEntry {
    pub addr: String,
    pub name: String,
    pub count: u64,
}
