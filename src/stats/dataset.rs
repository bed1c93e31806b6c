//! The decoded dataset: profiles, address dictionary and process metadata.

use super::dictionary::{AddressDictionary, Descriptor};
use super::frame::FrameMarker;
use crate::utils::config::{ARGV_META_KEY, UNKNOWN_CODE_NAME, UNKNOWN_SYMBOL};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// One stored sample
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    /// Frame markers, outermost call first
    pub frames: Vec<FrameMarker>,

    /// Optional per-sample metadata carried through from the decoder
    pub meta: IndexMap<String, serde_json::Value>,
}

impl Profile {
    pub fn new(frames: Vec<FrameMarker>) -> Self {
        Self {
            frames,
            meta: IndexMap::new(),
        }
    }

    /// Build a profile of plain addresses and line markers from raw values
    pub fn from_raw(raw: &[i64]) -> Self {
        Self::new(raw.iter().copied().map(FrameMarker::from_raw).collect())
    }

    /// Whether the sample holds at least one call frame
    pub fn has_code_frames(&self) -> bool {
        self.frames.iter().any(|frame| frame.addr().is_some())
    }
}

/// Full dataset handed to the aggregators
///
/// **Public** - immutable once constructed; every view is derived on demand
#[derive(Debug, Clone, Default)]
pub struct Stats {
    profiles: Vec<Profile>,
    addresses: Option<AddressDictionary>,
    meta: IndexMap<String, String>,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    profile_lines: bool,
}

impl Stats {
    /// Create a dataset from decoded profiles and an optional dictionary
    pub fn new(profiles: Vec<Profile>, addresses: Option<AddressDictionary>) -> Self {
        Self {
            profiles,
            addresses,
            ..Self::default()
        }
    }

    /// Attach process/session metadata
    pub fn with_meta(mut self, meta: IndexMap<String, String>) -> Self {
        self.meta = meta;
        self
    }

    /// Attach start and end timestamps
    pub fn with_times(
        mut self,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    /// Mark samples as interleaving address and line entries
    pub fn with_profile_lines(mut self, profile_lines: bool) -> Self {
        self.profile_lines = profile_lines;
        self
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    pub fn addresses(&self) -> Option<&AddressDictionary> {
        self.addresses.as_ref()
    }

    pub fn meta(&self) -> &IndexMap<String, String> {
        &self.meta
    }

    pub fn profile_lines(&self) -> bool {
        self.profile_lines
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Wall-clock duration of the profiled run
    ///
    /// Returns 0 when either timestamp is missing (older profilers do not
    /// emit them).
    pub fn runtime_in_microseconds(&self) -> i64 {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => (end - start).num_microseconds().unwrap_or(i64::MAX),
            _ => 0,
        }
    }

    /// Command line of the profiled process
    pub fn argv(&self) -> &str {
        self.meta_or(ARGV_META_KEY, "")
    }

    pub fn meta_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.meta.get(key).map(String::as_str).unwrap_or(default)
    }

    /// Display name used for tree nodes and the flat histogram.
    ///
    /// The full descriptor string when a dictionary is present, a placeholder
    /// for addresses it lacks, and the decimal address when there is no
    /// dictionary at all.
    pub fn resolve_name(&self, addr: u64) -> String {
        match &self.addresses {
            Some(dict) => dict.get(addr).unwrap_or(UNKNOWN_CODE_NAME).to_string(),
            None => addr.to_string(),
        }
    }

    /// Bare symbol of an address, or `"unknown"`
    pub fn symbol_name(&self, addr: u64) -> String {
        self.addr_info(addr)
            .map(|desc| desc.symbol)
            .unwrap_or_else(|| UNKNOWN_SYMBOL.to_string())
    }

    /// Parsed descriptor of an address
    pub fn addr_info(&self, addr: u64) -> Option<Descriptor> {
        self.addresses.as_ref()?.descriptor(addr)
    }

    /// Addresses whose symbol contains `part`, in dictionary order
    pub fn find_addrs_containing_name(&self, part: &str) -> Vec<u64> {
        let Some(dict) = &self.addresses else {
            return Vec::new();
        };

        dict.iter()
            .filter_map(|(addr, raw)| {
                let desc = Descriptor::parse(raw)?;
                desc.symbol.contains(part).then_some(addr)
            })
            .collect()
    }

    /// Resolved names of the frames of one profile
    pub fn display(&self, index: usize) -> Option<Vec<String>> {
        let profile = self.profiles.get(index)?;

        Some(
            profile
                .frames
                .iter()
                .map(|frame| match frame {
                    FrameMarker::CodeAddress { addr, .. } => self.resolve_name(*addr),
                    FrameMarker::LineMarker(line) => format!("line {}", line),
                })
                .collect(),
        )
    }
}
