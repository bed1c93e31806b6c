//! Frame markers: the per-entry values of a decoded sample.
//!
//! Every entry of a sample is classified exactly once, when the dataset is
//! decoded, into either a code address (with its execution mode) or a
//! line-number marker for the frame currently on top of the walk.

use crate::utils::config::{JIT_META_KEY, NATIVE_META_KEY};
use serde::{Deserialize, Serialize};

/// How the code at an address was executing when it was sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Interpreted code (no tag in the raw stream)
    #[default]
    Plain,

    /// Assembler trampoline; ignored by the call-tree builder
    Assembler,

    /// Just-in-time compiled code
    Jitted,

    /// Native (C or foreign) code
    Native,
}

impl ExecutionMode {
    /// Tag-count key recorded on a tree node for this mode, if any
    pub fn meta_key(self) -> Option<&'static str> {
        match self {
            ExecutionMode::Jitted => Some(JIT_META_KEY),
            ExecutionMode::Native => Some(NATIVE_META_KEY),
            ExecutionMode::Plain | ExecutionMode::Assembler => None,
        }
    }
}

/// One entry of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameMarker {
    /// A call frame
    CodeAddress { addr: u64, mode: ExecutionMode },

    /// Line number hit inside the current frame
    LineMarker(u64),
}

impl FrameMarker {
    pub fn plain(addr: u64) -> Self {
        FrameMarker::CodeAddress { addr, mode: ExecutionMode::Plain }
    }

    pub fn jitted(addr: u64) -> Self {
        FrameMarker::CodeAddress { addr, mode: ExecutionMode::Jitted }
    }

    pub fn native(addr: u64) -> Self {
        FrameMarker::CodeAddress { addr, mode: ExecutionMode::Native }
    }

    pub fn assembler(addr: u64) -> Self {
        FrameMarker::CodeAddress { addr, mode: ExecutionMode::Assembler }
    }

    pub fn line(line: u64) -> Self {
        FrameMarker::LineMarker(line)
    }

    /// Classify a raw signed entry: positive values are plain addresses,
    /// everything else is a line marker holding the absolute value.
    pub fn from_raw(raw: i64) -> Self {
        if raw > 0 {
            FrameMarker::plain(raw as u64)
        } else {
            FrameMarker::LineMarker(raw.unsigned_abs())
        }
    }

    /// Address of a code frame, `None` for line markers
    pub fn addr(&self) -> Option<u64> {
        match self {
            FrameMarker::CodeAddress { addr, .. } => Some(*addr),
            FrameMarker::LineMarker(_) => None,
        }
    }

    /// Execution mode of a code frame, `None` for line markers
    pub fn mode(&self) -> Option<ExecutionMode> {
        match self {
            FrameMarker::CodeAddress { mode, .. } => Some(*mode),
            FrameMarker::LineMarker(_) => None,
        }
    }

    pub fn is_assembler(&self) -> bool {
        self.mode() == Some(ExecutionMode::Assembler)
    }

    pub fn is_line(&self) -> bool {
        matches!(self, FrameMarker::LineMarker(_))
    }
}
