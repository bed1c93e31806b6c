use crate::utils::config::{LocatorConfig, DEFAULT_RENDER_DEPTH, DEFAULT_TOP_LIMIT};
use std::path::PathBuf;

/// Arguments for the top command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct TopArgs {
    /// Decoded dataset JSON
    pub input: PathBuf,

    /// Number of rows to print
    pub limit: usize,
}

impl Default for TopArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("profile.json"),
            limit: DEFAULT_TOP_LIMIT,
        }
    }
}

/// Arguments for the tree command
#[derive(Debug, Clone)]
pub struct TreeArgs {
    /// Decoded dataset JSON
    pub input: PathBuf,

    /// Where to write the serialized tree (optional)
    pub output: Option<PathBuf>,

    /// Drop nodes seen in fewer samples than this
    pub threshold: Option<u64>,

    /// Keep bootstrap frames instead of locating the program root
    pub raw: bool,

    /// Maximum depth of the printed tree
    pub depth: usize,

    /// Root locator naming convention
    pub locator: LocatorConfig,
}

impl Default for TreeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("profile.json"),
            output: None,
            threshold: None,
            raw: false,
            depth: DEFAULT_RENDER_DEPTH,
            locator: LocatorConfig::default(),
        }
    }
}

/// How the function command picks its target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionTarget {
    /// Exact code address
    Addr(u64),

    /// Substring of the symbol name
    Name(String),
}

/// Arguments for the function command
#[derive(Debug, Clone)]
pub struct FunctionArgs {
    /// Decoded dataset JSON
    pub input: PathBuf,

    pub target: FunctionTarget,

    /// Number of callees to print
    pub limit: usize,
}

impl Default for FunctionArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("profile.json"),
            target: FunctionTarget::Addr(0),
            limit: DEFAULT_TOP_LIMIT,
        }
    }
}

/// Arguments for the report command
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Decoded dataset JSON
    pub input: PathBuf,

    /// Output path for the JSON report
    pub output: PathBuf,

    /// Number of histogram rows to include
    pub limit: usize,

    /// Optional function to aggregate into the report
    pub function: Option<FunctionTarget>,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("profile.json"),
            output: PathBuf::from("report.json"),
            limit: DEFAULT_TOP_LIMIT,
            function: None,
        }
    }
}
