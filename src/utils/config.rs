//! Configuration and constants for the aggregator and the CLI.

/// Current dataset and report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Name prefix of a module-level entry frame in the sampled program
pub const MODULE_ENTRY_PREFIX: &str = "py:<module>";

/// Substring identifying the profiler's own driver module
pub const PROFILER_DRIVER_MARKER: &str = "vmprof/__main__.py";

// Placeholders for addresses the dictionary cannot resolve
pub const UNKNOWN_CODE_NAME: &str = "<unknown code>";
pub const UNKNOWN_SYMBOL: &str = "unknown";

// Execution-mode tag keys stored on tree nodes
pub const JIT_META_KEY: &str = "jit";
pub const NATIVE_META_KEY: &str = "native";

// Well-known dataset metadata keys
pub const ARGV_META_KEY: &str = "argv";
pub const VM_META_KEY: &str = "VM";

// CLI limits
pub const DEFAULT_TOP_LIMIT: usize = 20;
pub const MAX_TOP_LIMIT: usize = 1000;
pub const DEFAULT_RENDER_DEPTH: usize = 12;

/// Settings for the bootstrap-skipping root locator
///
/// **Public** - passed to `filter_top` and `get_tree`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorConfig {
    /// Names starting with this prefix are program entry points
    pub entry_prefix: String,

    /// Entry points whose name contains this marker belong to the profiler
    pub driver_marker: String,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            entry_prefix: MODULE_ENTRY_PREFIX.to_string(),
            driver_marker: PROFILER_DRIVER_MARKER.to_string(),
        }
    }
}

impl LocatorConfig {
    /// Create a locator config with the default naming convention
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the module-entry prefix
    pub fn with_entry_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.entry_prefix = prefix.into();
        self
    }

    /// Override the profiler driver marker
    pub fn with_driver_marker(mut self, marker: impl Into<String>) -> Self {
        self.driver_marker = marker.into();
        self
    }

    /// Check whether a node name is a real program entry point
    pub fn is_entry(&self, name: &str) -> bool {
        name.starts_with(&self.entry_prefix) && !name.contains(&self.driver_marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entry_matching() {
        let config = LocatorConfig::default();
        assert!(config.is_entry("py:<module>:1:app.py"));
        assert!(!config.is_entry("py:<module>:1:/site-packages/vmprof/__main__.py"));
        assert!(!config.is_entry("py:main:1:app.py"));
    }

    #[test]
    fn test_custom_prefix() {
        let config = LocatorConfig::new()
            .with_entry_prefix("rb:<main>")
            .with_driver_marker("profiler/boot.rb");
        assert!(config.is_entry("rb:<main>:1:script.rb"));
        assert!(!config.is_entry("py:<module>:1:app.py"));
    }
}
