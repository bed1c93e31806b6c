//! vmstat-tree CLI
//!
//! Loads a decoded sampling-profiler dataset and prints the flat histogram,
//! the merged call tree, or the callees of a single function.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use vmstat_tree::commands::utils::display_version;
use vmstat_tree::commands::{
    execute_function, execute_report, execute_top, execute_tree, FunctionArgs, FunctionTarget,
    ReportArgs, TopArgs, TreeArgs,
};
use vmstat_tree::utils::config::{
    DEFAULT_RENDER_DEPTH, DEFAULT_TOP_LIMIT, MODULE_ENTRY_PREFIX, PROFILER_DRIVER_MARKER,
};
use vmstat_tree::utils::LocatorConfig;

/// vmstat-tree - views over sampling-profiler output
#[derive(Parser, Debug)]
#[command(name = "vmstat-tree")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Flat histogram of the functions seen in each sample
    Top {
        /// Decoded dataset JSON
        #[arg(short, long, env = "VMSTAT_INPUT")]
        input: PathBuf,

        /// Number of rows to print
        #[arg(long, default_value_t = DEFAULT_TOP_LIMIT)]
        limit: usize,
    },

    /// Merged call tree
    Tree {
        /// Decoded dataset JSON
        #[arg(short, long, env = "VMSTAT_INPUT")]
        input: PathBuf,

        /// Output path for the serialized tree (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Drop nodes seen in fewer samples than this
        #[arg(long)]
        threshold: Option<u64>,

        /// Keep interpreter and launcher frames
        #[arg(long)]
        raw: bool,

        /// Maximum depth of the printed tree
        #[arg(long, default_value_t = DEFAULT_RENDER_DEPTH)]
        depth: usize,

        /// Name prefix of the program's module entry frame
        #[arg(long, default_value = MODULE_ENTRY_PREFIX)]
        entry_prefix: String,

        /// Marker identifying the profiler's own driver module
        #[arg(long, default_value = PROFILER_DRIVER_MARKER)]
        driver_marker: String,
    },

    /// Everything called under one function
    Function {
        /// Decoded dataset JSON
        #[arg(short, long, env = "VMSTAT_INPUT")]
        input: PathBuf,

        /// Code address of the function
        #[arg(long, conflicts_with = "name", required_unless_present = "name")]
        addr: Option<u64>,

        /// Substring of the function's symbol
        #[arg(long)]
        name: Option<String>,

        /// Number of callees to print
        #[arg(long, default_value_t = DEFAULT_TOP_LIMIT)]
        limit: usize,
    },

    /// Write the histogram (and optionally a function view) as JSON
    Report {
        /// Decoded dataset JSON
        #[arg(short, long, env = "VMSTAT_INPUT")]
        input: PathBuf,

        /// Output path for the JSON report
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Number of histogram rows to include
        #[arg(long, default_value_t = DEFAULT_TOP_LIMIT)]
        limit: usize,

        /// Include the callees of this code address
        #[arg(long, conflicts_with = "function_name")]
        function: Option<u64>,

        /// Include the callees of the function whose symbol contains this text
        #[arg(long)]
        function_name: Option<String>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Top { input, limit } => {
            execute_top(&TopArgs { input, limit })?;
        }

        Commands::Tree {
            input,
            output,
            threshold,
            raw,
            depth,
            entry_prefix,
            driver_marker,
        } => {
            let locator = LocatorConfig::new()
                .with_entry_prefix(entry_prefix)
                .with_driver_marker(driver_marker);

            execute_tree(&TreeArgs {
                input,
                output,
                threshold,
                raw,
                depth,
                locator,
            })?;
        }

        Commands::Function {
            input,
            addr,
            name,
            limit,
        } => {
            let target = function_target(addr, name)
                .ok_or_else(|| anyhow::anyhow!("Either --addr or --name is required"))?;

            execute_function(&FunctionArgs {
                input,
                target,
                limit,
            })?;
        }

        Commands::Report {
            input,
            output,
            limit,
            function,
            function_name,
        } => {
            execute_report(&ReportArgs {
                input,
                output,
                limit,
                function: function_target(function, function_name),
            })?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// An address wins over a name; clap already rejects passing both
fn function_target(addr: Option<u64>, name: Option<String>) -> Option<FunctionTarget> {
    addr.map(FunctionTarget::Addr)
        .or_else(|| name.map(FunctionTarget::Name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_function(args: &[&str]) -> Option<FunctionTarget> {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Report {
                function,
                function_name,
                ..
            } => function_target(function, function_name),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_report_function_by_addr() {
        let target = report_function(&[
            "vmstat-tree",
            "report",
            "-i",
            "d.json",
            "--function",
            "42",
        ]);
        assert!(matches!(target, Some(FunctionTarget::Addr(42))));
    }

    #[test]
    fn test_report_function_by_name() {
        let target = report_function(&[
            "vmstat-tree",
            "report",
            "-i",
            "d.json",
            "--function-name",
            "load",
        ]);
        assert!(matches!(target, Some(FunctionTarget::Name(ref name)) if name == "load"));
    }

    #[test]
    fn test_report_without_function() {
        assert!(report_function(&["vmstat-tree", "report", "-i", "d.json"]).is_none());
    }

    #[test]
    fn test_report_rejects_both_function_flags() {
        let result = Cli::try_parse_from([
            "vmstat-tree",
            "report",
            "-i",
            "d.json",
            "--function",
            "42",
            "--function-name",
            "load",
        ]);
        assert!(result.is_err());
    }
}
