//! vmstat-tree
//!
//! Call-tree, flat histogram and subtree aggregation for decoded
//! statistical-sampling profiler output.
//!
//! This crate provides the core implementation for the
//! `vmstat-tree` CLI tool.
//!
//! ## Getting Started
//!
//! ```ignore
//! use vmstat_tree::aggregator::{get_tree, top_profile};
//! use vmstat_tree::parser::read_dataset;
//! use vmstat_tree::utils::LocatorConfig;
//!
//! let stats = read_dataset("profile.json")?;
//! let tree = get_tree(&stats, &LocatorConfig::default())?;
//! println!("{}", tree.to_json()?);
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod stats;
pub mod tree;
pub mod utils;
