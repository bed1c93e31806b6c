//! Analysis command implementations: top, tree and function.
//!
//! Every command:
//! 1. Loads the decoded dataset
//! 2. Derives one view from it
//! 3. Prints the view (and optionally writes it out)

use super::models::{FunctionArgs, TopArgs, TreeArgs};
use super::utils::{print_dataset_header, render_tree, resolve_target};
use crate::aggregator::{build_tree, function_profile, get_tree, top_profile};
use crate::output::{validate_path, write_tree};
use crate::parser::read_dataset;
use crate::utils::config::MAX_TOP_LIMIT;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the top command
///
/// **Public** - main entry point called from main.rs
///
/// Prints the flat histogram, most frequent functions first.
pub fn execute_top(args: &TopArgs) -> Result<()> {
    validate_limit(args.limit)?;

    let stats = read_dataset(&args.input)
        .with_context(|| format!("Failed to load dataset {}", args.input.display()))?;

    let mut rows = top_profile(&stats);
    rows.sort_by(|a, b| b.1.cmp(&a.1));

    print_dataset_header(&stats);
    println!();
    println!("{:>8} {:>7}  FUNCTION", "SAMPLES", "%");

    let total = stats.profile_count().max(1) as f64;
    for (name, count) in rows.iter().take(args.limit) {
        println!("{:>8} {:>6.1}%  {}", count, *count as f64 / total * 100.0, name);
    }

    Ok(())
}

/// Execute the tree command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Dataset load failures
/// * `StatsError::EmptyDataset` when no sample has frames
/// * File write errors
pub fn execute_tree(args: &TreeArgs) -> Result<()> {
    let start_time = Instant::now();

    if let Some(output) = &args.output {
        validate_path(output)?;
    }
    if args.depth == 0 {
        anyhow::bail!("depth must be greater than 0");
    }

    info!("Step 1/3: Loading dataset...");
    let stats = read_dataset(&args.input)
        .with_context(|| format!("Failed to load dataset {}", args.input.display()))?;

    info!("Step 2/3: Building call tree...");
    let mut tree = if args.raw {
        build_tree(&stats)
    } else {
        get_tree(&stats, &args.locator)
    }
    .context("Failed to build call tree")?;

    if let Some(threshold) = args.threshold {
        let before = tree.root().node_count();
        tree = tree.filter(threshold);
        debug!(
            "Threshold {} kept {} of {} nodes",
            threshold,
            tree.root().node_count(),
            before
        );
    }

    print_dataset_header(&stats);
    println!();
    println!("{:>8} {:>8}  FUNCTION", "TOTAL", "SELF");
    print!("{}", render_tree(tree.root(), args.depth));

    info!("Step 3/3: Writing outputs...");
    if let Some(output) = &args.output {
        write_tree(&tree.serialize(), output).context("Failed to write serialized tree")?;
        info!("✓ Tree written to: {}", output.display());
    }

    info!("Tree completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(())
}

/// Execute the function command
///
/// **Public** - main entry point called from main.rs
pub fn execute_function(args: &FunctionArgs) -> Result<()> {
    validate_limit(args.limit)?;

    let stats = read_dataset(&args.input)
        .with_context(|| format!("Failed to load dataset {}", args.input.display()))?;

    let target = resolve_target(&stats, &args.target)?;
    let profile = function_profile(&stats, target);

    println!("Function: {} ({})", stats.resolve_name(target), target);
    println!("Seen in:  {} of {} profiles", profile.total, stats.profile_count());
    println!();
    println!("{:>8}  CALLEE", "SAMPLES");

    // Ascending order from the aggregator; print the heaviest first
    for (addr, count) in profile.callees.iter().rev().take(args.limit) {
        println!("{:>8}  {}", count, stats.resolve_name(*addr));
    }

    Ok(())
}

/// Validate a row limit
///
/// **Public** - can be called before execution for early validation
pub fn validate_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        anyhow::bail!("limit must be greater than 0");
    }

    if limit > MAX_TOP_LIMIT {
        anyhow::bail!("limit is too large (max {})", MAX_TOP_LIMIT);
    }

    Ok(())
}
