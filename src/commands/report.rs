//! Report command: flat histogram and optional function view as one JSON file.

use super::analyze::validate_limit;
use super::models::ReportArgs;
use super::utils::resolve_target;
use crate::aggregator::{function_profile, top_profile};
use crate::output::{validate_path, write_report};
use crate::parser::read_dataset;
use crate::parser::schema::{CalleeEntry, FunctionView, TopEntry, ViewReport};
use crate::stats::Stats;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use log::info;

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
pub fn execute_report(args: &ReportArgs) -> Result<()> {
    validate_limit(args.limit)?;
    validate_path(&args.output)?;

    let stats = read_dataset(&args.input)
        .with_context(|| format!("Failed to load dataset {}", args.input.display()))?;

    let report = build_report(&stats, args)?;

    write_report(&report, &args.output).context("Failed to write report JSON")?;
    info!("✓ Report written to: {}", args.output.display());

    Ok(())
}

/// Assemble a report from a loaded dataset
///
/// **Public** - useful for tests and in-memory use
pub fn build_report(stats: &Stats, args: &ReportArgs) -> Result<ViewReport> {
    let mut top_functions: Vec<TopEntry> = top_profile(stats)
        .into_iter()
        .map(|(name, count)| TopEntry { name, count })
        .collect();
    top_functions.sort_by(|a, b| b.count.cmp(&a.count));
    top_functions.truncate(args.limit);

    let function = match &args.function {
        Some(target) => Some(function_view(stats, resolve_target(stats, target)?)),
        None => None,
    };

    Ok(ViewReport {
        version: SCHEMA_VERSION.to_string(),
        argv: stats.argv().to_string(),
        runtime_us: stats.runtime_in_microseconds(),
        profile_count: stats.profile_count(),
        top_functions,
        function,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

fn function_view(stats: &Stats, target: u64) -> FunctionView {
    let profile = function_profile(stats, target);

    FunctionView {
        addr: target.to_string(),
        name: stats.resolve_name(target),
        total: profile.total,
        callees: profile
            .callees
            .into_iter()
            .map(|(addr, count)| CalleeEntry {
                addr: addr.to_string(),
                name: stats.resolve_name(addr),
                count,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::models::FunctionTarget;
    use crate::stats::Profile;

    #[test]
    fn test_build_report() {
        let stats = Stats::new(
            vec![Profile::from_raw(&[1, 2, 3]), Profile::from_raw(&[1, 2])],
            None,
        );
        let args = ReportArgs {
            limit: 2,
            function: Some(FunctionTarget::Addr(2)),
            ..Default::default()
        };

        let report = build_report(&stats, &args).unwrap();
        assert_eq!(report.profile_count, 2);
        assert_eq!(report.top_functions.len(), 2);
        assert_eq!(report.top_functions[0].count, 2);

        let function = report.function.unwrap();
        assert_eq!(function.total, 2);
        assert_eq!(function.callees[0].addr, "3");
    }
}
