//! Skip interpreter and launcher frames to find the program's own entry point.

use super::tree_builder::build_tree;
use crate::stats::Stats;
use crate::tree::{CallTree, Node};
use crate::utils::config::LocatorConfig;
use crate::utils::error::StatsError;
use log::debug;

/// Descend from `root` to the first real module entry
///
/// **Public** - heuristic; never fails
///
/// At each step the current node is returned if it is an entry point that
/// does not belong to the profiler driver. Otherwise the walk follows the
/// heaviest child. Reaching a leaf means the heuristic found nothing, and the
/// original root is returned.
pub fn filter_top<'a>(root: &'a Node, config: &LocatorConfig) -> &'a Node {
    let mut top = root;

    loop {
        if config.is_entry(top.name()) {
            debug!("Located program root at {} ({})", top.name(), top.addr());
            return top;
        }

        match top.heaviest_child() {
            Some(next) => top = next,
            None => {
                debug!("No module entry found; keeping the raw root");
                return root;
            }
        }
    }
}

/// Build the call tree and cut it at the located program root
///
/// **Public** - main entry point for the tree view
///
/// # Errors
/// * `StatsError::EmptyDataset` - no profile contains a call frame
pub fn get_tree(stats: &Stats, config: &LocatorConfig) -> Result<CallTree, StatsError> {
    let raw = build_tree(stats)?;
    let top = filter_top(raw.root(), config);

    if std::ptr::eq(top, raw.root()) {
        return Ok(raw);
    }

    Ok(CallTree::from_root(top.clone()))
}
