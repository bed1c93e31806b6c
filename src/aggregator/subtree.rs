//! Aggregate everything reached below a given address.

use crate::stats::Stats;
use indexmap::IndexMap;
use log::debug;
use std::collections::HashSet;

/// Callees of one function across the dataset
///
/// **Public** - returned from function_profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionProfile {
    /// `(address, profiles reaching it below the target)`, ascending by count
    pub callees: Vec<(u64, u64)>,

    /// Number of profiles in which the target appears
    pub total: u64,
}

impl FunctionProfile {
    /// Count for one callee address
    pub fn count_for(&self, addr: u64) -> Option<u64> {
        self.callees
            .iter()
            .find(|(callee, _)| *callee == addr)
            .map(|(_, count)| *count)
    }
}

/// Functions called, directly or indirectly, under `target`
///
/// **Public** - main entry point for the subtree view
///
/// Within a profile nothing is counted until `target` first appears. From
/// then on each distinct address is counted once for that profile. A later
/// reappearance of `target` does not restart counting; it is counted like any
/// other callee.
pub fn function_profile(stats: &Stats, target: u64) -> FunctionProfile {
    let mut result: IndexMap<u64, u64> = IndexMap::new();
    let mut total = 0u64;

    for profile in stats.profiles() {
        let mut seen: HashSet<u64> = HashSet::new();
        let mut counting = false;

        for addr in profile.frames.iter().filter_map(|frame| frame.addr()) {
            if counting {
                if seen.insert(addr) {
                    *result.entry(addr).or_insert(0) += 1;
                }
            } else if addr == target {
                counting = true;
                total += 1;
            }
        }
    }

    let mut callees: Vec<(u64, u64)> = result.into_iter().collect();
    callees.sort_by_key(|(_, count)| *count);

    debug!("Function {} seen in {} profiles, {} callees", target, total, callees.len());

    FunctionProfile { callees, total }
}
