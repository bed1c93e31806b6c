//! Flat "topmost function" histogram.
//!
//! Counts, for every address, the number of profiles it appears in. An
//! address repeated inside one sample (recursion, duplicated frames) still
//! contributes once for that sample.

use crate::stats::{FrameMarker, Stats};
use indexmap::IndexMap;
use log::{debug, warn};
use std::collections::HashSet;

/// Per-address presence counts in first-seen order
///
/// **Public** - raw form of `top_profile`, keyed by address
pub fn top_counts(stats: &Stats) -> IndexMap<u64, u64> {
    let mut counts: IndexMap<u64, u64> = IndexMap::new();

    for profile in stats.profiles() {
        let mut seen: HashSet<u64> = HashSet::new();

        for (index, frame) in profile.frames.iter().enumerate() {
            if stats.profile_lines() && index % 2 == 1 {
                if !frame.is_line() {
                    warn!("Expected line marker at entry {}, found {:?}", index, frame);
                }
                continue;
            }

            let addr = match frame {
                FrameMarker::CodeAddress { addr, .. } => *addr,
                FrameMarker::LineMarker(_) => continue,
            };

            if seen.insert(addr) {
                *counts.entry(addr).or_insert(0) += 1;
            }
        }
    }

    debug!("Flat histogram covers {} distinct addresses", counts.len());

    counts
}

/// Flat histogram with resolved names
///
/// **Public** - main entry point for the flat view
///
/// # Returns
/// `(name, count)` pairs in first-seen order; unsorted
pub fn top_profile(stats: &Stats) -> Vec<(String, u64)> {
    top_counts(stats)
        .into_iter()
        .map(|(addr, count)| (stats.resolve_name(addr), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Profile;

    #[test]
    fn test_repeated_address_counts_once() {
        let stats = Stats::new(vec![Profile::from_raw(&[5, 5, 6])], None);
        assert_eq!(
            top_profile(&stats),
            vec![("5".to_string(), 1), ("6".to_string(), 1)]
        );
    }

    #[test]
    fn test_counts_across_profiles() {
        let stats = Stats::new(
            vec![
                Profile::from_raw(&[1, 2]),
                Profile::from_raw(&[1, 3, 1]),
                Profile::from_raw(&[]),
            ],
            None,
        );

        let counts = top_counts(&stats);
        assert_eq!(counts[&1u64], 2);
        assert_eq!(counts[&2u64], 1);
        assert_eq!(counts[&3u64], 1);
        assert_eq!(counts.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_line_entries_skipped() {
        let stats = Stats::new(vec![Profile::from_raw(&[1, -3, 2, -8])], None)
            .with_profile_lines(true);

        let counts = top_counts(&stats);
        assert_eq!(counts.len(), 2);
        assert!(!counts.contains_key(&3u64));
        assert!(!counts.contains_key(&8u64));
    }

    #[test]
    fn test_odd_entries_skipped_in_line_mode() {
        let stats = Stats::new(vec![Profile::from_raw(&[1, 2, 3])], None)
            .with_profile_lines(true);

        let counts = top_counts(&stats);
        assert_eq!(counts.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
    }
}
