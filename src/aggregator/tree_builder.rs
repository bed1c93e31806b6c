//! Merge every sample into one weighted call tree.
//!
//! Each sample is walked from the shared root. Immediate repeats of the same
//! address are collapsed, assembler trampolines are ignored, and line markers
//! annotate whichever node the walk is currently on.

use crate::stats::{FrameMarker, Profile, Stats};
use crate::tree::{CallTree, Node};
use crate::utils::error::StatsError;
use log::debug;

/// Create the tree root from the first profile that has any call frames
///
/// **Public** - first step of `build_tree`
///
/// The root's count is the number of profiles in the whole dataset, not the
/// number that actually contain the root frame.
///
/// # Errors
/// * `StatsError::EmptyDataset` - no profile contains a call frame
pub fn locate_root(stats: &Stats) -> Result<Node, StatsError> {
    let top_addr = stats
        .profiles()
        .iter()
        .find(|profile| profile.has_code_frames())
        .and_then(|profile| profile.frames.iter().find_map(FrameMarker::addr))
        .ok_or(StatsError::EmptyDataset)?;

    Ok(Node::with_count(
        top_addr,
        stats.resolve_name(top_addr),
        stats.profile_count() as u64,
    ))
}

/// Build the raw (unlocated) call tree
///
/// **Public** - rebuilt on every call; nothing is cached on `Stats`
///
/// # Errors
/// * `StatsError::EmptyDataset` - no profile contains a call frame
pub fn build_tree(stats: &Stats) -> Result<CallTree, StatsError> {
    debug!("Building call tree from {} profiles", stats.profile_count());

    let mut root = locate_root(stats)?;

    for profile in stats.profiles() {
        walk_profile(stats, &mut root, profile);
    }

    let tree = CallTree::from_root(root);
    debug!("Call tree has {} nodes", tree.root().node_count());

    Ok(tree)
}

/// Fold one sample into the tree
///
/// **Private** - internal helper for build_tree
fn walk_profile(stats: &Stats, root: &mut Node, profile: &Profile) {
    let mut cur: &mut Node = root;
    let mut last_addr = cur.addr();
    let mut last_frame: Option<&FrameMarker> = None;

    for frame in &profile.frames {
        if frame.is_assembler() {
            continue;
        }
        last_frame = Some(frame);

        match *frame {
            FrameMarker::LineMarker(line) => cur.record_line(line),
            FrameMarker::CodeAddress { addr, .. } => {
                if addr == last_addr {
                    continue;
                }
                last_addr = addr;
                cur = cur.add_child(addr, stats.resolve_name(addr));
            }
        }
    }

    if let Some(key) = last_frame.and_then(FrameMarker::mode).and_then(|m| m.meta_key()) {
        cur.record_meta(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::AddressDictionary;

    fn dict() -> AddressDictionary {
        vec![(1u64, "py:f:1:a"), (2u64, "py:g:2:a"), (3u64, "py:h:3:a")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_single_chain() {
        let stats = Stats::new(vec![Profile::from_raw(&[1, 2, 3])], Some(dict()));
        let tree = build_tree(&stats).unwrap();
        let root = tree.root();

        assert_eq!(root.addr(), 1);
        assert_eq!(root.name(), "py:f:1:a");
        assert_eq!(root.count(), 1);
        assert_eq!(root.self_count(), 0);

        let child = root.child(2).unwrap();
        assert_eq!(child.count(), 1);
        assert_eq!(child.self_count(), 0);

        let grandchild = child.child(3).unwrap();
        assert_eq!(grandchild.count(), 1);
        assert_eq!(grandchild.self_count(), 1);
    }

    #[test]
    fn test_immediate_duplicates_collapse() {
        let stats = Stats::new(vec![Profile::from_raw(&[1, 2, 2, 3])], None);
        let tree = build_tree(&stats).unwrap();

        let child = tree.root().child(2).unwrap();
        assert_eq!(child.count(), 1);
        assert_eq!(child.child(3).unwrap().count(), 1);
    }

    #[test]
    fn test_line_markers_annotate_cursor() {
        let stats = Stats::new(vec![Profile::from_raw(&[1, -10, 2, -20, -20])], None)
            .with_profile_lines(true);
        let tree = build_tree(&stats).unwrap();

        assert_eq!(tree.root().lines()[&10u64], 1);
        assert_eq!(tree.root().child(2).unwrap().lines()[&20u64], 2);
    }

    #[test]
    fn test_dedup_looks_through_lines_and_assembler() {
        let profiles = vec![
            Profile::from_raw(&[1, 2, -5, 2, 3]),
            Profile::new(vec![
                FrameMarker::plain(1),
                FrameMarker::plain(2),
                FrameMarker::assembler(9),
                FrameMarker::plain(2),
            ]),
        ];
        let stats = Stats::new(profiles, None);
        let tree = build_tree(&stats).unwrap();

        let two = tree.root().child(2).unwrap();
        assert_eq!(tree.root().child_count(), 1);
        assert_eq!(two.count(), 2);
        assert_eq!(two.lines()[&5u64], 1);

        let grandchildren: Vec<(u64, u64)> =
            two.children().map(|c| (c.addr(), c.count())).collect();
        assert_eq!(grandchildren, vec![(3, 1)]);
    }

    #[test]
    fn test_assembler_frames_ignored() {
        let profile = Profile::new(vec![
            FrameMarker::plain(1),
            FrameMarker::assembler(7),
            FrameMarker::plain(2),
        ]);
        let stats = Stats::new(vec![profile], None);
        let tree = build_tree(&stats).unwrap();

        assert!(tree.root().child(7).is_err());
        assert_eq!(tree.root().child(2).unwrap().count(), 1);
    }

    #[test]
    fn test_only_final_frame_tag_counts() {
        let profiles = vec![
            Profile::new(vec![FrameMarker::jitted(1), FrameMarker::plain(2)]),
            Profile::new(vec![FrameMarker::plain(1), FrameMarker::jitted(2)]),
            Profile::new(vec![FrameMarker::plain(1), FrameMarker::native(3)]),
        ];
        let stats = Stats::new(profiles, None);
        let tree = build_tree(&stats).unwrap();
        let root = tree.root();

        assert!(root.meta().is_empty());
        assert_eq!(root.child(2).unwrap().meta()["jit"], 1);
        assert_eq!(root.child(3).unwrap().meta()["native"], 1);
    }

    #[test]
    fn test_empty_dataset() {
        let stats = Stats::new(vec![Profile::default(), Profile::default()], None);
        assert!(matches!(locate_root(&stats), Err(StatsError::EmptyDataset)));
        assert!(matches!(build_tree(&stats), Err(StatsError::EmptyDataset)));
    }

    #[test]
    fn test_root_count_is_dataset_size() {
        let stats = Stats::new(
            vec![
                Profile::default(),
                Profile::from_raw(&[1, 2]),
                Profile::from_raw(&[4]),
            ],
            None,
        );
        let tree = build_tree(&stats).unwrap();

        assert_eq!(tree.root().addr(), 1);
        assert_eq!(tree.root().count(), 3);
        assert_eq!(tree.root().child(4).unwrap().count(), 1);
    }
}
