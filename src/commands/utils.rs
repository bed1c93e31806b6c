use super::models::FunctionTarget;
use crate::stats::Stats;
use crate::tree::Node;
use crate::utils::config::{SCHEMA_VERSION, VM_META_KEY};
use anyhow::Result;
use log::warn;

/// Resolve a function target to a single address
pub fn resolve_target(stats: &Stats, target: &FunctionTarget) -> Result<u64> {
    match target {
        FunctionTarget::Addr(addr) => Ok(*addr),
        FunctionTarget::Name(part) => {
            let matches = stats.find_addrs_containing_name(part);
            let Some(first) = matches.first().copied() else {
                anyhow::bail!("No function name contains '{}'", part);
            };
            if matches.len() > 1 {
                warn!(
                    "{} functions match '{}', using {} ({})",
                    matches.len(),
                    part,
                    first,
                    stats.resolve_name(first)
                );
            }
            Ok(first)
        }
    }
}

/// Indented text rendering of a call tree
///
/// One line per node: cumulative count, self count and name. Execution-mode
/// tags are appended when present.
pub fn render_tree(root: &Node, max_depth: usize) -> String {
    let mut out = String::new();
    render_node(root, 0, max_depth, &mut out);
    out
}

fn render_node(node: &Node, depth: usize, max_depth: usize, out: &mut String) {
    let tags: Vec<String> = node
        .meta()
        .iter()
        .map(|(key, count)| format!("{}={}", key, count))
        .collect();

    out.push_str(&format!(
        "{}{:>8} {:>8}  {}",
        "  ".repeat(depth),
        node.count(),
        node.self_count(),
        node.name()
    ));
    if !tags.is_empty() {
        out.push_str(&format!(" [{}]", tags.join(", ")));
    }
    out.push('\n');

    if depth + 1 >= max_depth {
        if !node.is_leaf() {
            out.push_str(&format!("{}...\n", "  ".repeat(depth + 1)));
        }
        return;
    }

    for child in node.children() {
        render_node(child, depth + 1, max_depth, out);
    }
}

/// Print dataset header lines shared by every command
pub fn print_dataset_header(stats: &Stats) {
    println!("Profiles:  {}", stats.profile_count());
    println!("Command:   {}", stats.argv());
    println!("VM:        {}", stats.meta_or(VM_META_KEY, "unknown"));
    println!("Runtime:   {:.3}s", stats.runtime_in_microseconds() as f64 / 1_000_000.0);
}

/// Display version information
pub fn display_version() {
    println!("vmstat-tree v{}", env!("CARGO_PKG_VERSION"));
    println!("Dataset Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Call-tree and histogram views for sampling-profiler output.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{AddressDictionary, Profile};

    #[test]
    fn test_render_tree_depth_limit() {
        let mut root = Node::with_count(1, "root", 2);
        root.add_child(2, "a").add_child(3, "b");

        let full = render_tree(&root, 10);
        assert_eq!(full.lines().count(), 3);
        assert!(full.lines().nth(2).unwrap().ends_with("b"));

        let cut = render_tree(&root, 2);
        assert_eq!(cut.lines().count(), 3);
        assert!(cut.lines().nth(2).unwrap().trim() == "...");
    }

    #[test]
    fn test_resolve_target_by_name() {
        let dict: AddressDictionary = vec![(7u64, "py:parse_args:3:cli.py")].into_iter().collect();
        let stats = Stats::new(vec![Profile::from_raw(&[7])], Some(dict));

        let addr = resolve_target(&stats, &FunctionTarget::Name("parse".to_string())).unwrap();
        assert_eq!(addr, 7);
        assert!(resolve_target(&stats, &FunctionTarget::Name("nope".to_string())).is_err());
        assert_eq!(resolve_target(&stats, &FunctionTarget::Addr(3)).unwrap(), 3);
    }
}
