//! Merged call tree and its exchange format.

pub mod node;
pub mod serialize;

pub use node::Node;
pub use serialize::SerializedNode;

/// A finished call tree with self counts computed
///
/// **Public** - returned by `build_tree` and `get_tree`
///
/// The root is only reachable through shared references, so the self counts
/// written at construction cannot go stale. Filtering produces a new tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CallTree {
    root: Node,
}

impl CallTree {
    /// Seal a fully built node hierarchy
    pub fn from_root(mut root: Node) -> Self {
        root.seal();
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// New tree without the nodes whose count is below `threshold`.
    ///
    /// The root is always kept; `self` is left untouched.
    pub fn filter(&self, threshold: u64) -> CallTree {
        CallTree::from_root(self.root.filtered(threshold))
    }

    pub fn serialize(&self) -> SerializedNode {
        self.root.serialize()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        self.serialize().to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> CallTree {
        let mut root = Node::with_count(1, "root", 4);
        let a = root.add_child(2, "a");
        a.add_child(4, "a1");
        a.add_child(5, "a2");
        root.add_child(2, "a").add_child(4, "a1");
        root.add_child(3, "b");
        CallTree::from_root(root)
    }

    #[test]
    fn test_filter_is_pure() {
        let tree = sample_tree();
        let filtered = tree.filter(2);

        assert_eq!(tree.root().node_count(), 5);
        assert_eq!(filtered.root().node_count(), 3);
        assert!(filtered.root().child(3).is_err());
        assert!(filtered.root().child(2).unwrap().child(5).is_err());
    }

    #[test]
    fn test_filter_reseals_self_counts() {
        let tree = sample_tree();
        assert_eq!(tree.root().self_count(), 1);

        let filtered = tree.filter(2);
        assert_eq!(filtered.root().self_count(), 2);
        assert_eq!(filtered.root().child(2).unwrap().self_count(), 0);
    }
}
