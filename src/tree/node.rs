//! Call-tree vertex.
//!
//! A node exclusively owns its children, keyed by address in first-seen
//! order. Self counts are not computed lazily: they are written once by
//! [`Node::seal`] after the tree is complete (see `CallTree::from_root`).

use super::serialize::SerializedNode;
use crate::utils::error::StatsError;
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Node {
    addr: u64,
    name: String,
    count: u64,
    self_count: u64,
    children: IndexMap<u64, Node>,
    lines: IndexMap<u64, u64>,
    meta: IndexMap<String, u64>,
}

impl Node {
    /// Create a node seen once
    pub fn new(addr: u64, name: impl Into<String>) -> Self {
        Self::with_count(addr, name, 1)
    }

    /// Create a node with an explicit cumulative count
    pub fn with_count(addr: u64, name: impl Into<String>, count: u64) -> Self {
        Self {
            addr,
            name: name.into(),
            count,
            self_count: 0,
            children: IndexMap::new(),
            lines: IndexMap::new(),
            meta: IndexMap::new(),
        }
    }

    pub fn addr(&self) -> u64 {
        self.addr
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Samples whose call path passes through this node
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Samples attributed to this node alone, as of the last seal
    pub fn self_count(&self) -> u64 {
        self.self_count
    }

    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.values()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Line number → hit count
    pub fn lines(&self) -> &IndexMap<u64, u64> {
        &self.lines
    }

    /// Execution-mode tag → occurrence count
    pub fn meta(&self) -> &IndexMap<String, u64> {
        &self.meta
    }

    /// Find-or-create the child for `addr`.
    ///
    /// A new child starts at count 1; an existing one is incremented. Either
    /// way the child is returned so a walk can continue from it.
    pub fn add_child(&mut self, addr: u64, name: impl Into<String>) -> &mut Node {
        match self.children.entry(addr) {
            Entry::Occupied(entry) => {
                let child = entry.into_mut();
                child.count += 1;
                child
            }
            Entry::Vacant(entry) => entry.insert(Node::new(addr, name)),
        }
    }

    pub(crate) fn record_line(&mut self, line: u64) {
        *self.lines.entry(line).or_insert(0) += 1;
    }

    pub(crate) fn record_meta(&mut self, key: &str) {
        *self.meta.entry(key.to_string()).or_insert(0) += 1;
    }

    /// Child by address
    pub fn child(&self, addr: u64) -> Result<&Node, StatsError> {
        self.children
            .get(&addr)
            .ok_or_else(|| StatsError::ChildNotFound(addr.to_string()))
    }

    /// First child whose name contains `fragment`
    pub fn child_by_name(&self, fragment: &str) -> Result<&Node, StatsError> {
        self.children
            .values()
            .find(|child| child.name.contains(fragment))
            .ok_or_else(|| StatsError::ChildNotFound(fragment.to_string()))
    }

    /// Follow a chain of name fragments from this node
    pub fn descendant(&self, path: &[&str]) -> Result<&Node, StatsError> {
        path.iter()
            .try_fold(self, |node, fragment| node.child_by_name(fragment))
    }

    /// Child with the largest count; the first one wins a tie
    pub fn heaviest_child(&self) -> Option<&Node> {
        let mut best: Option<&Node> = None;
        for child in self.children.values() {
            if best.map_or(true, |b| child.count > b.count) {
                best = Some(child);
            }
        }
        best
    }

    /// Compute self counts bottom-up for the whole subtree
    pub(crate) fn seal(&mut self) {
        let mut children_total = 0u64;
        for child in self.children.values_mut() {
            child.seal();
            children_total += child.count;
        }
        self.self_count = self.count.saturating_sub(children_total);
    }

    /// Copy of this subtree without nodes whose count is below `threshold`
    pub(crate) fn filtered(&self, threshold: u64) -> Node {
        let children = self
            .children
            .iter()
            .filter(|(_, child)| child.count >= threshold)
            .map(|(addr, child)| (*addr, child.filtered(threshold)))
            .collect();

        Node {
            children,
            ..self.shallow_clone()
        }
    }

    fn shallow_clone(&self) -> Node {
        Node {
            addr: self.addr,
            name: self.name.clone(),
            count: self.count,
            self_count: self.self_count,
            children: IndexMap::new(),
            lines: self.lines.clone(),
            meta: self.meta.clone(),
        }
    }

    /// Pre-order visit of every node in the subtree
    pub fn walk<F: FnMut(&Node)>(&self, callback: &mut F) {
        callback(self);
        for child in self.children.values() {
            child.walk(callback);
        }
    }

    /// Tag counts summed over the subtree
    pub fn cumulative_meta(&self) -> IndexMap<String, u64> {
        let mut totals = IndexMap::new();
        self.walk(&mut |node: &Node| {
            for (key, value) in &node.meta {
                *totals.entry(key.clone()).or_insert(0) += value;
            }
        });
        totals
    }

    /// Number of nodes in the subtree, this one included
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(Node::node_count).sum::<usize>()
    }

    /// Exchange structure: `[name, addr-as-text, count, meta, children]`
    pub fn serialize(&self) -> SerializedNode {
        SerializedNode(
            self.name.clone(),
            self.addr.to_string(),
            self.count,
            self.meta.clone(),
            self.children.values().map(Node::serialize).collect(),
        )
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.addr == other.addr
            && self.count == other.count
            && self.children == other.children
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut children: Vec<&Node> = self.children.values().collect();
        children.sort_by_key(|child| child.addr);

        let listed: Vec<String> = children
            .iter()
            .map(|child| format!("({}, {})", child.count, child.name))
            .collect();

        write!(f, "<Node: {} ({}) [{}]>", self.name, self.count, listed.join(", "))
    }
}
