//! Read-only traversal and search over query trees.
//!
//! Two iterators are provided:
//! - [`DfsIter`] -- depth-first (pre-order) traversal using a stack. Visits a node
//!   before its children, children in the order [`Node::children`] lists them.
//! - [`BfsIter`] -- breadth-first (level-order) traversal using a queue.
//!
//! Both are available through the [`NodeWalk`] trait. Ownership is a strict
//! tree, so neither iterator needs a visited set.

use crate::kinds::{NodeClass, NodeKind};
use crate::node::Node;
use std::collections::VecDeque;

/// Pre-order depth-first iterator over a node tree.
///
/// Created via [`NodeWalk::dfs`] or [`DfsIter::new`].
pub struct DfsIter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> DfsIter<'a> {
    /// Create a new DFS iterator starting from the given node
    pub fn new(root: &'a Node) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for DfsIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;

        // Add children in reverse order so they come out in forward order
        for (_, child) in node.children().into_iter().rev() {
            self.stack.push(child);
        }

        Some(node)
    }
}

/// Level-order breadth-first iterator over a node tree.
///
/// Created via [`NodeWalk::bfs`] or [`BfsIter::new`].
pub struct BfsIter<'a> {
    queue: VecDeque<&'a Node>,
}

impl<'a> BfsIter<'a> {
    /// Create a new BFS iterator starting from the given node
    pub fn new(root: &'a Node) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(root);
        Self { queue }
    }
}

impl<'a> Iterator for BfsIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        for (_, child) in node.children() {
            self.queue.push_back(child);
        }
        Some(node)
    }
}

/// Extension trait adding traversal and search methods to [`Node`].
pub trait NodeWalk {
    /// Depth-first (pre-order) iterator over this node and all descendants.
    fn dfs(&self) -> DfsIter<'_>;

    /// Breadth-first iterator over this node and all descendants.
    fn bfs(&self) -> BfsIter<'_>;

    /// First node matching `predicate` in depth-first order.
    fn find<F>(&self, predicate: F) -> Option<&Node>
    where
        F: Fn(&Node) -> bool;

    /// All nodes matching `predicate` in depth-first order.
    fn find_all<F>(&self, predicate: F) -> Vec<&Node>
    where
        F: Fn(&Node) -> bool;

    /// Whether this node or any descendant matches `predicate`.
    fn contains<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Node) -> bool;

    /// Number of nodes (including this one) matching `predicate`.
    fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Node) -> bool;

    /// Maximum depth below this node; a leaf has depth 0.
    fn tree_depth(&self) -> usize;
}

impl NodeWalk for Node {
    fn dfs(&self) -> DfsIter<'_> {
        DfsIter::new(self)
    }

    fn bfs(&self) -> BfsIter<'_> {
        BfsIter::new(self)
    }

    fn find<F>(&self, predicate: F) -> Option<&Node>
    where
        F: Fn(&Node) -> bool,
    {
        self.dfs().find(|n| predicate(n))
    }

    fn find_all<F>(&self, predicate: F) -> Vec<&Node>
    where
        F: Fn(&Node) -> bool,
    {
        self.dfs().filter(|n| predicate(n)).collect()
    }

    fn contains<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Node) -> bool,
    {
        self.dfs().any(|n| predicate(n))
    }

    fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Node) -> bool,
    {
        self.dfs().filter(|n| predicate(n)).count()
    }

    fn tree_depth(&self) -> usize {
        self.children()
            .into_iter()
            .map(|(_, child)| child.tree_depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Check if the node is an aggregate function call
pub fn is_aggregate(node: &Node) -> bool {
    node.kind() == NodeKind::Aggregate
}

/// Check if the node is a complete statement
pub fn is_statement(node: &Node) -> bool {
    node.kind().class() == NodeClass::Statement
}

/// Check if the node is a column reference
pub fn is_column(node: &Node) -> bool {
    node.kind() == NodeKind::ColumnReference
}
