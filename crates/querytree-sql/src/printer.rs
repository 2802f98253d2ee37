//! Diagnostic tree printing.
//!
//! A node is rendered as its kind name followed by its [`Node::describe`]
//! lines, all at the node's indentation. Each group of children sharing a
//! label gets one `label:` line at the parent's indentation, and the
//! children follow one level deeper:
//!
//! ```text
//! Aggregate
//! aggregateName: SUM
//! aggregateDefinition: SumAgg
//! distinct: true
//! operand:
//!   ColumnReference
//!   columnName: x
//! ```
//!
//! [`TreeLines`] yields these lines lazily; it holds only a stack of pending
//! nodes, so printing a tree twice just means creating a second iterator.

use crate::context::MAX_INDENT;
use crate::node::Node;
use std::collections::VecDeque;

const DEFAULT_INDENT: usize = 2;

enum Frame<'a> {
    Node { node: &'a Node, depth: usize },
    Label { label: &'static str, depth: usize },
}

/// Lazy, depth-first sequence of rendered lines for a tree.
pub struct TreeLines<'a> {
    stack: Vec<Frame<'a>>,
    pending: VecDeque<String>,
    indent: usize,
}

impl<'a> TreeLines<'a> {
    /// Lines for `root` printed at `depth`, indented per the root's session
    /// options (two spaces per level if the session is gone).
    pub fn new(root: &'a Node, depth: usize) -> Self {
        let indent = root
            .context()
            .get()
            .map(|context| context.options().indent)
            .unwrap_or(DEFAULT_INDENT);
        Self::with_indent(root, depth, indent)
    }

    /// Lines with an explicit indentation width, clamped to `1..=MAX_INDENT`.
    pub fn with_indent(root: &'a Node, depth: usize, indent: usize) -> Self {
        Self {
            stack: vec![Frame::Node { node: root, depth }],
            pending: VecDeque::new(),
            indent: indent.clamp(1, MAX_INDENT),
        }
    }

    fn pad(&self, depth: usize) -> String {
        " ".repeat(depth.saturating_mul(self.indent))
    }

    fn expand(&mut self, node: &'a Node, depth: usize) {
        let pad = self.pad(depth);
        self.pending.push_back(format!("{}{}", pad, node.kind()));
        for line in node.describe().lines() {
            self.pending.push_back(format!("{}{}", pad, line));
        }

        let mut frames = Vec::new();
        let mut previous = None;
        for (label, child) in node.children() {
            if previous != Some(label) {
                frames.push(Frame::Label { label, depth });
                previous = Some(label);
            }
            frames.push(Frame::Node {
                node: child,
                depth: depth + 1,
            });
        }
        self.stack.extend(frames.into_iter().rev());
    }
}

impl<'a> Iterator for TreeLines<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(line);
            }
            match self.stack.pop()? {
                Frame::Label { label, depth } => {
                    return Some(format!("{}{}:", self.pad(depth), label));
                }
                Frame::Node { node, depth } => self.expand(node, depth),
            }
        }
    }
}

/// Render `node` and its subtree starting at indentation `depth`.
pub fn print(node: &Node, depth: usize) -> String {
    let mut out = String::new();
    for line in TreeLines::new(node, depth) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Render a whole tree from the root.
pub fn tree_print(node: &Node) -> String {
    print(node, 0)
}
