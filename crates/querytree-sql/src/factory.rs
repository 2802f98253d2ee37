//! Node factory: allocation and deep cloning.
//!
//! The factory holds nothing but a weak handle to its session, so any number
//! of factories may exist for the same context and none of them carry state
//! across sessions.

use crate::args::Arg;
use crate::context::{ContextRef, ParseContext};
use crate::error::{Error, Result};
use crate::kinds::NodeKind;
use crate::node::{Node, NodeBody};
use std::rc::Rc;

/// Creates blank nodes and clones whole trees for one parse session.
#[derive(Debug, Clone)]
pub struct NodeFactory {
    context: ContextRef,
}

impl NodeFactory {
    /// Create a factory bound to `context`
    pub fn new(context: &Rc<ParseContext>) -> Self {
        Self {
            context: ContextRef::new(context),
        }
    }

    pub(crate) fn from_ref(context: ContextRef) -> Self {
        Self { context }
    }

    /// The session this factory allocates into.
    pub fn context(&self) -> Result<Rc<ParseContext>> {
        self.context.require()
    }

    /// Allocate an uninitialized node of `kind`, stamped with the session's
    /// current position.
    pub fn allocate(&self, kind: NodeKind) -> Result<Node> {
        let context = self.context.require()?;
        let node = Node::blank(kind, &context, self.context.clone());
        tracing::trace!(%kind, id = node.id(), "allocated node");
        Ok(node)
    }

    /// Allocate a node by grammar tag.
    ///
    /// # Errors
    /// [`Error::UnknownKind`] if the tag names no registered kind.
    pub fn allocate_named(&self, tag: &str) -> Result<Node> {
        let kind = NodeKind::from_name(tag).ok_or_else(|| {
            tracing::debug!(tag, "factory asked for unregistered node kind");
            Error::unknown_kind(tag)
        })?;
        self.allocate(kind)
    }

    /// Allocate and initialize from grammar arguments in one step.
    pub fn build(&self, kind: NodeKind, args: Vec<Arg>) -> Result<Node> {
        let mut node = self.allocate(kind)?;
        node.initialize(args)?;
        Ok(node)
    }

    /// Allocate a node for a typed body and install it.
    pub fn build_with(&self, body: impl Into<NodeBody>) -> Result<Node> {
        let body = body.into();
        let mut node = self.allocate(body.kind())?;
        node.initialize_with(body)?;
        Ok(node)
    }

    /// Deep-copy `source` into a new tree bound to this factory's session.
    ///
    /// Every owned sub-node is cloned; nothing is shared with `source` apart
    /// from trigger referencing clauses. The walk keeps its own stack, so
    /// tree depth does not grow the call stack.
    ///
    /// # Errors
    /// [`Error::Uninitialized`] if `source` or any node under it is blank.
    pub fn clone_tree(&self, source: &Node) -> Result<Node> {
        let mut pending = vec![Step::Enter(source)];
        let mut copied: Vec<Node> = Vec::new();

        while let Some(step) = pending.pop() {
            match step {
                Step::Enter(node) => {
                    if !node.is_initialized() {
                        tracing::debug!(
                            kind = %node.kind(),
                            "refusing to clone uninitialized node"
                        );
                        return Err(Error::Uninitialized(node.kind()));
                    }
                    let children = node.children();
                    pending.push(Step::Exit(node, children.len()));
                    // reversed so the first child is copied first
                    pending.extend(
                        children
                            .into_iter()
                            .rev()
                            .map(|(_, child)| Step::Enter(child)),
                    );
                }
                Step::Exit(node, count) => {
                    let body = node.body().ok_or(Error::Uninitialized(node.kind()))?;
                    let start = copied.len().checked_sub(count).ok_or_else(|| {
                        Error::internal(format!("{} clone lost track of its children", node.kind()))
                    })?;
                    let children = copied.split_off(start);
                    let mut copy = self.allocate(node.kind())?;
                    copy.install_copy(body, node.span(), children)?;
                    copied.push(copy);
                }
            }
        }

        let copy = copied
            .pop()
            .ok_or_else(|| Error::internal("clone produced no root"))?;
        tracing::trace!(kind = %source.kind(), from = source.id(), to = copy.id(), "cloned tree");
        Ok(copy)
    }
}

enum Step<'a> {
    Enter(&'a Node),
    Exit(&'a Node, usize),
}

/// Copies of a node's children, made before the node itself is copied.
///
/// A kind's [`deep_copy`](crate::node::NodeVariant::deep_copy) takes them
/// back in the order its `children` listed the originals.
#[derive(Debug)]
pub struct ClonedChildren {
    kind: NodeKind,
    nodes: std::vec::IntoIter<Node>,
}

impl ClonedChildren {
    pub(crate) fn new(kind: NodeKind, nodes: Vec<Node>) -> Self {
        Self {
            kind,
            nodes: nodes.into_iter(),
        }
    }

    pub fn take(&mut self) -> Result<Node> {
        let kind = self.kind;
        self.nodes
            .next()
            .ok_or_else(|| Error::internal(format!("{} copy ran out of cloned children", kind)))
    }

    pub fn take_boxed(&mut self) -> Result<Box<Node>> {
        self.take().map(Box::new)
    }

    /// The copy of `original` if it is present; absence stays absence.
    pub fn take_optional(&mut self, original: Option<&Node>) -> Result<Option<Box<Node>>> {
        original.map(|_| self.take_boxed()).transpose()
    }

    /// Copies of an ordered sequence, same length and order as `originals`.
    pub fn take_list(&mut self, originals: &[Node]) -> Result<Vec<Node>> {
        originals.iter().map(|_| self.take()).collect()
    }

    pub(crate) fn finish(mut self) -> Result<()> {
        match self.nodes.next() {
            None => Ok(()),
            Some(_) => Err(Error::internal(format!(
                "{} copy left cloned children unused",
                self.kind
            ))),
        }
    }
}
