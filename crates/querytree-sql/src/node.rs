//! The query tree node and its lifecycle.
//!
//! # Lifecycle
//!
//! A [`Node`] is born blank from a [`NodeFactory`]: it has a kind, a source
//! span and a back-reference to its [`ParseContext`](crate::context::ParseContext),
//! but no kind-specific fields. Exactly one of these then fills it:
//!
//! - [`Node::initialize`] with positional grammar arguments ([`Arg`]);
//! - [`Node::initialize_with`] with a typed body built by the kind's constructor;
//! - [`Node::copy_from`] with an initialized node of the same kind, which
//!   deep-copies every owned sub-node through the factory.
//!
//! After that the body changes only through kind-specific mutators such as
//! [`AggregateNode::set_aggregate_name`].
//!
//! Ownership is a strict tree. `Node` does not implement `Clone`;
//! duplicating a subtree always goes through [`NodeFactory::clone_tree`].

use crate::args::{Arg, Args};
use crate::context::{ContextRef, ParseContext, Span};
use crate::error::{Error, Result};
use crate::factory::{ClonedChildren, NodeFactory};
use crate::kinds::NodeKind;
use crate::nodes::{
    AggregateNode, BinaryOperatorNode, ColumnReference, Constant, CreateTriggerNode, DeleteNode,
    ResultColumn, ResultColumnList, TableName, UnaryOperatorNode, UpdateNode,
};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Contract every concrete kind satisfies.
pub trait NodeVariant: Sized {
    /// Kind tag of nodes carrying this body
    const KIND: NodeKind;
    /// Number of positional arguments the dynamic initializer consumes
    const ARITY: usize;

    /// Build the body from grammar-supplied arguments, in kind order.
    fn from_args(args: &mut Args) -> Result<Self>;

    /// Produce a copy of this body around already-copied children.
    ///
    /// `children` holds copies of exactly the nodes [`children`](Self::children)
    /// lists, in that order. Owned nodes that are not listed are cloned
    /// through `factory`.
    fn deep_copy(&self, factory: &NodeFactory, children: &mut ClonedChildren) -> Result<Self>;

    /// Diagnostic rendering of the kind-specific fields, one field per line.
    fn describe(&self) -> String;

    /// Present children in fixed order, each with its label.
    fn children(&self) -> Vec<(&'static str, &Node)> {
        Vec::new()
    }
}

/// Access to a concrete body stored inside a [`NodeBody`].
pub trait BodyVariant: NodeVariant {
    fn peek(body: &NodeBody) -> Option<&Self>;
    fn peek_mut(body: &mut NodeBody) -> Option<&mut Self>;
}

macro_rules! node_bodies {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// Kind-specific fields of an initialized node.
        #[derive(Debug, serde::Serialize)]
        #[serde(untagged)]
        pub enum NodeBody {
            $($variant($ty)),*
        }

        impl NodeBody {
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(NodeBody::$variant(_) => <$ty as NodeVariant>::KIND),*
                }
            }

            fn from_args(kind: NodeKind, args: Vec<Arg>) -> Result<Self> {
                match kind {
                    $(NodeKind::$variant => {
                        let mut args = Args::new(kind, args, <$ty as NodeVariant>::ARITY)?;
                        <$ty as NodeVariant>::from_args(&mut args).map(NodeBody::$variant)
                    })*
                }
            }

            fn deep_copy(
                &self,
                factory: &NodeFactory,
                children: &mut ClonedChildren,
            ) -> Result<Self> {
                match self {
                    $(NodeBody::$variant(body) => {
                        body.deep_copy(factory, children).map(NodeBody::$variant)
                    })*
                }
            }

            pub fn describe(&self) -> String {
                match self {
                    $(NodeBody::$variant(body) => body.describe()),*
                }
            }

            pub fn children(&self) -> Vec<(&'static str, &Node)> {
                match self {
                    $(NodeBody::$variant(body) => body.children()),*
                }
            }
        }

        $(
            impl From<$ty> for NodeBody {
                fn from(body: $ty) -> Self {
                    NodeBody::$variant(body)
                }
            }

            impl BodyVariant for $ty {
                fn peek(body: &NodeBody) -> Option<&Self> {
                    match body {
                        NodeBody::$variant(inner) => Some(inner),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                fn peek_mut(body: &mut NodeBody) -> Option<&mut Self> {
                    match body {
                        NodeBody::$variant(inner) => Some(inner),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )*
    };
}

node_bodies! {
    TableName(TableName),
    ColumnReference(ColumnReference),
    Constant(Constant),
    UnaryOperator(UnaryOperatorNode),
    BinaryOperator(BinaryOperatorNode),
    Aggregate(AggregateNode),
    ResultColumn(ResultColumn),
    ResultColumnList(ResultColumnList),
    Update(UpdateNode),
    Delete(DeleteNode),
    CreateTrigger(CreateTriggerNode),
}

/// A node of the query tree.
#[derive(Debug)]
pub struct Node {
    kind: NodeKind,
    id: u64,
    span: Span,
    context: ContextRef,
    body: Option<NodeBody>,
}

impl Node {
    /// Allocate an uninitialized node. Only the factory calls this.
    pub(crate) fn blank(kind: NodeKind, context: &ParseContext, context_ref: ContextRef) -> Self {
        Self {
            kind,
            id: context.next_node_id(),
            span: context.position(),
            context: context_ref,
            body: None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Session-local id, unique among nodes allocated by the same context.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn set_span(&mut self, span: Span) {
        self.span = span;
    }

    pub fn context(&self) -> &ContextRef {
        &self.context
    }

    /// Factory bound to this node's session.
    pub fn factory(&self) -> NodeFactory {
        NodeFactory::from_ref(self.context.clone())
    }

    pub fn is_initialized(&self) -> bool {
        self.body.is_some()
    }

    pub fn body(&self) -> Option<&NodeBody> {
        self.body.as_ref()
    }

    /// Typed view of the body, if this node is initialized and of kind `T`.
    pub fn get<T: BodyVariant>(&self) -> Option<&T> {
        self.body.as_ref().and_then(T::peek)
    }

    /// Mutable typed view of the body, for binding passes.
    pub fn get_mut<T: BodyVariant>(&mut self) -> Option<&mut T> {
        self.body.as_mut().and_then(T::peek_mut)
    }

    pub fn as_aggregate(&self) -> Option<&AggregateNode> {
        self.get()
    }

    pub fn as_aggregate_mut(&mut self) -> Option<&mut AggregateNode> {
        self.get_mut()
    }

    pub fn as_create_trigger(&self) -> Option<&CreateTriggerNode> {
        self.get()
    }

    pub fn as_table_name(&self) -> Option<&TableName> {
        self.get()
    }

    /// Populate the node from positional grammar arguments.
    ///
    /// Either every field is populated or the node stays blank.
    pub fn initialize(&mut self, args: Vec<Arg>) -> Result<()> {
        if self.is_initialized() {
            return Err(Error::AlreadyInitialized(self.kind));
        }
        self.context.require()?;
        let body = NodeBody::from_args(self.kind, args)?;
        tracing::trace!(kind = %self.kind, id = self.id, "initialized node");
        self.body = Some(body);
        Ok(())
    }

    /// Populate the node from a body built by the kind's typed constructor.
    pub fn initialize_with(&mut self, body: impl Into<NodeBody>) -> Result<()> {
        if self.is_initialized() {
            return Err(Error::AlreadyInitialized(self.kind));
        }
        let body = body.into();
        if body.kind() != self.kind {
            return Err(Error::kind_mismatch(self.kind, body.kind()));
        }
        tracing::trace!(kind = %self.kind, id = self.id, "initialized node");
        self.body = Some(body);
        Ok(())
    }

    /// Fill this blank node with a deep copy of `other`.
    ///
    /// Owned sub-nodes are cloned through this node's factory and end up bound
    /// to this node's session. Neither node changes when an error is returned.
    pub fn copy_from(&mut self, other: &Node) -> Result<()> {
        if other.kind != self.kind {
            tracing::debug!(
                target_kind = %self.kind,
                source_kind = %other.kind,
                "copy across kinds"
            );
            return Err(Error::kind_mismatch(self.kind, other.kind));
        }
        let source = other.body.as_ref().ok_or(Error::Uninitialized(other.kind))?;
        if self.is_initialized() {
            return Err(Error::AlreadyInitialized(self.kind));
        }
        let factory = self.factory();
        let children = other
            .children()
            .into_iter()
            .map(|(_, child)| factory.clone_tree(child))
            .collect::<Result<Vec<_>>>()?;
        self.install_copy(source, other.span, children)
    }

    /// Fill this blank node from `source` given copies of its children.
    pub(crate) fn install_copy(
        &mut self,
        source: &NodeBody,
        span: Span,
        children: Vec<Node>,
    ) -> Result<()> {
        let mut children = ClonedChildren::new(self.kind, children);
        let body = source.deep_copy(&self.factory(), &mut children)?;
        children.finish()?;
        self.span = span;
        self.body = Some(body);
        Ok(())
    }

    /// Stable multi-line rendering of the kind-specific fields.
    pub fn describe(&self) -> String {
        match &self.body {
            Some(body) => body.describe(),
            None => format!("uninitialized: {}\n", self.kind),
        }
    }

    /// Present children in fixed order, each with its label.
    pub fn children(&self) -> Vec<(&'static str, &Node)> {
        self.body.as_ref().map(NodeBody::children).unwrap_or_default()
    }

    /// Render this node as JSON for diagnostics.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Node", 3)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("span", &self.span)?;
        state.serialize_field("body", &self.body)?;
        state.end()
    }
}
