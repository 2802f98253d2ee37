//! Dynamic initializer arguments.
//!
//! Grammar actions hand over whatever the lower rules produced: sub-nodes,
//! literals, flags. [`Arg`] carries one such value and [`Args`] reads them
//! back positionally, checking each against the type its kind expects.

use crate::error::{Error, Result};
use crate::kinds::{NodeClass, NodeKind};
use crate::node::Node;
use crate::nodes::trigger::{TriggerEvent, TriggerReferencing, TriggerTiming};
use crate::nodes::values::ConstantValue;
use std::fmt;

/// One positional argument produced by a grammar action.
#[derive(Debug)]
pub enum Arg {
    Null,
    Node(Node),
    Nodes(Vec<Node>),
    Str(String),
    Bool(bool),
    Int(i64),
    Event(TriggerEvent),
    Timing(TriggerTiming),
    Referencing(Vec<TriggerReferencing>),
}

/// Dynamic type of an [`Arg`], as reported in type mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    Null,
    Node(NodeClass),
    Nodes,
    String,
    Boolean,
    Integer,
    Event,
    Timing,
    Referencing,
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgType::Null => f.write_str("null"),
            ArgType::Node(class) => write!(f, "{} node", class),
            ArgType::Nodes => f.write_str("node list"),
            ArgType::String => f.write_str("string"),
            ArgType::Boolean => f.write_str("boolean"),
            ArgType::Integer => f.write_str("integer"),
            ArgType::Event => f.write_str("trigger event"),
            ArgType::Timing => f.write_str("trigger timing"),
            ArgType::Referencing => f.write_str("referencing clause"),
        }
    }
}

impl Arg {
    pub fn arg_type(&self) -> ArgType {
        match self {
            Arg::Null => ArgType::Null,
            Arg::Node(node) => ArgType::Node(node.kind().class()),
            Arg::Nodes(_) => ArgType::Nodes,
            Arg::Str(_) => ArgType::String,
            Arg::Bool(_) => ArgType::Boolean,
            Arg::Int(_) => ArgType::Integer,
            Arg::Event(_) => ArgType::Event,
            Arg::Timing(_) => ArgType::Timing,
            Arg::Referencing(_) => ArgType::Referencing,
        }
    }
}

impl From<Node> for Arg {
    fn from(node: Node) -> Self {
        Arg::Node(node)
    }
}

impl From<Vec<Node>> for Arg {
    fn from(nodes: Vec<Node>) -> Self {
        Arg::Nodes(nodes)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Int(n)
    }
}

impl From<TriggerEvent> for Arg {
    fn from(event: TriggerEvent) -> Self {
        Arg::Event(event)
    }
}

impl From<TriggerTiming> for Arg {
    fn from(timing: TriggerTiming) -> Self {
        Arg::Timing(timing)
    }
}

impl From<Vec<TriggerReferencing>> for Arg {
    fn from(entries: Vec<TriggerReferencing>) -> Self {
        Arg::Referencing(entries)
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Arg::Null, Into::into)
    }
}

/// Check that a sub-node handed to an initializer is initialized and has
/// the class expected at `position`.
pub(crate) fn check_node(position: usize, node: Node, class: NodeClass) -> Result<Node> {
    if node.kind().class() != class {
        return Err(Error::type_mismatch(
            position,
            ArgType::Node(class),
            ArgType::Node(node.kind().class()),
        ));
    }
    if !node.is_initialized() {
        return Err(Error::Uninitialized(node.kind()));
    }
    Ok(node)
}

/// Positional reader over a kind's argument list.
///
/// Arity is checked up front, so each accessor only has to check type.
pub struct Args {
    items: std::vec::IntoIter<Arg>,
    position: usize,
}

impl Args {
    pub(crate) fn new(kind: NodeKind, args: Vec<Arg>, expected: usize) -> Result<Self> {
        if args.len() != expected {
            return Err(Error::arity(kind, expected, args.len()));
        }
        Ok(Self {
            items: args.into_iter(),
            position: 0,
        })
    }

    fn next_arg(&mut self) -> (usize, Arg) {
        let position = self.position;
        self.position += 1;
        // arity was validated in `new`
        (position, self.items.next().unwrap_or(Arg::Null))
    }

    pub fn node(&mut self, class: NodeClass) -> Result<Node> {
        match self.next_arg() {
            (position, Arg::Node(node)) => check_node(position, node, class),
            (position, other) => Err(Error::type_mismatch(
                position,
                ArgType::Node(class),
                other.arg_type(),
            )),
        }
    }

    pub fn opt_node(&mut self, class: NodeClass) -> Result<Option<Node>> {
        match self.next_arg() {
            (_, Arg::Null) => Ok(None),
            (position, Arg::Node(node)) => check_node(position, node, class).map(Some),
            (position, other) => Err(Error::type_mismatch(
                position,
                ArgType::Node(class),
                other.arg_type(),
            )),
        }
    }

    pub fn opt_nodes(&mut self, class: NodeClass) -> Result<Option<Vec<Node>>> {
        match self.next_arg() {
            (_, Arg::Null) => Ok(None),
            (position, Arg::Nodes(nodes)) => nodes
                .into_iter()
                .map(|node| check_node(position, node, class))
                .collect::<Result<Vec<_>>>()
                .map(Some),
            (position, other) => Err(Error::type_mismatch(
                position,
                ArgType::Nodes,
                other.arg_type(),
            )),
        }
    }

    pub fn string(&mut self) -> Result<String> {
        match self.next_arg() {
            (_, Arg::Str(s)) => Ok(s),
            (position, other) => Err(Error::type_mismatch(
                position,
                ArgType::String,
                other.arg_type(),
            )),
        }
    }

    pub fn opt_string(&mut self) -> Result<Option<String>> {
        match self.next_arg() {
            (_, Arg::Null) => Ok(None),
            (_, Arg::Str(s)) => Ok(Some(s)),
            (position, other) => Err(Error::type_mismatch(
                position,
                ArgType::String,
                other.arg_type(),
            )),
        }
    }

    /// A scalar literal: null, boolean, integer or string.
    pub fn literal(&mut self) -> Result<ConstantValue> {
        match self.next_arg() {
            (_, Arg::Null) => Ok(ConstantValue::Null),
            (_, Arg::Bool(b)) => Ok(ConstantValue::Boolean(b)),
            (_, Arg::Int(n)) => Ok(ConstantValue::Integer(n)),
            (_, Arg::Str(s)) => Ok(ConstantValue::String(s)),
            (position, other) => Err(Error::type_mismatch(position, "literal", other.arg_type())),
        }
    }

    pub fn boolean(&mut self) -> Result<bool> {
        match self.next_arg() {
            (_, Arg::Bool(b)) => Ok(b),
            (position, other) => Err(Error::type_mismatch(
                position,
                ArgType::Boolean,
                other.arg_type(),
            )),
        }
    }

    pub fn integer(&mut self) -> Result<i64> {
        match self.next_arg() {
            (_, Arg::Int(n)) => Ok(n),
            (position, other) => Err(Error::type_mismatch(
                position,
                ArgType::Integer,
                other.arg_type(),
            )),
        }
    }

    /// A source offset: a non-negative integer.
    pub fn offset(&mut self) -> Result<usize> {
        let position = self.position;
        let n = self.integer()?;
        usize::try_from(n)
            .map_err(|_| Error::type_mismatch(position, "non-negative integer", n))
    }

    pub fn event(&mut self) -> Result<TriggerEvent> {
        match self.next_arg() {
            (_, Arg::Event(event)) => Ok(event),
            (position, other) => Err(Error::type_mismatch(
                position,
                ArgType::Event,
                other.arg_type(),
            )),
        }
    }

    pub fn timing(&mut self) -> Result<TriggerTiming> {
        match self.next_arg() {
            (_, Arg::Timing(timing)) => Ok(timing),
            (position, other) => Err(Error::type_mismatch(
                position,
                ArgType::Timing,
                other.arg_type(),
            )),
        }
    }

    pub fn opt_referencing(&mut self) -> Result<Option<Vec<TriggerReferencing>>> {
        match self.next_arg() {
            (_, Arg::Null) => Ok(None),
            (_, Arg::Referencing(entries)) => Ok(Some(entries)),
            (position, other) => Err(Error::type_mismatch(
                position,
                ArgType::Referencing,
                other.arg_type(),
            )),
        }
    }
}
