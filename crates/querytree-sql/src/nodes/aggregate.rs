//! Aggregate function node.
//!
//! Covers both built-in aggregates (`SUM`, `MAX`, ...) and user-defined ones.
//! The implementation id names the aggregate's definition; resolving it to
//! an actual implementation is left to binding.

use crate::args::Args;
use crate::categories::SingleOperand;
use crate::error::Result;
use crate::factory::{ClonedChildren, NodeFactory};
use crate::kinds::NodeKind;
use crate::node::{Node, NodeVariant};
use serde::Serialize;

/// A set function applied to one operand.
#[derive(Debug, Serialize)]
pub struct AggregateNode {
    #[serde(flatten)]
    operand: SingleOperand,
    implementation: String,
    distinct: bool,
    aggregate_name: String,
}

impl AggregateNode {
    /// Arguments follow the grammar order: operand, implementation id,
    /// DISTINCT flag, user-facing name.
    pub fn new(
        operand: Node,
        implementation: impl Into<String>,
        distinct: bool,
        aggregate_name: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            operand: SingleOperand::new(operand, 0)?,
            implementation: implementation.into(),
            distinct,
            aggregate_name: aggregate_name.into(),
        })
    }

    /// Name as the user wrote it, e.g. `MAX`.
    pub fn aggregate_name(&self) -> &str {
        &self.aggregate_name
    }

    /// Rename the aggregate, e.g. when binding canonicalizes `AVG` spellings.
    pub fn set_aggregate_name(&mut self, name: impl Into<String>) {
        self.aggregate_name = name.into();
    }

    pub fn implementation(&self) -> &str {
        &self.implementation
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn operand(&self) -> &Node {
        self.operand.operand()
    }

    /// Swap in a new operand and return the old one. The replacement is
    /// checked the same way the initializer checks it.
    pub fn replace_operand(&mut self, operand: Node) -> Result<Node> {
        self.operand.replace_operand(operand, 0)
    }
}

impl NodeVariant for AggregateNode {
    const KIND: NodeKind = NodeKind::Aggregate;
    const ARITY: usize = 4;

    fn from_args(args: &mut Args) -> Result<Self> {
        let operand = SingleOperand::read(args)?;
        let implementation = args.string()?;
        let distinct = args.boolean()?;
        let aggregate_name = args.string()?;
        Ok(Self {
            operand,
            implementation,
            distinct,
            aggregate_name,
        })
    }

    fn deep_copy(&self, _factory: &NodeFactory, children: &mut ClonedChildren) -> Result<Self> {
        Ok(Self {
            operand: self.operand.deep_copy(children)?,
            implementation: self.implementation.clone(),
            distinct: self.distinct,
            aggregate_name: self.aggregate_name.clone(),
        })
    }

    fn describe(&self) -> String {
        format!(
            "aggregateName: {}\naggregateDefinition: {}\ndistinct: {}\n",
            self.aggregate_name, self.implementation, self.distinct
        )
    }

    fn children(&self) -> Vec<(&'static str, &Node)> {
        self.operand.children()
    }
}
