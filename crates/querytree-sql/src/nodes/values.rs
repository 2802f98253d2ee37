//! Value expression nodes.

use crate::args::Args;
use crate::categories::{BinaryOperands, SingleOperand};
use crate::error::Result;
use crate::factory::{ClonedChildren, NodeFactory};
use crate::kinds::NodeKind;
use crate::node::{Node, NodeVariant};
use serde::Serialize;
use std::fmt;

/// Literal value carried by a [`Constant`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ConstantValue {
    Null,
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Null => f.write_str("NULL"),
            ConstantValue::Boolean(b) => write!(f, "{}", b),
            ConstantValue::Integer(n) => write!(f, "{}", n),
            ConstantValue::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constant {
    value: ConstantValue,
}

impl Constant {
    pub fn new(value: ConstantValue) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &ConstantValue {
        &self.value
    }
}

impl NodeVariant for Constant {
    const KIND: NodeKind = NodeKind::Constant;
    const ARITY: usize = 1;

    fn from_args(args: &mut Args) -> Result<Self> {
        Ok(Self::new(args.literal()?))
    }

    fn deep_copy(&self, _factory: &NodeFactory, _children: &mut ClonedChildren) -> Result<Self> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("value: {}\n", self.value)
    }
}

/// Prefix operator such as `NOT` or unary minus.
#[derive(Debug, Serialize)]
pub struct UnaryOperatorNode {
    #[serde(flatten)]
    operand: SingleOperand,
    operator: String,
}

impl UnaryOperatorNode {
    pub fn new(operand: Node, operator: impl Into<String>) -> Result<Self> {
        Ok(Self {
            operand: SingleOperand::new(operand, 0)?,
            operator: operator.into(),
        })
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn operand(&self) -> &Node {
        self.operand.operand()
    }
}

impl NodeVariant for UnaryOperatorNode {
    const KIND: NodeKind = NodeKind::UnaryOperator;
    const ARITY: usize = 2;

    fn from_args(args: &mut Args) -> Result<Self> {
        let operand = SingleOperand::read(args)?;
        let operator = args.string()?;
        Ok(Self { operand, operator })
    }

    fn deep_copy(&self, _factory: &NodeFactory, children: &mut ClonedChildren) -> Result<Self> {
        Ok(Self {
            operand: self.operand.deep_copy(children)?,
            operator: self.operator.clone(),
        })
    }

    fn describe(&self) -> String {
        format!("operator: {}\n", self.operator)
    }

    fn children(&self) -> Vec<(&'static str, &Node)> {
        self.operand.children()
    }
}

/// Infix operator such as `=`, `>` or `AND`.
#[derive(Debug, Serialize)]
pub struct BinaryOperatorNode {
    #[serde(flatten)]
    operands: BinaryOperands,
    operator: String,
}

impl BinaryOperatorNode {
    pub fn new(left: Node, right: Node, operator: impl Into<String>) -> Result<Self> {
        Ok(Self {
            operands: BinaryOperands::new(left, right)?,
            operator: operator.into(),
        })
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn left(&self) -> &Node {
        self.operands.left()
    }

    pub fn right(&self) -> &Node {
        self.operands.right()
    }
}

impl NodeVariant for BinaryOperatorNode {
    const KIND: NodeKind = NodeKind::BinaryOperator;
    const ARITY: usize = 3;

    fn from_args(args: &mut Args) -> Result<Self> {
        let operands = BinaryOperands::read(args)?;
        let operator = args.string()?;
        Ok(Self { operands, operator })
    }

    fn deep_copy(&self, _factory: &NodeFactory, children: &mut ClonedChildren) -> Result<Self> {
        Ok(Self {
            operands: self.operands.deep_copy(children)?,
            operator: self.operator.clone(),
        })
    }

    fn describe(&self) -> String {
        format!("operator: {}\n", self.operator)
    }

    fn children(&self) -> Vec<(&'static str, &Node)> {
        self.operands.children()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Arg;
    use crate::context::ParseContext;
    use crate::error::Error;

    #[test]
    fn test_constant_rendering() {
        assert_eq!(Constant::new(ConstantValue::Null).describe(), "value: NULL\n");
        assert_eq!(
            Constant::new(ConstantValue::String("it's".into())).describe(),
            "value: 'it''s'\n"
        );
    }

    #[test]
    fn test_constant_rejects_node_argument() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let inner = factory
            .build(NodeKind::Constant, vec![Arg::Int(1)])
            .unwrap();
        let err = factory
            .build(NodeKind::Constant, vec![inner.into()])
            .unwrap_err();
        assert_eq!(err, Error::type_mismatch(0, "literal", "value node"));
    }

    #[test]
    fn test_binary_operator_children_order() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let x = factory
            .build(NodeKind::ColumnReference, vec!["x".into(), Arg::Null])
            .unwrap();
        let one = factory.build(NodeKind::Constant, vec![Arg::Int(1)]).unwrap();
        let gt = factory
            .build_with(BinaryOperatorNode::new(x, one, ">").unwrap())
            .unwrap();
        let labels: Vec<_> = gt.children().into_iter().map(|(label, _)| label).collect();
        assert_eq!(labels, ["leftOperand", "rightOperand"]);
        assert_eq!(gt.describe(), "operator: >\n");
    }
}
