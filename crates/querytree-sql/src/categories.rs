//! Field groups shared by several node kinds.
//!
//! A concrete kind embeds exactly one of these and delegates argument
//! reading, copying and child listing for the shared fields to it, so the
//! shared part is handled the same way by every kind built on it.

use crate::args::{check_node, Args};
use crate::context::ParseContext;
use crate::error::Result;
use crate::factory::{ClonedChildren, NodeFactory};
use crate::kinds::NodeClass;
use crate::node::Node;
use crate::nodes::TableName;
use serde::Serialize;

/// Exactly one owned operand.
#[derive(Debug, Serialize)]
pub struct SingleOperand {
    operand: Box<Node>,
}

impl SingleOperand {
    /// `position` is the operand's index in its kind's argument order.
    pub fn new(operand: Node, position: usize) -> Result<Self> {
        Ok(Self {
            operand: Box::new(check_node(position, operand, NodeClass::Value)?),
        })
    }

    pub fn read(args: &mut Args) -> Result<Self> {
        Ok(Self {
            operand: Box::new(args.node(NodeClass::Value)?),
        })
    }

    pub fn operand(&self) -> &Node {
        &self.operand
    }

    /// Swap in a new operand and return the old one. `position` is the
    /// operand's index in its kind's argument order.
    pub fn replace_operand(&mut self, operand: Node, position: usize) -> Result<Node> {
        let operand = check_node(position, operand, NodeClass::Value)?;
        Ok(*std::mem::replace(&mut self.operand, Box::new(operand)))
    }

    pub fn deep_copy(&self, children: &mut ClonedChildren) -> Result<Self> {
        Ok(Self {
            operand: children.take_boxed()?,
        })
    }

    pub fn children(&self) -> Vec<(&'static str, &Node)> {
        vec![("operand", &*self.operand)]
    }
}

/// Left and right owned operands.
#[derive(Debug, Serialize)]
pub struct BinaryOperands {
    left: Box<Node>,
    right: Box<Node>,
}

impl BinaryOperands {
    pub fn new(left: Node, right: Node) -> Result<Self> {
        Ok(Self {
            left: Box::new(check_node(0, left, NodeClass::Value)?),
            right: Box::new(check_node(1, right, NodeClass::Value)?),
        })
    }

    pub fn read(args: &mut Args) -> Result<Self> {
        let left = args.node(NodeClass::Value)?;
        let right = args.node(NodeClass::Value)?;
        Ok(Self {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn left(&self) -> &Node {
        &self.left
    }

    pub fn right(&self) -> &Node {
        &self.right
    }

    pub fn deep_copy(&self, children: &mut ClonedChildren) -> Result<Self> {
        let left = children.take_boxed()?;
        let right = children.take_boxed()?;
        Ok(Self { left, right })
    }

    pub fn children(&self) -> Vec<(&'static str, &Node)> {
        vec![("leftOperand", &*self.left), ("rightOperand", &*self.right)]
    }
}

/// Data-manipulation statement: target table plus optional WHERE clause.
#[derive(Debug, Serialize)]
pub struct DmlStatement {
    target_table: Box<Node>,
    where_clause: Option<Box<Node>>,
}

impl DmlStatement {
    pub fn new(
        target_table: Node,
        where_clause: Option<Node>,
        where_position: usize,
    ) -> Result<Self> {
        let target_table = check_node(0, target_table, NodeClass::Name)?;
        let where_clause = where_clause
            .map(|node| check_node(where_position, node, NodeClass::Value))
            .transpose()?;
        Ok(Self {
            target_table: Box::new(target_table),
            where_clause: where_clause.map(Box::new),
        })
    }

    pub fn target_table(&self) -> &Node {
        &self.target_table
    }

    pub fn where_clause(&self) -> Option<&Node> {
        self.where_clause.as_deref()
    }

    /// Reassemble from already-copied parts.
    pub(crate) fn from_parts(target_table: Box<Node>, where_clause: Option<Box<Node>>) -> Self {
        Self {
            target_table,
            where_clause,
        }
    }

    /// Target table then WHERE clause, for kinds with nothing in between.
    pub fn deep_copy(&self, children: &mut ClonedChildren) -> Result<Self> {
        let target_table = children.take_boxed()?;
        let where_clause = children.take_optional(self.where_clause())?;
        Ok(Self::from_parts(target_table, where_clause))
    }

    pub fn describe(&self, statement_type: &str) -> String {
        format!("statementType: {}\n", statement_type)
    }

    /// Target table first; the kind inserts its own children before WHERE.
    pub fn leading_children(&self) -> Vec<(&'static str, &Node)> {
        vec![("targetTableName", &*self.target_table)]
    }

    pub fn trailing_children(&self) -> Vec<(&'static str, &Node)> {
        self.where_clause()
            .map(|node| vec![("whereClause", node)])
            .unwrap_or_default()
    }
}

/// Schema-definition statement: the defined object's name and whether the
/// statement may create that object's schema implicitly.
#[derive(Debug, Serialize)]
pub struct DdlStatement {
    object_name: Box<Node>,
    implicit_create_schema: bool,
}

impl DdlStatement {
    pub fn new(object_name: Node) -> Result<Self> {
        Ok(Self {
            object_name: Box::new(check_node(0, object_name, NodeClass::Name)?),
            implicit_create_schema: false,
        })
    }

    pub fn object_name(&self) -> &Node {
        &self.object_name
    }

    pub fn implicit_create_schema(&self) -> bool {
        self.implicit_create_schema
    }

    pub fn set_implicit_create_schema(&mut self, implicit: bool) {
        self.implicit_create_schema = implicit;
    }

    /// Schema the object lives in: its explicit qualifier, else the
    /// session's default schema.
    pub fn schema_name(&self, context: &ParseContext) -> Option<String> {
        self.object_name
            .as_table_name()
            .and_then(TableName::schema)
            .or_else(|| context.default_schema())
            .map(str::to_string)
    }

    pub fn deep_copy(&self, factory: &NodeFactory) -> Result<Self> {
        Ok(Self {
            object_name: Box::new(factory.clone_tree(&self.object_name)?),
            implicit_create_schema: self.implicit_create_schema,
        })
    }

    pub fn describe(&self, statement_type: &str) -> String {
        let name = self
            .object_name
            .as_table_name()
            .map(TableName::full_name)
            .unwrap_or_default();
        format!("name: {}\nstatementType: {}\n", name, statement_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Arg;
    use crate::context::ContextOptions;
    use crate::error::Error;
    use crate::kinds::NodeKind;

    #[test]
    fn test_single_operand_rejects_statement() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let table = factory
            .build(NodeKind::TableName, vec![Arg::Null, "t".into()])
            .unwrap();
        let err = SingleOperand::new(table, 0).unwrap_err();
        assert_eq!(err, Error::type_mismatch(0, "value node", "name node"));
    }

    #[test]
    fn test_ddl_schema_falls_back_to_default() {
        let ctx = ParseContext::with_options(ContextOptions::default().with_default_schema("app"));
        let factory = NodeFactory::new(&ctx);
        let unqualified = factory
            .build(NodeKind::TableName, vec![Arg::Null, "trg".into()])
            .unwrap();
        let qualified = factory
            .build(NodeKind::TableName, vec!["audit".into(), "trg".into()])
            .unwrap();
        let a = DdlStatement::new(unqualified).unwrap();
        let b = DdlStatement::new(qualified).unwrap();
        assert_eq!(a.schema_name(&ctx).as_deref(), Some("app"));
        assert_eq!(b.schema_name(&ctx).as_deref(), Some("audit"));
        assert!(!a.implicit_create_schema());
    }
}
