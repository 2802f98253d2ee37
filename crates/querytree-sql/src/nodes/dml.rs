//! UPDATE and DELETE statements, as they appear in trigger actions.

use crate::args::{check_node, Args};
use crate::categories::DmlStatement;
use crate::error::Result;
use crate::factory::{ClonedChildren, NodeFactory};
use crate::kinds::{NodeClass, NodeKind};
use crate::node::{Node, NodeVariant};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UpdateNode {
    #[serde(flatten)]
    statement: DmlStatement,
    set_clause: Box<Node>,
}

impl UpdateNode {
    pub fn new(target_table: Node, set_clause: Node, where_clause: Option<Node>) -> Result<Self> {
        let target_table = check_node(0, target_table, NodeClass::Name)?;
        let set_clause = check_node(1, set_clause, NodeClass::ColumnList)?;
        let statement = DmlStatement::new(target_table, where_clause, 2)?;
        Ok(Self {
            statement,
            set_clause: Box::new(set_clause),
        })
    }

    pub fn statement(&self) -> &DmlStatement {
        &self.statement
    }

    pub fn set_clause(&self) -> &Node {
        &self.set_clause
    }
}

impl NodeVariant for UpdateNode {
    const KIND: NodeKind = NodeKind::Update;
    const ARITY: usize = 3;

    fn from_args(args: &mut Args) -> Result<Self> {
        let target_table = args.node(NodeClass::Name)?;
        let set_clause = args.node(NodeClass::ColumnList)?;
        let where_clause = args.opt_node(NodeClass::Value)?;
        Self::new(target_table, set_clause, where_clause)
    }

    fn deep_copy(&self, _factory: &NodeFactory, children: &mut ClonedChildren) -> Result<Self> {
        let target_table = children.take_boxed()?;
        let set_clause = children.take_boxed()?;
        let where_clause = children.take_optional(self.statement.where_clause())?;
        Ok(Self {
            statement: DmlStatement::from_parts(target_table, where_clause),
            set_clause,
        })
    }

    fn describe(&self) -> String {
        self.statement.describe("UPDATE")
    }

    fn children(&self) -> Vec<(&'static str, &Node)> {
        let mut children = self.statement.leading_children();
        children.push(("setClause", &*self.set_clause));
        children.extend(self.statement.trailing_children());
        children
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteNode {
    #[serde(flatten)]
    statement: DmlStatement,
}

impl DeleteNode {
    pub fn new(target_table: Node, where_clause: Option<Node>) -> Result<Self> {
        Ok(Self {
            statement: DmlStatement::new(target_table, where_clause, 1)?,
        })
    }

    pub fn statement(&self) -> &DmlStatement {
        &self.statement
    }
}

impl NodeVariant for DeleteNode {
    const KIND: NodeKind = NodeKind::Delete;
    const ARITY: usize = 2;

    fn from_args(args: &mut Args) -> Result<Self> {
        let target_table = args.node(NodeClass::Name)?;
        let where_clause = args.opt_node(NodeClass::Value)?;
        Self::new(target_table, where_clause)
    }

    fn deep_copy(&self, _factory: &NodeFactory, children: &mut ClonedChildren) -> Result<Self> {
        Ok(Self {
            statement: self.statement.deep_copy(children)?,
        })
    }

    fn describe(&self) -> String {
        self.statement.describe("DELETE")
    }

    fn children(&self) -> Vec<(&'static str, &Node)> {
        let mut children = self.statement.leading_children();
        children.extend(self.statement.trailing_children());
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Arg;
    use crate::context::ParseContext;
    use crate::error::Error;

    #[test]
    fn test_delete_without_where() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let table = factory
            .build(NodeKind::TableName, vec![Arg::Null, "t".into()])
            .unwrap();
        let delete = factory
            .build(NodeKind::Delete, vec![table.into(), Arg::Null])
            .unwrap();
        assert_eq!(delete.describe(), "statementType: DELETE\n");
        let labels: Vec<_> = delete.children().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, ["targetTableName"]);
    }

    #[test]
    fn test_update_reports_set_clause_before_where() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let table = || {
            factory
                .build(NodeKind::TableName, vec![Arg::Null, "t".into()])
                .unwrap()
        };
        let err = UpdateNode::new(table(), table(), Some(table())).unwrap_err();
        assert_eq!(err, Error::type_mismatch(1, "result column list node", "name node"));
    }

    #[test]
    fn test_update_rejects_value_as_target() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let not_a_table = factory.build(NodeKind::Constant, vec![Arg::Int(1)]).unwrap();
        let set = factory
            .build(NodeKind::ResultColumnList, vec![Arg::Null])
            .unwrap();
        let err = factory
            .build(NodeKind::Update, vec![not_a_table.into(), set.into(), Arg::Null])
            .unwrap_err();
        assert_eq!(err, Error::type_mismatch(0, "name node", "value node"));
    }
}
