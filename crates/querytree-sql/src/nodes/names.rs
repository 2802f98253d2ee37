//! Name and column nodes.

use crate::args::{check_node, Args};
use crate::error::Result;
use crate::factory::{ClonedChildren, NodeFactory};
use crate::kinds::{NodeClass, NodeKind};
use crate::node::{Node, NodeVariant};
use serde::Serialize;
use std::fmt;

/// A possibly schema-qualified object name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableName {
    schema: Option<String>,
    table: String,
}

impl TableName {
    pub fn new(schema: Option<String>, table: impl Into<String>) -> Self {
        Self {
            schema,
            table: table.into(),
        }
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.table),
            None => f.write_str(&self.table),
        }
    }
}

impl NodeVariant for TableName {
    const KIND: NodeKind = NodeKind::TableName;
    const ARITY: usize = 2;

    fn from_args(args: &mut Args) -> Result<Self> {
        let schema = args.opt_string()?;
        let table = args.string()?;
        Ok(Self::new(schema, table))
    }

    fn deep_copy(&self, _factory: &NodeFactory, _children: &mut ClonedChildren) -> Result<Self> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("name: {}\n", self)
    }
}

/// Reference to a column, optionally qualified by table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnReference {
    column: String,
    table: Option<String>,
}

impl ColumnReference {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            table: None,
        }
    }

    pub fn qualified(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            table: Some(table.into()),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }
}

impl NodeVariant for ColumnReference {
    const KIND: NodeKind = NodeKind::ColumnReference;
    const ARITY: usize = 2;

    fn from_args(args: &mut Args) -> Result<Self> {
        let column = args.string()?;
        let table = args.opt_string()?;
        Ok(Self { column, table })
    }

    fn deep_copy(&self, _factory: &NodeFactory, _children: &mut ClonedChildren) -> Result<Self> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        let mut out = format!("columnName: {}\n", self.column);
        if let Some(table) = &self.table {
            out.push_str(&format!("tableName: {}\n", table));
        }
        out
    }
}

/// A named result column with an optional value expression.
#[derive(Debug, Serialize)]
pub struct ResultColumn {
    name: String,
    expression: Option<Box<Node>>,
}

impl ResultColumn {
    pub fn new(name: impl Into<String>, expression: Option<Node>) -> Result<Self> {
        let expression = expression
            .map(|node| check_node(1, node, NodeClass::Value))
            .transpose()?;
        Ok(Self {
            name: name.into(),
            expression: expression.map(Box::new),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expression(&self) -> Option<&Node> {
        self.expression.as_deref()
    }
}

impl NodeVariant for ResultColumn {
    const KIND: NodeKind = NodeKind::ResultColumn;
    const ARITY: usize = 2;

    fn from_args(args: &mut Args) -> Result<Self> {
        let name = args.string()?;
        let expression = args.opt_node(NodeClass::Value)?;
        Ok(Self {
            name,
            expression: expression.map(Box::new),
        })
    }

    fn deep_copy(&self, _factory: &NodeFactory, children: &mut ClonedChildren) -> Result<Self> {
        Ok(Self {
            name: self.name.clone(),
            expression: children.take_optional(self.expression())?,
        })
    }

    fn describe(&self) -> String {
        format!("name: {}\n", self.name)
    }

    fn children(&self) -> Vec<(&'static str, &Node)> {
        self.expression()
            .map(|node| vec![("expression", node)])
            .unwrap_or_default()
    }
}

/// Ordered list of result columns.
#[derive(Debug, Serialize)]
pub struct ResultColumnList {
    columns: Vec<Node>,
}

impl ResultColumnList {
    pub fn new(columns: Vec<Node>) -> Result<Self> {
        let columns = columns
            .into_iter()
            .map(|node| check_node(0, node, NodeClass::Column))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Node] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl NodeVariant for ResultColumnList {
    const KIND: NodeKind = NodeKind::ResultColumnList;
    const ARITY: usize = 1;

    fn from_args(args: &mut Args) -> Result<Self> {
        let columns = args.opt_nodes(NodeClass::Column)?.unwrap_or_default();
        Ok(Self { columns })
    }

    fn deep_copy(&self, _factory: &NodeFactory, children: &mut ClonedChildren) -> Result<Self> {
        Ok(Self {
            columns: children.take_list(&self.columns)?,
        })
    }

    fn describe(&self) -> String {
        format!("size: {}\n", self.columns.len())
    }

    fn children(&self) -> Vec<(&'static str, &Node)> {
        self.columns.iter().map(|node| ("column", node)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Arg;
    use crate::context::ParseContext;

    #[test]
    fn test_table_name_display() {
        assert_eq!(TableName::new(None, "t").full_name(), "t");
        assert_eq!(TableName::new(Some("app".into()), "t").full_name(), "app.t");
    }

    #[test]
    fn test_column_reference_omits_absent_table() {
        assert_eq!(ColumnReference::new("x").describe(), "columnName: x\n");
        assert_eq!(
            ColumnReference::qualified("t", "x").describe(),
            "columnName: x\ntableName: t\n"
        );
    }

    #[test]
    fn test_result_column_list_keeps_order() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let columns = ["a", "b", "c"]
            .iter()
            .map(|name| {
                factory
                    .build(NodeKind::ResultColumn, vec![(*name).into(), Arg::Null])
                    .unwrap()
            })
            .collect::<Vec<_>>();
        let list = factory
            .build(NodeKind::ResultColumnList, vec![columns.into()])
            .unwrap();
        let names: Vec<_> = list
            .children()
            .into_iter()
            .map(|(_, node)| node.get::<ResultColumn>().unwrap().name().to_string())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
