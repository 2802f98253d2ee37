//! CREATE TRIGGER statement node.
//!
//! The trigger name is the defined object of the statement and lives in the
//! [`DdlStatement`] category; everything else is kind-specific.
//!
//! # Referencing clauses
//!
//! The REFERENCING entries are held behind a [`SharedReferencing`] handle.
//! Copying a trigger shares that handle instead of cloning the entries, so
//! a trigger and its clones see the same list. This is the one place where
//! a copy is shallow.

use crate::args::{check_node, Args};
use crate::categories::DdlStatement;
use crate::context::ParseContext;
use crate::error::Result;
use crate::factory::{ClonedChildren, NodeFactory};
use crate::kinds::{NodeClass, NodeKind};
use crate::node::{Node, NodeVariant};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Statement event the trigger fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TriggerEvent {
    Update,
    Delete,
    Insert,
}

/// When the trigger fires relative to its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TriggerTiming {
    Before,
    After,
    InsteadOf,
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for TriggerTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One `OLD|NEW ROW|TABLE AS name` entry of a REFERENCING clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerReferencing {
    pub is_row: bool,
    pub is_new: bool,
    pub identifier: String,
}

impl TriggerReferencing {
    pub fn new(is_new: bool, is_row: bool, identifier: impl Into<String>) -> Self {
        Self {
            is_row,
            is_new,
            identifier: identifier.into(),
        }
    }
}

impl fmt::Display for TriggerReferencing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} AS {}",
            if self.is_new { "NEW" } else { "OLD" },
            if self.is_row { "ROW" } else { "TABLE" },
            self.identifier
        )
    }
}

/// Referencing entries shared between a trigger and its copies.
pub type SharedReferencing = Rc<RefCell<Vec<TriggerReferencing>>>;

/// CREATE TRIGGER.
#[derive(Debug, Serialize)]
pub struct CreateTriggerNode {
    #[serde(flatten)]
    ddl: DdlStatement,
    table_name: Box<Node>,
    event: TriggerEvent,
    trigger_columns: Option<Box<Node>>,
    timing: TriggerTiming,
    is_row: bool,
    is_enabled: bool,
    referencing: Option<SharedReferencing>,
    when_clause: Option<Box<Node>>,
    actions: Option<Vec<Node>>,
    action_text: Option<String>,
    original_action_text: Option<String>,
    action_offset: usize,
}

impl CreateTriggerNode {
    /// Start a typed builder. Fields not set explicitly default to a
    /// statement-level, enabled trigger with no WHEN clause and no actions.
    pub fn builder(
        trigger_name: Node,
        table_name: Node,
        event: TriggerEvent,
        timing: TriggerTiming,
    ) -> CreateTriggerBuilder {
        CreateTriggerBuilder {
            trigger_name,
            table_name,
            event,
            timing,
            trigger_columns: None,
            is_row: false,
            is_enabled: true,
            referencing: None,
            when_clause: None,
            actions: None,
            action_text: None,
            action_offset: 0,
        }
    }

    pub fn statement_type(&self) -> &'static str {
        "CREATE TRIGGER"
    }

    pub fn ddl(&self) -> &DdlStatement {
        &self.ddl
    }

    pub fn trigger_name(&self) -> &Node {
        self.ddl.object_name()
    }

    pub fn table_name(&self) -> &Node {
        &self.table_name
    }

    pub fn event(&self) -> TriggerEvent {
        self.event
    }

    pub fn timing(&self) -> TriggerTiming {
        self.timing
    }

    /// Column list of an `UPDATE OF` trigger.
    pub fn trigger_columns(&self) -> Option<&Node> {
        self.trigger_columns.as_deref()
    }

    pub fn is_row(&self) -> bool {
        self.is_row
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    pub fn referencing(&self) -> Option<&SharedReferencing> {
        self.referencing.as_ref()
    }

    pub fn when_clause(&self) -> Option<&Node> {
        self.when_clause.as_deref()
    }

    pub fn actions(&self) -> Option<&[Node]> {
        self.actions.as_deref()
    }

    /// Action text as stored, with surrounding whitespace trimmed.
    pub fn action_text(&self) -> Option<&str> {
        self.action_text.as_deref()
    }

    /// Action text exactly as it appeared in the statement.
    pub fn original_action_text(&self) -> Option<&str> {
        self.original_action_text.as_deref()
    }

    /// Offset of the action clause in the statement text.
    pub fn action_offset(&self) -> usize {
        self.action_offset
    }

    pub fn schema_name(&self, context: &ParseContext) -> Option<String> {
        self.ddl.schema_name(context)
    }

    fn describe_referencing(&self) -> String {
        match &self.referencing {
            None => "refClause: null\n".to_string(),
            Some(entries) => {
                let mut out = String::from("refClause:\n");
                for entry in entries.borrow().iter() {
                    out.push_str(&format!("\t{}\n", entry));
                }
                out
            }
        }
    }
}

impl NodeVariant for CreateTriggerNode {
    const KIND: NodeKind = NodeKind::CreateTrigger;
    const ARITY: usize = 12;

    fn from_args(args: &mut Args) -> Result<Self> {
        let trigger_name = args.node(NodeClass::Name)?;
        let table_name = args.node(NodeClass::Name)?;
        let event = args.event()?;
        let trigger_columns = args.opt_node(NodeClass::ColumnList)?;
        let timing = args.timing()?;
        let is_row = args.boolean()?;
        let is_enabled = args.boolean()?;
        let referencing = args.opt_referencing()?;
        let when_clause = args.opt_node(NodeClass::Value)?;
        let actions = args.opt_nodes(NodeClass::Statement)?;
        let action_text = args.opt_string()?;
        let action_offset = args.offset()?;

        CreateTriggerBuilder {
            trigger_name,
            table_name,
            event,
            timing,
            trigger_columns,
            is_row,
            is_enabled,
            referencing,
            when_clause,
            actions,
            action_text,
            action_offset,
        }
        .build()
    }

    fn deep_copy(&self, factory: &NodeFactory, children: &mut ClonedChildren) -> Result<Self> {
        let trigger_columns = children.take_optional(self.trigger_columns())?;
        let when_clause = children.take_optional(self.when_clause())?;
        let actions = self
            .actions
            .as_deref()
            .map(|actions| children.take_list(actions))
            .transpose()?;
        Ok(Self {
            ddl: self.ddl.deep_copy(factory)?,
            table_name: Box::new(factory.clone_tree(&self.table_name)?),
            event: self.event,
            trigger_columns,
            timing: self.timing,
            is_row: self.is_row,
            is_enabled: self.is_enabled,
            referencing: self.referencing.clone(),
            when_clause,
            actions,
            action_text: self.action_text.clone(),
            original_action_text: self.original_action_text.clone(),
            action_offset: self.action_offset,
        })
    }

    fn describe(&self) -> String {
        let table = self
            .table_name
            .as_table_name()
            .map(|name| name.full_name())
            .unwrap_or_default();
        let mut out = self.ddl.describe(self.statement_type());
        out.push_str(&format!("tableName: {}\n", table));
        out.push_str(&format!("event: {}\n", self.event));
        out.push_str(&format!("time: {}\n", self.timing));
        out.push_str(&format!("isRow: {}\n", self.is_row));
        out.push_str(&format!("isEnabled: {}\n", self.is_enabled));
        out.push_str(&self.describe_referencing());
        if let Some(text) = &self.action_text {
            out.push_str(&format!("actionText: {}\n", text));
        }
        out
    }

    fn children(&self) -> Vec<(&'static str, &Node)> {
        let mut children = Vec::new();
        if let Some(columns) = self.trigger_columns() {
            children.push(("triggerColumns", columns));
        }
        if let Some(when) = self.when_clause() {
            children.push(("whenClause", when));
        }
        for action in self.actions.iter().flatten() {
            children.push(("actionNodes", action));
        }
        children
    }
}

/// Typed construction of a [`CreateTriggerNode`].
///
/// Sub-node arguments are still checked for their class; errors report the
/// position the argument has in the grammar's twelve-argument order.
#[derive(Debug)]
pub struct CreateTriggerBuilder {
    trigger_name: Node,
    table_name: Node,
    event: TriggerEvent,
    timing: TriggerTiming,
    trigger_columns: Option<Node>,
    is_row: bool,
    is_enabled: bool,
    referencing: Option<Vec<TriggerReferencing>>,
    when_clause: Option<Node>,
    actions: Option<Vec<Node>>,
    action_text: Option<String>,
    action_offset: usize,
}

impl CreateTriggerBuilder {
    pub fn trigger_columns(mut self, columns: Node) -> Self {
        self.trigger_columns = Some(columns);
        self
    }

    /// FOR EACH ROW when true, FOR EACH STATEMENT otherwise.
    pub fn for_each_row(mut self, is_row: bool) -> Self {
        self.is_row = is_row;
        self
    }

    pub fn enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = is_enabled;
        self
    }

    pub fn referencing(mut self, entries: Vec<TriggerReferencing>) -> Self {
        self.referencing = Some(entries);
        self
    }

    pub fn when(mut self, condition: Node) -> Self {
        self.when_clause = Some(condition);
        self
    }

    /// Append one action statement.
    pub fn action(mut self, statement: Node) -> Self {
        self.actions.get_or_insert_with(Vec::new).push(statement);
        self
    }

    pub fn actions(mut self, statements: Vec<Node>) -> Self {
        self.actions = Some(statements);
        self
    }

    pub fn action_text(mut self, text: impl Into<String>, offset: usize) -> Self {
        self.action_text = Some(text.into());
        self.action_offset = offset;
        self
    }

    pub fn build(self) -> Result<CreateTriggerNode> {
        let mut ddl = DdlStatement::new(self.trigger_name)?;
        ddl.set_implicit_create_schema(true);
        let table_name = check_node(1, self.table_name, NodeClass::Name)?;
        let trigger_columns = self
            .trigger_columns
            .map(|node| check_node(3, node, NodeClass::ColumnList))
            .transpose()?;
        let when_clause = self
            .when_clause
            .map(|node| check_node(8, node, NodeClass::Value))
            .transpose()?;
        let actions = self
            .actions
            .map(|nodes| {
                nodes
                    .into_iter()
                    .map(|node| check_node(9, node, NodeClass::Statement))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;
        let action_text = self.action_text.as_deref().map(|text| text.trim().to_string());

        Ok(CreateTriggerNode {
            ddl,
            table_name: Box::new(table_name),
            event: self.event,
            trigger_columns: trigger_columns.map(Box::new),
            timing: self.timing,
            is_row: self.is_row,
            is_enabled: self.is_enabled,
            referencing: self.referencing.map(|entries| Rc::new(RefCell::new(entries))),
            when_clause: when_clause.map(Box::new),
            actions,
            action_text,
            original_action_text: self.action_text,
            action_offset: self.action_offset,
        })
    }
}
