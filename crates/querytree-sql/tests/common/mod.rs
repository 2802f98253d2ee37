#![allow(dead_code)]
//! Tree builders shared by the integration tests

use querytree_sql::{
    Arg, Node, NodeFactory, NodeKind, TriggerEvent, TriggerReferencing, TriggerTiming,
};

pub fn table(factory: &NodeFactory, name: &str) -> Node {
    factory
        .build(NodeKind::TableName, vec![Arg::Null, name.into()])
        .expect("table name")
}

pub fn column(factory: &NodeFactory, name: &str) -> Node {
    factory
        .build(NodeKind::ColumnReference, vec![name.into(), Arg::Null])
        .expect("column reference")
}

pub fn integer(factory: &NodeFactory, value: i64) -> Node {
    factory
        .build(NodeKind::Constant, vec![Arg::Int(value)])
        .expect("constant")
}

/// `column > value`
pub fn greater_than(factory: &NodeFactory, name: &str, value: i64) -> Node {
    factory
        .build(
            NodeKind::BinaryOperator,
            vec![
                column(factory, name).into(),
                integer(factory, value).into(),
                ">".into(),
            ],
        )
        .expect("comparison")
}

/// `UPDATE target SET name = value`
pub fn update(factory: &NodeFactory, target: &str, name: &str, value: i64) -> Node {
    let set_column = factory
        .build(
            NodeKind::ResultColumn,
            vec![name.into(), integer(factory, value).into()],
        )
        .expect("result column");
    let set_clause = factory
        .build(NodeKind::ResultColumnList, vec![vec![set_column].into()])
        .expect("set clause");
    factory
        .build(
            NodeKind::Update,
            vec![table(factory, target).into(), set_clause.into(), Arg::Null],
        )
        .expect("update")
}

/// `DELETE FROM target`
pub fn delete(factory: &NodeFactory, target: &str) -> Node {
    factory
        .build(NodeKind::Delete, vec![table(factory, target).into(), Arg::Null])
        .expect("delete")
}

pub fn sum_of(factory: &NodeFactory, name: &str) -> Node {
    factory
        .build(
            NodeKind::Aggregate,
            vec![
                column(factory, name).into(),
                "SumAgg".into(),
                true.into(),
                "SUM".into(),
            ],
        )
        .expect("aggregate")
}

/// Dynamic-path trigger arguments in grammar order.
pub struct TriggerArgs {
    pub when: Option<Node>,
    pub actions: Option<Vec<Node>>,
    pub columns: Option<Node>,
    pub referencing: Option<Vec<TriggerReferencing>>,
    pub action_text: Option<String>,
}

impl TriggerArgs {
    pub fn empty() -> Self {
        Self {
            when: None,
            actions: None,
            columns: None,
            referencing: None,
            action_text: None,
        }
    }

    pub fn into_args(self, factory: &NodeFactory) -> Vec<Arg> {
        vec![
            table(factory, "trg").into(),
            table(factory, "t").into(),
            TriggerEvent::Update.into(),
            self.columns.into(),
            TriggerTiming::Before.into(),
            true.into(),
            true.into(),
            self.referencing.into(),
            self.when.into(),
            self.actions.into(),
            self.action_text.into(),
            Arg::Int(27),
        ]
    }
}

/// A row-level BEFORE UPDATE trigger with a WHEN clause and two actions.
pub fn full_trigger(factory: &NodeFactory) -> Node {
    let columns = factory
        .build(
            NodeKind::ResultColumnList,
            vec![vec![factory
                .build(NodeKind::ResultColumn, vec!["x".into(), Arg::Null])
                .expect("trigger column")]
            .into()],
        )
        .expect("trigger columns");
    let args = TriggerArgs {
        when: Some(greater_than(factory, "x", 0)),
        actions: Some(vec![update(factory, "t", "x", 1), delete(factory, "log")]),
        columns: Some(columns),
        referencing: Some(vec![TriggerReferencing::new(true, true, "n")]),
        action_text: Some("  UPDATE t SET x=1; DELETE FROM log  ".to_string()),
    };
    factory
        .build(NodeKind::CreateTrigger, args.into_args(factory))
        .expect("trigger")
}
