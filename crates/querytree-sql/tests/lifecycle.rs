//! Allocation and initialization tests
//!
//! Covers the two-phase lifecycle: blank allocation through the factory,
//! exactly-once initialization, and all-or-nothing argument checking.

mod common;

use common::*;
use querytree_sql::{
    Arg, CreateTriggerNode, Error, NodeFactory, NodeKind, ParseContext, TriggerEvent,
    TriggerTiming,
};

mod allocation {
    use super::*;

    #[test]
    fn test_allocate_every_registered_kind() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        for kind in NodeKind::all() {
            let node = factory.allocate(kind).unwrap();
            assert_eq!(node.kind(), kind);
            assert!(!node.is_initialized());
            let by_name = factory.allocate_named(kind.name()).unwrap();
            assert_eq!(by_name.kind(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_tag() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let err = factory.allocate_named("AlterSequence").unwrap_err();
        assert!(matches!(err, Error::UnknownKind(ref tag) if tag == "AlterSequence"));
    }
}

mod initialization {
    use super::*;

    #[test]
    fn test_aggregate_scenario() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let mut node = factory.allocate(NodeKind::Aggregate).unwrap();
        node.initialize(vec![
            column(&factory, "x").into(),
            "SumAgg".into(),
            true.into(),
            "SUM".into(),
        ])
        .unwrap();
        assert!(node.describe().contains("aggregateName: SUM"));
        let agg = node.as_aggregate().unwrap();
        assert_eq!(agg.implementation(), "SumAgg");
        assert!(agg.is_distinct());
        assert_eq!(agg.operand().kind(), NodeKind::ColumnReference);
    }

    #[test]
    fn test_trigger_scenario_trims_action_text() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let args = TriggerArgs {
            action_text: Some("  UPDATE t SET x=1  ".to_string()),
            ..TriggerArgs::empty()
        };
        let node = factory
            .build(NodeKind::CreateTrigger, args.into_args(&factory))
            .unwrap();
        let trigger = node.as_create_trigger().unwrap();
        assert_eq!(trigger.event(), TriggerEvent::Update);
        assert_eq!(trigger.timing(), TriggerTiming::Before);
        assert!(trigger.is_row());
        assert!(trigger.is_enabled());
        assert_eq!(trigger.action_text(), Some("UPDATE t SET x=1"));
        assert_eq!(trigger.original_action_text(), Some("  UPDATE t SET x=1  "));
        assert_eq!(trigger.action_offset(), 27);
        assert!(trigger.ddl().implicit_create_schema());
        assert_eq!(trigger.statement_type(), "CREATE TRIGGER");
    }

    #[test]
    fn test_trigger_without_action_text() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let node = factory
            .build(
                NodeKind::CreateTrigger,
                TriggerArgs::empty().into_args(&factory),
            )
            .unwrap();
        let trigger = node.as_create_trigger().unwrap();
        assert_eq!(trigger.action_text(), None);
        assert_eq!(trigger.original_action_text(), None);
        assert!(trigger.actions().is_none());
        assert!(!node.describe().contains("actionText"));
    }

    #[test]
    fn test_type_mismatch_reports_position() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let mut args = TriggerArgs::empty().into_args(&factory);
        // swap the timing for an event
        args[4] = TriggerEvent::Insert.into();
        let mut node = factory.allocate(NodeKind::CreateTrigger).unwrap();
        let err = node.initialize(args).unwrap_err();
        assert_eq!(
            err,
            Error::type_mismatch(4, "trigger timing", "trigger event")
        );
        assert!(!node.is_initialized());
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_wrong_node_class_in_action_list() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let args = TriggerArgs {
            actions: Some(vec![update(&factory, "t", "x", 1), integer(&factory, 3)]),
            ..TriggerArgs::empty()
        };
        let err = factory
            .build(NodeKind::CreateTrigger, args.into_args(&factory))
            .unwrap_err();
        assert_eq!(err, Error::type_mismatch(9, "statement node", "value node"));
    }

    #[test]
    fn test_arity_mismatch() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let mut args = TriggerArgs::empty().into_args(&factory);
        args.pop();
        let err = factory.build(NodeKind::CreateTrigger, args).unwrap_err();
        assert_eq!(
            err,
            Error::Arity {
                kind: NodeKind::CreateTrigger,
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn test_uninitialized_sub_node_rejected() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let blank = factory.allocate(NodeKind::ColumnReference).unwrap();
        let err = factory
            .build(
                NodeKind::Aggregate,
                vec![blank.into(), "SumAgg".into(), false.into(), "SUM".into()],
            )
            .unwrap_err();
        assert_eq!(err, Error::Uninitialized(NodeKind::ColumnReference));
    }

    #[test]
    fn test_double_initialize() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let mut node = sum_of(&factory, "x");
        let err = node
            .initialize(vec![
                column(&factory, "y").into(),
                "MaxAgg".into(),
                false.into(),
                "MAX".into(),
            ])
            .unwrap_err();
        assert_eq!(err, Error::AlreadyInitialized(NodeKind::Aggregate));
        assert_eq!(node.as_aggregate().unwrap().aggregate_name(), "SUM");
    }

    #[test]
    fn test_typed_and_dynamic_paths_agree() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let dynamic = factory
            .build(
                NodeKind::CreateTrigger,
                TriggerArgs {
                    when: Some(greater_than(&factory, "x", 0)),
                    actions: Some(vec![delete(&factory, "log")]),
                    action_text: Some(" DELETE FROM log ".to_string()),
                    ..TriggerArgs::empty()
                }
                .into_args(&factory),
            )
            .unwrap();
        let typed = factory
            .build_with(
                CreateTriggerNode::builder(
                    table(&factory, "trg"),
                    table(&factory, "t"),
                    TriggerEvent::Update,
                    TriggerTiming::Before,
                )
                .for_each_row(true)
                .when(greater_than(&factory, "x", 0))
                .action(delete(&factory, "log"))
                .action_text(" DELETE FROM log ", 27)
                .build()
                .unwrap(),
            )
            .unwrap();
        assert_eq!(
            querytree_sql::tree_print(&dynamic),
            querytree_sql::tree_print(&typed)
        );
    }

    #[test]
    fn test_failed_initialize_can_be_reported() {
        let ctx = ParseContext::new();
        let factory = NodeFactory::new(&ctx);
        let err = factory
            .build(NodeKind::Constant, vec![Arg::Nodes(Vec::new())])
            .unwrap_err();
        ctx.report(&err);
        assert!(ctx.has_errors());
        assert!(ctx.diagnostics()[0].message.contains("expected literal"));
    }
}
