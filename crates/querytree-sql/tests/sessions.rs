//! Independent parse sessions on separate threads

mod common;

use common::*;
use querytree_sql::{tree_print, ContextOptions, NodeFactory, NodeWalk, ParseContext};
use std::thread;

#[test]
fn test_concurrent_sessions_do_not_interfere() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                let ctx = ParseContext::with_options(
                    ContextOptions::default().with_default_schema(format!("s{}", i)),
                );
                let factory = NodeFactory::new(&ctx);
                let tree = full_trigger(&factory);
                let copy = factory.clone_tree(&tree).unwrap();
                let schema = tree.as_create_trigger().unwrap().schema_name(&ctx);
                (
                    tree_print(&copy),
                    tree.dfs().map(|n| n.id()).min().unwrap(),
                    ctx.allocated(),
                    schema,
                )
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (i, (printed, min_id, allocated, schema)) in results.iter().enumerate() {
        assert_eq!(printed, &results[0].0);
        // ids start over in every session
        assert_eq!(*min_id, 0);
        assert_eq!(*allocated, results[0].2);
        assert_eq!(schema.as_deref(), Some(format!("s{}", i).as_str()));
    }
}

#[test]
fn test_logging_does_not_disturb_cloning() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("querytree_sql=trace")
        .with_test_writer()
        .try_init();

    let ctx = ParseContext::new();
    let factory = NodeFactory::new(&ctx);
    let tree = full_trigger(&factory);
    let copy = factory.clone_tree(&tree).unwrap();
    assert_eq!(copy.describe(), tree.describe());
}
