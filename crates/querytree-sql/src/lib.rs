//! Querytree SQL - node substrate for a SQL front-end
//!
//! Every syntactic construct of a statement becomes a typed, mutable node
//! that a grammar-driven parser builds incrementally and that later phases
//! can duplicate and rewrite.
//!
//! # Architecture
//!
//! 1. **Parse context** ([`ParseContext`]) - per-session options, position and diagnostics
//! 2. **Factory** ([`NodeFactory`]) - allocates blank nodes and deep-clones trees
//! 3. **Nodes** ([`Node`]) - two-phase lifecycle: allocate, then initialize once
//! 4. **Categories** ([`categories`]) - field groups shared between kinds
//! 5. **Kinds** ([`nodes`]) - concrete node bodies
//! 6. **Traversal and printing** ([`traversal`], [`printer`])
//!
//! # Example
//!
//! ```
//! use querytree_sql::{Arg, NodeFactory, NodeKind, ParseContext};
//!
//! let ctx = ParseContext::new();
//! let factory = NodeFactory::new(&ctx);
//!
//! let x = factory.build(NodeKind::ColumnReference, vec!["x".into(), Arg::Null])?;
//! let sum = factory.build(
//!     NodeKind::Aggregate,
//!     vec![x.into(), "SumAgg".into(), true.into(), "SUM".into()],
//! )?;
//!
//! let mut avg = factory.clone_tree(&sum)?;
//! avg.as_aggregate_mut().unwrap().set_aggregate_name("AVG");
//! assert!(sum.describe().contains("aggregateName: SUM"));
//! # Ok::<(), querytree_sql::Error>(())
//! ```

pub mod args;
pub mod categories;
pub mod context;
pub mod error;
pub mod factory;
pub mod kinds;
pub mod node;
pub mod nodes;
pub mod printer;
pub mod traversal;

pub use args::{Arg, ArgType, Args};
pub use context::{ContextOptions, ContextRef, ParseContext, Span};
pub use error::{Diagnostic, DiagnosticSeverity, Error, Result};
pub use factory::{ClonedChildren, NodeFactory};
pub use kinds::{NodeClass, NodeKind, StructuralCategory};
pub use node::{BodyVariant, Node, NodeBody, NodeVariant};
pub use nodes::{
    AggregateNode, BinaryOperatorNode, ColumnReference, Constant, ConstantValue,
    CreateTriggerBuilder, CreateTriggerNode, DeleteNode, ResultColumn, ResultColumnList,
    SharedReferencing, TableName, TriggerEvent, TriggerReferencing, TriggerTiming,
    UnaryOperatorNode, UpdateNode,
};
pub use printer::{tree_print, TreeLines};
pub use traversal::{is_aggregate, is_column, is_statement, BfsIter, DfsIter, NodeWalk};
