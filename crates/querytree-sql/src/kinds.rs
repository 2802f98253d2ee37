//! Node kind tags and their static metadata.
//!
//! The grammar driver names kinds by tag string; [`NodeKind::from_name`]
//! resolves those tags against a static registry.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Closed tag identifying the concrete variant of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    TableName,
    ColumnReference,
    Constant,
    UnaryOperator,
    BinaryOperator,
    Aggregate,
    ResultColumn,
    ResultColumnList,
    Update,
    Delete,
    CreateTrigger,
}

/// Broad role of a node, used to type-check sub-node arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeClass {
    /// Qualified object names
    Name,
    /// Value expressions
    Value,
    /// A single result column
    Column,
    /// An ordered list of result columns
    ColumnList,
    /// Complete statements
    Statement,
}

/// Shared field groups a kind is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StructuralCategory {
    /// No owned sub-nodes beyond optional leaves
    Leaf,
    /// Exactly one owned operand
    SingleOperand,
    /// Left and right operands
    BinaryOperands,
    /// Ordered sequence of owned children
    List,
    /// Data-manipulation statement over a target table
    DmlStatement,
    /// Schema-definition statement with an implicit-schema flag
    DdlStatement,
}

/// Registry entry describing a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct KindSpec {
    pub kind: NodeKind,
    pub name: &'static str,
    pub class: NodeClass,
    pub category: StructuralCategory,
}

pub(crate) const KIND_SPECS: &[KindSpec] = &[
    KindSpec {
        kind: NodeKind::TableName,
        name: "TableName",
        class: NodeClass::Name,
        category: StructuralCategory::Leaf,
    },
    KindSpec {
        kind: NodeKind::ColumnReference,
        name: "ColumnReference",
        class: NodeClass::Value,
        category: StructuralCategory::Leaf,
    },
    KindSpec {
        kind: NodeKind::Constant,
        name: "Constant",
        class: NodeClass::Value,
        category: StructuralCategory::Leaf,
    },
    KindSpec {
        kind: NodeKind::UnaryOperator,
        name: "UnaryOperator",
        class: NodeClass::Value,
        category: StructuralCategory::SingleOperand,
    },
    KindSpec {
        kind: NodeKind::BinaryOperator,
        name: "BinaryOperator",
        class: NodeClass::Value,
        category: StructuralCategory::BinaryOperands,
    },
    KindSpec {
        kind: NodeKind::Aggregate,
        name: "Aggregate",
        class: NodeClass::Value,
        category: StructuralCategory::SingleOperand,
    },
    KindSpec {
        kind: NodeKind::ResultColumn,
        name: "ResultColumn",
        class: NodeClass::Column,
        category: StructuralCategory::Leaf,
    },
    KindSpec {
        kind: NodeKind::ResultColumnList,
        name: "ResultColumnList",
        class: NodeClass::ColumnList,
        category: StructuralCategory::List,
    },
    KindSpec {
        kind: NodeKind::Update,
        name: "Update",
        class: NodeClass::Statement,
        category: StructuralCategory::DmlStatement,
    },
    KindSpec {
        kind: NodeKind::Delete,
        name: "Delete",
        class: NodeClass::Statement,
        category: StructuralCategory::DmlStatement,
    },
    KindSpec {
        kind: NodeKind::CreateTrigger,
        name: "CreateTrigger",
        class: NodeClass::Statement,
        category: StructuralCategory::DdlStatement,
    },
];

/// Registry keyed by uppercased tag.
static KINDS_BY_NAME: LazyLock<HashMap<String, &'static KindSpec>> = LazyLock::new(|| {
    KIND_SPECS
        .iter()
        .map(|spec| (spec.name.to_ascii_uppercase(), spec))
        .collect()
});

impl NodeKind {
    fn spec(self) -> &'static KindSpec {
        // KIND_SPECS lists every variant in declaration order
        &KIND_SPECS[self as usize]
    }

    /// Resolve a grammar tag (case-insensitive) to a registered kind.
    pub fn from_name(name: &str) -> Option<NodeKind> {
        KINDS_BY_NAME
            .get(&name.to_ascii_uppercase())
            .map(|spec| spec.kind)
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn class(self) -> NodeClass {
        self.spec().class
    }

    pub fn category(self) -> StructuralCategory {
        self.spec().category
    }

    /// All registered kinds in declaration order.
    pub fn all() -> impl Iterator<Item = NodeKind> {
        KIND_SPECS.iter().map(|spec| spec.kind)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeClass::Name => "name",
            NodeClass::Value => "value",
            NodeClass::Column => "result column",
            NodeClass::ColumnList => "result column list",
            NodeClass::Statement => "statement",
        };
        f.write_str(name)
    }
}
