//! Concrete node kinds.
//!
//! | Kind | Category | Module |
//! |---|---|---|
//! | `TableName`, `ColumnReference`, `ResultColumn`, `ResultColumnList` | leaf / list | [`names`] |
//! | `Constant`, `UnaryOperator`, `BinaryOperator` | leaf / operands | [`values`] |
//! | `Aggregate` | single operand | [`aggregate`] |
//! | `Update`, `Delete` | DML statement | [`dml`] |
//! | `CreateTrigger` | DDL statement | [`trigger`] |

pub mod aggregate;
pub mod dml;
pub mod names;
pub mod trigger;
pub mod values;

pub use aggregate::AggregateNode;
pub use dml::{DeleteNode, UpdateNode};
pub use names::{ColumnReference, ResultColumn, ResultColumnList, TableName};
pub use trigger::{
    CreateTriggerBuilder, CreateTriggerNode, SharedReferencing, TriggerEvent, TriggerReferencing,
    TriggerTiming,
};
pub use values::{BinaryOperatorNode, Constant, ConstantValue, UnaryOperatorNode};
