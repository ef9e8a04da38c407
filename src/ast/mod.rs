pub mod builders;
pub mod node;
pub mod operators;
pub mod stmt;
pub mod values;

pub use self::node::{GroupingExpr, Node};
pub use self::operators::{BinaryOp, SortOrder};
pub use self::stmt::{
    DeleteStatement, InsertStatement, JoinSource, SelectStatement, Table, UpdateStatement,
};
pub use self::values::Value;
