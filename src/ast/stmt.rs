use serde::{Deserialize, Serialize};

use crate::ast::Node;

/// A plain table reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Wrap this table in an alias node: `"name" "alias"`.
    pub fn alias(&self, alias: impl Into<String>) -> Node {
        Node::TableAlias {
            relation: Box::new(Node::Table(self.clone())),
            name: alias.into(),
        }
    }
}

/// A relation paired with its ordered join list.
///
/// `right` empty means the relation has no joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinSource {
    /// The target table, or an aliased table
    pub left: Box<Node>,
    /// Join nodes, rendered space-separated after `left`
    #[serde(default)]
    pub right: Vec<Node>,
}

impl JoinSource {
    /// A join source over a bare table, no joins.
    pub fn table(table: Table) -> Self {
        Self {
            left: Box::new(Node::Table(table)),
            right: vec![],
        }
    }

    pub fn has_joins(&self) -> bool {
        !self.right.is_empty()
    }

    /// The name the target relation is referred to by, when it has one.
    pub fn left_name(&self) -> Option<&str> {
        match self.left.as_ref() {
            Node::Table(t) => Some(&t.name),
            Node::TableAlias { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectStatement {
    /// `DISTINCT` or `DISTINCT ON (...)` quantifier
    #[serde(default)]
    pub set_quantifier: Option<Node>,
    pub projections: Vec<Node>,
    #[serde(default)]
    pub relation: Option<JoinSource>,
    #[serde(default)]
    pub wheres: Vec<Node>,
    #[serde(default)]
    pub groups: Vec<Node>,
    #[serde(default)]
    pub havings: Vec<Node>,
    #[serde(default)]
    pub orders: Vec<Node>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl SelectStatement {
    pub fn new() -> Self {
        Self::default()
    }
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStatement {
    pub relation: Box<Node>,
    /// Column name list; empty means no column list is emitted
    #[serde(default)]
    pub columns: Vec<String>,
    /// Row tuples; empty means DEFAULT VALUES
    #[serde(default)]
    pub values: Vec<Vec<Node>>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl InsertStatement {
    pub fn new(table: Table) -> Self {
        Self {
            relation: Box::new(Node::Table(table)),
            columns: vec![],
            values: vec![],
            comment: None,
        }
    }
}

/// An UPDATE statement.
///
/// `values`, `wheres` and `orders` keep insertion order; the emitted
/// clause order follows it, which matters for assignment evaluation and
/// for ORDER/LIMIT semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatement {
    pub relation: JoinSource,
    /// Assignment nodes for the SET list
    pub values: Vec<Node>,
    #[serde(default)]
    pub wheres: Vec<Node>,
    #[serde(default)]
    pub groups: Vec<Node>,
    #[serde(default)]
    pub havings: Vec<Node>,
    #[serde(default)]
    pub orders: Vec<Node>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    /// Column names that uniquely identify a row of the target table.
    /// Empty means no key was supplied. Uniqueness is a caller-supplied
    /// precondition, not verified here.
    #[serde(default)]
    pub key: Vec<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl UpdateStatement {
    pub fn new(relation: JoinSource) -> Self {
        Self {
            relation,
            values: vec![],
            wheres: vec![],
            groups: vec![],
            havings: vec![],
            orders: vec![],
            limit: None,
            offset: None,
            key: vec![],
            comment: None,
        }
    }

    pub fn has_group_by_or_having(&self) -> bool {
        !self.groups.is_empty() || !self.havings.is_empty()
    }

    pub fn has_limit_or_offset_or_orders(&self) -> bool {
        self.limit.is_some() || self.offset.is_some() || !self.orders.is_empty()
    }
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStatement {
    pub relation: Box<Node>,
    #[serde(default)]
    pub wheres: Vec<Node>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl DeleteStatement {
    pub fn new(table: Table) -> Self {
        Self {
            relation: Box::new(Node::Table(table)),
            wheres: vec![],
            comment: None,
        }
    }
}
