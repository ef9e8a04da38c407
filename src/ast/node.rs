use serde::{Deserialize, Serialize};

use crate::ast::{
    BinaryOp, DeleteStatement, InsertStatement, JoinSource, SelectStatement, SortOrder, Table,
    UpdateStatement, Value,
};

/// One renderable construct of the query tree.
///
/// Nodes are immutable by convention: rewrites clone and modify the
/// copy, never the original, so a tree handed to a compiler stays valid
/// for reuse by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Raw SQL fragment, emitted verbatim
    SqlLiteral(String),
    /// Literal value
    Literal(Value),
    /// Positional bind parameter; the value is collected on the
    /// accumulator and the dialect picks the placeholder text
    BindParam(Value),
    /// Column reference, optionally qualified by a relation name
    Column {
        relation: Option<String>,
        name: String,
    },
    /// The `*` projection
    Star,
    /// Table reference
    Table(Table),
    /// Aliased relation: `relation name`
    TableAlias { relation: Box<Node>, name: String },

    // Statements
    Select(Box<SelectStatement>),
    Insert(Box<InsertStatement>),
    Update(Box<UpdateStatement>),
    Delete(Box<DeleteStatement>),

    // Join plumbing
    /// A relation with its (possibly empty) join list
    JoinSource(JoinSource),
    /// Inner join; an absent `right` means there is no condition and the
    /// join degenerates to a cross join in dialects that spell it so
    InnerJoin {
        left: Box<Node>,
        right: Option<Box<Node>>,
    },
    /// Left outer join
    OuterJoin { left: Box<Node>, right: Box<Node> },
    /// `ON <expr>` join condition
    On(Box<Node>),

    // Predicates
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    And(Vec<Node>),
    Or { left: Box<Node>, right: Box<Node> },
    Not(Box<Node>),
    Grouping(Box<Node>),
    In { left: Box<Node>, right: Vec<Node> },
    NotIn { left: Box<Node>, right: Vec<Node> },
    IsNull(Box<Node>),
    IsNotNull(Box<Node>),

    // Pattern and regex comparisons (dialect-specialized)
    Matches {
        left: Box<Node>,
        right: Box<Node>,
        escape: Option<Box<Node>>,
        case_sensitive: bool,
    },
    DoesNotMatch {
        left: Box<Node>,
        right: Box<Node>,
        escape: Option<Box<Node>>,
        case_sensitive: bool,
    },
    Regexp {
        left: Box<Node>,
        right: Box<Node>,
        case_sensitive: bool,
    },
    NotRegexp {
        left: Box<Node>,
        right: Box<Node>,
        case_sensitive: bool,
    },
    IsDistinctFrom { left: Box<Node>, right: Box<Node> },
    IsNotDistinctFrom { left: Box<Node>, right: Box<Node> },

    // Grouping constructs
    /// Plain `DISTINCT` set quantifier
    Distinct,
    /// `DISTINCT ON ( ... )` set quantifier
    DistinctOn(GroupingExpr),
    /// Parenthesized grouping element `( ... )`
    GroupingElement(GroupingExpr),
    Cube(GroupingExpr),
    RollUp(GroupingExpr),
    GroupingSet(GroupingExpr),
    /// `LATERAL (expr)` subquery
    Lateral(Box<Node>),

    // Clause fragments
    /// `column = value` in an UPDATE's SET list
    Assignment { column: String, value: Box<Node> },
    /// `expr ASC|DESC` in an ORDER BY list
    Ordering { expr: Box<Node>, order: SortOrder },
}

/// Payload of a grouping construct.
///
/// The variant is fixed at construction time and drives
/// parenthesization: `Many` renders as an attached parenthesized list,
/// `Single` renders the expression bare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GroupingExpr {
    Single(Box<Node>),
    Many(Vec<Node>),
}

impl From<Node> for GroupingExpr {
    fn from(node: Node) -> Self {
        GroupingExpr::Single(Box::new(node))
    }
}

impl From<Vec<Node>> for GroupingExpr {
    fn from(nodes: Vec<Node>) -> Self {
        GroupingExpr::Many(nodes)
    }
}
