//! Ergonomic constructor functions for query-tree nodes.
//!
//! These helpers avoid the verbosity of building enum variants directly;
//! the tree they produce is identical to hand-constructed nodes.
//!
//! # Example
//! ```
//! use relsql::prelude::*;
//!
//! let users = Table::new("users");
//! let mut stmt = UpdateStatement::new(JoinSource::table(users));
//! stmt.values.push(assign("active", lit(false)));
//! stmt.wheres.push(eq(col("users.id"), bind(42)));
//! ```

use crate::ast::{BinaryOp, GroupingExpr, Node, SortOrder, Table, Value};

/// A bare table reference node.
pub fn table(name: impl Into<String>) -> Node {
    Node::Table(Table::new(name))
}

/// A column reference. A dotted path qualifies the column:
/// `col("users.id")` is `"users"."id"`, `col("id")` is `"id"`.
pub fn col(path: &str) -> Node {
    match path.split_once('.') {
        Some((relation, name)) => Node::Column {
            relation: Some(relation.to_string()),
            name: name.to_string(),
        },
        None => Node::Column {
            relation: None,
            name: path.to_string(),
        },
    }
}

/// The `*` projection.
pub fn star() -> Node {
    Node::Star
}

/// A literal value node.
pub fn lit(value: impl Into<Value>) -> Node {
    Node::Literal(value.into())
}

/// A positional bind parameter node.
pub fn bind(value: impl Into<Value>) -> Node {
    Node::BindParam(value.into())
}

/// A raw SQL fragment, emitted verbatim.
pub fn sql(fragment: impl Into<String>) -> Node {
    Node::SqlLiteral(fragment.into())
}

fn binary(op: BinaryOp, left: Node, right: Node) -> Node {
    Node::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn eq(left: Node, right: Node) -> Node {
    binary(BinaryOp::Eq, left, right)
}

pub fn ne(left: Node, right: Node) -> Node {
    binary(BinaryOp::NotEq, left, right)
}

pub fn gt(left: Node, right: Node) -> Node {
    binary(BinaryOp::Gt, left, right)
}

pub fn gte(left: Node, right: Node) -> Node {
    binary(BinaryOp::Gte, left, right)
}

pub fn lt(left: Node, right: Node) -> Node {
    binary(BinaryOp::Lt, left, right)
}

pub fn lte(left: Node, right: Node) -> Node {
    binary(BinaryOp::Lte, left, right)
}

pub fn and(children: Vec<Node>) -> Node {
    Node::And(children)
}

pub fn or(left: Node, right: Node) -> Node {
    Node::Or {
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn not(child: Node) -> Node {
    Node::Not(Box::new(child))
}

pub fn grouping(child: Node) -> Node {
    Node::Grouping(Box::new(child))
}

pub fn in_list(left: Node, right: Vec<Node>) -> Node {
    Node::In {
        left: Box::new(left),
        right,
    }
}

pub fn not_in_list(left: Node, right: Vec<Node>) -> Node {
    Node::NotIn {
        left: Box::new(left),
        right,
    }
}

pub fn is_null(expr: Node) -> Node {
    Node::IsNull(Box::new(expr))
}

pub fn is_not_null(expr: Node) -> Node {
    Node::IsNotNull(Box::new(expr))
}

/// A pattern match. `case_sensitive` selects LIKE over ILIKE in
/// dialects that distinguish them.
pub fn matches(left: Node, right: Node, case_sensitive: bool) -> Node {
    Node::Matches {
        left: Box::new(left),
        right: Box::new(right),
        escape: None,
        case_sensitive,
    }
}

pub fn does_not_match(left: Node, right: Node, case_sensitive: bool) -> Node {
    Node::DoesNotMatch {
        left: Box::new(left),
        right: Box::new(right),
        escape: None,
        case_sensitive,
    }
}

pub fn regexp(left: Node, right: Node, case_sensitive: bool) -> Node {
    Node::Regexp {
        left: Box::new(left),
        right: Box::new(right),
        case_sensitive,
    }
}

pub fn not_regexp(left: Node, right: Node, case_sensitive: bool) -> Node {
    Node::NotRegexp {
        left: Box::new(left),
        right: Box::new(right),
        case_sensitive,
    }
}

pub fn is_distinct_from(left: Node, right: Node) -> Node {
    Node::IsDistinctFrom {
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn is_not_distinct_from(left: Node, right: Node) -> Node {
    Node::IsNotDistinctFrom {
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn distinct_on(expr: impl Into<GroupingExpr>) -> Node {
    Node::DistinctOn(expr.into())
}

pub fn grouping_element(expr: impl Into<GroupingExpr>) -> Node {
    Node::GroupingElement(expr.into())
}

pub fn cube(expr: impl Into<GroupingExpr>) -> Node {
    Node::Cube(expr.into())
}

pub fn rollup(expr: impl Into<GroupingExpr>) -> Node {
    Node::RollUp(expr.into())
}

pub fn grouping_set(expr: impl Into<GroupingExpr>) -> Node {
    Node::GroupingSet(expr.into())
}

pub fn lateral(expr: Node) -> Node {
    Node::Lateral(Box::new(expr))
}

/// A SET-list assignment: `column = value`.
pub fn assign(column: impl Into<String>, value: Node) -> Node {
    Node::Assignment {
        column: column.into(),
        value: Box::new(value),
    }
}

pub fn asc(expr: Node) -> Node {
    Node::Ordering {
        expr: Box::new(expr),
        order: SortOrder::Asc,
    }
}

pub fn desc(expr: Node) -> Node {
    Node::Ordering {
        expr: Box::new(expr),
        order: SortOrder::Desc,
    }
}

/// An inner join with an ON condition.
pub fn inner_join(relation: Node, on: Node) -> Node {
    Node::InnerJoin {
        left: Box::new(relation),
        right: Some(Box::new(Node::On(Box::new(on)))),
    }
}

/// A condition-less inner join; dialects with a CROSS JOIN keyword
/// spell it that way.
pub fn cross_join(relation: Node) -> Node {
    Node::InnerJoin {
        left: Box::new(relation),
        right: None,
    }
}

/// A left outer join with an ON condition.
pub fn outer_join(relation: Node, on: Node) -> Node {
    Node::OuterJoin {
        left: Box::new(relation),
        right: Box::new(Node::On(Box::new(on))),
    }
}
