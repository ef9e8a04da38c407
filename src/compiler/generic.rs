//! Dialect-agnostic SQL generation.
//!
//! Default rendering for every node kind that has a portable spelling.
//! Constructs with no universal syntax (regex matches, DISTINCT ON,
//! CUBE/ROLLUP/GROUPING SETS, LATERAL) return `Error::Unsupported` here
//! and are the business of a dialect compiler.

use crate::ast::{
    DeleteStatement, GroupingExpr, InsertStatement, JoinSource, Node, SelectStatement,
    UpdateStatement, Value,
};
use crate::compiler::{Render, SqlString, append_comment, collect_nodes, quote_identifier};
use crate::error::{Error, Result};

const DIALECT: &str = "standard SQL";

/// The dialect-agnostic compiler.
///
/// Usable on its own, or as the default arm of a dialect compiler.
/// Every rule takes the dispatching dialect as `&dyn Render` so that
/// recursion into child nodes re-enters the dialect's specializations.
#[derive(Debug, Default)]
pub struct GenericCompiler;

impl GenericCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Render `node` with `dialect` handling all child recursion.
    pub fn dispatch(&self, node: &Node, out: &mut SqlString, dialect: &dyn Render) -> Result<()> {
        match node {
            Node::SqlLiteral(raw) => {
                out.push(raw);
                Ok(())
            }
            Node::Literal(value) => {
                out.push(&value.to_string());
                Ok(())
            }
            Node::BindParam(value) => {
                out.add_bind(value.clone());
                out.push("?");
                Ok(())
            }
            Node::Column { relation, name } => {
                if let Some(relation) = relation {
                    out.push(&quote_identifier(relation));
                    out.push(".");
                }
                out.push(&quote_identifier(name));
                Ok(())
            }
            Node::Star => {
                out.push("*");
                Ok(())
            }
            Node::Table(table) => {
                out.push(&quote_identifier(&table.name));
                Ok(())
            }
            Node::TableAlias { relation, name } => {
                dialect.render(relation, out)?;
                out.push(" ");
                out.push(&quote_identifier(name));
                Ok(())
            }

            Node::Select(stmt) => self.render_select(stmt, out, dialect),
            Node::Insert(stmt) => self.render_insert(stmt, out, dialect),
            Node::Update(stmt) => self.render_update(stmt, out, dialect),
            Node::Delete(stmt) => self.render_delete(stmt, out, dialect),

            Node::JoinSource(source) => self.render_join_source(source, out, dialect),
            Node::InnerJoin { left, right } => {
                out.push("INNER JOIN ");
                dialect.render(left, out)?;
                if let Some(right) = right {
                    out.push(" ");
                    dialect.render(right, out)?;
                }
                Ok(())
            }
            Node::OuterJoin { left, right } => {
                out.push("LEFT OUTER JOIN ");
                dialect.render(left, out)?;
                out.push(" ");
                dialect.render(right, out)
            }
            Node::On(expr) => {
                out.push("ON ");
                dialect.render(expr, out)
            }

            Node::Binary { op, left, right } => {
                dialect.render(left, out)?;
                out.push(&format!(" {} ", op.sql_symbol()));
                dialect.render(right, out)
            }
            Node::And(children) => collect_nodes(dialect, children, out, "", " AND "),
            Node::Or { left, right } => {
                dialect.render(left, out)?;
                out.push(" OR ");
                dialect.render(right, out)
            }
            Node::Not(expr) => {
                out.push("NOT (");
                dialect.render(expr, out)?;
                out.push(")");
                Ok(())
            }
            Node::Grouping(expr) => {
                out.push("(");
                dialect.render(expr, out)?;
                out.push(")");
                Ok(())
            }
            Node::In { left, right } => {
                // An empty list can match nothing.
                if right.is_empty() {
                    out.push("1=0");
                    return Ok(());
                }
                dialect.render(left, out)?;
                collect_nodes(dialect, right, out, " IN (", ", ")?;
                out.push(")");
                Ok(())
            }
            Node::NotIn { left, right } => {
                if right.is_empty() {
                    out.push("1=1");
                    return Ok(());
                }
                dialect.render(left, out)?;
                collect_nodes(dialect, right, out, " NOT IN (", ", ")?;
                out.push(")");
                Ok(())
            }
            Node::IsNull(expr) => {
                dialect.render(expr, out)?;
                out.push(" IS NULL");
                Ok(())
            }
            Node::IsNotNull(expr) => {
                dialect.render(expr, out)?;
                out.push(" IS NOT NULL");
                Ok(())
            }

            Node::Matches {
                left,
                right,
                escape,
                // No portable ILIKE; the flag only means something per dialect.
                case_sensitive: _,
            } => {
                dialect.render(left, out)?;
                out.push(" LIKE ");
                dialect.render(right, out)?;
                if let Some(escape) = escape {
                    out.push(" ESCAPE ");
                    dialect.render(escape, out)?;
                }
                Ok(())
            }
            Node::DoesNotMatch {
                left,
                right,
                escape,
                case_sensitive: _,
            } => {
                dialect.render(left, out)?;
                out.push(" NOT LIKE ");
                dialect.render(right, out)?;
                if let Some(escape) = escape {
                    out.push(" ESCAPE ");
                    dialect.render(escape, out)?;
                }
                Ok(())
            }
            Node::Regexp { .. } => Err(Error::unsupported("Regexp", DIALECT)),
            Node::NotRegexp { .. } => Err(Error::unsupported("NotRegexp", DIALECT)),
            Node::IsDistinctFrom { left, right } => {
                self.render_distinct_from(left, right, true, out, dialect)
            }
            Node::IsNotDistinctFrom { left, right } => {
                self.render_distinct_from(left, right, false, out, dialect)
            }

            Node::Distinct => {
                out.push("DISTINCT");
                Ok(())
            }
            Node::DistinctOn(_) => Err(Error::unsupported("DistinctOn", DIALECT)),
            Node::GroupingElement(expr) => {
                out.push("( ");
                match expr {
                    GroupingExpr::Single(item) => dialect.render(item, out)?,
                    GroupingExpr::Many(items) => collect_nodes(dialect, items, out, "", ", ")?,
                }
                out.push(" )");
                Ok(())
            }
            Node::Cube(_) => Err(Error::unsupported("Cube", DIALECT)),
            Node::RollUp(_) => Err(Error::unsupported("RollUp", DIALECT)),
            Node::GroupingSet(_) => Err(Error::unsupported("GroupingSet", DIALECT)),
            Node::Lateral(_) => Err(Error::unsupported("Lateral", DIALECT)),

            Node::Assignment { column, value } => {
                out.push(&quote_identifier(column));
                out.push(" = ");
                dialect.render(value, out)
            }
            Node::Ordering { expr, order } => {
                dialect.render(expr, out)?;
                out.push(" ");
                out.push(order.sql_keyword());
                Ok(())
            }
        }
    }

    fn render_join_source(
        &self,
        source: &JoinSource,
        out: &mut SqlString,
        dialect: &dyn Render,
    ) -> Result<()> {
        dialect.render(&source.left, out)?;
        for join in &source.right {
            out.push(" ");
            dialect.render(join, out)?;
        }
        Ok(())
    }

    fn render_select(
        &self,
        stmt: &SelectStatement,
        out: &mut SqlString,
        dialect: &dyn Render,
    ) -> Result<()> {
        out.push("SELECT ");
        if let Some(quantifier) = &stmt.set_quantifier {
            dialect.render(quantifier, out)?;
            out.push(" ");
        }
        collect_nodes(dialect, &stmt.projections, out, "", ", ")?;
        if let Some(relation) = &stmt.relation {
            out.push(" FROM ");
            self.render_join_source(relation, out, dialect)?;
        }
        collect_nodes(dialect, &stmt.wheres, out, " WHERE ", " AND ")?;
        collect_nodes(dialect, &stmt.groups, out, " GROUP BY ", ", ")?;
        collect_nodes(dialect, &stmt.havings, out, " HAVING ", " AND ")?;
        collect_nodes(dialect, &stmt.orders, out, " ORDER BY ", ", ")?;
        if let Some(limit) = stmt.limit {
            out.push(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = stmt.offset {
            out.push(&format!(" OFFSET {}", offset));
        }
        append_comment(out, stmt.comment.as_deref());
        Ok(())
    }

    fn render_insert(
        &self,
        stmt: &InsertStatement,
        out: &mut SqlString,
        dialect: &dyn Render,
    ) -> Result<()> {
        out.push("INSERT INTO ");
        dialect.render(&stmt.relation, out)?;
        if !stmt.columns.is_empty() {
            let columns: Vec<String> = stmt.columns.iter().map(|c| quote_identifier(c)).collect();
            out.push(&format!(" ({})", columns.join(", ")));
        }
        if stmt.values.is_empty() {
            out.push(" DEFAULT VALUES");
        } else {
            out.push(" VALUES ");
            for (i, row) in stmt.values.iter().enumerate() {
                if i > 0 {
                    out.push(", ");
                }
                collect_nodes(dialect, row, out, "(", ", ")?;
                out.push(")");
            }
        }
        append_comment(out, stmt.comment.as_deref());
        Ok(())
    }

    fn render_delete(
        &self,
        stmt: &DeleteStatement,
        out: &mut SqlString,
        dialect: &dyn Render,
    ) -> Result<()> {
        out.push("DELETE FROM ");
        dialect.render(&stmt.relation, out)?;
        collect_nodes(dialect, &stmt.wheres, out, " WHERE ", " AND ")?;
        append_comment(out, stmt.comment.as_deref());
        Ok(())
    }

    /// Default UPDATE rendering: restructure through
    /// `prepare_update_statement`, then emit the plain form.
    pub fn render_update(
        &self,
        stmt: &UpdateStatement,
        out: &mut SqlString,
        dialect: &dyn Render,
    ) -> Result<()> {
        // A restructured statement must not be replayed as cached text.
        out.set_retryable(false);
        let stmt = self.prepare_update_statement(stmt);
        out.push("UPDATE ");
        self.render_join_source(&stmt.relation, out, dialect)?;
        collect_nodes(dialect, &stmt.values, out, " SET ", ", ")?;
        collect_nodes(dialect, &stmt.wheres, out, " WHERE ", " AND ")?;
        collect_nodes(dialect, &stmt.orders, out, " ORDER BY ", ", ")?;
        if let Some(limit) = stmt.limit {
            out.push(&format!(" LIMIT {}", limit));
        }
        append_comment(out, stmt.comment.as_deref());
        Ok(())
    }

    /// The subquery strategy: an UPDATE whose shape cannot be expressed
    /// directly (joins, ORDER/LIMIT/OFFSET, GROUP BY/HAVING) is scoped
    /// through `WHERE key IN (SELECT key FROM <original shape>)`,
    /// provided a key is available. Returns a rewritten copy; the input
    /// statement is never touched.
    pub fn prepare_update_statement(&self, stmt: &UpdateStatement) -> UpdateStatement {
        let needs_subquery = stmt.relation.has_joins()
            || stmt.has_limit_or_offset_or_orders()
            || stmt.has_group_by_or_having();
        if stmt.key.is_empty() || !needs_subquery {
            return stmt.clone();
        }
        let Some(target) = stmt.relation.left_name() else {
            return stmt.clone();
        };

        let mut key_columns: Vec<Node> = stmt
            .key
            .iter()
            .map(|name| Node::Column {
                relation: Some(target.to_string()),
                name: name.clone(),
            })
            .collect();

        let subselect = SelectStatement {
            projections: key_columns.clone(),
            relation: Some(stmt.relation.clone()),
            wheres: stmt.wheres.clone(),
            groups: stmt.groups.clone(),
            havings: stmt.havings.clone(),
            orders: stmt.orders.clone(),
            limit: stmt.limit,
            offset: stmt.offset,
            ..SelectStatement::default()
        };

        // A composite key compares as a parenthesized row.
        let key_expr = if key_columns.len() == 1 {
            key_columns.remove(0)
        } else {
            Node::GroupingElement(GroupingExpr::Many(key_columns))
        };

        let mut rewritten = stmt.clone();
        rewritten.relation = JoinSource {
            left: stmt.relation.left.clone(),
            right: vec![],
        };
        rewritten.wheres = vec![Node::In {
            left: Box::new(key_expr),
            right: vec![Node::Select(Box::new(subselect))],
        }];
        rewritten.groups = vec![];
        rewritten.havings = vec![];
        rewritten.orders = vec![];
        rewritten.limit = None;
        rewritten.offset = None;
        rewritten
    }

    /// No portable IS DISTINCT FROM; emulate with a null-safe CASE,
    /// except against a literal NULL where IS [NOT] NULL suffices.
    fn render_distinct_from(
        &self,
        left: &Node,
        right: &Node,
        distinct: bool,
        out: &mut SqlString,
        dialect: &dyn Render,
    ) -> Result<()> {
        if matches!(right, Node::Literal(Value::Null)) {
            dialect.render(left, out)?;
            out.push(if distinct { " IS NOT NULL" } else { " IS NULL" });
            return Ok(());
        }
        out.push("CASE WHEN ");
        dialect.render(left, out)?;
        out.push(" = ");
        dialect.render(right, out)?;
        out.push(" OR (");
        dialect.render(left, out)?;
        out.push(" IS NULL AND ");
        dialect.render(right, out)?;
        out.push(" IS NULL) THEN 0 ELSE 1 END = ");
        out.push(if distinct { "1" } else { "0" });
        Ok(())
    }
}

impl Render for GenericCompiler {
    fn render(&self, node: &Node, out: &mut SqlString) -> Result<()> {
        self.dispatch(node, out, self)
    }
}
