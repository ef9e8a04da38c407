//! PostgreSQL dialect compiler.
//!
//! Specializes the node kinds whose PostgreSQL spelling differs from
//! the generic defaults: UPDATE with join sources, pattern and regex
//! matches, grouping constructs, LATERAL, condition-less joins,
//! distinctness comparisons and `$n` bind placeholders. Everything else
//! forwards to the generic compiler, which recurses back through this
//! dialect for child nodes.

use crate::ast::{BinaryOp, GroupingExpr, Node, UpdateStatement};
use crate::compiler::{GenericCompiler, Render, SqlString, append_comment, collect_nodes};
use crate::error::Result;

/// Statement-scoped alias the target table takes when an UPDATE is
/// rewritten to join through its own FROM list.
pub const UPDATE_TARGET_ALIAS: &str = "__update_target";

/// The PostgreSQL compiler.
#[derive(Debug, Default)]
pub struct PostgresCompiler {
    generic: GenericCompiler,
}

impl PostgresCompiler {
    pub fn new() -> Self {
        Self {
            generic: GenericCompiler::new(),
        }
    }

    fn render_update(&self, stmt: &UpdateStatement, out: &mut SqlString) -> Result<()> {
        // A restructured statement must not be replayed as cached text.
        out.set_retryable(false);
        match self.rewrite_joined_update(stmt) {
            Some(rewritten) => self.emit_joined_update(&rewritten, out),
            None => self.generic.render_update(stmt, out, self),
        }
    }

    /// PostgreSQL UPDATE accepts a FROM list of joined tables, but not
    /// LIMIT, OFFSET or ORDER BY in that form, and GROUP BY/HAVING do
    /// not mix with row-level join semantics. Statements outside that
    /// shape fall back to the generic subquery strategy; so does any
    /// statement without a key, since the self-join cannot be
    /// reconnected without one.
    ///
    /// Returns the rewritten copy, or None when the direct form does
    /// not apply. The input statement is never touched.
    fn rewrite_joined_update(&self, stmt: &UpdateStatement) -> Option<UpdateStatement> {
        if stmt.key.is_empty()
            || !stmt.relation.has_joins()
            || stmt.has_group_by_or_having()
            || stmt.has_limit_or_offset_or_orders()
        {
            return None;
        }
        let target = stmt.relation.left_name()?.to_string();

        // Join clauses cannot reference the table being updated, so
        // alias the update target, move the original relation into the
        // FROM list, and reconnect the two through the key columns.
        let mut rewritten = stmt.clone();
        rewritten.relation.right.insert(0, (*stmt.relation.left).clone());
        rewritten.relation.left = Box::new(Node::TableAlias {
            relation: stmt.relation.left.clone(),
            name: UPDATE_TARGET_ALIAS.to_string(),
        });
        for key in &stmt.key {
            rewritten.wheres.push(Node::Binary {
                op: BinaryOp::Eq,
                left: Box::new(Node::Column {
                    relation: Some(target.clone()),
                    name: key.clone(),
                }),
                right: Box::new(Node::Column {
                    relation: Some(UPDATE_TARGET_ALIAS.to_string()),
                    name: key.clone(),
                }),
            });
        }
        Some(rewritten)
    }

    /// Emit the direct-join form:
    ///
    ///   UPDATE t1 "__update_target"
    ///   SET ..
    ///   FROM t1 JOIN t2 ON t2.t1_id = t1.id ..
    ///   WHERE t1.id = "__update_target".id AND ..
    fn emit_joined_update(&self, stmt: &UpdateStatement, out: &mut SqlString) -> Result<()> {
        out.push("UPDATE ");
        self.render(&stmt.relation.left, out)?;
        collect_nodes(self, &stmt.values, out, " SET ", ", ")?;
        out.push(" FROM ");
        collect_nodes(self, &stmt.relation.right, out, "", " ")?;
        collect_nodes(self, &stmt.wheres, out, " WHERE ", " AND ")?;
        collect_nodes(self, &stmt.orders, out, " ORDER BY ", ", ")?;
        if let Some(limit) = stmt.limit {
            out.push(&format!(" LIMIT {}", limit));
        }
        append_comment(out, stmt.comment.as_deref());
        Ok(())
    }

    fn infix(&self, left: &Node, op: &str, right: &Node, out: &mut SqlString) -> Result<()> {
        self.render(left, out)?;
        out.push(op);
        self.render(right, out)
    }

    fn maybe_escape(&self, escape: Option<&Node>, out: &mut SqlString) -> Result<()> {
        if let Some(escape) = escape {
            out.push(" ESCAPE ");
            self.render(escape, out)?;
        }
        Ok(())
    }

    /// CUBE/ROLLUP/GROUPING SETS attach a parenthesized list for a
    /// sequence payload but take a single expression bare; the variant
    /// was fixed when the node was built.
    fn keyword_grouping(
        &self,
        keyword: &str,
        expr: &GroupingExpr,
        out: &mut SqlString,
    ) -> Result<()> {
        out.push(keyword);
        match expr {
            GroupingExpr::Many(items) => {
                out.push("( ");
                collect_nodes(self, items, out, "", ", ")?;
                out.push(" )");
            }
            GroupingExpr::Single(item) => {
                out.push(" ");
                self.render(item, out)?;
            }
        }
        Ok(())
    }

    fn parenthesized(&self, expr: &GroupingExpr, out: &mut SqlString) -> Result<()> {
        out.push("( ");
        match expr {
            GroupingExpr::Single(item) => self.render(item, out)?,
            GroupingExpr::Many(items) => collect_nodes(self, items, out, "", ", ")?,
        }
        out.push(" )");
        Ok(())
    }
}

impl Render for PostgresCompiler {
    fn render(&self, node: &Node, out: &mut SqlString) -> Result<()> {
        match node {
            Node::Update(stmt) => self.render_update(stmt, out),

            Node::BindParam(value) => {
                let index = out.add_bind(value.clone());
                out.push(&format!("${}", index));
                Ok(())
            }

            Node::Matches {
                left,
                right,
                escape,
                case_sensitive,
            } => {
                let op = if *case_sensitive { " LIKE " } else { " ILIKE " };
                self.infix(left, op, right, out)?;
                self.maybe_escape(escape.as_deref(), out)
            }
            Node::DoesNotMatch {
                left,
                right,
                escape,
                case_sensitive,
            } => {
                let op = if *case_sensitive {
                    " NOT LIKE "
                } else {
                    " NOT ILIKE "
                };
                self.infix(left, op, right, out)?;
                self.maybe_escape(escape.as_deref(), out)
            }
            // Regex operators take no ESCAPE clause.
            Node::Regexp {
                left,
                right,
                case_sensitive,
            } => {
                let op = if *case_sensitive { " ~ " } else { " ~* " };
                self.infix(left, op, right, out)
            }
            Node::NotRegexp {
                left,
                right,
                case_sensitive,
            } => {
                let op = if *case_sensitive { " !~ " } else { " !~* " };
                self.infix(left, op, right, out)
            }

            Node::DistinctOn(expr) => {
                out.push("DISTINCT ON ");
                self.parenthesized(expr, out)
            }
            Node::Cube(expr) => self.keyword_grouping("CUBE", expr, out),
            Node::RollUp(expr) => self.keyword_grouping("ROLLUP", expr, out),
            Node::GroupingSet(expr) => self.keyword_grouping("GROUPING SETS", expr, out),
            Node::Lateral(expr) => {
                out.push("LATERAL (");
                self.render(expr, out)?;
                out.push(")");
                Ok(())
            }

            // A join without a condition is a cross join here; with one
            // it renders the standard way.
            Node::InnerJoin { left, right: None } => {
                out.push("CROSS JOIN ");
                self.render(left, out)
            }

            Node::IsDistinctFrom { left, right } => {
                self.infix(left, " IS DISTINCT FROM ", right, out)
            }
            Node::IsNotDistinctFrom { left, right } => {
                self.infix(left, " IS NOT DISTINCT FROM ", right, out)
            }

            other => self.generic.dispatch(other, out, self),
        }
    }
}
