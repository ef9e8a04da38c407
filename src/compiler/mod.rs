//! SQL compilers for the query tree.
//!
//! Rendering is a depth-first walk of the tree. `GenericCompiler`
//! carries the dialect-agnostic default rule for every node kind it can
//! express; a dialect compiler such as `PostgresCompiler` specializes
//! the node kinds whose text differs and forwards the rest. Recursion
//! from inside the generic rules flows back through the dialect, so
//! children of a generic-rendered node still get dialect treatment.

pub mod collector;
pub mod generic;
pub mod postgres;

#[cfg(test)]
mod tests;

use crate::ast::Node;
use crate::error::Result;

pub use collector::SqlString;
pub use generic::GenericCompiler;
pub use postgres::PostgresCompiler;

/// A compiler from tree nodes to SQL text.
pub trait Render {
    /// Render one node into the accumulator, recursing into children.
    fn render(&self, node: &Node, out: &mut SqlString) -> Result<()>;

    /// Render a node into a fresh accumulator.
    fn to_sql(&self, node: &Node) -> Result<SqlString> {
        let mut out = SqlString::new();
        self.render(node, &mut out)?;
        Ok(out)
    }
}

/// Quote an identifier the standard-SQL way: double quotes, doubled
/// inside.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Render `nodes` joined by `separator`, preceded by `prefix`.
/// Emits nothing for an empty list.
pub(crate) fn collect_nodes(
    dialect: &dyn Render,
    nodes: &[Node],
    out: &mut SqlString,
    prefix: &str,
    separator: &str,
) -> Result<()> {
    if nodes.is_empty() {
        return Ok(());
    }
    out.push(prefix);
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.push(separator);
        }
        dialect.render(node, out)?;
    }
    Ok(())
}

/// Append a trailing `/* ... */` comment if one is present. A closing
/// delimiter inside the text would terminate the comment early, so it
/// is broken up.
pub(crate) fn append_comment(out: &mut SqlString, comment: Option<&str>) {
    if let Some(text) = comment {
        out.push(" /* ");
        out.push(&text.replace("*/", "* /"));
        out.push(" */");
    }
}
