//! End-to-end checks of the public API: build a tree, compile it for
//! PostgreSQL, and inspect the accumulator.

use pretty_assertions::assert_eq;
use relsql::prelude::*;

fn audited_update() -> UpdateStatement {
    let mut relation = JoinSource::table(Table::new("accounts"));
    relation.right.push(inner_join(
        table("audits"),
        eq(col("audits.account_id"), col("accounts.id")),
    ));
    let mut stmt = UpdateStatement::new(relation);
    stmt.values.push(assign("flagged", bind(true)));
    stmt.wheres.push(gte(col("audits.severity"), bind(3)));
    stmt.key.push("id".to_string());
    stmt
}

#[test]
fn joined_update_compiles_to_the_self_join_form() {
    let node = Node::Update(Box::new(audited_update()));
    let out = PostgresCompiler::new().to_sql(&node).unwrap();

    assert_eq!(
        out.sql(),
        "UPDATE \"accounts\" \"__update_target\" SET \"flagged\" = $1 \
         FROM \"accounts\" INNER JOIN \"audits\" \
         ON \"audits\".\"account_id\" = \"accounts\".\"id\" \
         WHERE \"audits\".\"severity\" >= $2 \
         AND \"accounts\".\"id\" = \"__update_target\".\"id\""
    );
    assert_eq!(out.binds(), &[Value::Bool(true), Value::Int(3)]);
    assert!(!out.retryable());
}

#[test]
fn the_same_tree_compiles_for_both_dialects() {
    // The rewrite works on a copy, so one tree can serve a PostgreSQL
    // render and a generic render without interference.
    let node = Node::Update(Box::new(audited_update()));
    let pg = PostgresCompiler::new().to_sql(&node).unwrap();
    let generic = GenericCompiler::new().to_sql(&node).unwrap();

    assert!(pg.sql().contains(" FROM "));
    assert!(!generic.sql().contains("__update_target"));
    assert_eq!(generic.binds().len(), pg.binds().len());
}

#[test]
fn ordered_update_switches_to_the_subquery_form() {
    let mut stmt = audited_update();
    stmt.orders.push(desc(col("accounts.id")));
    stmt.limit = Some(100);
    let out = PostgresCompiler::new()
        .to_sql(&Node::Update(Box::new(stmt)))
        .unwrap();

    assert!(out.sql().starts_with("UPDATE \"accounts\" SET"));
    assert!(out.sql().contains(
        "WHERE \"accounts\".\"id\" IN (SELECT \"accounts\".\"id\" FROM \"accounts\""
    ));
    assert!(out.sql().contains("ORDER BY \"accounts\".\"id\" DESC LIMIT 100)"));
    assert!(!out.retryable());
}
