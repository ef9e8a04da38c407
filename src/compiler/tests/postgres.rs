//! PostgreSQL compiler tests.

use pretty_assertions::assert_eq;

use crate::ast::builders::*;
use crate::ast::*;
use crate::compiler::postgres::UPDATE_TARGET_ALIAS;
use crate::compiler::{GenericCompiler, PostgresCompiler, Render};

fn render(node: &Node) -> String {
    PostgresCompiler::new().to_sql(node).unwrap().into_sql()
}

/// UPDATE users joined to memberships, keyed on users.id.
fn joined_update() -> UpdateStatement {
    let mut relation = JoinSource::table(Table::new("users"));
    relation.right.push(inner_join(
        table("memberships"),
        eq(col("memberships.user_id"), col("users.id")),
    ));
    let mut stmt = UpdateStatement::new(relation);
    stmt.values.push(assign("admin", lit(true)));
    stmt.wheres.push(eq(col("memberships.role"), lit("owner")));
    stmt.key.push("id".to_string());
    stmt
}

#[test]
fn test_update_with_join_takes_the_direct_form() {
    let stmt = joined_update();
    assert_eq!(
        render(&Node::Update(Box::new(stmt))),
        "UPDATE \"users\" \"__update_target\" SET \"admin\" = true \
         FROM \"users\" INNER JOIN \"memberships\" \
         ON \"memberships\".\"user_id\" = \"users\".\"id\" \
         WHERE \"memberships\".\"role\" = 'owner' \
         AND \"users\".\"id\" = \"__update_target\".\"id\""
    );
}

#[test]
fn test_direct_form_links_every_key_column() {
    let mut stmt = joined_update();
    stmt.key.push("tenant_id".to_string());
    let sql = render(&Node::Update(Box::new(stmt)));
    assert!(sql.contains("\"users\".\"id\" = \"__update_target\".\"id\""));
    assert!(sql.contains(
        "\"users\".\"tenant_id\" = \"__update_target\".\"tenant_id\""
    ));
}

#[test]
fn test_update_rewrite_leaves_the_input_tree_intact() {
    let stmt = joined_update();
    let before = stmt.clone();
    let node = Node::Update(Box::new(stmt));
    let first = render(&node);
    assert_eq!(node, Node::Update(Box::new(before)));
    let second = render(&node);
    assert_eq!(first, second);
}

#[test]
fn test_update_with_order_falls_back_to_subquery() {
    let mut stmt = joined_update();
    stmt.orders.push(desc(col("users.created_at")));
    let sql = render(&Node::Update(Box::new(stmt)));
    assert_eq!(
        sql,
        "UPDATE \"users\" SET \"admin\" = true WHERE \"users\".\"id\" IN \
         (SELECT \"users\".\"id\" FROM \"users\" INNER JOIN \"memberships\" \
         ON \"memberships\".\"user_id\" = \"users\".\"id\" \
         WHERE \"memberships\".\"role\" = 'owner' \
         ORDER BY \"users\".\"created_at\" DESC)"
    );
    assert!(!sql.contains(UPDATE_TARGET_ALIAS));
}

#[test]
fn test_update_with_group_by_falls_back_to_subquery() {
    let mut stmt = joined_update();
    stmt.groups.push(col("users.id"));
    let sql = render(&Node::Update(Box::new(stmt)));
    assert!(sql.contains("IN (SELECT"));
    assert!(sql.contains("GROUP BY \"users\".\"id\")"));
    assert!(!sql.contains(UPDATE_TARGET_ALIAS));
}

#[test]
fn test_update_without_key_matches_the_generic_output() {
    let mut stmt = joined_update();
    stmt.key.clear();
    let node = Node::Update(Box::new(stmt));
    let pg = PostgresCompiler::new().to_sql(&node).unwrap();
    let generic = GenericCompiler::new().to_sql(&node).unwrap();
    assert_eq!(pg.sql(), generic.sql());
    assert!(!pg.sql().contains(UPDATE_TARGET_ALIAS));
}

#[test]
fn test_every_update_render_is_non_retryable() {
    // Direct strategy.
    let out = PostgresCompiler::new()
        .to_sql(&Node::Update(Box::new(joined_update())))
        .unwrap();
    assert!(!out.retryable());

    // Fallback strategy.
    let mut stmt = joined_update();
    stmt.limit = Some(10);
    let out = PostgresCompiler::new()
        .to_sql(&Node::Update(Box::new(stmt)))
        .unwrap();
    assert!(!out.retryable());
}

#[test]
fn test_direct_form_keeps_the_trailing_comment() {
    let mut stmt = joined_update();
    stmt.comment = Some("backfill".to_string());
    let sql = render(&Node::Update(Box::new(stmt)));
    assert!(sql.ends_with(" /* backfill */"));
    assert!(sql.contains(" FROM "));
}

#[test]
fn test_matches_selects_like_by_case() {
    assert_eq!(
        render(&matches(col("name"), lit("A%"), false)),
        "\"name\" ILIKE 'A%'"
    );
    assert_eq!(
        render(&matches(col("name"), lit("A%"), true)),
        "\"name\" LIKE 'A%'"
    );
}

#[test]
fn test_matches_with_escape() {
    let node = Node::Matches {
        left: Box::new(col("name")),
        right: Box::new(lit("A%")),
        escape: Some(Box::new(lit("\\"))),
        case_sensitive: true,
    };
    assert_eq!(render(&node), "\"name\" LIKE 'A%' ESCAPE '\\'");
}

#[test]
fn test_does_not_match() {
    assert_eq!(
        render(&does_not_match(col("name"), lit("A%"), false)),
        "\"name\" NOT ILIKE 'A%'"
    );
    assert_eq!(
        render(&does_not_match(col("name"), lit("A%"), true)),
        "\"name\" NOT LIKE 'A%'"
    );
}

#[test]
fn test_regexp_operator_table() {
    assert_eq!(render(&regexp(col("name"), lit("^a"), true)), "\"name\" ~ '^a'");
    assert_eq!(render(&regexp(col("name"), lit("^a"), false)), "\"name\" ~* '^a'");
    assert_eq!(render(&not_regexp(col("name"), lit("^a"), true)), "\"name\" !~ '^a'");
    assert_eq!(render(&not_regexp(col("name"), lit("^a"), false)), "\"name\" !~* '^a'");
}

#[test]
fn test_distinct_on() {
    assert_eq!(render(&distinct_on(col("a"))), "DISTINCT ON ( \"a\" )");
    assert_eq!(
        render(&distinct_on(vec![col("a"), col("b")])),
        "DISTINCT ON ( \"a\", \"b\" )"
    );
}

#[test]
fn test_distinct_on_as_select_quantifier() {
    let mut stmt = SelectStatement::new();
    stmt.set_quantifier = Some(distinct_on(col("user_id")));
    stmt.projections.push(star());
    stmt.relation = Some(JoinSource::table(Table::new("events")));
    assert_eq!(
        render(&Node::Select(Box::new(stmt))),
        "SELECT DISTINCT ON ( \"user_id\" ) * FROM \"events\""
    );
}

#[test]
fn test_grouping_constructs_parenthesize_by_variant() {
    assert_eq!(render(&cube(vec![col("a"), col("b")])), "CUBE( \"a\", \"b\" )");
    assert_eq!(render(&cube(col("a"))), "CUBE \"a\"");
    assert_eq!(render(&rollup(vec![col("a"), col("b")])), "ROLLUP( \"a\", \"b\" )");
    assert_eq!(
        render(&grouping_set(vec![col("a"), col("b")])),
        "GROUPING SETS( \"a\", \"b\" )"
    );
    assert_eq!(render(&grouping_set(col("a"))), "GROUPING SETS \"a\"");
}

#[test]
fn test_grouping_set_of_grouping_elements() {
    let node = grouping_set(vec![
        grouping_element(vec![col("a"), col("b")]),
        grouping_element(col("c")),
    ]);
    assert_eq!(
        render(&node),
        "GROUPING SETS( ( \"a\", \"b\" ), ( \"c\" ) )"
    );
}

#[test]
fn test_lateral_always_parenthesizes() {
    let mut sub = SelectStatement::new();
    sub.projections.push(star());
    sub.relation = Some(JoinSource::table(Table::new("orders")));
    assert_eq!(
        render(&lateral(Node::Select(Box::new(sub)))),
        "LATERAL (SELECT * FROM \"orders\")"
    );
}

#[test]
fn test_join_without_condition_is_a_cross_join() {
    assert_eq!(render(&cross_join(table("t"))), "CROSS JOIN \"t\"");
}

#[test]
fn test_join_with_condition_matches_the_generic_text() {
    let node = inner_join(table("t"), eq(col("t.a"), col("s.a")));
    let pg = PostgresCompiler::new().to_sql(&node).unwrap();
    let generic = GenericCompiler::new().to_sql(&node).unwrap();
    assert_eq!(pg.sql(), generic.sql());
    assert_eq!(pg.sql(), "INNER JOIN \"t\" ON \"t\".\"a\" = \"s\".\"a\"");
}

#[test]
fn test_native_distinctness_operators() {
    assert_eq!(
        render(&is_distinct_from(col("a"), col("b"))),
        "\"a\" IS DISTINCT FROM \"b\""
    );
    assert_eq!(
        render(&is_not_distinct_from(col("a"), col("b"))),
        "\"a\" IS NOT DISTINCT FROM \"b\""
    );
}

#[test]
fn test_binds_are_numbered_in_order_of_appearance() {
    let mut stmt = SelectStatement::new();
    stmt.projections.push(star());
    stmt.relation = Some(JoinSource::table(Table::new("users")));
    stmt.wheres.push(eq(col("id"), bind(7)));
    stmt.wheres.push(matches(col("name"), bind("a%"), false));
    let out = PostgresCompiler::new()
        .to_sql(&Node::Select(Box::new(stmt)))
        .unwrap();
    assert_eq!(
        out.sql(),
        "SELECT * FROM \"users\" WHERE \"id\" = $1 AND \"name\" ILIKE $2"
    );
    assert_eq!(out.binds(), &[Value::Int(7), Value::String("a%".to_string())]);
}

#[test]
fn test_rendering_is_idempotent_across_fresh_collectors() {
    let mut stmt = SelectStatement::new();
    stmt.projections.push(col("id"));
    stmt.relation = Some(JoinSource::table(Table::new("users")));
    stmt.wheres.push(eq(col("id"), bind(1)));
    let node = Node::Select(Box::new(stmt));
    let compiler = PostgresCompiler::new();
    let first = compiler.to_sql(&node).unwrap();
    let second = compiler.to_sql(&node).unwrap();
    assert_eq!(first.sql(), second.sql());
    assert_eq!(first.binds(), second.binds());
}

#[test]
fn test_update_binds_number_through_the_direct_form() {
    let mut stmt = joined_update();
    stmt.values.clear();
    stmt.values.push(assign("admin", bind(true)));
    let out = PostgresCompiler::new()
        .to_sql(&Node::Update(Box::new(stmt)))
        .unwrap();
    assert_eq!(
        out.sql(),
        "UPDATE \"users\" \"__update_target\" SET \"admin\" = $1 \
         FROM \"users\" INNER JOIN \"memberships\" \
         ON \"memberships\".\"user_id\" = \"users\".\"id\" \
         WHERE \"memberships\".\"role\" = 'owner' \
         AND \"users\".\"id\" = \"__update_target\".\"id\""
    );
    assert_eq!(out.binds(), &[Value::Bool(true)]);
}
