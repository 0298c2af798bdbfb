use sqlx::PgPool;

/// All `id` primary keys must be bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty(), "expected id columns in the schema");
    for (table, data_type) in &rows {
        assert_eq!(
            data_type, "bigint",
            "Table {table}.id should be bigint, got {data_type}"
        );
    }
}

/// Every timestamp column must carry a time zone.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_naive_timestamp_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'timestamp without time zone'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        rows.is_empty(),
        "Found naive timestamp columns (should be timestamptz): {:?}",
        rows
    );
}

/// No character varying columns should exist - TEXT is preferred.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        rows.is_empty(),
        "Found VARCHAR columns (should use TEXT): {:?}",
        rows
    );
}

/// Every foreign key column must have a supporting index (the FK column may
/// be the leading column of a composite index).
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_fks_have_indexes(pool: PgPool) {
    let fk_columns: Vec<(String, String)> = sqlx::query_as(
        "SELECT DISTINCT
             tc.table_name,
             kcu.column_name
         FROM information_schema.table_constraints tc
         JOIN information_schema.key_column_usage kcu
             ON tc.constraint_name = kcu.constraint_name
             AND tc.table_schema = kcu.table_schema
         WHERE tc.constraint_type = 'FOREIGN KEY'
           AND tc.table_schema = 'public'
         ORDER BY tc.table_name, kcu.column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!fk_columns.is_empty(), "expected FK columns in the schema");
    for (table, column) in &fk_columns {
        let has_index: (bool,) = sqlx::query_as(&format!(
            "SELECT EXISTS (
                SELECT 1
                FROM pg_indexes
                WHERE schemaname = 'public'
                  AND tablename = '{table}'
                  AND (indexdef LIKE '%({column})%' OR indexdef LIKE '%({column},%')
            )"
        ))
        .fetch_one(&pool)
        .await
        .unwrap();

        assert!(has_index.0, "FK column {table}.{column} has no index");
    }
}

/// Every foreign key constraint must declare an explicit ON DELETE rule
/// (CASCADE, RESTRICT, or SET NULL), never the implicit NO ACTION default.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_fks_have_delete_rules(pool: PgPool) {
    let fk_rules: Vec<(String, String, String)> = sqlx::query_as(
        "SELECT
             rc.constraint_name,
             tc.table_name,
             rc.delete_rule
         FROM information_schema.referential_constraints rc
         JOIN information_schema.table_constraints tc
             ON rc.constraint_name = tc.constraint_name
             AND rc.constraint_schema = tc.table_schema
         WHERE rc.constraint_schema = 'public'
         ORDER BY tc.table_name, rc.constraint_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        !fk_rules.is_empty(),
        "Expected at least one FK constraint in the schema"
    );

    for (constraint, table, delete_rule) in &fk_rules {
        assert!(
            matches!(delete_rule.as_str(), "CASCADE" | "RESTRICT" | "SET NULL"),
            "FK {constraint} on {table} has delete rule {delete_rule}; \
             declare CASCADE, RESTRICT, or SET NULL explicitly"
        );
    }
}

/// Unique constraints are named with the `uq_` prefix. The API error layer
/// maps violations of `uq_*` constraints to HTTP 409, so a misnamed
/// constraint would surface as a 500 instead.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_constraints_use_uq_prefix(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, constraint_name
         FROM information_schema.table_constraints
         WHERE table_schema = 'public'
           AND constraint_type = 'UNIQUE'
         ORDER BY table_name, constraint_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty(), "expected unique constraints in the schema");
    for (table, constraint) in &rows {
        assert!(
            constraint.starts_with("uq_"),
            "Unique constraint {constraint} on {table} should be named uq_*"
        );
    }
}
