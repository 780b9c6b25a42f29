//! Schema convention checks against information_schema.

use sqlx::PgPool;

/// All `id` columns must be uuid.
#[sqlx::test(migrations = "./migrations")]
async fn test_all_pks_are_uuid(pool: PgPool) {
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

    assert!(!rows.is_empty(), "expected entity tables in the schema");
    for (table, data_type) in &rows {
        assert_eq!(
            data_type, "uuid",
            "Table {table}.id should be uuid, got {data_type}"
        );
    }
}

/// Every table (except _sqlx_migrations) must have created_at and updated_at as timestamptz.
#[sqlx::test(migrations = "./migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        for col in ["created_at", "updated_at"] {
            let result: Option<(String,)> = sqlx::query_as(&format!(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = '{table}'
                   AND column_name = '{col}'"
            ))
            .fetch_optional(&pool)
            .await
            .unwrap();

            let (data_type,) =
                result.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz, got {data_type}"
            );
        }
    }
}

/// No character varying columns should exist — TEXT is preferred.
#[sqlx::test(migrations = "./migrations")]
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

/// Every foreign key column must have a corresponding index.
#[sqlx::test(migrations = "./migrations")]
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

    for (table, column) in &fk_columns {
        let has_index: (bool,) = sqlx::query_as(&format!(
            "SELECT EXISTS (
                SELECT 1
                FROM pg_indexes
                WHERE schemaname = 'public'
                  AND tablename = '{table}'
                  AND indexdef LIKE '%({column})%'
            )"
        ))
        .fetch_one(&pool)
        .await
        .unwrap();

        assert!(has_index.0, "FK column {table}.{column} has no index");
    }
}

/// Every foreign key must carry an explicit, intentional ON DELETE rule:
/// CASCADE for composition edges, SET NULL for audit and association edges.
#[sqlx::test(migrations = "./migrations")]
async fn test_all_fks_have_explicit_delete_rule(pool: PgPool) {
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
            delete_rule == "CASCADE" || delete_rule == "SET NULL",
            "FK {constraint} on {table} has delete rule {delete_rule}; \
             every edge must be an explicit CASCADE or SET NULL"
        );
    }
}

/// The declared CASCADE edges, and only those, actually cascade.
#[sqlx::test(migrations = "./migrations")]
async fn test_cascade_edges_match_policy(pool: PgPool) {
    let cascades: Vec<(String, String)> = sqlx::query_as(
        "SELECT tc.table_name, rc.constraint_name
         FROM information_schema.referential_constraints rc
         JOIN information_schema.table_constraints tc
             ON rc.constraint_name = tc.constraint_name
             AND rc.constraint_schema = tc.table_schema
         WHERE rc.constraint_schema = 'public'
           AND rc.delete_rule = 'CASCADE'
         ORDER BY tc.table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    let expected = [
        ("equipment_logs", "fk_equipment_logs_equipment"),
        ("maintenance_schedules", "fk_maintenance_schedules_equipment"),
        ("notifications", "fk_notifications_user"),
        ("ticket_responses", "fk_ticket_responses_ticket"),
    ];

    assert_eq!(cascades.len(), expected.len(), "cascade edge set drifted: {cascades:?}");
    for (table, constraint) in expected {
        assert!(
            cascades
                .iter()
                .any(|(t, c)| t == table && c == constraint),
            "missing CASCADE edge {constraint} on {table}"
        );
    }
}

/// Constraint names follow the uq_/ck_/fk_ prefixes.
#[sqlx::test(migrations = "./migrations")]
async fn test_constraint_naming(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT constraint_name, constraint_type
         FROM information_schema.table_constraints
         WHERE table_schema = 'public'
           AND table_name != '_sqlx_migrations'
           AND constraint_type IN ('UNIQUE', 'FOREIGN KEY')
         ORDER BY constraint_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (name, ctype) in &rows {
        let expected_prefix = match ctype.as_str() {
            "UNIQUE" => "uq_",
            "FOREIGN KEY" => "fk_",
            _ => unreachable!(),
        };
        assert!(
            name.starts_with(expected_prefix),
            "{ctype} constraint {name} should start with {expected_prefix}"
        );
    }
}
