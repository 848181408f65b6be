//! Integration tests for the PostgreSQL executor.
//! Run with: DATABASE_URL=... cargo test -p dedup-migrate-storage --features postgres -- --ignored pg_

#![cfg(feature = "postgres")]
#![allow(clippy::unwrap_used, reason = "integration test code")]

use dedup_migrate_core::revision::{CREATED_AT_INDEX, DEDUP_TABLES, UNIQUE_CONSTRAINTS};
use dedup_migrate_storage::{PgExecutor, StorageError, downgrade, upgrade};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Row};
use uuid::Uuid;

fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for PostgreSQL integration tests")
}

/// Creates a throwaway schema holding the pre-migration tables and returns an
/// executor whose connection resolves names inside it.
async fn create_fixture_schema() -> (PgExecutor, String) {
    let schema = format!("dedup_test_{}", Uuid::new_v4().simple());
    let admin = PgPool::connect(&database_url()).await.unwrap();
    sqlx::query(&format!("CREATE SCHEMA {schema}")).execute(&admin).await.unwrap();
    for meta in &DEDUP_TABLES {
        sqlx::query(&format!(
            "CREATE TABLE {schema}.{} ({} TEXT, {} TEXT, note TEXT, created_at TIMESTAMPTZ DEFAULT NOW())",
            meta.tablename, meta.pk_1, meta.pk_2
        ))
        .execute(&admin)
        .await
        .unwrap();
    }
    admin.close().await;

    let options: PgConnectOptions = database_url().parse().unwrap();
    let options = options.options([("search_path", schema.as_str())]);
    let pool = PgPoolOptions::new().max_connections(1).connect_with(options).await.unwrap();
    (PgExecutor::from_pool(pool), schema)
}

async fn drop_fixture_schema(schema: &str) {
    let admin = PgPool::connect(&database_url()).await.unwrap();
    sqlx::query(&format!("DROP SCHEMA {schema} CASCADE")).execute(&admin).await.unwrap();
    admin.close().await;
}

async fn insert(pool: &PgPool, table: usize, pk_1: &str, pk_2: &str, note: &str) -> Result<(), StorageError> {
    insert_nullable(pool, table, Some(pk_1), Some(pk_2), note).await
}

async fn insert_nullable(
    pool: &PgPool,
    table: usize,
    pk_1: Option<&str>,
    pk_2: Option<&str>,
    note: &str,
) -> Result<(), StorageError> {
    let meta = &DEDUP_TABLES[table];
    sqlx::query(&format!(
        "INSERT INTO {} ({}, {}, note) VALUES ($1, $2, $3)",
        meta.tablename, meta.pk_1, meta.pk_2
    ))
    .bind(pk_1)
    .bind(pk_2)
    .bind(note)
    .execute(pool)
    .await?;
    Ok(())
}

async fn row_count(pool: &PgPool, table: usize) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", DEDUP_TABLES[table].tablename))
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn constraint_count(pool: &PgPool) -> i64 {
    let names: Vec<&str> = UNIQUE_CONSTRAINTS.iter().map(|c| c.name).collect();
    sqlx::query(
        "SELECT COUNT(*) FROM pg_constraint c
         JOIN pg_namespace n ON n.oid = c.connamespace
         WHERE n.nspname = current_schema() AND c.contype = 'u' AND c.conname = ANY($1)",
    )
    .bind(&names)
    .fetch_one(pool)
    .await
    .unwrap()
    .get(0)
}

async fn index_exists(pool: &PgPool, name: &str) -> bool {
    sqlx::query("SELECT EXISTS (SELECT 1 FROM pg_indexes WHERE schemaname = current_schema() AND indexname = $1)")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
        .get(0)
}

#[tokio::test]
#[ignore]
async fn pg_upgrade_keeps_first_physical_row() {
    let (executor, schema) = create_fixture_schema().await;
    let pool = executor.pool().clone();
    for table in 0..DEDUP_TABLES.len() {
        insert(&pool, table, "a", "x", "first").await.unwrap();
        insert(&pool, table, "a", "x", "second").await.unwrap();
        insert(&pool, table, "b", "x", "other").await.unwrap();
    }

    let report = upgrade(&executor).await.unwrap();

    assert_eq!(report.total_rows_removed(), 14);
    for meta in &DEDUP_TABLES {
        let notes: Vec<String> = sqlx::query_scalar(&format!(
            "SELECT note FROM {} WHERE {} = 'a' AND {} = 'x'",
            meta.tablename, meta.pk_1, meta.pk_2
        ))
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(notes, vec!["first".to_owned()], "{}", meta.tablename);
    }
    drop_fixture_schema(&schema).await;
}

#[tokio::test]
#[ignore]
async fn pg_duplicate_insert_after_upgrade_is_rejected() {
    let (executor, schema) = create_fixture_schema().await;
    let pool = executor.pool().clone();

    upgrade(&executor).await.unwrap();
    assert_eq!(constraint_count(&pool).await, 14);
    assert!(index_exists(&pool, CREATED_AT_INDEX.name).await);

    for table in 0..DEDUP_TABLES.len() {
        insert(&pool, table, "a", "x", "first").await.unwrap();
        let err = insert(&pool, table, "a", "x", "second").await.unwrap_err();
        assert!(err.is_duplicate(), "expected duplicate, got {err}");
    }
    drop_fixture_schema(&schema).await;
}

#[tokio::test]
#[ignore]
async fn pg_downgrade_drops_constraints_and_keeps_rows() {
    let (executor, schema) = create_fixture_schema().await;
    let pool = executor.pool().clone();
    insert(&pool, 9, "u", "r", "first").await.unwrap();
    insert(&pool, 9, "u", "r", "second").await.unwrap();
    upgrade(&executor).await.unwrap();

    let report = downgrade(&executor).await.unwrap();

    assert_eq!(report.constraints_dropped, 14);
    assert_eq!(constraint_count(&pool).await, 0);
    assert!(!index_exists(&pool, CREATED_AT_INDEX.name).await);
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users_to_favorites")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 1);
    insert(&pool, 9, "u", "r", "again").await.unwrap();
    drop_fixture_schema(&schema).await;
}

#[tokio::test]
#[ignore]
async fn pg_rows_with_null_keys_are_not_duplicates() {
    let (executor, schema) = create_fixture_schema().await;
    let pool = executor.pool().clone();
    insert_nullable(&pool, 7, None, Some("x"), "n1").await.unwrap();
    insert_nullable(&pool, 7, None, Some("x"), "n2").await.unwrap();

    let report = upgrade(&executor).await.unwrap();

    assert_eq!(report.duplicates_removed[7].rows_removed, 0);
    assert_eq!(row_count(&pool, 7).await, 2);
    insert_nullable(&pool, 7, None, Some("x"), "n3").await.unwrap();
    assert_eq!(row_count(&pool, 7).await, 3);
    drop_fixture_schema(&schema).await;
}

#[tokio::test]
#[ignore]
async fn pg_second_upgrade_fails_and_keeps_constraints() {
    let (executor, schema) = create_fixture_schema().await;
    let pool = executor.pool().clone();

    upgrade(&executor).await.unwrap();
    let err = upgrade(&executor).await.unwrap_err();

    assert!(matches!(err, StorageError::Database(_)), "unexpected error: {err}");
    assert!(err.to_string().contains("already exists"), "unexpected error: {err}");
    assert_eq!(constraint_count(&pool).await, 14);
    assert!(index_exists(&pool, CREATED_AT_INDEX.name).await);
    drop_fixture_schema(&schema).await;
}
