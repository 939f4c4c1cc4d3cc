//! End-to-end seeding tests against a live MySQL server.
//!
//! Skipped unless `TEST_DATABASE_URL` (or `DATABASE_URL`) points at a
//! MySQL instance the tests may create a `rowforge_it` schema in.

use anyhow::{Context, Result};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySqlPool, Row};

use rowforge_seed::{RunOptions, Seeder};

const FIXTURE: &str = "tests/fixtures/sql/mysql/001_schema.sql";
const SCHEMA: &str = "rowforge_it";

fn database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
}

async fn connect(url: &str) -> Result<MySqlPool> {
    MySqlPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_secs(10))
        .connect(url)
        .await
        .context("connecting to MySQL")
}

async fn reset_fixture(pool: &MySqlPool) -> Result<()> {
    let script = std::fs::read_to_string(FIXTURE).context("reading fixture")?;
    for statement in script.split(';') {
        let sql = statement.trim();
        if sql.is_empty() {
            continue;
        }
        sqlx::query(sql)
            .execute(pool)
            .await
            .with_context(|| format!("executing fixture statement: {sql}"))?;
    }
    Ok(())
}

async fn count(pool: &MySqlPool, table: &str) -> Result<i64> {
    let row = sqlx::query(&format!("SELECT COUNT(*) AS n FROM `{SCHEMA}`.`{table}`"))
        .fetch_one(pool)
        .await?;
    Ok(row.try_get("n")?)
}

fn options(rows: u32, table: Option<&str>, truncate: bool) -> RunOptions {
    RunOptions {
        schema: SCHEMA.to_string(),
        table: table.map(str::to_string),
        rows,
        truncate,
        dry_run: false,
    }
}

#[tokio::test]
async fn seeds_schema_in_dependency_order_with_valid_references() -> Result<()> {
    let Some(url) = database_url() else {
        eprintln!("skipping: set TEST_DATABASE_URL to run MySQL integration tests");
        return Ok(());
    };
    let pool = connect(&url).await?;
    reset_fixture(&pool).await?;

    let mut conn = pool.acquire().await?;
    let mut seeder = Seeder::new(42);
    let report = seeder.run(&mut *conn, &options(50, None, false)).await?;
    drop(conn);

    // Parents planned before children.
    let position = |name: &str| {
        report
            .tables_in_order
            .iter()
            .position(|table| table == name)
            .expect(name)
    };
    assert!(position("users") < position("orders"));
    assert!(position("products") < position("order_items"));
    assert!(position("orders") < position("order_items"));

    assert!(!report.has_failures(), "report: {report:?}");
    for table in &report.tables {
        assert_eq!(table.inserted, 50, "table {} fell short", table.table);
    }

    // Every child reference resolves.
    let orphans: i64 = sqlx::query(&format!(
        "SELECT COUNT(*) AS n FROM `{SCHEMA}`.`order_items` oi \
         LEFT JOIN `{SCHEMA}`.`orders` o ON o.id = oi.order_id \
         WHERE o.id IS NULL"
    ))
    .fetch_one(&pool)
    .await?
    .try_get("n")?;
    assert_eq!(orphans, 0);

    // Enum column only ever holds declared options.
    let bad_status: i64 = sqlx::query(&format!(
        "SELECT COUNT(*) AS n FROM `{SCHEMA}`.`orders` \
         WHERE status NOT IN ('open','paid','shipped','cancelled')"
    ))
    .fetch_one(&pool)
    .await?
    .try_get("n")?;
    assert_eq!(bad_status, 0);

    Ok(())
}

#[tokio::test]
async fn truncate_then_seed_produces_exact_parent_counts() -> Result<()> {
    let Some(url) = database_url() else {
        eprintln!("skipping: set TEST_DATABASE_URL to run MySQL integration tests");
        return Ok(());
    };
    let pool = connect(&url).await?;
    reset_fixture(&pool).await?;

    let mut conn = pool.acquire().await?;
    let mut seeder = Seeder::new(42);
    seeder.run(&mut *conn, &options(10, None, true)).await?;

    // Second pass narrows to the child tables with fresh row targets.
    seeder
        .run(&mut *conn, &options(10, Some("orders"), true))
        .await?;
    let report = seeder
        .run(&mut *conn, &options(30, Some("order_items"), true))
        .await?;
    drop(conn);

    assert!(!report.has_failures());
    assert_eq!(count(&pool, "orders").await?, 10);
    let items = count(&pool, "order_items").await?;
    assert!(items <= 30);

    let orphans: i64 = sqlx::query(&format!(
        "SELECT COUNT(*) AS n FROM `{SCHEMA}`.`order_items` oi \
         LEFT JOIN `{SCHEMA}`.`orders` o ON o.id = oi.order_id \
         WHERE o.id IS NULL"
    ))
    .fetch_one(&pool)
    .await?
    .try_get("n")?;
    assert_eq!(orphans, 0);

    Ok(())
}

#[tokio::test]
async fn empty_parent_tables_yield_zero_child_rows() -> Result<()> {
    let Some(url) = database_url() else {
        eprintln!("skipping: set TEST_DATABASE_URL to run MySQL integration tests");
        return Ok(());
    };
    let pool = connect(&url).await?;
    reset_fixture(&pool).await?;

    let mut conn = pool.acquire().await?;
    let mut seeder = Seeder::new(42);
    let report = seeder
        .run(&mut *conn, &options(30, Some("order_items"), false))
        .await?;
    drop(conn);

    assert!(!report.has_failures());
    let table = &report.tables[0];
    assert_eq!(table.inserted, 0);
    assert_eq!(table.skipped, 30);
    assert_eq!(count(&pool, "order_items").await?, 0);

    Ok(())
}

#[tokio::test]
async fn reseeding_without_truncate_never_trips_unique_constraints() -> Result<()> {
    let Some(url) = database_url() else {
        eprintln!("skipping: set TEST_DATABASE_URL to run MySQL integration tests");
        return Ok(());
    };
    let pool = connect(&url).await?;
    reset_fixture(&pool).await?;

    let mut conn = pool.acquire().await?;
    // Same seed both times: the second run redraws the same stream and must
    // exhaust into suffixed values instead of violating UNIQUE(email).
    let mut first = Seeder::new(42);
    first
        .run(&mut *conn, &options(25, Some("users"), false))
        .await?;
    let mut second = Seeder::new(42);
    let report = second
        .run(&mut *conn, &options(25, Some("users"), false))
        .await?;
    drop(conn);

    assert!(!report.has_failures(), "report: {report:?}");
    assert_eq!(count(&pool, "users").await?, 50);

    Ok(())
}

#[tokio::test]
async fn dry_run_plans_without_inserting() -> Result<()> {
    let Some(url) = database_url() else {
        eprintln!("skipping: set TEST_DATABASE_URL to run MySQL integration tests");
        return Ok(());
    };
    let pool = connect(&url).await?;
    reset_fixture(&pool).await?;

    let mut conn = pool.acquire().await?;
    let mut seeder = Seeder::new(42);
    let mut opts = options(100, None, false);
    opts.dry_run = true;
    let report = seeder.run(&mut *conn, &opts).await?;
    drop(conn);

    assert_eq!(report.tables_in_order.len(), 4);
    assert!(report.tables.is_empty());
    for table in ["users", "products", "orders", "order_items"] {
        assert_eq!(count(&pool, table).await?, 0);
    }

    Ok(())
}

#[tokio::test]
async fn missing_schema_is_a_fatal_catalog_error() -> Result<()> {
    let Some(url) = database_url() else {
        eprintln!("skipping: set TEST_DATABASE_URL to run MySQL integration tests");
        return Ok(());
    };
    let pool = connect(&url).await?;

    let mut conn = pool.acquire().await?;
    let mut seeder = Seeder::new(42);
    let mut opts = options(10, None, false);
    opts.schema = "rowforge_does_not_exist".to_string();
    let result = seeder.run(&mut *conn, &opts).await;

    assert!(result.is_err());
    Ok(())
}
