//! Seeding orchestration: per-table classification, row assembly, inserts.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::mysql::MySqlArguments;
use sqlx::query::Query;
use sqlx::{MySql, MySqlConnection};
use tracing::{info, warn};
use uuid::Uuid;

use rowforge_core::{ForeignKeyEdge, KeyRole, TableDescriptor, dependency_order};
use rowforge_generate::{Value, ValueGenerator};
use rowforge_introspect::{describe_table, list_tables, schema_exists};

use crate::error::{Result, SeedError};
use crate::sampler::{FkSampler, decode_value};

/// Options for one seeding run; mirrors the CLI surface.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub schema: String,
    /// Restrict to one table; otherwise every base table in the schema.
    pub table: Option<String>,
    /// Target row count per table.
    pub rows: u32,
    /// Truncate each table (in dependency order) before seeding.
    pub truncate: bool,
    /// Plan only; no mutation.
    pub dry_run: bool,
}

/// Outcome for one table.
#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    pub schema: String,
    pub table: String,
    pub requested: u32,
    pub inserted: u64,
    /// Rows abandoned because a referenced parent table had no rows.
    pub skipped: u64,
    /// Set when the store rejected an insert; the table was abandoned.
    pub error: Option<String>,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub schema: String,
    /// Planned order, parents before children.
    pub tables_in_order: Vec<String>,
    pub dry_run: bool,
    pub tables: Vec<TableReport>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        self.tables.iter().any(|table| table.error.is_some())
    }
}

/// Drives a seeding invocation: owns the value generator and the FK
/// sampler, both scoped to this run.
pub struct Seeder {
    generator: ValueGenerator,
    sampler: FkSampler,
}

impl Seeder {
    pub fn new(seed: u64) -> Self {
        Self {
            generator: ValueGenerator::new(seed),
            sampler: FkSampler::new(seed),
        }
    }

    /// Full run per the command contract: resolve tables, plan, optionally
    /// truncate, seed in dependency order.
    ///
    /// Catalog failures abort before any mutation. A rejected insert fails
    /// its table (recorded in the report) without stopping the run.
    pub async fn run(&mut self, conn: &mut MySqlConnection, options: &RunOptions) -> Result<RunReport> {
        let run_id = Uuid::new_v4();

        if !schema_exists(conn, &options.schema).await? {
            return Err(rowforge_core::Error::Catalog(format!(
                "schema `{}` does not exist",
                options.schema
            ))
            .into());
        }

        let names = match &options.table {
            Some(table) => vec![table.clone()],
            None => list_tables(conn, &options.schema).await?,
        };

        let mut descriptors = Vec::with_capacity(names.len());
        for name in &names {
            descriptors.push(describe_table(conn, &options.schema, name).await?);
        }
        let order = dependency_order(&options.schema, &descriptors);

        info!(
            run_id = %run_id,
            schema = %options.schema,
            tables = order.len(),
            rows = options.rows,
            dry_run = options.dry_run,
            "seeding plan ready"
        );

        let mut report = RunReport {
            schema: options.schema.clone(),
            tables_in_order: order.clone(),
            dry_run: options.dry_run,
            tables: Vec::new(),
        };

        if options.dry_run {
            return Ok(report);
        }

        if options.truncate {
            for table in &order {
                truncate_table(conn, &options.schema, table).await?;
            }
            // The store no longer holds the values these caches assumed.
            self.generator.reset_uniques();
            self.sampler.reset();
        }

        for name in &order {
            match self.seed_table(conn, &options.schema, name, options.rows).await {
                Ok(table_report) => report.tables.push(table_report),
                Err(SeedError::Insert { schema, table, inserted, source }) => {
                    warn!(
                        schema = %schema,
                        table = %table,
                        inserted,
                        error = %source,
                        "table abandoned after rejected insert"
                    );
                    report.tables.push(TableReport {
                        schema,
                        table,
                        requested: options.rows,
                        inserted,
                        skipped: 0,
                        error: Some(source.to_string()),
                    });
                }
                Err(other) => return Err(other),
            }
        }

        Ok(report)
    }

    /// Seed one table: describe it fresh, classify columns, assemble and
    /// insert up to `rows` rows one by one.
    pub async fn seed_table(
        &mut self,
        conn: &mut MySqlConnection,
        schema: &str,
        table: &str,
        rows: u32,
    ) -> Result<TableReport> {
        let descriptor = describe_table(conn, schema, table).await?;
        let plan = ColumnPlan::build(&descriptor);

        self.preload_uniques(conn, &descriptor, &plan).await?;

        let statement = insert_statement(schema, table, &plan.insert_columns);
        let mut inserted = 0_u64;
        let mut skipped = 0_u64;

        for _ in 0..rows {
            let Some(values) = self.assemble_row(conn, &descriptor, &plan).await? else {
                skipped += 1;
                continue;
            };

            let mut query = sqlx::query(&statement);
            for value in &values {
                query = bind_value(query, value);
            }
            query
                .execute(&mut *conn)
                .await
                .map_err(|source| SeedError::Insert {
                    schema: schema.to_string(),
                    table: table.to_string(),
                    inserted,
                    source,
                })?;
            inserted += 1;
        }

        if skipped > 0 {
            warn!(
                schema = %schema,
                table = %table,
                skipped,
                "rows skipped: a referenced parent table has no rows"
            );
        }
        info!(schema = %schema, table = %table, inserted, "table seeded");

        Ok(TableReport {
            schema: schema.to_string(),
            table: table.to_string(),
            requested: rows,
            inserted,
            skipped,
            error: None,
        })
    }

    /// One candidate row in catalog column order, or `None` when any FK
    /// column finds no parent rows.
    async fn assemble_row(
        &mut self,
        conn: &mut MySqlConnection,
        descriptor: &TableDescriptor,
        plan: &ColumnPlan,
    ) -> Result<Option<Vec<Value>>> {
        let mut values = Vec::with_capacity(plan.specs.len());

        for spec in &plan.specs {
            let value = match &spec.kind {
                ColumnKind::ForeignKey(edge) => {
                    let parent_schema = if edge.referenced_schema.is_empty() {
                        descriptor.schema.as_str()
                    } else {
                        edge.referenced_schema.as_str()
                    };
                    match self
                        .sampler
                        .sample(conn, parent_schema, &edge.referenced_table, &edge.referenced_column)
                        .await?
                    {
                        Some(value) => value,
                        None => return Ok(None),
                    }
                }
                ColumnKind::Enum(options) => self.generator.choose_enum(options),
                ColumnKind::Plain => self.generator.value_for(
                    &descriptor.name,
                    &spec.name,
                    &spec.data_type,
                    spec.unique,
                ),
            };
            values.push(value);
        }

        Ok(Some(values))
    }

    /// Feed existing values of uniqueness-constrained plain columns into
    /// the generator's registry, so a re-run without truncation exhausts
    /// into suffixed values instead of tripping the store's constraint.
    async fn preload_uniques(
        &mut self,
        conn: &mut MySqlConnection,
        descriptor: &TableDescriptor,
        plan: &ColumnPlan,
    ) -> Result<()> {
        for spec in &plan.specs {
            if !spec.unique || !matches!(spec.kind, ColumnKind::Plain) {
                continue;
            }
            let sql = format!(
                "SELECT `{column}` FROM `{schema}`.`{table}` WHERE `{column}` IS NOT NULL",
                column = spec.name,
                schema = descriptor.schema,
                table = descriptor.name,
            );
            let rows = sqlx::query(&sql).fetch_all(&mut *conn).await?;
            let keys = rows
                .iter()
                .map(|row| decode_value(row, &spec.data_type).map(|value| value.key()))
                .collect::<Result<Vec<_>>>()?;
            self.generator.preload_unique(&descriptor.name, &spec.name, keys);
        }
        Ok(())
    }
}

/// Empty a table with foreign-key checks suspended around the statement.
/// Destructive; callers must reset run caches afterwards (`Seeder::run`
/// does). Never retried.
pub async fn truncate_table(conn: &mut MySqlConnection, schema: &str, table: &str) -> Result<()> {
    sqlx::query("SET FOREIGN_KEY_CHECKS = 0")
        .execute(&mut *conn)
        .await?;
    let truncated = sqlx::query(&format!("TRUNCATE TABLE `{schema}`.`{table}`"))
        .execute(&mut *conn)
        .await;
    // Re-arm checks even when the truncate itself failed.
    sqlx::query("SET FOREIGN_KEY_CHECKS = 1")
        .execute(&mut *conn)
        .await?;
    truncated?;
    info!(schema = %schema, table = %table, "table truncated");
    Ok(())
}

/// How each insertable column gets its value.
enum ColumnKind {
    Plain,
    Enum(Vec<String>),
    ForeignKey(ForeignKeyEdge),
}

struct ColumnSpec {
    name: String,
    data_type: String,
    unique: bool,
    kind: ColumnKind,
}

/// Column classification for one table pass. Auto-generated columns are
/// dropped entirely; a foreign-key edge outranks an enum declaration on
/// the same column.
struct ColumnPlan {
    insert_columns: Vec<String>,
    specs: Vec<ColumnSpec>,
}

impl ColumnPlan {
    fn build(descriptor: &TableDescriptor) -> Self {
        let fk_map: HashMap<&str, &ForeignKeyEdge> = descriptor
            .foreign_keys
            .iter()
            .map(|fk| (fk.column.as_str(), fk))
            .collect();

        let mut specs = Vec::new();
        for column in &descriptor.columns {
            if column.auto_generated {
                continue;
            }
            let kind = if let Some(edge) = fk_map.get(column.name.as_str()) {
                ColumnKind::ForeignKey((*edge).clone())
            } else if let Some(options) = column.enum_options() {
                ColumnKind::Enum(options)
            } else {
                ColumnKind::Plain
            };
            specs.push(ColumnSpec {
                name: column.name.clone(),
                data_type: column.data_type.clone(),
                unique: column.key == KeyRole::Unique,
                kind,
            });
        }

        Self {
            insert_columns: specs.iter().map(|spec| spec.name.clone()).collect(),
            specs,
        }
    }
}

fn insert_statement(schema: &str, table: &str, columns: &[String]) -> String {
    if columns.is_empty() {
        // Every column is store-assigned; insert a defaults-only row.
        return format!("INSERT INTO `{schema}`.`{table}` () VALUES ()");
    }
    let column_list = columns
        .iter()
        .map(|column| format!("`{column}`"))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!("INSERT INTO `{schema}`.`{table}` ({column_list}) VALUES ({placeholders})")
}

fn bind_value<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    value: &Value,
) -> Query<'q, MySql, MySqlArguments> {
    match value {
        Value::Null => query.bind(Option::<String>::None),
        Value::Bool(v) => query.bind(*v),
        Value::Int(v) => query.bind(*v),
        Value::Float(v) => query.bind(*v),
        Value::Decimal(v) => query.bind(*v),
        Value::Text(v) => query.bind(v.clone()),
        Value::Date(v) => query.bind(*v),
        Value::Time(v) => query.bind(*v),
        Value::DateTime(v) => query.bind(*v),
    }
}
