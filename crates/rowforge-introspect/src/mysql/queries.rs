use sqlx::{MySqlConnection, Row};

use rowforge_core::{Error, Result};

/// Schemas owned by the server itself, never offered for seeding.
const SYSTEM_SCHEMAS: &[&str] = &["information_schema", "mysql", "performance_schema", "sys"];

fn db_err(err: sqlx::Error) -> Error {
    Error::Db(err.to_string())
}

pub async fn list_schemas(conn: &mut MySqlConnection) -> Result<Vec<String>> {
    let rows = sqlx::query(
        "SELECT SCHEMA_NAME AS schema_name \
         FROM information_schema.SCHEMATA \
         ORDER BY SCHEMA_NAME",
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(db_err)?;

    let mut names = Vec::with_capacity(rows.len());
    for row in rows {
        let name: String = row.try_get("schema_name").map_err(db_err)?;
        if !SYSTEM_SCHEMAS.contains(&name.as_str()) {
            names.push(name);
        }
    }
    Ok(names)
}

pub async fn schema_exists(conn: &mut MySqlConnection, schema: &str) -> Result<bool> {
    let row = sqlx::query(
        "SELECT 1 FROM information_schema.SCHEMATA WHERE SCHEMA_NAME = ?",
    )
    .bind(schema)
    .fetch_optional(&mut *conn)
    .await
    .map_err(db_err)?;

    Ok(row.is_some())
}

pub async fn list_tables(conn: &mut MySqlConnection, schema: &str) -> Result<Vec<String>> {
    let rows = sqlx::query(
        "SELECT TABLE_NAME AS table_name \
         FROM information_schema.TABLES \
         WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE' \
         ORDER BY TABLE_NAME",
    )
    .bind(schema)
    .fetch_all(&mut *conn)
    .await
    .map_err(db_err)?;

    rows.into_iter()
        .map(|row| row.try_get::<String, _>("table_name").map_err(db_err))
        .collect()
}

pub struct RawColumn {
    pub ordinal_position: u64,
    pub name: String,
    pub data_type: String,
    pub column_type: String,
    pub is_nullable: String,
    pub column_key: String,
    pub extra: String,
}

pub async fn list_columns(
    conn: &mut MySqlConnection,
    schema: &str,
    table: &str,
) -> Result<Vec<RawColumn>> {
    let rows = sqlx::query(
        "SELECT ORDINAL_POSITION AS ordinal_position, \
                COLUMN_NAME AS column_name, \
                DATA_TYPE AS data_type, \
                COLUMN_TYPE AS column_type, \
                IS_NULLABLE AS is_nullable, \
                COLUMN_KEY AS column_key, \
                EXTRA AS extra \
         FROM information_schema.COLUMNS \
         WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? \
         ORDER BY ORDINAL_POSITION",
    )
    .bind(schema)
    .bind(table)
    .fetch_all(&mut *conn)
    .await
    .map_err(db_err)?;

    let mut columns = Vec::with_capacity(rows.len());
    for row in rows {
        columns.push(RawColumn {
            ordinal_position: row.try_get("ordinal_position").map_err(db_err)?,
            name: row.try_get("column_name").map_err(db_err)?,
            data_type: row.try_get("data_type").map_err(db_err)?,
            column_type: row.try_get("column_type").map_err(db_err)?,
            is_nullable: row.try_get("is_nullable").map_err(db_err)?,
            column_key: row.try_get("column_key").map_err(db_err)?,
            extra: row.try_get("extra").map_err(db_err)?,
        });
    }
    Ok(columns)
}

pub async fn primary_key_columns(
    conn: &mut MySqlConnection,
    schema: &str,
    table: &str,
) -> Result<Vec<String>> {
    let rows = sqlx::query(
        "SELECT COLUMN_NAME AS column_name \
         FROM information_schema.KEY_COLUMN_USAGE \
         WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? AND CONSTRAINT_NAME = 'PRIMARY' \
         ORDER BY ORDINAL_POSITION",
    )
    .bind(schema)
    .bind(table)
    .fetch_all(&mut *conn)
    .await
    .map_err(db_err)?;

    rows.into_iter()
        .map(|row| row.try_get::<String, _>("column_name").map_err(db_err))
        .collect()
}

pub struct RawForeignKey {
    pub column: String,
    pub referenced_schema: Option<String>,
    pub referenced_table: String,
    pub referenced_column: String,
}

pub async fn list_foreign_keys(
    conn: &mut MySqlConnection,
    schema: &str,
    table: &str,
) -> Result<Vec<RawForeignKey>> {
    let rows = sqlx::query(
        "SELECT COLUMN_NAME AS column_name, \
                REFERENCED_TABLE_SCHEMA AS referenced_schema, \
                REFERENCED_TABLE_NAME AS referenced_table, \
                REFERENCED_COLUMN_NAME AS referenced_column \
         FROM information_schema.KEY_COLUMN_USAGE \
         WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? \
           AND REFERENCED_TABLE_NAME IS NOT NULL \
         ORDER BY CONSTRAINT_NAME, ORDINAL_POSITION",
    )
    .bind(schema)
    .bind(table)
    .fetch_all(&mut *conn)
    .await
    .map_err(db_err)?;

    let mut edges = Vec::with_capacity(rows.len());
    for row in rows {
        edges.push(RawForeignKey {
            column: row.try_get("column_name").map_err(db_err)?,
            referenced_schema: row.try_get("referenced_schema").map_err(db_err)?,
            referenced_table: row.try_get("referenced_table").map_err(db_err)?,
            referenced_column: row.try_get("referenced_column").map_err(db_err)?,
        });
    }
    Ok(edges)
}

pub async fn column_data_type(
    conn: &mut MySqlConnection,
    schema: &str,
    table: &str,
    column: &str,
) -> Result<Option<String>> {
    let row = sqlx::query(
        "SELECT DATA_TYPE AS data_type \
         FROM information_schema.COLUMNS \
         WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? AND COLUMN_NAME = ?",
    )
    .bind(schema)
    .bind(table)
    .bind(column)
    .fetch_optional(&mut *conn)
    .await
    .map_err(db_err)?;

    match row {
        Some(row) => Ok(Some(row.try_get("data_type").map_err(db_err)?)),
        None => Ok(None),
    }
}
