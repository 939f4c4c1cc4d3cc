use sqlx::MySqlConnection;

use rowforge_core::{Error, Result, TableDescriptor};

mod mapper;
mod queries;

/// Schema (database) names, excluding the server's own system schemas.
pub async fn list_schemas(conn: &mut MySqlConnection) -> Result<Vec<String>> {
    queries::list_schemas(conn).await
}

/// Whether the named schema exists on the server.
pub async fn schema_exists(conn: &mut MySqlConnection, schema: &str) -> Result<bool> {
    queries::schema_exists(conn, schema).await
}

/// Base-table names in a schema, ordered by name. Views are excluded.
pub async fn list_tables(conn: &mut MySqlConnection, schema: &str) -> Result<Vec<String>> {
    queries::list_tables(conn, schema).await
}

/// Structural description of one table: columns in ordinal order, primary
/// key, and foreign-key edges.
///
/// Fails with a catalog error when the table does not exist (the catalog
/// yields no columns for it).
pub async fn describe_table(
    conn: &mut MySqlConnection,
    schema: &str,
    table: &str,
) -> Result<TableDescriptor> {
    let raw_columns = queries::list_columns(conn, schema, table).await?;
    if raw_columns.is_empty() {
        return Err(Error::Catalog(format!(
            "table `{schema}`.`{table}` does not exist or has no readable columns"
        )));
    }

    let columns = mapper::map_columns(raw_columns);
    let primary_key = queries::primary_key_columns(conn, schema, table).await?;
    let foreign_keys = mapper::map_foreign_keys(queries::list_foreign_keys(conn, schema, table).await?);

    Ok(TableDescriptor {
        schema: schema.to_string(),
        name: table.to_string(),
        columns,
        primary_key,
        foreign_keys,
    })
}

/// Catalog `DATA_TYPE` of a single column, or `None` when the column is not
/// in the catalog. Used by the foreign-key sampler to decode parent values.
pub async fn column_data_type(
    conn: &mut MySqlConnection,
    schema: &str,
    table: &str,
    column: &str,
) -> Result<Option<String>> {
    queries::column_data_type(conn, schema, table, column).await
}
