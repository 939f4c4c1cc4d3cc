//! Foreign-key value sampling from existing parent rows.

use std::collections::HashMap;

use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlConnection, Row};

use rowforge_core::Error;
use rowforge_generate::Value;

use crate::error::Result;

/// Upper bound on cached parent values per referenced column.
pub const FK_SAMPLE_LIMIT: u32 = 1000;

/// Cached sampler over existing values of referenced parent columns.
///
/// One instance per seeding invocation, keyed by
/// `(referenced_schema, referenced_table, referenced_column)`. Loaded
/// lazily on first use with a deterministic query ordering; must be
/// [`reset`](Self::reset) after truncation.
pub struct FkSampler {
    rng: ChaCha8Rng,
    cache: HashMap<(String, String, String), Vec<Value>>,
}

impl FkSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            cache: HashMap::new(),
        }
    }

    /// Drop all cached parent values.
    pub fn reset(&mut self) {
        self.cache.clear();
    }

    /// A value drawn uniformly from the parent column's existing rows, or
    /// `None` when the parent table has no rows — the caller must then skip
    /// the dependent row rather than fabricate a reference.
    pub async fn sample(
        &mut self,
        conn: &mut MySqlConnection,
        schema: &str,
        table: &str,
        column: &str,
    ) -> Result<Option<Value>> {
        let key = (schema.to_string(), table.to_string(), column.to_string());
        if !self.cache.contains_key(&key) {
            let values = load_sample(conn, schema, table, column).await?;
            self.cache.insert(key.clone(), values);
        }

        let values = self.cache.get(&key).map(Vec::as_slice).unwrap_or(&[]);
        Ok(values.choose(&mut self.rng).cloned())
    }
}

async fn load_sample(
    conn: &mut MySqlConnection,
    schema: &str,
    table: &str,
    column: &str,
) -> Result<Vec<Value>> {
    let data_type = rowforge_introspect::column_data_type(conn, schema, table, column)
        .await?
        .ok_or_else(|| {
            Error::Catalog(format!(
                "referenced column `{schema}`.`{table}`.`{column}` not found in catalog"
            ))
        })?;

    let sql = format!(
        "SELECT `{column}` FROM `{schema}`.`{table}` \
         WHERE `{column}` IS NOT NULL \
         ORDER BY `{column}` LIMIT {FK_SAMPLE_LIMIT}"
    );
    let rows = sqlx::query(&sql).fetch_all(&mut *conn).await?;

    rows.iter().map(|row| decode_value(row, &data_type)).collect()
}

/// Decode the single selected column by its catalog type family.
pub(crate) fn decode_value(row: &MySqlRow, data_type: &str) -> Result<Value> {
    let declared = data_type.to_lowercase();

    let value = if declared.starts_with("tinyint")
        || declared.starts_with("smallint")
        || declared.starts_with("mediumint")
        || declared.starts_with("bigint")
        || declared.starts_with("int")
        || declared.starts_with("year")
    {
        Value::Int(row.try_get::<i64, _>(0)?)
    } else if declared.starts_with("decimal") || declared.starts_with("numeric") {
        Value::Decimal(row.try_get(0)?)
    } else if declared.starts_with("float") || declared.starts_with("double") || declared.starts_with("real") {
        Value::Float(row.try_get(0)?)
    } else if declared.starts_with("datetime") || declared.starts_with("timestamp") {
        Value::DateTime(row.try_get(0)?)
    } else if declared.starts_with("date") {
        Value::Date(row.try_get(0)?)
    } else if declared.starts_with("time") {
        Value::Time(row.try_get(0)?)
    } else {
        Value::Text(row.try_get(0)?)
    };

    Ok(value)
}
