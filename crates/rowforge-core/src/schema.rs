//! In-memory model of introspected tables.

use serde::{Deserialize, Serialize};

/// Role a column plays in the table's keys, as reported by the catalog's
/// `COLUMN_KEY` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyRole {
    None,
    Primary,
    Unique,
}

/// Column metadata for a base table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub ordinal_position: u32,
    pub name: String,
    /// Catalog `DATA_TYPE`, e.g. `varchar`, `int`, `enum`.
    pub data_type: String,
    /// Full `COLUMN_TYPE`, e.g. `enum('a','b')` or `decimal(10,2)`.
    pub column_type: String,
    pub is_nullable: bool,
    pub key: KeyRole,
    /// Value assigned by the store itself (auto-increment or generated
    /// expression); must never be supplied in an insert.
    pub auto_generated: bool,
}

impl ColumnDescriptor {
    /// Literal values permitted by an `enum(...)` declaration, in declared
    /// order, or `None` for non-enumerated columns.
    pub fn enum_options(&self) -> Option<Vec<String>> {
        parse_enum_options(&self.column_type)
    }
}

/// A declared reference from a column to a column of another table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignKeyEdge {
    pub column: String,
    pub referenced_schema: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

/// Structural description of one table, built fresh from the live catalog
/// on every use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub schema: String,
    pub name: String,
    /// Ordered by catalog ordinal position.
    pub columns: Vec<ColumnDescriptor>,
    /// Primary-key column names, in key order.
    pub primary_key: Vec<String>,
    pub foreign_keys: Vec<ForeignKeyEdge>,
}

impl TableDescriptor {
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// FK edge owned by the named column, if any.
    pub fn foreign_key(&self, column: &str) -> Option<&ForeignKeyEdge> {
        self.foreign_keys.iter().find(|fk| fk.column == column)
    }
}

/// Parse a MySQL `enum('a','b',...)` declaration into its option list.
///
/// Tolerates surrounding whitespace and either quote style. Returns `None`
/// when the declaration is not an enum.
pub fn parse_enum_options(column_type: &str) -> Option<Vec<String>> {
    let trimmed = column_type.trim_start();
    if !trimmed.to_lowercase().starts_with("enum(") {
        return None;
    }
    let open = trimmed.find('(')?;
    let close = trimmed.rfind(')')?;
    if close <= open {
        return None;
    }
    let inside = &trimmed[open + 1..close];
    let options = inside
        .split(',')
        .map(|raw| raw.trim().trim_matches('\'').trim_matches('"').to_string())
        .collect();
    Some(options)
}
