//! MySQL catalog introspection.
//!
//! Read-only queries against `information_schema`; no shared mutable state,
//! safe to call for different tables from the same connection in sequence.

pub mod mysql;

pub use mysql::{column_data_type, describe_table, list_schemas, list_tables, schema_exists};
