//! Core contracts shared across Rowforge crates.
//!
//! Defines the canonical table/column model produced by introspection, the
//! shared error type, and the dependency planner that orders tables so that
//! foreign-key parents are seeded before their children.

pub mod error;
pub mod plan;
pub mod schema;

pub use error::{Error, Result};
pub use plan::dependency_order;
pub use schema::{ColumnDescriptor, ForeignKeyEdge, KeyRole, TableDescriptor, parse_enum_options};
