use rowforge_core::{ColumnDescriptor, ForeignKeyEdge, KeyRole};

use super::queries::{RawColumn, RawForeignKey};

pub fn map_columns(raw: Vec<RawColumn>) -> Vec<ColumnDescriptor> {
    raw.into_iter()
        .map(|column| ColumnDescriptor {
            ordinal_position: column.ordinal_position as u32,
            name: column.name,
            data_type: column.data_type,
            column_type: column.column_type,
            is_nullable: column.is_nullable.eq_ignore_ascii_case("YES"),
            key: map_key_role(&column.column_key),
            auto_generated: is_auto_generated(&column.extra),
        })
        .collect()
}

pub fn map_foreign_keys(raw: Vec<RawForeignKey>) -> Vec<ForeignKeyEdge> {
    raw.into_iter()
        .map(|fk| ForeignKeyEdge {
            column: fk.column,
            referenced_schema: fk.referenced_schema.unwrap_or_default(),
            referenced_table: fk.referenced_table,
            referenced_column: fk.referenced_column,
        })
        .collect()
}

/// `COLUMN_KEY` is `PRI`, `UNI`, `MUL`, or empty. `MUL` marks a plain
/// index prefix and carries no constraint the seeder must honor.
fn map_key_role(column_key: &str) -> KeyRole {
    if column_key.eq_ignore_ascii_case("PRI") {
        KeyRole::Primary
    } else if column_key.eq_ignore_ascii_case("UNI") {
        KeyRole::Unique
    } else {
        KeyRole::None
    }
}

/// `EXTRA` flags columns the store fills in on its own: `auto_increment`
/// keys and `VIRTUAL GENERATED` / `STORED GENERATED` expressions.
///
/// `DEFAULT_GENERATED` is deliberately not matched: MySQL 8 attaches it to
/// any column with an expression default (`DEFAULT CURRENT_TIMESTAMP`
/// included), and those columns still accept explicit values.
fn is_auto_generated(extra: &str) -> bool {
    let extra = extra.to_lowercase();
    extra.contains("auto_increment")
        || extra.contains("virtual generated")
        || extra.contains("stored generated")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, column_key: &str, extra: &str) -> RawColumn {
        RawColumn {
            ordinal_position: 1,
            name: name.to_string(),
            data_type: "int".to_string(),
            column_type: "int".to_string(),
            is_nullable: "NO".to_string(),
            column_key: column_key.to_string(),
            extra: extra.to_string(),
        }
    }

    #[test]
    fn key_roles_map_from_column_key() {
        let columns = map_columns(vec![
            raw("id", "PRI", "auto_increment"),
            raw("email", "UNI", ""),
            raw("user_id", "MUL", ""),
            raw("note", "", ""),
        ]);

        assert_eq!(columns[0].key, KeyRole::Primary);
        assert!(columns[0].auto_generated);
        assert_eq!(columns[1].key, KeyRole::Unique);
        assert_eq!(columns[2].key, KeyRole::None);
        assert_eq!(columns[3].key, KeyRole::None);
    }

    #[test]
    fn generated_columns_are_flagged() {
        let columns = map_columns(vec![
            raw("total", "", "STORED GENERATED"),
            raw("slug", "", "VIRTUAL GENERATED"),
            raw("created_at", "", "DEFAULT_GENERATED"),
            raw("plain", "", ""),
        ]);

        assert!(columns[0].auto_generated);
        assert!(columns[1].auto_generated);
        // Expression defaults still accept explicit values; created_at must
        // keep flowing through the generator.
        assert!(!columns[2].auto_generated);
        assert!(!columns[3].auto_generated);
    }

    #[test]
    fn nullability_parses_yes_no() {
        let mut yes = raw("a", "", "");
        yes.is_nullable = "YES".to_string();
        let columns = map_columns(vec![yes, raw("b", "", "")]);
        assert!(columns[0].is_nullable);
        assert!(!columns[1].is_nullable);
    }

    #[test]
    fn missing_referenced_schema_maps_to_empty() {
        let edges = map_foreign_keys(vec![RawForeignKey {
            column: "user_id".to_string(),
            referenced_schema: None,
            referenced_table: "users".to_string(),
            referenced_column: "id".to_string(),
        }]);
        assert_eq!(edges[0].referenced_schema, "");
    }
}
