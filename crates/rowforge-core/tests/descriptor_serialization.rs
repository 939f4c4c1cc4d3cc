use rowforge_core::{ColumnDescriptor, ForeignKeyEdge, KeyRole, TableDescriptor};

fn sample() -> TableDescriptor {
    TableDescriptor {
        schema: "shop".to_string(),
        name: "users".to_string(),
        columns: vec![
            ColumnDescriptor {
                ordinal_position: 1,
                name: "id".to_string(),
                data_type: "int".to_string(),
                column_type: "int".to_string(),
                is_nullable: false,
                key: KeyRole::Primary,
                auto_generated: true,
            },
            ColumnDescriptor {
                ordinal_position: 2,
                name: "email".to_string(),
                data_type: "varchar".to_string(),
                column_type: "varchar(255)".to_string(),
                is_nullable: false,
                key: KeyRole::Unique,
                auto_generated: false,
            },
        ],
        primary_key: vec!["id".to_string()],
        foreign_keys: vec![ForeignKeyEdge {
            column: "org_id".to_string(),
            referenced_schema: "shop".to_string(),
            referenced_table: "orgs".to_string(),
            referenced_column: "id".to_string(),
        }],
    }
}

#[test]
fn descriptor_round_trips_through_json() {
    let descriptor = sample();
    let json = serde_json::to_string(&descriptor).expect("serialize");
    let back: TableDescriptor = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(back.name, "users");
    assert_eq!(back.columns.len(), 2);
    assert_eq!(back.columns[1].key, KeyRole::Unique);
    assert_eq!(back.foreign_keys[0].referenced_table, "orgs");
}

#[test]
fn key_roles_serialize_snake_case() {
    let json = serde_json::to_string(&KeyRole::Primary).expect("serialize");
    assert_eq!(json, r#""primary""#);
}
