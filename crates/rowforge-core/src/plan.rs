//! Dependency-ordered seeding plan over the foreign-key graph.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::schema::TableDescriptor;

/// Order tables so that every foreign-key parent precedes the tables that
/// reference it.
///
/// Kahn traversal over the FK edges restricted to same-schema references
/// between the given tables. Ties among equally-ready tables break by input
/// order, so the output is deterministic for a fixed input. Tables that the
/// traversal cannot place (members of a reference cycle) are appended at
/// the end in input order: the result is always a permutation of the input,
/// but seeding a genuinely cyclic schema is best-effort only.
///
/// Self-references (a table pointing at its own primary key) are ignored
/// when building the graph; they cannot be ordered away and would otherwise
/// shunt the table into the cycle fallback.
pub fn dependency_order(schema: &str, tables: &[TableDescriptor]) -> Vec<String> {
    let requested: BTreeSet<&str> = tables.iter().map(|table| table.name.as_str()).collect();

    let mut children: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    let mut indegree: BTreeMap<&str, usize> = tables
        .iter()
        .map(|table| (table.name.as_str(), 0))
        .collect();

    for table in tables {
        for fk in &table.foreign_keys {
            if fk.referenced_schema != schema {
                continue;
            }
            if fk.referenced_table == table.name {
                continue;
            }
            let parent = fk.referenced_table.as_str();
            if !requested.contains(parent) {
                continue;
            }
            let entry = children.entry(parent).or_default();
            if !entry.contains(&table.name.as_str()) {
                entry.push(table.name.as_str());
                if let Some(count) = indegree.get_mut(table.name.as_str()) {
                    *count += 1;
                }
            }
        }
    }

    let mut ready: VecDeque<&str> = tables
        .iter()
        .map(|table| table.name.as_str())
        .filter(|name| indegree.get(name) == Some(&0))
        .collect();

    let mut order: Vec<String> = Vec::with_capacity(tables.len());
    let mut placed: BTreeSet<&str> = BTreeSet::new();

    while let Some(node) = ready.pop_front() {
        order.push(node.to_string());
        placed.insert(node);

        if let Some(kids) = children.get(node) {
            for child in kids {
                if let Some(count) = indegree.get_mut(child) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        ready.push_back(child);
                    }
                }
            }
        }
    }

    // Cycle members fall back to input order.
    for table in tables {
        if !placed.contains(table.name.as_str()) {
            order.push(table.name.clone());
        }
    }

    order
}
