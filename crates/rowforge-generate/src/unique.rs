//! Uniqueness enforcement for constrained columns.

use std::collections::{HashMap, HashSet};

use crate::value::Value;

/// Values already issued during this run, keyed by `(table, column)`.
///
/// Owned by the [`ValueGenerator`](crate::ValueGenerator) — one registry per
/// seeding invocation, never ambient state. Must be [`reset`](Self::reset)
/// after a destructive truncation, because the store no longer holds the
/// values the registry assumed existed.
#[derive(Debug, Default)]
pub struct UniquenessRegistry {
    seen: HashMap<(String, String), HashSet<String>>,
}

impl UniquenessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.seen.clear();
    }

    /// Record values that already exist in the store so fresh draws cannot
    /// collide with them.
    pub fn preload<I>(&mut self, table: &str, column: &str, keys: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.set_for(table, column).extend(keys);
    }

    /// Number of values issued so far for one key. Test hook.
    pub fn issued(&self, table: &str, column: &str) -> usize {
        self.seen
            .get(&(table.to_string(), column.to_string()))
            .map_or(0, HashSet::len)
    }

    fn set_for(&mut self, table: &str, column: &str) -> &mut HashSet<String> {
        self.seen
            .entry((table.to_string(), column.to_string()))
            .or_default()
    }
}

/// Bounded-retry-then-suffix strategy: draw from the underlying
/// distribution up to `max_attempts` times, then force uniqueness by
/// suffixing one fresh base draw with an incrementing counter.
///
/// The suffix loop terminates by construction — the registry is finite and
/// the counter strictly increases — so the strategy is infallible.
#[derive(Debug, Clone, Copy)]
pub struct UniqueStrategy {
    pub max_attempts: u32,
}

impl Default for UniqueStrategy {
    fn default() -> Self {
        Self { max_attempts: 20 }
    }
}

impl UniqueStrategy {
    /// Produce a value never issued before for `(table, column)` and record
    /// it before returning.
    pub fn draw(
        &self,
        registry: &mut UniquenessRegistry,
        table: &str,
        column: &str,
        mut draw: impl FnMut() -> Value,
    ) -> Value {
        let seen = registry.set_for(table, column);

        for _ in 0..self.max_attempts {
            let candidate = draw();
            if seen.insert(candidate.key()) {
                return candidate;
            }
        }

        let base = draw();
        let mut suffix: i64 = 1;
        loop {
            let candidate = base.with_suffix(suffix);
            if seen.insert(candidate.key()) {
                return candidate;
            }
            suffix += 1;
        }
    }
}
