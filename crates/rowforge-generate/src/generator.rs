//! The seeded value-generation engine.

use chrono::{NaiveDateTime, Utc};
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;

use crate::families;
use crate::roles;
use crate::unique::{UniqueStrategy, UniquenessRegistry};
use crate::value::Value;

/// Deterministic generator for one seeding invocation.
///
/// Owns the RNG, the run's reference instant (captured once, so temporal
/// windows agree across draws) and the uniqueness registry. Equal seeds
/// reproduce equal value streams.
pub struct ValueGenerator {
    rng: ChaCha8Rng,
    now: NaiveDateTime,
    strategy: UniqueStrategy,
    uniques: UniquenessRegistry,
}

impl ValueGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_now(seed, Utc::now().naive_utc())
    }

    /// Pin the reference instant; temporal windows derive from it.
    pub fn with_now(seed: u64, now: NaiveDateTime) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            now,
            strategy: UniqueStrategy::default(),
            uniques: UniquenessRegistry::new(),
        }
    }

    /// Forget all issued unique values. Required after truncation.
    pub fn reset_uniques(&mut self) {
        self.uniques.reset();
    }

    /// Record values that already exist in the store for a unique column,
    /// so re-runs without truncation cannot re-issue them.
    pub fn preload_unique<I>(&mut self, table: &str, column: &str, keys: I)
    where
        I: IntoIterator<Item = String>,
    {
        // Same normalization as `value_for`, so the keys line up.
        self.uniques.preload(table, &column.to_lowercase(), keys);
    }

    /// Generate a value for a column: semantic role first, then declared
    /// type, then generic text. With `unique`, the draw is wrapped in the
    /// bounded-retry-then-suffix strategy keyed by `(table, column)`.
    pub fn value_for(&mut self, table: &str, column: &str, data_type: &str, unique: bool) -> Value {
        let name = column.to_lowercase();
        let Self { rng, now, strategy, uniques } = self;

        let mut draw = || match roles::role_for(&name) {
            Some(role) => (role.generate)(rng, *now),
            None => families::for_type(rng, *now, data_type),
        };

        if unique {
            strategy.draw(uniques, table, &name, draw)
        } else {
            draw()
        }
    }

    /// Uniform choice over an enumerated column's declared options;
    /// bypasses the dispatch pipeline entirely.
    pub fn choose_enum(&mut self, options: &[String]) -> Value {
        match options.choose(&mut self.rng) {
            Some(option) => Value::Text(option.clone()),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn enum_choices_come_from_the_options() {
        let mut generator = ValueGenerator::with_now(42, fixed_now());
        let options = vec!["red".to_string(), "green".to_string(), "blue".to_string()];
        for _ in 0..50 {
            match generator.choose_enum(&options) {
                Value::Text(choice) => assert!(options.contains(&choice)),
                other => panic!("expected text, got {other:?}"),
            }
        }
    }

    #[test]
    fn equal_seeds_reproduce_equal_streams() {
        let mut a = ValueGenerator::with_now(7, fixed_now());
        let mut b = ValueGenerator::with_now(7, fixed_now());
        for _ in 0..20 {
            assert_eq!(
                a.value_for("users", "email", "varchar", false),
                b.value_for("users", "email", "varchar", false)
            );
        }
    }
}
