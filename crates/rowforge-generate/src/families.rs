//! Declared-type fallback generation.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Words};
use rand::Rng;
use rand::distr::Alphanumeric;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

use crate::value::Value;

/// Generate by declared-type prefix when no semantic role matched.
///
/// The checks are ordered so that longer type names win over their prefixes
/// (`datetime` before `date`, `timestamp` before `time`).
pub fn for_type(rng: &mut ChaCha8Rng, now: NaiveDateTime, data_type: &str) -> Value {
    let declared = data_type.trim().to_lowercase();

    if declared.starts_with("varchar") {
        return short_text(rng, 20);
    }
    if declared.starts_with("char") {
        let len = rng.random_range(1..=8);
        let value: String = (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect();
        return Value::Text(value);
    }
    if declared.ends_with("text") {
        let value: String = Paragraph(3..4).fake_with_rng(rng);
        return Value::Text(value);
    }
    if declared.starts_with("tinyint") {
        // tinyint caps at 127; keep strict-mode MySQL happy.
        return Value::Int(rng.random_range(0..=100));
    }
    if declared.starts_with("smallint")
        || declared.starts_with("mediumint")
        || declared.starts_with("integer")
        || declared.starts_with("int")
    {
        return Value::Int(rng.random_range(0..=10_000));
    }
    if declared.starts_with("bigint") {
        return Value::Int(rng.random_range(0..=1_000_000_000));
    }
    if declared.starts_with("decimal") || declared.starts_with("numeric") {
        // Drawn in scaled units so the scale is exact; rounding a float
        // here would drift off representable values.
        return Value::Decimal(Decimal::new(rng.random_range(0..=1_000_000), 2));
    }
    if declared.starts_with("float") || declared.starts_with("double") || declared.starts_with("real") {
        return Value::Float(rng.random_range(0.0..1000.0));
    }
    if declared.starts_with("datetime") || declared.starts_with("timestamp") {
        return Value::DateTime(datetime_between(rng, now - Duration::days(3 * 365), now));
    }
    if declared.starts_with("date") {
        return Value::Date(date_between(
            rng,
            now.date() - Duration::days(3 * 365),
            now.date() + Duration::days(30),
        ));
    }
    if declared.starts_with("time") {
        let seconds = rng.random_range(0..86_400);
        return Value::Time(
            NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
                .unwrap_or(NaiveTime::MIN),
        );
    }
    if declared.starts_with("year") {
        return Value::Int(rng.random_range(1990..=2030));
    }
    if declared.starts_with("bool") {
        return Value::Int(rng.random_range(0..=1));
    }

    short_text(rng, 16)
}

/// Uniform instant in `[start, end)`; degenerate windows collapse to
/// `start`.
pub(crate) fn datetime_between(
    rng: &mut ChaCha8Rng,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> NaiveDateTime {
    let span = (end - start).num_seconds();
    if span <= 0 {
        return start;
    }
    start + Duration::seconds(rng.random_range(0..span))
}

pub(crate) fn date_between(rng: &mut ChaCha8Rng, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days();
    if span <= 0 {
        return start;
    }
    start + Duration::days(rng.random_range(0..span))
}

fn short_text(rng: &mut ChaCha8Rng, max_chars: usize) -> Value {
    let words: Vec<String> = Words(2..5).fake_with_rng(rng);
    let mut text = words.join(" ");
    text.truncate(max_chars);
    Value::Text(text.trim_end().to_string())
}
