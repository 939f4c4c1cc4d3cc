use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_decimal::Decimal;

/// A generated column value, ready to bind into an insert.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Stable rendering used for uniqueness-set membership.
    pub fn key(&self) -> String {
        match self {
            Value::Null => "<null>".to_string(),
            Value::Bool(value) => value.to_string(),
            Value::Int(value) => value.to_string(),
            Value::Float(value) => value.to_string(),
            Value::Decimal(value) => value.to_string(),
            Value::Text(value) => value.clone(),
            Value::Date(value) => value.format("%Y-%m-%d").to_string(),
            Value::Time(value) => value.format("%H:%M:%S").to_string(),
            Value::DateTime(value) => value.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }

    /// Distinguish a value from its base draw while keeping the column's
    /// type: text gains a `-{n}` suffix, numeric and temporal values shift
    /// by `n` units.
    pub(crate) fn with_suffix(&self, n: i64) -> Value {
        match self {
            Value::Text(value) => Value::Text(format!("{value}-{n}")),
            Value::Int(value) => Value::Int(value.wrapping_add(n)),
            Value::Float(value) => Value::Float(value + n as f64),
            Value::Decimal(value) => Value::Decimal(value + Decimal::from(n)),
            Value::Date(value) => Value::Date(*value + Duration::days(n)),
            Value::Time(value) => {
                let seconds = i64::from(value.num_seconds_from_midnight());
                let shifted = (seconds + n).rem_euclid(86_400) as u32;
                Value::Time(
                    NaiveTime::from_num_seconds_from_midnight_opt(shifted, 0)
                        .unwrap_or(*value),
                )
            }
            Value::DateTime(value) => Value::DateTime(*value + Duration::seconds(n)),
            Value::Bool(value) => Value::Int(i64::from(*value).wrapping_add(n)),
            Value::Null => Value::Int(n),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            other => write!(f, "{}", other.key()),
        }
    }
}
