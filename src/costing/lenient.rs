//! Fail-soft numeric coercion for form input.
//!
//! Registration forms send partial input as a matter of course: empty
//! strings, `null`, `"abc"`, negative numbers. None of that is an error here.
//! Anything that is not a usable number becomes zero.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

/// Coerce a JSON value to a non-negative head count.
///
/// Fractions truncate; negative, non-finite and non-numeric values become 0.
pub fn count_from_value(value: &Value) -> u32 {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() && n > 0.0 => n.trunc().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// Coerce a JSON value to a money amount. Non-numeric values become 0.
pub fn amount_from_value(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64))
            .unwrap_or(Decimal::ZERO),
        Value::String(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .unwrap_or(Decimal::ZERO)
        }
        _ => Decimal::ZERO,
    }
}

/// Coerce a JSON value to a percentage in `0..=100`.
pub fn percentage_from_value(value: &Value) -> Decimal {
    amount_from_value(value).clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value))
}

pub fn amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(amount_from_value(&value))
}

pub fn percentage<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(percentage_from_value(&value))
}

/// Map of catalog id to count. Entries with unparsable ids are dropped.
pub fn count_map<'de, D>(deserializer: D) -> Result<HashMap<Uuid, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(entries) = value else {
        return Ok(HashMap::new());
    };

    Ok(entries
        .iter()
        .filter_map(|(key, value)| {
            Uuid::parse_str(key)
                .ok()
                .map(|id| (id, count_from_value(value)))
        })
        .collect())
}
