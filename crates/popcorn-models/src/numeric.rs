//! Lenient numeric parsing for catalog strings and persisted watched entries.
//!
//! The catalog reports missing values as the literal string `"N/A"`, and
//! watched lists written by older clients may hold `null` or strings where a
//! number is expected. Everything here maps those to `None` instead of failing.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The catalog's marker for a missing value
pub fn is_not_available(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a")
}

/// Parse the leading integer of a runtime string such as `"148 min"`
pub fn parse_runtime_minutes(raw: &str) -> Option<u32> {
    if is_not_available(raw) {
        return None;
    }
    raw.split_whitespace().next()?.parse::<u32>().ok()
}

/// Parse a rating such as `"8.5"`; NaN and infinities count as missing
pub fn parse_rating(raw: &str) -> Option<f64> {
    if is_not_available(raw) {
        return None;
    }
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

pub(crate) fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .or_else(|| number.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u32)),
        Some(Value::String(text)) => parse_runtime_minutes(&text),
        _ => None,
    })
}

pub(crate) fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_f64().filter(|f| f.is_finite()),
        Some(Value::String(text)) => parse_rating(&text),
        _ => None,
    })
}

pub(crate) fn lenient_user_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let rating = match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => text.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if !rating.is_finite() {
        return Ok(0);
    }
    Ok(rating.round().clamp(0.0, 10.0) as u8)
}
