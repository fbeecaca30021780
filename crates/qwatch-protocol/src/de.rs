//! Lenient field decoders.
//!
//! The backend keeps queries in a CSV-backed store, so the same field can
//! arrive as a JSON bool, a number or a string depending on whether the
//! query was loaded from disk or created in this server process.

use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

/// Strings the backend treats as true. Anything else is false.
const TRUTHY: [&str; 4] = ["true", "yes", "1", "on"];

pub(crate) fn truthy(raw: &str) -> bool {
    let raw = raw.trim();
    TRUTHY.iter().any(|t| raw.eq_ignore_ascii_case(t))
}

pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Null => Ok(false),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|n| n != 0.0)),
        Value::String(s) => Ok(truthy(&s)),
        other => Err(de::Error::custom(format!("expected a boolean, got {other}"))),
    }
}

pub(crate) fn int_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Integer that may be absent, empty, a string or a float.
pub(crate) fn opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::String(ref s) if s.trim().is_empty() => Ok(None),
        ref v => int_from_value(v)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected an integer, got {v}"))),
    }
}

/// Free text that may be null or a bare number.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Query identifiers are monotonic millisecond integers on the server side
/// but are keyed by string in the dashboard mapping.
pub(crate) fn uid<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(match n.as_f64() {
            Some(f) if n.as_i64().is_none() && n.as_u64().is_none() && f.fract() == 0.0 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        }),
        other => Err(de::Error::custom(format!("expected a query uid, got {other}"))),
    }
}
