//! Tolerant deserializers for backend fields whose JSON type drifts between
//! endpoints (numeric columns sent as strings, codes sent as numbers).
//!
//! Use with `#[serde(default, deserialize_with = "...")]`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts a number, a numeric string, an empty string or null.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("not a number: {}", s)))
        }
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected number or string, got {}",
            other
        ))),
    }
}

/// Accepts a string or a number; blank strings and null become `None`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

/// Required string that may arrive as a JSON number (numeric ids).
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

/// Row counts; SQL drivers often send bigint aggregates as strings.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| serde::de::Error::custom(format!("invalid count: {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid count: {}", s))),
        Value::Null => Ok(0),
        other => Err(serde::de::Error::custom(format!("invalid count: {}", other))),
    }
}

/// Accepts `YYYY-MM-DD` or an ISO timestamp whose date part comes first.
pub fn naive_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date_prefix(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
}

/// Parses the leading `YYYY-MM-DD` of a date or timestamp string.
pub fn parse_date_prefix(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_f64")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "opt_string")]
        code: Option<String>,
    }

    #[test]
    fn test_numbers_from_strings() {
        let p: Probe = serde_json::from_str(r#"{"price":"199.50","code":42}"#).unwrap();
        assert_eq!(p.price, Some(199.5));
        assert_eq!(p.code.as_deref(), Some("42"));
    }

    #[test]
    fn test_blank_and_missing() {
        let p: Probe = serde_json::from_str(r#"{"price":"","code":"  "}"#).unwrap();
        assert_eq!(p.price, None);
        assert_eq!(p.code, None);

        let p: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(p.price, None);
        assert_eq!(p.code, None);
    }

    #[derive(Deserialize)]
    struct Counted {
        #[serde(deserialize_with = "string")]
        id: String,
        #[serde(deserialize_with = "count")]
        total: u64,
    }

    #[test]
    fn test_counts_and_ids() {
        let c: Counted = serde_json::from_str(r#"{"id":1715,"total":"42"}"#).unwrap();
        assert_eq!(c.id, "1715");
        assert_eq!(c.total, 42);

        let c: Counted = serde_json::from_str(r#"{"id":"B-7","total":3}"#).unwrap();
        assert_eq!(c.id, "B-7");
        assert_eq!(c.total, 3);

        let r: Result<Counted, _> = serde_json::from_str(r#"{"id":"B","total":"-1"}"#);
        assert!(r.is_err());
    }

    #[test]
    fn test_date_prefix() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(parse_date_prefix("2024-03-15"), expected);
        assert_eq!(parse_date_prefix("2024-03-15T00:00:00.000Z"), expected);
        assert_eq!(parse_date_prefix("2024-03-15 10:00:00"), expected);
        assert_eq!(parse_date_prefix("15.03.2024"), None);
    }

    #[test]
    fn test_garbage_number_is_rejected() {
        let r: Result<Probe, _> = serde_json::from_str(r#"{"price":"abc"}"#);
        assert!(r.is_err());
    }
}
