// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tolerant field decoders for persisted snapshots
//!
//! Form inputs were historically stored as raw strings: numbers arrive as
//! `"35"`, unset selects as `""`, bus numbers sometimes as bare integers.
//! These helpers accept those shapes so one odd field does not cost the
//! whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Optional typed value. `null` and `""` decode as `None`; numeric strings
/// are re-read as numbers; unrecognized values are dropped with a warning.
pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decode(value))
}

fn unrecognized(value: &dyn std::fmt::Display, error: &serde_json::Error) {
    tracing::warn!(%value, %error, "dropping unrecognized field value");
}

fn decode<T: DeserializeOwned>(value: Value) -> Option<T> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => serde_json::from_value(Value::String(s.clone()))
            .or_else(|_| serde_json::from_str(s.trim()))
            .map_err(|e| unrecognized(&s, &e))
            .ok(),
        other => serde_json::from_value(other.clone())
            .map_err(|e| unrecognized(&other, &e))
            .ok(),
    }
}

/// Optional free text. Numbers and booleans are kept as their text form.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Required free text; `null` becomes the empty string.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_text(deserializer)?.unwrap_or_default())
}

/// Non-negative count; anything unusable becomes zero.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(option::<D, u32>(deserializer)?.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "option")]
        pax: Option<u32>,
        #[serde(default, deserialize_with = "opt_text")]
        bus_no: Option<String>,
        #[serde(default, deserialize_with = "count")]
        total: u32,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn numeric_strings_become_numbers() {
        assert_eq!(probe(r#"{"pax": "35"}"#).pax, Some(35));
        assert_eq!(probe(r#"{"pax": 35}"#).pax, Some(35));
    }

    #[test]
    fn blanks_and_junk_become_none() {
        assert_eq!(probe(r#"{"pax": ""}"#).pax, None);
        assert_eq!(probe(r#"{"pax": "many"}"#).pax, None);
        assert_eq!(probe(r#"{"pax": -4}"#).pax, None);
        assert_eq!(probe(r#"{}"#).pax, None);
    }

    #[test]
    fn numbers_are_kept_as_text() {
        assert_eq!(probe(r#"{"bus_no": 101}"#).bus_no.as_deref(), Some("101"));
        assert_eq!(probe(r#"{"bus_no": ""}"#).bus_no.as_deref(), Some(""));
    }

    #[test]
    fn counts_default_to_zero() {
        assert_eq!(probe(r#"{"total": null}"#).total, 0);
        assert_eq!(probe(r#"{"total": "12"}"#).total, 12);
    }
}
