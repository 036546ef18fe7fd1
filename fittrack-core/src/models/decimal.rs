//! Serde helpers for decimal fields.
//!
//! The backend serializes `DecimalField`s as strings (`"20.00"`) while the
//! client sends plain JSON numbers. These helpers accept either form.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    fn into_f64<E: serde::de::Error>(self) -> Result<Option<f64>, E> {
        match self {
            NumberOrString::Number(n) => Ok(Some(n)),
            NumberOrString::String(s) if s.trim().is_empty() => Ok(None),
            NumberOrString::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| E::custom(format!("invalid decimal '{}'", s))),
        }
    }
}

/// Deserializes a decimal, treating `null` and `""` as zero.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<NumberOrString> = Option::deserialize(deserializer)?;
    match value {
        Some(v) => Ok(v.into_f64()?.unwrap_or(0.0)),
        None => Ok(0.0),
    }
}

/// Deserializes an optional decimal, treating `""` as absent.
pub fn optional<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<NumberOrString> = Option::deserialize(deserializer)?;
    match value {
        Some(v) => v.into_f64(),
        None => Ok(None),
    }
}
