//! Tolerant field codecs for persisted records.
//!
//! # Invariants
//! - Reading a scalar field never fails: `null` or a value of the wrong
//!   type becomes the field's default, numeric strings are parsed.
//! - Whole numbers are written as JSON integers; non-finite numbers are
//!   written as `null`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// Largest magnitude an f64 holds without losing integer precision.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Text field: numbers and booleans are kept as their text form.
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    })
}

/// Any serde type, falling back to `T::default()` when the value does not fit.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

pub mod number {
    use super::MAX_EXACT_INTEGER;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if !value.is_finite() {
            return serializer.serialize_none();
        }
        if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
            return serializer.serialize_i64(*value as i64);
        }
        serializer.serialize_f64(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let parsed = match Value::deserialize(deserializer)? {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().replace(',', ".").parse::<f64>().ok(),
            _ => None,
        };
        Ok(parsed.filter(|value| value.is_finite()).unwrap_or_default())
    }
}

pub mod decimal {
    use rust_decimal::prelude::FromPrimitive;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let parsed = match Value::deserialize(deserializer)? {
            Value::Number(number) => Decimal::from_str(&number.to_string())
                .ok()
                .or_else(|| number.as_f64().and_then(Decimal::from_f64)),
            Value::String(text) => Decimal::from_str(&text.trim().replace(',', ".")).ok(),
            _ => None,
        };
        Ok(parsed.unwrap_or_default())
    }
}
