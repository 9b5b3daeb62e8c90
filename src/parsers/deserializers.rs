use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::{Content, ContentUnit, InternalMessageType, RecordType};

/// Deserialize any value, keeping it only when it has the expected shape
///
/// Log records are decoded best-effort: a field of the wrong type is treated as absent
/// instead of failing the whole line.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_bool().unwrap_or(false))
}

/// Timestamp that accepts both integers (ms) and RFC3339 strings; anything else is absent
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_timestamp(&value))
}

pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        // Unix timestamp in milliseconds
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::String(s) => s.parse::<DateTime<Utc>>().ok(),
        _ => None,
    }
}

pub fn deserialize_record_type<'de, D>(deserializer: D) -> Result<RecordType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => RecordType::from(s),
        _ => RecordType::Unknown,
    })
}

pub fn deserialize_internal_type<'de, D>(
    deserializer: D,
) -> Result<Option<InternalMessageType>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(InternalMessageType::from(s)),
        _ => None,
    })
}

/// Decode the content union: a bare string or a list of typed units
///
/// Each unit is decoded independently so one malformed unit becomes
/// [`ContentUnit::Unknown`] instead of discarding its siblings.
pub fn deserialize_content<'de, D>(deserializer: D) -> Result<Option<Content>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decode_content(value))
}

pub fn decode_content(value: Value) -> Option<Content> {
    match value {
        Value::String(s) => Some(Content::Text(s)),
        Value::Array(items) => Some(Content::Units(
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or(ContentUnit::Unknown))
                .collect(),
        )),
        _ => None,
    }
}
