//! Expense record and timestamp helpers

use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named fields of an expense beyond `id` and `date`
pub type Fields = Map<String, Value>;

/// A single recorded expense
///
/// The record is open: besides the well-known fields (`description`,
/// `amount`, `category`, `user_id`) any field submitted by a client is kept
/// and echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    #[serde(flatten)]
    pub fields: Fields,
    /// ISO-8601 timestamp, millisecond precision, UTC
    pub date: String,
}

impl Expense {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn description(&self) -> Option<&str> {
        self.field("description").and_then(Value::as_str)
    }

    /// Numeric amount; `None` when an update stored something that is not a number
    pub fn amount(&self) -> Option<f64> {
        self.field("amount").and_then(Value::as_f64)
    }

    pub fn category(&self) -> Option<&str> {
        self.field("category").and_then(Value::as_str)
    }

    pub fn user_id(&self) -> Option<&Value> {
        self.field("user_id")
    }

    /// Parsed `date`
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp_str(&self.date)
    }
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Format a timestamp the way every stored `date` is written
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Interpret a JSON value as a point in time
///
/// Strings may be RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as
/// UTC) or a plain `YYYY-MM-DD` date (UTC midnight). Numbers are
/// milliseconds since the Unix epoch.
pub fn parse_timestamp(value: &Value) -> CoreResult<DateTime<Utc>> {
    let parsed = match value {
        Value::String(s) => parse_timestamp_str(s),
        Value::Number(n) => n
            .as_f64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis as i64).single()),
        _ => None,
    };

    parsed.ok_or_else(|| CoreError::internal("Invalid time value"))
}

fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Pick the supplied date when it is truthy, otherwise the fallback, and
/// normalize the result.
pub(crate) fn resolve_date<F>(supplied: Option<&Value>, fallback: F) -> CoreResult<String>
where
    F: FnOnce() -> CoreResult<DateTime<Utc>>,
{
    let timestamp = match supplied {
        Some(value) if is_truthy(value) => parse_timestamp(value)?,
        _ => fallback()?,
    };
    Ok(format_timestamp(&timestamp))
}
