//! Stored attribute values and the wire date format.
//!
//! An instance stores each populated field as a [`FieldValue`]: either a
//! JSON scalar taken as-is, or a parsed calendar value for date attributes.
//! Dates travel on the wire as `YYYY-MM-DDTHH:MM:SSZ`.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// The wire format of date attributes (`2011-12-12T12:00:00Z`).
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A value held by a resource field.
///
/// # Example
///
/// ```rust
/// use rest_resource::rest::FieldValue;
/// use serde_json::json;
///
/// let amount = FieldValue::from(10);
/// assert_eq!(amount.as_scalar(), Some(&json!(10)));
///
/// let when = FieldValue::DateTime(rest_resource::rest::parse_date("2011-12-12T12:00:00Z").unwrap());
/// assert_eq!(when.to_json_value(), json!("2011-12-12T12:00:00Z"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A raw JSON value (plain attributes and reference ids).
    Scalar(Value),
    /// A parsed calendar value (date attributes).
    DateTime(DateTime<Utc>),
}

impl FieldValue {
    /// Returns the raw JSON value, if this is not a calendar value.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::DateTime(_) => None,
        }
    }

    /// Returns the calendar value, if this is one.
    #[must_use]
    pub const fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::DateTime(value) => Some(value),
            Self::Scalar(_) => None,
        }
    }

    /// Returns `true` for JSON `null`, which assignment treats as absent.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Value::Null))
    }

    /// Converts to the JSON wire representation.
    ///
    /// Calendar values are rendered with [`DATE_FORMAT`].
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::DateTime(value) => Value::String(format_date(value)),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(value) => value.serialize(serializer),
            Self::DateTime(value) => serializer.serialize_str(&format_date(value)),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Scalar(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Scalar(Value::from(value))
    }
}

/// Parses a wire date, accepting only `YYYY-MM-DDTHH:MM:SSZ`.
///
/// # Errors
///
/// Returns the chrono parse error for any other shape, including
/// fractional seconds and numeric offsets.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let naive = NaiveDateTime::parse_from_str(input, DATE_FORMAT)?;
    Ok(Utc.from_utc_datetime(&naive))
}

/// Renders a calendar value in the wire format.
#[must_use]
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format(DATE_FORMAT).to_string()
}

/// Describes the JSON type of a value for error messages.
pub(crate) const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_parse_date_accepts_wire_format() {
        let parsed = parse_date("2011-12-12T12:00:00Z").unwrap();
        assert_eq!(parsed.year(), 2011);
        assert_eq!(parsed.month(), 12);
        assert_eq!(parsed.day(), 12);
        assert_eq!(parsed.hour(), 12);
        assert_eq!(parsed.second(), 0);
    }

    #[test]
    fn test_parse_date_round_trips_through_format() {
        let input = "2011-12-12T12:00:00Z";
        assert_eq!(format_date(&parse_date(input).unwrap()), input);
    }

    #[test]
    fn test_parse_date_is_strict() {
        assert!(parse_date("2011-12-12").is_err());
        assert!(parse_date("2011-12-12T12:00:00").is_err());
        assert!(parse_date("2011-12-12T12:00:00+00:00").is_err());
        assert!(parse_date("2011-12-12T12:00Z").is_err());
        assert!(parse_date("not a date").is_err());
    }

    #[test]
    fn test_field_value_serializes_dates_in_wire_format() {
        let value = FieldValue::DateTime(parse_date("2020-01-02T03:04:05Z").unwrap());
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!("2020-01-02T03:04:05Z")
        );
        assert_eq!(value.to_json_value(), json!("2020-01-02T03:04:05Z"));
    }

    #[test]
    fn test_field_value_conversions() {
        assert_eq!(FieldValue::from(15), FieldValue::Scalar(json!(15)));
        assert_eq!(FieldValue::from("x"), FieldValue::Scalar(json!("x")));
        assert!(FieldValue::from(Value::Null).is_null());
        assert!(FieldValue::from(123_u64).as_datetime().is_none());
    }

    #[test]
    fn test_json_type_name_describes_each_kind() {
        assert_eq!(json_type_name(&Value::Null), "null");
        assert_eq!(json_type_name(&json!(true)), "a boolean");
        assert_eq!(json_type_name(&json!(1.5)), "a number");
        assert_eq!(json_type_name(&json!([1])), "an array");
        assert_eq!(json_type_name(&json!({})), "an object");
    }
}
