//! Value stringification used when rendering literals.
//!
//! Conversion never fails: absent, null, undefined, or unrepresentable values render as an empty
//! string and the caller gets whatever text the query ends up with.

use bson::Bson;
use chrono::{SecondsFormat, Utc};

/// Textual form of a value for embedding into a query string.
#[must_use]
pub fn to_text(value: &Bson) -> String {
    match value {
        Bson::Null | Bson::Undefined => String::new(),
        Bson::String(s) => s.clone(),
        Bson::Int32(i) => i.to_string(),
        Bson::Int64(i) => i.to_string(),
        Bson::Double(f) => f.to_string(),
        Bson::Decimal128(d) => d.to_string(),
        Bson::Boolean(b) => b.to_string(),
        Bson::DateTime(dt) => dt.try_to_rfc3339_string().unwrap_or_default(),
        Bson::ObjectId(oid) => oid.to_hex(),
        other => serde_json::to_string(&other.clone().into_relaxed_extjson()).unwrap_or_default(),
    }
}

/// Same as [`to_text`] for an optional value; `None` renders as `""`.
#[must_use]
pub fn to_text_opt(value: Option<&Bson>) -> String {
    value.map(to_text).unwrap_or_default()
}

/// `ISODate("YYYY-MM-DDTHH:MM:SS.mmmZ")` shell literal for a stored date.
#[must_use]
pub fn iso_date(at: &bson::DateTime) -> String {
    let text = chrono::DateTime::<Utc>::from_timestamp_millis(at.timestamp_millis()).map_or_else(
        || at.try_to_rfc3339_string().unwrap_or_default(),
        |dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true),
    );
    format!("ISODate({})", quoted(&text))
}

/// Double-quoted, JSON-escaped form of `text`.
#[must_use]
pub fn quoted(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| String::from("\"\""))
}
