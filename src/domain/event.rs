//! Event domain model.
//!
//! This module defines [`EventRecord`], the single entity managed by the plugin,
//! and [`EventDraft`], the body sent when creating a new event. Dates are held as
//! `DateTime<Utc>` and always travel over the wire as ISO-8601 timestamps with
//! millisecond precision (`2024-05-01T00:00:00.000Z`).

use crate::domain::error::{EventboardError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Datetime layouts accepted from the form, tried in order after RFC 3339.
const NAIVE_DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Date-only layout accepted from the form (interpreted as midnight UTC).
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Opaque event identifier assigned by the remote API.
///
/// The API may send ids as JSON numbers or strings; both are accepted and kept
/// in their textual form, which is what the delete URL needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(String);

impl EventId {
    /// Wraps an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Integer(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Integer(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// An event as listed by the remote API.
///
/// Decoding never rejects a record for its field values, so one odd entry
/// cannot hide the rest of the list. Unknown fields are ignored; text fields
/// that are missing or `null` become empty strings, and a date that is not
/// RFC 3339 is kept verbatim as [`EventDate::Unparsed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub date: EventDate,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
}

impl EventRecord {
    /// Formats the event date for the list view, e.g. `2024-05-01 18:30 UTC`.
    ///
    /// Unparsed dates are shown as the API sent them.
    #[must_use]
    pub fn display_date(&self) -> String {
        match &self.date {
            EventDate::At(date) => date.format("%Y-%m-%d %H:%M UTC").to_string(),
            EventDate::Unparsed(raw) if raw.is_empty() => "(no date)".to_string(),
            EventDate::Unparsed(raw) => raw.clone(),
        }
    }
}

/// Date of a listed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDate {
    At(DateTime<Utc>),
    /// Missing, `null`, or not an RFC 3339 timestamp. Holds the raw text
    /// (empty when there was none).
    Unparsed(String),
}

impl Default for EventDate {
    fn default() -> Self {
        Self::Unparsed(String::new())
    }
}

impl From<DateTime<Utc>> for EventDate {
    fn from(date: DateTime<Utc>) -> Self {
        Self::At(date)
    }
}

impl Serialize for EventDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::At(date) => iso_millis::serialize(date, serializer),
            Self::Unparsed(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for EventDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Null => return Ok(Self::default()),
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        };

        Ok(DateTime::parse_from_rfc3339(&raw)
            .map_or(Self::Unparsed(raw), |date| Self::At(date.with_timezone(&Utc))))
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The body of a create request: an event that has not been assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDraft {
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "iso_millis::serialize")]
    pub date: DateTime<Utc>,
    pub location: String,
}

impl EventDraft {
    /// Builds a draft from raw form input, normalizing the date.
    ///
    /// # Errors
    ///
    /// Returns [`EventboardError::InvalidDate`] if `date_input` matches none of
    /// the accepted layouts (see [`normalize_date`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use eventboard::domain::EventDraft;
    ///
    /// let draft = EventDraft::from_input("Talk", "D", "2024-05-01", "Hall A")?;
    /// let json = serde_json::to_value(&draft).unwrap();
    /// assert_eq!(json["date"], "2024-05-01T00:00:00.000Z");
    /// # Ok::<(), eventboard::EventboardError>(())
    /// ```
    pub fn from_input(
        name: impl Into<String>,
        description: impl Into<String>,
        date_input: &str,
        location: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            description: description.into(),
            date: normalize_date(date_input)?,
            location: location.into(),
        })
    }
}

/// Parses a user-entered date into a UTC timestamp.
///
/// Accepted inputs:
/// - RFC 3339 with an offset (`2024-05-01T10:00:00+02:00`), converted to UTC
/// - a local datetime without offset (`2024-05-01T10:00`, `2024-05-01 10:00:00`),
///   read as UTC since the plugin sandbox has no local timezone
/// - a bare date (`2024-05-01`), read as midnight UTC
///
/// # Errors
///
/// Returns [`EventboardError::InvalidDate`] carrying the trimmed input when no
/// layout matches.
pub fn normalize_date(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(input) {
        return Ok(with_offset.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| EventboardError::InvalidDate(input.to_string()))
}

/// Formats a timestamp the way the API stores it.
#[must_use]
pub fn to_iso_millis(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter writing ISO-8601 timestamps with millisecond precision.
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_iso_millis(date))
    }
}
