//! `YYYY-MM-DD` date handling for JSON bodies and query strings.
//!
//! Use with `#[serde(with = "crate::date_format")]`, or
//! `#[serde(default, with = "crate::date_format::option")]` for optional dates.

use serde::{Deserialize, Deserializer, Serializer};
use time::{
    Date, OffsetDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

use crate::{Error, period::is_supported_year};

/// The format dates are written in, e.g. "2025-04-17".
pub const ISO_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

/// Parse a calendar date from `text`.
///
/// Accepts either a plain date ("2025-04-17") or an RFC 3339 date-time
/// ("2025-04-17T09:30:00.000Z"), in which case the calendar date in the
/// date-time's own offset is used.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` is in neither format, has a signed
/// year, or its year is outside [crate::period::MIN_YEAR] to
/// [crate::period::MAX_YEAR].
pub fn parse_date(text: &str) -> Result<Date, Error> {
    let text = text.trim();
    let invalid = || Error::InvalidDate(text.to_owned());

    if text.starts_with(['+', '-']) {
        return Err(invalid());
    }

    let date = Date::parse(text, ISO_DATE_FORMAT)
        .or_else(|_| OffsetDateTime::parse(text, &Rfc3339).map(|date_time| date_time.date()))
        .map_err(|_| invalid())?;

    if is_supported_year(date.year()) {
        Ok(date)
    } else {
        Err(invalid())
    }
}

/// Format `date` as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    date.format(ISO_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Serialize `date` as a `YYYY-MM-DD` string.
pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_date(*date))
}

/// Deserialize a date written in any format accepted by [parse_date].
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
    let text = String::deserialize(deserializer)?;

    parse_date(&text).map_err(serde::de::Error::custom)
}

/// The same formats for `Option<Date>`, where an empty string counts as no date.
pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    /// Serialize `date` as a `YYYY-MM-DD` string, or `null`.
    pub fn serialize<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => super::serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional date, treating a blank string as `None`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Date>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => super::parse_date(&text)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
