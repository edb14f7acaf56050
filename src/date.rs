//! Date header parsing and message-date resolution

use crate::error::{DecodeError, Result};
use crate::headers::HeaderStore;
use crate::warning::{WarningTag, Warnings};
use chrono::{DateTime, SubsecRound, Utc};
use serde::Serializer;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse an RFC 2822 date into UTC, discarding sub-second precision.
///
/// Obsolete forms chrono rejects (two-digit years, missing weekday comma,
/// trailing comments) are retried with mailparse's lenient parser.
pub fn parse_date(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Ok(dt.with_timezone(&Utc).trunc_subsecs(0));
    }

    mailparse::dateparse(value)
        .ok()
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
        .ok_or_else(|| DecodeError::InvalidDate(value.to_string()))
}

/// The date portion of a Received header: everything after the last `;`
#[must_use]
pub fn received_date_part(value: &str) -> Option<&str> {
    value
        .rsplit_once(';')
        .map(|(_, date)| date.trim())
        .filter(|date| !date.is_empty())
}

/// Work out the date the message claims for itself.
///
/// Uses the typed Date header when it parsed, otherwise the date trailing
/// the first Received header.
pub fn resolve_message_date(
    headers: &HeaderStore,
    raw_headers: &HeaderStore,
    warnings: &mut Warnings,
) -> Option<DateTime<Utc>> {
    if let Some(date) = headers.values("Date").find_map(|v| v.as_date()) {
        return Some(date);
    }

    let received = raw_headers.first_text("Received")?;
    let Some(part) = received_date_part(received) else {
        warnings.header(WarningTag::InvalidDateHeader, "Received", received);
        return None;
    };

    match parse_date(part) {
        Ok(date) => Some(date),
        Err(_) => {
            warnings.header(WarningTag::InvalidDateHeader, "Received", part);
            None
        }
    }
}

/// Render a timestamp as ISO 8601 with a space separator
#[must_use]
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

pub(crate) fn serialize_timestamp<S: Serializer>(
    dt: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(dt))
}

#[allow(clippy::ref_option)]
pub(crate) fn serialize_optional_timestamp<S: Serializer>(
    dt: &Option<DateTime<Utc>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match dt {
        Some(dt) => serializer.serialize_some(&format_timestamp(dt)),
        None => serializer.serialize_none(),
    }
}
