//! Local wall-clock conversions for date-time form inputs
//!
//! Form inputs hold `YYYY-MM-DDTHH:mm` in the browser's local timezone and
//! that literal is what gets submitted: no offset is attached and nothing is
//! normalized to UTC.
//!
//! # Known limitation
//!
//! The server stores the wall-clock value as sent. When the server and the
//! browser disagree on timezone, displayed times drift by the difference.

use crate::errors::NormalizeError;
use chrono::{
    DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc,
};

/// Format of `datetime-local` inputs
pub const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Format of `date` inputs
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Offset-less layouts the server is known to send, most precise first
const NAIVE_LAYOUTS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", LOCAL_INPUT_FORMAT];

/// Format an instant as a local input value, zero-padded
pub fn to_local_input<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    to_input_in(instant, &Local)
}

/// Format an instant as an input value on the wall clock of `tz`
pub fn to_input_in<Tz: TimeZone, Z: TimeZone>(instant: &DateTime<Tz>, tz: &Z) -> String {
    instant
        .with_timezone(tz)
        .naive_local()
        .format(LOCAL_INPUT_FORMAT)
        .to_string()
}

/// Convert a server timestamp into a local input value
///
/// `None`, empty and unparseable inputs all yield `None`.
pub fn iso_to_local_input(iso: Option<&str>) -> Option<String> {
    iso_to_input_in(iso, &Local)
}

/// [`iso_to_local_input`] against an explicit timezone
pub fn iso_to_input_in<Z: TimeZone>(iso: Option<&str>, tz: &Z) -> Option<String> {
    let iso = iso.map(str::trim).filter(|s| !s.is_empty())?;

    // Explicit offset: convert the instant onto the local clock
    if let Ok(instant) = DateTime::parse_from_rfc3339(iso) {
        return Some(to_input_in(&instant, tz));
    }

    // No offset: already a local wall-clock value
    if let Some(naive) = parse_naive(iso) {
        return Some(naive.format(LOCAL_INPUT_FORMAT).to_string());
    }

    // Bare date: midnight UTC, as browsers read it
    NaiveDate::parse_from_str(iso, DATE_INPUT_FORMAT)
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
        .map(|instant| to_input_in(&instant, tz))
}

/// Convert a local input value into an RFC 3339 instant with local offset
///
/// Returns `None` for unparseable inputs and for wall-clock times skipped by
/// a DST transition. Ambiguous times resolve to the earlier instant.
pub fn local_input_to_iso(input: &str) -> Option<String> {
    input_to_iso_in(input, &Local)
}

/// [`local_input_to_iso`] against an explicit timezone
pub fn input_to_iso_in<Z: TimeZone>(input: &str, tz: &Z) -> Option<String>
where
    Z::Offset: std::fmt::Display,
{
    let naive = parse_local_input(input).ok()?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|instant| instant.to_rfc3339_opts(SecondsFormat::Secs, false))
}

/// Parse a local input value (seconds optional)
pub fn parse_local_input(input: &str) -> Result<NaiveDateTime, NormalizeError> {
    parse_naive(input.trim()).ok_or_else(|| NormalizeError::InvalidDateTime(input.to_string()))
}

/// Parse a `YYYY-MM-DD` date input
pub fn parse_date_input(input: &str) -> Result<NaiveDate, NormalizeError> {
    NaiveDate::parse_from_str(input.trim(), DATE_INPUT_FORMAT)
        .map_err(|_| NormalizeError::InvalidDate(input.to_string()))
}

/// Format a date as a `date` input value
pub fn to_date_input(date: NaiveDate) -> String {
    date.format(DATE_INPUT_FORMAT).to_string()
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
}
