//! Expiration date resolution for `till` payloads.
//!
//! A `till` directive carries a digits-only date in one of three lengths:
//!
//! - 8 digits (`01032026`): day-month-year, taken literally.
//! - 6 digits (`010326`): day-month-two-digit-year, taken literally.
//! - 4 digits (`0103`): day-month with the year omitted. The year is guessed
//!   from the file's modification time: the year before, the same year, and
//!   the year after are tried in that order, and the first candidate that
//!   lands strictly inside a window from 90 days back to 274 days ahead of
//!   the reference wins. The window is sized so that for any day-month at
//!   most one candidate can fit: whoever renamed the file meant a date
//!   near when they touched it.
//!
//! Calendar-invalid candidates (Feb 29 against a non-leap year) are skipped
//! rather than reported; only when no candidate fits does resolution fail.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Days before the reference time still accepted for a yearless date.
const WINDOW_BEHIND_DAYS: i64 = 90;

/// Days after the reference time still accepted for a yearless date.
const WINDOW_AHEAD_DAYS: i64 = 274;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpiryError {
    #[error("expiration date `{0}` must be 8, 6 or 4 digits")]
    BadLength(String),
    #[error("`{0}` is not a valid day-month-year date")]
    Unparseable(String),
    #[error("no year puts `{digits}` near the file date {reference}")]
    NoYearFits {
        digits: String,
        reference: NaiveDateTime,
    },
}

/// Resolve a `till` payload against the file's modification time.
pub fn resolve_expiry(reference: NaiveDateTime, digits: &str) -> Result<NaiveDateTime, ExpiryError> {
    match digits.len() {
        8 => parse_exact(digits, "%d%m%Y"),
        6 => parse_exact(digits, "%d%m%y"),
        4 => resolve_yearless(reference, digits),
        _ => Err(ExpiryError::BadLength(digits.to_string())),
    }
}

fn parse_exact(digits: &str, format: &str) -> Result<NaiveDateTime, ExpiryError> {
    NaiveDate::parse_from_str(digits, format)
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| ExpiryError::Unparseable(digits.to_string()))
}

fn resolve_yearless(
    reference: NaiveDateTime,
    digits: &str,
) -> Result<NaiveDateTime, ExpiryError> {
    let earliest = reference - Duration::days(WINDOW_BEHIND_DAYS);
    let latest = reference + Duration::days(WINDOW_AHEAD_DAYS);
    for year in reference.year() - 1..=reference.year() + 1 {
        let Ok(date) = NaiveDate::parse_from_str(&format!("{digits}{year}"), "%d%m%Y") else {
            continue;
        };
        let candidate = date.and_time(NaiveTime::MIN);
        if candidate > earliest && candidate < latest {
            return Ok(candidate);
        }
    }
    Err(ExpiryError::NoYearFits {
        digits: digits.to_string(),
        reference,
    })
}
