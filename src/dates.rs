//! Calendar date helpers
//!
//! All keys and comparisons use the local calendar date (`NaiveDate`). Nothing
//! in this crate converts to UTC, so a key computed from a journal entry always
//! matches the key of the day tile it belongs to.

use chrono::{Datelike, Duration, NaiveDate};
use thiserror::Error;

/// Format used for store keys and journal lookups
pub const ISO_KEY_FORMAT: &str = "%Y-%m-%d";

/// Number of days in a calendar row
pub const DAYS_PER_WEEK: u32 = 7;

/// Errors produced while parsing an external `day/month/year` date
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("expected day/month/year, found {found} field(s) in {input:?}")]
    FieldCount { input: String, found: usize },

    #[error("non-numeric date component {component:?} in {input:?}")]
    NotNumeric { input: String, component: String },

    #[error("{input:?} is not a valid calendar date")]
    OutOfRange { input: String },
}

/// Canonical `YYYY-MM-DD` key for a date
pub fn iso_key(date: NaiveDate) -> String {
    date.format(ISO_KEY_FORMAT).to_string()
}

/// Parse a key produced by [`iso_key`]
pub fn parse_iso_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), ISO_KEY_FORMAT).ok()
}

/// First day of the week containing `date`
///
/// `week_starts_on` counts from Sunday (0 = Sunday, 1 = Monday, ...) and is
/// taken modulo 7.
pub fn start_of_week(date: NaiveDate, week_starts_on: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday();
    let start = u32::from(week_starts_on) % DAYS_PER_WEEK;
    let diff = (weekday + DAYS_PER_WEEK - start) % DAYS_PER_WEEK;
    add_days(date, -i64::from(diff))
}

/// Shift a date by a signed number of days
///
/// Saturates at the ends of chrono's supported range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Shift a date by a signed number of days, or None outside chrono's range
pub fn checked_add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

/// Parse the external journal date format (`day/month/year`)
///
/// ISO keys are rejected: `2024-06-15` is a single field.
pub fn parse_external_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let fields: Vec<&str> = input.trim().split('/').collect();
    if fields.len() != 3 {
        return Err(DateParseError::FieldCount {
            input: input.to_string(),
            found: fields.len(),
        });
    }

    let mut numbers = [0i64; 3];
    for (slot, field) in numbers.iter_mut().zip(&fields) {
        let field = field.trim();
        *slot = field.parse::<i64>().map_err(|_| DateParseError::NotNumeric {
            input: input.to_string(),
            component: field.to_string(),
        })?;
    }

    let [day, month, year] = numbers;
    let out_of_range = || DateParseError::OutOfRange {
        input: input.to_string(),
    };
    let year = i32::try_from(year).map_err(|_| out_of_range())?;
    let month = u32::try_from(month).map_err(|_| out_of_range())?;
    let day = u32::try_from(day).map_err(|_| out_of_range())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(out_of_range)
}

/// Parse a date typed by the user: either an ISO key or `day/month/year`
pub fn parse_user_date(input: &str) -> Result<NaiveDate, DateParseError> {
    match parse_iso_key(input) {
        Some(date) => Ok(date),
        None => parse_external_date(input),
    }
}

/// English month name for a zero-based month index
pub fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August",
        "September", "October", "November", "December",
    ];
    NAMES.get(month as usize).copied().unwrap_or("?")
}

/// Two-letter weekday labels for a week beginning on `week_starts_on`
pub fn weekday_labels(week_starts_on: u8) -> [&'static str; 7] {
    const LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
    let start = usize::from(week_starts_on) % 7;
    std::array::from_fn(|i| LABELS[(start + i) % 7])
}
