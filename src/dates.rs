// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Boundary inputs and date parsing.
//!
//! Range boundaries may be given as a [`NaiveDate`], a [`NaiveDateTime`] or
//! text. [`DateInput::resolve`] turns any of them into a `NaiveDateTime`;
//! calendar dates are promoted to midnight.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::errors::DateRangeError;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d"];

/// A range boundary before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// A calendar date, taken at midnight
    Date(NaiveDate),
    /// A date and time of day
    DateTime(NaiveDateTime),
    /// Text to be parsed with [`parse_date`]
    Text(String),
}

impl DateInput {
    /// Resolves the input to a date-time.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::InvalidDate`] when text input is unparsable.
    pub fn resolve(&self) -> Result<NaiveDateTime, DateRangeError> {
        match self {
            DateInput::Date(date) => Ok(date.and_time(NaiveTime::MIN)),
            DateInput::DateTime(dt) => Ok(*dt),
            DateInput::Text(text) => parse_date(text),
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(dt: NaiveDateTime) -> Self {
        DateInput::DateTime(dt)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_owned())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

/// Parses a boundary from text.
///
/// Accepts `YYYY-MM-DD`, `YYYYMMDD`, `YYYY/MM/DD`, `YYYY-MM-DD HH:MM:SS` and
/// `YYYY-MM-DDTHH:MM:SS`, with optional fractional seconds. Surrounding
/// whitespace is ignored.
///
/// # Errors
///
/// Returns [`DateRangeError::InvalidDate`] if no format matches.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use daterange::parse_date;
///
/// let dt = parse_date("2021-01-04").unwrap();
/// assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2021, 1, 4).unwrap());
/// assert!(parse_date("next tuesday").is_err());
/// ```
pub fn parse_date(input: &str) -> Result<NaiveDateTime, DateRangeError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(DateRangeError::invalid_date(input, "empty input"));
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }

    let mut last_error = None;
    for format in DATE_FORMATS {
        match NaiveDate::parse_from_str(text, format) {
            Ok(date) => return Ok(date.and_time(NaiveTime::MIN)),
            Err(e) => last_error = Some(e),
        }
    }

    Err(DateRangeError::invalid_date(
        input,
        last_error.map_or_else(|| "unrecognized format".to_owned(), |e| e.to_string()),
    ))
}

/// Resolves an optional boundary.
pub(crate) fn resolve_optional(
    input: Option<&DateInput>,
) -> Result<Option<NaiveDateTime>, DateRangeError> {
    input.map(DateInput::resolve).transpose()
}

/// Truncates `dt` to midnight of the same day.
pub fn normalize(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_time(NaiveTime::MIN)
}
