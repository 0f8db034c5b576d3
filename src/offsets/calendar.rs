// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Gregorian calendar helpers shared by the offset rules.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// Last calendar day of the month containing `date`.
pub(crate) fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

/// Whether `date` is the last calendar day of its month.
pub(crate) fn is_month_end(date: NaiveDate) -> bool {
    last_day_of_month(date) == Some(date)
}

/// Monday through Friday.
pub(crate) fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Last weekday of the month containing `date`.
pub(crate) fn last_business_day(date: NaiveDate) -> Option<NaiveDate> {
    let last = last_day_of_month(date)?;
    match last.weekday() {
        Weekday::Sat => last.pred_opt(),
        Weekday::Sun => last.pred_opt()?.pred_opt(),
        _ => Some(last),
    }
}

/// Months since year zero, so month arithmetic is plain integer addition.
pub(crate) fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn first_of_month(index: i64) -> Option<NaiveDate> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Last calendar day of the month at `index`, at `time`.
pub(crate) fn month_end_at(index: i64, time: NaiveTime) -> Option<NaiveDateTime> {
    last_day_of_month(first_of_month(index)?).map(|d| d.and_time(time))
}

/// Last weekday of the month at `index`, at `time`.
pub(crate) fn business_month_end_at(index: i64, time: NaiveTime) -> Option<NaiveDateTime> {
    last_business_day(first_of_month(index)?).map(|d| d.and_time(time))
}
