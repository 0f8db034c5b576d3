// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Default bounds of the canonical range cache window.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// First instant covered by canonical ranges (inclusive): 1950-01-01.
pub const CACHE_START: NaiveDateTime = midnight(1950, 1, 1);

/// End of the canonical range window (exclusive): 2030-01-01.
pub const CACHE_END: NaiveDateTime = midnight(2030, 1, 1);

const fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => NaiveDateTime::new(date, NaiveTime::MIN),
        None => panic!("invalid constant date"),
    }
}
