// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Named time rules.

use chrono::Weekday;

use super::Offset;

const TIME_RULES: &[(&str, Offset)] = &[
    ("WEEKDAY", Offset::business_day()),
    ("EOM", Offset::business_month_end()),
    ("W@MON", Offset::weekly(Weekday::Mon)),
    ("W@TUE", Offset::weekly(Weekday::Tue)),
    ("W@WED", Offset::weekly(Weekday::Wed)),
    ("W@THU", Offset::weekly(Weekday::Thu)),
    ("W@FRI", Offset::weekly(Weekday::Fri)),
    ("W@SAT", Offset::weekly(Weekday::Sat)),
    ("W@SUN", Offset::weekly(Weekday::Sun)),
    ("Q@JAN", Offset::quarter_end(1)),
    ("Q@FEB", Offset::quarter_end(2)),
    ("Q@MAR", Offset::quarter_end(3)),
    ("A@DEC", Offset::year_end()),
];

pub(super) fn lookup(rule: &str) -> Option<Offset> {
    let rule = rule.trim();
    TIME_RULES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(rule))
        .map(|(_, offset)| *offset)
}

pub(super) fn name_of(offset: &Offset) -> Option<&'static str> {
    TIME_RULES
        .iter()
        .find(|(_, candidate)| candidate == offset)
        .map(|(name, _)| *name)
}
