// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Date offsets: the grid rules a date range walks along.
//!
//! An [`Offset`] is a multiplier `n` applied to a grid rule ([`OffsetKind`]).
//! Every offset answers the same questions:
//!
//! - is a date on the grid ([`Offset::on_offset`])
//! - where does a date land after `k` steps ([`Offset::apply`])
//! - what is the nearest grid point forward or backward
//!   ([`Offset::roll_forward`], [`Offset::roll_back`])
//! - is it anchored to the calendar or a fixed-duration tick
//!
//! Offsets are small `Copy` values that hash by rule and multiplier, so an
//! offset is its own cache key.
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use daterange::Offset;
//!
//! let friday = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let bday = Offset::business_day();
//!
//! let monday = bday.apply(friday, 1).unwrap();
//! assert_eq!(monday.date(), NaiveDate::from_ymd_opt(2021, 1, 4).unwrap());
//!
//! let eom: Offset = "EOM".parse().unwrap();
//! assert_eq!(eom, Offset::business_month_end());
//! ```

use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::OffsetError;

mod calendar;
mod rules;

use calendar::{
    business_month_end_at, is_month_end, is_weekday, last_business_day, month_end_at,
    month_index,
};

/// The grid rule of an [`Offset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetKind {
    /// Monday through Friday.
    BusinessDay,
    /// Fixed 24-hour step.
    Day,
    /// Fixed one-hour step.
    Hour,
    /// Fixed one-minute step.
    Minute,
    /// Seven-day step, optionally anchored to a weekday.
    Week {
        /// Anchor weekday; `None` steps seven days from wherever it starts.
        weekday: Option<Weekday>,
    },
    /// Last calendar day of each month.
    MonthEnd,
    /// Last weekday of each month.
    BusinessMonthEnd,
    /// Last calendar day of every third month.
    QuarterEnd {
        /// First quarter-end month of the year, in `1..=3`.
        starting_month: u32,
    },
    /// December 31st.
    YearEnd,
}

impl OffsetKind {
    fn name(&self) -> &'static str {
        match self {
            OffsetKind::BusinessDay => "BusinessDay",
            OffsetKind::Day => "Day",
            OffsetKind::Hour => "Hour",
            OffsetKind::Minute => "Minute",
            OffsetKind::Week { .. } => "Week",
            OffsetKind::MonthEnd => "MonthEnd",
            OffsetKind::BusinessMonthEnd => "BusinessMonthEnd",
            OffsetKind::QuarterEnd { .. } => "QuarterEnd",
            OffsetKind::YearEnd => "YearEnd",
        }
    }
}

/// A grid rule scaled by a step multiplier.
///
/// `Offset::business_day()` steps one business day at a time;
/// `Offset::business_day() * 2` steps two. The default offset is one business
/// day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    n: i64,
    kind: OffsetKind,
}

impl Default for Offset {
    fn default() -> Self {
        Self::business_day()
    }
}

impl Offset {
    /// Creates an offset stepping `n` units of `kind`.
    pub const fn new(kind: OffsetKind, n: i64) -> Self {
        Self { n, kind }
    }

    /// One business day (Monday through Friday).
    pub const fn business_day() -> Self {
        Self::new(OffsetKind::BusinessDay, 1)
    }

    /// One calendar day, as a fixed 24-hour tick.
    pub const fn day() -> Self {
        Self::new(OffsetKind::Day, 1)
    }

    /// One hour tick.
    pub const fn hour() -> Self {
        Self::new(OffsetKind::Hour, 1)
    }

    /// One minute tick.
    pub const fn minute() -> Self {
        Self::new(OffsetKind::Minute, 1)
    }

    /// Seven days, not anchored to any weekday.
    pub const fn week() -> Self {
        Self::new(OffsetKind::Week { weekday: None }, 1)
    }

    /// One week, anchored on `weekday`.
    pub const fn weekly(weekday: Weekday) -> Self {
        Self::new(
            OffsetKind::Week {
                weekday: Some(weekday),
            },
            1,
        )
    }

    /// Last calendar day of the month.
    pub const fn month_end() -> Self {
        Self::new(OffsetKind::MonthEnd, 1)
    }

    /// Last weekday of the month.
    pub const fn business_month_end() -> Self {
        Self::new(OffsetKind::BusinessMonthEnd, 1)
    }

    /// Quarter ends cycling from `starting_month`.
    ///
    /// Months are taken modulo the quarter, so `3`, `6`, `9` and `12` all
    /// describe the calendar quarters ending March, June, September and
    /// December.
    pub const fn quarter_end(starting_month: u32) -> Self {
        Self::new(
            OffsetKind::QuarterEnd {
                starting_month: (starting_month % 3 + 2) % 3 + 1,
            },
            1,
        )
    }

    /// December 31st.
    pub const fn year_end() -> Self {
        Self::new(OffsetKind::YearEnd, 1)
    }

    /// Resolves a time rule name such as `WEEKDAY` or `W@FRI`.
    ///
    /// # Errors
    ///
    /// Returns [`OffsetError::UnknownTimeRule`] for unrecognized names.
    pub fn from_time_rule(rule: &str) -> Result<Self, OffsetError> {
        rules::lookup(rule).ok_or_else(|| OffsetError::unknown_time_rule(rule))
    }

    /// Canonical time rule name of this offset, if it has one.
    ///
    /// Only unit offsets (`n == 1`) have names.
    pub fn time_rule(&self) -> Option<&'static str> {
        rules::name_of(self)
    }

    /// Step multiplier.
    pub fn n(&self) -> i64 {
        self.n
    }

    /// Grid rule.
    pub fn kind(&self) -> OffsetKind {
        self.kind
    }

    /// The same rule with a multiplier of one.
    pub fn unit(&self) -> Self {
        Self::new(self.kind, 1)
    }

    /// The same rule with the multiplier scaled by `factor`.
    pub fn times(&self, factor: i64) -> Self {
        Self::new(self.kind, self.n.saturating_mul(factor))
    }

    /// Whether grid positions derive from the calendar and this offset steps
    /// exactly one grid point.
    pub fn is_anchored(&self) -> bool {
        self.n == 1 && !matches!(self.kind, OffsetKind::Week { weekday: None })
    }

    /// Whether this offset is a fixed-duration step.
    pub fn is_tick(&self) -> bool {
        matches!(
            self.kind,
            OffsetKind::Day | OffsetKind::Hour | OffsetKind::Minute
        )
    }

    /// Whether iteration should start from midnight.
    pub fn normalize_first(&self) -> bool {
        !self.is_tick()
    }

    /// Whether `dt` lies on this offset's grid. Independent of `n`.
    pub fn on_offset(&self, dt: NaiveDateTime) -> bool {
        let date = dt.date();
        match self.kind {
            OffsetKind::BusinessDay => is_weekday(date),
            OffsetKind::Day | OffsetKind::Hour | OffsetKind::Minute => true,
            OffsetKind::Week { weekday: None } => true,
            OffsetKind::Week {
                weekday: Some(weekday),
            } => date.weekday() == weekday,
            OffsetKind::MonthEnd => is_month_end(date),
            OffsetKind::BusinessMonthEnd => last_business_day(date) == Some(date),
            OffsetKind::QuarterEnd { starting_month } => {
                is_month_end(date)
                    && (i64::from(date.month()) - i64::from(starting_month)).rem_euclid(3) == 0
            }
            OffsetKind::YearEnd => date.month() == 12 && date.day() == 31,
        }
    }

    /// Moves `dt` by `k` applications of this offset (`k * n` grid steps).
    ///
    /// From an off-grid date the first forward step lands on the next grid
    /// point and the first backward step on the previous one. Zero steps rolls
    /// an off-grid date forward. Time of day is preserved.
    ///
    /// Returns `None` if the result is not representable.
    pub fn apply(&self, dt: NaiveDateTime, k: i64) -> Option<NaiveDateTime> {
        let steps = self.n.checked_mul(k)?;
        if steps == 0 {
            return self.roll_forward(dt);
        }
        self.step(dt, steps)
    }

    /// Rolls `dt` forward to the next grid point, identity if already on it.
    pub fn roll_forward(&self, dt: NaiveDateTime) -> Option<NaiveDateTime> {
        if self.on_offset(dt) {
            Some(dt)
        } else {
            self.step(dt, 1)
        }
    }

    /// Rolls `dt` back to the previous grid point, identity if already on it.
    pub fn roll_back(&self, dt: NaiveDateTime) -> Option<NaiveDateTime> {
        if self.on_offset(dt) {
            Some(dt)
        } else {
            self.step(dt, -1)
        }
    }

    fn step(&self, dt: NaiveDateTime, steps: i64) -> Option<NaiveDateTime> {
        match self.kind {
            OffsetKind::BusinessDay => step_business_days(dt, steps),
            OffsetKind::Day => dt.checked_add_signed(TimeDelta::try_days(steps)?),
            OffsetKind::Hour => dt.checked_add_signed(TimeDelta::try_hours(steps)?),
            OffsetKind::Minute => dt.checked_add_signed(TimeDelta::try_minutes(steps)?),
            OffsetKind::Week { weekday: None } => {
                dt.checked_add_signed(TimeDelta::try_weeks(steps)?)
            }
            OffsetKind::Week {
                weekday: Some(weekday),
            } => step_weeks_anchored(dt, weekday, steps),
            OffsetKind::MonthEnd => step_month_ends(dt, steps),
            OffsetKind::BusinessMonthEnd => step_business_month_ends(dt, steps),
            OffsetKind::QuarterEnd { starting_month } => {
                step_quarter_ends(dt, starting_month, steps)
            }
            OffsetKind::YearEnd => step_year_ends(dt, steps),
        }
    }
}

fn step_business_days(dt: NaiveDateTime, steps: i64) -> Option<NaiveDateTime> {
    let direction = steps.signum();
    let mut remaining = steps;
    let mut current = dt;

    // Step off a weekend first; the first weekday reached counts as a step.
    while remaining != 0 && !is_weekday(current.date()) {
        current = current.checked_add_signed(TimeDelta::try_days(direction)?)?;
        if is_weekday(current.date()) {
            remaining -= direction;
        }
    }

    // Five business days from a weekday is exactly one calendar week.
    if remaining.abs() >= 5 {
        let weeks = remaining / 5;
        current = current.checked_add_signed(TimeDelta::try_weeks(weeks)?)?;
        remaining -= weeks * 5;
    }

    while remaining != 0 {
        current = current.checked_add_signed(TimeDelta::try_days(direction)?)?;
        if is_weekday(current.date()) {
            remaining -= direction;
        }
    }
    Some(current)
}

fn step_weeks_anchored(dt: NaiveDateTime, weekday: Weekday, steps: i64) -> Option<NaiveDateTime> {
    let current = i64::from(dt.weekday().num_days_from_monday());
    let target = i64::from(weekday.num_days_from_monday());
    if current == target {
        return dt.checked_add_signed(TimeDelta::try_weeks(steps)?);
    }

    let aligned = dt.checked_add_signed(TimeDelta::try_days((target - current).rem_euclid(7))?)?;
    let weeks = if steps > 0 { steps - 1 } else { steps };
    aligned.checked_add_signed(TimeDelta::try_weeks(weeks)?)
}

fn step_month_ends(dt: NaiveDateTime, steps: i64) -> Option<NaiveDateTime> {
    let date = dt.date();
    let mut base = month_index(date);
    let mut steps = steps;
    if !is_month_end(date) {
        // Count from the end of the previous month.
        base -= 1;
        if steps < 0 {
            steps += 1;
        }
    }
    month_end_at(base.checked_add(steps)?, dt.time())
}

fn step_business_month_ends(dt: NaiveDateTime, steps: i64) -> Option<NaiveDateTime> {
    let date = dt.date();
    let last = last_business_day(date)?;
    let mut steps = steps;
    if steps > 0 && date < last {
        steps -= 1;
    } else if steps < 0 && date > last {
        steps += 1;
    }
    business_month_end_at(month_index(date).checked_add(steps)?, dt.time())
}

fn step_quarter_ends(dt: NaiveDateTime, starting_month: u32, steps: i64) -> Option<NaiveDateTime> {
    let date = dt.date();
    let months_to_go = (i64::from(starting_month) - i64::from(date.month())).rem_euclid(3);
    let at_quarter_end = months_to_go == 0 && is_month_end(date);
    let steps = if steps > 0 && !at_quarter_end {
        steps - 1
    } else {
        steps
    };
    let months = months_to_go.checked_add(steps.checked_mul(3)?)?;
    month_end_at(month_index(date).checked_add(months)?, dt.time())
}

fn step_year_ends(dt: NaiveDateTime, steps: i64) -> Option<NaiveDateTime> {
    let date = dt.date();
    let mut year = i64::from(date.year());
    let mut steps = steps;
    if date.month() != 12 || date.day() != 31 {
        year -= 1;
        if steps < 0 {
            steps += 1;
        }
    }
    // December of the target year
    month_end_at(year.checked_add(steps)?.checked_mul(12)?.checked_add(11)?, dt.time())
}

impl Mul<i64> for Offset {
    type Output = Offset;

    fn mul(self, factor: i64) -> Offset {
        self.times(factor)
    }
}

impl FromStr for Offset {
    type Err = OffsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_time_rule(s)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.n.abs() == 1 { "" } else { "s" };
        write!(f, "<{} {}{}", self.n, self.kind.name(), plural)?;
        match self.kind {
            OffsetKind::Week {
                weekday: Some(weekday),
            } => write!(f, ": weekday={weekday}")?,
            OffsetKind::QuarterEnd { starting_month } => {
                write!(f, ": starting_month={starting_month}")?
            }
            _ => {}
        }
        write!(f, ">")
    }
}
