// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Lazy, single-pass date range generation.
//!
//! [`LazyDateRange`] resolves its boundaries once at construction and then
//! yields dates on demand. Dates satisfy `from_date <= d <= to_date` and lie on
//! the offset's grid; boundaries that are off the grid are pulled inward.
//!
//! Use it when the dates are consumed once or the range is very large. For a
//! reusable, sliceable range use [`DateRange`](crate::DateRange), which is the
//! materialized form of this sequence.
//!
//! # Examples
//!
//! ```rust
//! use daterange::{GeneratorParams, LazyDateRange};
//!
//! let params = GeneratorParams::new().from_date("2021-01-02").periods(3);
//! let dates: Vec<_> = LazyDateRange::new(&params).unwrap().into_iter().collect();
//!
//! // Saturday snaps forward to Monday
//! let shown: Vec<_> = dates.iter().map(|d| d.date().to_string()).collect();
//! assert_eq!(shown, ["2021-01-04", "2021-01-05", "2021-01-06"]);
//! ```

use std::iter::FusedIterator;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::dates::{normalize, resolve_optional, DateInput};
use crate::errors::DateRangeError;
use crate::offsets::Offset;

/// Construction parameters for [`LazyDateRange`].
///
/// Two of `from_date`, `to_date` and `periods` must be usable. A time rule,
/// when given, replaces the offset.
#[derive(Debug, Clone, Default)]
pub struct GeneratorParams {
    from_date: Option<DateInput>,
    to_date: Option<DateInput>,
    periods: Option<usize>,
    offset: Offset,
    time_rule: Option<String>,
}

impl GeneratorParams {
    /// Parameters with no boundaries and a one business day offset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the left boundary (inclusive)
    pub fn from_date(mut self, from_date: impl Into<DateInput>) -> Self {
        self.from_date = Some(from_date.into());
        self
    }

    /// Set the right boundary (inclusive)
    pub fn to_date(mut self, to_date: impl Into<DateInput>) -> Self {
        self.to_date = Some(to_date.into());
        self
    }

    /// Set the number of periods
    pub fn periods(mut self, periods: usize) -> Self {
        self.periods = Some(periods);
        self
    }

    /// Set the offset
    pub fn offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    /// Set a named time rule; it overrides the offset.
    pub fn time_rule(mut self, rule: impl Into<String>) -> Self {
        self.time_rule = Some(rule.into());
        self
    }
}

/// Resolves the effective offset and its canonical name.
///
/// A named rule wins over an explicit offset; without a rule the offset's own
/// canonical name is adopted.
pub(crate) fn resolve_offset(
    offset: Offset,
    time_rule: Option<&str>,
) -> Result<(Offset, Option<&'static str>), DateRangeError> {
    let offset = match time_rule {
        Some(rule) => Offset::from_time_rule(rule)?,
        None => offset,
    };
    Ok((offset, offset.time_rule()))
}

/// A finite, forward-only sequence of dates on an offset's grid.
///
/// Consumed by iteration: iterate again by building a new instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyDateRange {
    from_date: NaiveDateTime,
    to_date: NaiveDateTime,
    periods: Option<usize>,
    offset: Offset,
    time_rule: Option<&'static str>,
}

impl LazyDateRange {
    /// Resolves boundaries and builds the generator.
    ///
    /// # Errors
    ///
    /// - [`DateRangeError::Offset`] for an unknown time rule
    /// - [`DateRangeError::InvalidDate`] for an unparsable boundary
    /// - [`DateRangeError::InvalidOffsetMultiplier`] for offsets that do not
    ///   move forward
    /// - [`DateRangeError::InsufficientParameters`] when fewer than two of
    ///   start, end and period count are given
    /// - [`DateRangeError::DateOutOfRange`] when a derived boundary overflows
    pub fn new(params: &GeneratorParams) -> Result<Self, DateRangeError> {
        let (offset, time_rule) = resolve_offset(params.offset, params.time_rule.as_deref())?;
        let from_date = resolve_optional(params.from_date.as_ref())?;
        let to_date = resolve_optional(params.to_date.as_ref())?;
        Self::from_resolved(from_date, to_date, params.periods, offset, time_rule)
    }

    /// Builds the generator from already-parsed boundaries and a resolved
    /// offset.
    pub(crate) fn from_resolved(
        from_date: Option<NaiveDateTime>,
        to_date: Option<NaiveDateTime>,
        periods: Option<usize>,
        offset: Offset,
        time_rule: Option<&'static str>,
    ) -> Result<Self, DateRangeError> {
        if offset.n() <= 0 {
            return Err(DateRangeError::InvalidOffsetMultiplier { n: offset.n() });
        }

        // Calendar grids sit at midnight, so boundaries are compared by day
        let grid_point = |dt: NaiveDateTime| {
            if offset.normalize_first() {
                normalize(dt)
            } else {
                dt
            }
        };
        let unit = offset.unit();
        let from_date = from_date
            .map(|dt| {
                unit.roll_forward(grid_point(dt))
                    .ok_or_else(|| DateRangeError::date_out_of_range("rolling start date forward"))
            })
            .transpose()?;
        let mut to_date = to_date
            .map(|dt| {
                unit.roll_back(grid_point(dt))
                    .ok_or_else(|| DateRangeError::date_out_of_range("rolling end date back"))
            })
            .transpose()?;

        let mut periods = periods;
        if let (Some(from), Some(to)) = (from_date, to_date) {
            if periods.is_none() && to < from {
                debug!(from = %from, to = %to, "Boundaries cross after snapping, range is empty");
                to_date = None;
                periods = Some(0);
            }
        }

        let (from_date, to_date) = match (from_date, to_date, periods) {
            (Some(from), Some(to), _) => (from, to),
            (Some(from), None, Some(count)) => (from, step_periods(&offset, from, count, 1)?),
            (None, Some(to), Some(count)) => (step_periods(&offset, to, count, -1)?, to),
            _ => return Err(DateRangeError::InsufficientParameters),
        };

        Ok(Self {
            from_date,
            to_date,
            periods,
            offset,
            time_rule,
        })
    }

    /// Left boundary after snapping or derivation.
    pub fn from_date(&self) -> NaiveDateTime {
        self.from_date
    }

    /// Right boundary after snapping or derivation.
    pub fn to_date(&self) -> NaiveDateTime {
        self.to_date
    }

    /// Period count, if one was given or the range collapsed to empty.
    pub fn periods(&self) -> Option<usize> {
        self.periods
    }

    /// The resolved offset.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Canonical time rule name, if the offset has one.
    pub fn time_rule(&self) -> Option<&'static str> {
        self.time_rule
    }
}

/// `anchor + direction * (count - 1) * offset`
fn step_periods(
    offset: &Offset,
    anchor: NaiveDateTime,
    count: usize,
    direction: i64,
) -> Result<NaiveDateTime, DateRangeError> {
    let steps = i64::try_from(count)
        .map(|count| (count - 1) * direction)
        .map_err(|_| DateRangeError::date_out_of_range(format!("{count} periods")))?;
    offset
        .apply(anchor, steps)
        .ok_or_else(|| DateRangeError::date_out_of_range(format!("{count} periods from {anchor}")))
}

impl IntoIterator for LazyDateRange {
    type Item = NaiveDateTime;
    type IntoIter = LazyDateRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        LazyDateRangeIter {
            cursor: Some(self.from_date),
            to_date: self.to_date,
            offset: self.offset,
        }
    }
}

/// Iterator over a [`LazyDateRange`].
#[derive(Debug, Clone)]
pub struct LazyDateRangeIter {
    cursor: Option<NaiveDateTime>,
    to_date: NaiveDateTime,
    offset: Offset,
}

impl Iterator for LazyDateRangeIter {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.filter(|cursor| *cursor <= self.to_date)?;
        // Overflow past the representable calendar ends the sequence.
        self.cursor = self
            .offset
            .apply(current, 1)
            .filter(|next| *next > current);
        Some(current)
    }
}

impl FusedIterator for LazyDateRangeIter {}
