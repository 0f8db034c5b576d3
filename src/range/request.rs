// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Construction parameters for [`DateRange`](crate::DateRange).

use chrono::NaiveDateTime;

use crate::dates::{resolve_optional, DateInput};
use crate::errors::DateRangeError;
use crate::offsets::Offset;
use crate::range::lazy::resolve_offset;

/// Parameters for building a [`DateRange`](crate::DateRange).
///
/// Boundaries and the period count each have an alias (`begin`, `end`,
/// `n_periods`). The primary name wins when only one is set; setting both to
/// different values is an error rather than a silent preference.
///
/// # Examples
///
/// ```rust
/// use daterange::{DateRange, DateRangeRequest, Offset};
///
/// let request = DateRangeRequest::new()
///     .begin("2021-01-01")
///     .n_periods(3)
///     .offset(Offset::month_end());
/// let range = DateRange::new(&request).unwrap();
/// assert_eq!(range.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DateRangeRequest {
    from_date: Option<DateInput>,
    to_date: Option<DateInput>,
    periods: Option<usize>,
    begin: Option<DateInput>,
    end: Option<DateInput>,
    n_periods: Option<usize>,
    offset: Offset,
    time_rule: Option<String>,
}

impl DateRangeRequest {
    /// Empty request with a one business day offset.
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

    /// Alias for [`from_date`](Self::from_date)
    pub fn begin(mut self, begin: impl Into<DateInput>) -> Self {
        self.begin = Some(begin.into());
        self
    }

    /// Alias for [`to_date`](Self::to_date)
    pub fn end(mut self, end: impl Into<DateInput>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Alias for [`periods`](Self::periods)
    pub fn n_periods(mut self, n_periods: usize) -> Self {
        self.n_periods = Some(n_periods);
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

    /// Parses boundaries, merges aliases and resolves the offset.
    pub(crate) fn resolve(&self) -> Result<ResolvedRequest, DateRangeError> {
        let from_date = pick(
            resolve_optional(self.from_date.as_ref())?,
            resolve_optional(self.begin.as_ref())?,
            "from_date",
            "begin",
        )?;
        let to_date = pick(
            resolve_optional(self.to_date.as_ref())?,
            resolve_optional(self.end.as_ref())?,
            "to_date",
            "end",
        )?;
        let periods = pick(self.periods, self.n_periods, "periods", "n_periods")?;
        let (offset, time_rule) = resolve_offset(self.offset, self.time_rule.as_deref())?;

        Ok(ResolvedRequest {
            from_date,
            to_date,
            periods,
            offset,
            time_rule,
        })
    }
}

/// A request with parsed boundaries and a concrete offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedRequest {
    pub(crate) from_date: Option<NaiveDateTime>,
    pub(crate) to_date: Option<NaiveDateTime>,
    pub(crate) periods: Option<usize>,
    pub(crate) offset: Offset,
    pub(crate) time_rule: Option<&'static str>,
}

fn pick<T: PartialEq>(
    primary: Option<T>,
    alias: Option<T>,
    primary_name: &'static str,
    alias_name: &'static str,
) -> Result<Option<T>, DateRangeError> {
    match (primary, alias) {
        (Some(primary), Some(alias)) if primary != alias => {
            Err(DateRangeError::ConflictingParameters {
                primary: primary_name,
                alias: alias_name,
            })
        }
        (Some(value), _) | (None, Some(value)) => Ok(Some(value)),
        (None, None) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_alias_used_when_primary_absent() {
        let resolved = DateRangeRequest::new()
            .begin("2021-01-04")
            .end("2021-01-08")
            .n_periods(5)
            .resolve()
            .unwrap();
        assert_eq!(
            resolved.from_date.map(|d| d.date()),
            NaiveDate::from_ymd_opt(2021, 1, 4)
        );
        assert_eq!(
            resolved.to_date.map(|d| d.date()),
            NaiveDate::from_ymd_opt(2021, 1, 8)
        );
        assert_eq!(resolved.periods, Some(5));
    }

    #[test]
    fn test_identical_primary_and_alias_accepted() {
        let resolved = DateRangeRequest::new()
            .from_date("2021-01-04")
            .begin(NaiveDate::from_ymd_opt(2021, 1, 4).unwrap())
            .periods(2)
            .n_periods(2)
            .resolve()
            .unwrap();
        assert_eq!(resolved.periods, Some(2));
    }

    #[test]
    fn test_conflicting_primary_and_alias_rejected() {
        let err = DateRangeRequest::new()
            .to_date("2021-01-04")
            .end("2021-01-05")
            .resolve()
            .unwrap_err();
        assert_eq!(
            err,
            DateRangeError::ConflictingParameters {
                primary: "to_date",
                alias: "end",
            }
        );

        let err = DateRangeRequest::new()
            .periods(2)
            .n_periods(3)
            .resolve()
            .unwrap_err();
        assert!(matches!(
            err,
            DateRangeError::ConflictingParameters {
                primary: "periods",
                ..
            }
        ));
    }

    #[test]
    fn test_time_rule_resolution() {
        let resolved = DateRangeRequest::new()
            .offset(Offset::day())
            .time_rule("eom")
            .resolve()
            .unwrap();
        assert_eq!(resolved.offset, Offset::business_month_end());
        assert_eq!(resolved.time_rule, Some("EOM"));

        let resolved = DateRangeRequest::new().resolve().unwrap();
        assert_eq!(resolved.offset, Offset::business_day());
        assert_eq!(resolved.time_rule, Some("WEEKDAY"));
    }
}
