// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Elementwise comparisons between a [`DateRange`] and a date or a sequence.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::errors::DateRangeError;
use crate::range::index::DateIndex;
use crate::range::materialized::DateRange;

/// Comparison operator applied elementwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl CmpOp {
    fn holds(self, ordering: Ordering) -> bool {
        match self {
            CmpOp::Lt => ordering.is_lt(),
            CmpOp::Le => ordering.is_le(),
            CmpOp::Gt => ordering.is_gt(),
            CmpOp::Ge => ordering.is_ge(),
            CmpOp::Eq => ordering.is_eq(),
        }
    }
}

/// Right-hand side of a comparison.
///
/// A scalar is compared against every element; a sequence must have the same
/// length as the range and is compared position by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Scalar(NaiveDateTime),
    Sequence(Vec<NaiveDateTime>),
}

impl From<NaiveDateTime> for Operand {
    fn from(value: NaiveDateTime) -> Self {
        Operand::Scalar(value)
    }
}

impl From<NaiveDate> for Operand {
    fn from(value: NaiveDate) -> Self {
        Operand::Scalar(value.and_time(NaiveTime::MIN))
    }
}

impl From<&[NaiveDateTime]> for Operand {
    fn from(values: &[NaiveDateTime]) -> Self {
        Operand::Sequence(values.to_vec())
    }
}

impl From<Vec<NaiveDateTime>> for Operand {
    fn from(values: Vec<NaiveDateTime>) -> Self {
        Operand::Sequence(values)
    }
}

impl From<&DateRange> for Operand {
    fn from(range: &DateRange) -> Self {
        Operand::Sequence(range.to_vec())
    }
}

impl From<&DateIndex> for Operand {
    fn from(index: &DateIndex) -> Self {
        Operand::Sequence(index.to_vec())
    }
}

impl DateRange {
    /// Compares every date against `rhs` with `op`.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::LengthMismatch`] when `rhs` is a sequence of
    /// a different length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use daterange::{CmpOp, DateRange, DateRangeRequest};
    ///
    /// let range = DateRange::new(&DateRangeRequest::new().from_date("2021-01-04").periods(3)).unwrap();
    /// let pivot = NaiveDate::from_ymd_opt(2021, 1, 5).unwrap();
    /// assert_eq!(range.compare(CmpOp::Ge, pivot).unwrap(), vec![false, true, true]);
    /// ```
    pub fn compare(
        &self,
        op: CmpOp,
        rhs: impl Into<Operand>,
    ) -> Result<Vec<bool>, DateRangeError> {
        match rhs.into() {
            Operand::Scalar(value) => Ok(self.iter().map(|d| op.holds(d.cmp(&value))).collect()),
            Operand::Sequence(values) => {
                if values.len() != self.len() {
                    return Err(DateRangeError::LengthMismatch {
                        expected: self.len(),
                        actual: values.len(),
                    });
                }
                Ok(self
                    .iter()
                    .zip(&values)
                    .map(|(d, v)| op.holds(d.cmp(v)))
                    .collect())
            }
        }
    }

    /// Elementwise `<`.
    pub fn lt(&self, rhs: impl Into<Operand>) -> Result<Vec<bool>, DateRangeError> {
        self.compare(CmpOp::Lt, rhs)
    }

    /// Elementwise `<=`.
    pub fn le(&self, rhs: impl Into<Operand>) -> Result<Vec<bool>, DateRangeError> {
        self.compare(CmpOp::Le, rhs)
    }

    /// Elementwise `>`.
    pub fn gt(&self, rhs: impl Into<Operand>) -> Result<Vec<bool>, DateRangeError> {
        self.compare(CmpOp::Gt, rhs)
    }

    /// Elementwise `>=`.
    pub fn ge(&self, rhs: impl Into<Operand>) -> Result<Vec<bool>, DateRangeError> {
        self.compare(CmpOp::Ge, rhs)
    }

    /// Elementwise `==`.
    pub fn eq_elementwise(&self, rhs: impl Into<Operand>) -> Result<Vec<bool>, DateRangeError> {
        self.compare(CmpOp::Eq, rhs)
    }
}
