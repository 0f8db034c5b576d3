// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for date range construction and manipulation.

use chrono::NaiveDateTime;

use super::OffsetError;
use crate::offsets::Offset;

/// Errors that can occur while building or manipulating a date range.
///
/// Every failure is raised synchronously at the point of detection and
/// construction is atomic: no partial range is ever returned. All variants
/// describe programming or input errors, none of them are transient.
///
/// # Examples
///
/// ```rust
/// use daterange::{DateRange, DateRangeError};
///
/// let err = DateRange::get_cached_range(None, None, Some(5), None, None).unwrap_err();
/// assert!(matches!(err, DateRangeError::MissingOffset));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateRangeError {
    /// A boundary could not be parsed into a date.
    #[error("Invalid date {input:?}: {reason}")]
    InvalidDate {
        /// The raw input that failed to parse
        input: String,
        /// Why the input was rejected
        reason: String,
    },

    /// Fewer than two of start, end and period count were usable.
    #[error("Must provide at least two of start date, end date and number of periods")]
    InsufficientParameters,

    /// A cache lookup was requested without an offset or time rule.
    #[error("Must provide a date offset or time rule")]
    MissingOffset,

    /// A one-sided cache lookup was requested without a period count.
    #[error("Must provide number of periods")]
    MissingPeriodCount,

    /// A cache lookup was requested without any boundary.
    #[error("Must provide start or end date")]
    MissingBoundary,

    /// A grid-rounded boundary is not present in the canonical range.
    ///
    /// This indicates an inconsistency between the offset's rounding and its
    /// iteration, or a boundary rounded outside the cache window.
    #[error("Date {date} not found in canonical range")]
    DateNotFound {
        /// The rounded date that was looked up
        date: NaiveDateTime,
    },

    /// Only anchored calendar offsets have a canonical range.
    #[error("Offset {offset} has no canonical range: only anchored calendar offsets are cached")]
    NotCacheable {
        /// The rejected offset
        offset: Offset,
    },

    /// The requested positions fall outside the canonical range.
    #[error("Requested positions [{start_loc}, {end_loc}) fall outside the cached window of {len} dates")]
    OutsideCacheWindow {
        /// Start position (inclusive), may be negative
        start_loc: i64,
        /// End position (exclusive)
        end_loc: i64,
        /// Length of the canonical range
        len: usize,
    },

    /// Date arithmetic left the representable calendar.
    #[error("Date arithmetic overflowed: {details}")]
    DateOutOfRange {
        /// Which computation overflowed
        details: String,
    },

    /// Ranges can only be generated by offsets that move forward.
    #[error("Offset multiplier must be positive, got {n}")]
    InvalidOffsetMultiplier {
        /// The rejected multiplier
        n: i64,
    },

    /// A primary parameter and its alias were both given with different values.
    #[error("Conflicting values for `{primary}` and its alias `{alias}`")]
    ConflictingParameters {
        /// Primary parameter name
        primary: &'static str,
        /// Alias parameter name
        alias: &'static str,
    },

    /// Slice step must be strictly positive.
    #[error("Slice step must be positive, got {step}")]
    InvalidSliceStep {
        /// The rejected step
        step: usize,
    },

    /// A position past the end of the range.
    #[error("Index {index} out of bounds for range of length {len}")]
    IndexOutOfBounds {
        /// The rejected position
        index: usize,
        /// Length of the range
        len: usize,
    },

    /// Elementwise comparison against a sequence of a different length.
    #[error("Cannot compare range of length {expected} with sequence of length {actual}")]
    LengthMismatch {
        /// Length of the range
        expected: usize,
        /// Length of the other operand
        actual: usize,
    },

    /// The operation needs at least one element.
    #[error("Cannot {operation} an empty date range")]
    EmptyRange {
        /// The operation that was attempted
        operation: &'static str,
    },

    /// A pre-built sequence was not strictly increasing.
    #[error("Sequence is not strictly increasing at position {position}")]
    UnsortedSequence {
        /// Index of the first element not greater than its predecessor
        position: usize,
    },

    /// A cache window whose start is not before its end.
    #[error("Invalid cache window: start {start} must be before end {end}")]
    InvalidWindow {
        /// Window start
        start: NaiveDateTime,
        /// Window end
        end: NaiveDateTime,
    },

    /// The offset could not be resolved.
    #[error("Offset error: {0}")]
    Offset(#[from] OffsetError),
}

impl DateRangeError {
    /// Create an `InvalidDate` error.
    pub fn invalid_date(input: impl Into<String>, reason: impl Into<String>) -> Self {
        DateRangeError::InvalidDate {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a `DateOutOfRange` error.
    pub fn date_out_of_range(details: impl Into<String>) -> Self {
        DateRangeError::DateOutOfRange {
            details: details.into(),
        }
    }

    /// Create an `EmptyRange` error for the named operation.
    pub fn empty_range(operation: &'static str) -> Self {
        DateRangeError::EmptyRange { operation }
    }
}
