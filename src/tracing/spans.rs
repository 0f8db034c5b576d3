// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for date range operations.
//!
//! Telemetry concerns stay out of the range logic: each instrumented operation
//! has a span helper here, and the operation enters it on entry.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     let _guard = span.enter();
//!     // Range logic here
//! }
//! ```

use chrono::NaiveDateTime;
use tracing::Span;

use crate::offsets::Offset;

/// Create span for materializing a range by running the lazy generator.
///
/// Parent: construct_range span
/// Children: None
#[inline]
pub(crate) fn materialize_range(
    offset: &Offset,
    from_date: NaiveDateTime,
    to_date: NaiveDateTime,
) -> Span {
    tracing::debug_span!(
        "daterange.materialize_range",
        offset = %offset,
        from_date = %from_date,
        to_date = %to_date,
    )
}

/// Create span for constructing a date range from request parameters.
///
/// This is the main public API entry point for range construction.
///
/// Parent: None (root span for this operation)
/// Children: get_cached_range or materialize_range span
#[inline]
pub(crate) fn construct_range(
    offset: &Offset,
    from_date: Option<NaiveDateTime>,
    to_date: Option<NaiveDateTime>,
    periods: Option<usize>,
) -> Span {
    tracing::debug_span!(
        "daterange.construct_range",
        offset = %offset,
        from_date = ?from_date,
        to_date = ?to_date,
        periods = ?periods,
    )
}

/// Create span for resolving a request against a canonical range.
///
/// Parent: construct_range span, or None when called directly
/// Children: build_canonical_range span on first use of an offset
#[inline]
pub(crate) fn get_cached_range(
    offset: &Offset,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    periods: Option<usize>,
) -> Span {
    tracing::debug_span!(
        "daterange.get_cached_range",
        offset = %offset,
        start = ?start,
        end = ?end,
        periods = ?periods,
    )
}

/// Create span for building the canonical range of an offset.
///
/// Runs at most once per offset per cache.
///
/// Parent: get_cached_range span
/// Children: None
#[inline]
pub(crate) fn build_canonical_range(
    offset: &Offset,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Span {
    tracing::info_span!(
        "daterange.build_canonical_range",
        offset = %offset,
        window_start = %window_start,
        window_end = %window_end,
    )
}

/// Create span for shifting a range by whole grid steps.
///
/// Parent: None (root span for this operation)
/// Children: construct_range span for the generated head or tail
#[inline]
pub(crate) fn shift_range(offset: &Offset, n: i64, len: usize) -> Span {
    tracing::debug_span!(
        "daterange.shift_range",
        offset = %offset,
        n = n,
        len = len,
    )
}
