// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Fixed-frequency date ranges.
//!
//! A date range is a strictly increasing sequence of dates lying on the grid of
//! an [`Offset`] (business days, month ends, weekly on a given weekday, ...),
//! bounded by a start date, an end date and/or a period count.
//!
//! # Layout
//!
//! - [`offsets`]: the grid rules ranges walk along, and named time rules
//! - [`LazyDateRange`]: single-pass generator with inclusive boundaries
//! - [`DateRange`]: materialized range with slicing, comparisons and shifting
//! - [`RangeCache`]: canonical ranges per anchored offset, shared by slices
//! - [`config`]: the window canonical ranges cover
//! - [`errors`]: error types
//!
//! # Quick Start
//!
//! ```rust
//! use daterange::{DateRange, DateRangeRequest, Offset};
//!
//! // Month ends of 2021, served from the canonical cache
//! let request = DateRangeRequest::new()
//!     .from_date("2021-01-01")
//!     .to_date("2021-12-31")
//!     .offset(Offset::month_end());
//! let range = DateRange::new(&request).unwrap();
//!
//! assert_eq!(range.len(), 12);
//! assert!(range.has_parent());
//! assert_eq!(range[1].to_string(), "2021-02-28 00:00:00");
//!
//! // Shift one month forward
//! let next = range.shift(1).unwrap();
//! assert_eq!(next.last().unwrap().to_string(), "2022-01-31 00:00:00");
//! ```

pub mod cache;
pub mod config;
pub mod dates;
pub mod errors;
pub mod offsets;
pub mod range;
mod tracing;

pub use cache::{CacheStats, RangeCache};
pub use config::{RangeCacheConfig, RangeCacheConfigBuilder};
pub use dates::{normalize, parse_date, DateInput};
pub use errors::{DateRangeError, OffsetError};
pub use offsets::{Offset, OffsetKind};
pub use range::{
    CmpOp, DateIndex, DateRange, DateRangeIter, DateRangeRequest, GeneratorParams, LazyDateRange,
    LazyDateRangeIter, Operand,
};
