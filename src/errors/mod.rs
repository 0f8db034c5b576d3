// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the daterange library.
//!
//! Errors are split by the layer that raises them:
//!
//! - [`OffsetError`] - Errors from resolving offsets (unknown time rules)
//! - [`DateRangeError`] - Errors from building, slicing, comparing and shifting
//!   date ranges, including cache lookups
//!
//! `OffsetError` converts into `DateRangeError` via `From`, so `?` works across
//! both layers.
//!
//! # Examples
//!
//! ```rust
//! use daterange::{DateRange, DateRangeError, DateRangeRequest};
//!
//! let request = DateRangeRequest::new().from_date("2021-01-01");
//! match DateRange::new(&request) {
//!     Err(DateRangeError::InsufficientParameters) => {}
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

mod offset;
mod range;

pub use offset::OffsetError;
pub use range::DateRangeError;
