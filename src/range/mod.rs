// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Date range generation and materialized ranges.
//!
//! - [`LazyDateRange`]: single-pass generator over an offset's grid
//! - [`DateRange`]: materialized, sliceable range that may be served from the
//!   canonical cache
//! - [`DateIndex`]: plain ordered dates produced by fancy indexing

mod compare;
mod index;
mod lazy;
mod materialized;
mod request;

pub use compare::{CmpOp, Operand};
pub use index::DateIndex;
pub use lazy::{GeneratorParams, LazyDateRange, LazyDateRangeIter};
pub use materialized::{DateRange, DateRangeIter};
pub use request::DateRangeRequest;

pub(crate) use lazy::resolve_offset;
