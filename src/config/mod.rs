// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for the canonical range cache
//!
//! The cache precomputes one canonical range per anchored offset over a fixed
//! window. The window defaults to 1950-01-01 (inclusive) through 2030-01-01
//! (exclusive); a custom window is only needed for injected caches, the
//! process-wide cache always uses the defaults.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use daterange::RangeCacheConfig;
//! use daterange::config::constants::{CACHE_END, CACHE_START};
//!
//! let config = RangeCacheConfig::default();
//! assert_eq!(config.window_start(), CACHE_START);
//! assert_eq!(config.window_end(), CACHE_END);
//! ```
//!
//! # Example: Custom window
//!
//! ```rust
//! use chrono::NaiveDate;
//! use daterange::RangeCacheConfigBuilder;
//!
//! let config = RangeCacheConfigBuilder::new()
//!     .window_start(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
//!     .window_end(NaiveDate::from_ymd_opt(2010, 1, 1).unwrap())
//!     .build()
//!     .unwrap();
//! let inside = NaiveDate::from_ymd_opt(2005, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! assert!(config.contains_strictly(inside));
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::dates::DateInput;
use crate::errors::DateRangeError;

pub mod constants;

use constants::{CACHE_END, CACHE_START};

/// Window covered by canonical ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeCacheConfig {
    /// First instant of the window (inclusive)
    window_start: NaiveDateTime,

    /// End of the window (exclusive)
    window_end: NaiveDateTime,
}

impl Default for RangeCacheConfig {
    fn default() -> Self {
        Self {
            window_start: CACHE_START,
            window_end: CACHE_END,
        }
    }
}

impl RangeCacheConfig {
    /// Start of the window (inclusive).
    pub fn window_start(&self) -> NaiveDateTime {
        self.window_start
    }

    /// End of the window (exclusive).
    pub fn window_end(&self) -> NaiveDateTime {
        self.window_end
    }

    /// Whether `dt` lies strictly inside the window.
    ///
    /// Cache eligibility uses strict comparison on both sides: a request
    /// starting exactly on the window start falls back to generation.
    pub fn contains_strictly(&self, dt: NaiveDateTime) -> bool {
        dt > self.window_start && dt < self.window_end
    }
}

/// Builder for [`RangeCacheConfig`]
///
/// # Example
///
/// ```rust
/// use daterange::RangeCacheConfigBuilder;
///
/// let config = RangeCacheConfigBuilder::new()
///     .window_start("1990-01-01")
///     .build()
///     .unwrap();
/// assert_eq!(config.window_start().to_string(), "1990-01-01 00:00:00");
/// ```
#[derive(Debug, Default)]
pub struct RangeCacheConfigBuilder {
    window_start: Option<DateInput>,
    window_end: Option<DateInput>,
}

impl RangeCacheConfigBuilder {
    /// Create a new builder with the default window
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first instant of the window (inclusive)
    pub fn window_start(mut self, start: impl Into<DateInput>) -> Self {
        self.window_start = Some(start.into());
        self
    }

    /// Set the end of the window (exclusive)
    pub fn window_end(mut self, end: impl Into<DateInput>) -> Self {
        self.window_end = Some(end.into());
        self
    }

    /// Build the final configuration
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::InvalidDate`] for unparsable bounds and
    /// [`DateRangeError::InvalidWindow`] unless start is before end.
    pub fn build(self) -> Result<RangeCacheConfig, DateRangeError> {
        let start = match self.window_start {
            Some(input) => input.resolve()?,
            None => CACHE_START,
        };
        let end = match self.window_end {
            Some(input) => input.resolve()?,
            None => CACHE_END,
        };

        if start >= end {
            return Err(DateRangeError::InvalidWindow { start, end });
        }

        Ok(RangeCacheConfig {
            window_start: start,
            window_end: end,
        })
    }
}
