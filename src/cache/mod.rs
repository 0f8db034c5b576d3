// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Canonical range cache.
//!
//! For every anchored offset the cache holds one canonical range covering the
//! configured window. Cacheable requests are answered by slicing the canonical
//! range instead of generating dates again, so long ranges over the same grid
//! share a single buffer.
//!
//! Entries are built lazily on first use and live as long as the cache. There
//! is no eviction and no invalidation: a canonical range depends only on its
//! offset and the window, both of which are immutable.
//!
//! # Thread Safety
//!
//! The entry map is guarded by a mutex that is only held long enough to fetch
//! the per-offset slot. Population of a slot is serialized by a per-offset
//! [`OnceLock`], so concurrent first requests for the same offset build the
//! canonical range exactly once while other offsets proceed independently.
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use daterange::{Offset, RangeCache, RangeCacheConfig};
//!
//! let cache = RangeCache::new(RangeCacheConfig::default());
//! let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//!
//! let range = cache
//!     .get_cached_range(Some(start), None, Some(3), Some(Offset::month_end()), None)
//!     .unwrap();
//! assert_eq!(range.len(), 3);
//! assert!(range.has_parent());
//!
//! let stats = cache.stats();
//! assert_eq!(stats.builds, 1);
//! assert_eq!(stats.entries, 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RangeCacheConfig;
use crate::dates::normalize;
use crate::errors::DateRangeError;
use crate::offsets::Offset;
use crate::range::{resolve_offset, DateRange, LazyDateRange};
use crate::tracing::spans;

type CanonicalSlot = Arc<OnceLock<Arc<[NaiveDateTime]>>>;

/// Statistics about cache usage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of lookups answered by an existing canonical range
    pub hits: u64,
    /// Number of canonical ranges built
    pub builds: u64,
    /// Current number of canonical ranges held
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.builds;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, builds={}, entries={}, hit_rate={:.1}%",
            self.hits,
            self.builds,
            self.entries,
            self.hit_rate()
        )
    }
}

/// Internal state for the range cache
#[derive(Debug, Default)]
struct RangeCacheState {
    /// Canonical range slot per offset
    entries: HashMap<Offset, CanonicalSlot>,
    /// Cache statistics
    stats: CacheStats,
}

/// Cache of canonical ranges keyed by offset.
///
/// Use [`RangeCache::global`] for the process-wide instance that
/// [`DateRange::new`] consults, or build a private instance with a custom
/// window and pass it to [`DateRange::with_cache`].
#[derive(Debug)]
pub struct RangeCache {
    config: RangeCacheConfig,
    state: Mutex<RangeCacheState>,
}

impl RangeCache {
    /// Creates an empty cache over the configured window.
    pub fn new(config: RangeCacheConfig) -> Self {
        Self {
            config,
            state: Mutex::new(RangeCacheState::default()),
        }
    }

    /// The process-wide cache, using the default window.
    pub fn global() -> &'static RangeCache {
        static GLOBAL: OnceLock<RangeCache> = OnceLock::new();
        GLOBAL.get_or_init(RangeCache::default)
    }

    /// The window canonical ranges cover.
    pub fn config(&self) -> &RangeCacheConfig {
        &self.config
    }

    /// Returns current cache statistics
    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.stats
    }

    /// Whether the canonical range for `offset` has been built.
    pub fn contains(&self, offset: &Offset) -> bool {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state
            .entries
            .get(offset)
            .is_some_and(|slot| slot.get().is_some())
    }

    /// The canonical range for `offset`, building it on first use.
    ///
    /// # Errors
    ///
    /// - [`DateRangeError::InvalidOffsetMultiplier`] for offsets that do not
    ///   move forward
    /// - [`DateRangeError::NotCacheable`] for tick offsets and offsets that are
    ///   not anchored, whose canonical range would be unbounded in size or
    ///   off the calendar grid
    pub fn canonical(&self, offset: Offset) -> Result<DateRange, DateRangeError> {
        let data = self.canonical_data(offset)?;
        Ok(DateRange::from_parts(data, offset))
    }

    /// Resolves a range by slicing the canonical range of its offset.
    ///
    /// A time rule, when given, replaces `offset`. `start` is rolled forward
    /// and `end` rolled back onto the grid before their positions are looked
    /// up; with only one boundary, `periods` dates are taken from it. When both
    /// boundaries are given `periods` is ignored and a crossed pair yields an
    /// empty range.
    ///
    /// The result shares storage with the canonical range and records it as
    /// its parent.
    ///
    /// # Errors
    ///
    /// - [`DateRangeError::Offset`] for an unknown time rule
    /// - [`DateRangeError::MissingOffset`] without an offset or time rule
    /// - [`DateRangeError::NotCacheable`] for tick offsets and offsets that
    ///   are not anchored
    /// - [`DateRangeError::MissingBoundary`] without any boundary
    /// - [`DateRangeError::MissingPeriodCount`] with one boundary and no
    ///   period count
    /// - [`DateRangeError::DateNotFound`] when a rolled boundary is not in the
    ///   canonical range, i.e. it lies outside the window
    /// - [`DateRangeError::OutsideCacheWindow`] when the requested periods
    ///   run past either end of the canonical range
    pub fn get_cached_range(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        periods: Option<usize>,
        offset: Option<Offset>,
        time_rule: Option<&str>,
    ) -> Result<DateRange, DateRangeError> {
        let offset = match time_rule {
            Some(_) => resolve_offset(offset.unwrap_or_default(), time_rule)?.0,
            None => offset.ok_or(DateRangeError::MissingOffset)?,
        };
        let span = spans::get_cached_range(&offset, start, end, periods);
        let _guard = span.enter();

        if start.is_none() && end.is_none() {
            return Err(DateRangeError::MissingBoundary);
        }
        if start.is_none() || end.is_none() {
            periods.ok_or(DateRangeError::MissingPeriodCount)?;
        }

        let canonical = self.canonical_data(offset)?;
        let grid_point = |dt: NaiveDateTime| {
            if offset.normalize_first() {
                normalize(dt)
            } else {
                dt
            }
        };
        let locate = |date: NaiveDateTime| -> Result<i64, DateRangeError> {
            canonical
                .binary_search(&date)
                .map(to_loc)
                .map_err(|_| DateRangeError::DateNotFound { date })
        };
        let rolled_forward = |dt: NaiveDateTime| {
            offset
                .roll_forward(grid_point(dt))
                .ok_or_else(|| DateRangeError::date_out_of_range("rolling start date forward"))
        };
        let rolled_back = |dt: NaiveDateTime| {
            offset
                .roll_back(grid_point(dt))
                .ok_or_else(|| DateRangeError::date_out_of_range("rolling end date back"))
        };
        let periods = periods.map(to_loc).unwrap_or_default();

        let (start_loc, end_loc) = match (start, end) {
            (Some(start), Some(end)) => {
                let (first, last) = (rolled_forward(start)?, rolled_back(end)?);
                if last < first {
                    // Boundaries crossed on the grid: empty, positioned at `first`
                    let at = to_loc(canonical.partition_point(|d| *d < first));
                    (at, at)
                } else {
                    (locate(first)?, locate(last)? + 1)
                }
            }
            (Some(start), None) => {
                let start_loc = locate(rolled_forward(start)?)?;
                (start_loc, start_loc.saturating_add(periods))
            }
            (None, Some(end)) => {
                let end_loc = locate(rolled_back(end)?)? + 1;
                (end_loc.saturating_sub(periods), end_loc)
            }
            (None, None) => return Err(DateRangeError::MissingBoundary),
        };

        let len = canonical.len();
        if start_loc < 0 || end_loc > to_loc(len) {
            return Err(DateRangeError::OutsideCacheWindow {
                start_loc,
                end_loc,
                len,
            });
        }

        debug!(start_loc, end_loc, "Slicing canonical range");
        // Both positions are within [0, len] here
        let (start_loc, end_loc) = (start_loc as usize, end_loc as usize);
        Ok(DateRange::sliced_from_canonical(
            &canonical, start_loc, end_loc, offset,
        ))
    }

    /// Fetches the canonical buffer for `offset`, building it once.
    fn canonical_data(&self, offset: Offset) -> Result<Arc<[NaiveDateTime]>, DateRangeError> {
        let generator = LazyDateRange::from_resolved(
            Some(self.config.window_start()),
            Some(self.config.window_end()),
            None,
            offset,
            offset.time_rule(),
        )?;
        if offset.is_tick() || !offset.is_anchored() {
            return Err(DateRangeError::NotCacheable { offset });
        }

        let slot = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(state.entries.entry(offset).or_default())
        };

        let mut built = false;
        let data = slot.get_or_init(|| {
            built = true;
            self.build_canonical(&offset, generator)
        });

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if built {
            state.stats.builds += 1;
        } else {
            debug!(offset = %offset, "Canonical range cache hit");
            state.stats.hits += 1;
        }
        state.stats.entries = state.entries.len();

        Ok(Arc::clone(data))
    }

    fn build_canonical(&self, offset: &Offset, generator: LazyDateRange) -> Arc<[NaiveDateTime]> {
        let window_end = self.config.window_end();
        let span = spans::build_canonical_range(offset, self.config.window_start(), window_end);
        let _guard = span.enter();

        let data: Arc<[NaiveDateTime]> = generator
            .into_iter()
            .take_while(|dt| *dt < window_end)
            .collect();
        info!(offset = %offset, len = data.len(), "Built canonical range");
        data
    }
}

impl Default for RangeCache {
    fn default() -> Self {
        Self::new(RangeCacheConfig::default())
    }
}

fn to_loc(position: usize) -> i64 {
    i64::try_from(position).unwrap_or(i64::MAX)
}
