// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for date ranges
//!
//! These tests use proptest to validate the range invariants across offsets,
//! boundaries and period counts.

mod helpers;

use chrono::TimeDelta;
use daterange::{DateRange, DateRangeRequest, GeneratorParams, LazyDateRange};
use helpers::{arb_anchored_offset, arb_date, arb_offset};
use proptest::prelude::*;

proptest! {
    /// Property: Every generated date lies on the offset's grid
    #[test]
    fn prop_dates_on_grid(
        offset in arb_offset(),
        start in arb_date(),
        periods in 0usize..60,
    ) {
        let range = LazyDateRange::new(
            &GeneratorParams::new().from_date(start).periods(periods).offset(offset),
        ).unwrap();
        for date in range {
            prop_assert!(offset.on_offset(date), "{date} not on {offset}");
        }
    }

    /// Property: Consecutive dates are exactly one offset apart
    #[test]
    fn prop_adjacent_dates_one_step_apart(
        offset in arb_offset(),
        start in arb_date(),
        periods in 2usize..60,
    ) {
        let dates: Vec<_> = LazyDateRange::new(
            &GeneratorParams::new().from_date(start).periods(periods).offset(offset),
        ).unwrap().into_iter().collect();
        prop_assert_eq!(dates.len(), periods);
        for pair in dates.windows(2) {
            prop_assert!(pair[0] < pair[1]);
            prop_assert_eq!(offset.apply(pair[0], 1), Some(pair[1]));
        }
    }

    /// Property: Dates stay within inclusive boundaries, and on-grid
    /// boundaries are themselves included
    #[test]
    fn prop_inclusive_boundaries(
        offset in arb_anchored_offset(),
        start in arb_date(),
        days in 0i64..400,
    ) {
        let end = start + TimeDelta::days(days);
        let dates: Vec<_> = LazyDateRange::new(
            &GeneratorParams::new().from_date(start).to_date(end).offset(offset),
        ).unwrap().into_iter().collect();

        for date in &dates {
            prop_assert!(*date >= start && *date <= end);
        }
        if offset.on_offset(start) {
            prop_assert_eq!(dates.first(), Some(&start));
        }
        if offset.on_offset(end) && start <= end {
            prop_assert_eq!(dates.last(), Some(&end));
        }
    }

    /// Property: An off-grid start snaps to the next grid point
    #[test]
    fn prop_start_snaps_forward(
        offset in arb_anchored_offset(),
        start in arb_date(),
    ) {
        let range = LazyDateRange::new(
            &GeneratorParams::new().from_date(start).periods(1).offset(offset),
        ).unwrap();
        let first = range.into_iter().next().unwrap();
        prop_assert!(first >= start);
        prop_assert_eq!(Some(first), offset.roll_forward(start));
    }

    /// Property: Boundaries that cross after snapping give an empty range
    #[test]
    fn prop_crossed_boundaries_empty(
        offset in arb_anchored_offset(),
        end in arb_date(),
        gap in 1i64..400,
    ) {
        let start = end + TimeDelta::days(gap);
        let dates: Vec<_> = LazyDateRange::new(
            &GeneratorParams::new().from_date(start).to_date(end).offset(offset),
        ).unwrap().into_iter().collect();
        prop_assert!(dates.is_empty());

        let materialized = DateRange::new(
            &DateRangeRequest::new().from_date(start).to_date(end).offset(offset),
        ).unwrap();
        prop_assert!(materialized.is_empty());
    }

    /// Property: Cached and generated ranges agree, whatever the time of day
    /// on either boundary
    #[test]
    fn prop_cache_matches_generator(
        offset in arb_anchored_offset(),
        start_day in 0i64..3000,
        days in 0i64..500,
        start_secs in 0i64..86_400,
        end_secs in 0i64..86_400,
    ) {
        // Both boundaries strictly inside the 2000..2010 window
        let start_midnight = helpers::dt(2000, 1, 2) + TimeDelta::days(start_day);
        let start = start_midnight + TimeDelta::seconds(start_secs);
        let end = start_midnight + TimeDelta::days(days) + TimeDelta::seconds(end_secs);
        let cache = helpers::isolated_cache();

        let cached = DateRange::with_cache(
            &DateRangeRequest::new().from_date(start).to_date(end).offset(offset),
            &cache,
        ).unwrap();
        let generated: Vec<_> = LazyDateRange::new(
            &GeneratorParams::new().from_date(start).to_date(end).offset(offset),
        ).unwrap().into_iter().collect();

        prop_assert!(cached.has_parent());
        prop_assert_eq!(cached.to_vec(), generated);
        prop_assert_eq!(cache.stats().builds, 1);
    }

    /// Property: Slicing preserves elements and offset
    #[test]
    fn prop_slice_preserves_elements(
        offset in arb_offset(),
        start in arb_date(),
        periods in 0usize..60,
        lo in 0usize..70,
        hi in 0usize..70,
    ) {
        let range = DateRange::new(
            &DateRangeRequest::new().from_date(start).periods(periods).offset(offset),
        ).unwrap();
        let slice = range.slice(lo..hi);
        prop_assert_eq!(slice.offset(), range.offset());

        let expected: Vec<_> = range.to_vec().into_iter().skip(lo).take(hi.saturating_sub(lo)).collect();
        prop_assert_eq!(slice.to_vec(), expected);
    }

    /// Property: Shifting forward then back restores the range
    #[test]
    fn prop_shift_round_trip(
        offset in arb_offset(),
        start in arb_date(),
        periods in 1usize..40,
        n in 1i64..50,
    ) {
        let range = DateRange::new(
            &DateRangeRequest::new().from_date(start).periods(periods).offset(offset),
        ).unwrap();
        let shifted = range.shift(n).unwrap();
        prop_assert_eq!(shifted.len(), range.len());
        prop_assert_eq!(shifted.first(), offset.apply(range.first().unwrap(), n));
        prop_assert_eq!(shifted.shift(-n).unwrap(), range);
    }
}
