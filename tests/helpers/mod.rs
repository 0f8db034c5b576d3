// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for daterange integration tests
//!
//! Shared date constructors, offset strategies and log initialization.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use daterange::{Offset, RangeCache, RangeCacheConfigBuilder};
use proptest::prelude::*;

/// Midnight on the given calendar day
pub fn dt(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day}"))
}

/// Install a test subscriber honoring `RUST_LOG`
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A private cache over 2000-01-01 .. 2010-01-01
///
/// Tests that inspect cache statistics use their own instance so they do not
/// observe the process-wide cache.
pub fn isolated_cache() -> RangeCache {
    let config = RangeCacheConfigBuilder::new()
        .window_start("2000-01-01")
        .window_end("2010-01-01")
        .build()
        .expect("valid window");
    RangeCache::new(config)
}

/// Every anchored offset with a canonical cache key
pub fn anchored_offsets() -> Vec<Offset> {
    vec![
        Offset::business_day(),
        Offset::weekly(Weekday::Mon),
        Offset::weekly(Weekday::Wed),
        Offset::weekly(Weekday::Fri),
        Offset::month_end(),
        Offset::business_month_end(),
        Offset::quarter_end(1),
        Offset::quarter_end(2),
        Offset::quarter_end(3),
        Offset::year_end(),
    ]
}

/// Strategy over anchored offsets
pub fn arb_anchored_offset() -> impl Strategy<Value = Offset> {
    proptest::sample::select(anchored_offsets())
}

/// Strategy over all forward-moving offsets, including ticks and multiples
pub fn arb_offset() -> impl Strategy<Value = Offset> {
    prop_oneof![
        arb_anchored_offset(),
        (1i64..=3).prop_map(|n| Offset::business_day() * n),
        (1i64..=3).prop_map(|n| Offset::month_end() * n),
        (1i64..=5).prop_map(|n| Offset::day() * n),
        (1i64..=48).prop_map(|n| Offset::hour() * n),
    ]
}

/// Strategy over midnight dates between 1960 and 2025
pub fn arb_date() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..(65 * 365)).prop_map(|days| dt(1960, 1, 1) + chrono::TimeDelta::days(days))
}
