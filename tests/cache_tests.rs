// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the canonical range cache

mod helpers;

use std::sync::Arc;
use std::thread;

use daterange::{
    CacheStats, DateRange, DateRangeError, DateRangeRequest, Offset, RangeCache,
    RangeCacheConfig, RangeCacheConfigBuilder,
};
use helpers::{dt, isolated_cache};

#[test]
fn test_repeated_requests_build_once() -> anyhow::Result<()> {
    helpers::init_tracing();

    let cache = isolated_cache();
    let first = DateRange::with_cache(
        &DateRangeRequest::new()
            .from_date("2003-01-01")
            .to_date("2003-12-31")
            .offset(Offset::business_month_end()),
        &cache,
    )?;
    let second = DateRange::with_cache(
        &DateRangeRequest::new()
            .from_date("2003-01-01")
            .to_date("2003-12-31")
            .offset(Offset::business_month_end()),
        &cache,
    )?;

    assert_eq!(first, second);
    assert!(first.shares_storage_with(&second));
    assert_eq!(
        cache.stats(),
        CacheStats {
            hits: 1,
            builds: 1,
            entries: 1
        }
    );
    Ok(())
}

#[test]
fn test_one_entry_per_offset() -> anyhow::Result<()> {
    let cache = isolated_cache();
    for offset in helpers::anchored_offsets() {
        for _ in 0..2 {
            cache.get_cached_range(Some(dt(2004, 2, 1)), None, Some(2), Some(offset), None)?;
        }
        assert!(cache.contains(&offset), "{offset}");
    }

    let offsets = helpers::anchored_offsets().len();
    let stats = cache.stats();
    assert_eq!(stats.entries, offsets);
    assert_eq!(stats.builds, offsets as u64);
    assert_eq!(stats.hits, offsets as u64);
    Ok(())
}

#[test]
fn test_time_rule_and_offset_share_entry() -> anyhow::Result<()> {
    let cache = isolated_cache();
    let by_rule = cache.get_cached_range(Some(dt(2004, 1, 1)), None, Some(4), None, Some("EOM"))?;
    let by_offset = cache.get_cached_range(
        Some(dt(2004, 1, 1)),
        None,
        Some(4),
        Some(Offset::business_month_end()),
        None,
    )?;
    assert_eq!(by_rule, by_offset);
    assert_eq!(cache.stats().builds, 1);
    Ok(())
}

#[test]
fn test_concurrent_first_use_builds_once() -> anyhow::Result<()> {
    let cache = Arc::new(isolated_cache());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                cache.get_cached_range(
                    Some(dt(2001, 1, 1 + i)),
                    None,
                    Some(10),
                    Some(Offset::business_day()),
                    None,
                )
            })
        })
        .collect();

    for handle in handles {
        let range = handle
            .join()
            .map_err(|_| anyhow::anyhow!("worker panicked"))??;
        assert_eq!(range.len(), 10);
        assert!(range.has_parent());
    }

    let stats = cache.stats();
    assert_eq!(stats.builds, 1);
    assert_eq!(stats.hits, 7);
    assert_eq!(stats.entries, 1);
    Ok(())
}

#[test]
fn test_concurrent_distinct_offsets() -> anyhow::Result<()> {
    let cache = Arc::new(isolated_cache());
    let offsets = helpers::anchored_offsets();

    let handles: Vec<_> = offsets
        .iter()
        .copied()
        .flat_map(|offset| [offset, offset])
        .map(|offset| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.canonical(offset).map(|range| range.len()))
        })
        .collect();

    for handle in handles {
        let len = handle
            .join()
            .map_err(|_| anyhow::anyhow!("worker panicked"))??;
        assert!(len > 0);
    }

    let stats = cache.stats();
    assert_eq!(stats.builds, offsets.len() as u64);
    assert_eq!(stats.entries, offsets.len());
    Ok(())
}

#[test]
fn test_parent_is_the_canonical_range() -> anyhow::Result<()> {
    let cache = isolated_cache();
    let range = cache.get_cached_range(
        Some(dt(2002, 1, 1)),
        Some(dt(2002, 3, 31)),
        None,
        Some(Offset::month_end()),
        None,
    )?;
    let parent = range
        .parent()
        .ok_or_else(|| anyhow::anyhow!("parent dropped"))?;
    assert_eq!(parent, cache.canonical(Offset::month_end())?);
    assert_eq!(parent.len(), 120);
    assert_eq!(parent.first(), Some(dt(2000, 1, 31)));
    assert!(range.shares_storage_with(&parent));

    // Slices of a cached range keep the parent
    assert!(range.slice(1..).has_parent());
    Ok(())
}

#[test]
fn test_slice_outlives_cache() -> anyhow::Result<()> {
    let cache = isolated_cache();
    let range = cache.get_cached_range(
        Some(dt(2002, 1, 1)),
        None,
        Some(3),
        Some(Offset::month_end()),
        None,
    )?;
    drop(cache);

    // The slice holds the canonical buffer itself, so the parent stays reachable
    assert_eq!(range.len(), 3);
    assert!(range.has_parent());
    assert!(range.parent().is_some());
    Ok(())
}

#[test]
fn test_outside_window_is_rejected() {
    let cache = isolated_cache();
    let err = cache
        .get_cached_range(
            Some(dt(2009, 11, 1)),
            None,
            Some(5),
            Some(Offset::month_end()),
            None,
        )
        .unwrap_err();
    assert_eq!(
        err,
        DateRangeError::OutsideCacheWindow {
            start_loc: 118,
            end_loc: 123,
            len: 120
        }
    );

    let err = cache
        .get_cached_range(
            Some(dt(2011, 1, 1)),
            None,
            Some(1),
            Some(Offset::month_end()),
            None,
        )
        .unwrap_err();
    assert!(matches!(err, DateRangeError::DateNotFound { .. }));
}

#[test]
fn test_global_cache_is_shared() -> anyhow::Result<()> {
    let range = DateRange::get_cached_range(
        Some(dt(1990, 1, 1)),
        None,
        Some(5),
        None,
        Some("A@DEC"),
    )?;
    assert_eq!(range.first(), Some(dt(1990, 12, 31)));
    assert!(RangeCache::global().contains(&Offset::year_end()));
    assert!(std::ptr::eq(RangeCache::global(), RangeCache::global()));
    assert_eq!(RangeCache::global().config(), &RangeCacheConfig::default());
    Ok(())
}

#[test]
fn test_config_and_stats_serialize() -> anyhow::Result<()> {
    let config = RangeCacheConfigBuilder::new()
        .window_start("2000-01-01")
        .window_end("2001-01-01")
        .build()?;
    let json = serde_json::to_string(&config)?;
    let restored: RangeCacheConfig = serde_json::from_str(&json)?;
    assert_eq!(restored, config);

    let stats = CacheStats {
        hits: 3,
        builds: 1,
        entries: 1,
    };
    let value = serde_json::to_value(stats)?;
    assert_eq!(value["hits"], 3);
    assert_eq!(value["builds"], 1);
    assert!((stats.hit_rate() - 75.0).abs() < f64::EPSILON);
    Ok(())
}

#[test]
fn test_invalid_window_rejected() {
    let err = RangeCacheConfigBuilder::new()
        .window_start("2010-01-01")
        .window_end("2000-01-01")
        .build()
        .unwrap_err();
    assert!(matches!(err, DateRangeError::InvalidWindow { .. }));
}
