/// Example walking through business-day and month-end ranges
///
/// This example shows how to:
/// 1. Build a business-day range from a start date and a period count
/// 2. Resolve cacheable requests against the shared canonical ranges
/// 3. Slice, compare and shift a range
/// 4. Inspect cache statistics
///
/// Run with:
/// ```bash
/// START=2021-01-01 \
/// PERIODS=10 \
/// cargo run --example business_days
/// ```
use anyhow::{Context, Result};
use daterange::{DateRange, DateRangeRequest, Offset, RangeCache};
use std::env;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let start = env::var("START").unwrap_or_else(|_| "2021-01-01".to_string());
    let periods: usize = env::var("PERIODS")
        .unwrap_or_else(|_| "10".to_string())
        .parse()
        .context("PERIODS must be a non-negative integer")?;

    info!(start, periods, "Starting business day example");

    // One-sided requests are always generated
    let bdays = DateRange::new(&DateRangeRequest::new().from_date(start.as_str()).periods(periods))?;
    println!("{bdays}\n");

    // Two in-window boundaries with an anchored offset are served from the cache
    let month_ends = DateRange::new(
        &DateRangeRequest::new()
            .from_date(start.as_str())
            .to_date("2021-12-31")
            .offset(Offset::month_end()),
    )?;
    println!("{month_ends}");
    println!("cached: {}\n", month_ends.has_parent());

    // Quarter ends are every third month end
    let quarters = month_ends.slice_step(2.., 3)?;
    println!("{quarters}\n");

    let second_half = month_ends.ge(chrono::NaiveDate::from_ymd_opt(2021, 7, 1).context("bad date")?)?;
    let selected = month_ends.filter(&second_half)?;
    println!("second half: {} month ends", selected.len());

    let next_week = bdays.shift(5)?;
    println!("\nshifted by 5:\n{next_week}");

    info!(stats = %RangeCache::global().stats(), "Done");
    Ok(())
}
