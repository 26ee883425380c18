//! Week grid builder
//!
//! Partitions an inclusive date range into complete calendar weeks
//! honoring a configurable first-day-of-week. The first and last weeks
//! may pad outside the nominal range so that every emitted week holds a
//! full seven days.

use chrono::{Datelike, Duration, NaiveDate};
use log::debug;

use crate::error::{Error, Result};

/// The start of the week containing `date`, for the given week anchor
/// (0 = Sunday .. 6 = Saturday)
pub fn start_of_week(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let diff = (date.weekday().num_days_from_sunday() + 7 - first_day_of_week as u32) % 7;
    date - Duration::days(diff as i64)
}

/// The end of the week containing `date`: six days after its start
pub fn end_of_week(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    start_of_week(date, first_day_of_week) + Duration::days(6)
}

/// Build the ordered week grid covering `[start, end]` inclusive.
///
/// Weeks are contiguous and ascending, each exactly seven days; a short
/// trailing week cannot occur with the inclusive end-of-week bound but is
/// still emitted rather than dropped if the walk ever ends mid-week.
/// An inverted range (`start > end`) yields an empty grid.
pub fn build(
    start: NaiveDate,
    end: NaiveDate,
    first_day_of_week: u8,
) -> Result<Vec<Vec<NaiveDate>>> {
    if first_day_of_week > 6 {
        return Err(Error::config(format!(
            "first_day_of_week must be in 0..=6, got {}",
            first_day_of_week
        )));
    }
    if start > end {
        return Ok(Vec::new());
    }

    let grid_start = start_of_week(start, first_day_of_week);
    let grid_end = end_of_week(end, first_day_of_week);

    let mut weeks = Vec::new();
    let mut current_week = Vec::with_capacity(7);
    let mut current = grid_start;

    while current <= grid_end {
        current_week.push(current);
        if current_week.len() == 7 {
            weeks.push(std::mem::take(&mut current_week));
            current_week = Vec::with_capacity(7);
        }
        current += Duration::days(1);
    }
    if !current_week.is_empty() {
        weeks.push(current_week);
    }

    debug!(
        "week grid: {} weeks covering {} -> {}",
        weeks.len(),
        grid_start,
        grid_end
    );
    Ok(weeks)
}
