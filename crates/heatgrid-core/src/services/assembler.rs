//! Heatmap assembler
//!
//! Composes the pipeline: resolve the effective date range, build the
//! day index and week grid, then annotate every cell with its count,
//! color, today flag, and title. Pure with respect to its inputs apart
//! from reading the current UTC date for range fallback and the
//! `is_today` flag.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use log::debug;

use crate::config::HeatmapOptions;
use crate::error::{Error, Result};
use crate::locale;
use crate::models::{date_key, DayCell, Record, RenderCell, RenderGrid, RenderWeek};
use crate::services::color_scale::{ColorResolver, ColorScale};
use crate::services::day_index::DayIndex;
use crate::services::week_grid;

/// Effective inclusive range for a render pass.
///
/// Precedence: explicit `start_date`/`end_date`, then fixed-year mode,
/// then inference from the records (`min(date)` to `max(date) + 1 day`),
/// then the current UTC calendar year.
fn resolve_range(records: &[Record], options: &HeatmapOptions) -> Result<(NaiveDate, NaiveDate)> {
    let year_bounds = |year: i32| -> Result<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| Error::config(format!("invalid year: {}", year)))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| Error::config(format!("invalid year: {}", year)))?;
        Ok((start, end))
    };

    let inferred = infer_range(records)?;
    let (fallback_start, fallback_end) = match options.year {
        Some(year) => year_bounds(year)?,
        None => match inferred {
            Some(range) => range,
            None => year_bounds(Utc::now().year())?,
        },
    };

    Ok((
        options.start_date.unwrap_or(fallback_start),
        options.end_date.unwrap_or(fallback_end),
    ))
}

/// Data-driven range: earliest record day to latest record day plus one
fn infer_range(records: &[Record]) -> Result<Option<(NaiveDate, NaiveDate)>> {
    let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
    for record in records {
        let key = date_key(&record.date)?;
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(key), max.max(key)),
            None => (key, key),
        });
    }
    Ok(bounds.map(|(min, max)| (min, max + Duration::days(1))))
}

/// Run the full pipeline over one set of records.
///
/// Every cell of the resulting grid is annotated; no cell escapes the
/// pipeline without a count and a resolved color. Errors abort the pass
/// without producing a partial grid.
pub fn assemble(records: &[Record], options: &HeatmapOptions) -> Result<RenderGrid> {
    let scale = ColorScale::new(options.colors.clone(), options.color_mode)?;
    let first_day_of_week = options.resolved_first_day_of_week();

    let index = DayIndex::build(records)?;
    let (start, end) = resolve_range(records, options)?;
    debug!(
        "assembling grid: {} records over {} -> {}, anchor {}",
        records.len(),
        start,
        end,
        first_day_of_week
    );

    let weeks = week_grid::build(start, end, first_day_of_week)?;
    let today = Utc::now().date_naive();
    let mut resolver = ColorResolver::new(&scale, index.min_count(), index.max_count());

    let mut rendered_weeks = Vec::with_capacity(weeks.len());
    let mut last_month_label: Option<u32> = None;

    for week in weeks {
        // A month label belongs to the week holding that month's first day
        let month_label = week
            .iter()
            .find(|d| d.day() == 1)
            .map(|d| d.month0())
            .filter(|month| last_month_label != Some(*month))
            .map(|month| {
                last_month_label = Some(month);
                locale::month_abbrev(&options.locale, month as usize).to_string()
            });

        let cells = week
            .into_iter()
            .map(|date| DayCell {
                date,
                count: index.get(date),
            })
            .map(|cell| {
                let color = resolver.resolve(cell.count).to_string();
                let title = match &options.title_formatter {
                    Some(formatter) => formatter(cell.date, cell.count),
                    None => format!(
                        "Date: {}, Entries: {}",
                        cell.date.format("%Y-%m-%d"),
                        cell.count
                    ),
                };
                RenderCell {
                    date: cell.date,
                    count: cell.count,
                    color,
                    is_today: cell.date == today,
                    title,
                }
            })
            .collect();

        rendered_weeks.push(RenderWeek { cells, month_label });
    }

    Ok(RenderGrid {
        weeks: rendered_weeks,
        day_labels: locale::day_labels(&options.locale, first_day_of_week),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::color_scale::ColorBucket;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn abc_buckets() -> Vec<ColorBucket> {
        vec![
            ColorBucket::new(0.0, "a"),
            ColorBucket::new(0.5, "b"),
            ColorBucket::new(1.0, "c"),
        ]
    }

    fn cell_color(grid: &RenderGrid, target: NaiveDate) -> String {
        grid.weeks
            .iter()
            .flat_map(|w| &w.cells)
            .find(|c| c.date == target)
            .map(|c| c.color.clone())
            .unwrap()
    }

    #[test]
    fn test_linear_bucketing_end_to_end() {
        let records = vec![
            Record::new("2024-01-01", 0),
            Record::new("2024-01-02", 5),
            Record::new("2024-01-03", 10),
        ];
        let options = HeatmapOptions::new()
            .with_range(date(2024, 1, 1), date(2024, 1, 7))
            .with_first_day_of_week(1)
            .with_colors(abc_buckets());

        let grid = assemble(&records, &options).unwrap();
        assert_eq!(grid.weeks.len(), 1);
        assert_eq!(cell_color(&grid, date(2024, 1, 1)), "a");
        assert_eq!(cell_color(&grid, date(2024, 1, 2)), "b");
        assert_eq!(cell_color(&grid, date(2024, 1, 3)), "c");
    }

    #[test]
    fn test_empty_records_explicit_single_day() {
        let options = HeatmapOptions::new()
            .with_range(date(2024, 3, 1), date(2024, 3, 1))
            .with_colors(abc_buckets());

        let grid = assemble(&[], &options).unwrap();
        assert_eq!(grid.weeks.len(), 1);
        for cell in &grid.weeks[0].cells {
            assert_eq!(cell.count, 0);
            assert_eq!(cell.color, "a");
        }
    }

    #[test]
    fn test_range_inferred_from_records() {
        let records = vec![
            Record::new("2024-05-10", 1),
            Record::new("2024-05-20", 2),
            Record::new("2024-05-15", 3),
        ];
        let grid = assemble(&records, &HeatmapOptions::new().with_first_day_of_week(1)).unwrap();

        let dates: Vec<NaiveDate> = grid
            .weeks
            .iter()
            .flat_map(|w| w.cells.iter().map(|c| c.date))
            .collect();
        assert!(dates.contains(&date(2024, 5, 10)));
        // max(date) + 1 day is part of the nominal range
        assert!(dates.contains(&date(2024, 5, 21)));
    }

    #[test]
    fn test_empty_records_no_bounds_covers_current_year() {
        let grid = assemble(&[], &HeatmapOptions::new()).unwrap();
        let year = Utc::now().year();
        let dates: Vec<NaiveDate> = grid
            .weeks
            .iter()
            .flat_map(|w| w.cells.iter().map(|c| c.date))
            .collect();
        assert!(dates.contains(&date(year, 1, 1)));
        assert!(dates.contains(&date(year, 12, 31)));
    }

    #[test]
    fn test_fixed_year_mode() {
        let options = HeatmapOptions::new()
            .with_year(2023)
            .with_first_day_of_week(1);
        let grid = assemble(&[], &options).unwrap();
        let dates: Vec<NaiveDate> = grid
            .weeks
            .iter()
            .flat_map(|w| w.cells.iter().map(|c| c.date))
            .collect();
        assert!(dates.contains(&date(2023, 1, 1)));
        assert!(dates.contains(&date(2023, 12, 31)));
        // Padding never extends more than six days past the year
        assert!(!dates.contains(&date(2024, 1, 8)));
    }

    #[test]
    fn test_out_of_range_records_silently_ignored() {
        // A record outside the explicit range lands in the index but no
        // grid cell ever looks it up
        let records = vec![
            Record::new("2024-01-02", 5),
            Record::new("2030-07-07", 99),
        ];
        let options = HeatmapOptions::new()
            .with_range(date(2024, 1, 1), date(2024, 1, 7))
            .with_first_day_of_week(1)
            .with_colors(abc_buckets());

        let grid = assemble(&records, &options).unwrap();
        assert_eq!(grid.weeks.len(), 1);
        assert!(grid
            .weeks
            .iter()
            .flat_map(|w| &w.cells)
            .all(|c| c.date.year() == 2024));
    }

    #[test]
    fn test_month_label_on_first_week_with_day_one() {
        let options = HeatmapOptions::new()
            .with_range(date(2024, 1, 1), date(2024, 3, 10))
            .with_first_day_of_week(1);
        let grid = assemble(&[], &options).unwrap();

        let labels: Vec<Option<String>> =
            grid.weeks.iter().map(|w| w.month_label.clone()).collect();
        let emitted: Vec<String> = labels.iter().flatten().cloned().collect();
        assert_eq!(emitted, vec!["Jan", "Feb", "Mar"]);

        // Each label sits on the week containing that month's first day
        for week in &grid.weeks {
            if week.month_label.is_some() {
                assert!(week.cells.iter().any(|c| c.date.day() == 1));
            }
        }
    }

    #[test]
    fn test_no_duplicate_adjacent_month_labels() {
        let options = HeatmapOptions::new().with_year(2024).with_locale("en-US");
        let grid = assemble(&[], &options).unwrap();
        let emitted: Vec<String> = grid
            .weeks
            .iter()
            .filter_map(|w| w.month_label.clone())
            .collect();
        for pair in emitted.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_day_labels_follow_locale_and_anchor() {
        let options = HeatmapOptions::new()
            .with_range(date(2024, 1, 1), date(2024, 1, 7))
            .with_locale("de-DE");
        let grid = assemble(&[], &options).unwrap();
        // de-DE: Monday-anchored from the locale table
        assert_eq!(grid.day_labels[0], "Mo");
    }

    #[test]
    fn test_title_formatter_callback() {
        let options = HeatmapOptions::new()
            .with_range(date(2024, 1, 1), date(2024, 1, 7))
            .with_first_day_of_week(1)
            .with_title_formatter(Arc::new(|d, c| format!("{}#{}", d, c)));
        let records = vec![Record::new("2024-01-02", 4)];
        let grid = assemble(&records, &options).unwrap();
        let cell = grid
            .weeks
            .iter()
            .flat_map(|w| &w.cells)
            .find(|c| c.date == date(2024, 1, 2))
            .unwrap();
        assert_eq!(cell.title, "2024-01-02#4");
    }

    #[test]
    fn test_default_title_format() {
        let options = HeatmapOptions::new()
            .with_range(date(2024, 1, 1), date(2024, 1, 7))
            .with_first_day_of_week(1);
        let records = vec![Record::new("2024-01-02", 4)];
        let grid = assemble(&records, &options).unwrap();
        let cell = grid
            .weeks
            .iter()
            .flat_map(|w| &w.cells)
            .find(|c| c.date == date(2024, 1, 2))
            .unwrap();
        assert_eq!(cell.title, "Date: 2024-01-02, Entries: 4");
    }

    #[test]
    fn test_empty_buckets_aborts_pass() {
        let options = HeatmapOptions::new().with_colors(vec![]);
        assert!(assemble(&[], &options).is_err());
    }

    #[test]
    fn test_every_cell_annotated() {
        let records = vec![Record::new("2024-02-14", 3)];
        let options = HeatmapOptions::new()
            .with_range(date(2024, 2, 1), date(2024, 2, 29))
            .with_first_day_of_week(0);
        let grid = assemble(&records, &options).unwrap();
        for week in &grid.weeks {
            assert_eq!(week.cells.len(), 7);
            for cell in &week.cells {
                assert!(!cell.color.is_empty());
                assert!(!cell.title.is_empty());
            }
        }
    }
}
