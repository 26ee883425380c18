//! Data model for the heatmap pipeline
//!
//! Everything here is a value object: built fresh for a render pass,
//! never mutated afterwards, discarded on the next pass.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// An input data point: a day plus how many entries fall on it.
///
/// `date` accepts an RFC 3339 timestamp or a plain `YYYY-MM-DD` string;
/// both are normalized through [`date_key`]. A `count` that is missing or
/// not a non-negative integer deserializes to `None` - the day still
/// exists in the index but is excluded from min/max derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub date: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: Option<u64>,
}

impl Record {
    /// Create a record with a valid count
    pub fn new(date: impl Into<String>, count: u64) -> Self {
        Self {
            date: date.into(),
            count: Some(count),
        }
    }
}

/// Tolerant count field: anything that is not a non-negative integer
/// becomes `None` instead of failing the whole array.
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64())
}

/// Derive the calendar-day key for a record date.
///
/// This is the only DateKey derivation path in the crate: RFC 3339
/// timestamps are converted to UTC and truncated to the calendar day,
/// plain `YYYY-MM-DD` strings are taken as-is. Two inputs produce the
/// same key iff they denote the same UTC year/month/day.
pub fn date_key(input: &str) -> Result<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| Error::data_shape(format!("unparseable record date: {:?}", input)))
}

/// A single grid cell before color resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub count: u64,
}

/// How counts map to the `[0,1]` percentage scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Linear,
    Logarithmic,
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(ColorMode::Linear),
            "log" | "logarithmic" => Ok(ColorMode::Logarithmic),
            _ => Err(format!("Invalid color mode: {}. Use 'linear' or 'log'", s)),
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorMode::Linear => write!(f, "linear"),
            ColorMode::Logarithmic => write!(f, "log"),
        }
    }
}

/// A fully annotated cell, ready for the render sink
#[derive(Debug, Clone, Serialize)]
pub struct RenderCell {
    pub date: NaiveDate,
    pub count: u64,
    pub color: String,
    pub is_today: bool,
    pub title: String,
}

/// One column of the grid: exactly seven cells plus an optional month
/// label (emitted on the first week containing a day-of-month 1, and
/// suppressed when it would repeat the previously emitted label).
#[derive(Debug, Clone, Serialize)]
pub struct RenderWeek {
    pub cells: Vec<RenderCell>,
    pub month_label: Option<String>,
}

/// The render-sink contract: ordered weeks plus the seven localized
/// weekday abbreviations, rotated to start at the configured
/// first-day-of-week.
#[derive(Debug, Clone, Serialize)]
pub struct RenderGrid {
    pub weeks: Vec<RenderWeek>,
    pub day_labels: Vec<String>,
}

impl RenderGrid {
    /// Total number of day cells across all weeks
    pub fn cell_count(&self) -> usize {
        self.weeks.iter().map(|w| w.cells.len()).sum()
    }
}
