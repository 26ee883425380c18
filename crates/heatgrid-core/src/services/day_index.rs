//! Day index
//!
//! Single-pass lookup structure mapping a calendar day to its count,
//! with the dataset's observed min/max carried alongside for color
//! scaling.

use std::collections::HashMap;

use chrono::NaiveDate;
use log::debug;

use crate::error::Result;
use crate::models::{date_key, Record};

/// Constant-time day -> count lookup plus observed count bounds
#[derive(Debug, Clone)]
pub struct DayIndex {
    counts: HashMap<NaiveDate, u64>,
    min_count: u64,
    max_count: u64,
}

impl DayIndex {
    /// Build the index in one pass over the records.
    ///
    /// Duplicate dates resolve last-write-wins (map overwrite; accepted
    /// policy, duplicates are a caller configuration problem). Records
    /// whose count is invalid or missing still mark the day as present
    /// (with count 0) but are excluded from min/max derivation. If no
    /// record carries a valid count the bounds fall back to `0/1` to
    /// avoid degenerate scaling.
    pub fn build(records: &[Record]) -> Result<Self> {
        let mut counts = HashMap::with_capacity(records.len());
        let mut min_count: Option<u64> = None;
        let mut max_count: Option<u64> = None;

        for record in records {
            let key = date_key(&record.date)?;
            match record.count {
                Some(count) => {
                    counts.insert(key, count);
                    min_count = Some(min_count.map_or(count, |m| m.min(count)));
                    max_count = Some(max_count.map_or(count, |m| m.max(count)));
                }
                None => {
                    counts.insert(key, 0);
                }
            }
        }

        let (min_count, max_count) = match (min_count, max_count) {
            (Some(min), Some(max)) => (min, max),
            _ => (0, 1),
        };

        debug!(
            "day index: {} days, counts in [{}, {}]",
            counts.len(),
            min_count,
            max_count
        );
        Ok(Self {
            counts,
            min_count,
            max_count,
        })
    }

    /// Count for a day; days absent from the input are 0
    pub fn get(&self, date: NaiveDate) -> u64 {
        self.counts.get(&date).copied().unwrap_or(0)
    }

    /// Smallest valid count observed (0 if none)
    pub fn min_count(&self) -> u64 {
        self.min_count
    }

    /// Largest valid count observed (1 if none)
    pub fn max_count(&self) -> u64 {
        self.max_count
    }

    /// Number of distinct days present in the input
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
