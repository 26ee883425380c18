//! Count-to-color scaling
//!
//! Converts a day's count into a bucketed color by normalizing the count
//! to a `[0, 1]` percentage against the dataset's observed min/max
//! (linearly or logarithmically) and picking the first bucket whose
//! threshold is at or above that percentage. Boundary percentages round
//! down in bucket index, never up.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::ColorMode;

/// One entry of the scale: a percentage cutoff and its display color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBucket {
    pub threshold: f64,
    pub color: String,
}

impl ColorBucket {
    pub fn new(threshold: f64, color: impl Into<String>) -> Self {
        Self {
            threshold,
            color: color.into(),
        }
    }

    /// The classic five-bucket contribution-graph palette
    pub fn github_palette() -> Vec<ColorBucket> {
        vec![
            ColorBucket::new(0.0, "#ebedf0"),
            ColorBucket::new(0.25, "#c6e48b"),
            ColorBucket::new(0.5, "#7bc96f"),
            ColorBucket::new(0.75, "#239a3b"),
            ColorBucket::new(1.0, "#196127"),
        ]
    }
}

/// A validated, ascending-sorted color scale
#[derive(Debug, Clone)]
pub struct ColorScale {
    buckets: Vec<ColorBucket>,
    mode: ColorMode,
}

impl ColorScale {
    /// Validate and sort the bucket table.
    ///
    /// An empty table is a configuration error, as is any threshold
    /// outside `[0, 1]` or non-finite. The smallest threshold
    /// (conventionally 0) is the zero-count color; the largest is the
    /// overflow fallback for percentages beyond every threshold.
    pub fn new(mut buckets: Vec<ColorBucket>, mode: ColorMode) -> Result<Self> {
        if buckets.is_empty() {
            return Err(Error::config("color bucket table is empty"));
        }
        for bucket in &buckets {
            if !bucket.threshold.is_finite() || !(0.0..=1.0).contains(&bucket.threshold) {
                return Err(Error::config(format!(
                    "color bucket threshold {} outside [0, 1]",
                    bucket.threshold
                )));
            }
        }
        buckets.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        Ok(Self { buckets, mode })
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn buckets(&self) -> &[ColorBucket] {
        &self.buckets
    }

    /// Normalized position of `count` between the observed bounds
    fn percentage(&self, count: u64, min_count: u64, max_count: u64) -> f64 {
        match self.mode {
            ColorMode::Linear => {
                let range = max_count.saturating_sub(min_count).max(1) as f64;
                let offset = count.saturating_sub(min_count) as f64;
                (offset / range).clamp(0.0, 1.0)
            }
            ColorMode::Logarithmic => {
                if max_count == min_count {
                    return 0.0;
                }
                let log_count = (count as f64 + 1.0).log10();
                let log_min = (min_count as f64 + 1.0).log10();
                let log_max = (max_count as f64 + 1.0).log10();
                ((log_count - log_min) / (log_max - log_min)).clamp(0.0, 1.0)
            }
        }
    }

    /// Index of the bucket a count falls into
    fn bucket_index(&self, count: u64, min_count: u64, max_count: u64) -> usize {
        // Zero is always its own visual category, regardless of mode
        if count == 0 {
            return 0;
        }

        // Log scaling compresses the minimum non-zero value toward 0%;
        // keep it distinguishable from the zero bucket.
        if self.mode == ColorMode::Logarithmic && count == min_count {
            return self
                .buckets
                .iter()
                .position(|b| b.threshold > 0.0)
                .unwrap_or(self.buckets.len() - 1);
        }

        let percentage = self.percentage(count, min_count, max_count);
        self.buckets
            .iter()
            .position(|b| percentage <= b.threshold)
            .unwrap_or(self.buckets.len() - 1)
    }

    /// Resolve a count directly, without memoization
    pub fn color_for(&self, count: u64, min_count: u64, max_count: u64) -> &str {
        &self.buckets[self.bucket_index(count, min_count, max_count)].color
    }
}

/// Per-render-pass color resolver.
///
/// min/max are fixed for the lifetime of a pass, so the memo only needs
/// the count; it is discarded with the resolver when the pass ends.
pub struct ColorResolver<'a> {
    scale: &'a ColorScale,
    min_count: u64,
    max_count: u64,
    memo: HashMap<u64, usize>,
}

impl<'a> ColorResolver<'a> {
    pub fn new(scale: &'a ColorScale, min_count: u64, max_count: u64) -> Self {
        Self {
            scale,
            min_count,
            max_count,
            memo: HashMap::new(),
        }
    }

    /// Memoized color lookup for one count
    pub fn resolve(&mut self, count: u64) -> &'a str {
        let index = match self.memo.get(&count) {
            Some(&index) => index,
            None => {
                let index = self
                    .scale
                    .bucket_index(count, self.min_count, self.max_count);
                self.memo.insert(count, index);
                index
            }
        };
        &self.scale.buckets[index].color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(mode: ColorMode) -> ColorScale {
        ColorScale::new(
            vec![
                ColorBucket::new(0.0, "a"),
                ColorBucket::new(0.5, "b"),
                ColorBucket::new(1.0, "c"),
            ],
            mode,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_buckets_is_config_error() {
        let err = ColorScale::new(vec![], ColorMode::Linear).unwrap_err();
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        assert!(ColorScale::new(
            vec![ColorBucket::new(1.5, "x")],
            ColorMode::Linear
        )
        .is_err());
        assert!(ColorScale::new(
            vec![ColorBucket::new(f64::NAN, "x")],
            ColorMode::Linear
        )
        .is_err());
    }

    #[test]
    fn test_buckets_sorted_on_construction() {
        let s = ColorScale::new(
            vec![
                ColorBucket::new(1.0, "c"),
                ColorBucket::new(0.0, "a"),
                ColorBucket::new(0.5, "b"),
            ],
            ColorMode::Linear,
        )
        .unwrap();
        let thresholds: Vec<f64> = s.buckets().iter().map(|b| b.threshold).collect();
        assert_eq!(thresholds, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_zero_count_always_zero_bucket() {
        for mode in [ColorMode::Linear, ColorMode::Logarithmic] {
            let s = scale(mode);
            assert_eq!(s.color_for(0, 0, 100), "a");
            assert_eq!(s.color_for(0, 50, 100), "a");
        }
    }

    #[test]
    fn test_linear_boundaries_round_down() {
        let s = scale(ColorMode::Linear);
        // min=0, max=10: count 5 -> percentage 0.5, lands exactly on the
        // 0.5 threshold and stays there (round down, not up)
        assert_eq!(s.color_for(5, 0, 10), "b");
        assert_eq!(s.color_for(10, 0, 10), "c");
        assert_eq!(s.color_for(4, 0, 10), "b");
    }

    #[test]
    fn test_linear_scenario_counts() {
        // records 0/5/10: min=0 max=10
        let s = scale(ColorMode::Linear);
        assert_eq!(s.color_for(0, 0, 10), "a");
        assert_eq!(s.color_for(5, 0, 10), "b");
        assert_eq!(s.color_for(10, 0, 10), "c");
    }

    #[test]
    fn test_equal_min_max_guard() {
        let s = scale(ColorMode::Linear);
        // All values equal: range clamps to 1, percentage 0, smallest bucket
        assert_eq!(s.color_for(7, 7, 7), "a");
    }

    #[test]
    fn test_log_equal_min_max_elevated_to_first_nonzero_bucket() {
        let s = scale(ColorMode::Logarithmic);
        // percentage 0 by the max==min rule, then the min-count rule
        // keeps the value out of the zero bucket
        assert_eq!(s.color_for(1, 1, 1), "b");
    }

    #[test]
    fn test_log_min_count_never_zero_bucket() {
        let s = scale(ColorMode::Logarithmic);
        assert_eq!(s.color_for(1, 1, 1000), "b");
    }

    #[test]
    fn test_log_max_reaches_top_bucket() {
        let s = scale(ColorMode::Logarithmic);
        assert_eq!(s.color_for(1000, 1, 1000), "c");
    }

    #[test]
    fn test_monotonic_in_count() {
        for mode in [ColorMode::Linear, ColorMode::Logarithmic] {
            let s = scale(mode);
            let mut last_index = 0usize;
            for count in 1..=100u64 {
                let index = s
                    .buckets()
                    .iter()
                    .position(|b| b.color == s.color_for(count, 1, 100))
                    .unwrap();
                assert!(
                    index >= last_index,
                    "bucket regressed at count {} in {:?} mode",
                    count,
                    mode
                );
                last_index = index;
            }
        }
    }

    #[test]
    fn test_resolver_memo_matches_direct() {
        let s = scale(ColorMode::Linear);
        let mut resolver = ColorResolver::new(&s, 0, 10);
        for count in 0..=10 {
            assert_eq!(resolver.resolve(count), s.color_for(count, 0, 10));
            // Second hit goes through the memo
            assert_eq!(resolver.resolve(count), s.color_for(count, 0, 10));
        }
    }

    #[test]
    fn test_overflow_falls_back_to_largest_threshold() {
        // No threshold reaches 1.0: percentages above 0.6 use the last bucket
        let s = ColorScale::new(
            vec![ColorBucket::new(0.0, "a"), ColorBucket::new(0.6, "b")],
            ColorMode::Linear,
        )
        .unwrap();
        assert_eq!(s.color_for(10, 0, 10), "b");
    }
}
