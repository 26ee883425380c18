//! Widget configuration surface
//!
//! `HeatmapOptions` carries everything a render pass needs besides the
//! records themselves. Defaults mirror the classic contribution-graph
//! widget: 14px cells, 2px gutter, five GitHub-green buckets, linear
//! scaling, `en-US` labels.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::locale;
use crate::models::ColorMode;
use crate::services::color_scale::ColorBucket;

/// Extra query parameters appended to a remote fetch
pub type QueryParamsFn = Arc<dyn Fn() -> Vec<(String, String)> + Send + Sync>;

/// Produces the per-cell display string from (date, count)
pub type TitleFormatterFn = Arc<dyn Fn(NaiveDate, u64) -> String + Send + Sync>;

/// Configuration for one heatmap instance
#[derive(Clone)]
pub struct HeatmapOptions {
    /// Explicit range start; wins over `year` and data-driven inference
    pub start_date: Option<NaiveDate>,
    /// Explicit range end (inclusive)
    pub end_date: Option<NaiveDate>,
    /// Fixed-year mode: render Jan 1 ..= Dec 31 of this year
    pub year: Option<i32>,
    /// BCP 47-ish locale identifier used for labels and week start
    pub locale: String,
    /// Explicit first-day-of-week override (0 = Sunday .. 6 = Saturday);
    /// beats the locale table when set
    pub first_day_of_week: Option<u8>,
    /// Cell edge length in pixels, passed through to the render sink
    pub cell_size: u32,
    /// Spacing between cells in pixels, passed through to the render sink
    pub gutter: u32,
    /// Threshold -> color buckets, ascending
    pub colors: Vec<ColorBucket>,
    pub color_mode: ColorMode,
    /// Callback producing extra fetch parameters
    pub query_params: Option<QueryParamsFn>,
    /// Callback producing the per-cell tooltip/title string
    pub title_formatter: Option<TitleFormatterFn>,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            year: None,
            locale: "en-US".to_string(),
            first_day_of_week: None,
            cell_size: 14,
            gutter: 2,
            colors: ColorBucket::github_palette(),
            color_mode: ColorMode::Linear,
            query_params: None,
            title_formatter: None,
        }
    }
}

impl HeatmapOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit date range (inclusive)
    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Set fixed-year mode
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the locale identifier
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Override the first day of the week (0 = Sunday .. 6 = Saturday)
    pub fn with_first_day_of_week(mut self, day: u8) -> Self {
        self.first_day_of_week = Some(day);
        self
    }

    /// Replace the color bucket table
    pub fn with_colors(mut self, colors: Vec<ColorBucket>) -> Self {
        self.colors = colors;
        self
    }

    /// Set the scaling mode
    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    /// Set the extra-query-parameters callback
    pub fn with_query_params(mut self, f: QueryParamsFn) -> Self {
        self.query_params = Some(f);
        self
    }

    /// Set the per-cell title formatter
    pub fn with_title_formatter(mut self, f: TitleFormatterFn) -> Self {
        self.title_formatter = Some(f);
        self
    }

    /// Effective first day of the week: the explicit override when set,
    /// otherwise the locale table
    pub fn resolved_first_day_of_week(&self) -> u8 {
        self.first_day_of_week
            .unwrap_or_else(|| locale::first_day_of_week(&self.locale))
    }
}

impl std::fmt::Debug for HeatmapOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeatmapOptions")
            .field("start_date", &self.start_date)
            .field("end_date", &self.end_date)
            .field("year", &self.year)
            .field("locale", &self.locale)
            .field("first_day_of_week", &self.first_day_of_week)
            .field("cell_size", &self.cell_size)
            .field("gutter", &self.gutter)
            .field("colors", &self.colors)
            .field("color_mode", &self.color_mode)
            .field("query_params", &self.query_params.as_ref().map(|_| "<fn>"))
            .field(
                "title_formatter",
                &self.title_formatter.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}
