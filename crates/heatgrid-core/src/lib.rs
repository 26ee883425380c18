//! # heatgrid-core
//!
//! Calendar-heatmap engine: buckets per-day counts onto a dense
//! week/day grid and resolves a bucketed color per cell.
//!
//! This crate provides:
//! - Week grid construction and day bucketing (`services` module)
//! - Count-to-color scaling, linear or logarithmic (`services::color_scale`)
//! - Data-source abstraction for inline and HTTP records (`services::source`)
//! - Per-instance widget state and render driving (`widget` module)
//! - Locale table for week start and labels (`locale` module)
//! - Unified error handling (`error` module)

pub mod config;
pub mod error;
pub mod locale;
pub mod models;
pub mod services;
pub mod widget;

// Re-exports for convenience
pub use config::{HeatmapOptions, QueryParamsFn, TitleFormatterFn};
pub use error::{Error, Result};
pub use models::{ColorMode, DayCell, Record, RenderCell, RenderGrid, RenderWeek};
pub use services::{
    assemble, ColorBucket, ColorResolver, ColorScale, DataSource, DayIndex, FetchQuery,
    HttpSource, InlineSource,
};
pub use widget::{Heatmap, RenderListener};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}
