//! Pipeline services
//!
//! The render pipeline, leaf to root: `week_grid` partitions the range
//! into calendar weeks, `day_index` buckets records by day, `color_scale`
//! turns counts into colors, and `assembler` composes them into the
//! render-ready grid. `source` feeds records into the pipeline.

pub mod assembler;
pub mod color_scale;
pub mod day_index;
pub mod source;
pub mod week_grid;

pub use assembler::assemble;
pub use color_scale::{ColorBucket, ColorResolver, ColorScale};
pub use day_index::DayIndex;
pub use source::{DataSource, FetchQuery, HttpSource, InlineSource};
pub use week_grid::{end_of_week, start_of_week};
