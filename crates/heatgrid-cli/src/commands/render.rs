//! Render command
//!
//! Loads records from a JSON file or an HTTP endpoint, drives one
//! render pass, and prints the annotated grid.

use anyhow::{bail, Context as _, Result};
use chrono::NaiveDate;
use clap::Args;
use log::debug;

use heatgrid_core::{
    ColorMode, Heatmap, HeatmapOptions, HttpSource, Record,
};

use super::Context;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct RenderArgs {
    /// Path to a JSON file containing an array of {date, count} records
    #[arg(long, conflicts_with = "url")]
    pub input: Option<String>,

    /// HTTP endpoint returning a JSON array of {date, count} records
    #[arg(long)]
    pub url: Option<String>,

    /// Range start (YYYY-MM-DD); inferred from data when omitted
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Range end (YYYY-MM-DD, inclusive); inferred from data when omitted
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Fixed-year mode: render Jan 1 to Dec 31 of this year
    #[arg(long, conflicts_with_all = ["start_date", "end_date"])]
    pub year: Option<i32>,

    /// Locale for labels and week start
    #[arg(long, default_value = "en-US")]
    pub locale: String,

    /// First day of week override: 0 = Sunday .. 6 = Saturday
    #[arg(long)]
    pub first_day_of_week: Option<u8>,

    /// Count-to-color scaling: linear or log
    #[arg(long, default_value = "linear")]
    pub mode: ColorMode,
}

pub async fn execute(ctx: &Context, args: RenderArgs) -> Result<()> {
    let mut options = HeatmapOptions::new()
        .with_locale(&args.locale)
        .with_color_mode(args.mode);
    options.start_date = args.start_date;
    options.end_date = args.end_date;
    options.year = args.year;
    options.first_day_of_week = args.first_day_of_week;

    let heatmap = match (&args.input, &args.url) {
        (Some(path), None) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path))?;
            let records: Vec<Record> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON array of records", path))?;
            output::print_info(&format!("loaded {} records from {}", records.len(), path), ctx.quiet);
            Heatmap::with_records(options, records)?
        }
        (None, Some(url)) => {
            output::print_info(&format!("fetching records from {}", url), ctx.quiet);
            Heatmap::new(options, Box::new(HttpSource::new(url)))?
        }
        _ => bail!("provide exactly one of --input or --url"),
    };

    debug!("rendering with {:?}", heatmap.options());
    let grid = heatmap.render().await?;

    match ctx.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&grid)?);
        }
        OutputFormat::Table => {
            output::print_grid(&grid);
        }
    }
    Ok(())
}
