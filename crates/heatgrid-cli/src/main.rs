//! Heatgrid CLI - calendar heatmap renderer
//!
//! Loads per-day counts from a JSON file or HTTP endpoint and renders
//! the annotated week grid to the terminal or as JSON.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "heatgrid")]
#[command(author, version, about = "Calendar heatmap rendering CLI", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: table (default) or json
    #[arg(long, global = true, default_value = "table")]
    format: output::OutputFormat,

    /// Suppress progress messages
    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a heatmap from records
    Render(commands::render::RenderArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let ctx = commands::Context {
        format: cli.format,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Render(args) => commands::render::execute(&ctx, args).await,
    }
}
