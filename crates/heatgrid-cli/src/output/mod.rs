//! Output formatting module
//!
//! Provides the terminal grid renderer and JSON output plumbing.

use std::fmt::Display;

use colored::Colorize;
use heatgrid_core::RenderGrid;

/// Output format enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format: {}. Use 'table' or 'json'", s)),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Print a progress message (respects quiet mode)
pub fn print_info(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{}", message);
    }
}

/// Parse a `#rrggbb` hex color; anything else renders as mid gray
fn hex_to_rgb(color: &str) -> (u8, u8, u8) {
    let hex = color.trim_start_matches('#');
    if hex.len() == 6 {
        let parse = |range| u8::from_str_radix(&hex[range], 16);
        if let (Ok(r), Ok(g), Ok(b)) = (parse(0..2), parse(2..4), parse(4..6)) {
            return (r, g, b);
        }
    }
    (128, 128, 128)
}

/// Render the grid to the terminal: month labels on top, weekday labels
/// down the left, one truecolor square per day, weeks as columns.
pub fn print_grid(grid: &RenderGrid) {
    let label_width = grid
        .day_labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(3);

    // Month label row; each week column is two characters wide
    let mut month_row = " ".repeat(label_width + 1);
    for week in &grid.weeks {
        match &week.month_label {
            Some(label) => {
                let mut short: String = label.chars().take(2).collect();
                while short.chars().count() < 2 {
                    short.push(' ');
                }
                month_row.push_str(&short);
            }
            None => month_row.push_str("  "),
        }
    }
    println!("{}", month_row);

    // One row per weekday, walking the same row index in every week
    for (row, label) in grid.day_labels.iter().enumerate() {
        let mut line = format!("{:>width$} ", label, width = label_width);
        for week in &grid.weeks {
            match week.cells.get(row) {
                Some(cell) => {
                    let (r, g, b) = hex_to_rgb(&cell.color);
                    if cell.is_today {
                        line.push_str(&"[]".on_truecolor(r, g, b).to_string());
                    } else {
                        line.push_str(&"  ".on_truecolor(r, g, b).to_string());
                    }
                }
                None => line.push_str("  "),
            }
        }
        println!("{}", line);
    }
}
