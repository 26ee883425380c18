//! CLI commands module

pub mod render;

use crate::output::OutputFormat;

/// Shared context for all commands
pub struct Context {
    pub format: OutputFormat,
    pub quiet: bool,
}
