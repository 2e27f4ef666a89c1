//! Presentation-level configuration
//!
//! Resolved from CLI flags over the `[output]` file section.

use chorus_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show the progress bar (never for JSON output)
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Answer,
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// `cli_format` wins over `file_format`.
    pub fn resolve(
        cli_format: Option<OutputFormat>,
        file_format: Option<OutputFormat>,
        color: bool,
        quiet: bool,
    ) -> Self {
        let format = cli_format.or(file_format).unwrap_or_default();
        Self {
            format,
            color,
            show_progress: !quiet && format != OutputFormat::Json,
        }
    }
}
