//! Output formatter trait

use chorus_domain::{ChatOutcome, OutputFormat};

/// Trait for formatting chat outcomes
pub trait OutputFormatter {
    /// Answer plus route, agreement and candidate excerpts
    fn format_full(&self, outcome: &ChatOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &ChatOutcome) -> String;

    /// Only the final answer
    fn format_answer(&self, outcome: &ChatOutcome) -> String;

    fn render(&self, outcome: &ChatOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Answer => self.format_answer(outcome),
            OutputFormat::Full => self.format_full(outcome),
            OutputFormat::Json => self.format_json(outcome),
        }
    }
}
