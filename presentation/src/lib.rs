//! Presentation layer for chorus
//!
//! This crate contains the CLI definition, output formatters,
//! progress reporters and the stdout streaming sink.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::sink::{StdoutSink, WriterSink};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
