//! CLI command definitions

use chorus_domain::RoutingMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for chat outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the final answer
    Answer,
    /// Answer plus route, agreement and candidate excerpts
    Full,
    /// JSON output
    Json,
}

impl From<OutputFormat> for chorus_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Answer => chorus_domain::OutputFormat::Answer,
            OutputFormat::Full => chorus_domain::OutputFormat::Full,
            OutputFormat::Json => chorus_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for chorus
#[derive(Parser, Debug)]
#[command(name = "chorus")]
#[command(author, version, about = "Ask several LLM providers and answer with their consensus")]
#[command(long_about = r#"
chorus sends your question to every configured provider at several sampling
temperatures, measures how much the answers agree, and then either merges
and fact-checks them (high agreement) or shows where they disagree.

Simple questions go to a single provider; use --consensus or --single to
override the router.

Configuration files are loaded from (in priority order):
1. CHORUS_* environment variables (CHORUS_ROUTING__MODE=always)
2. --config <path>     Explicit config file
3. ./chorus.toml       Project-level config
4. ~/.config/chorus/config.toml   Global config

Provider keys are read from OPENAI_API_KEY, GROQ_API_KEY, DEEPSEEK_API_KEY,
MISTRAL_API_KEY, OPENROUTER_API_KEY and GEMINI_API_KEY unless configured.

Example:
  chorus "Explain the trade-offs of optimistic locking in a distributed cache"
  chorus --single "What's the capital of France?"
  chorus -o json --consensus "Prove that sqrt(2) is irrational"
"#)]
pub struct Cli {
    /// The question to ask
    pub question: Option<String>,

    /// System prompt for this request
    #[arg(short, long, value_name = "PROMPT")]
    pub system: Option<String>,

    /// Output format (default from config, else "answer")
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Always run the consensus pipeline
    #[arg(long, conflicts_with = "single")]
    pub consensus: bool,

    /// Never run the consensus pipeline
    #[arg(long)]
    pub single: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// List configured providers and whether a key was found, then exit
    #[arg(long)]
    pub list_providers: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Routing mode forced by `--consensus` / `--single`
    pub fn routing_override(&self) -> Option<RoutingMode> {
        if self.consensus {
            Some(RoutingMode::Always)
        } else if self.single {
            Some(RoutingMode::Never)
        } else {
            None
        }
    }

    /// Default log filter for the `-v` count
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question_and_flags() {
        let cli = Cli::parse_from(["chorus", "-vv", "-o", "full", "--consensus", "Why?"]);
        assert_eq!(cli.question.as_deref(), Some("Why?"));
        assert_eq!(cli.output, Some(OutputFormat::Full));
        assert_eq!(cli.routing_override(), Some(RoutingMode::Always));
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn test_single_overrides_routing() {
        let cli = Cli::parse_from(["chorus", "--single", "hi"]);
        assert_eq!(cli.routing_override(), Some(RoutingMode::Never));
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_consensus_conflicts_with_single() {
        assert!(Cli::try_parse_from(["chorus", "--consensus", "--single", "hi"]).is_err());
    }

    #[test]
    fn test_show_config_without_question() {
        let cli = Cli::parse_from(["chorus", "--show-config"]);
        assert!(cli.show_config);
        assert!(cli.question.is_none());
        assert_eq!(cli.routing_override(), None);
    }

    #[test]
    fn test_output_format_maps_to_domain() {
        assert_eq!(
            chorus_domain::OutputFormat::from(OutputFormat::Json),
            chorus_domain::OutputFormat::Json
        );
    }
}
