//! Console output formatter for chat outcomes

use crate::output::formatter::OutputFormatter;
use chorus_domain::core::string::truncate_chars;
use chorus_domain::{ChatOutcome, ConfidenceBand};
use colored::Colorize;

/// Characters of each candidate shown in full output
const CANDIDATE_PREVIEW_CHARS: usize = 120;

/// Formats chat outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete outcome
    pub fn format(outcome: &ChatOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("chorus"));
        output.push('\n');

        let cached = if outcome.from_cache { " (cached)" } else { "" };
        output.push_str(&format!(
            "{} {}{}   {} {}/{}   {} {} ms\n",
            "Route:".cyan().bold(),
            outcome.route.as_str(),
            cached,
            "Task:".cyan().bold(),
            outcome.task.task_type,
            outcome.task.complexity,
            "Time:".cyan().bold(),
            outcome.elapsed_ms
        ));

        if let Some(provider) = &outcome.provider {
            output.push_str(&format!("{} {}\n", "Provider:".cyan().bold(), provider));
        }
        if let Some(reason) = &outcome.fallback_reason {
            output.push_str(&format!("{} {}\n", "Fallback:".yellow().bold(), reason));
        }

        if let Some(consensus) = &outcome.consensus {
            let band = match consensus.confidence {
                ConfidenceBand::High => consensus.confidence.to_string().green().bold(),
                ConfidenceBand::Low => consensus.confidence.to_string().yellow().bold(),
            };
            output.push_str(&format!(
                "{} {} (agreement {:.2})   {} {}\n",
                "Confidence:".cyan().bold(),
                band,
                consensus.agreement_score,
                "Providers:".cyan().bold(),
                consensus.providers().join(", ")
            ));
            output.push_str(&format!(
                "{} {}\n",
                "Reasoning:".cyan().bold(),
                consensus.reasoning
            ));

            if !consensus.candidates.is_empty() {
                output.push_str(&Self::section_header("Candidates"));
                for candidate in &consensus.candidates {
                    let preview = truncate_chars(
                        &candidate.content.split_whitespace().collect::<Vec<_>>().join(" "),
                        CANDIDATE_PREVIEW_CHARS,
                    );
                    output.push_str(&format!(
                        "  {} {}\n",
                        candidate.label().yellow(),
                        preview.dimmed()
                    ));
                }
            }
        }

        output.push_str(&Self::section_header("Answer"));
        output.push_str(&format!("\n{}\n", outcome.answer));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &ChatOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the answer only (concise output)
    pub fn format_answer_only(outcome: &ChatOutcome) -> String {
        format!("{}\n", outcome.answer)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_full(&self, outcome: &ChatOutcome) -> String {
        Self::format(outcome)
    }

    fn format_json(&self, outcome: &ChatOutcome) -> String {
        Self::format_json(outcome)
    }

    fn format_answer(&self, outcome: &ChatOutcome) -> String {
        Self::format_answer_only(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_domain::{
        CandidateResponse, ConsensusResult, OutputFormat, ResponseRoute, TaskRouter,
    };
    use chrono::Utc;

    fn consensus_outcome() -> ChatOutcome {
        let candidates = vec![
            CandidateResponse::new("openai", "gpt-4o-mini", 0.2, "Paris is the capital.", Utc::now()),
            CandidateResponse::new("groq", "llama", 0.25, "The capital is Paris.", Utc::now()),
        ];
        ChatOutcome {
            answer: "Paris.".to_string(),
            route: ResponseRoute::Consensus,
            task: TaskRouter::new().analyze("Compare and analyze the architecture trade-offs"),
            consensus: Some(ConsensusResult {
                final_answer: "Paris.".to_string(),
                confidence: ConfidenceBand::High,
                candidates,
                synthesis: Some("Paris.".to_string()),
                verification: Some("OK".to_string()),
                reasoning: "High agreement".to_string(),
                agreement_score: 0.81,
            }),
            provider: None,
            fallback_reason: None,
            from_cache: true,
            elapsed_ms: 42,
        }
    }

    #[test]
    fn test_full_output_sections() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format(&consensus_outcome());
        assert!(output.contains("Route: consensus (cached)"));
        assert!(output.contains("Confidence: HIGH (agreement 0.81)"));
        assert!(output.contains("Providers: openai, groq"));
        assert!(output.contains("openai"));
        assert!(output.contains("Answer"));
        assert!(output.trim_end().ends_with(&"=".repeat(60)));
    }

    #[test]
    fn test_answer_only() {
        let output = ConsoleFormatter::format_answer_only(&consensus_outcome());
        assert_eq!(output, "Paris.\n");
    }

    #[test]
    fn test_json_round_trips_fields() {
        let json = ConsoleFormatter.render(&consensus_outcome(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["route"], "consensus");
        assert_eq!(value["from_cache"], true);
        assert_eq!(value["consensus"]["confidence"], "HIGH");
        assert!(value.get("fallback_reason").is_none());
    }
}
