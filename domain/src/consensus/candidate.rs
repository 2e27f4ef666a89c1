//! Candidate responses and their heuristic confidence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One successful completion from a (provider, temperature) pair.
///
/// Created once per successful provider call and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResponse {
    pub content: String,
    pub model: String,
    pub provider: String,
    pub temperature: f64,
    /// Heuristic score in `[0, 1]`, see [`heuristic_confidence`]
    pub confidence: f64,
    pub generated_at: DateTime<Utc>,
}

impl CandidateResponse {
    /// Build a candidate, deriving its confidence from the content.
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        temperature: f64,
        content: impl Into<String>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let content = content.into();
        let confidence = heuristic_confidence(&content);
        Self {
            content,
            model: model.into(),
            provider: provider.into(),
            temperature,
            confidence,
            generated_at,
        }
    }

    /// Short label used in prompts and summaries, e.g. `openai @ t=0.25`
    pub fn label(&self) -> String {
        format!("{} @ t={}", self.provider, self.temperature)
    }
}

const HEDGING: &[&str] = &[
    "maybe",
    "perhaps",
    "might",
    "possibly",
    "probably",
    "unclear",
    "not sure",
    "i think",
    "i believe",
    "could be",
    "uncertain",
];

const ASSERTIVE: &[&str] = &[
    "definitely",
    "certainly",
    "clearly",
    "always",
    "exactly",
    "precisely",
    "undoubtedly",
    "confirmed",
];

/// Heuristic confidence of a single response.
///
/// Not a probability: it only ranks candidates against each other when the
/// synthesizer is unavailable. Starts at 0.5 and is adjusted by length,
/// hedging/assertive vocabulary and structural markup, then clamped to
/// `[0, 1]`.
pub fn heuristic_confidence(content: &str) -> f64 {
    let mut score: f64 = 0.5;
    let len = content.chars().count();

    if len < 50 {
        score -= 0.2;
    } else if len > 500 {
        score += 0.2;
    } else if len > 200 {
        score += 0.1;
    }

    let lower = content.to_lowercase();
    let hedges = HEDGING.iter().map(|w| lower.matches(w).count()).sum::<usize>();
    let asserts = ASSERTIVE
        .iter()
        .map(|w| lower.matches(w).count())
        .sum::<usize>();

    score -= (hedges as f64 * 0.05).min(0.3);
    score += (asserts as f64 * 0.03).min(0.15);

    if has_structure(content) {
        score += 0.1;
    }

    score.clamp(0.0, 1.0)
}

/// Lists, headings, numbered steps or fenced code.
fn has_structure(content: &str) -> bool {
    content.contains("```")
        || content.lines().any(|line| {
            let line = line.trim_start();
            line.starts_with("- ")
                || line.starts_with("* ")
                || line.starts_with('#')
                || line
                    .split_once(". ")
                    .is_some_and(|(n, _)| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_answers_score_low() {
        assert!(heuristic_confidence("Yes.") < 0.5);
    }

    #[test]
    fn hedging_lowers_confidence() {
        let base = "The capital of Australia is Canberra, which was chosen as a compromise between Sydney and Melbourne.";
        let hedged = "I think the capital of Australia is maybe Canberra, which was possibly chosen as a compromise.";
        assert!(heuristic_confidence(hedged) < heuristic_confidence(base));
    }

    #[test]
    fn structure_raises_confidence() {
        let plain = "Install the crate and then import it in your main file and call the function.";
        let structured = "Steps:\n1. Install the crate\n2. Import it\n- call the function afterwards";
        assert!(heuristic_confidence(structured) > heuristic_confidence(plain));
    }

    #[test]
    fn confidence_is_clamped() {
        let noisy = "maybe perhaps might possibly probably unclear ".repeat(20);
        let score = heuristic_confidence(&noisy);
        assert!((0.0..=1.0).contains(&score));
        let assertive = format!("{}\n```rust\n```", "definitely certainly clearly ".repeat(50));
        assert!(heuristic_confidence(&assertive) <= 1.0);
    }

    #[test]
    fn label_includes_provider_and_temperature() {
        let c = CandidateResponse::new("groq", "llama", 0.25, "text", Utc::now());
        assert_eq!(c.label(), "groq @ t=0.25");
    }
}
