//! Prompt templates for the consensus flow

use crate::consensus::CandidateResponse;

/// Literal token the verifier returns when the synthesis needs no change
pub const VERIFIED_OK: &str = "OK";

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt used when the caller supplies none
    pub fn default_system() -> &'static str {
        r#"You are a knowledgeable, careful assistant.
Answer accurately and concisely. If you are unsure about a fact, say so."#
    }

    /// System prompt for the synthesis step
    pub fn synthesis_system() -> &'static str {
        r#"You merge several candidate answers to the same question into one answer.
Keep the points the candidates agree on, drop anything they contradict each other about,
and produce a single clear answer. Do not mention that there were multiple candidates."#
    }

    /// User prompt for the synthesis step
    pub fn synthesis_prompt(question: &str, candidates: &[CandidateResponse]) -> String {
        let mut prompt = format!(
            r#"Question:
{}

Candidate answers:
"#,
            question
        );

        for (i, candidate) in candidates.iter().enumerate() {
            prompt.push_str(&format!(
                "\n--- Candidate {} ({}) ---\n{}\n",
                i + 1,
                candidate.label(),
                candidate.content.trim()
            ));
        }

        prompt.push_str(
            r#"
Merge the consistent answers, drop contradictions, and produce one answer."#,
        );

        prompt
    }

    /// System prompt for the verification step
    pub fn verification_system() -> &'static str {
        r#"You are a strict fact checker. You check an answer for factual and arithmetic errors.
If the answer is correct, reply with exactly OK and nothing else.
Otherwise reply with a corrected version of the answer only."#
    }

    /// User prompt for the verification step
    pub fn verification_prompt(question: &str, answer: &str) -> String {
        format!(
            r#"Question:
{}

Answer to check:
{}

Reply with exactly OK if the answer is correct, or with a corrected answer (at most 120 tokens)."#,
            question, answer
        )
    }
}
