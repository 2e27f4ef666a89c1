//! Low-confidence summary: show the disagreement instead of hiding it.

use super::candidate::CandidateResponse;
use crate::core::string::truncate_chars;

/// Prefix of every low-confidence answer. High-confidence answers never
/// contain it.
pub const LOW_CONFIDENCE_DISCLAIMER: &str = "I'm not fully certain about this answer.";

/// Reasoning attached to low-confidence results
pub const LOW_CONFIDENCE_REASONING: &str = "Low confidence due to conflicting responses";

/// Maximum number of excerpts shown
pub const MAX_EXCERPTS: usize = 3;

/// Maximum characters per excerpt (the ellipsis marker is extra)
pub const EXCERPT_CHARS: usize = 150;

/// Compose the disclaimer message from the first candidates in generation
/// order.
pub fn summarize_low_confidence(candidates: &[CandidateResponse]) -> String {
    let mut out = String::from(LOW_CONFIDENCE_DISCLAIMER);
    out.push_str(" The models I consulted gave conflicting responses:\n\n");

    for candidate in candidates.iter().take(MAX_EXCERPTS) {
        // Collapse newlines so each excerpt stays on its bullet line
        let flattened = candidate.content.split_whitespace().collect::<Vec<_>>().join(" ");
        let excerpt = truncate_chars(&flattened, EXCERPT_CHARS);
        out.push_str(&format!("- **{}**: {}\n", candidate.provider, excerpt));
    }

    out.push_str("\nPlease verify this information independently.");
    out
}
