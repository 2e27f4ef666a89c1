//! Deterministic best-candidate selection (synthesis fallback).

use super::candidate::CandidateResponse;
use crate::providers::reliability::provider_reliability;

/// Temperature the scoring treats as ideal
const IDEAL_TEMPERATURE: f64 = 0.25;

/// Score of a candidate:
/// `confidence*0.4 + reliability*0.3 + (1 - |t - 0.25|)*0.3`.
pub fn candidate_score(candidate: &CandidateResponse) -> f64 {
    candidate.confidence * 0.4
        + provider_reliability(&candidate.provider) * 0.3
        + (1.0 - (candidate.temperature - IDEAL_TEMPERATURE).abs()) * 0.3
}

/// Index of the highest scoring candidate; ties go to the earliest index.
pub fn best_candidate_index(candidates: &[CandidateResponse]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, candidate) in candidates.iter().enumerate() {
        let score = candidate_score(candidate);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

/// The highest scoring candidate, if any.
pub fn determine_best_candidate(candidates: &[CandidateResponse]) -> Option<&CandidateResponse> {
    best_candidate_index(candidates).map(|i| &candidates[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn candidate(provider: &str, temperature: f64, confidence: f64) -> CandidateResponse {
        let mut c = CandidateResponse::new(provider, "m", temperature, "text", Utc::now());
        c.confidence = confidence;
        c
    }

    #[test]
    fn empty_list_has_no_best() {
        assert!(determine_best_candidate(&[]).is_none());
    }

    #[test]
    fn reliability_breaks_equal_confidence() {
        let candidates = vec![candidate("unknown", 0.25, 0.5), candidate("openai", 0.25, 0.5)];
        assert_eq!(best_candidate_index(&candidates), Some(1));
    }

    #[test]
    fn temperature_closest_to_ideal_wins() {
        let candidates = vec![candidate("groq", 0.2, 0.5), candidate("groq", 0.25, 0.5)];
        assert_eq!(best_candidate_index(&candidates), Some(1));
    }

    #[test]
    fn ties_resolve_to_earliest_index() {
        let candidates = vec![
            candidate("groq", 0.25, 0.6),
            candidate("groq", 0.25, 0.6),
            candidate("groq", 0.25, 0.6),
        ];
        assert_eq!(best_candidate_index(&candidates), Some(0));
    }

    #[test]
    fn selection_is_deterministic() {
        let candidates = vec![
            candidate("gemini", 0.3, 0.7),
            candidate("openai", 0.2, 0.6),
            candidate("mistral", 0.25, 0.8),
        ];
        let first = determine_best_candidate(&candidates).cloned();
        for _ in 0..10 {
            assert_eq!(determine_best_candidate(&candidates).cloned(), first);
        }
    }

    #[test]
    fn score_formula() {
        let c = candidate("openai", 0.3, 0.5);
        let expected = 0.5 * 0.4 + 0.95 * 0.3 + (1.0 - 0.05) * 0.3;
        assert!((candidate_score(&c) - expected).abs() < 1e-9);
    }
}
