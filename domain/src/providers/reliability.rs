//! Fixed provider reliability table used for best-candidate scoring.

/// Reliability assigned to providers that are not in the table.
pub const DEFAULT_RELIABILITY: f64 = 0.5;

const RELIABILITY: &[(&str, f64)] = &[
    ("openai", 0.95),
    ("gemini", 0.9),
    ("mistral", 0.85),
    ("deepseek", 0.85),
    ("groq", 0.8),
    ("openrouter", 0.8),
    ("together", 0.75),
];

/// Look up the reliability weight of a provider by name (case-insensitive).
pub fn provider_reliability(name: &str) -> f64 {
    let name = name.to_lowercase();
    RELIABILITY
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, r)| *r)
        .unwrap_or(DEFAULT_RELIABILITY)
}
