//! Selection policy for the provider that synthesizes, verifies, or answers alone.

use super::reliability::provider_reliability;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which provider is chosen when only one is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SelectionPolicy {
    /// First provider in registry order
    #[default]
    FirstAvailable,
    /// Provider with the highest entry in the reliability table
    /// (ties keep registry order)
    HighestReliability,
    /// A specific provider by name, falling back to the first available one
    Named(String),
}

impl SelectionPolicy {
    /// Pick an index into `names` (registry order).
    ///
    /// Returns `None` only when `names` is empty.
    pub fn select(&self, names: &[&str]) -> Option<usize> {
        if names.is_empty() {
            return None;
        }
        match self {
            SelectionPolicy::FirstAvailable => Some(0),
            SelectionPolicy::HighestReliability => {
                let mut best = 0;
                for (i, name) in names.iter().enumerate().skip(1) {
                    if provider_reliability(name) > provider_reliability(names[best]) {
                        best = i;
                    }
                }
                Some(best)
            }
            SelectionPolicy::Named(wanted) => Some(
                names
                    .iter()
                    .position(|n| n.eq_ignore_ascii_case(wanted))
                    .unwrap_or(0),
            ),
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionPolicy::FirstAvailable => write!(f, "first_available"),
            SelectionPolicy::HighestReliability => write!(f, "highest_reliability"),
            SelectionPolicy::Named(name) => write!(f, "named:{}", name),
        }
    }
}

impl FromStr for SelectionPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(name) = s.strip_prefix("named:") {
            return Ok(SelectionPolicy::Named(name.trim().to_string()));
        }
        match s {
            "first_available" | "first" => Ok(SelectionPolicy::FirstAvailable),
            "highest_reliability" | "reliability" => Ok(SelectionPolicy::HighestReliability),
            other => Err(DomainError::UnknownSelectionPolicy(other.to_string())),
        }
    }
}

impl TryFrom<String> for SelectionPolicy {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SelectionPolicy> for String {
    fn from(value: SelectionPolicy) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_available_picks_index_zero() {
        assert_eq!(
            SelectionPolicy::FirstAvailable.select(&["groq", "openai"]),
            Some(0)
        );
    }

    #[test]
    fn highest_reliability_picks_openai() {
        assert_eq!(
            SelectionPolicy::HighestReliability.select(&["groq", "unknown", "openai"]),
            Some(2)
        );
    }

    #[test]
    fn highest_reliability_ties_keep_order() {
        assert_eq!(
            SelectionPolicy::HighestReliability.select(&["deepseek", "mistral"]),
            Some(0)
        );
    }

    #[test]
    fn named_falls_back_to_first() {
        let policy = SelectionPolicy::Named("gemini".to_string());
        assert_eq!(policy.select(&["openai", "gemini"]), Some(1));
        assert_eq!(policy.select(&["openai", "groq"]), Some(0));
    }

    #[test]
    fn empty_names_select_nothing() {
        assert_eq!(SelectionPolicy::FirstAvailable.select(&[]), None);
    }

    #[test]
    fn parse_roundtrip() {
        for policy in [
            SelectionPolicy::FirstAvailable,
            SelectionPolicy::HighestReliability,
            SelectionPolicy::Named("groq".to_string()),
        ] {
            let parsed: SelectionPolicy = policy.to_string().parse().unwrap();
            assert_eq!(parsed, policy);
        }
        assert!("fastest".parse::<SelectionPolicy>().is_err());
    }
}
