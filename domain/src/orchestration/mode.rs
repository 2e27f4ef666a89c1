//! Routing mode: whether the consensus pipeline may run.
//!
//! - Auto: the task router decides from complexity
//! - Always: every request runs the consensus pipeline
//! - Never: every request is a single-provider call

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User-facing switch over the consensus path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMode {
    /// Consensus for complex/expert tasks only
    #[default]
    Auto,
    /// Consensus for every request
    Always,
    /// Never fan out
    Never,
}

impl RoutingMode {
    /// Apply the mode to the router's recommendation.
    pub fn use_consensus(&self, router_recommends: bool) -> bool {
        match self {
            RoutingMode::Auto => router_recommends,
            RoutingMode::Always => true,
            RoutingMode::Never => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingMode::Auto => "auto",
            RoutingMode::Always => "always",
            RoutingMode::Never => "never",
        }
    }
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoutingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(RoutingMode::Auto),
            "always" | "consensus" => Ok(RoutingMode::Always),
            "never" | "single" => Ok(RoutingMode::Never),
            _ => Err(format!("Invalid routing mode: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_consensus() {
        assert!(RoutingMode::Auto.use_consensus(true));
        assert!(!RoutingMode::Auto.use_consensus(false));
        assert!(RoutingMode::Always.use_consensus(false));
        assert!(!RoutingMode::Never.use_consensus(true));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("auto".parse::<RoutingMode>().unwrap(), RoutingMode::Auto);
        assert_eq!("Single".parse::<RoutingMode>().unwrap(), RoutingMode::Never);
        assert!("sometimes".parse::<RoutingMode>().is_err());
    }

    #[test]
    fn test_default_is_auto() {
        assert_eq!(RoutingMode::default(), RoutingMode::Auto);
    }
}
