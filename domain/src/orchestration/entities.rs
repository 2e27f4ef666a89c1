//! Pipeline stages

use serde::{Deserialize, Serialize};

/// Stage of a chat request as it moves through the orchestrator.
///
/// ```text
/// Init → Routing → CacheCheck ─┬─ CacheHit ─────────────────────────────┐
///                              └─ Generating → Scoring ─┬─ Synthesizing → Verifying ─┤
///                                     │                 └─ Summarizing ──────────────┤
///                                     └─(failure)── FallbackSingleModel ─────────────┴→ Done
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Init,
    Routing,
    CacheCheck,
    CacheHit,
    Generating,
    Scoring,
    Synthesizing,
    Summarizing,
    Verifying,
    FallbackSingleModel,
    Done,
}

impl Stage {
    /// Progress percentage reported when the stage is entered.
    ///
    /// Every legal transition moves to a strictly larger value.
    pub fn progress(&self) -> u8 {
        match self {
            Stage::Init => 0,
            Stage::Routing => 5,
            Stage::CacheCheck => 10,
            Stage::Generating => 20,
            Stage::Scoring => 60,
            Stage::Synthesizing => 70,
            Stage::Summarizing => 80,
            Stage::Verifying => 85,
            Stage::FallbackSingleModel => 90,
            Stage::CacheHit | Stage::Done => 100,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Stage::Init => "init",
            Stage::Routing => "routing",
            Stage::CacheCheck => "cache_check",
            Stage::CacheHit => "cache_hit",
            Stage::Generating => "generating",
            Stage::Scoring => "scoring",
            Stage::Synthesizing => "synthesizing",
            Stage::Summarizing => "summarizing",
            Stage::Verifying => "verifying",
            Stage::FallbackSingleModel => "fallback_single_model",
            Stage::Done => "done",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Stage::Init => "Starting",
            Stage::Routing => "Classifying task",
            Stage::CacheCheck => "Checking cache",
            Stage::CacheHit => "Cached answer",
            Stage::Generating => "Generating candidates",
            Stage::Scoring => "Scoring agreement",
            Stage::Synthesizing => "Synthesizing",
            Stage::Summarizing => "Summarizing disagreement",
            Stage::Verifying => "Verifying",
            Stage::FallbackSingleModel => "Falling back to a single model",
            Stage::Done => "Done",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_increasing(path: &[Stage]) {
        for pair in path.windows(2) {
            assert!(
                pair[0].progress() < pair[1].progress(),
                "{:?} -> {:?} is not increasing",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn every_path_is_monotonic() {
        use Stage::*;
        assert_increasing(&[Init, Routing, CacheCheck, CacheHit]);
        assert_increasing(&[
            Init, Routing, CacheCheck, Generating, Scoring, Synthesizing, Verifying, Done,
        ]);
        assert_increasing(&[Init, Routing, CacheCheck, Generating, Scoring, Summarizing, Done]);
        assert_increasing(&[Init, Routing, CacheCheck, Generating, FallbackSingleModel, Done]);
        assert_increasing(&[Init, Routing, FallbackSingleModel, Done]);
    }
}
