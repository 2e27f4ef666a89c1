//! Keyword task router.
//!
//! Classifies the latest user message against fixed vocabularies. The first
//! vocabulary that matches (in precedence order) decides the task type;
//! anything unmatched is conversational.

use super::task::{Complexity, TaskAnalysis, TaskType};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Messages longer than this are expert-tier regardless of wording
const EXPERT_LENGTH: usize = 1000;
/// Messages longer than this are at least complex
const COMPLEX_LENGTH: usize = 400;
/// Messages longer than this are at least medium
const MEDIUM_LENGTH: usize = 80;

const CODING: &[&str] = &[
    "code", "function", "bug", "debug", "compile", "compiler", "stack trace", "exception",
    "refactor", "implement", "algorithm", "api", "regex", "sql", "rust", "python",
    "javascript", "typescript", "java", "golang", "class", "method", "variable", "syntax",
];
const COMPLEX_REASONING: &[&str] = &[
    "prove", "proof", "derive", "derivation", "step by step", "reasoning", "logic",
    "theorem", "paradox", "explain why", "why does", "calculate", "solve",
];
const ANALYTICAL: &[&str] = &[
    "analyze", "analyse", "analysis", "compare", "comparison", "evaluate", "assess",
    "statistics", "data", "trend", "pros and cons", "trade-off", "tradeoff", "metrics",
];
const RESEARCH: &[&str] = &[
    "research", "sources", "citation", "study", "studies", "paper", "literature",
    "history of", "latest", "evidence",
];
const CREATIVE: &[&str] = &[
    "story", "poem", "poetry", "lyrics", "song", "creative", "imagine", "fiction",
    "novel", "character", "haiku", "slogan",
];

const EXPERT_MARKERS: &[&str] = &[
    "expert", "in-depth", "in depth", "comprehensive", "rigorous", "formal proof",
    "production-grade", "architecture",
];
const COMPLEX_MARKERS: &[&str] = &[
    "detailed", "step by step", "thorough", "multiple", "complex", "explain in detail",
    "trade-offs", "edge cases",
];

fn word_pattern(words: &[&str]) -> Result<Regex, regex::Error> {
    let alternatives = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&format!(r"\b(?:{})\b", alternatives))
        .case_insensitive(true)
        .build()
}

/// Vocabularies in precedence order. A pattern that fails to compile is
/// skipped; `every_pattern_compiles` guards against that.
static VOCABULARIES: LazyLock<Vec<(TaskType, Regex)>> = LazyLock::new(|| {
    [
        (TaskType::Coding, CODING),
        (TaskType::ComplexReasoning, COMPLEX_REASONING),
        (TaskType::Analytical, ANALYTICAL),
        (TaskType::Research, RESEARCH),
        (TaskType::Creative, CREATIVE),
    ]
    .into_iter()
    .filter_map(|(task_type, words)| word_pattern(words).ok().map(|re| (task_type, re)))
    .collect()
});

static EXPERT: LazyLock<Option<Regex>> = LazyLock::new(|| word_pattern(EXPERT_MARKERS).ok());
static COMPLEX: LazyLock<Option<Regex>> = LazyLock::new(|| word_pattern(COMPLEX_MARKERS).ok());

fn marks(pattern: &Option<Regex>, message: &str) -> bool {
    matches!(pattern, Some(re) if re.is_match(message))
}

/// Stateless keyword router
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskRouter;

impl TaskRouter {
    pub fn new() -> Self {
        Self
    }

    /// Analyze a user message.
    pub fn analyze(&self, message: &str) -> TaskAnalysis {
        let task_type = Self::classify_type(message);
        let complexity = Self::classify_complexity(message, task_type);
        TaskAnalysis::new(task_type, complexity, message.chars().count())
    }

    fn classify_type(message: &str) -> TaskType {
        // Fenced code is an unambiguous coding signal
        if message.contains("```") {
            return TaskType::Coding;
        }
        VOCABULARIES
            .iter()
            .find(|(_, pattern)| pattern.is_match(message))
            .map(|(task_type, _)| *task_type)
            .unwrap_or(TaskType::Conversational)
    }

    fn classify_complexity(message: &str, task_type: TaskType) -> Complexity {
        let len = message.chars().count();

        if len > EXPERT_LENGTH || marks(&EXPERT, message) {
            Complexity::Expert
        } else if len > COMPLEX_LENGTH
            || marks(&COMPLEX, message)
            || task_type == TaskType::ComplexReasoning
        {
            Complexity::Complex
        } else if len > MEDIUM_LENGTH || task_type != TaskType::Conversational {
            Complexity::Medium
        } else {
            Complexity::Simple
        }
    }
}
