//! Task analysis value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Kind of task the user is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Coding,
    Creative,
    Analytical,
    Conversational,
    Research,
    ComplexReasoning,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Coding => "coding",
            TaskType::Creative => "creative",
            TaskType::Analytical => "analytical",
            TaskType::Conversational => "conversational",
            TaskType::Research => "research",
            TaskType::ComplexReasoning => "complex_reasoning",
        }
    }

    /// Provider that tends to do best at this kind of task
    pub fn recommended_provider(&self) -> &'static str {
        match self {
            TaskType::Coding => "deepseek",
            TaskType::Creative => "gemini",
            TaskType::Analytical => "openai",
            TaskType::Conversational => "groq",
            TaskType::Research => "gemini",
            TaskType::ComplexReasoning => "openai",
        }
    }

    fn capability(&self) -> &'static str {
        match self {
            TaskType::Coding => "code_generation",
            TaskType::Creative => "creative_writing",
            TaskType::Analytical => "analysis",
            TaskType::Conversational => "dialogue",
            TaskType::Research => "knowledge_retrieval",
            TaskType::ComplexReasoning => "multi_step_reasoning",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Complexity tier. Ordered from cheapest to most demanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
    Expert,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Complex => "complex",
            Complexity::Expert => "expert",
        }
    }

    /// Expected answer size used for the token estimate
    fn expected_output_tokens(&self) -> u32 {
        match self {
            Complexity::Simple => 150,
            Complexity::Medium => 400,
            Complexity::Complex => 800,
            Complexity::Expert => 1500,
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Router verdict for one request. Derived fresh per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAnalysis {
    pub task_type: TaskType,
    pub complexity: Complexity,
    pub recommended_model: String,
    pub required_capabilities: BTreeSet<String>,
    pub estimated_tokens: u32,
}

impl TaskAnalysis {
    pub fn new(task_type: TaskType, complexity: Complexity, message_chars: usize) -> Self {
        let mut required_capabilities = BTreeSet::new();
        required_capabilities.insert(task_type.capability().to_string());
        if complexity >= Complexity::Complex {
            required_capabilities.insert("multi_step_reasoning".to_string());
        }
        if message_chars > 2000 {
            required_capabilities.insert("long_context".to_string());
        }

        // ~4 characters per token for the prompt, plus the expected answer
        let prompt_tokens = message_chars.div_ceil(4) as u32;

        Self {
            task_type,
            complexity,
            recommended_model: task_type.recommended_provider().to_string(),
            required_capabilities,
            estimated_tokens: prompt_tokens + complexity.expected_output_tokens(),
        }
    }

    /// Whether the expensive multi-provider pipeline is warranted
    pub fn requires_consensus(&self) -> bool {
        self.complexity >= Complexity::Complex
    }
}
