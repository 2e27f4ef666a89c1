//! Conversation message entities

use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Return the content of the most recent user message, if any.
pub fn latest_user_message(history: &[Message]) -> Option<&str> {
    history
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
}

/// Build the message list sent to a provider: the system prompt first,
/// followed by the conversation history with any earlier system messages
/// removed (the injected prompt supersedes them).
pub fn with_system_prompt(system_prompt: &str, history: &[Message]) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    if !system_prompt.trim().is_empty() {
        messages.push(Message::system(system_prompt));
    }
    messages.extend(history.iter().filter(|m| m.role != Role::System).cloned());
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_user_message() {
        let history = vec![
            Message::user("first"),
            Message::assistant("reply"),
            Message::user("second"),
            Message::assistant("reply 2"),
        ];
        assert_eq!(latest_user_message(&history), Some("second"));
        assert_eq!(latest_user_message(&[Message::assistant("x")]), None);
    }

    #[test]
    fn test_with_system_prompt_replaces_existing_system() {
        let history = vec![Message::system("old"), Message::user("hi")];
        let messages = with_system_prompt("new", &history);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], Message::system("new"));
        assert_eq!(messages[1], Message::user("hi"));
    }

    #[test]
    fn test_with_empty_system_prompt() {
        let messages = with_system_prompt("  ", &[Message::user("hi")]);
        assert_eq!(messages, vec![Message::user("hi")]);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::user("x")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"x"}"#);
    }
}
