//! Port for the memory/context collaborator that may extend the system prompt.

/// Supplies extra system-prompt text before a request is dispatched.
///
/// The returned text is prepended to the caller's system prompt. Note that
/// the cache key is derived from the *augmented* prompt, so a change in
/// injected context never serves a stale answer.
pub trait ContextInjector: Send + Sync {
    /// Extra context for this user message, or `None` when there is nothing to add.
    fn context_for(&self, user_message: &str) -> Option<String>;
}

/// No-op injector for tests and when no context source is configured.
pub struct NoContext;

impl ContextInjector for NoContext {
    fn context_for(&self, _user_message: &str) -> Option<String> {
        None
    }
}

/// Combine injected context with the base system prompt.
pub fn augment_system_prompt(context: Option<&str>, base: &str) -> String {
    match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(context) if base.trim().is_empty() => context.to_string(),
        Some(context) => format!("{}\n\n{}", context, base),
        None => base.to_string(),
    }
}
