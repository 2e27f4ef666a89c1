//! Conversation domain.
//!
//! - [`entities::Message`] - a single `{role, content}` message
//! - [`entities::Role`] - system / user / assistant

pub mod entities;
