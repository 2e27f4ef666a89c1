//! Prompt domain
//!
//! Templates for the synthesis and verification steps of the consensus flow.

mod template;

pub use template::{PromptTemplate, VERIFIED_OK};
