//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`] - domain-level errors
//! - [`error::ErrorHint`] - categorised hint for terminal failures
//! - [`string::truncate_chars`] - UTF-8 safe excerpting

pub mod error;
pub mod string;
