//! Context loading infrastructure
//!
//! Implements the [`ContextInjector`] port from a local file.
//!
//! [`ContextInjector`]: chorus_application::ContextInjector

mod loader;

pub use loader::{DEFAULT_CONTEXT_FILE, LocalContextLoader};
