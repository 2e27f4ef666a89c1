//! Local file system context loader
//!
//! This module provides [`LocalContextLoader`], the file-backed
//! implementation of the [`ContextInjector`] port. It reads a memory/context
//! file once at startup and offers its content as extra system-prompt text
//! for every request.
//!
//! # File Detection
//!
//! 1. The file named by `[context] file` in the configuration, if set
//! 2. `.chorus/context.md` in the working directory, if it exists
//!
//! Missing or empty files simply mean "no context".

use chorus_application::ports::context_injector::ContextInjector;
use chorus_domain::core::string::truncate_chars;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Conventional project-local context file
pub const DEFAULT_CONTEXT_FILE: &str = ".chorus/context.md";

/// Upper bound on injected context, in characters
pub const MAX_CONTEXT_CHARS: usize = 8000;

/// Context injector that reads from the local file system.
#[derive(Debug, Clone, Default)]
pub struct LocalContextLoader {
    context: Option<String>,
    source: Option<PathBuf>,
}

impl LocalContextLoader {
    /// A loader with no context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the configured file, or the conventional one when none is configured.
    pub fn discover(configured: Option<&Path>) -> Self {
        match configured {
            Some(path) => Self::from_file(path),
            None => Self::from_file(Path::new(DEFAULT_CONTEXT_FILE)),
        }
    }

    /// Load context from `path`.
    ///
    /// Returns an empty loader when the file does not exist, is not a
    /// regular file, is blank, or cannot be read.
    pub fn from_file(path: &Path) -> Self {
        if !path.is_file() {
            debug!("No context file at {:?}", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => {
                debug!("Skipping empty context file: {:?}", path);
                Self::default()
            }
            Ok(content) => {
                debug!("Loaded context file: {:?}", path);
                Self {
                    context: Some(truncate_chars(content.trim(), MAX_CONTEXT_CHARS)),
                    source: Some(path.to_path_buf()),
                }
            }
            Err(e) => {
                warn!("Failed to read context file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Path the context was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.context.is_none()
    }
}

impl ContextInjector for LocalContextLoader {
    fn context_for(&self, _user_message: &str) -> Option<String> {
        self.context.clone()
    }
}
