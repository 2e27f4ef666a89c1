//! Infrastructure layer for chorus
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP providers, the provider registry,
//! cache storage, context loading, outcome logging and configuration
//! file loading.

pub mod cache;
pub mod config;
pub mod context;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use cache::InMemoryCacheStore;
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileOutputConfig, FileProviderConfig,
};
pub use context::LocalContextLoader;
pub use logging::JsonlOutcomeLogger;
pub use providers::{
    GeminiProvider, HttpProvider, HttpProviderRegistry, OpenAiCompatibleProvider, ProviderStatus,
    build_http_client,
};
