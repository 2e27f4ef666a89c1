//! Configuration file loading for chorus
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CHORUS_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./chorus.toml` or `./.chorus.toml`
//! 4. Global: `$XDG_CONFIG_HOME/chorus/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileConsensusConfig, FileContextConfig, FileLoggingConfig,
    FileOutputConfig, FileProviderConfig, FileRoutingConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
