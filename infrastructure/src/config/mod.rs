//! Configuration file loading for conductor
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CONDUCTOR_*` environment variables (`__` separates nested keys)
//! 2. `--config <path>` specified file
//! 3. Project root: `./conductor.toml` or `./.conductor.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/conductor/config.toml`
//! 5. Built-in defaults (contest agent table and keyword rules)

mod defaults;
mod file_config;
mod loader;

pub use defaults::{default_agent_backends, default_agents, default_intent_rules};
pub use file_config::{
    ConfigValidationError, DEFAULT_AGENT_TIMEOUT_SECONDS, FileAgentConfig, FileBackendsConfig,
    FileConfig, FileExecutionConfig, FileLoggingConfig,
};
pub use loader::ConfigLoader;
