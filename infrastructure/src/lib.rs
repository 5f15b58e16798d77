//! Infrastructure layer for conductor
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer:
//!
//! - [`config`]: layered TOML configuration and the built-in agent table
//! - [`intent`]: keyword rule intent parser
//! - [`backends`]: offline and HTTP agent backends
//! - [`logging`]: JSONL run log

pub mod backends;
pub mod config;
pub mod intent;
pub mod logging;

pub use backends::{OfflineBackend, build_backend_set};
#[cfg(feature = "http-backends")]
pub use backends::HttpBackend;
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use intent::KeywordIntentParser;
pub use logging::JsonlRunLogger;
