//! Application-level configuration.
//!
//! - [`ExecutionParams`]: per-agent timeouts and concurrency limits

pub mod execution_params;

pub use execution_params::ExecutionParams;
