//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod agent_backend;
pub mod intent_parser;
pub mod progress;
pub mod run_logger;
