//! Application layer for conductor
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    agent_backend::{AgentBackend, BackendError, BackendOutput, BackendSet},
    intent_parser::{FixedIntentParser, IntentParser},
    progress::{NoProgress, OrchestrationProgress},
    run_logger::{NoRunLogger, RunEvent, RunLogger},
};
pub use use_cases::execute_plan::{ExecutePlanUseCase, ExecutionOutcome};
pub use use_cases::orchestrate::{OrchestrateInput, OrchestrateUseCase, PlannedRequest};
