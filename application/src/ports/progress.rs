//! Progress notification port
//!
//! Defines the interface for reporting progress while a plan executes.

use conductor_domain::{AgentRunResult, AgentSelection, InteractionPlan, OrchestrationResult};

/// Callback for progress updates during orchestration
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, progress bars, etc.)
pub trait OrchestrationProgress: Send + Sync {
    /// Called once the plan is built, before any agent runs
    fn on_plan_ready(&self, plan: &InteractionPlan);

    /// Called when an agent invocation starts
    fn on_agent_start(&self, agent: &AgentSelection);

    /// Called when an agent invocation finishes, successfully or not
    fn on_agent_complete(&self, result: &AgentRunResult);

    /// Called after the envelope is assembled
    fn on_execution_complete(&self, _result: &OrchestrationResult) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl OrchestrationProgress for NoProgress {
    fn on_plan_ready(&self, _plan: &InteractionPlan) {}
    fn on_agent_start(&self, _agent: &AgentSelection) {}
    fn on_agent_complete(&self, _result: &AgentRunResult) {}
}
