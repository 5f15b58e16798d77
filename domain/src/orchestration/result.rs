//! Run results and the synthesized response envelope
//!
//! - [`AgentRunResult`] - outcome of one agent invocation
//! - [`OrchestrationResult`] - the envelope returned for a whole request
//! - [`ResultSynthesizer`] - merges per-agent results with plan provenance

use crate::core::context::ContextMap;
use crate::orchestration::backend::BackendKind;
use crate::orchestration::pattern::InteractionPattern;
use crate::orchestration::plan::InteractionPlan;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Outcome of running one agent against one backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRunResult {
    pub agent_id: String,
    pub backend: BackendKind,
    /// The agent's answer; empty when the invocation failed
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Context contributed to later agents; always empty on failure
    #[serde(default)]
    pub context_delta: ContextMap,
    #[serde(default)]
    pub duration_ms: u64,
}

impl AgentRunResult {
    /// Creates a successful result.
    pub fn success(
        agent_id: impl Into<String>,
        backend: BackendKind,
        output: impl Into<String>,
        context_delta: ContextMap,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            backend,
            output: output.into(),
            error: None,
            context_delta,
            duration_ms: 0,
        }
    }

    /// Creates a failed result. Failed agents contribute no context.
    pub fn failure(agent_id: impl Into<String>, backend: BackendKind, error: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            backend,
            output: String::new(),
            error: Some(error.into()),
            context_delta: ContextMap::new(),
            duration_ms: 0,
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Envelope returned for every orchestrated request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationResult {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<InteractionPattern>,
    pub agents_used: Vec<String>,
    pub backends_used: BTreeSet<BackendKind>,
    pub per_agent_results: Vec<AgentRunResult>,
    /// Number of agents in the plan
    pub agent_count: usize,
    /// Set when execution was cancelled before every step ran
    #[serde(default)]
    pub incomplete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<InteractionPlan>,
    /// Set when planning failed and nothing was executed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OrchestrationResult {
    /// Envelope for a request whose planning failed.
    pub fn planning_failed(query: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            pattern: None,
            agents_used: Vec::new(),
            backends_used: BTreeSet::new(),
            per_agent_results: Vec::new(),
            agent_count: 0,
            incomplete: false,
            plan: None,
            error: Some(error.into()),
        }
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &AgentRunResult> {
        self.per_agent_results.iter().filter(|r| r.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &AgentRunResult> {
        self.per_agent_results.iter().filter(|r| !r.is_success())
    }

    /// `true` when at least one agent produced an answer
    pub fn has_answer(&self) -> bool {
        self.succeeded().next().is_some()
    }
}

/// Merges per-agent results into an [`OrchestrationResult`].
///
/// Composing a natural-language answer from the parts is left to the caller.
pub struct ResultSynthesizer;

impl ResultSynthesizer {
    pub fn synthesize(
        query: impl Into<String>,
        plan: &InteractionPlan,
        results: Vec<AgentRunResult>,
        incomplete: bool,
    ) -> OrchestrationResult {
        OrchestrationResult {
            query: query.into(),
            pattern: Some(plan.pattern),
            agents_used: results.iter().map(|r| r.agent_id.clone()).collect(),
            backends_used: results.iter().map(|r| r.backend).collect(),
            per_agent_results: results,
            agent_count: plan.agents.len(),
            incomplete,
            plan: Some(plan.clone()),
            error: None,
        }
    }
}
