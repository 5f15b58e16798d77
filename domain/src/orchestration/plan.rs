//! Interaction plan construction
//!
//! A plan fixes the agents of one request, their backends, the order they
//! run in and a rough duration estimate.

use crate::orchestration::backend::AgentSelection;
use crate::orchestration::pattern::{
    COORDINATOR_CAPABILITIES, InteractionPattern, PRODUCER_CAPABILITIES, VALIDATOR_CAPABILITIES,
};
use serde::{Deserialize, Serialize};

/// Estimated wall time per agent invocation.
const SECONDS_PER_AGENT: f64 = 30.0;
const PARALLEL_FACTOR: f64 = 0.7;
const COLLABORATIVE_FACTOR: f64 = 1.5;
const HIGH_COMPLEXITY_FACTOR: f64 = 1.5;
const HIGH_COMPLEXITY_SCORE: f64 = 0.7;

/// Concrete, ordered plan for one request (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionPlan {
    pub pattern: InteractionPattern,
    pub agents: Vec<AgentSelection>,
    /// Indices into `agents`; always a permutation of `0..agents.len()`
    pub execution_order: Vec<usize>,
    pub estimated_seconds: u64,
    /// Human readable form of `estimated_seconds`, e.g. "2m 15s"
    pub estimated_duration: String,
    pub complexity_score: f64,
}

impl InteractionPlan {
    /// Agents in the order they will run.
    pub fn ordered_agents(&self) -> impl Iterator<Item = &AgentSelection> {
        self.execution_order.iter().map(|&i| &self.agents[i])
    }

    /// The agent that runs first (coordinator or producer, depending on pattern).
    pub fn lead(&self) -> Option<&AgentSelection> {
        self.execution_order.first().map(|&i| &self.agents[i])
    }

    pub fn agent_ids(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.agent_id.clone()).collect()
    }
}

/// Builds [`InteractionPlan`]s
pub struct PlanBuilder;

impl PlanBuilder {
    /// Build a plan for the given pattern.
    ///
    /// `Validation` needs two distinct agents; with fewer it degrades to
    /// `Sequential`.
    pub fn build(
        pattern: InteractionPattern,
        agents: Vec<AgentSelection>,
        complexity_score: f64,
    ) -> InteractionPlan {
        let pattern = if pattern == InteractionPattern::Validation && agents.len() < 2 {
            InteractionPattern::Sequential
        } else {
            pattern
        };

        let execution_order = match pattern {
            InteractionPattern::Hierarchical => Self::coordinator_first(&agents),
            InteractionPattern::Validation => Self::producer_then_validator(&agents),
            _ => (0..agents.len()).collect(),
        };

        let estimated_seconds = Self::estimate_seconds(pattern, agents.len(), complexity_score);

        InteractionPlan {
            pattern,
            agents,
            execution_order,
            estimated_seconds,
            estimated_duration: format_duration(estimated_seconds),
            complexity_score,
        }
    }

    fn coordinator_first(agents: &[AgentSelection]) -> Vec<usize> {
        let coordinator = agents
            .iter()
            .position(|a| a.has_any_capability(COORDINATOR_CAPABILITIES))
            .unwrap_or(0);
        Self::leading(agents.len(), &[coordinator])
    }

    fn producer_then_validator(agents: &[AgentSelection]) -> Vec<usize> {
        let producer = agents
            .iter()
            .position(|a| a.has_any_capability(PRODUCER_CAPABILITIES))
            .unwrap_or(0);
        let validator = agents
            .iter()
            .enumerate()
            .position(|(i, a)| i != producer && a.has_any_capability(VALIDATOR_CAPABILITIES))
            .or_else(|| (0..agents.len()).find(|&i| i != producer));

        match validator {
            Some(validator) => Self::leading(agents.len(), &[producer, validator]),
            None => Self::leading(agents.len(), &[producer]),
        }
    }

    /// `lead` first, then every other index in original order.
    fn leading(len: usize, lead: &[usize]) -> Vec<usize> {
        let mut order: Vec<usize> = lead.iter().copied().filter(|&i| i < len).collect();
        order.extend((0..len).filter(|i| !lead.contains(i)));
        order
    }

    fn estimate_seconds(pattern: InteractionPattern, agent_count: usize, complexity: f64) -> u64 {
        let mut seconds = SECONDS_PER_AGENT * agent_count as f64;
        match pattern {
            InteractionPattern::Parallel => seconds *= PARALLEL_FACTOR,
            InteractionPattern::Collaborative => seconds *= COLLABORATIVE_FACTOR,
            _ => {}
        }
        if complexity > HIGH_COMPLEXITY_SCORE {
            seconds *= HIGH_COMPLEXITY_FACTOR;
        }
        seconds.round() as u64
    }
}

/// Render seconds as "45s", "2m" or "2m 10s".
pub fn format_duration(seconds: u64) -> String {
    let minutes = seconds / 60;
    let rest = seconds % 60;
    match (minutes, rest) {
        (0, s) => format!("{}s", s),
        (m, 0) => format!("{}m", m),
        (m, s) => format!("{}m {}s", m, s),
    }
}
