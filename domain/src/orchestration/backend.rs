//! Execution backends and the rules that assign agents to them.

use crate::orchestration::selection::AgentMatch;
use crate::registry::descriptor::AgentDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Family of execution backend that runs an agent
///
/// All three are interchangeable from the orchestrator's point of view; they
/// differ only in the collaboration style they express best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Role and task delegation
    Crew,
    /// Free-form dialogue between agents
    Conversational,
    /// Deterministic graph execution
    WorkflowGraph,
}

impl BackendKind {
    pub const ALL: [BackendKind; 3] = [
        BackendKind::Crew,
        BackendKind::Conversational,
        BackendKind::WorkflowGraph,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Crew => "crew",
            BackendKind::Conversational => "conversational",
            BackendKind::WorkflowGraph => "workflow_graph",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "crew" => Ok(BackendKind::Crew),
            "conversational" => Ok(BackendKind::Conversational),
            "workflow_graph" | "workflow" | "graph" => Ok(BackendKind::WorkflowGraph),
            other => Err(format!("unknown backend: {}", other)),
        }
    }
}

/// A selected agent with its assigned backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSelection {
    pub agent_id: String,
    pub backend: BackendKind,
    pub confidence: f64,
    pub rationale: String,
    pub capabilities: BTreeSet<String>,
}

impl AgentSelection {
    pub fn from_match(matched: AgentMatch, backend: BackendKind) -> Self {
        Self {
            agent_id: matched.agent_id,
            backend,
            confidence: matched.confidence,
            rationale: matched.rationale,
            capabilities: matched.capabilities,
        }
    }

    pub fn has_any_capability(&self, capabilities: &[&str]) -> bool {
        capabilities.iter().any(|c| self.capabilities.contains(*c))
    }
}

/// Maps each agent to a backend by its declared reasoning styles.
///
/// Precedence, first match wins:
/// 1. conversational style (agent or request) → `Conversational`
/// 2. hierarchical style or `planning` capability → `Crew`
/// 3. stepwise style, or a `multi-hop` request → `WorkflowGraph`
/// 4. per-agent default table, else `Conversational`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendAssigner {
    agent_defaults: BTreeMap<String, BackendKind>,
}

impl BackendAssigner {
    pub fn new(agent_defaults: BTreeMap<String, BackendKind>) -> Self {
        Self { agent_defaults }
    }

    pub fn assign(&self, agent: &AgentDescriptor, request_style: &str) -> BackendKind {
        if agent.has_reasoning_style("conversational") || request_style == "conversational" {
            return BackendKind::Conversational;
        }
        if agent.has_reasoning_style("hierarchical") || agent.has_capability("planning") {
            return BackendKind::Crew;
        }
        if agent.has_reasoning_style("stepwise") || request_style == "multi-hop" {
            return BackendKind::WorkflowGraph;
        }
        self.agent_defaults
            .get(&agent.id)
            .copied()
            .unwrap_or(BackendKind::Conversational)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assigner() -> BackendAssigner {
        BackendAssigner::new(BTreeMap::from([(
            "competition_overview".to_string(),
            BackendKind::Crew,
        )]))
    }

    #[test]
    fn test_conversational_wins_over_everything() {
        let agent = AgentDescriptor::new("planner")
            .with_capabilities(["planning"])
            .with_reasoning_styles(["hierarchical", "stepwise"]);
        assert_eq!(
            assigner().assign(&agent, "conversational"),
            BackendKind::Conversational
        );
    }

    #[test]
    fn test_planning_capability_routes_to_crew() {
        let agent = AgentDescriptor::new("planner")
            .with_capabilities(["planning"])
            .with_reasoning_styles(["stepwise"]);
        assert_eq!(assigner().assign(&agent, "default"), BackendKind::Crew);
    }

    #[test]
    fn test_stepwise_and_multi_hop_route_to_workflow_graph() {
        let stepwise = AgentDescriptor::new("debugger")
            .with_capabilities(["error"])
            .with_reasoning_styles(["stepwise"]);
        assert_eq!(
            assigner().assign(&stepwise, "default"),
            BackendKind::WorkflowGraph
        );

        let plain = AgentDescriptor::new("debugger").with_capabilities(["error"]);
        assert_eq!(
            assigner().assign(&plain, "multi-hop"),
            BackendKind::WorkflowGraph
        );
    }

    #[test]
    fn test_default_table_then_conversational() {
        let known = AgentDescriptor::new("competition_overview").with_capabilities(["summary"]);
        assert_eq!(assigner().assign(&known, "default"), BackendKind::Crew);

        let unknown = AgentDescriptor::new("mystery").with_capabilities(["summary"]);
        assert_eq!(
            assigner().assign(&unknown, "default"),
            BackendKind::Conversational
        );
    }

    #[test]
    fn test_backend_kind_parse_and_display() {
        assert_eq!("crew".parse::<BackendKind>(), Ok(BackendKind::Crew));
        assert_eq!(
            "workflow-graph".parse::<BackendKind>(),
            Ok(BackendKind::WorkflowGraph)
        );
        assert!("telepathy".parse::<BackendKind>().is_err());
        assert_eq!(BackendKind::WorkflowGraph.to_string(), "workflow_graph");
    }
}
