//! Interaction patterns (plan topologies)

use crate::orchestration::backend::AgentSelection;
use crate::orchestration::complexity::ComplexityAssessment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capabilities that mark an agent as a coordinator.
pub const COORDINATOR_CAPABILITIES: &[&str] = &["planning", "timeline"];

/// Capabilities that mark an agent as a producer in a validation pair.
pub const PRODUCER_CAPABILITIES: &[&str] = &["code", "model"];

/// Capabilities that mark an agent as a validator.
pub const VALIDATOR_CAPABILITIES: &[&str] = &["error"];

/// How the selected agents of one request interact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionPattern {
    /// One after another, threading context
    #[default]
    Sequential,
    /// Independent agents run concurrently
    Parallel,
    /// A coordinator runs first and briefs the rest
    Hierarchical,
    /// Agents reinforce each other on a multi-faceted request
    Collaborative,
    /// A conversational agent consults specialists
    Consultative,
    /// Free-form dialogue between agents
    Conversational,
    /// A producer is checked by a validator
    Validation,
    /// Progressive widening of an answer
    Expansion,
}

impl InteractionPattern {
    pub const ALL: [InteractionPattern; 8] = [
        InteractionPattern::Sequential,
        InteractionPattern::Parallel,
        InteractionPattern::Hierarchical,
        InteractionPattern::Collaborative,
        InteractionPattern::Consultative,
        InteractionPattern::Conversational,
        InteractionPattern::Validation,
        InteractionPattern::Expansion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionPattern::Sequential => "sequential",
            InteractionPattern::Parallel => "parallel",
            InteractionPattern::Hierarchical => "hierarchical",
            InteractionPattern::Collaborative => "collaborative",
            InteractionPattern::Consultative => "consultative",
            InteractionPattern::Conversational => "conversational",
            InteractionPattern::Validation => "validation",
            InteractionPattern::Expansion => "expansion",
        }
    }

    /// Patterns whose agents run as concurrent tasks
    pub fn is_concurrent(&self) -> bool {
        matches!(
            self,
            InteractionPattern::Parallel | InteractionPattern::Collaborative
        )
    }
}

impl fmt::Display for InteractionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InteractionPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        InteractionPattern::ALL
            .into_iter()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| format!("unknown interaction pattern: {}", s))
    }
}

/// Chooses one pattern from complexity signals and the selection.
///
/// A pure function of its inputs; rules are checked in order:
/// 1. validation needed with 2+ agents → `Validation`
/// 2. collaboration needed with 3+ agents → `Collaborative`
/// 3. a single agent → `Sequential`
/// 4. a coordinator-capable agent → `Hierarchical`
/// 5. a conversational-capable agent → `Consultative`
/// 6. otherwise `Sequential`
pub struct PatternDeterminer;

impl PatternDeterminer {
    pub fn determine(
        complexity: &ComplexityAssessment,
        agents: &[AgentSelection],
    ) -> InteractionPattern {
        if complexity.needs_validation && agents.len() >= 2 {
            return InteractionPattern::Validation;
        }
        if complexity.needs_collaboration && agents.len() > 2 {
            return InteractionPattern::Collaborative;
        }
        if agents.len() == 1 {
            return InteractionPattern::Sequential;
        }
        if agents
            .iter()
            .any(|a| a.has_any_capability(COORDINATOR_CAPABILITIES))
        {
            return InteractionPattern::Hierarchical;
        }
        if agents
            .iter()
            .any(|a| a.has_any_capability(&["conversational"]))
        {
            return InteractionPattern::Consultative;
        }
        InteractionPattern::Sequential
    }
}
