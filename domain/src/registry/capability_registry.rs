//! Capability registry
//!
//! Read-only table of [`AgentDescriptor`]s in declaration order. Declaration
//! order matters: the agent selector breaks score ties by it.

use crate::core::error::{DomainError, RegistryError};
use crate::registry::descriptor::AgentDescriptor;
use std::collections::HashMap;

/// Registry of every agent the orchestrator may select.
///
/// Constructed once and injected (usually behind an `Arc`) into every
/// component that needs it. There is no runtime mutation.
#[derive(Debug, Clone)]
pub struct CapabilityRegistry {
    agents: Vec<AgentDescriptor>,
    index: HashMap<String, usize>,
}

impl CapabilityRegistry {
    /// Build a registry, rejecting malformed tables.
    ///
    /// Fails on an empty table, empty ids, duplicate ids, and agents that
    /// declare no capabilities.
    pub fn new(agents: Vec<AgentDescriptor>) -> Result<Self, RegistryError> {
        if agents.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut index = HashMap::with_capacity(agents.len());
        for (i, agent) in agents.iter().enumerate() {
            if agent.id.trim().is_empty() {
                return Err(RegistryError::EmptyAgentId);
            }
            if agent.capabilities.is_empty() {
                return Err(RegistryError::NoCapabilities(agent.id.clone()));
            }
            if index.insert(agent.id.clone(), i).is_some() {
                return Err(RegistryError::DuplicateAgent(agent.id.clone()));
            }
        }

        Ok(Self { agents, index })
    }

    /// Look up an agent by id.
    ///
    /// Callers should only pass ids obtained from [`all`](Self::all); an
    /// unknown id indicates a bug in the caller.
    pub fn lookup(&self, agent_id: &str) -> Result<&AgentDescriptor, DomainError> {
        self.index
            .get(agent_id)
            .map(|&i| &self.agents[i])
            .ok_or_else(|| DomainError::UnknownAgent(agent_id.to_string()))
    }

    /// All agents in declaration order.
    pub fn all(&self) -> &[AgentDescriptor] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
