//! Domain error types

use thiserror::Error;

/// Message shown to callers when no plan could be built for a request.
pub const NO_AGENTS_MATCHED_MESSAGE: &str = "no agents matched; please rephrase";

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The parsed intent carried no sub-intents to plan against
    #[error("no agents matched; please rephrase")]
    NoSubIntents,

    /// Agent selection came back empty, even after the fallback pass
    #[error("no agents matched; please rephrase")]
    NoAgentsMatched,

    /// An agent id that the registry never declared
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),
}

impl DomainError {
    /// Planning failures are fatal to the request but never to the process.
    pub fn is_planning_failure(&self) -> bool {
        matches!(self, DomainError::NoSubIntents | DomainError::NoAgentsMatched)
    }
}

/// Errors raised while building the capability registry at startup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("agent id cannot be empty")]
    EmptyAgentId,

    #[error("agent '{0}' is declared more than once")]
    DuplicateAgent(String),

    #[error("agent '{0}' declares no capabilities")]
    NoCapabilities(String),

    #[error("capability registry is empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planning_failures_share_user_message() {
        assert_eq!(
            DomainError::NoSubIntents.to_string(),
            NO_AGENTS_MATCHED_MESSAGE
        );
        assert_eq!(
            DomainError::NoAgentsMatched.to_string(),
            DomainError::NoSubIntents.to_string()
        );
    }

    #[test]
    fn test_is_planning_failure() {
        assert!(DomainError::NoSubIntents.is_planning_failure());
        assert!(DomainError::NoAgentsMatched.is_planning_failure());
        assert!(!DomainError::UnknownAgent("x".into()).is_planning_failure());
    }
}
